use super::{Controller, with_controller};
use crate::dom;
use crate::submit::FormSubmitter;
use dreamtrip_core::{FormInput, SubmitError, SubmitStart};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Validate `input`, deliver it, then report the outcome to the controller.
///
/// The controller is not borrowed across the await.
#[allow(clippy::future_not_send)]
pub async fn run(
    controller: &Weak<RefCell<Controller>>,
    submitter: Rc<dyn FormSubmitter>,
    input: FormInput,
) {
    let form_id = input.form_id.clone();
    let mut start = SubmitStart::Busy;
    with_controller(controller, |c| start = c.begin_submission(input));
    let SubmitStart::Ready(submission) = start else {
        return;
    };
    let outcome = submitter.submit(&submission).await;
    finish(controller, &form_id, outcome).await;
}

/// Report `outcome`, waiting out any handler that currently holds the controller.
/// Dropping it would leave the form busy for good.
#[allow(clippy::future_not_send)]
pub async fn finish(
    controller: &Weak<RefCell<Controller>>,
    form_id: &str,
    outcome: Result<(), SubmitError>,
) {
    loop {
        let Some(shared) = controller.upgrade() else {
            return;
        };
        if let Ok(mut c) = shared.try_borrow_mut() {
            c.finish_submission(form_id, outcome);
            return;
        }
        drop(shared);
        if let Err(err) = dom::sleep_ms(0).await {
            log::error!("outcome for {form_id} lost, the form stays busy: {err}");
            return;
        }
    }
}
