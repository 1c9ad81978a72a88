use super::{SharedController, events, with_controller};
use crate::dom;
use crate::submit::{FormSubmitter, SimulatedSubmitter};
use anyhow::Context;
use dreamtrip_core::{ControllerConfig, Router};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

thread_local! {
    static ACTIVE: RefCell<Option<SharedController>> = const { RefCell::new(None) };
}

/// The controller mounted on this page, if any.
#[must_use]
pub fn active() -> Option<SharedController> {
    ACTIVE.with(|slot| slot.borrow().clone())
}

/// Make `controller` the one page-level entry points talk to.
pub fn set_active(controller: &SharedController) {
    ACTIVE.with(|slot| *slot.borrow_mut() = Some(Rc::clone(controller)));
}

/// `scrollToSection(id)` for inline `onclick` handlers in the page markup.
#[wasm_bindgen(js_name = scrollToSection)]
pub fn scroll_to_section(section_id: &str) {
    let Some(controller) = active() else {
        log::warn!("scrollToSection({section_id}) before the site mounted");
        return;
    };
    with_controller(&Rc::downgrade(&controller), |c| {
        c.scroll_to_section(section_id);
    });
}

/// Start the site with the embedded configuration and the simulated submitter.
///
/// # Errors
/// Returns an error when the page cannot be wired up.
pub fn mount() -> anyhow::Result<SharedController> {
    let config = ControllerConfig::load_from_static();
    if let Some(level) = config.log_filter().to_level()
        && let Err(err) = console_log::init_with_level(level)
    {
        dom::console_error(&format!("logger not installed: {err}"));
    }
    let submitter: Rc<dyn FormSubmitter> =
        Rc::new(SimulatedSubmitter::new(config.simulated_submit_delay_ms));
    mount_with(config, &submitter)
}

/// # Errors
/// Returns an error when the page cannot be wired up.
pub fn mount_with(
    config: ControllerConfig,
    submitter: &Rc<dyn FormSubmitter>,
) -> anyhow::Result<SharedController> {
    let controller = super::create(config, submitter);
    events::install(&controller, submitter).context("wiring page events")?;
    scroll_to_initial_hash(&controller);
    log::info!(
        "dream trip ready in {} with {} theme",
        controller.borrow().language(),
        controller.borrow().theme()
    );
    set_active(&controller);
    Ok(controller)
}

/// A hash present at load scrolls to its section once layout has settled.
fn scroll_to_initial_hash(controller: &SharedController) {
    let (hash, delay_ms) = {
        let c = controller.borrow();
        (c.router().current_hash(), c.config().initial_hash_delay_ms)
    };
    if hash.is_empty() {
        return;
    }
    let weak = Rc::downgrade(controller);
    let target = hash.clone();
    if let Err(err) = dom::set_timeout(
        move || with_controller(&weak, |c| c.scroll_to_section(&target)),
        delay_ms,
    ) {
        log::warn!("initial scroll to #{hash} skipped: {err}");
    }
}
