//! Wiring the controller into the live page.
use crate::dom;
use crate::render::{DomRenderer, ModalHooks};
use crate::router::BrowserRouter;
use crate::storage::LocalPreferenceStore;
use crate::submit::FormSubmitter;
use dreamtrip_core::{BrowserSignals, ControllerConfig, FormInput, OverlayEvent, ViewStateController};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use yew::Callback;

pub mod bootstrap;
pub mod events;
pub mod submission;

pub type Controller = ViewStateController<LocalPreferenceStore, BrowserRouter, DomRenderer>;
pub type SharedController = Rc<RefCell<Controller>>;

/// Read locale and color-scheme hints from the browser.
#[must_use]
pub fn browser_signals() -> BrowserSignals {
    let Some(win) = dom::window() else {
        return BrowserSignals::default();
    };
    BrowserSignals {
        browser_locale: win.navigator().language(),
        system_prefers_dark: win
            .match_media("(prefers-color-scheme: dark)")
            .ok()
            .flatten()
            .is_some_and(|query| query.matches()),
    }
}

/// Run `action` against the controller if it is still alive and not busy.
pub fn with_controller(controller: &Weak<RefCell<Controller>>, action: impl FnOnce(&mut Controller)) {
    let Some(controller) = controller.upgrade() else {
        return;
    };
    match controller.try_borrow_mut() {
        Ok(mut guard) => action(&mut guard),
        Err(_) => log::warn!("controller busy; dropping re-entrant event"),
    };
}

/// Like [`with_controller`], but after the current event finishes. Dialog
/// callbacks use this because the dialog may be torn down by the action.
pub fn defer(controller: Weak<RefCell<Controller>>, action: impl FnOnce(&mut Controller) + 'static) {
    wasm_bindgen_futures::spawn_local(async move {
        with_controller(&controller, action);
    });
}

/// Dialog callbacks that route back into `controller`.
#[must_use]
pub fn modal_hooks(
    controller: &Weak<RefCell<Controller>>,
    submitter: &Rc<dyn FormSubmitter>,
) -> ModalHooks {
    ModalHooks {
        on_dismiss: {
            let weak = controller.clone();
            Callback::from(move |event: OverlayEvent| {
                defer(weak.clone(), move |c| c.dispatch_overlay(event));
            })
        },
        on_submit: {
            let weak = controller.clone();
            let submitter = Rc::clone(submitter);
            Callback::from(move |input: FormInput| {
                let submitter = Rc::clone(&submitter);
                let weak = weak.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    submission::run(&weak, submitter, input).await;
                });
            })
        },
    }
}

/// Build the controller, connect the dialog and render the first state.
#[must_use]
pub fn create(config: ControllerConfig, submitter: &Rc<dyn FormSubmitter>) -> SharedController {
    let controller = ViewStateController::new(
        config,
        LocalPreferenceStore::open(),
        BrowserRouter::new(),
        DomRenderer::new(),
        &browser_signals(),
    );
    let shared = Rc::new(RefCell::new(controller));
    let hooks = modal_hooks(&Rc::downgrade(&shared), submitter);
    shared.borrow_mut().renderer_mut().bind_modal(hooks);
    shared.borrow_mut().start();
    shared
}
