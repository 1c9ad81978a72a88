use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::hook;
use yew::prelude::*;

const FOCUSABLE_QUERY: &str =
    "button, [href], input, textarea, select, [tabindex]:not([tabindex='-1'])";
const FIRST_FIELD_QUERY: &str = "input, textarea, select";

/// Focus the first form field once mounted; hand focus back to whatever had
/// it when the dialog unmounts.
#[hook]
pub fn use_dialog_focus(container_ref: NodeRef) {
    use_effect_with(container_ref, move |container_ref| {
        let mut prev_focus: Option<web_sys::HtmlElement> = None;
        let focus_target = if cfg!(target_arch = "wasm32") {
            prev_focus = crate::dom::document().and_then(|doc| {
                doc.active_element()
                    .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok())
            });
            container_ref
                .cast::<web_sys::Element>()
                .and_then(|el| el.query_selector(FIRST_FIELD_QUERY).ok().flatten())
                .and_then(|n| n.dyn_into::<web_sys::HtmlElement>().ok())
        } else {
            None
        };

        if let Some(first) = focus_target {
            let _ = first.focus();
        }
        move || {
            if let Some(el) = prev_focus {
                let _ = el.focus();
            }
        }
    });
}

/// Keep Tab and Shift+Tab cycling inside the dialog. Escape is left to the
/// page-level key handler.
pub fn trap_tab(container_ref: NodeRef) -> Callback<KeyboardEvent> {
    Callback::from(move |e: KeyboardEvent| {
        if !cfg!(target_arch = "wasm32") || e.key() != "Tab" {
            return;
        }
        let Some(container) = container_ref.cast::<web_sys::Element>() else {
            return;
        };
        let Ok(nodes) = container.query_selector_all(FOCUSABLE_QUERY) else {
            return;
        };
        let len = nodes.length();
        if len == 0 {
            return;
        }
        let first = nodes
            .get(0)
            .and_then(|n| n.dyn_into::<web_sys::HtmlElement>().ok());
        let last = nodes
            .get(len - 1)
            .and_then(|n| n.dyn_into::<web_sys::HtmlElement>().ok());
        let active = crate::dom::document().and_then(|d| d.active_element());
        if let (Some(first), Some(last), Some(active)) = (first, last, active) {
            if !container.contains(Some(&active)) {
                e.prevent_default();
                let _ = first.focus();
                return;
            }
            let first_el: &web_sys::Element = first.unchecked_ref();
            let last_el: &web_sys::Element = last.unchecked_ref();
            if e.shift_key() && active == *first_el {
                e.prevent_default();
                let _ = last.focus();
            } else if !e.shift_key() && active == *last_el {
                e.prevent_default();
                let _ = first.focus();
            }
        }
    })
}
