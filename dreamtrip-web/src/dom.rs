use js_sys::{Function, Promise};
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlElement, Storage, Window};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("browser window unavailable")]
    NoWindow,
    #[error("document unavailable")]
    NoDocument,
    #[error("{context}: {message}")]
    Js {
        context: &'static str,
        message: String,
    },
}

impl DomError {
    #[must_use]
    pub fn js(context: &'static str, value: &JsValue) -> Self {
        Self::Js {
            context,
            message: js_error_message(value),
        }
    }
}

/// Retrieve the global `window` object. Always `None` off the browser.
#[must_use]
pub fn window() -> Option<Window> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// # Errors
/// Returns [`DomError::NoDocument`] outside a browser page.
pub fn require_document() -> Result<Document, DomError> {
    document().ok_or(DomError::NoDocument)
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&JsValue::from(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

/// Every element matching `selector`, in document order.
#[must_use]
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|idx| list.get(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

#[must_use]
pub fn query_one(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

#[must_use]
pub fn as_html(element: Element) -> Option<HtmlElement> {
    element.dyn_into::<HtmlElement>().ok()
}

/// Run `callback` once after `delay_ms`. Returns the timer handle.
///
/// # Errors
/// Returns an error when there is no window or the timer is refused.
pub fn set_timeout(callback: impl FnOnce() + 'static, delay_ms: u32) -> Result<i32, DomError> {
    let win = window().ok_or(DomError::NoWindow)?;
    let callback = Closure::once_into_js(callback);
    win.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        i32::try_from(delay_ms).unwrap_or(i32::MAX),
    )
    .map_err(|err| DomError::js("setTimeout", &err))
}

pub fn clear_timeout(handle: i32) {
    if let Some(win) = window() {
        win.clear_timeout_with_handle(handle);
    }
}

/// Run `callback` before the next repaint.
///
/// # Errors
/// Returns an error when there is no window or the frame request is refused.
pub fn request_animation_frame(callback: impl FnOnce() + 'static) -> Result<i32, DomError> {
    let win = window().ok_or(DomError::NoWindow)?;
    let callback = Closure::once_into_js(callback);
    win.request_animation_frame(callback.unchecked_ref())
        .map_err(|err| DomError::js("requestAnimationFrame", &err))
}

/// Yield execution for the requested number of milliseconds.
///
/// # Errors
/// Returns an error if the timer cannot be scheduled or the underlying JavaScript promise rejects.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn sleep_ms(duration_ms: u32) -> Result<(), DomError> {
    let win = window().ok_or(DomError::NoWindow)?;
    let mut resolve_slot: Option<Function> = None;
    let promise = Promise::new(&mut |resolve, _reject| {
        resolve_slot = Some(resolve);
    });

    let resolve = resolve_slot.ok_or(DomError::Js {
        context: "sleep",
        message: "resolve function should be set".to_string(),
    })?;
    let closure = Closure::once(move || {
        let _ = resolve.call0(&JsValue::UNDEFINED);
    });

    let _ = win
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            i32::try_from(duration_ms).unwrap_or(i32::MAX),
        )
        .map_err(|err| DomError::js("setTimeout", &err))?;
    closure.forget();

    JsFuture::from(promise)
        .await
        .map_err(|err| DomError::js("sleep", &err))?;
    Ok(())
}

/// Access the browser `localStorage` handle.
///
/// # Errors
/// Returns an error if the browser window cannot be accessed or `localStorage` is unavailable.
pub fn local_storage() -> Result<Storage, DomError> {
    window()
        .ok_or(DomError::NoWindow)?
        .local_storage()
        .map_err(|err| DomError::js("localStorage", &err))?
        .ok_or(DomError::Js {
            context: "localStorage",
            message: "unavailable".to_string(),
        })
}
