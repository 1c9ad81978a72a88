#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod app;
pub mod components;
pub mod dom;
pub mod forms;
pub mod render;
pub mod router;
pub mod storage;
pub mod submit;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    if let Err(err) = app::bootstrap::mount() {
        dom::console_error(&format!("dream trip failed to start: {err:#}"));
    }
}
