use crate::dom;
use dreamtrip_core::{NavigationError, Router, compose_href};
use wasm_bindgen::JsValue;
use web_sys::{Location, Window};

/// [`Router`] over `window.location` and `window.history`.
#[derive(Debug, Clone, Default)]
pub struct BrowserRouter {
    window: Option<Window>,
}

impl BrowserRouter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            window: dom::window(),
        }
    }

    fn location(&self) -> Option<Location> {
        self.window.as_ref().map(Window::location)
    }

    fn read(&self, part: impl Fn(&Location) -> Result<String, JsValue>) -> String {
        self.location()
            .and_then(|location| part(&location).ok())
            .unwrap_or_default()
    }
}

impl Router for BrowserRouter {
    fn current_path(&self) -> String {
        let path = self.read(Location::pathname);
        if path.is_empty() { "/".to_string() } else { path }
    }

    fn current_query(&self) -> String {
        self.read(Location::search).trim_start_matches('?').to_string()
    }

    fn current_hash(&self) -> String {
        self.read(Location::hash).trim_start_matches('#').to_string()
    }

    fn navigate(&mut self, path: &str, query: &str, hash: &str) -> Result<(), NavigationError> {
        let location = self.location().ok_or(NavigationError::Unavailable)?;
        let href = compose_href(path, query, hash);
        log::info!("navigating to {href}");
        location
            .assign(&href)
            .map_err(|err| NavigationError::Rejected {
                target: href,
                reason: dom::js_error_message(&err),
            })
    }

    fn push_state(&mut self, hash: &str) -> Result<(), NavigationError> {
        let target = format!("#{hash}");
        let history = self
            .window
            .as_ref()
            .ok_or(NavigationError::Unavailable)?
            .history()
            .map_err(|err| NavigationError::Rejected {
                target: target.clone(),
                reason: dom::js_error_message(&err),
            })?;
        history
            .push_state_with_url(&JsValue::NULL, "", Some(&target))
            .map_err(|err| NavigationError::Rejected {
                target,
                reason: dom::js_error_message(&err),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_router_reports_root_and_refuses_navigation() {
        let mut router = BrowserRouter::default();
        assert_eq!(router.current_path(), "/");
        assert_eq!(router.current_query(), "");
        assert_eq!(router.current_hash(), "");
        assert_eq!(
            router.navigate("/en", "", ""),
            Err(NavigationError::Unavailable)
        );
        assert_eq!(router.push_state("about"), Err(NavigationError::Unavailable));
    }
}
