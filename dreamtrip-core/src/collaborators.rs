//! Seams between the controller and the host page.
//!
//! Platform-specific crates implement these; tests use the in-memory versions
//! in [`crate::testing`].
use crate::overlay::OverlayState;
use crate::strings::StringTable;
use crate::theme::Theme;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreferenceError {
    #[error("preference storage unavailable")]
    Unavailable,
    #[error("failed to write preference {key}: {reason}")]
    Write { key: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("location unavailable")]
    Unavailable,
    #[error("navigation to {target} failed: {reason}")]
    Rejected { target: String, reason: String },
}

/// Durable key-value storage for small preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns an error when the value cannot be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Read and change the page location.
///
/// Query and hash are exchanged without their leading `?` / `#`.
pub trait Router {
    fn current_path(&self) -> String;
    fn current_query(&self) -> String;
    fn current_hash(&self) -> String;

    /// Full navigation to another document.
    ///
    /// # Errors
    ///
    /// Returns an error when the browser refuses the navigation.
    fn navigate(&mut self, path: &str, query: &str, hash: &str) -> Result<(), NavigationError>;

    /// Update the hash in history without reloading.
    ///
    /// # Errors
    ///
    /// Returns an error when history cannot be updated.
    fn push_state(&mut self, hash: &str) -> Result<(), NavigationError>;
}

/// Join path, query and hash into one href.
#[must_use]
pub fn compose_href(path: &str, query: &str, hash: &str) -> String {
    let mut href = path.to_string();
    if !query.is_empty() {
        href.push('?');
        href.push_str(query);
    }
    if !hash.is_empty() {
        href.push('#');
        href.push_str(hash);
    }
    href
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

impl NotificationLevel {
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A transient toast removed by the renderer after `duration_ms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration_ms: u32,
}

/// Applies controller state to the visible document.
///
/// Every method must be a no-op when its target element is absent.
pub trait Renderer {
    fn apply_language(&mut self, strings: &StringTable);
    fn apply_theme(&mut self, theme: Theme);
    /// Mark the desktop and mobile navigation entries for `section_id` active
    /// and clear all others.
    fn set_active_nav(&mut self, section_id: &str);
    fn set_nav_scrolled(&mut self, scrolled: bool);
    /// Show the overlay, lock background scroll, focus its first control.
    fn show_overlay(&mut self, overlay: &OverlayState, strings: &StringTable);
    /// Hide whatever overlay is visible and release the scroll lock.
    fn hide_overlay(&mut self);
    fn show_notification(&mut self, notification: &Notification);
    fn set_form_submitting(&mut self, form_id: &str, submitting: bool);
    fn reset_form(&mut self, form_id: &str);
    /// Flag exactly `field_names` in the form, clearing earlier flags.
    fn flag_invalid_fields(&mut self, form_id: &str, field_names: &[String]);
    fn scroll_to_section(&mut self, section_id: &str, offset_px: f64);
    fn focus_search(&mut self);
}
