//! In-memory collaborators for exercising the controller without a browser.
use crate::collaborators::{
    NavigationError, Notification, PreferenceError, PreferenceStore, Renderer, Router,
    compose_href,
};
use crate::language::Language;
use crate::overlay::OverlayState;
use crate::strings::StringTable;
use crate::theme::Theme;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    pub values: BTreeMap<String, String>,
    pub writes: Vec<(String, String)>,
    pub fail_writes: bool,
}

impl MemoryPreferenceStore {
    #[must_use]
    pub fn with(entries: &[(&str, &str)]) -> Self {
        Self {
            values: entries
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn writes_to(&self, key: &str) -> usize {
        self.writes.iter().filter(|(k, _)| k == key).count()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        if self.fail_writes {
            return Err(PreferenceError::Unavailable);
        }
        self.values.insert(key.to_string(), value.to_string());
        self.writes.push((key.to_string(), value.to_string()));
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryRouter {
    pub path: String,
    pub query: String,
    pub hash: String,
    pub navigations: Vec<String>,
    pub pushes: Vec<String>,
}

impl MemoryRouter {
    #[must_use]
    pub fn at(path: &str) -> Self {
        Self {
            path: path.to_string(),
            ..Self::default()
        }
    }
}

impl Router for MemoryRouter {
    fn current_path(&self) -> String {
        self.path.clone()
    }

    fn current_query(&self) -> String {
        self.query.clone()
    }

    fn current_hash(&self) -> String {
        self.hash.clone()
    }

    fn navigate(&mut self, path: &str, query: &str, hash: &str) -> Result<(), NavigationError> {
        self.navigations.push(compose_href(path, query, hash));
        path.clone_into(&mut self.path);
        query.clone_into(&mut self.query);
        hash.clone_into(&mut self.hash);
        Ok(())
    }

    fn push_state(&mut self, hash: &str) -> Result<(), NavigationError> {
        self.pushes.push(hash.to_string());
        hash.clone_into(&mut self.hash);
        Ok(())
    }
}

/// Records what a page would look like after each render call.
///
/// Notifications carry their remaining lifetime; [`RecordingRenderer::advance`]
/// plays the role of the browser's removal timer.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub language: Option<Language>,
    pub language_renders: usize,
    pub theme: Option<Theme>,
    pub theme_renders: usize,
    pub desktop_active: Option<String>,
    pub mobile_active: Option<String>,
    pub nav_scrolled: bool,
    pub visible_overlays: Vec<OverlayState>,
    pub max_visible_overlays: usize,
    pub scroll_locked: bool,
    pub notifications: Vec<(Notification, u32)>,
    pub submitting: BTreeSet<String>,
    pub flagged: BTreeMap<String, Vec<String>>,
    pub resets: Vec<String>,
    pub scrolled_to: Vec<(String, f64)>,
    pub search_focused: usize,
}

impl RecordingRenderer {
    /// Let `ms` milliseconds pass, dropping expired notifications.
    pub fn advance(&mut self, ms: u32) {
        for (_, remaining) in &mut self.notifications {
            *remaining = remaining.saturating_sub(ms);
        }
        self.notifications.retain(|(_, remaining)| *remaining > 0);
    }
}

impl Renderer for RecordingRenderer {
    fn apply_language(&mut self, strings: &StringTable) {
        self.language = Some(strings.language());
        self.language_renders += 1;
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = Some(theme);
        self.theme_renders += 1;
    }

    fn set_active_nav(&mut self, section_id: &str) {
        self.desktop_active = Some(section_id.to_string());
        self.mobile_active = Some(section_id.to_string());
    }

    fn set_nav_scrolled(&mut self, scrolled: bool) {
        self.nav_scrolled = scrolled;
    }

    fn show_overlay(&mut self, overlay: &OverlayState, _strings: &StringTable) {
        self.visible_overlays.push(overlay.clone());
        self.max_visible_overlays = self.max_visible_overlays.max(self.visible_overlays.len());
        self.scroll_locked = true;
    }

    fn hide_overlay(&mut self) {
        self.visible_overlays.clear();
        self.scroll_locked = false;
    }

    fn show_notification(&mut self, notification: &Notification) {
        self.notifications
            .push((notification.clone(), notification.duration_ms));
    }

    fn set_form_submitting(&mut self, form_id: &str, submitting: bool) {
        if submitting {
            self.submitting.insert(form_id.to_string());
        } else {
            self.submitting.remove(form_id);
        }
    }

    fn reset_form(&mut self, form_id: &str) {
        self.resets.push(form_id.to_string());
        self.flagged.remove(form_id);
    }

    fn flag_invalid_fields(&mut self, form_id: &str, field_names: &[String]) {
        self.flagged
            .insert(form_id.to_string(), field_names.to_vec());
    }

    fn scroll_to_section(&mut self, section_id: &str, offset_px: f64) {
        self.scrolled_to.push((section_id.to_string(), offset_px));
    }

    fn focus_search(&mut self) {
        self.search_focused += 1;
    }
}
