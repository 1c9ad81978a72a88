//! The view-state controller.
//!
//! Owns language, theme, overlay and active-section state and pushes every
//! change through the injected [`Renderer`]. State is always updated before
//! the matching render call.
use crate::collaborators::{
    Notification, NotificationLevel, PreferenceStore, Renderer, Router,
};
use crate::config::ControllerConfig;
use crate::forms::{FormInput, SubmitError, SubmitStart};
use crate::language::{
    Language, LanguageSignals, localized_path, query_value, resolve_initial_language,
    rewrite_query_value, upsert_query_value,
};
use crate::overlay::{ModalKind, ModalPayload, OverlayEvent, OverlayState, PACKAGE_TYPE_KEY, transition};
use crate::sections::{IntersectionSample, SectionBounds, SectionTracker, Viewport};
use crate::strings::StringTable;
use crate::theme::{Theme, ThemeSignals, resolve_initial_theme};
use std::collections::BTreeSet;

/// CTA target used when a button does not name one.
pub const DEFAULT_CTA_TARGET: &str = "packages";
/// CTA target that opens the contact dialog instead of scrolling.
pub const CONTACT_CTA_TARGET: &str = "contact";

/// Browser facts that do not come from the store or the location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserSignals {
    pub browser_locale: Option<String>,
    pub system_prefers_dark: bool,
}

pub struct ViewStateController<S, R, D> {
    config: ControllerConfig,
    store: S,
    router: R,
    renderer: D,
    language: Language,
    strings: StringTable,
    theme: Theme,
    theme_applied: bool,
    overlay: OverlayState,
    sections: SectionTracker,
    nav_scrolled: bool,
    submitting: BTreeSet<String>,
}

impl<S: PreferenceStore, R: Router, D: Renderer> ViewStateController<S, R, D> {
    /// Resolve startup language and theme. Nothing is rendered until [`Self::start`].
    #[must_use]
    pub fn new(
        config: ControllerConfig,
        store: S,
        router: R,
        renderer: D,
        signals: &BrowserSignals,
    ) -> Self {
        let language_signals = LanguageSignals {
            query_param: query_value(&router.current_query(), &config.language_query_param),
            browser_locale: signals.browser_locale.clone(),
            url_path: Some(router.current_path()),
            stored_preference: store.get(&config.language_key),
        };
        let language =
            resolve_initial_language(&language_signals, &config.secondary_path_marker);
        let theme = resolve_initial_theme(&ThemeSignals {
            stored_preference: store.get(&config.theme_key),
            system_prefers_dark: signals.system_prefers_dark,
        });
        log::debug!("resolved startup language {language} and theme {theme}");

        Self {
            config,
            store,
            router,
            renderer,
            language,
            strings: StringTable::for_language(language),
            theme,
            theme_applied: false,
            overlay: OverlayState::Closed,
            sections: SectionTracker::default(),
            nav_scrolled: false,
            submitting: BTreeSet::new(),
        }
    }

    /// First render. Moves to the localized URL when the current one shows the
    /// other language; that hop converges because the path is the only signal
    /// it changes.
    pub fn start(&mut self) {
        self.renderer.apply_theme(self.theme);
        self.theme_applied = true;

        let current = self.router.current_path();
        let destination = self.localized(&current, self.language);
        if destination != current {
            log::info!("redirecting {current} to {destination} for {}", self.language);
            let query = self.startup_query();
            self.navigate_to(&destination, &query);
        }
        self.renderer.apply_language(&self.strings);

        let hash = self.router.current_hash();
        let section = hash.trim_start_matches('#');
        if !section.is_empty() && self.sections.activate(section) {
            self.renderer.set_active_nav(section);
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ControllerConfig {
        &self.config
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub const fn strings(&self) -> &StringTable {
        &self.strings
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub const fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    /// Background scroll is suppressed exactly while an overlay is open.
    #[must_use]
    pub const fn scroll_locked(&self) -> bool {
        !self.overlay.is_closed()
    }

    #[must_use]
    pub fn active_section(&self) -> Option<&str> {
        self.sections.active()
    }

    #[must_use]
    pub const fn nav_scrolled(&self) -> bool {
        self.nav_scrolled
    }

    #[must_use]
    pub fn is_submitting(&self, form_id: &str) -> bool {
        self.submitting.contains(form_id)
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn router(&self) -> &R {
        &self.router
    }

    #[must_use]
    pub const fn renderer(&self) -> &D {
        &self.renderer
    }

    pub const fn renderer_mut(&mut self) -> &mut D {
        &mut self.renderer
    }

    // ----- language -----

    pub fn switch_language(&mut self, target: Language) {
        if target == self.language {
            return;
        }
        self.language = target;
        self.strings = StringTable::for_language(target);
        let key = self.config.language_key.clone();
        self.persist(&key, target.code());
        self.renderer.apply_language(&self.strings);

        // The query parameter outranks the browser locale on the next load,
        // so it carries the choice across the navigation.
        let current = self.router.current_path();
        let destination = self.localized(&current, target);
        let current_query = self.router.current_query();
        let query = upsert_query_value(
            &current_query,
            &self.config.language_query_param,
            target.code(),
        );
        if destination != current || query != current_query.trim_start_matches('?') {
            self.navigate_to(&destination, &query);
        }
    }

    pub fn toggle_language(&mut self) {
        self.switch_language(self.language.other());
    }

    /// Mobile menu toggle: switch, then close the menu.
    pub fn toggle_language_from_menu(&mut self) {
        self.toggle_language();
        self.close_mobile_menu();
    }

    fn localized(&self, path: &str, target: Language) -> String {
        localized_path(
            path,
            target,
            &self.config.secondary_path_marker,
            ControllerConfig::public_base(),
        )
    }

    /// The current query with a stale language parameter corrected.
    fn startup_query(&self) -> String {
        let param = &self.config.language_query_param;
        let query = self.router.current_query();
        if query_value(&query, param).is_some() {
            rewrite_query_value(&query, param, self.language.code())
        } else {
            query
        }
    }

    fn navigate_to(&mut self, path: &str, query: &str) {
        let hash = self.router.current_hash();
        if let Err(err) = self.router.navigate(path, query, &hash) {
            log::warn!("{err}");
        }
    }

    // ----- theme -----

    pub fn toggle_theme(&mut self) {
        self.apply_theme(self.theme.toggled());
    }

    /// Mobile menu toggle: flip the theme, then close the menu.
    pub fn toggle_theme_from_menu(&mut self) {
        self.toggle_theme();
        self.close_mobile_menu();
    }

    /// Apply and persist `theme`. Applying the theme already shown does nothing.
    pub fn apply_theme(&mut self, theme: Theme) {
        if self.theme_applied && theme == self.theme {
            return;
        }
        self.theme = theme;
        self.theme_applied = true;
        self.renderer.apply_theme(theme);
        let key = self.config.theme_key.clone();
        self.persist(&key, theme.code());
    }

    fn persist(&mut self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value) {
            log::warn!("{err}");
        }
    }

    // ----- overlays -----

    pub fn dispatch_overlay(&mut self, event: OverlayEvent) {
        let next = transition(&self.overlay, event);
        self.set_overlay(next);
    }

    fn set_overlay(&mut self, next: OverlayState) {
        if next == self.overlay {
            return;
        }
        if !self.overlay.is_closed() {
            self.overlay = OverlayState::Closed;
            self.renderer.hide_overlay();
        }
        if !next.is_closed() {
            self.overlay = next;
            self.renderer.show_overlay(&self.overlay, &self.strings);
        }
        log::debug!("overlay is now {:?}", self.overlay);
    }

    pub fn open_mobile_menu(&mut self) {
        self.dispatch_overlay(OverlayEvent::OpenMenu);
    }

    /// Close the menu if it is open; a modal is left alone.
    pub fn close_mobile_menu(&mut self) {
        if self.overlay.is_menu_open() {
            self.dispatch_overlay(OverlayEvent::CloseButton);
        }
    }

    pub fn open_modal(&mut self, kind: ModalKind, payload: ModalPayload) {
        self.dispatch_overlay(OverlayEvent::OpenModal { kind, payload });
    }

    pub fn open_contact_form(&mut self) {
        self.open_modal(ModalKind::ContactForm, ModalPayload::new());
    }

    /// A package card was clicked.
    pub fn select_package(&mut self, package_name: &str) {
        let mut payload = ModalPayload::new();
        let name = package_name.trim();
        if !name.is_empty() {
            payload.insert(PACKAGE_TYPE_KEY.to_string(), name.to_string());
        }
        self.open_modal(ModalKind::PackageInquiry, payload);
    }

    // ----- navigation -----

    /// CTA buttons either open the contact dialog or scroll to their target.
    pub fn activate_cta(&mut self, target: Option<&str>) {
        let target = target
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_CTA_TARGET);
        if target == CONTACT_CTA_TARGET {
            self.open_contact_form();
        } else {
            self.scroll_to_section(target);
        }
    }

    pub fn scroll_to_section(&mut self, section_id: &str) {
        self.renderer
            .scroll_to_section(section_id, self.config.nav_offset_px);
    }

    /// Same-page `#id` link: scroll, record the hash, highlight, close the menu.
    pub fn follow_section_link(&mut self, section_id: &str) {
        let section_id = section_id.trim_start_matches('#');
        if section_id.is_empty() {
            return;
        }
        self.scroll_to_section(section_id);
        if let Err(err) = self.router.push_state(section_id) {
            log::warn!("{err}");
        }
        self.mark_active(section_id);
        self.dispatch_overlay(OverlayEvent::MenuLinkClick);
    }

    pub fn on_hash_change(&mut self, hash: &str) {
        let section_id = hash.trim_start_matches('#');
        if !section_id.is_empty() {
            self.mark_active(section_id);
        }
    }

    fn mark_active(&mut self, section_id: &str) {
        if self.sections.activate(section_id) {
            self.renderer.set_active_nav(section_id);
        }
    }

    pub fn observe_sections(&mut self, samples: &[IntersectionSample]) {
        if self.sections.observe(self.config.focal_band(), samples)
            && let Some(active) = self.sections.active().map(str::to_string)
        {
            self.renderer.set_active_nav(&active);
        }
    }

    pub fn recompute_sections(&mut self, sections: &[SectionBounds], viewport: Viewport) {
        if self
            .sections
            .observe_layout(self.config.focal_band(), sections, viewport)
            && let Some(active) = self.sections.active().map(str::to_string)
        {
            self.renderer.set_active_nav(&active);
        }
    }

    /// Styling flag only; never touches the active section.
    pub fn on_scroll(&mut self, offset_y: f64) {
        let scrolled = offset_y > self.config.nav_scrolled_offset_px;
        if scrolled != self.nav_scrolled {
            self.nav_scrolled = scrolled;
            self.renderer.set_nav_scrolled(scrolled);
        }
    }

    /// Global key handling. Returns `true` when the key was consumed.
    pub fn handle_key(&mut self, key: &str, command: bool) -> bool {
        if key == "Escape" {
            let was_open = !self.overlay.is_closed();
            self.dispatch_overlay(OverlayEvent::Escape);
            return was_open;
        }
        if !command {
            return false;
        }
        match key {
            "k" | "K" => {
                self.renderer.focus_search();
                true
            }
            "/" => {
                self.toggle_language();
                true
            }
            _ => false,
        }
    }

    // ----- forms -----

    /// Validate and, if clean, mark the form as submitting.
    pub fn begin_submission(&mut self, input: FormInput) -> SubmitStart {
        if self.submitting.contains(&input.form_id) {
            return SubmitStart::Busy;
        }
        let report = input.validate();
        self.renderer
            .flag_invalid_fields(&input.form_id, &report.flagged);
        if !report.is_valid() {
            log::debug!("{} has empty required fields: {:?}", input.form_id, report.flagged);
            return SubmitStart::Invalid(report);
        }
        self.submitting.insert(input.form_id.clone());
        self.renderer.set_form_submitting(&input.form_id, true);
        log::info!("submitting {} form {}", input.kind, input.form_id);
        SubmitStart::Ready(input.into_submission())
    }

    /// Complete a submission started with [`Self::begin_submission`].
    ///
    /// Success closes any overlay, shows the success toast and clears the form.
    /// Failure re-enables the form and leaves the overlay open.
    pub fn finish_submission(&mut self, form_id: &str, outcome: Result<(), SubmitError>) {
        if !self.submitting.remove(form_id) {
            log::warn!("ignoring completion for {form_id}: not submitting");
            return;
        }
        self.renderer.set_form_submitting(form_id, false);
        match outcome {
            Ok(()) => {
                self.dispatch_overlay(OverlayEvent::SubmissionSucceeded);
                self.notify(NotificationLevel::Success, "notify.success");
                self.renderer.reset_form(form_id);
            }
            Err(err) => {
                log::warn!("{form_id}: {err}");
                self.notify(NotificationLevel::Error, "notify.error");
            }
        }
    }

    fn notify(&mut self, level: NotificationLevel, key: &str) {
        let notification = Notification {
            message: self.strings.t(key),
            level,
            duration_ms: self.config.notification_ms,
        };
        self.renderer.show_notification(&notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{FieldValue, FormKind};
    use crate::testing::{MemoryPreferenceStore, MemoryRouter, RecordingRenderer};

    type TestController =
        ViewStateController<MemoryPreferenceStore, MemoryRouter, RecordingRenderer>;

    fn controller(path: &str, signals: &BrowserSignals) -> TestController {
        let mut c = ViewStateController::new(
            ControllerConfig::default(),
            MemoryPreferenceStore::default(),
            MemoryRouter::at(path),
            RecordingRenderer::default(),
            signals,
        );
        c.start();
        c
    }

    #[test]
    fn start_on_matching_path_does_not_navigate() {
        let c = controller("/", &BrowserSignals::default());
        assert_eq!(c.language(), Language::Czech);
        assert!(c.router().navigations.is_empty());
        assert_eq!(c.renderer().language, Some(Language::Czech));
        assert_eq!(c.renderer().theme, Some(Theme::Light));
        assert!(c.store().writes.is_empty());
    }

    #[test]
    fn switch_language_rewrites_path_and_keeps_hash() {
        let mut c = controller("/", &BrowserSignals::default());
        c.router.hash = "packages".into();
        c.router.query = "utm=mail".into();
        c.switch_language(Language::English);
        assert_eq!(c.router().navigations, vec!["/en.html?utm=mail&lang=en#packages".to_string()]);
        assert_eq!(c.store().get("dreamTripLanguage").as_deref(), Some("en"));
        assert_eq!(c.renderer().language, Some(Language::English));

        c.switch_language(Language::English);
        assert_eq!(c.router().navigations.len(), 1);
    }

    #[test]
    fn switch_language_rewrites_language_query() {
        let mut c = controller("/", &BrowserSignals::default());
        c.router.query = "lang=cs&ref=ig".into();
        c.toggle_language();
        assert_eq!(c.router().navigations, vec!["/en.html?lang=en&ref=ig".to_string()]);
    }

    #[test]
    fn apply_theme_twice_is_idempotent() {
        let mut c = controller("/", &BrowserSignals::default());
        c.apply_theme(Theme::Dark);
        let renders = c.renderer().theme_renders;
        let writes = c.store().writes.len();
        c.apply_theme(Theme::Dark);
        assert_eq!(c.renderer().theme_renders, renders);
        assert_eq!(c.store().writes.len(), writes);
        assert_eq!(c.renderer().theme, Some(Theme::Dark));
    }

    #[test]
    fn mobile_toggles_close_the_menu() {
        let mut c = controller("/", &BrowserSignals::default());
        c.open_mobile_menu();
        c.toggle_theme_from_menu();
        assert!(c.overlay().is_closed());
        assert_eq!(c.theme(), Theme::Dark);

        c.open_mobile_menu();
        c.toggle_language_from_menu();
        assert!(c.overlay().is_closed());
        assert_eq!(c.language(), Language::English);
    }

    #[test]
    fn opening_modal_over_menu_hides_menu_first() {
        let mut c = controller("/", &BrowserSignals::default());
        c.open_mobile_menu();
        c.select_package("Himalaya Trek");
        assert_eq!(c.renderer().visible_overlays.len(), 1);
        assert_eq!(
            c.overlay().payload_value(PACKAGE_TYPE_KEY),
            Some("Himalaya Trek")
        );
        assert!(c.scroll_locked());
        assert!(c.renderer().scroll_locked);
    }

    #[test]
    fn section_link_scrolls_pushes_and_closes_menu() {
        let mut c = controller("/", &BrowserSignals::default());
        c.open_mobile_menu();
        c.follow_section_link("#packages");
        assert_eq!(c.renderer().scrolled_to, vec![("packages".to_string(), 80.0)]);
        assert_eq!(c.router().pushes, vec!["packages".to_string()]);
        assert_eq!(c.active_section(), Some("packages"));
        assert!(c.overlay().is_closed());
    }

    #[test]
    fn cta_routes_contact_to_modal_and_others_to_scroll() {
        let mut c = controller("/", &BrowserSignals::default());
        c.activate_cta(None);
        assert_eq!(c.renderer().scrolled_to[0].0, DEFAULT_CTA_TARGET);
        c.activate_cta(Some("contact"));
        assert_eq!(c.overlay().modal_kind(), Some(ModalKind::ContactForm));
    }

    #[test]
    fn keyboard_shortcuts() {
        let mut c = controller("/", &BrowserSignals::default());
        assert!(!c.handle_key("Escape", false));
        assert!(c.handle_key("k", true));
        assert_eq!(c.renderer().search_focused, 1);
        assert!(!c.handle_key("k", false));
        assert!(c.handle_key("/", true));
        assert_eq!(c.language(), Language::English);
        c.open_contact_form();
        assert!(c.handle_key("Escape", false));
        assert!(!c.scroll_locked());
    }

    #[test]
    fn nav_scrolled_flag_is_independent_of_sections() {
        let mut c = controller("/", &BrowserSignals::default());
        c.on_scroll(50.0);
        assert!(!c.nav_scrolled());
        c.on_scroll(101.0);
        assert!(c.nav_scrolled());
        assert!(c.renderer().nav_scrolled);
        assert_eq!(c.active_section(), None);
        c.on_scroll(100.0);
        assert!(!c.nav_scrolled());
    }

    #[test]
    fn failed_submission_keeps_modal_open() {
        let mut c = controller("/", &BrowserSignals::default());
        c.open_contact_form();
        let input = FormInput::new(
            "contact-form-modal",
            FormKind::Contact,
            vec![FieldValue::required("name", "Pavel")],
        );
        assert!(matches!(c.begin_submission(input.clone()), SubmitStart::Ready(_)));
        assert!(matches!(c.begin_submission(input), SubmitStart::Busy));
        c.finish_submission(
            "contact-form-modal",
            Err(SubmitError::Transport("offline".into())),
        );
        assert!(!c.is_submitting("contact-form-modal"));
        assert!(!c.renderer().submitting.contains("contact-form-modal"));
        assert_eq!(c.overlay().modal_kind(), Some(ModalKind::ContactForm));
        let last = c.renderer().notifications.last().unwrap();
        assert_eq!(last.0.level, NotificationLevel::Error);
        assert!(c.renderer().resets.is_empty());
    }

    #[test]
    fn initial_hash_marks_section_active() {
        let mut router = MemoryRouter::at("/");
        router.hash = "showcase".into();
        let mut c = ViewStateController::new(
            ControllerConfig::default(),
            MemoryPreferenceStore::default(),
            router,
            RecordingRenderer::default(),
            &BrowserSignals::default(),
        );
        c.start();
        assert_eq!(c.active_section(), Some("showcase"));
        assert_eq!(c.renderer().desktop_active.as_deref(), Some("showcase"));
    }
}
