//! [`Renderer`] over the live document.
//!
//! Every operation quietly skips elements the page does not have, so the
//! same controller drives the full site and stripped-down pages alike.
use crate::components::FormModal;
use crate::components::modal::Props as ModalProps;
use crate::dom;
use dreamtrip_core::{
    FormInput, Notification, OverlayEvent, OverlayState, PACKAGE_TYPE_KEY, Renderer, StringTable,
    Theme,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlFormElement, ScrollBehavior, ScrollToOptions};
use yew::{AppHandle, Callback};

const MODAL_HOST_ID: &str = "modal-root";
const MOBILE_MENU_ID: &str = "mobile-menu";
const LANGUAGE_TOGGLES: &str = "#lang-toggle, #mobile-lang-toggle";
const THEME_TOGGLE_ICONS: &str = "#theme-toggle i, #mobile-theme-toggle i";

/// Plain text nodes keyed by selector.
const TEXT_BINDINGS: [(&str, &str); 6] = [
    (".hero-title .title-text", "hero.title"),
    (".hero-subtitle", "hero.subtitle"),
    ("#about h2", "about.title"),
    ("#about .about-content p", "about.content"),
    ("#cta h2", "cta.title"),
    ("#cta p", "cta.subtitle"),
];

/// Buttons whose leading icon survives relabelling.
const ICON_LABEL_BINDINGS: [(&str, &str); 2] = [
    (".hero-content .cta-button", "hero.cta"),
    ("#cta .cta-button", "cta.button"),
];

const META_BINDINGS: [(&str, &str); 5] = [
    ("meta[name=\"description\"]", "description"),
    ("meta[property=\"og:title\"]", "title"),
    ("meta[property=\"og:description\"]", "description"),
    ("meta[property=\"twitter:title\"]", "title"),
    ("meta[property=\"twitter:description\"]", "description"),
];

const NAV_BINDINGS: [(&str, &str); 5] = [
    ("#about", "nav.about"),
    ("#how-it-works", "nav.howItWorks"),
    ("#showcase", "nav.showcase"),
    ("#packages", "nav.packages"),
    ("#contact", "nav.contact"),
];

/// Callbacks wired into the mounted dialog.
#[derive(Clone)]
pub struct ModalHooks {
    pub on_dismiss: Callback<OverlayEvent>,
    pub on_submit: Callback<FormInput>,
}

impl Default for ModalHooks {
    fn default() -> Self {
        Self {
            on_dismiss: Callback::noop(),
            on_submit: Callback::noop(),
        }
    }
}

#[derive(Default)]
pub struct DomRenderer {
    document: Option<Document>,
    hooks: ModalHooks,
    modal: Option<AppHandle<FormModal>>,
}

impl DomRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            document: dom::document(),
            ..Self::default()
        }
    }

    /// Wire the dialog's dismiss and submit events back to the controller.
    pub fn bind_modal(&mut self, hooks: ModalHooks) {
        self.hooks = hooks;
    }

    fn each(&self, selector: &str, mut apply: impl FnMut(&Element)) {
        if let Some(doc) = &self.document {
            for element in dom::query_all(doc, selector) {
                apply(&element);
            }
        }
    }

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.as_ref()?.get_element_by_id(id)
    }

    fn set_scroll_lock(&self, locked: bool) {
        let Some(body) = self.document.as_ref().and_then(Document::body) else {
            return;
        };
        let style = body.style();
        let _ = if locked {
            style.set_property("overflow", "hidden")
        } else {
            style.remove_property("overflow").map(|_| ())
        };
    }

    fn modal_host(&self) -> Option<Element> {
        let doc = self.document.as_ref()?;
        if let Some(host) = doc.get_element_by_id(MODAL_HOST_ID) {
            return Some(host);
        }
        let host = doc.create_element("div").ok()?;
        host.set_id(MODAL_HOST_ID);
        doc.body()?.append_child(&host).ok()?;
        Some(host)
    }

    fn mount_modal(&mut self, props: ModalProps) {
        let Some(host) = self.modal_host() else {
            log::warn!("no document body to host the dialog");
            return;
        };
        if let Some(previous) = self.modal.take() {
            previous.destroy();
        }
        self.modal = Some(yew::Renderer::<FormModal>::with_root_and_props(host, props).render());
    }
}

fn toggle_class(element: &Element, class: &str, on: bool) {
    let classes = element.class_list();
    let _ = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
}

/// Replace the text of `element` but keep a leading `<i>` icon.
fn set_label_keeping_icon(element: &Element, label: &str) {
    let icon = element.query_selector("i").ok().flatten();
    match icon {
        Some(icon) => {
            element.set_text_content(Some(&format!(" {label}")));
            let _ = element.prepend_with_node_1(&icon);
        }
        None => element.set_text_content(Some(label)),
    }
}

impl Renderer for DomRenderer {
    fn apply_language(&mut self, strings: &StringTable) {
        let Some(doc) = self.document.clone() else {
            return;
        };
        doc.set_title(&strings.t("title"));
        if let Some(root) = doc.document_element() {
            let _ = root.set_attribute("lang", strings.language().code());
        }
        for (selector, key) in META_BINDINGS {
            self.each(selector, |meta| {
                let _ = meta.set_attribute("content", &strings.t(key));
            });
        }
        for (selector, key) in TEXT_BINDINGS {
            self.each(selector, |el| el.set_text_content(Some(&strings.t(key))));
        }
        for (selector, key) in ICON_LABEL_BINDINGS {
            self.each(selector, |el| set_label_keeping_icon(el, &strings.t(key)));
        }
        for (href, key) in NAV_BINDINGS {
            self.each(&format!(".nav-link[href=\"{href}\"]"), |el| {
                el.set_text_content(Some(&strings.t(key)));
            });
        }
        self.each("[data-i18n]", |el| {
            if let Some(text) = el
                .get_attribute("data-i18n")
                .and_then(|key| strings.get(&key))
            {
                el.set_text_content(Some(text));
            }
        });
        self.each(LANGUAGE_TOGGLES, |toggle| {
            set_label_keeping_icon(toggle, &strings.t("toggle.language"));
        });
    }

    fn apply_theme(&mut self, theme: Theme) {
        if let Some(root) = self.document.as_ref().and_then(Document::document_element) {
            let _ = root.set_attribute("data-theme", theme.code());
        }
        let icon_class = format!("fas {}", theme.toggle_icon());
        self.each(THEME_TOGGLE_ICONS, |icon| icon.set_class_name(&icon_class));
    }

    fn set_active_nav(&mut self, section_id: &str) {
        let target = format!("#{section_id}");
        self.each(".nav-link", |link| {
            let active = link.get_attribute("href").is_some_and(|href| href == target);
            toggle_class(link, "active", active);
        });
    }

    fn set_nav_scrolled(&mut self, scrolled: bool) {
        self.each("nav", |nav| toggle_class(nav, "scrolled", scrolled));
    }

    fn show_overlay(&mut self, overlay: &OverlayState, strings: &StringTable) {
        match overlay {
            OverlayState::Closed => return,
            OverlayState::MenuOpen => {
                if let Some(menu) = self.by_id(MOBILE_MENU_ID) {
                    toggle_class(&menu, "active", true);
                }
            }
            OverlayState::ModalOpen { kind, .. } => {
                let props = ModalProps {
                    kind: *kind,
                    strings: *strings,
                    package: overlay
                        .payload_value(PACKAGE_TYPE_KEY)
                        .map(|name| name.to_string().into()),
                    on_dismiss: self.hooks.on_dismiss.clone(),
                    on_submit: self.hooks.on_submit.clone(),
                };
                self.mount_modal(props);
            }
        }
        self.set_scroll_lock(true);
    }

    fn hide_overlay(&mut self) {
        if let Some(menu) = self.by_id(MOBILE_MENU_ID) {
            toggle_class(&menu, "active", false);
        }
        if let Some(modal) = self.modal.take() {
            modal.destroy();
        }
        self.set_scroll_lock(false);
    }

    fn show_notification(&mut self, notification: &Notification) {
        let Some(doc) = &self.document else {
            return;
        };
        let Some(body) = doc.body() else {
            return;
        };
        let Ok(toast) = doc.create_element("div") else {
            return;
        };
        toast.set_class_name(&format!("notification {}", notification.level.class_name()));
        let _ = toast.set_attribute("role", "status");
        toast.set_text_content(Some(&notification.message));
        if body.append_child(&toast).is_err() {
            return;
        }
        if let Err(err) = dom::set_timeout(move || toast.remove(), notification.duration_ms) {
            log::warn!("notification will not expire: {err}");
        }
    }

    fn set_form_submitting(&mut self, form_id: &str, submitting: bool) {
        let Some(form) = self.by_id(form_id) else {
            return;
        };
        toggle_class(&form, "loading", submitting);
        if let Ok(Some(button)) = form.query_selector("[type=\"submit\"]") {
            let _ = if submitting {
                button.set_attribute("disabled", "")
            } else {
                button.remove_attribute("disabled")
            };
        }
    }

    fn reset_form(&mut self, form_id: &str) {
        if let Some(form) = self
            .by_id(form_id)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
        {
            form.reset();
        }
    }

    fn flag_invalid_fields(&mut self, form_id: &str, field_names: &[String]) {
        let Some(form) = self.by_id(form_id) else {
            return;
        };
        let Ok(controls) = form.query_selector_all("[name]") else {
            return;
        };
        for control in (0..controls.length())
            .filter_map(|idx| controls.get(idx))
            .filter_map(|node| node.dyn_into::<Element>().ok())
        {
            let flagged = control
                .get_attribute("name")
                .is_some_and(|name| field_names.contains(&name));
            toggle_class(&control, "error", flagged);
        }
    }

    fn scroll_to_section(&mut self, section_id: &str, offset_px: f64) {
        let Some(section) = self.by_id(section_id).and_then(dom::as_html) else {
            return;
        };
        let Some(win) = dom::window() else {
            return;
        };
        let options = ScrollToOptions::new();
        options.set_top(f64::from(section.offset_top()) - offset_px);
        options.set_behavior(ScrollBehavior::Smooth);
        win.scroll_to_with_scroll_to_options(&options);
    }

    fn focus_search(&mut self) {
        if let Some(input) = self
            .document
            .as_ref()
            .and_then(|doc| dom::query_one(doc, "input[type=\"search\"]"))
            .and_then(dom::as_html)
        {
            let _ = input.focus();
        }
    }
}
