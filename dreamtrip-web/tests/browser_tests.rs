#![cfg(target_arch = "wasm32")]

use dreamtrip_core::{
    BrowserSignals, ControllerConfig, FieldValue, FormInput, FormKind, Language, ModalKind,
    Notification, NotificationLevel, Renderer, StringTable, SubmitStart, Theme,
    ViewStateController,
};
use dreamtrip_web::app::{SharedController, bootstrap, modal_hooks, submission};
use dreamtrip_web::dom;
use dreamtrip_web::render::DomRenderer;
use dreamtrip_web::router::BrowserRouter;
use dreamtrip_web::storage::LocalPreferenceStore;
use dreamtrip_web::submit::{FormSubmitter, SimulatedSubmitter};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn fixture(html: &str) -> web_sys::Element {
    let doc = dom::document().expect("document");
    let root = match doc.get_element_by_id("fixture") {
        Some(root) => root,
        None => {
            let root = doc.create_element("div").expect("create fixture");
            root.set_id("fixture");
            doc.body()
                .expect("document body")
                .append_child(&root)
                .expect("append fixture");
            root
        }
    };
    root.set_inner_html(html);
    root
}

/// A controller over the live document that never navigates or persists.
fn detached_controller() -> SharedController {
    Rc::new(RefCell::new(ViewStateController::new(
        ControllerConfig::default(),
        LocalPreferenceStore::default(),
        BrowserRouter::default(),
        DomRenderer::new(),
        &BrowserSignals::default(),
    )))
}

fn click(selector: &str) {
    dom::document()
        .and_then(|doc| dom::query_one(&doc, selector))
        .and_then(dom::as_html)
        .unwrap_or_else(|| panic!("{selector} not found"))
        .click();
}

#[wasm_bindgen_test]
fn dom_helpers_find_the_browser() {
    assert!(dom::window().is_some());
    assert!(dom::document().is_some());
}

#[wasm_bindgen_test]
fn theme_sets_root_attribute_and_toggle_icon() {
    fixture(r#"<button id="theme-toggle"><i class="fas fa-moon"></i></button>"#);
    let mut renderer = DomRenderer::new();
    renderer.apply_theme(Theme::Dark);
    let doc = dom::document().expect("document");
    let root = doc.document_element().expect("root");
    assert_eq!(root.get_attribute("data-theme").as_deref(), Some("dark"));
    let icon = doc
        .query_selector("#theme-toggle i")
        .expect("query")
        .expect("icon");
    assert_eq!(icon.class_name(), "fas fa-sun");
}

#[wasm_bindgen_test]
fn language_updates_title_and_toggle_label() {
    fixture(r#"<button id="lang-toggle"><i class="fas fa-globe"></i> EN</button>"#);
    let mut renderer = DomRenderer::new();
    renderer.apply_language(&StringTable::for_language(Language::English));
    let doc = dom::document().expect("document");
    assert!(doc.title().starts_with("Dream Trip"));
    let toggle = doc.get_element_by_id("lang-toggle").expect("toggle");
    assert_eq!(toggle.text_content().unwrap_or_default().trim(), "CS");
    assert!(toggle.query_selector("i").expect("query").is_some());
}

#[wasm_bindgen_test]
fn invalid_fields_are_flagged_and_cleared() {
    fixture(
        r#"<form id="contact-form"><input name="name" class="error"><input name="email"></form>"#,
    );
    let mut renderer = DomRenderer::new();
    renderer.flag_invalid_fields("contact-form", &["email".to_string()]);
    let doc = dom::document().expect("document");
    let name = doc.query_selector("[name=name]").expect("query").expect("name");
    let email = doc.query_selector("[name=email]").expect("query").expect("email");
    assert!(!name.class_list().contains("error"));
    assert!(email.class_list().contains("error"));
}

#[wasm_bindgen_test]
fn notifications_are_appended_to_the_body() {
    fixture("");
    let mut renderer = DomRenderer::new();
    renderer.show_notification(&Notification {
        message: "Thank you! We will be in touch soon.".to_string(),
        level: NotificationLevel::Success,
        duration_ms: 3000,
    });
    let doc = dom::document().expect("document");
    let toast = doc
        .query_selector(".notification.success")
        .expect("query")
        .expect("toast");
    assert_eq!(
        toast.text_content().as_deref(),
        Some("Thank you! We will be in touch soon.")
    );
}

#[wasm_bindgen_test]
fn desktop_and_mobile_nav_mark_the_same_section() {
    fixture(
        r##"<nav><ul class="nav-menu">
            <li><a class="nav-link" href="#about">About</a></li>
            <li><a class="nav-link" href="#packages">Packages</a></li>
        </ul></nav>
        <div class="mobile-menu"><ul class="mobile-menu-nav">
            <li><a class="nav-link" href="#about">About</a></li>
            <li><a class="nav-link" href="#packages">Packages</a></li>
        </ul></div>"##,
    );
    let mut renderer = DomRenderer::new();
    renderer.set_active_nav("about");
    renderer.set_active_nav("packages");
    let doc = dom::document().expect("document");
    for list in [".nav-menu", ".mobile-menu-nav"] {
        let active = doc
            .query_selector_all(&format!("{list} .nav-link.active"))
            .expect("query");
        assert_eq!(active.length(), 1, "{list}");
        let link = active
            .get(0)
            .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
            .expect("active link");
        assert_eq!(link.get_attribute("href").as_deref(), Some("#packages"));
    }
}

#[wasm_bindgen_test]
async fn backdrop_click_closes_the_dialog_but_inner_clicks_do_not() {
    fixture("");
    let controller = detached_controller();
    let submitter: Rc<dyn FormSubmitter> = Rc::new(SimulatedSubmitter::new(0));
    let hooks = modal_hooks(&Rc::downgrade(&controller), &submitter);
    controller.borrow_mut().renderer_mut().bind_modal(hooks);
    controller.borrow_mut().open_contact_form();
    dom::sleep_ms(20).await.expect("sleep");

    click(".modal h2");
    dom::sleep_ms(20).await.expect("sleep");
    assert_eq!(
        controller.borrow().overlay().modal_kind(),
        Some(ModalKind::ContactForm)
    );

    click(".modal-overlay");
    dom::sleep_ms(20).await.expect("sleep");
    assert!(controller.borrow().overlay().is_closed());
    let doc = dom::document().expect("document");
    assert!(dom::query_one(&doc, ".modal-overlay").is_none());
}

#[wasm_bindgen_test]
async fn global_scroll_to_section_moves_the_page() {
    fixture(
        r#"<div style="height: 3000px"></div>
        <section id="far-section" style="height: 400px"></section>
        <div style="height: 3000px"></div>"#,
    );
    let win = dom::window().expect("window");
    win.scroll_to_with_x_and_y(0.0, 0.0);
    let controller = detached_controller();
    bootstrap::set_active(&controller);

    bootstrap::scroll_to_section("far-section");
    dom::sleep_ms(1500).await.expect("sleep");
    assert!(win.scroll_y().expect("scroll offset") > 2000.0);
    win.scroll_to_with_x_and_y(0.0, 0.0);
}

#[wasm_bindgen_test]
async fn submission_outcome_waits_for_a_busy_controller() {
    fixture("");
    let controller = detached_controller();
    controller.borrow_mut().open_contact_form();
    let form_id = ModalKind::ContactForm.form_id();
    let started = controller.borrow_mut().begin_submission(FormInput::new(
        form_id,
        FormKind::Contact,
        vec![
            FieldValue::required("name", "Pavel"),
            FieldValue::required("email", "pavel@example.com"),
            FieldValue::required("message", "Hello"),
        ],
    ));
    assert!(matches!(started, SubmitStart::Ready(_)));

    let held = controller.borrow();
    let weak = Rc::downgrade(&controller);
    wasm_bindgen_futures::spawn_local(async move {
        submission::finish(&weak, form_id, Ok(())).await;
    });
    dom::sleep_ms(20).await.expect("sleep");
    assert!(held.is_submitting(form_id));
    drop(held);

    dom::sleep_ms(20).await.expect("sleep");
    assert!(!controller.borrow().is_submitting(form_id));
    assert!(controller.borrow().overlay().is_closed());
}
