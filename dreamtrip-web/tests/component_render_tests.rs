use dreamtrip_core::{Language, ModalKind, StringTable};
use dreamtrip_web::components::FormModal;
use dreamtrip_web::components::modal::Props;
use futures::executor::block_on;
use yew::{AttrValue, Callback, LocalServerRenderer};

fn props(kind: ModalKind, language: Language, package: Option<&str>) -> Props {
    Props {
        kind,
        strings: StringTable::for_language(language),
        package: package.map(|name| AttrValue::from(name.to_string())),
        on_dismiss: Callback::noop(),
        on_submit: Callback::noop(),
    }
}

fn render(props: Props) -> String {
    block_on(LocalServerRenderer::<FormModal>::with_props(props).render())
}

#[test]
fn inquiry_modal_names_the_selected_package() {
    let html = render(props(
        ModalKind::PackageInquiry,
        Language::English,
        Some("Himalaya Trek"),
    ));
    assert!(html.contains("Package inquiry: Himalaya Trek"));
    assert!(html.contains("package-inquiry-modal"));
    assert!(html.contains("travel_dates"));
    assert!(html.contains("5+ people"));
    assert!(html.contains("modal-overlay"));
}

#[test]
fn inquiry_modal_falls_back_to_generic_heading() {
    let html = render(props(ModalKind::PackageInquiry, Language::Czech, None));
    assert!(html.contains("Dotaz na balíček: Vybraný balíček"));
    assert!(html.contains("Odeslat dotaz"));
    assert!(html.contains("Zavřít"));
}

#[test]
fn contact_modal_renders_localized_fields() {
    let html = render(props(ModalKind::ContactForm, Language::English, None));
    assert!(html.contains("contact-form-modal"));
    assert!(html.contains("Contact Us"));
    assert!(html.contains("name=\"message\""));
    assert!(!html.contains("travelers"));
}
