//! Reading forms out of the page.
use dreamtrip_core::{FieldValue, FormInput, FormKind};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

const FIELD_QUERY: &str = "input[name], select[name], textarea[name]";

/// Snapshot every named control of `form` for validation.
#[must_use]
pub fn read_form(form: &HtmlFormElement, kind: FormKind) -> FormInput {
    let fields = form
        .query_selector_all(FIELD_QUERY)
        .map(|list| {
            (0..list.length())
                .filter_map(|idx| list.get(idx))
                .filter_map(|node| node.dyn_into::<Element>().ok())
                .filter_map(|element| read_field(&element))
                .collect()
        })
        .unwrap_or_default();
    FormInput::new(&form.id(), kind, fields)
}

fn read_field(element: &Element) -> Option<FieldValue> {
    let name = element.get_attribute("name").filter(|n| !n.is_empty())?;
    let value = if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        if matches!(input.type_().as_str(), "submit" | "button" | "reset") {
            return None;
        }
        input.value()
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        return None;
    };
    Some(if element.has_attribute("required") {
        FieldValue::required(&name, &value)
    } else {
        FieldValue::optional(&name, &value)
    })
}

/// Page forms are contact forms unless marked `.package-inquiry`.
#[must_use]
pub fn page_form_kind(form: &HtmlFormElement) -> FormKind {
    if form.class_list().contains("package-inquiry") {
        FormKind::PackageInquiry
    } else {
        FormKind::Contact
    }
}
