use crate::components::focus::{trap_tab, use_dialog_focus};
use dreamtrip_core::{FormInput, ModalKind, OverlayEvent, StringTable};
use std::collections::BTreeMap;
use yew::html::TargetCast;
use yew::prelude::*;

/// Traveler counts offered by the inquiry form.
pub const TRAVELER_OPTIONS: [&str; 5] = ["1", "2", "3", "4", "5+"];

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub kind: ModalKind,
    pub strings: StringTable,
    /// Package named in the inquiry heading.
    #[prop_or_default]
    pub package: Option<AttrValue>,
    /// Receives `CloseButton` or `ScrimClick`.
    pub on_dismiss: Callback<OverlayEvent>,
    pub on_submit: Callback<FormInput>,
}

#[function_component(FormModal)]
pub fn form_modal(props: &Props) -> Html {
    let container_ref = use_node_ref();
    let scrim_ref = use_node_ref();
    use_dialog_focus(container_ref.clone());

    // Yew delegates from the mount root, so `current_target` is never the scrim.
    let on_scrim = {
        let cb = props.on_dismiss.clone();
        let scrim_ref = scrim_ref.clone();
        Callback::from(move |e: MouseEvent| {
            let target = e.target_dyn_into::<web_sys::Node>();
            if target.is_some() && target == scrim_ref.get() {
                cb.emit(OverlayEvent::ScrimClick);
            }
        })
    };
    let on_close = {
        let cb = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| cb.emit(OverlayEvent::CloseButton))
    };
    let on_submit = {
        let cb = props.on_submit.clone();
        let kind = props.kind.form_kind();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Some(form) = e.target_dyn_into::<web_sys::HtmlFormElement>() {
                cb.emit(crate::forms::read_form(&form, kind));
            }
        })
    };

    let strings = &props.strings;
    let (title, fields, submit_label) = match props.kind {
        ModalKind::ContactForm => (
            strings.t("contact.title"),
            contact_fields(strings),
            strings.t("contact.submit"),
        ),
        ModalKind::PackageInquiry => {
            let package = props
                .package
                .as_ref()
                .map_or_else(|| strings.t("inquiry.fallbackPackage"), ToString::to_string);
            let vars = BTreeMap::from([("package", package.as_str())]);
            (
                strings.tr("inquiry.title", &vars),
                inquiry_fields(strings),
                strings.t("inquiry.submit"),
            )
        }
    };

    html! {
        <div class="modal-overlay" role="presentation" onclick={on_scrim} ref={scrim_ref}>
            <div
                class="modal"
                role="dialog"
                aria-modal="true"
                aria-label={title.clone()}
                onkeydown={trap_tab(container_ref.clone())}
                ref={container_ref.clone()}
            >
                <button type="button" class="modal-close" aria-label={strings.t("modal.close")} onclick={on_close}>
                    {"\u{00d7}"}
                </button>
                <h2>{ title }</h2>
                <form id={props.kind.form_id()} onsubmit={on_submit} novalidate=true>
                    { fields }
                    <button type="submit" class="cta-button primary">{ submit_label }</button>
                </form>
            </div>
        </div>
    }
}

fn contact_fields(strings: &StringTable) -> Html {
    html! {
        <>
            <div class="form-group">
                <label for="name">{ strings.t("contact.name") }</label>
                <input type="text" id="name" name="name" required=true />
            </div>
            <div class="form-group">
                <label for="email">{ strings.t("contact.email") }</label>
                <input type="email" id="email" name="email" required=true />
            </div>
            <div class="form-group">
                <label for="message">{ strings.t("contact.message") }</label>
                <textarea id="message" name="message" rows="5" required=true></textarea>
            </div>
        </>
    }
}

fn inquiry_fields(strings: &StringTable) -> Html {
    html! {
        <>
            <div class="form-group">
                <label for="inquiry-name">{ strings.t("inquiry.name") }</label>
                <input type="text" id="inquiry-name" name="name" required=true />
            </div>
            <div class="form-group">
                <label for="inquiry-email">{ strings.t("inquiry.email") }</label>
                <input type="email" id="inquiry-email" name="email" required=true />
            </div>
            <div class="form-group">
                <label for="travel-dates">{ strings.t("inquiry.travelDates") }</label>
                <input type="date" id="travel-dates" name="travel_dates" />
            </div>
            <div class="form-group">
                <label for="travelers">{ strings.t("inquiry.travelers") }</label>
                <select id="travelers" name="travelers">
                    { for TRAVELER_OPTIONS.iter().map(|count| html! {
                        <option value={*count}>{ strings.t(&format!("inquiry.travelerOptions.{count}")) }</option>
                    }) }
                </select>
            </div>
            <div class="form-group">
                <label for="inquiry-message">{ strings.t("inquiry.message") }</label>
                <textarea id="inquiry-message" name="message" rows="4"></textarea>
            </div>
        </>
    }
}
