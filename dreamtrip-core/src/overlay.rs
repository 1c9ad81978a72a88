//! Mobile menu and modal dialog state machine.
use crate::forms::FormKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Payload key carrying the package name for inquiry dialogs.
pub const PACKAGE_TYPE_KEY: &str = "packageType";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModalKind {
    ContactForm,
    PackageInquiry,
}

impl ModalKind {
    #[must_use]
    pub const fn form_kind(self) -> FormKind {
        match self {
            Self::ContactForm => FormKind::Contact,
            Self::PackageInquiry => FormKind::PackageInquiry,
        }
    }

    /// DOM id of the form rendered inside the dialog.
    #[must_use]
    pub const fn form_id(self) -> &'static str {
        match self {
            Self::ContactForm => "contact-form-modal",
            Self::PackageInquiry => "package-inquiry-modal",
        }
    }
}

pub type ModalPayload = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Closed,
    MenuOpen,
    ModalOpen {
        kind: ModalKind,
        payload: ModalPayload,
    },
}

impl OverlayState {
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    #[must_use]
    pub const fn is_menu_open(&self) -> bool {
        matches!(self, Self::MenuOpen)
    }

    #[must_use]
    pub const fn modal_kind(&self) -> Option<ModalKind> {
        match self {
            Self::ModalOpen { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    #[must_use]
    pub fn payload_value(&self, key: &str) -> Option<&str> {
        match self {
            Self::ModalOpen { payload, .. } => payload.get(key).map(String::as_str),
            _ => None,
        }
    }
}

/// Everything that can move the overlay machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayEvent {
    OpenMenu,
    OpenModal {
        kind: ModalKind,
        payload: ModalPayload,
    },
    CloseButton,
    ScrimClick,
    MenuLinkClick,
    Escape,
    SubmissionSucceeded,
}

/// Next overlay state for `event`.
///
/// Opening always replaces whatever is open; the caller is responsible for
/// hiding the previous overlay before showing the new one.
#[must_use]
pub fn transition(current: &OverlayState, event: OverlayEvent) -> OverlayState {
    match (current, event) {
        (_, OverlayEvent::OpenMenu) => OverlayState::MenuOpen,
        (_, OverlayEvent::OpenModal { kind, payload }) => OverlayState::ModalOpen { kind, payload },
        (_, OverlayEvent::Escape | OverlayEvent::SubmissionSucceeded) => OverlayState::Closed,
        (
            OverlayState::MenuOpen,
            OverlayEvent::CloseButton | OverlayEvent::ScrimClick | OverlayEvent::MenuLinkClick,
        ) => OverlayState::Closed,
        (
            OverlayState::ModalOpen { .. },
            OverlayEvent::CloseButton | OverlayEvent::ScrimClick,
        ) => OverlayState::Closed,
        (
            state @ OverlayState::ModalOpen { .. },
            OverlayEvent::MenuLinkClick,
        ) => state.clone(),
        (
            OverlayState::Closed,
            OverlayEvent::CloseButton | OverlayEvent::ScrimClick | OverlayEvent::MenuLinkClick,
        ) => OverlayState::Closed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inquiry() -> OverlayEvent {
        let mut payload = ModalPayload::new();
        payload.insert(PACKAGE_TYPE_KEY.into(), "Himalaya Trek".into());
        OverlayEvent::OpenModal {
            kind: ModalKind::PackageInquiry,
            payload,
        }
    }

    #[test]
    fn menu_closes_on_every_dismissal() {
        for event in [
            OverlayEvent::CloseButton,
            OverlayEvent::ScrimClick,
            OverlayEvent::MenuLinkClick,
            OverlayEvent::Escape,
        ] {
            assert!(transition(&OverlayState::MenuOpen, event).is_closed());
        }
    }

    #[test]
    fn modal_ignores_menu_links_but_closes_otherwise() {
        let open = transition(&OverlayState::Closed, inquiry());
        assert_eq!(open.modal_kind(), Some(ModalKind::PackageInquiry));
        assert_eq!(open.payload_value(PACKAGE_TYPE_KEY), Some("Himalaya Trek"));
        assert_eq!(transition(&open, OverlayEvent::MenuLinkClick), open);
        for event in [
            OverlayEvent::CloseButton,
            OverlayEvent::ScrimClick,
            OverlayEvent::Escape,
            OverlayEvent::SubmissionSucceeded,
        ] {
            assert!(transition(&open, event).is_closed());
        }
    }

    #[test]
    fn opening_replaces_the_current_overlay() {
        let modal = transition(&OverlayState::Closed, inquiry());
        assert!(transition(&modal, OverlayEvent::OpenMenu).is_menu_open());
        let from_menu = transition(&OverlayState::MenuOpen, inquiry());
        assert!(from_menu.modal_kind().is_some());
    }

    #[test]
    fn closed_stays_closed() {
        for event in [
            OverlayEvent::CloseButton,
            OverlayEvent::ScrimClick,
            OverlayEvent::MenuLinkClick,
            OverlayEvent::Escape,
            OverlayEvent::SubmissionSucceeded,
        ] {
            assert!(transition(&OverlayState::Closed, event).is_closed());
        }
    }
}
