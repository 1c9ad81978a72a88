//! Dream Trip view-state core
//!
//! Platform-agnostic state for the Dream Trip marketing site: language, theme,
//! overlays, navigation highlighting and form submission. Browser crates plug
//! in through the [`PreferenceStore`], [`Router`] and [`Renderer`] traits.

pub mod collaborators;
pub mod config;
pub mod controller;
pub mod forms;
pub mod language;
pub mod overlay;
pub mod sections;
pub mod strings;
pub mod testing;
pub mod theme;
pub mod timing;

pub use collaborators::{
    NavigationError, Notification, NotificationLevel, PreferenceError, PreferenceStore, Renderer,
    Router, compose_href,
};
pub use config::{ConfigError, ControllerConfig};
pub use controller::{BrowserSignals, ViewStateController};
pub use forms::{
    FieldValue, FormInput, FormKind, FormSubmission, SubmitError, SubmitStart, ValidationReport,
    validate,
};
pub use language::{Language, LanguageSignals, localized_path, resolve_initial_language};
pub use overlay::{ModalKind, ModalPayload, OverlayEvent, OverlayState, PACKAGE_TYPE_KEY};
pub use sections::{FocalBand, IntersectionSample, SectionBounds, SectionTracker, Viewport};
pub use strings::StringTable;
pub use theme::{Theme, ThemeSignals, resolve_initial_theme};
pub use timing::{DebounceTicket, Debouncer, FrameGate};
