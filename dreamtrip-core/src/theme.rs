//! Light/dark colour scheme.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Value written to the root `data-theme` attribute and to preferences.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Icon shown on the toggle: the sun offers a way out of dark mode, the moon into it.
    #[must_use]
    pub const fn toggle_icon(self) -> &'static str {
        match self {
            Self::Light => "fa-moon",
            Self::Dark => "fa-sun",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeSignals {
    pub stored_preference: Option<String>,
    pub system_prefers_dark: bool,
}

/// Stored preference first, then the system colour-scheme signal.
#[must_use]
pub fn resolve_initial_theme(signals: &ThemeSignals) -> Theme {
    signals
        .stored_preference
        .as_deref()
        .and_then(Theme::from_code)
        .unwrap_or(if signals.system_prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_preference_wins_over_system() {
        let signals = ThemeSignals {
            stored_preference: Some("light".into()),
            system_prefers_dark: true,
        };
        assert_eq!(resolve_initial_theme(&signals), Theme::Light);
    }

    #[test]
    fn system_signal_used_without_preference() {
        let dark = ThemeSignals {
            stored_preference: None,
            system_prefers_dark: true,
        };
        assert_eq!(resolve_initial_theme(&dark), Theme::Dark);
        assert_eq!(resolve_initial_theme(&ThemeSignals::default()), Theme::Light);
    }

    #[test]
    fn unreadable_preference_is_ignored() {
        let signals = ThemeSignals {
            stored_preference: Some("sepia".into()),
            system_prefers_dark: true,
        };
        assert_eq!(resolve_initial_theme(&signals), Theme::Dark);
    }

    #[test]
    fn toggling_twice_is_identity() {
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggle_icon(), "fa-sun");
    }
}
