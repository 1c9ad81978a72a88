//! Site language, startup detection, and localized URL rewriting.
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two languages the site is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "cs")]
    Czech,
    #[serde(rename = "en")]
    English,
}

impl Language {
    pub const PRIMARY: Self = Self::Czech;
    pub const SECONDARY: Self = Self::English;
    pub const ALL: [Self; 2] = [Self::Czech, Self::English];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Czech => "cs",
            Self::English => "en",
        }
    }

    /// Parse an exact language code (`cs`, `en`), ignoring case and surrounding space.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
    }

    /// Match a browser locale such as `en-US` or `cs_CZ` by its language prefix.
    #[must_use]
    pub fn from_locale(locale: &str) -> Option<Self> {
        let prefix = locale
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default();
        Self::from_code(prefix)
    }

    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Czech => Self::English,
            Self::English => Self::Czech,
        }
    }

    #[must_use]
    pub const fn is_secondary(self) -> bool {
        matches!(self, Self::English)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Everything the page knows about the visitor's language at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageSignals {
    pub query_param: Option<String>,
    pub browser_locale: Option<String>,
    pub url_path: Option<String>,
    pub stored_preference: Option<String>,
}

/// Pick the startup language.
///
/// Order: explicit query parameter, browser locale, secondary marker in the
/// path, stored preference, then the primary language.
#[must_use]
pub fn resolve_initial_language(signals: &LanguageSignals, marker: &str) -> Language {
    if let Some(lang) = signals.query_param.as_deref().and_then(Language::from_code) {
        return lang;
    }
    if let Some(lang) = signals
        .browser_locale
        .as_deref()
        .and_then(Language::from_locale)
    {
        return lang;
    }
    if signals
        .url_path
        .as_deref()
        .is_some_and(|path| path_has_marker(path, marker))
    {
        return Language::SECONDARY;
    }
    signals
        .stored_preference
        .as_deref()
        .and_then(Language::from_code)
        .unwrap_or(Language::PRIMARY)
}

/// Read one parameter out of a query string (with or without the leading `?`).
#[must_use]
pub fn query_value(query: &str, name: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// Rewrite `name=` in a query string to `value`, leaving every other pair untouched.
#[must_use]
pub fn rewrite_query_value(query: &str, name: &str, value: &str) -> String {
    query
        .trim_start_matches('?')
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if key == name => format!("{name}={value}"),
            None if pair == name => format!("{name}={value}"),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn strip_base<'a>(path: &'a str, base: &str) -> (&'a str, &'a str) {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return ("", path);
    }
    match path.strip_prefix(base) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => (&path[..base.len()], rest),
        _ => ("", path),
    }
}

fn first_segment(path: &str) -> &str {
    path.trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default()
}

fn is_marker_segment(segment: &str, marker: &str) -> bool {
    !marker.is_empty()
        && (segment == marker || segment.strip_suffix(".html") == Some(marker))
}

/// Whether the first path segment is the secondary-language marker (`/en`, `/en.html`).
#[must_use]
pub fn path_has_marker(path: &str, marker: &str) -> bool {
    is_marker_segment(first_segment(path), marker)
}

/// Set `name=` to `value`, appending the pair when the query lacks it.
#[must_use]
pub fn upsert_query_value(query: &str, name: &str, value: &str) -> String {
    let query = query.trim_start_matches('?');
    if query.is_empty() {
        format!("{name}={value}")
    } else if query_value(query, name).is_some() {
        rewrite_query_value(query, name, value)
    } else {
        format!("{query}&{name}={value}")
    }
}

/// Compute the path that shows `target`, adding or removing the marker segment.
///
/// `base` is the deployment prefix (e.g. `/trip`) and is kept in front.
/// The site root is served by the static page pair `index.html` /
/// `<marker>.html`, so a bare root always lands on one of those documents.
#[must_use]
pub fn localized_path(path: &str, target: Language, marker: &str, base: &str) -> String {
    let (prefix, rest) = strip_base(path, base);
    let has_marker = path_has_marker(rest, marker);
    let rewritten = match (target.is_secondary(), has_marker) {
        (true, true) | (false, false) => rest.to_string(),
        (true, false) => {
            let trimmed = rest.trim_start_matches('/');
            if trimmed.is_empty() || trimmed == "index.html" {
                format!("/{marker}.html")
            } else {
                format!("/{marker}/{trimmed}")
            }
        }
        (false, true) => {
            let segment = first_segment(rest);
            let remainder = rest
                .trim_start_matches('/')
                .strip_prefix(segment)
                .unwrap_or_default();
            if segment.ends_with(".html") || remainder.is_empty() || remainder == "/" {
                "/index.html".to_string()
            } else {
                remainder.to_string()
            }
        }
    };
    if prefix.is_empty() {
        rewritten
    } else if rewritten == "/" {
        format!("{prefix}/")
    } else {
        format!("{prefix}{rewritten}")
    }
}
