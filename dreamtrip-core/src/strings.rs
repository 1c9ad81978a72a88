//! Per-language string tables.
//!
//! Tables are JSON documents embedded at compile time and addressed by dotted
//! keys (`hero.title`). Missing keys fall back to the primary language, then
//! to the key itself.
use crate::language::Language;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::BTreeMap;

const LOCALE_TABLE: &[(Language, &str)] = &[
    (Language::Czech, include_str!("../i18n/cs.json")),
    (Language::English, include_str!("../i18n/en.json")),
];

static PARSED: Lazy<BTreeMap<Language, Value>> = Lazy::new(|| {
    LOCALE_TABLE
        .iter()
        .map(|(lang, data)| {
            let value = serde_json::from_str(data).unwrap_or_else(|err| {
                log::warn!("string table for {lang} is unreadable: {err}");
                Value::Object(serde_json::Map::new())
            });
            (*lang, value)
        })
        .collect()
});

static EMPTY: Lazy<Value> = Lazy::new(|| Value::Object(serde_json::Map::new()));

fn parsed(lang: Language) -> &'static Value {
    PARSED.get(&lang).unwrap_or(&EMPTY)
}

fn get_nested_value<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(obj, |current, k| current.get(k))
}

fn collect_leaf_keys(value: &Value, prefix: &str, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                let next = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                collect_leaf_keys(v, &next, out);
            }
        }
        Value::String(_) => out.push(prefix.to_string()),
        _ => {}
    }
}

/// All user-facing text for one language.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StringTable {
    language: Language,
    translations: &'static Value,
    fallback: &'static Value,
}

impl StringTable {
    #[must_use]
    pub fn for_language(language: Language) -> Self {
        Self {
            language,
            translations: parsed(language),
            fallback: parsed(Language::PRIMARY),
        }
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'static str> {
        get_nested_value(self.translations, key)
            .and_then(Value::as_str)
            .or_else(|| get_nested_value(self.fallback, key).and_then(Value::as_str))
    }

    /// Translate `key`, returning the key itself when no table has it.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.get(key).map_or_else(|| key.to_string(), str::to_string)
    }

    /// Translate with `{name}` / `{{name}}` substitution.
    #[must_use]
    pub fn tr(&self, key: &str, args: &BTreeMap<&str, &str>) -> String {
        let mut text = self.t(key);
        for (k, v) in args {
            text = text.replace(&format!("{{{{{k}}}}}"), v);
            text = text.replace(&format!("{{{k}}}"), v);
        }
        text
    }

    /// Every dotted key that resolves to a string in this language's own table.
    #[must_use]
    pub fn leaf_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_leaf_keys(self.translations, "", &mut keys);
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_have_identical_keys() {
        let cs = StringTable::for_language(Language::Czech).leaf_keys();
        let en = StringTable::for_language(Language::English).leaf_keys();
        assert!(!cs.is_empty());
        assert_eq!(cs, en);
    }

    #[test]
    fn nested_lookup_and_missing_key() {
        let en = StringTable::for_language(Language::English);
        assert_eq!(en.t("nav.packages"), "Packages");
        assert_eq!(en.t("nav.nope"), "nav.nope");
        assert_eq!(en.get("nav"), None);
    }

    #[test]
    fn toggle_label_names_the_other_language() {
        for lang in Language::ALL {
            let table = StringTable::for_language(lang);
            assert_eq!(
                table.t("toggle.language"),
                lang.other().code().to_ascii_uppercase()
            );
        }
    }

    #[test]
    fn interpolation_handles_braced_forms() {
        let cs = StringTable::for_language(Language::Czech);
        let mut args = BTreeMap::new();
        args.insert("package", "Himalaya Trek");
        assert_eq!(
            cs.tr("inquiry.title", &args),
            "Dotaz na balíček: Himalaya Trek"
        );
    }
}
