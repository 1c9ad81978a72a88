//! Form validation and the submission value object.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormKind {
    Contact,
    PackageInquiry,
}

impl FormKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::PackageInquiry => "package-inquiry",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    pub name: String,
    pub value: String,
    pub required: bool,
}

impl FieldValue {
    #[must_use]
    pub fn required(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            required: true,
        }
    }

    #[must_use]
    pub fn optional(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            required: false,
        }
    }

    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.required && self.value.trim().is_empty()
    }
}

/// A form as read from the page at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub form_id: String,
    pub kind: FormKind,
    pub fields: Vec<FieldValue>,
}

impl FormInput {
    #[must_use]
    pub fn new(form_id: &str, kind: FormKind, fields: Vec<FieldValue>) -> Self {
        Self {
            form_id: form_id.to_string(),
            kind,
            fields,
        }
    }

    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        validate(&self.fields)
    }

    #[must_use]
    pub fn into_submission(self) -> FormSubmission {
        FormSubmission {
            kind: self.kind,
            fields: self
                .fields
                .into_iter()
                .map(|field| (field.name, field.value))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub flagged: Vec<String>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.flagged.is_empty()
    }
}

/// Check every required field in one pass and flag each empty one.
#[must_use]
pub fn validate(fields: &[FieldValue]) -> ValidationReport {
    ValidationReport {
        flagged: fields
            .iter()
            .filter(|field| field.is_missing())
            .map(|field| field.name.clone())
            .collect(),
    }
}

/// What gets handed to the submitter once validation passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSubmission {
    pub kind: FormKind,
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("submission rejected: {0}")]
    Rejected(String),
    #[error("submission transport failed: {0}")]
    Transport(String),
}

/// Result of trying to start a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStart {
    Ready(FormSubmission),
    Invalid(ValidationReport),
    Busy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_every_empty_required_field() {
        let fields = vec![
            FieldValue::required("name", ""),
            FieldValue::required("email", "a@b.cz"),
            FieldValue::required("message", "   "),
            FieldValue::optional("travel_dates", ""),
        ];
        let report = validate(&fields);
        assert!(!report.is_valid());
        assert_eq!(report.flagged, vec!["name".to_string(), "message".to_string()]);
    }

    #[test]
    fn complete_form_is_valid() {
        let input = FormInput::new(
            "contact-form",
            FormKind::Contact,
            vec![FieldValue::required("name", "Lenka")],
        );
        assert!(input.validate().is_valid());
        let submission = input.into_submission();
        assert_eq!(submission.kind, FormKind::Contact);
        assert_eq!(submission.fields.get("name").map(String::as_str), Some("Lenka"));
    }

    #[test]
    fn submission_serializes_kind_as_kebab_case() {
        let submission = FormSubmission {
            kind: FormKind::PackageInquiry,
            fields: BTreeMap::new(),
        };
        let json = serde_json::to_string(&submission).unwrap();
        assert!(json.contains("package-inquiry"));
    }
}
