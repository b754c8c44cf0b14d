use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Required header fields on the assessment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Title,
    Sector,
    Description,
}

impl DraftField {
    pub fn label(self) -> &'static str {
        match self {
            DraftField::Title => "Assessment Title",
            DraftField::Sector => "Sector",
            DraftField::Description => "Assessment Description",
        }
    }

    pub fn required_message(self) -> &'static str {
        match self {
            DraftField::Title => "Assessment Title is required",
            DraftField::Sector => "Sector is required",
            DraftField::Description => "Description is required",
        }
    }
}

/// A validation failure attached to a specific form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: DraftField,
    pub message: String,
}

impl FieldError {
    pub fn missing(field: DraftField) -> Self {
        Self {
            field,
            message: field.required_message().to_string(),
        }
    }
}

/// A section position that does not name an existing section. Callers are
/// expected to pass positions obtained from the current section list, so
/// hitting this indicates a wiring bug rather than bad user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("section position {index} is out of range ({len} sections)")]
pub struct IndexOutOfRange {
    pub index: usize,
    pub len: usize,
}
