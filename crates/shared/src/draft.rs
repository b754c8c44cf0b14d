//! Records describing an assessment draft as the author sees it.

use serde::{Deserialize, Serialize};

use crate::taxonomy::{Domain, Sector, SubDomain};

/// One section of an assessment. Marks, question count, and duration are
/// derived from the sub-domain selection and never written directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub title: String,
    pub domain: Option<Domain>,
    pub sub_domains: Vec<SubDomain>,
    pub total_marks: u32,
    pub total_questions: u32,
    pub time_enabled: bool,
    pub time_duration_minutes: u32,
    pub shuffle_questions: bool,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Completed draft as handed to a submission sink. Only produced once the
/// required header fields are present, so `sector` is concrete here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentDraft {
    pub title: String,
    pub sector: Sector,
    pub description: String,
    pub sections: Vec<Section>,
}
