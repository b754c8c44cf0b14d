//! State engine for the assessment authoring form.

use anyhow::Result;
use shared::{
    draft::{AssessmentDraft, Section},
    error::{DraftField, FieldError, IndexOutOfRange},
    taxonomy::{Domain, Sector, SubDomain},
};
use thiserror::Error;
use tracing::info;

/// Marks contributed by each selected sub-domain.
pub const MARKS_PER_SUB_DOMAIN: u32 = 10;
/// Questions contributed by each selected sub-domain.
pub const QUESTIONS_PER_SUB_DOMAIN: u32 = 5;
/// Minutes contributed by each selected sub-domain while timing is enabled.
pub const MINUTES_PER_SUB_DOMAIN: u32 = 30;

/// Receives the completed draft when the author saves the form.
pub trait SubmissionSink {
    fn deliver(&self, draft: &AssessmentDraft) -> Result<()>;
}

/// Sink that pretty-prints the submitted draft to the log.
#[derive(Debug, Default)]
pub struct LoggingSubmissionSink;

impl SubmissionSink for LoggingSubmissionSink {
    fn deliver(&self, draft: &AssessmentDraft) -> Result<()> {
        let payload = serde_json::to_string_pretty(draft)?;
        info!(
            sections = draft.sections.len(),
            "Assessment Submitted: {payload}"
        );
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("assessment draft failed validation")]
    Invalid { errors: Vec<FieldError> },
    #[error("submission sink rejected the draft: {0}")]
    Delivery(anyhow::Error),
}

/// Edit to one field of a single section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionUpdate {
    Title(String),
    Domain(Domain),
    SubDomains(Vec<SubDomain>),
    TimeEnabled(bool),
    ShuffleQuestions(bool),
}

/// One author edit. The GUI queues these during a frame and applies them
/// afterwards so widget code never observes a half-applied change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    SetTitle(String),
    SetSector(Sector),
    SetDescription(String),
    AddSection,
    RemoveSection { index: usize },
    UpdateSection { index: usize, update: SectionUpdate },
}

/// Authoritative form state. All mutation goes through [`FormState::apply`]
/// or the named setters, which keep the derived section fields consistent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    title: String,
    sector: Option<Sector>,
    description: String,
    sections: Vec<Section>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sector(&self) -> Option<Sector> {
        self.sector
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn apply(&mut self, command: FormCommand) -> Result<(), IndexOutOfRange> {
        match command {
            FormCommand::SetTitle(title) => self.set_title(title),
            FormCommand::SetSector(sector) => self.set_sector(sector),
            FormCommand::SetDescription(description) => self.set_description(description),
            FormCommand::AddSection => self.add_section(),
            FormCommand::RemoveSection { index } => return self.remove_section(index),
            FormCommand::UpdateSection { index, update } => {
                return self.update_section(index, update);
            }
        }
        Ok(())
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Selecting a sector also clears any section domain that belongs to a
    /// different sector, together with that section's sub-domain picks and
    /// derived fields.
    pub fn set_sector(&mut self, sector: Sector) {
        self.sector = Some(sector);
        for section in &mut self.sections {
            if section
                .domain
                .is_some_and(|domain| domain.sector() != sector)
            {
                clear_domain_selection(section);
            }
        }
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn add_section(&mut self) {
        self.sections.push(Section::new());
    }

    /// Removes the section at `index`; later sections shift down one slot.
    pub fn remove_section(&mut self, index: usize) -> Result<(), IndexOutOfRange> {
        self.check_index(index)?;
        self.sections.remove(index);
        Ok(())
    }

    pub fn update_section(
        &mut self,
        index: usize,
        update: SectionUpdate,
    ) -> Result<(), IndexOutOfRange> {
        self.check_index(index)?;
        apply_section_update(&mut self.sections[index], update);
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), IndexOutOfRange> {
        if index < self.sections.len() {
            Ok(())
        } else {
            Err(IndexOutOfRange {
                index,
                len: self.sections.len(),
            })
        }
    }

    /// Reports every required header field that is blank, in form order.
    /// Whitespace-only text counts as blank.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push(FieldError::missing(DraftField::Title));
        }
        if self.sector.is_none() {
            errors.push(FieldError::missing(DraftField::Sector));
        }
        if self.description.trim().is_empty() {
            errors.push(FieldError::missing(DraftField::Description));
        }
        errors
    }

    /// Validates the draft and, if complete, hands a snapshot to the sink.
    /// The form keeps its contents either way so the author can continue
    /// editing.
    pub fn submit(&self, sink: &dyn SubmissionSink) -> Result<AssessmentDraft, SubmitError> {
        let errors = self.validate();
        let sector = match self.sector {
            Some(sector) if errors.is_empty() => sector,
            _ => return Err(SubmitError::Invalid { errors }),
        };
        let draft = AssessmentDraft {
            title: self.title.clone(),
            sector,
            description: self.description.clone(),
            sections: self.sections.clone(),
        };
        sink.deliver(&draft).map_err(SubmitError::Delivery)?;
        Ok(draft)
    }
}

fn apply_section_update(section: &mut Section, update: SectionUpdate) {
    match update {
        SectionUpdate::Title(title) => section.title = title,
        SectionUpdate::Domain(domain) => {
            // Any domain write resets the picks, even a rewrite of the
            // current value.
            section.domain = Some(domain);
            section.sub_domains.clear();
            recompute_derived(section);
        }
        SectionUpdate::SubDomains(picks) => {
            section.sub_domains = sanitize_sub_domains(section.domain, picks);
            recompute_derived(section);
        }
        SectionUpdate::TimeEnabled(enabled) => {
            section.time_enabled = enabled;
            recompute_derived(section);
        }
        SectionUpdate::ShuffleQuestions(shuffle) => section.shuffle_questions = shuffle,
    }
}

/// Recomputes marks, question count, and duration from the sub-domain count.
fn recompute_derived(section: &mut Section) {
    let picks = section.sub_domains.len() as u32;
    section.total_marks = picks * MARKS_PER_SUB_DOMAIN;
    section.total_questions = picks * QUESTIONS_PER_SUB_DOMAIN;
    section.time_duration_minutes = if section.time_enabled {
        picks * MINUTES_PER_SUB_DOMAIN
    } else {
        0
    };
}

/// Drops picks that do not belong to the section's current domain and
/// collapses duplicates, keeping the first occurrence of each.
fn sanitize_sub_domains(domain: Option<Domain>, picks: Vec<SubDomain>) -> Vec<SubDomain> {
    let valid = domain.map(Domain::sub_domains).unwrap_or(&[]);
    let mut kept = Vec::with_capacity(picks.len().min(valid.len()));
    for pick in picks {
        if valid.contains(&pick) && !kept.contains(&pick) {
            kept.push(pick);
        }
    }
    kept
}

fn clear_domain_selection(section: &mut Section) {
    section.domain = None;
    section.sub_domains.clear();
    recompute_derived(section);
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
