use super::*;
use std::cell::RefCell;

use anyhow::anyhow;

#[derive(Default)]
struct RecordingSink {
    delivered: RefCell<Vec<AssessmentDraft>>,
}

impl SubmissionSink for RecordingSink {
    fn deliver(&self, draft: &AssessmentDraft) -> Result<()> {
        self.delivered.borrow_mut().push(draft.clone());
        Ok(())
    }
}

struct FailingSink;

impl SubmissionSink for FailingSink {
    fn deliver(&self, _draft: &AssessmentDraft) -> Result<()> {
        Err(anyhow!("collaborator offline"))
    }
}

/// A form with every header field set and one fully configured section.
fn filled_form() -> FormState {
    let mut form = FormState::new();
    form.set_title("Quarterly security review");
    form.set_sector(Sector::It);
    form.set_description("Covers networking fundamentals");
    form.add_section();
    form.update_section(0, SectionUpdate::Title("Perimeter".into()))
        .unwrap();
    form.update_section(0, SectionUpdate::Domain(Domain::Networking))
        .unwrap();
    form.update_section(
        0,
        SectionUpdate::SubDomains(vec![SubDomain::Infrastructure, SubDomain::Security]),
    )
    .unwrap();
    form
}

#[test]
fn added_sections_append_with_zeroed_defaults() {
    let mut form = filled_form();
    form.add_section();
    assert_eq!(form.sections().len(), 2);
    assert_eq!(form.sections()[1], Section::new());
}

#[test]
fn sub_domain_updates_recompute_marks_and_questions() {
    let mut form = filled_form();
    let section = &form.sections()[0];
    assert_eq!(section.total_marks, 20);
    assert_eq!(section.total_questions, 10);

    form.update_section(
        0,
        SectionUpdate::SubDomains(vec![SubDomain::Infrastructure]),
    )
    .unwrap();
    let section = &form.sections()[0];
    assert_eq!(section.total_marks, 10);
    assert_eq!(section.total_questions, 5);
}

#[test]
fn domain_writes_clear_sub_domains_and_zero_derived_fields() {
    let mut form = filled_form();
    form.update_section(0, SectionUpdate::TimeEnabled(true))
        .unwrap();
    form.update_section(0, SectionUpdate::Domain(Domain::SoftwareDevelopment))
        .unwrap();

    let section = &form.sections()[0];
    assert_eq!(section.domain, Some(Domain::SoftwareDevelopment));
    assert!(section.sub_domains.is_empty());
    assert_eq!(section.total_marks, 0);
    assert_eq!(section.total_questions, 0);
    assert_eq!(section.time_duration_minutes, 0);
    // The toggle itself keeps its value.
    assert!(section.time_enabled);
}

#[test]
fn rewriting_the_current_domain_still_clears_sub_domains() {
    let mut form = filled_form();
    form.update_section(0, SectionUpdate::Domain(Domain::Networking))
        .unwrap();

    let section = &form.sections()[0];
    assert_eq!(section.domain, Some(Domain::Networking));
    assert!(section.sub_domains.is_empty());
    assert_eq!(section.total_marks, 0);
}

#[test]
fn time_toggle_scales_duration_with_sub_domain_count() {
    let mut form = filled_form();
    form.update_section(0, SectionUpdate::TimeEnabled(true))
        .unwrap();
    assert_eq!(form.sections()[0].time_duration_minutes, 60);

    form.update_section(
        0,
        SectionUpdate::SubDomains(vec![SubDomain::Infrastructure]),
    )
    .unwrap();
    assert_eq!(form.sections()[0].time_duration_minutes, 30);

    form.update_section(0, SectionUpdate::TimeEnabled(false))
        .unwrap();
    assert_eq!(form.sections()[0].time_duration_minutes, 0);
    assert_eq!(form.sections()[0].total_marks, 10);
}

#[test]
fn enabling_time_with_no_sub_domains_keeps_duration_zero() {
    let mut form = FormState::new();
    form.add_section();
    form.update_section(0, SectionUpdate::TimeEnabled(true))
        .unwrap();
    assert!(form.sections()[0].time_enabled);
    assert_eq!(form.sections()[0].time_duration_minutes, 0);
}

#[test]
fn sub_domain_updates_without_a_domain_keep_the_section_empty() {
    let mut form = FormState::new();
    form.add_section();
    form.update_section(0, SectionUpdate::SubDomains(vec![SubDomain::Frontend]))
        .unwrap();
    assert!(form.sections()[0].sub_domains.is_empty());
    assert_eq!(form.sections()[0].total_marks, 0);
}

#[test]
fn sub_domain_picks_foreign_to_the_domain_are_dropped() {
    let mut form = filled_form();
    form.update_section(
        0,
        SectionUpdate::SubDomains(vec![SubDomain::Infrastructure, SubDomain::Stocks]),
    )
    .unwrap();

    let section = &form.sections()[0];
    assert_eq!(section.sub_domains, vec![SubDomain::Infrastructure]);
    assert_eq!(section.total_marks, 10);
    assert_eq!(section.total_questions, 5);
}

#[test]
fn duplicate_sub_domain_picks_keep_the_first_occurrence() {
    let mut form = filled_form();
    form.update_section(
        0,
        SectionUpdate::SubDomains(vec![
            SubDomain::Security,
            SubDomain::Infrastructure,
            SubDomain::Security,
        ]),
    )
    .unwrap();

    let section = &form.sections()[0];
    assert_eq!(
        section.sub_domains,
        vec![SubDomain::Security, SubDomain::Infrastructure]
    );
    assert_eq!(section.total_marks, 20);
}

#[test]
fn title_and_shuffle_edits_leave_derived_fields_alone() {
    let mut form = filled_form();
    form.update_section(0, SectionUpdate::Title("Renamed".into()))
        .unwrap();
    form.update_section(0, SectionUpdate::ShuffleQuestions(true))
        .unwrap();

    let section = &form.sections()[0];
    assert_eq!(section.title, "Renamed");
    assert!(section.shuffle_questions);
    assert_eq!(
        section.sub_domains,
        vec![SubDomain::Infrastructure, SubDomain::Security]
    );
    assert_eq!(section.total_marks, 20);
    assert_eq!(section.total_questions, 10);
}

#[test]
fn removing_a_middle_section_shifts_later_sections_down() {
    let mut form = FormState::new();
    for title in ["First", "Second", "Third"] {
        form.add_section();
        let index = form.sections().len() - 1;
        form.update_section(index, SectionUpdate::Title(title.into()))
            .unwrap();
    }

    form.remove_section(1).expect("remove");
    let titles: Vec<&str> = form.sections().iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Third"]);
}

#[test]
fn removing_an_out_of_range_position_fails_without_changes() {
    let mut form = filled_form();
    let before = form.clone();
    let err = form.remove_section(1).unwrap_err();
    assert_eq!(err, IndexOutOfRange { index: 1, len: 1 });
    assert_eq!(form, before);
}

#[test]
fn updating_an_out_of_range_position_fails_without_changes() {
    let mut form = filled_form();
    let before = form.clone();
    let err = form
        .update_section(3, SectionUpdate::TimeEnabled(true))
        .unwrap_err();
    assert_eq!(err, IndexOutOfRange { index: 3, len: 1 });
    assert_eq!(form, before);
}

#[test]
fn sector_changes_clear_domains_foreign_to_the_new_sector() {
    let mut form = filled_form();
    form.update_section(0, SectionUpdate::TimeEnabled(true))
        .unwrap();
    form.add_section();
    form.update_section(1, SectionUpdate::Domain(Domain::SoftwareDevelopment))
        .unwrap();

    form.set_sector(Sector::Finance);
    assert_eq!(form.sector(), Some(Sector::Finance));
    for section in form.sections() {
        assert_eq!(section.domain, None);
        assert!(section.sub_domains.is_empty());
        assert_eq!(section.total_marks, 0);
        assert_eq!(section.total_questions, 0);
        assert_eq!(section.time_duration_minutes, 0);
    }
    // Settings that do not depend on the domain survive the cascade.
    assert!(form.sections()[0].time_enabled);
    assert_eq!(form.sections()[0].title, "Perimeter");
}

#[test]
fn sector_rewrites_keep_sections_whose_domain_still_fits() {
    let mut form = filled_form();
    form.set_sector(Sector::It);

    let section = &form.sections()[0];
    assert_eq!(section.domain, Some(Domain::Networking));
    assert_eq!(
        section.sub_domains,
        vec![SubDomain::Infrastructure, SubDomain::Security]
    );
    assert_eq!(section.total_marks, 20);
}

#[test]
fn validate_reports_every_blank_field_in_form_order() {
    let errors = FormState::new().validate();
    assert_eq!(
        errors,
        vec![
            FieldError::missing(DraftField::Title),
            FieldError::missing(DraftField::Sector),
            FieldError::missing(DraftField::Description),
        ]
    );
}

#[test]
fn whitespace_only_text_counts_as_missing() {
    let mut form = filled_form();
    form.set_description(" \t\n");
    let errors = form.validate();
    assert_eq!(errors, vec![FieldError::missing(DraftField::Description)]);
}

#[test]
fn submit_blocks_on_missing_fields_and_forwards_nothing() {
    let mut form = filled_form();
    form.set_title("   ");
    let sink = RecordingSink::default();

    let err = form.submit(&sink).unwrap_err();
    match err {
        SubmitError::Invalid { errors } => {
            assert_eq!(errors, vec![FieldError::missing(DraftField::Title)]);
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert!(sink.delivered.borrow().is_empty());
}

#[test]
fn submit_forwards_a_snapshot_and_leaves_the_form_untouched() {
    let form = filled_form();
    let before = form.clone();
    let sink = RecordingSink::default();

    let draft = form.submit(&sink).expect("submit");
    assert_eq!(form, before);
    assert_eq!(draft.title, "Quarterly security review");
    assert_eq!(draft.sector, Sector::It);
    assert_eq!(draft.sections.len(), 1);
    assert_eq!(sink.delivered.borrow().len(), 1);
    assert_eq!(sink.delivered.borrow()[0], draft);

    // Saving again forwards the same draft.
    let again = form.submit(&sink).expect("second submit");
    assert_eq!(again, draft);
    assert_eq!(sink.delivered.borrow().len(), 2);
}

#[test]
fn submit_surfaces_sink_failures() {
    let form = filled_form();
    let err = form.submit(&FailingSink).unwrap_err();
    match err {
        SubmitError::Delivery(source) => {
            assert!(source.to_string().contains("collaborator offline"));
        }
        other => panic!("expected delivery failure, got {other:?}"),
    }
}

#[test]
fn a_draft_with_no_sections_can_still_be_saved() {
    let mut form = FormState::new();
    form.set_title("Header only");
    form.set_sector(Sector::Healthcare);
    form.set_description("No sections yet");

    let sink = RecordingSink::default();
    let draft = form.submit(&sink).expect("submit");
    assert!(draft.sections.is_empty());
}

#[test]
fn logging_sink_accepts_a_complete_draft() {
    let form = filled_form();
    let draft = form.submit(&LoggingSubmissionSink).expect("submit");
    assert_eq!(draft.title, "Quarterly security review");
}

#[test]
fn authoring_flow_from_empty_form_to_saved_draft() {
    let mut form = FormState::new();
    for command in [
        FormCommand::SetTitle("Network readiness".into()),
        FormCommand::SetSector(Sector::It),
        FormCommand::SetDescription("Annual infrastructure assessment".into()),
        FormCommand::AddSection,
        FormCommand::UpdateSection {
            index: 0,
            update: SectionUpdate::Title("Core".into()),
        },
        FormCommand::UpdateSection {
            index: 0,
            update: SectionUpdate::Domain(Domain::Networking),
        },
        FormCommand::UpdateSection {
            index: 0,
            update: SectionUpdate::SubDomains(vec![
                SubDomain::Infrastructure,
                SubDomain::Security,
            ]),
        },
        FormCommand::UpdateSection {
            index: 0,
            update: SectionUpdate::TimeEnabled(true),
        },
        FormCommand::UpdateSection {
            index: 0,
            update: SectionUpdate::ShuffleQuestions(true),
        },
        FormCommand::AddSection,
        FormCommand::RemoveSection { index: 1 },
    ] {
        form.apply(command).expect("apply");
    }

    let sink = RecordingSink::default();
    let draft = form.submit(&sink).expect("submit");
    assert_eq!(draft.sections.len(), 1);
    let section = &draft.sections[0];
    assert_eq!(section.title, "Core");
    assert_eq!(section.total_marks, 20);
    assert_eq!(section.total_questions, 10);
    assert!(section.time_enabled);
    assert_eq!(section.time_duration_minutes, 60);
    assert!(section.shuffle_questions);
    assert_eq!(sink.delivered.borrow().len(), 1);
}
