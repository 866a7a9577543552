//! End-to-end review sessions driven by a scripted provider.

use std::sync::Arc;

use recast::{
    Dataset, ExportFormat, Generator, MockProvider, RecastError, ReviewSession, ReviewState, Row,
    export,
};

const GARHWAL: &str = "CORRECTED_QUESTION: Which region...?\nCORRECTED_OPTIONS:\n1. Garhwal\n2. Punjab\n3. Kerala\n4. Assam\nCORRECT_ANSWER: 1\nEXPLANATION: Because X.\nCITATIONS: Wikipedia.";

fn dataset() -> Dataset {
    Dataset::from_rows(vec![
        Row::new(
            "Uttarakhand",
            "History",
            "Which region is this?",
            ["Garhwal", "Punjab", "Kerala", "Assam"],
        ),
        Row::new(
            "Uttarakhand",
            "Dance",
            "Which dance is this?",
            ["Chanchari", "Bhangra", "Garba", "Bihu"],
        ),
    ])
}

fn generator(mock: MockProvider) -> Generator {
    Generator::new(Arc::new(mock))
}

#[test]
fn test_garhwal_use_without_editing() {
    let mut session = ReviewSession::new(dataset()).unwrap();
    let outcome = session
        .generate(&generator(MockProvider::new().with_responses([GARHWAL])))
        .unwrap();

    assert_eq!(outcome.candidates.len(), 3);
    assert_eq!(session.state(), ReviewState::Reviewing);

    session.use_candidate(0).unwrap();

    let row = session.current_row();
    assert_eq!(row.question, "Which region...?");
    assert_eq!(row.options, ["Garhwal", "Punjab", "Kerala", "Assam"].map(String::from));
    assert_eq!(row.answer.as_deref(), Some("Garhwal"));
    assert_eq!(row.full_answer.as_deref(), Some("Because X."));
    assert_eq!(row.answer_source.as_deref(), Some("Wikipedia."));
    assert!(session.is_dirty());
    assert_eq!(session.state(), ReviewState::Browsing);
}

#[test]
fn test_use_equals_edit_then_save() {
    let gen_a = generator(MockProvider::new().with_responses([GARHWAL]));
    let gen_b = generator(MockProvider::new().with_responses([GARHWAL]));

    let mut used = ReviewSession::new(dataset()).unwrap();
    used.generate(&gen_a).unwrap();
    used.use_candidate(1).unwrap();

    let mut edited = ReviewSession::new(dataset()).unwrap();
    edited.generate(&gen_b).unwrap();
    edited.begin_edit(1).unwrap();
    edited.save_edit().unwrap();

    assert_eq!(used.dataset().rows(), edited.dataset().rows());
    assert_eq!(used.state(), edited.state());
}

#[test]
fn test_cancel_keeps_dataset_and_candidates() {
    let mut session = ReviewSession::new(dataset()).unwrap();
    session
        .generate(&generator(MockProvider::new().with_responses([GARHWAL])))
        .unwrap();
    let before_rows = session.dataset().rows().to_vec();
    let before_candidates = session.candidates().cloned();

    session.begin_edit(0).unwrap();
    session.edit_buffer_mut().unwrap().question = "Changed".to_string();
    session.cancel_edit().unwrap();

    assert_eq!(session.dataset().rows(), before_rows.as_slice());
    assert_eq!(session.candidates().cloned(), before_candidates);
    assert_eq!(session.state(), ReviewState::Reviewing);
    assert!(!session.is_dirty());
}

#[test]
fn test_one_failed_call_is_not_fatal() {
    let mut session = ReviewSession::new(dataset()).unwrap();
    let outcome = session
        .generate(&generator(
            MockProvider::new().with_responses([GARHWAL]).failing_on([2]),
        ))
        .unwrap();

    assert_eq!(outcome.candidates.len(), 2);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(session.candidates().map(|c| c.len()), Some(2));
}

#[test]
fn test_exhausted_batch_keeps_previous_candidates() {
    let mut session = ReviewSession::new(dataset()).unwrap();
    session
        .generate(&generator(MockProvider::new().with_responses([GARHWAL])))
        .unwrap();

    let err = session
        .generate(&generator(MockProvider::new().failing_on([1, 2, 3])))
        .unwrap_err();

    assert!(matches!(err, RecastError::BatchExhausted { attempts: 3, .. }));
    assert_eq!(session.state(), ReviewState::Reviewing);
    assert_eq!(session.candidates().map(|c| c.len()), Some(3));
}

#[test]
fn test_navigation_while_editing_discards_buffer() {
    let mut session = ReviewSession::new(dataset()).unwrap();
    session
        .generate(&generator(MockProvider::new().with_responses([GARHWAL])))
        .unwrap();
    session.begin_edit(0).unwrap();
    session.edit_buffer_mut().unwrap().question = "Never saved".to_string();

    session.navigate(1).unwrap();

    assert_eq!(session.state(), ReviewState::Browsing);
    assert!(session.edit_buffer().is_none());
    assert_eq!(session.dataset().rows()[0].question, "Which region is this?");
    assert!(!session.is_dirty());
}

#[test]
fn test_export_after_review() {
    let mut session = ReviewSession::new(dataset()).unwrap();
    assert!(matches!(
        export::to_bytes(session.dataset(), ExportFormat::Csv),
        Err(RecastError::NothingToExport)
    ));

    session.navigate(1).unwrap();
    session.generate(&generator(MockProvider::new())).unwrap();
    session.use_candidate(0).unwrap();

    let text = String::from_utf8(export::to_bytes(session.dataset(), ExportFormat::Csv).unwrap())
        .unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("Uttarakhand,History,Which region is this?"));
    assert!(lines[2].contains("Which dance is this?,Chanchari,Bhangra,Garba,Bihu,Chanchari,"));
}
