use std::sync::Arc;

use super::*;

#[test]
fn starts_empty_with_every_schema_field() {
    let store = FormStateStore::student_habits();
    assert_eq!(store.phase(), SubmissionPhase::Idle);
    assert_eq!(store.error(), None);
    assert_eq!(store.result(), None);
    let snapshot = store.snapshot();
    assert_eq!(snapshot.iter().count(), 14);
    assert!(snapshot.iter().all(|(_, value)| value.is_empty()));
}

#[test]
fn set_value_accepts_invalid_intermediate_input() {
    let mut store = FormStateStore::student_habits();
    assert!(store.set_value("gender", "Alien"));
    assert!(store.set_value("age", "-3"));
    assert_eq!(store.value("gender"), Some("Alien"));
    assert_eq!(store.value("age"), Some("-3"));
    assert_eq!(store.error(), None);
}

#[test]
fn set_value_ignores_unknown_keys() {
    let mut store = FormStateStore::student_habits();
    let before = store.revision();
    assert!(!store.set_value("shoe_size", "42"));
    assert_eq!(store.revision(), before);
    assert_eq!(store.value("shoe_size"), None);
}

#[test]
fn snapshot_is_isolated_from_later_edits() {
    let mut store = FormStateStore::student_habits();
    store.set_value("sleep_hours", "7.5");
    let snapshot = store.snapshot();
    store.set_value("sleep_hours", "3");
    assert_eq!(snapshot.get("sleep_hours"), Some("7.5"));
    assert_eq!(store.value("sleep_hours"), Some("3"));
    assert_eq!(snapshot.to_request().get("sleep_hours"), Some("7.5"));
}

#[test]
fn result_and_error_are_mutually_exclusive() {
    let mut store = FormStateStore::student_habits();
    store.set_error("boom");
    store.set_result(78.4);
    assert_eq!(store.error(), None);
    assert_eq!(store.result(), Some(78.4));

    store.set_error("boom again");
    assert_eq!(store.result(), None);
    assert_eq!(store.error(), Some("boom again"));
}

#[test]
fn clearing_is_idempotent_and_commutative() {
    for error_first in [true, false] {
        let mut store = FormStateStore::student_habits();
        store.set_result(50.0);
        if error_first {
            store.clear_error();
            store.clear_result();
        } else {
            store.clear_result();
            store.clear_error();
        }
        store.clear_error();
        store.clear_result();
        assert_eq!(store.error(), None);
        assert_eq!(store.result(), None);
    }
}

#[test]
fn clearing_an_unset_field_does_not_bump_revision() {
    let mut store = FormStateStore::student_habits();
    let before = store.revision();
    store.clear_error();
    store.clear_result();
    assert_eq!(store.revision(), before);
}

#[test]
fn subscribers_observe_every_transition() {
    let mut store = FormStateStore::student_habits();
    let mut rx = store.subscribe();
    assert!(!rx.has_changed().expect("sender alive"));

    store.set_value("gender", "Female");
    assert!(rx.has_changed().expect("sender alive"));
    let view = rx.borrow_and_update().clone();
    assert_eq!(view.values.get("gender"), Some("Female"));
    assert_eq!(view.revision, store.revision());

    store.set_result(61.25);
    let view = rx.borrow_and_update().clone();
    assert_eq!(view.result, Some(61.25));
    assert_eq!(view.error, None);
}

#[test]
fn numeric_violation_reports_first_unset_field() {
    let mut store = FormStateStore::student_habits();
    store.set_value("gender", "Male");
    let violation = store.snapshot().first_numeric_violation().expect("violation");
    assert_eq!(violation.key().as_str(), "age");
    assert_eq!(violation.to_string(), "Please fill in Age.");
}

#[test]
fn numeric_violation_names_bounds_of_out_of_range_field() {
    let mut store = FormStateStore::student_habits();
    let schema = Arc::clone(store.schema());
    for field in schema.iter().filter(|field| field.kind.bounds().is_some()) {
        store.set_value(field.key.as_str(), "5");
    }
    store.set_value("age", "20");
    store.set_value("sleep_hours", "7.55");
    let violation = store.snapshot().first_numeric_violation().expect("violation");
    assert_eq!(
        violation,
        NumericViolation::OutOfBounds {
            key: shared::domain::FieldKey::new("sleep_hours"),
            label: "Sleep Hours".to_string(),
            min: 0.0,
            max: 24.0,
            step: 0.1,
        }
    );
    assert_eq!(
        violation.to_string(),
        "Sleep Hours must be between 0 and 24 in steps of 0.1."
    );

    store.set_value("sleep_hours", "7.5");
    assert_eq!(store.snapshot().first_numeric_violation(), None);
}
