use std::sync::Arc;

use shared::domain::{FieldDefinition, FormSchema, NumericBounds};

use super::*;
use crate::store::FormStateStore;

fn valid_store() -> FormStateStore {
    let mut store = FormStateStore::student_habits();
    for (key, value) in [
        ("age", "20"),
        ("gender", "Female"),
        ("study_hours_per_day", "4"),
        ("social_media_hours", "2.5"),
        ("netflix_hours", "1.2"),
        ("part_time_job", "No"),
        ("attendance_percentage", "85"),
        ("sleep_hours", "7.5"),
        ("diet_quality", "Good"),
        ("exercise_frequency", "3"),
        ("parental_education_level", "Bachelor"),
        ("internet_quality", "Average"),
        ("mental_health_rating", "7"),
        ("extracurricular_participation", "Yes"),
    ] {
        store.set_value(key, value);
    }
    store
}

#[test]
fn accepts_fully_valid_snapshot() {
    assert_eq!(validate(&valid_store().snapshot()), Ok(()));
}

#[test]
fn rejects_unknown_gender_listing_allowed_values() {
    let mut store = valid_store();
    store.set_value("gender", "Alien");
    let err = validate(&store.snapshot()).expect_err("gender must fail");
    assert_eq!(err.key.as_str(), "gender");
    assert_eq!(err.allowed, vec!["Male", "Female", "Other"]);
    assert_eq!(
        err.user_message(),
        "Invalid input for 'gender'. Allowed values: Male, Female, Other"
    );
}

#[test]
fn every_categorical_field_accepts_each_allowed_value_and_rejects_others() {
    let schema = FormSchema::student_habits();
    for field in schema.categorical_fields() {
        let allowed = field.kind.allowed_values().expect("categorical");
        for choice in allowed {
            let mut store = valid_store();
            store.set_value(field.key.as_str(), choice.clone());
            assert_eq!(validate(&store.snapshot()), Ok(()), "{} = {choice}", field.key);
        }

        for bad in ["", "yes", "Unknown", " Male"] {
            if allowed.iter().any(|choice| choice == bad) {
                continue;
            }
            let mut store = valid_store();
            store.set_value(field.key.as_str(), bad);
            let err = validate(&store.snapshot()).expect_err("must reject");
            assert_eq!(err.key, field.key);
        }
    }
}

#[test]
fn reports_only_the_first_violation_in_schema_order() {
    let mut store = valid_store();
    store.set_value("extracurricular_participation", "Maybe");
    store.set_value("diet_quality", "Excellent");
    store.set_value("part_time_job", "Sometimes");
    let err = validate(&store.snapshot()).expect_err("must fail");
    assert_eq!(err.key.as_str(), "part_time_job");
    assert_eq!(
        err.to_string(),
        "Invalid input for 'part time job'. Allowed values: Yes, No"
    );
}

#[test]
fn unselected_categorical_field_is_a_violation() {
    let store = FormStateStore::student_habits();
    let err = validate(&store.snapshot()).expect_err("empty form");
    assert_eq!(err.key.as_str(), "gender");
}

#[test]
fn numeric_fields_are_left_to_the_input_widget() {
    let mut store = valid_store();
    store.set_value("age", "250");
    store.set_value("sleep_hours", "not a number");
    store.set_value("mental_health_rating", "");
    assert_eq!(validate(&store.snapshot()), Ok(()));
}

#[test]
fn validates_custom_schemas() {
    let schema = FormSchema::new(vec![
        FieldDefinition::numeric("weight", NumericBounds::new(0.0, 300.0, 0.5), "kg"),
        FieldDefinition::categorical("colour", &["Red", "Blue"], "Pick one"),
    ])
    .expect("schema");
    let mut store = FormStateStore::new(Arc::new(schema));
    store.set_value("colour", "Green");
    let err = validate(&store.snapshot()).expect_err("colour");
    assert_eq!(err.to_string(), "Invalid input for 'colour'. Allowed values: Red, Blue");

    store.set_value("colour", "Blue");
    assert_eq!(validate(&store.snapshot()), Ok(()));
}
