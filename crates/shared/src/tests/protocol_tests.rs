use super::*;

#[test]
fn request_serializes_every_entry_as_string_in_order() {
    let request = PredictionRequest::new(vec![
        (FieldKey::new("age"), "20".to_string()),
        (FieldKey::new("gender"), "Female".to_string()),
        (FieldKey::new("sleep_hours"), String::new()),
    ]);
    let json = serde_json::to_string(&request).expect("serialize");
    assert_eq!(json, r#"{"age":"20","gender":"Female","sleep_hours":""}"#);
    assert_eq!(request.get("gender"), Some("Female"));
    assert_eq!(request.len(), 3);
}

#[test]
fn response_accepts_integer_and_fractional_scores() {
    let response = PredictionResponse::from_slice(br#"{"predicted_exam_score": 78.4}"#)
        .expect("parse");
    assert_eq!(response.predicted_exam_score, 78.4);

    let response =
        PredictionResponse::from_slice(br#"{"predicted_exam_score": 90}"#).expect("parse");
    assert_eq!(response.predicted_exam_score, 90.0);
}

#[test]
fn response_without_numeric_score_is_rejected() {
    assert!(PredictionResponse::from_slice(br#"{"score": 78.4}"#).is_err());
    assert!(PredictionResponse::from_slice(br#"{"predicted_exam_score": null}"#).is_err());
    assert!(PredictionResponse::from_slice(br#"{"predicted_exam_score": "78.4"}"#).is_err());
    assert!(PredictionResponse::from_slice(b"not json").is_err());
}

#[test]
fn service_error_detail_flattens_strings_and_structures() {
    let body = crate::error::ServiceErrorBody::from_slice(
        br#"{"detail": "Invalid value for 'gender'. Allowed: ['Male', 'Female', 'Other']"}"#,
    )
    .expect("parse");
    assert_eq!(
        body.detail_text().as_deref(),
        Some("Invalid value for 'gender'. Allowed: ['Male', 'Female', 'Other']")
    );

    let body = crate::error::ServiceErrorBody::from_slice(
        br#"{"detail": [{"loc": ["body", "age"], "msg": "field required"}]}"#,
    )
    .expect("parse");
    assert!(body.detail_text().expect("detail").contains("field required"));

    let body = crate::error::ServiceErrorBody::from_slice(br#"{}"#).expect("parse");
    assert_eq!(body.detail_text(), None);
}
