//! Encoding of JSON applicant payloads as the front-end sends them.

use loan_approval_server::applicant::{encode, ApplicantRecord, InvalidInputError, FEATURE_COUNT};

fn record(json: &str) -> ApplicantRecord {
    serde_json::from_str(json).unwrap()
}

/// The form posts every field as a string.
const FORM_POST: &str = r#"{
    "Gender": "Female",
    "Married": "No",
    "Dependents": "3+",
    "Education": "Not Graduate",
    "Self_Employed": "Yes",
    "ApplicantIncome": "3036",
    "CoapplicantIncome": "2504",
    "LoanAmount": "158",
    "Loan_Amount_Term": "360",
    "Credit_History": "0",
    "Property_Area": "Semiurban"
}"#;

#[test]
fn test_form_post_encoding() {
    let v = encode(&record(FORM_POST)).unwrap();
    assert_eq!(v.len(), FEATURE_COUNT);
    assert_eq!(
        v.as_slice(),
        &[0.0, 0.0, 3.0, 0.0, 1.0, 3036.0, 2504.0, 158.0, 360.0, 0.0, 1.0]
    );
}

#[test]
fn test_null_counts_as_missing() {
    let json = FORM_POST.replace(r#""LoanAmount": "158""#, r#""LoanAmount": null"#);
    assert_eq!(
        encode(&record(&json)).unwrap_err(),
        InvalidInputError::MissingField("LoanAmount")
    );
}

#[test]
fn test_empty_string_is_not_a_number() {
    let json = FORM_POST.replace(r#""ApplicantIncome": "3036""#, r#""ApplicantIncome": """#);
    let err = encode(&record(&json)).unwrap_err();
    assert!(matches!(
        err,
        InvalidInputError::InvalidNumber {
            field: "ApplicantIncome",
            ..
        }
    ));
}

#[test]
fn test_extra_fields_are_ignored() {
    let json = FORM_POST.replacen('{', r#"{"Loan_ID": "LP001002","#, 1);
    assert!(encode(&record(&json)).is_ok());
}

#[test]
fn test_missing_key_message() {
    let err = encode(&record(r#"{"Gender":"Male"}"#)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid input format: missing required field 'Married'"
    );
}
