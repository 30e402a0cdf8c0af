//! Raw applicant record as submitted by the front-end form.
//!
//! Every key is optional at this layer; presence and type checks happen in
//! [`crate::applicant::encoder`]. Keys keep the dataset's original spelling
//! (`Self_Employed`, `Loan_Amount_Term`, ...) since that is what clients send.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Field names in the order the model was trained with.
pub const FEATURE_NAMES: [&str; 11] = [
    "Gender",
    "Married",
    "Dependents",
    "Education",
    "Self_Employed",
    "ApplicantIncome",
    "CoapplicantIncome",
    "LoanAmount",
    "Loan_Amount_Term",
    "Credit_History",
    "Property_Area",
];

/// A single submitted value. Form posts send strings, scripted clients
/// usually send numbers or booleans; anything else is kept so it can be
/// rejected with a precise message instead of failing body deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Other(serde_json::Value),
}

impl FieldValue {
    /// The value as text, if it was submitted as a string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Other(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

/// One loan applicant, exactly as received. A JSON `null` deserializes to
/// `None` and is treated the same as an absent key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    #[serde(rename = "Gender", default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<FieldValue>,

    #[serde(rename = "Married", default, skip_serializing_if = "Option::is_none")]
    pub married: Option<FieldValue>,

    #[serde(rename = "Dependents", default, skip_serializing_if = "Option::is_none")]
    pub dependents: Option<FieldValue>,

    #[serde(rename = "Education", default, skip_serializing_if = "Option::is_none")]
    pub education: Option<FieldValue>,

    #[serde(rename = "Self_Employed", default, skip_serializing_if = "Option::is_none")]
    pub self_employed: Option<FieldValue>,

    #[serde(rename = "ApplicantIncome", default, skip_serializing_if = "Option::is_none")]
    pub applicant_income: Option<FieldValue>,

    #[serde(rename = "CoapplicantIncome", default, skip_serializing_if = "Option::is_none")]
    pub coapplicant_income: Option<FieldValue>,

    #[serde(rename = "LoanAmount", default, skip_serializing_if = "Option::is_none")]
    pub loan_amount: Option<FieldValue>,

    #[serde(rename = "Loan_Amount_Term", default, skip_serializing_if = "Option::is_none")]
    pub loan_amount_term: Option<FieldValue>,

    #[serde(rename = "Credit_History", default, skip_serializing_if = "Option::is_none")]
    pub credit_history: Option<FieldValue>,

    #[serde(rename = "Property_Area", default, skip_serializing_if = "Option::is_none")]
    pub property_area: Option<FieldValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_mixed_types() {
        let record: ApplicantRecord = serde_json::from_str(
            r#"{"Gender":"Male","ApplicantIncome":5000,"Credit_History":null,"Extra":true}"#,
        )
        .unwrap();

        assert_eq!(record.gender, Some(FieldValue::Text("Male".into())));
        assert_eq!(record.applicant_income, Some(FieldValue::Number(5000.0)));
        assert_eq!(record.credit_history, None);
        assert_eq!(record.married, None);
    }

    #[test]
    fn test_unexpected_types_are_kept() {
        let record: ApplicantRecord =
            serde_json::from_str(r#"{"LoanAmount":[1,2]}"#).unwrap();
        assert!(matches!(record.loan_amount, Some(FieldValue::Other(_))));
    }

    #[test]
    fn test_booleans_deserialize_as_bool() {
        let record: ApplicantRecord =
            serde_json::from_str(r#"{"Credit_History":true}"#).unwrap();
        assert_eq!(record.credit_history, Some(FieldValue::Bool(true)));
    }
}
