//! Applicant record → feature vector encoding.
//!
//! The encoding table is fixed by the trained model: categorical answers map
//! to small integers, money and term fields are parsed as floats, and the
//! output order follows [`FEATURE_NAMES`]. Any problem aborts the whole
//! encoding; no partially populated vector is ever returned.

use std::ops::Index;

use thiserror::Error;

use crate::applicant::record::{ApplicantRecord, FieldValue, FEATURE_NAMES};

/// Number of model inputs.
pub const FEATURE_COUNT: usize = FEATURE_NAMES.len();

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInputError {
    #[error("Invalid input format: missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Invalid input format: could not convert {field} value '{value}' to float")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Invalid input format: could not convert {field} value '{value}' to integer")]
    InvalidInteger { field: &'static str, value: String },

    #[error("Invalid input format: {field} must be a string or a number, got {value}")]
    UnsupportedType { field: &'static str, value: String },

    #[error(
        "Invalid input format: unknown Property_Area '{0}' (expected Urban, Semiurban or Rural)"
    )]
    UnknownPropertyArea(String),
}

/// Exactly [`FEATURE_COUNT`] model inputs in training order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Pairs each value with its feature name, mostly for logging.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

impl Index<usize> for FeatureVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

/// Residential area of the property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyArea {
    Rural,
    Semiurban,
    Urban,
}

impl PropertyArea {
    pub fn parse(value: &FieldValue) -> Result<Self, InvalidInputError> {
        match value.as_text() {
            Some("Urban") => Ok(PropertyArea::Urban),
            Some("Semiurban") => Ok(PropertyArea::Semiurban),
            Some("Rural") => Ok(PropertyArea::Rural),
            _ => Err(InvalidInputError::UnknownPropertyArea(value.to_string())),
        }
    }

    pub fn code(self) -> f64 {
        match self {
            PropertyArea::Rural => 0.0,
            PropertyArea::Semiurban => 1.0,
            PropertyArea::Urban => 2.0,
        }
    }
}

/// A validated applicant. Constructing one proves every required field was
/// present and well-formed.
#[derive(Debug, Clone, PartialEq)]
pub struct Applicant {
    pub male: bool,
    pub married: bool,
    pub dependents: i64,
    pub graduate: bool,
    pub self_employed: bool,
    pub applicant_income: f64,
    pub coapplicant_income: f64,
    pub loan_amount: f64,
    pub loan_amount_term: f64,
    pub credit_history: f64,
    pub property_area: PropertyArea,
}

impl TryFrom<&ApplicantRecord> for Applicant {
    type Error = InvalidInputError;

    fn try_from(record: &ApplicantRecord) -> Result<Self, Self::Error> {
        // Field order matches FEATURE_NAMES so the first reported error is
        // the earliest offending column.
        Ok(Applicant {
            male: flag(&record.gender, "Gender", "Male")?,
            married: flag(&record.married, "Married", "Yes")?,
            dependents: dependents(&record.dependents)?,
            graduate: flag(&record.education, "Education", "Graduate")?,
            self_employed: flag(&record.self_employed, "Self_Employed", "Yes")?,
            applicant_income: float(&record.applicant_income, "ApplicantIncome")?,
            coapplicant_income: float(&record.coapplicant_income, "CoapplicantIncome")?,
            loan_amount: float(&record.loan_amount, "LoanAmount")?,
            loan_amount_term: float(&record.loan_amount_term, "Loan_Amount_Term")?,
            credit_history: float(&record.credit_history, "Credit_History")?,
            property_area: PropertyArea::parse(required(&record.property_area, "Property_Area")?)?,
        })
    }
}

impl Applicant {
    /// Lay the applicant out in training order.
    pub fn features(&self) -> FeatureVector {
        FeatureVector([
            indicator(self.male),
            indicator(self.married),
            self.dependents as f64,
            indicator(self.graduate),
            indicator(self.self_employed),
            self.applicant_income,
            self.coapplicant_income,
            self.loan_amount,
            self.loan_amount_term,
            self.credit_history,
            self.property_area.code(),
        ])
    }
}

/// Validate and encode a raw record in one step.
pub fn encode(record: &ApplicantRecord) -> Result<FeatureVector, InvalidInputError> {
    Applicant::try_from(record).map(|applicant| applicant.features())
}

fn indicator(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

fn required<'a>(
    value: &'a Option<FieldValue>,
    field: &'static str,
) -> Result<&'a FieldValue, InvalidInputError> {
    value.as_ref().ok_or(InvalidInputError::MissingField(field))
}

/// Exact string match; anything else (other strings, numbers, booleans) is `false`.
fn flag(
    value: &Option<FieldValue>,
    field: &'static str,
    truthy: &str,
) -> Result<bool, InvalidInputError> {
    Ok(required(value, field)?.as_text() == Some(truthy))
}

/// Numbers as-is, numeric strings parsed, booleans as 1/0.
fn float(value: &Option<FieldValue>, field: &'static str) -> Result<f64, InvalidInputError> {
    match required(value, field)? {
        FieldValue::Number(n) => Ok(*n),
        FieldValue::Bool(b) => Ok(indicator(*b)),
        FieldValue::Text(s) => s.trim().parse::<f64>().map_err(|_| InvalidInputError::InvalidNumber {
            field,
            value: s.clone(),
        }),
        other => Err(InvalidInputError::UnsupportedType {
            field,
            value: other.to_string(),
        }),
    }
}

fn dependents(value: &Option<FieldValue>) -> Result<i64, InvalidInputError> {
    const FIELD: &str = "Dependents";

    match required(value, FIELD)? {
        FieldValue::Text(s) if s.trim() == "3+" => Ok(3),
        FieldValue::Text(s) => s.trim().parse::<i64>().map_err(|_| InvalidInputError::InvalidInteger {
            field: FIELD,
            value: s.clone(),
        }),
        // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
        FieldValue::Number(n)
            if n.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(n) =>
        {
            Ok(*n as i64)
        }
        FieldValue::Number(n) => Err(InvalidInputError::InvalidInteger {
            field: FIELD,
            value: n.to_string(),
        }),
        other => Err(InvalidInputError::UnsupportedType {
            field: FIELD,
            value: other.to_string(),
        }),
    }
}
