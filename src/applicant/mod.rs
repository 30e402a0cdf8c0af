//! Applicant input handling.
//!
//! - [`record`]: Raw, loosely typed request record
//! - [`encoder`]: Validation and fixed-order feature encoding

pub mod encoder;
pub mod record;

pub use encoder::{encode, Applicant, FeatureVector, InvalidInputError, PropertyArea, FEATURE_COUNT};
pub use record::{ApplicantRecord, FieldValue, FEATURE_NAMES};
