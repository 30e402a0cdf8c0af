//! loan-approval-server: loan-approval prediction over HTTP.
//!
//! Applicant forms are validated and encoded into a fixed 11-feature vector,
//! scored by a pre-trained logistic regression loaded once at startup, and
//! answered with a 0/1 decision. The same process serves the static
//! front-end.

pub mod applicant;
pub mod config;
pub mod metrics;
pub mod model;
pub mod server;
pub mod service;
