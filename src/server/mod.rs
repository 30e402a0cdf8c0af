//! HTTP server for the prediction API and the bundled front-end.
//!
//! - [`api`]: Route handlers, error responses, router construction

pub mod api;
