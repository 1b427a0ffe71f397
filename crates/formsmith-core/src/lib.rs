//! formsmith-core — name parsing, assessment scoring and submission processing.
//!
//! This crate defines the form data model, the two pure transformations
//! (full-name parsing and assessment scoring), and the host boundary that
//! applies them to raw submissions and reads stored results back.

pub mod config;
pub mod error;
pub mod html;
pub mod model;
pub mod name;
pub mod results;
pub mod schema;
pub mod scoring;
pub mod store;
pub mod submission;
pub mod traits;

pub use error::LookupError;
pub use name::{parse_name, ParsedName};
pub use scoring::{score_assessment, AssessmentOutcome};
