//! Request validation
//!
//! Validators check a single raw JSON field; [`FieldValidator`] runs them over
//! a body and accumulates every violation; [`ValidatedJson`] wires that into
//! axum so handlers only ever see sanitized, validated requests.

pub mod extractors;
pub mod validators;

pub use extractors::{FieldValidator, PathParam, Validatable, ValidatedJson};
