pub mod sanitizer;

pub use sanitizer::{sanitize, sanitize_optional};
