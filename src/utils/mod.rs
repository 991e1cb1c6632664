//! Shared utility functions.
//!
//! - `dates`: accepted manifest date shapes and PDF date strings
//! - `sanitize`: display escaping and filename cleanup for manifest fields

pub mod dates;
pub mod sanitize;

pub use dates::{is_valid_date, parse_pdf_date};
pub use sanitize::{sanitize_filename, sanitize_text};
