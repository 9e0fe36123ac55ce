//! Utility functions for code generation and URL processing.
//!
//! - [`code_generator`] - Short code generation
//! - [`url_normalizer`] - URL normalization and sanitization
//! - [`url_validator`] - Shortening policy on top of normalization

pub mod code_generator;
pub mod url_normalizer;
pub mod url_validator;
