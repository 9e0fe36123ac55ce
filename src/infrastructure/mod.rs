//! Infrastructure layer.
//!
//! Implements the repository traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`memory`] - In-memory registry and ranking index

pub mod memory;
