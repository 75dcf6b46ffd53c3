//! Core domain logic for the agency-site backend.
//!
//! Pure code only: the error taxonomy, shared type aliases, field
//! validation, and blob-key derivation. No I/O lives here.

pub mod blob;
pub mod error;
pub mod types;
pub mod validation;
