//! HTTP handlers, one module per resource.

pub mod contact;
pub mod email;
pub mod project;
