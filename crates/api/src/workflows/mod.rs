//! Request-scoped workflows: validation + external calls + compensation.
//!
//! Each workflow runs to completion within one request and holds no state
//! between invocations. Collaborators (data store, object store, mail
//! dispatcher) are passed in as trait objects so tests can substitute
//! fakes.

pub mod contact;
pub mod project;
