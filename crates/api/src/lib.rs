//! NEST agency-site API server library.
//!
//! Exposes the building blocks (config, state, error handling, auth,
//! routes, workflows) so integration tests and the binary entrypoint can
//! both access them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod workflows;
