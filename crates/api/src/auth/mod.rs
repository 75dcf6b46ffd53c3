//! Verification of access tokens issued by the hosted auth provider.
//!
//! This service never issues or stores credentials; sign-in, sign-up, and
//! password reset all happen at the provider. We only verify the HS256
//! signature of the Bearer token and extract the actor identity.

pub mod extract;
pub mod token;

pub use extract::AuthUser;
pub use token::{validate_token, AuthConfig, Claims};
