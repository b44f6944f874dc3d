//! # bidhub-auth
//!
//! Bearer-token verification for the BidHub platform.
//!
//! ## Modules
//!
//! - `claims` — JWT claims payload carried in access tokens
//! - `verifier` — HS256 signature and expiry validation

pub mod claims;
pub mod verifier;

pub use claims::Claims;
pub use verifier::TokenVerifier;
