//! User role enumeration.
//!
//! Account records themselves are managed outside the bidding engine;
//! only the verified role travels with each connection.

pub mod role;

pub use role::UserRole;
