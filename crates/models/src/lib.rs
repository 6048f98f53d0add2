//! Domain model for the account authentication core.
//! - `account`: the identity record and its lifecycle rules.
//! - `validate`: input checks shared by registration callers.
//! - Clear error types; no persistence concerns (the store is a collaborator).

pub mod account;
pub mod errors;
pub mod validate;

pub use account::{Account, PublicProfile, Role, Status};
