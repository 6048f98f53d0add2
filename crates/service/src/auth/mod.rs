//! Auth core: password hashing, token issuance, and the register/login
//! orchestrator, each behind its own module.
//!
//! The user store is a collaborator trait (`repository::UserStore`); an
//! in-memory implementation ships for tests and embedders.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

pub use errors::AuthError;
pub use service::AuthService;
pub use token::TokenIssuer;
