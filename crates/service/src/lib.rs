//! Authentication core on top of the `models` domain types.
//! - Separates credential/token logic from transport and persistence.
//! - The user store is a trait; callers plug in their own backend.
//! - Provides clear error types and documented interfaces.

pub mod auth;
pub mod logging;
