//! Common utilities and shared functionality
//!
//! Account types, transaction context and the collaborator traits used across
//! the engine.

pub mod types;
pub mod traits;
