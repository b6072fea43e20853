//! `rime_core` — a transitive deep-freeze (hardening) primitive over a
//! V8-inspired JavaScript object model.
//!
//! # Crate layout
//!
//! - [`objects`] — JavaScript value representation and heap object types.
//! - [`freeze`] — the deep-freeze traversal and its freeze registry.
//! - [`error`] — crate-wide error enum and `Result` alias.

/// Crate-wide error enum and `Result` alias.
pub mod error;
/// Deep-freeze traversal and freeze registry.
pub mod freeze;
/// JavaScript value representation and heap object types.
pub mod objects;

pub use freeze::{FreezeRegistry, deep_freeze, deep_freeze_with};
