//! User-facing interaction capabilities.
//!
//! # Responsibility
//! - Abstract blocking prompts (`confirm`/`alert`) behind an injected trait.
//! - Model transient, self-clearing notices.

pub mod notice;
pub mod prompter;
