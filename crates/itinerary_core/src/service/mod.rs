//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model mutations, persistence and user notices.
//! - Keep host surfaces (CLI, future UI bindings) decoupled from storage details.

pub mod itinerary_store;
