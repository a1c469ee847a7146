//! Activity-title suggestions.
//!
//! # Responsibility
//! - Define the request/response contract with an optional remote service.
//! - Provide the fixed local fallback list used whenever that service fails.
//!
//! # Invariants
//! - Any provider failure (transport, status, body shape, absence) is
//!   treated as "service unavailable"; callers never block on it.

pub mod fallback;
pub mod provider;

pub use fallback::{fallback_suggestions, FALLBACK_SUGGESTIONS};
pub use provider::{
    parse_suggestion_body, HttpSuggestionProvider, SuggestionError, SuggestionProvider,
    SuggestionRequest, SuggestionResult, UnconfiguredProvider, DEFAULT_SUGGESTION_TIMEOUT,
};
