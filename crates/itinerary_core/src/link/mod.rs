//! Activity link classification.
//!
//! # Responsibility
//! - Detect links that point at a recognized video host.
//! - Derive embeddable preview URLs from them.
//!
//! # Invariants
//! - Malformed input classifies as "not a video" and never errors.

pub mod video;
