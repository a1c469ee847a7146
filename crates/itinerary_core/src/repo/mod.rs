//! Persistence adapters for the durable itinerary slot.
//!
//! # Responsibility
//! - Define the `ItineraryStorage` contract injected into the store.
//! - Isolate SQLite query details from store orchestration.
//!
//! # Invariants
//! - The whole Itinerary is the unit of storage; there are no partial writes.

pub mod slot_repo;
