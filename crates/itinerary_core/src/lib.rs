//! Core domain logic for the trip itinerary editor.
//! This crate is the single source of truth for itinerary invariants.

pub mod config;
pub mod db;
pub mod interaction;
pub mod link;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod suggest;
pub mod transfer;

pub use config::EditorConfig;
pub use interaction::notice::{Notice, NoticeKind};
pub use interaction::prompter::{AutoConfirm, Prompter};
pub use link::video::{is_video_link, to_embed_url};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::activity::{Activity, ActivityPatch, ActivityValidationError};
pub use model::day::{Day, MAX_ACTIVITIES_PER_DAY};
pub use model::id::ItemId;
pub use model::itinerary::Itinerary;
pub use repo::slot_repo::{
    ItineraryStorage, MemorySlotStorage, SqliteSlotStorage, StorageError, StorageResult,
};
pub use service::itinerary_store::{
    ItineraryStore, MutationOutcome, SuggestionOutcome, SuggestionSource, REMOVE_DAY_PROMPT,
};
pub use suggest::{
    HttpSuggestionProvider, SuggestionError, SuggestionProvider, SuggestionRequest,
    SuggestionResult, UnconfiguredProvider,
};
pub use transfer::{TransferError, TransferResult};
