//! Durable slot storage for the whole itinerary.
//!
//! # Responsibility
//! - Persist the full Itinerary as one JSON array under a single slot key.
//! - Keep SQL details inside the storage boundary.
//!
//! # Invariants
//! - `load()` never fails the caller: missing or corrupt slots yield `None`
//!   and a `warn` event.
//! - `save()` replaces the slot value wholesale.

use crate::db::DbError;
use crate::model::itinerary::Itinerary;
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

pub type StorageResult<T> = Result<T, StorageError>;

/// Durable slot write/read failure.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Encode(serde_json::Error),
    /// Slot contents could not be decoded as an itinerary.
    InvalidData(String),
    /// Write refused by the backend (quota, read-only medium, test double).
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode itinerary: {err}"),
            Self::InvalidData(message) => write!(f, "invalid stored itinerary: {message}"),
            Self::Unavailable(message) => write!(f, "slot storage unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::InvalidData(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Persistence adapter injected into the itinerary store.
pub trait ItineraryStorage {
    /// Reads the slot. `None` when absent or undecodable.
    fn load(&self) -> Option<Itinerary>;
    /// Serializes the full itinerary into the slot.
    fn save(&self, itinerary: &Itinerary) -> StorageResult<()>;
}

/// SQLite-backed slot, one row in `slots` keyed by `key`.
pub struct SqliteSlotStorage<'conn> {
    conn: &'conn Connection,
    key: String,
}

impl<'conn> SqliteSlotStorage<'conn> {
    pub fn new(conn: &'conn Connection, key: impl Into<String>) -> Self {
        Self {
            conn,
            key: key.into(),
        }
    }

    /// Returns the raw slot text, if any.
    pub fn read_raw(&self) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE key = ?1;",
                [self.key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Overwrites the raw slot text without decoding it.
    pub fn write_raw(&self, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![self.key.as_str(), value],
        )?;
        Ok(())
    }
}

impl ItineraryStorage for SqliteSlotStorage<'_> {
    fn load(&self) -> Option<Itinerary> {
        let raw = match self.read_raw() {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=slot_load module=storage status=empty key={}", self.key);
                return None;
            }
            Err(err) => {
                warn!(
                    "event=slot_load module=storage status=error key={} error={err}",
                    self.key
                );
                return None;
            }
        };
        decode_slot(&self.key, &raw)
    }

    fn save(&self, itinerary: &Itinerary) -> StorageResult<()> {
        let encoded = serde_json::to_string(itinerary)?;
        self.write_raw(&encoded)
    }
}

/// In-process slot used by tests and ephemeral sessions.
///
/// Clones share the same slot, so a caller can keep a handle for inspection
/// after moving one into a store.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStorage {
    slot: Rc<RefCell<Option<String>>>,
    fail_writes: Rc<RefCell<bool>>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-filled with raw text, decodable or not.
    pub fn with_raw(value: impl Into<String>) -> Self {
        let storage = Self::default();
        *storage.slot.borrow_mut() = Some(value.into());
        storage
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    /// Makes every following `save()` fail, emulating an exhausted quota.
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.borrow_mut() = fail;
    }
}

impl ItineraryStorage for MemorySlotStorage {
    fn load(&self) -> Option<Itinerary> {
        let raw = self.slot.borrow().clone()?;
        decode_slot("memory", &raw)
    }

    fn save(&self, itinerary: &Itinerary) -> StorageResult<()> {
        if *self.fail_writes.borrow() {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        let encoded = serde_json::to_string(itinerary)?;
        *self.slot.borrow_mut() = Some(encoded);
        Ok(())
    }
}

fn decode_slot(key: &str, raw: &str) -> Option<Itinerary> {
    match serde_json::from_str::<Itinerary>(raw) {
        Ok(itinerary) => {
            debug!(
                "event=slot_load module=storage status=ok key={key} days={}",
                itinerary.len()
            );
            Some(itinerary)
        }
        Err(err) => {
            let err = StorageError::InvalidData(err.to_string());
            warn!("event=slot_load module=storage status=error key={key} error={err}");
            None
        }
    }
}
