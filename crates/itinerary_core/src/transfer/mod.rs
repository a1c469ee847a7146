//! JSON export/import of whole itineraries.
//!
//! # Responsibility
//! - Render pretty-printed export documents for whole itineraries and single days.
//! - Validate and decode user-supplied import documents.
//!
//! # Invariants
//! - An import document's top level must be a JSON array.
//! - Elements decode leniently: missing fields default, unknown fields are
//!   ignored, wrongly typed fields reject the whole document.
//! - Identifiers present in a document are preserved verbatim.

use crate::model::day::Day;
use crate::model::itinerary::Itinerary;
use log::info;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type TransferResult<T> = Result<T, TransferError>;

/// Export/import failure.
#[derive(Debug)]
pub enum TransferError {
    /// Contents are not JSON, or elements do not decode as days.
    Parse(serde_json::Error),
    /// Top-level value is not an array.
    InvalidFormat,
    Io(std::io::Error),
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::InvalidFormat => write!(f, "Invalid format"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::InvalidFormat => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for TransferError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<std::io::Error> for TransferError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Pretty-printed JSON document of the whole itinerary.
pub fn export_pretty(itinerary: &Itinerary) -> TransferResult<String> {
    Ok(serde_json::to_string_pretty(itinerary)?)
}

/// Pretty-printed JSON of one day, as placed on the clipboard.
pub fn day_pretty(day: &Day) -> TransferResult<String> {
    Ok(serde_json::to_string_pretty(day)?)
}

/// Writes the export document to `dir/file_name`, replacing any previous file.
pub fn write_export_file(
    dir: &Path,
    file_name: &str,
    itinerary: &Itinerary,
) -> TransferResult<PathBuf> {
    let path = dir.join(file_name);
    std::fs::write(&path, export_pretty(itinerary)?)?;
    info!(
        "event=export_file module=transfer status=ok days={} path={}",
        itinerary.len(),
        path.display()
    );
    Ok(path)
}

/// Parses an import document.
///
/// Only the array-ness of the top level is checked before decoding.
pub fn parse_import(contents: &str) -> TransferResult<Itinerary> {
    let value: Value = serde_json::from_str(contents)?;
    if !value.is_array() {
        return Err(TransferError::InvalidFormat);
    }
    Ok(serde_json::from_value(value)?)
}
