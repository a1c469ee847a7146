//! Editor configuration.
//!
//! Defaults mirror the durable slot key and export file name that existing
//! itinerary documents were produced with.

pub const DEFAULT_SLOT_KEY: &str = "jp_itinerary_v1";
pub const DEFAULT_EXPORT_FILE_NAME: &str = "japan-itinerary.json";
/// How many entries of the local fallback list are applied.
pub const DEFAULT_FALLBACK_TAKE: usize = 3;

/// Knobs shared by the store and its adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Key of the durable slot row.
    pub slot_key: String,
    /// File name used by `export_to_dir`.
    pub export_file_name: String,
    pub fallback_take: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            slot_key: DEFAULT_SLOT_KEY.to_string(),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            fallback_take: DEFAULT_FALLBACK_TAKE,
        }
    }
}
