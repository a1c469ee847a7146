//! Short opaque identifiers for days and activities.
//!
//! Identifiers are drawn from `uuid` v4 randomness and rendered as a
//! 7-character base36 token. Collisions inside one itinerary are practically
//! negligible; no collision handling is performed.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ID_LEN: usize = 7;
const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque identifier for a Day or an Activity.
///
/// Imported documents may carry arbitrary id strings, so the type accepts any
/// string on the way in and only constrains the shape of generated ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Generates a fresh identifier from ambient randomness.
    pub fn generate() -> Self {
        let mut value = Uuid::new_v4().as_u128();
        let mut token = String::with_capacity(ID_LEN);
        for _ in 0..ID_LEN {
            token.push(char::from(BASE36_ALPHABET[(value % 36) as usize]));
            value /= 36;
        }
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Decodes an id, generating a fresh one for an explicit `null`.
pub(crate) fn null_as_fresh_id<'de, D>(deserializer: D) -> Result<ItemId, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<ItemId>::deserialize(deserializer).map(|id| id.unwrap_or_else(ItemId::generate))
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
