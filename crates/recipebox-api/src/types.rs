// Wire types for the `/api/recipes` collection endpoint.
//
// Field names match the server's JSON exactly (snake_case), so no
// renaming is applied.

use std::fmt;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

// ── Identifiers ─────────────────────────────────────────────────────

/// Server-assigned recipe identifier.
///
/// The reference server uses integer primary keys, but the client never
/// interprets the value beyond equality and URL formatting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Str(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

// ── Records ─────────────────────────────────────────────────────────

/// A persisted recipe as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub id: RecordId,
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    /// `None` when the stored value is not a positive whole number. The
    /// server stores whatever it is sent, and one malformed row must not
    /// make the whole collection unreadable.
    #[serde(default, deserialize_with = "de_servings")]
    pub servings: Option<u32>,
    /// Nullable column on the server.
    #[serde(default)]
    pub description: Option<String>,
    /// Nullable column on the server.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Request body for `POST /api/recipes` and `PUT /api/recipes/{id}`.
///
/// The server requires every field to be present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    pub servings: u32,
    pub description: String,
    pub image_url: String,
}

/// `{ "message": "...", "recipe": {...} }` returned by create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeEnvelope {
    pub recipe: RecipeRecord,
    #[serde(default)]
    pub message: Option<String>,
}

/// `{ "error": "..." }` returned alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Accept `servings` as a JSON number or a numeric string.
///
/// Form-backed clients historically sent the raw input text, and the
/// server echoes back whatever it stored. Anything that is not a positive
/// whole number decodes as `None` instead of failing the record.
fn de_servings<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Text(String),
        Other(IgnoredAny),
    }

    let parsed = match Raw::deserialize(deserializer)? {
        Raw::Num(n) => u32::try_from(n).ok(),
        Raw::Text(s) => s.trim().parse().ok(),
        Raw::Other(_) => None,
    };
    Ok(parsed.filter(|n| *n > 0))
}
