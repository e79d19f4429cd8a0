// ── Recipe identity ──
//
// Ids are assigned by the server and never generated client-side.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical identifier for a recipe.
///
/// The reference server hands out integer keys; anything else is kept
/// verbatim. Two recipes with equal ids are the same entity regardless of
/// their other fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeId {
    Numeric(i64),
    Opaque(String),
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Opaque(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for RecipeId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<i64> for RecipeId {
    fn from(n: i64) -> Self {
        Self::Numeric(n)
    }
}

impl From<&str> for RecipeId {
    fn from(s: &str) -> Self {
        s.parse::<i64>()
            .map_or_else(|_| Self::Opaque(s.to_owned()), Self::Numeric)
    }
}

impl From<String> for RecipeId {
    fn from(s: String) -> Self {
        match s.parse::<i64>() {
            Ok(n) => Self::Numeric(n),
            Err(_) => Self::Opaque(s),
        }
    }
}
