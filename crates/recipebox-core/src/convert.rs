// ── API-to-domain type conversions ──
//
// Bridges raw `recipebox_api` wire types into canonical domain types.
// Nullable server columns become empty strings. An unreadable `servings`
// value falls back to the draft default so the rest of the record survives.

use recipebox_api::{NewRecipe, RecipeRecord, RecordId};
use tracing::warn;

use crate::model::{DEFAULT_SERVINGS, Recipe, RecipeDraft, RecipeId};

impl From<RecordId> for RecipeId {
    fn from(id: RecordId) -> Self {
        match id {
            RecordId::Int(n) => Self::Numeric(n),
            RecordId::Str(s) => Self::Opaque(s),
        }
    }
}

impl From<&RecipeId> for RecordId {
    fn from(id: &RecipeId) -> Self {
        match id {
            RecipeId::Numeric(n) => Self::Int(*n),
            RecipeId::Opaque(s) => Self::Str(s.clone()),
        }
    }
}

impl From<RecipeRecord> for Recipe {
    fn from(r: RecipeRecord) -> Self {
        let servings = r.servings.unwrap_or_else(|| {
            warn!(id = %r.id, "recipe has unreadable servings, using the default");
            DEFAULT_SERVINGS
        });
        Self {
            id: r.id.into(),
            title: r.title,
            ingredients: r.ingredients,
            instructions: r.instructions,
            servings,
            description: r.description.unwrap_or_default(),
            image_url: r.image_url.unwrap_or_default(),
        }
    }
}

impl From<&RecipeDraft> for NewRecipe {
    fn from(d: &RecipeDraft) -> Self {
        Self {
            title: d.title.clone(),
            ingredients: d.ingredients.clone(),
            instructions: d.instructions.clone(),
            servings: d.servings,
            description: d.description.clone(),
            image_url: d.image_url.clone(),
        }
    }
}

impl From<&Recipe> for NewRecipe {
    fn from(r: &Recipe) -> Self {
        Self::from(&r.to_draft())
    }
}
