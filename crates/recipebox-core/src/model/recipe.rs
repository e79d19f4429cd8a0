// ── Recipe domain types ──

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::recipe_id::RecipeId;

/// Servings for a new draft, and for stored records whose value is unreadable.
pub const DEFAULT_SERVINGS: u32 = 1;

/// Picture used when a recipe has none of its own.
pub const DEFAULT_IMAGE_URL: &str = "https://images.pexels.com/photos/9986228/pexels-photo-9986228.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=1";

/// A persisted recipe. `id` is server-assigned and immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    pub servings: u32,
    pub description: String,
    pub image_url: String,
}

impl Recipe {
    /// Identity comparison: same `id`, other fields ignored.
    pub fn same_entity(&self, other: &Self) -> bool {
        self.id == other.id
    }

    /// The editable fields of this recipe, as a draft.
    pub fn to_draft(&self) -> RecipeDraft {
        RecipeDraft {
            title: self.title.clone(),
            ingredients: self.ingredients.clone(),
            instructions: self.instructions.clone(),
            servings: self.servings,
            description: self.description.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

/// A not-yet-created recipe. Carries no id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    pub servings: u32,
    pub description: String,
    pub image_url: String,
}

impl Default for RecipeDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            ingredients: String::new(),
            instructions: String::new(),
            servings: DEFAULT_SERVINGS,
            description: String::new(),
            image_url: DEFAULT_IMAGE_URL.to_owned(),
        }
    }
}

/// Editable recipe fields. `id` is deliberately absent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum RecipeField {
    Title,
    Ingredients,
    Instructions,
    Servings,
    Description,
    ImageUrl,
}
