// ── Domain model ──

pub mod recipe;
pub mod recipe_id;

pub use recipe::{DEFAULT_IMAGE_URL, DEFAULT_SERVINGS, Recipe, RecipeDraft, RecipeField};
pub use recipe_id::RecipeId;
