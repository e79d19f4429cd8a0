// ── Search filter ──
//
// Derives the displayed list from the canonical collection. Holds no
// state and never mutates its input.

use std::sync::Arc;

use crate::model::Recipe;

/// Free-text filter over title, ingredients, and description.
///
/// An empty term means "no filter"; every other term is matched as a
/// case-insensitive substring against each of the three fields (logical OR).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    needle: Option<String>,
}

impl SearchFilter {
    pub fn new(term: &str) -> Self {
        Self {
            needle: (!term.is_empty()).then(|| term.to_lowercase()),
        }
    }

    /// `true` when the term is empty and every recipe passes.
    pub fn is_identity(&self) -> bool {
        self.needle.is_none()
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        let Some(needle) = self.needle.as_deref() else {
            return true;
        };
        [&recipe.title, &recipe.ingredients, &recipe.description]
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle))
    }

    /// The ordered subsequence of `recipes` that matches.
    pub fn apply(&self, recipes: &[Arc<Recipe>]) -> Vec<Arc<Recipe>> {
        recipes
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }
}

/// `filter(collection, term)`: shorthand for `SearchFilter::new(term).apply(..)`.
pub fn filter_recipes(recipes: &[Arc<Recipe>], term: &str) -> Vec<Arc<Recipe>> {
    SearchFilter::new(term).apply(recipes)
}
