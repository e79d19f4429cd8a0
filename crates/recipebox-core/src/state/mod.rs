// ── Recipe state ──
//
// Immutable snapshot of everything the UI renders from. Snapshots are
// shared as `Arc<RecipeState>`; a transition always produces a new one.

mod reducer;

use std::sync::Arc;

use serde::Serialize;
use strum::Display;

use crate::filter::SearchFilter;
use crate::model::{Recipe, RecipeDraft, RecipeId};

pub use reducer::{Effect, Msg, Request, reduce};

/// What the UI is currently doing, derived from the state facets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ViewMode {
    /// No selection, create form hidden.
    Browsing,
    /// Create form visible.
    Creating,
    /// A recipe is selected for in-place editing.
    Editing,
}

#[derive(Debug, Clone, Default)]
pub struct RecipeState {
    pub(crate) recipes: Arc<Vec<Arc<Recipe>>>,
    pub(crate) selection: Option<Recipe>,
    pub(crate) draft: RecipeDraft,
    pub(crate) create_form_visible: bool,
    pub(crate) search_term: String,
    pub(crate) pending: usize,
    pub(crate) loaded: bool,
}

impl RecipeState {
    /// A browsing state holding `recipes`, as if freshly loaded.
    pub fn with_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        Self {
            recipes: Arc::new(recipes.into_iter().map(Arc::new).collect()),
            loaded: true,
            ..Self::default()
        }
    }

    /// The canonical collection, in server order.
    pub fn recipes(&self) -> &Arc<Vec<Arc<Recipe>>> {
        &self.recipes
    }

    /// Detached copy of the selected recipe, if any.
    pub fn selection(&self) -> Option<&Recipe> {
        self.selection.as_ref()
    }

    pub fn draft(&self) -> &RecipeDraft {
        &self.draft
    }

    pub fn is_create_form_visible(&self) -> bool {
        self.create_form_visible
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Number of requests issued but not yet settled.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending > 0
    }

    /// `true` once the initial fetch has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn view_mode(&self) -> ViewMode {
        if self.selection.is_some() {
            ViewMode::Editing
        } else if self.create_form_visible {
            ViewMode::Creating
        } else {
            ViewMode::Browsing
        }
    }

    /// The list to render: the collection filtered by the search term.
    pub fn displayed(&self) -> Vec<Arc<Recipe>> {
        SearchFilter::new(&self.search_term).apply(&self.recipes)
    }

    /// Look a recipe up in the canonical collection.
    pub fn find(&self, id: &RecipeId) -> Option<&Arc<Recipe>> {
        self.recipes.iter().find(|r| &r.id == id)
    }
}
