// ── Form state ──
//
// Field-level patches for the two editable records: the new-recipe draft
// and the in-place edit of the selected recipe. A patch always yields a
// new record; the previous one is left untouched for whoever still holds it.

use strum::{Display, EnumString};

use crate::error::CoreError;
use crate::model::{Recipe, RecipeDraft, RecipeField};

/// Which record a field patch applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum FormTarget {
    Draft,
    Selection,
}

enum Slot<'a> {
    Text(&'a mut String),
    Servings(&'a mut u32),
}

fn assign(slot: Slot<'_>, value: String) -> Result<(), CoreError> {
    match slot {
        Slot::Text(target) => *target = value,
        Slot::Servings(target) => *target = parse_servings(&value)?,
    }
    Ok(())
}

/// Servings must be a positive whole number.
pub fn parse_servings(raw: &str) -> Result<u32, CoreError> {
    let invalid = |reason: &str| CoreError::Validation {
        field: RecipeField::Servings.to_string(),
        reason: format!("{reason}, got {raw:?}"),
    };
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(invalid("must be at least 1")),
        Ok(n) => Ok(n),
        Err(_) => Err(invalid("expected a whole number")),
    }
}

impl RecipeDraft {
    fn slot(&mut self, field: RecipeField) -> Slot<'_> {
        match field {
            RecipeField::Title => Slot::Text(&mut self.title),
            RecipeField::Ingredients => Slot::Text(&mut self.ingredients),
            RecipeField::Instructions => Slot::Text(&mut self.instructions),
            RecipeField::Servings => Slot::Servings(&mut self.servings),
            RecipeField::Description => Slot::Text(&mut self.description),
            RecipeField::ImageUrl => Slot::Text(&mut self.image_url),
        }
    }

    /// A copy of this draft with `field` replaced.
    pub fn with_field(
        &self,
        field: RecipeField,
        value: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let mut next = self.clone();
        assign(next.slot(field), value.into())?;
        Ok(next)
    }
}

impl Recipe {
    fn slot(&mut self, field: RecipeField) -> Slot<'_> {
        match field {
            RecipeField::Title => Slot::Text(&mut self.title),
            RecipeField::Ingredients => Slot::Text(&mut self.ingredients),
            RecipeField::Instructions => Slot::Text(&mut self.instructions),
            RecipeField::Servings => Slot::Servings(&mut self.servings),
            RecipeField::Description => Slot::Text(&mut self.description),
            RecipeField::ImageUrl => Slot::Text(&mut self.image_url),
        }
    }

    /// A copy of this recipe with `field` replaced. The id never changes.
    pub fn with_field(
        &self,
        field: RecipeField,
        value: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let mut next = self.clone();
        assign(next.slot(field), value.into())?;
        Ok(next)
    }
}
