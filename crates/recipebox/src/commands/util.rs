//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use strum::IntoEnumIterator;
use tokio::sync::broadcast;

use recipebox_core::{Notification, RecipeField};

use crate::cli::{FieldArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}

/// Read a JSON object from `--from-file` and turn its known keys into
/// field patches. Unknown keys are ignored; numbers are accepted as text.
pub fn read_field_file(path: &Path) -> Result<Vec<(RecipeField, String)>, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&contents)?;
    let object = value.as_object().ok_or_else(|| CliError::Validation {
        field: "from-file".into(),
        reason: "expected a JSON object".into(),
    })?;

    let mut patches = Vec::new();
    for field in RecipeField::iter() {
        match object.get(field.as_ref()) {
            None | Some(serde_json::Value::Null) => {}
            Some(serde_json::Value::String(s)) => patches.push((field, s.clone())),
            Some(serde_json::Value::Number(n)) => patches.push((field, n.to_string())),
            Some(other) => {
                return Err(CliError::Validation {
                    field: field.to_string(),
                    reason: format!("expected a string or number, got {other}"),
                });
            }
        }
    }
    Ok(patches)
}

/// Field patches for the flags that were actually given.
pub fn field_patches(fields: FieldArgs) -> Vec<(RecipeField, String)> {
    [
        (RecipeField::Title, fields.title),
        (RecipeField::Ingredients, fields.ingredients),
        (RecipeField::Instructions, fields.instructions),
        (RecipeField::Servings, fields.servings),
        (RecipeField::Description, fields.description),
        (RecipeField::ImageUrl, fields.image_url),
    ]
    .into_iter()
    .filter_map(|(field, value)| value.map(|v| (field, v)))
    .collect()
}

/// Print every notification published since `rx` subscribed.
pub fn drain_notifications(rx: &mut broadcast::Receiver<Notification>, global: &GlobalOpts) {
    while let Ok(notification) = rx.try_recv() {
        output::print_notification(&notification, global);
    }
}
