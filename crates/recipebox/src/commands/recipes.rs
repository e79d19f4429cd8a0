//! Recipe command handlers.

use std::fmt::Write as _;
use std::sync::Arc;

use tabled::Tabled;

use recipebox_core::{FormTarget, Recipe, RecipeId, RecipeStore};

use crate::cli::{CreateArgs, EditArgs, GlobalOpts, ListArgs};
use crate::error::CliError;
use crate::output;

use super::util;

const DESCRIPTION_WIDTH: usize = 48;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct RecipeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Servings")]
    servings: u32,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Arc<Recipe>> for RecipeRow {
    fn from(r: &Arc<Recipe>) -> Self {
        Self {
            id: r.id.to_string(),
            title: r.title.clone(),
            servings: r.servings,
            description: truncate(&r.description, DESCRIPTION_WIDTH),
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn detail(r: &Recipe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", r.title);
    let _ = writeln!(out, "  ID:          {}", r.id);
    let _ = writeln!(out, "  Servings:    {}", r.servings);
    if !r.description.is_empty() {
        let _ = writeln!(out, "  Description: {}", r.description);
    }
    if !r.image_url.is_empty() {
        let _ = writeln!(out, "  Image:       {}", r.image_url);
    }
    let _ = writeln!(out, "\nIngredients:\n{}", indent(&r.ingredients));
    let _ = write!(out, "\nInstructions:\n{}", indent(&r.instructions));
    out
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn print_recipe(recipe: &Recipe, global: &GlobalOpts) {
    let out = output::render_single(global.output, recipe, detail, |r| r.id.to_string());
    output::print_output(&out, global.quiet);
}

// ── Helpers ─────────────────────────────────────────────────────────

async fn load(store: &RecipeStore, global: &GlobalOpts) -> Result<(), CliError> {
    let mut notes = store.notifications();
    let result = output::with_spinner(global, "Loading recipes", store.load()).await;
    util::drain_notifications(&mut notes, global);
    Ok(result?)
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn list(store: &RecipeStore, args: ListArgs, global: &GlobalOpts) -> Result<(), CliError> {
    load(store, global).await?;
    if let Some(term) = args.search {
        store.set_search_term(term);
    }

    let shown = store.displayed();
    let out = output::render_list(
        global.output,
        &shown,
        |r| RecipeRow::from(r),
        |r| r.id.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn show(store: &RecipeStore, raw_id: &str, global: &GlobalOpts) -> Result<(), CliError> {
    load(store, global).await?;
    store.select_by_id(&RecipeId::from(raw_id))?;

    let snap = store.snapshot();
    let recipe = snap.selection().ok_or_else(|| CliError::NotFound {
        id: raw_id.into(),
    })?;
    print_recipe(recipe, global);
    Ok(())
}

pub async fn create(
    store: &RecipeStore,
    args: CreateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut patches = match args.from_file {
        Some(ref path) => util::read_field_file(path)?,
        None => Vec::new(),
    };
    patches.extend(util::field_patches(args.fields));

    store.show_create_form();
    for (field, value) in patches {
        store.patch_field(FormTarget::Draft, field, value)?;
    }

    let mut notes = store.notifications();
    let result = output::with_spinner(global, "Adding recipe", store.submit_create()).await;
    util::drain_notifications(&mut notes, global);

    print_recipe(&result?, global);
    Ok(())
}

pub async fn edit(store: &RecipeStore, args: EditArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let patches = util::field_patches(args.fields);
    if patches.is_empty() {
        return Err(CliError::Validation {
            field: "fields".into(),
            reason: "nothing to change; pass at least one of --title, --ingredients, \
                     --instructions, --servings, --description, --image-url"
                .into(),
        });
    }

    load(store, global).await?;
    store.select_by_id(&RecipeId::from(args.id.as_str()))?;
    for (field, value) in patches {
        store.patch_field(FormTarget::Selection, field, value)?;
    }

    let mut notes = store.notifications();
    let result = output::with_spinner(global, "Saving recipe", store.submit_update()).await;
    util::drain_notifications(&mut notes, global);

    print_recipe(&result?, global);
    Ok(())
}

pub async fn delete(store: &RecipeStore, raw_id: &str, global: &GlobalOpts) -> Result<(), CliError> {
    load(store, global).await?;
    let id = RecipeId::from(raw_id);
    let title = store
        .snapshot()
        .find(&id)
        .map(|r| r.title.clone())
        .ok_or_else(|| CliError::NotFound { id: raw_id.into() })?;

    if !util::confirm(&format!("Delete recipe '{title}'?"), "delete", global.yes)? {
        return Ok(());
    }

    let mut notes = store.notifications();
    let result = output::with_spinner(global, "Deleting recipe", store.submit_delete(&id)).await;
    util::drain_notifications(&mut notes, global);
    Ok(result?)
}
