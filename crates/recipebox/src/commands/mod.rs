//! Command dispatch: bridges CLI args -> store transitions -> output formatting.

pub mod config_cmd;
pub mod recipes;
pub mod util;

use recipebox_core::RecipeStore;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    store: &RecipeStore,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::List(args) => recipes::list(store, args, global).await,
        Command::Show { id } => recipes::show(store, &id, global).await,
        Command::Create(args) => recipes::create(store, args, global).await,
        Command::Edit(args) => recipes::edit(store, args, global).await,
        Command::Delete { id } => recipes::delete(store, &id, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "local command reached server dispatch".into(),
        )),
    }
}
