//! Clap derive structures for the `recipebox` CLI.
//!
//! Defines the command tree, global flags, and shared types. Kept free of
//! crate-internal imports so build.rs can compile it for man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// recipebox -- keep a shared recipe collection from the command line
#[derive(Debug, Parser)]
#[command(
    name = "recipebox",
    version,
    about = "Browse, search, and edit a recipe collection",
    long_about = "Browse, search, and edit the recipes stored on a recipebox server.\n\n\
        Every change is sent to the server first; the local view only\n\
        reflects what the server confirmed.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Server profile to use
    #[arg(long, short = 'p', env = "RECIPEBOX_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Server URL (overrides profile)
    #[arg(long, env = "RECIPEBOX_SERVER", global = true)]
    pub server: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "RECIPEBOX_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "RECIPEBOX_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(long, env = "RECIPEBOX_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List recipes, optionally filtered by a search term
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a single recipe in full
    Show {
        /// Recipe id
        id: String,
    },

    /// Add a new recipe
    #[command(alias = "add")]
    Create(CreateArgs),

    /// Change fields of an existing recipe
    Edit(EditArgs),

    /// Delete a recipe
    #[command(alias = "rm")]
    Delete {
        /// Recipe id
        id: String,
    },

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Recipe arguments ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive match against title, ingredients, and description
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

/// Recipe fields settable from the command line.
#[derive(Debug, Default, Args)]
pub struct FieldArgs {
    /// Recipe title
    #[arg(long)]
    pub title: Option<String>,

    /// Ingredients, free text
    #[arg(long)]
    pub ingredients: Option<String>,

    /// Instructions, free text
    #[arg(long)]
    pub instructions: Option<String>,

    /// Number of servings (positive integer)
    #[arg(long)]
    pub servings: Option<String>,

    /// Short description. Required by the server when creating
    #[arg(long)]
    pub description: Option<String>,

    /// Image URL
    #[arg(long)]
    pub image_url: Option<String>,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[command(flatten)]
    pub fields: FieldArgs,

    /// Seed the new recipe from a JSON object; field flags win over it
    #[arg(long, short = 'F')]
    pub from_file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Recipe id
    pub id: String,

    #[command(flatten)]
    pub fields: FieldArgs,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or extend the config file with a server profile
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
