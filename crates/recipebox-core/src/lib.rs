//! Client-side state layer between `recipebox-api` and UI consumers.
//!
//! This crate owns the domain model and the rules that keep local state
//! consistent with the remote recipe collection:
//!
//! - **[`RecipeStore`]**: Cheaply cloneable controller owning the canonical
//!   [`RecipeState`]. User intents go in through its transition API
//!   ([`load()`](RecipeStore::load), [`submit_create()`](RecipeStore::submit_create),
//!   ...); network completions are reconciled against the *latest* state,
//!   never a snapshot captured before the request was issued.
//!
//! - **[`reduce`]**: Pure `(state, msg) -> (state, effects)` function. All
//!   state changes flow through it, which keeps them testable without I/O.
//!
//! - **[`SearchFilter`]**: Case-insensitive substring filter over title,
//!   ingredients, and description. The displayed list is always derived,
//!   never stored.
//!
//! - **Form patches** ([`form`]): Field-level edits that produce a new
//!   draft or selection record instead of mutating the old one.
//!
//! - **[`Notification`]**: Success/error messages for the UI, published on a
//!   broadcast channel. Failures keep their [`FailureKind`] so callers can
//!   tell transport, server, and parse failures apart.

pub mod config;
pub mod convert;
pub mod error;
pub mod filter;
pub mod form;
pub mod model;
pub mod notify;
pub mod state;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ClientConfig, DEFAULT_SERVER_URL, TlsVerification};
pub use error::{CoreError, FailureKind};
pub use filter::{SearchFilter, filter_recipes};
pub use form::FormTarget;
pub use model::{DEFAULT_IMAGE_URL, DEFAULT_SERVINGS, Recipe, RecipeDraft, RecipeField, RecipeId};
pub use notify::{Notification, NotificationKind, Operation};
pub use state::{Effect, Msg, RecipeState, Request, ViewMode, reduce};
pub use store::RecipeStore;
