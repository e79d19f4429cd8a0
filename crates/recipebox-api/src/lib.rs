// recipebox-api: Async Rust client for the recipe collection endpoint

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::RecipeClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use types::{NewRecipe, RecipeEnvelope, RecipeRecord, RecordId};
