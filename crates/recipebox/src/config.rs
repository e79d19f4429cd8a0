//! CLI flag overrides on top of `recipebox-config` profiles.
//!
//! Precedence: flags / `RECIPEBOX_*` env (via clap) > profile > defaults.

use recipebox_config::{Config, Profile, load_config, profile_to_client_config};
use recipebox_core::ClientConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve which profile name to use.
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    cfg.active_profile_name(global.profile.as_deref())
}

/// Comma-separated profile names for help text.
pub fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Build a `ClientConfig` from the config file, profile, and CLI overrides.
pub fn build_client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let cfg = load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    let mut profile = match cfg.profile(&profile_name) {
        Ok(profile) => profile,
        // --server alone is enough to talk to a server.
        Err(_) if global.server.is_some() => Profile::default(),
        Err(_) => {
            return Err(CliError::ProfileNotFound {
                available: available_profiles(&cfg),
                name: profile_name,
            });
        }
    };

    if let Some(ref server) = global.server {
        profile.server.clone_from(server);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }

    tracing::debug!(profile = %profile_name, server = %profile.server, "resolved server profile");
    Ok(profile_to_client_config(&profile, &cfg.defaults)?)
}
