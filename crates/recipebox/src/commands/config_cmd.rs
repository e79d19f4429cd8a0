//! Config subcommand handlers.

use dialoguer::Input;

use recipebox_config::{
    Profile, config_path, load_config, load_config_or_default, parse_server_url, save_config,
};
use recipebox_core::DEFAULT_SERVER_URL;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),

        ConfigCommand::Show => {
            let cfg = load_config()?;
            let out = output::render_single(
                global.output,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|e| format!("{c:#?}\n({e})")),
                |c| config::active_profile_name(global, c),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config_path().display().to_string(), false);
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }

            cfg.default_profile = Some(name.clone());
            save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Default profile set to '{name}'");
            }
            Ok(())
        }
    }
}

/// Add (or replace) a profile. With `--yes`, takes `--profile` / `--server`
/// as given instead of prompting.
fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let path = config_path();
    let mut cfg = load_config_or_default();

    let (profile_name, server) = if global.yes {
        (
            global.profile.clone().unwrap_or_else(|| "default".into()),
            global
                .server
                .clone()
                .unwrap_or_else(|| DEFAULT_SERVER_URL.into()),
        )
    } else {
        eprintln!("recipebox configuration");
        eprintln!("   Config path: {}\n", path.display());

        let name: String = Input::new()
            .with_prompt("Profile name")
            .default(global.profile.clone().unwrap_or_else(|| "default".into()))
            .interact_text()
            .map_err(prompt_err)?;
        let server: String = Input::new()
            .with_prompt("Server URL")
            .default(
                global
                    .server
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SERVER_URL.into()),
            )
            .interact_text()
            .map_err(prompt_err)?;
        (name, server)
    };

    parse_server_url(&server)?;

    let profile = Profile {
        server,
        insecure: global.insecure.then_some(true),
        timeout: global.timeout,
        ..Profile::default()
    };
    cfg.profiles.insert(profile_name.clone(), profile);
    cfg.default_profile = Some(profile_name.clone());

    let written = save_config(&cfg)?;
    if !global.quiet {
        eprintln!("✓ Configuration written to {}", written.display());
        eprintln!("  Active profile: {profile_name}");
        eprintln!("\n  Test it: recipebox list");
    }
    Ok(())
}
