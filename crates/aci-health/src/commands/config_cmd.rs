//! Config subcommand handlers.

use std::io::{self, BufRead};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

/// Map a prompt / stdin failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "password".into(),
        reason: format!("could not read password: {e}"),
    }
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            let path = aci_config::discover_config_path(global.config.as_deref());
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load(global)?;
            output::print_output(cfg.to_redacted_toml()?.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::SetPassword { password_stdin } => {
            let cfg = config::load(global)?;
            let profile = cfg.active_profile_name(global.profile.as_deref());

            let password = if password_stdin {
                let mut line = String::new();
                io::stdin().lock().read_line(&mut line).map_err(prompt_err)?;
                line.trim_end_matches(['\r', '\n']).to_owned()
            } else {
                rpassword::prompt_password(format!("APIC password for profile '{profile}': "))
                    .map_err(prompt_err)?
            };

            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "password cannot be empty".into(),
                });
            }

            aci_config::store_password(&profile, &password)?;
            if !global.quiet {
                eprintln!("Password stored in system keyring for profile '{profile}'");
            }
            Ok(())
        }
    }
}
