//! Flag-aware configuration: layers `--host`, `--username`, `--password`,
//! `--insecure`, `--timeout` over the loaded profile and hands the result
//! to `aci_config` for translation into a `FabricConfig`.

use clap::ValueEnum;
use tracing::debug;

use aci_config::{Config, Profile};
use aci_core::FabricConfig;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Everything a check run needs, resolved once.
pub struct Settings {
    pub profile_name: String,
    pub fabric: FabricConfig,
}

/// Load the config file named by `--config` (or discovered).
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(aci_config::load_config(global.config.as_deref())?)
}

/// Output format: `--output` flag, then `defaults.output`, then text.
pub fn output_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    global
        .output
        .or_else(|| OutputFormat::from_str(&config.defaults.output, true).ok())
        .unwrap_or(OutputFormat::Text)
}

/// Color mode: `--color` flag, then `defaults.color`, then auto.
pub fn color_mode(global: &GlobalOpts, config: &Config) -> ColorMode {
    global
        .color
        .or_else(|| ColorMode::from_str(&config.defaults.color, true).ok())
        .unwrap_or(ColorMode::Auto)
}

/// Resolve the active profile plus flag overrides into runtime settings.
///
/// An explicitly requested profile must exist. Without any profile, the
/// flags alone must name a host.
pub fn resolve(global: &GlobalOpts, config: &Config) -> Result<Settings, CliError> {
    let profile_name = config.active_profile_name(global.profile.as_deref());

    let base = if global.profile.is_some() {
        config.require_profile(&profile_name)?.clone()
    } else if let Some(profile) = config.profile(&profile_name) {
        profile.clone()
    } else if global.host.is_some() {
        Profile::default()
    } else {
        return Err(CliError::NoConfig {
            path: aci_config::discover_config_path(global.config.as_deref())
                .display()
                .to_string(),
        });
    };

    let profile = apply_overrides(base, global);
    debug!(profile = %profile_name, host = %profile.host, "resolved profile");

    let fabric = aci_config::profile_to_fabric_config(&profile, &profile_name, &config.defaults)
        .map_err(|e| CliError::from(e).for_profile(&profile_name))?;

    Ok(Settings {
        profile_name,
        fabric,
    })
}

/// Flags win over the profile. A flag password replaces every other
/// password source; `--insecure` also drops a configured CA.
fn apply_overrides(mut profile: Profile, global: &GlobalOpts) -> Profile {
    if let Some(ref host) = global.host {
        profile.host.clone_from(host);
    }
    if let Some(ref username) = global.username {
        profile.username = Some(username.clone());
    }
    if let Some(ref password) = global.password {
        profile.password = Some(password.clone());
        profile.password_env = None;
    }
    if global.insecure {
        profile.insecure = Some(true);
        profile.ca_cert = None;
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    profile
}
