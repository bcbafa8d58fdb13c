//! Configuration for the aci-health binary.
//!
//! TOML or YAML config files, named fabric profiles, credential resolution
//! (env + plaintext + keyring), and translation to `aci_core::FabricConfig`.
//! The binary adds flag-aware overrides on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml, Yaml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use aci_core::{FabricConfig, TlsVerification};

/// Profile used when neither a flag nor `default_profile` names one.
pub const DEFAULT_PROFILE: &str = "default";

/// Keyring service name; entries are keyed `<profile>/password`.
pub const KEYRING_SERVICE: &str = "aci-health";

/// Config files looked up in the working directory, in order.
const LOCAL_CONFIG_FILES: [&str; 3] = ["config.yaml", "config.yml", "config.toml"];

const REDACTED: &str = "********";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found")]
    ProfileNotFound { name: String, available: Vec<String> },

    #[error("config file not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("keyring error: {0}")]
    Keyring(String),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config structs ──────────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named fabric profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,

    /// Single-controller layout (`apic: { host, username, password }`),
    /// used as the `default` profile when no profile of that name exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apic: Option<Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some(DEFAULT_PROFILE.into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
            apic: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Skip TLS verification unless a profile says otherwise.
    #[serde(default = "default_insecure")]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: default_insecure(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "text".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_insecure() -> bool {
    true
}
fn default_timeout() -> u64 {
    30
}

/// A named APIC profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Controller URL (e.g., "https://apic1.example.com"). A bare host
    /// gets `https://`.
    pub host: String,

    /// AAA username.
    pub username: Option<String>,

    /// Password (plaintext; prefer `password_env` or the keyring).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override the default insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,
}

impl Config {
    /// Resolve the active profile name: explicit request, then
    /// `default_profile`, then `"default"`.
    pub fn active_profile_name(&self, requested: Option<&str>) -> String {
        requested
            .map(String::from)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| DEFAULT_PROFILE.into())
    }

    /// Look up a profile, falling back to the `apic` section for `default`.
    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name).or_else(|| {
            if name == DEFAULT_PROFILE {
                self.apic.as_ref()
            } else {
                None
            }
        })
    }

    /// Like [`Config::profile`], but a missing profile is an error that lists
    /// what is available.
    pub fn require_profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profile(name).ok_or_else(|| ConfigError::ProfileNotFound {
            name: name.into(),
            available: self.profile_names(),
        })
    }

    /// Every profile name, including `default` when only `apic` is set.
    pub fn profile_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.profiles.keys().cloned().collect();
        if self.apic.is_some() && !self.profiles.contains_key(DEFAULT_PROFILE) {
            names.push(DEFAULT_PROFILE.into());
            names.sort();
        }
        names
    }

    /// TOML rendering with every plaintext password replaced.
    pub fn to_redacted_toml(&self) -> Result<String, ConfigError> {
        let mut redacted = self.clone();
        let profiles = redacted.profiles.values_mut().chain(redacted.apic.as_mut());
        for profile in profiles {
            if profile.password.is_some() {
                profile.password = Some(REDACTED.into());
            }
        }
        Ok(toml::to_string_pretty(&redacted)?)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// The platform config file path (XDG on Linux).
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "aci-health", "aci-health").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("aci-health");
    p
}

/// Pick the config file: explicit path, then `config.yaml`/`config.yml`/
/// `config.toml` in the working directory, then [`config_path`].
pub fn discover_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    LOCAL_CONFIG_FILES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
        .unwrap_or_else(config_path)
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config from `path` + `ACI_*` environment variables.
///
/// A missing file yields the defaults (plus env).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");

    let figment = Figment::new().merge(Serialized::defaults(Config::default()));
    let figment = if is_yaml(path) {
        figment.merge(Yaml::file(path))
    } else {
        figment.merge(Toml::file(path))
    };
    let figment = figment.merge(Env::prefixed("ACI_").split("__"));

    Ok(figment.extract()?)
}

/// Load the config, requiring an explicitly named file to exist.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let path = discover_config_path(explicit);
    if explicit.is_some() && !path.is_file() {
        return Err(ConfigError::Missing { path });
    }
    load_config_from(&path)
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve the password: `password_env` → plaintext → keyring.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's password_env → env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
        debug!(env = %env_name, "password_env is set but the variable is not");
    }

    // 2. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    // 3. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &keyring_user(profile_name)) {
        if let Ok(pw) = entry.get_password() {
            return Ok(SecretString::from(pw));
        }
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Store a password in the system keyring for `profile_name`.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, &keyring_user(profile_name))
        .and_then(|entry| entry.set_password(password))
        .map_err(|e| ConfigError::Keyring(e.to_string()))
}

fn keyring_user(profile_name: &str) -> String {
    format!("{profile_name}/password")
}

// ── Translation to runtime config ───────────────────────────────────

/// Parse a controller address, adding `https://` to a bare host.
pub fn parse_host(raw: &str) -> Result<url::Url, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: "must not be empty".into(),
        });
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    };

    let url = url::Url::parse(&candidate).map_err(|e| ConfigError::Validation {
        field: "host".into(),
        reason: format!("invalid URL '{raw}': {e}"),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Validation {
            field: "host".into(),
            reason: format!("unsupported scheme '{other}' (expected http or https)"),
        }),
    }
}

/// TLS mode for a profile: custom CA wins, then the insecure switch.
pub fn resolve_tls(profile: &Profile, defaults: &Defaults) -> TlsVerification {
    if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    }
}

/// Build a `FabricConfig` from a profile, no flag overrides.
pub fn profile_to_fabric_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<FabricConfig, ConfigError> {
    let url = parse_host(&profile.host)?;

    let username = profile
        .username
        .clone()
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })?;
    let password = resolve_password(profile, profile_name)?;

    let timeout = profile.timeout.unwrap_or(defaults.timeout);
    if timeout == 0 {
        return Err(ConfigError::Validation {
            field: "timeout".into(),
            reason: "must be at least 1 second".into(),
        });
    }

    Ok(FabricConfig {
        url,
        username,
        password,
        tls: resolve_tls(profile, defaults),
        timeout: Duration::from_secs(timeout),
    })
}
