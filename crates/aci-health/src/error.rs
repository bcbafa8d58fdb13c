//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use aci_config::ConfigError;
use aci_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const THRESHOLD: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to APIC at {url}")]
    #[diagnostic(
        code(aci::connection_failed),
        help(
            "Check that the APIC is reachable from this host.\n\
             URL: {url}\n\
             A custom CA or self-signed certificate may need --insecure (-k)."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Login Failed: {message}")]
    #[diagnostic(
        code(aci::auth_failed),
        help(
            "Verify the username and password for profile '{profile}'.\n\
             Store a new password with: aci-health config set-password --profile {profile}"
        )
    )]
    AuthFailed { profile: String, message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(aci::no_credentials),
        help(
            "Set username and password in the config file, pass --username/--password,\n\
             or store a password with: aci-health config set-password --profile {profile}"
        )
    )]
    NoCredentials { profile: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error ({code}): {message}")]
    #[diagnostic(code(aci::api_error))]
    ApiError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(aci::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(aci::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No APIC configured")]
    #[diagnostic(
        code(aci::no_config),
        help(
            "Create a config file with an `apic:` section (host, username, password)\n\
             or pass --host, --username, and --password.\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(aci::config))]
    Config(Box<figment::Error>),

    #[error("Keyring error: {message}")]
    #[diagnostic(
        code(aci::keyring),
        help("Use password or password_env in the config file when no keyring service is available.")
    )]
    Keyring { message: String },

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(aci::timeout),
        help("Increase timeout with --timeout or check APIC responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Health gate ──────────────────────────────────────────────────
    #[error("{count} fault(s) at or above {severity}")]
    #[diagnostic(code(aci::threshold_exceeded))]
    ThresholdExceeded { severity: String, count: usize },

    // ── Serialization ────────────────────────────────────────────────
    #[error("JSON rendering failed: {0}")]
    #[diagnostic(code(aci::json))]
    Json(#[from] serde_json::Error),

    #[error("YAML rendering failed: {0}")]
    #[diagnostic(code(aci::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    #[diagnostic(code(aci::internal))]
    Internal(String),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::ProfileNotFound { .. } | Self::NoConfig { .. } => {
                exit_code::USAGE
            }
            Self::ThresholdExceeded { .. } => exit_code::THRESHOLD,
            _ => exit_code::GENERAL,
        }
    }

    /// Attach the active profile name to authentication errors.
    #[must_use]
    pub fn for_profile(self, name: &str) -> Self {
        match self {
            Self::AuthFailed { message, .. } => Self::AuthFailed {
                profile: name.into(),
                message,
            },
            Self::NoCredentials { .. } => Self::NoCredentials {
                profile: name.into(),
            },
            other => other,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed {
                profile: aci_config::DEFAULT_PROFILE.into(),
                message,
            },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::Api {
                message,
                code,
                status,
            } => CliError::ApiError {
                code: code
                    .or_else(|| status.map(|s| s.to_string()))
                    .unwrap_or_else(|| "unknown".into()),
                message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::ProfileNotFound { name, available } => CliError::ProfileNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            },
            ConfigError::Missing { path } => CliError::NoConfig {
                path: path.display().to_string(),
            },
            ConfigError::Keyring(message) => CliError::Keyring { message },
            ConfigError::Serialization(e) => CliError::Internal(e.to_string()),
            ConfigError::Figment(e) => CliError::Config(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_class() {
        let auth = CliError::from(CoreError::AuthenticationFailed {
            message: "bad password".into(),
        });
        assert_eq!(auth.exit_code(), exit_code::AUTH);

        let conn = CliError::from(CoreError::ConnectionFailed {
            url: "https://apic1".into(),
            reason: "refused".into(),
        });
        assert_eq!(conn.exit_code(), exit_code::CONNECTION);

        let timeout = CliError::from(CoreError::Timeout { timeout_secs: 30 });
        assert_eq!(timeout.exit_code(), exit_code::TIMEOUT);

        let usage = CliError::from(ConfigError::Validation {
            field: "timeout".into(),
            reason: "must be at least 1 second".into(),
        });
        assert_eq!(usage.exit_code(), exit_code::USAGE);

        let missing = CliError::from(ConfigError::Missing {
            path: "config.yaml".into(),
        });
        assert_eq!(missing.exit_code(), exit_code::USAGE);

        let bad_ca = CliError::from(CoreError::Config {
            message: "TLS setup failed: failed to read CA cert".into(),
        });
        assert_eq!(bad_ca.exit_code(), exit_code::USAGE);

        let gate = CliError::ThresholdExceeded {
            severity: "major".into(),
            count: 5,
        };
        assert_eq!(gate.exit_code(), exit_code::THRESHOLD);
    }

    #[test]
    fn api_error_falls_back_to_http_status() {
        let err = CliError::from(CoreError::Api {
            message: "boom".into(),
            code: None,
            status: Some(500),
        });
        assert!(matches!(err, CliError::ApiError { ref code, .. } if code == "500"));
    }

    #[test]
    fn for_profile_rewrites_auth_errors_only() {
        let err = CliError::from(CoreError::AuthenticationFailed {
            message: "denied".into(),
        })
        .for_profile("lab");
        assert!(matches!(err, CliError::AuthFailed { ref profile, .. } if profile == "lab"));

        let other = CliError::Timeout { seconds: 5 }.for_profile("lab");
        assert!(matches!(other, CliError::Timeout { seconds: 5 }));
    }

    #[test]
    fn missing_profile_lists_available() {
        let err = CliError::from(ConfigError::ProfileNotFound {
            name: "prod".into(),
            available: vec!["default".into(), "lab".into()],
        });
        assert!(
            matches!(err, CliError::ProfileNotFound { ref available, .. } if available == "default, lab")
        );
    }
}
