// ── Core error types ──
//
// User-facing errors from aci-core. These are NOT API-specific --
// consumers never see raw envelopes or reqwest errors directly.
// The `From<aci_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to APIC at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("APIC request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// The APIC error code (e.g., "122" for an unknown class).
        code: Option<String>,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<aci_api::Error> for CoreError {
    fn from(err: aci_api::Error) -> Self {
        match err {
            aci_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            aci_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), |u| u.origin().ascii_serialization()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            aci_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            // Only raised while building the client (CA file, TLS backend).
            aci_api::Error::Tls(msg) => CoreError::Config {
                message: format!("TLS setup failed: {msg}"),
            },
            aci_api::Error::Api {
                status,
                code,
                message,
            } => CoreError::Api {
                message,
                code,
                status: Some(status),
            },
            aci_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_maps_to_authentication_failed() {
        let err = CoreError::from(aci_api::Error::Authentication {
            message: "bad password".into(),
        });
        assert!(
            matches!(err, CoreError::AuthenticationFailed { ref message } if message == "bad password")
        );
    }

    #[test]
    fn api_error_keeps_status_and_code() {
        let err = CoreError::from(aci_api::Error::Api {
            status: 400,
            code: Some("122".into()),
            message: "unknown class".into(),
        });
        match err {
            CoreError::Api {
                message,
                code,
                status,
            } => {
                assert_eq!(message, "unknown class");
                assert_eq!(code.as_deref(), Some("122"));
                assert_eq!(status, Some(400));
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn tls_setup_maps_to_config() {
        let err = CoreError::from(aci_api::Error::Tls("invalid CA cert".into()));
        assert!(
            matches!(err, CoreError::Config { ref message } if message.contains("invalid CA cert"))
        );
    }
}
