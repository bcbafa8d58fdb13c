use thiserror::Error;

/// Top-level error type for the `aci-api` crate.
///
/// Covers every failure mode of a single APIC REST exchange:
/// authentication, transport, controller-reported errors, and decoding.
/// `aci-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login rejected (wrong credentials, locked account, expired session).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── APIC ────────────────────────────────────────────────────────
    /// Non-2xx response or an `error` object inside `imdata`.
    #[error("APIC error (HTTP {status}): {message}")]
    Api {
        status: u16,
        /// The APIC error code from `error.attributes.code`, if present.
        code: Option<String>,
        message: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

