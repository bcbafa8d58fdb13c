// APIC authentication
//
// Cookie-based session login/logout. `aaaLogin` sets the `APIC-cookie`
// session cookie in the client's jar; subsequent requests use it
// automatically.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::{ApicClient, unwrap_first};
use crate::error::Error;
use crate::models::AaaLogin;

impl ApicClient {
    /// Authenticate with the controller using username/password.
    ///
    /// `POST /api/aaaLogin.json` with the `aaaUser` object. On success the
    /// session cookie is stored in the client's cookie jar and the decoded
    /// `aaaLogin` attributes are returned (when the controller sends them).
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Option<AaaLogin>, Error> {
        let url = self.api_url("aaaLogin.json")?;
        debug!("logging in at {}", url);

        let body = json!({
            "aaaUser": {
                "attributes": {
                    "name": username,
                    "pwd": password.expose_secret(),
                }
            }
        });

        let envelope = self.post(url, &body).await.map_err(|err| match err {
            Error::Api { status, message, .. } => Error::Authentication {
                message: format!("login failed (HTTP {status}): {message}"),
            },
            other => other,
        })?;

        let session = unwrap_first::<AaaLogin>(envelope, "aaaLogin");
        if let Some(ref login) = session {
            debug!(
                version = login.version.as_deref().unwrap_or("unknown"),
                refresh_timeout = login.refresh_timeout_seconds.as_deref().unwrap_or("-"),
                "login successful"
            );
        }
        Ok(session)
    }

    /// End the current session.
    ///
    /// `POST /api/aaaLogout.json`. The APIC expires idle sessions on its own,
    /// so callers typically ignore a failure here.
    pub async fn logout(&self, username: &str) -> Result<(), Error> {
        let url = self.api_url("aaaLogout.json")?;
        debug!("logging out at {}", url);

        let body = json!({ "aaaUser": { "attributes": { "name": username } } });
        self.post(url, &body).await?;

        debug!("logout complete");
        Ok(())
    }
}
