// APIC REST client
//
// Wraps `reqwest::Client` with APIC URL construction and `imdata` envelope
// unwrapping. Login/logout live in `auth.rs` as inherent methods to keep
// this module focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::{
    ApicErrorAttributes, FabricNode, FaultInst, ImData, InfraWiNode, ManagedObject, MoWrapper,
};
use crate::transport::TransportConfig;

/// Raw HTTP client for the APIC REST API.
///
/// Handles the `{ totalCount, imdata: [{ <class>: { attributes } }] }`
/// envelope. All query methods return the unwrapped attribute structs --
/// the envelope is stripped before the caller sees it.
pub struct ApicClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApicClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// If the config doesn't already include a cookie jar, one is created
    /// automatically (the APIC session is cookie based). `base_url` is the
    /// controller root, e.g. `https://apic1.example.com`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self { http, base_url })
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/api/{path}`, keeping any path prefix on the base URL.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/api/{path}"))?)
    }

    // ── Class queries ────────────────────────────────────────────────

    /// `GET /api/class/{CLASS}.json`, returning the attributes of every object.
    pub async fn class_query<T: ManagedObject>(&self) -> Result<Vec<T>, Error> {
        let url = self.api_url(&format!("class/{}.json", T::CLASS))?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await?;
        let envelope = self.parse_envelope(resp).await?;
        let objects = unwrap_class::<T>(envelope)?;

        debug!(class = T::CLASS, count = objects.len(), "class query complete");
        Ok(objects)
    }

    /// All fault instances in the fabric.
    pub async fn list_faults(&self) -> Result<Vec<FaultInst>, Error> {
        self.class_query().await
    }

    /// All fabric nodes (spines, leaves, controllers).
    pub async fn list_fabric_nodes(&self) -> Result<Vec<FabricNode>, Error> {
        self.class_query().await
    }

    /// Controller cluster health as reported by the appliance vector.
    pub async fn list_controllers(&self) -> Result<Vec<InfraWiNode>, Error> {
        self.class_query().await
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a POST request with JSON body and parse the envelope.
    pub(crate) async fn post(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<ImData, Error> {
        debug!("POST {}", url);

        let resp = self.http.post(url).json(body).send().await?;

        self.parse_envelope(resp).await
    }

    /// Parse the `{ totalCount, imdata }` envelope, turning HTTP failures and
    /// `error` objects into typed errors.
    ///
    /// The APIC reports failures both through the HTTP status and through an
    /// `{"error":{"attributes":{"code","text"}}}` element in `imdata`;
    /// the element's text is preferred when present.
    async fn parse_envelope(&self, resp: reqwest::Response) -> Result<ImData, Error> {
        let status = resp.status();
        let body = resp.text().await?;
        trace!(%status, bytes = body.len(), "APIC response");

        let envelope = serde_json::from_str::<ImData>(&body);

        if !status.is_success() {
            let detail = envelope.as_ref().ok().and_then(first_error);
            let message = detail
                .as_ref()
                .and_then(|e| e.text.clone())
                .unwrap_or_else(|| format!("HTTP {status}: {}", preview(&body)));

            if status == reqwest::StatusCode::UNAUTHORIZED
                || status == reqwest::StatusCode::FORBIDDEN
            {
                return Err(Error::Authentication { message });
            }
            return Err(Error::Api {
                status: status.as_u16(),
                code: detail.and_then(|e| e.code),
                message,
            });
        }

        let envelope = envelope.map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body: body.clone(),
        })?;

        if let Some(err) = first_error(&envelope) {
            return Err(Error::Api {
                status: status.as_u16(),
                message: err.text.unwrap_or_else(|| "unknown APIC error".into()),
                code: err.code,
            });
        }

        Ok(envelope)
    }
}

// ── Envelope helpers ─────────────────────────────────────────────────

fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

/// The first `error` object in `imdata`, if any.
fn first_error(envelope: &ImData) -> Option<ApicErrorAttributes> {
    envelope
        .imdata
        .iter()
        .find_map(|entry| entry.get("error"))
        .and_then(|value| {
            serde_json::from_value::<MoWrapper<ApicErrorAttributes>>(value.clone()).ok()
        })
        .map(|wrapper| wrapper.attributes)
}

/// Pull the attributes of every `T::CLASS` element out of `imdata`.
///
/// Elements of other classes are skipped; a matching element whose
/// attributes don't decode is a deserialization error.
pub(crate) fn unwrap_class<T: ManagedObject>(envelope: ImData) -> Result<Vec<T>, Error> {
    if let Some(total) = envelope.total_count.as_deref() {
        trace!(class = T::CLASS, total, "totalCount");
    }

    envelope
        .imdata
        .into_iter()
        .filter_map(|mut entry| entry.remove(T::CLASS))
        .map(|value| {
            serde_json::from_value::<MoWrapper<T>>(value.clone())
                .map(|wrapper| wrapper.attributes)
                .map_err(|e| Error::Deserialization {
                    message: format!("invalid {} object: {e}", T::CLASS),
                    body: value.to_string(),
                })
        })
        .collect()
}

/// Attributes of the first `class` element, if present and decodable.
pub(crate) fn unwrap_first<T: DeserializeOwned>(envelope: ImData, class: &str) -> Option<T> {
    envelope
        .imdata
        .into_iter()
        .find_map(|mut entry| entry.remove(class))
        .and_then(|value| serde_json::from_value::<MoWrapper<T>>(value).ok())
        .map(|wrapper| wrapper.attributes)
}
