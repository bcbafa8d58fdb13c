// APIC REST response types
//
// Every APIC response wraps its payload in `{ "totalCount": "N", "imdata": [...] }`
// where each element is a single-key object naming the managed object class:
// `{ "faultInst": { "attributes": { ... } } }`. Attribute values are always
// strings on the wire. Fields use `#[serde(default)]` liberally because the
// attribute set varies across APIC releases.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// ── Response Envelope ────────────────────────────────────────────────

/// Raw APIC envelope. Elements are kept untyped until the class key is
/// checked, because an `error` object can appear in place of the payload.
#[derive(Debug, Deserialize)]
pub struct ImData {
    #[serde(rename = "totalCount", default)]
    pub total_count: Option<String>,
    #[serde(default)]
    pub imdata: Vec<serde_json::Map<String, serde_json::Value>>,
}

/// `{ "attributes": { ... } }` wrapper around every managed object.
#[derive(Debug, Deserialize)]
pub struct MoWrapper<T> {
    pub attributes: T,
}

/// Attributes of the `error` object the APIC returns on failures.
#[derive(Debug, Clone, Deserialize)]
pub struct ApicErrorAttributes {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Attributes of the `aaaLogin` object returned by a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct AaaLogin {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(rename = "refreshTimeoutSeconds", default)]
    pub refresh_timeout_seconds: Option<String>,
    #[serde(rename = "userName", default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

// ── Managed object classes ───────────────────────────────────────────

/// A managed object class that can be fetched with a class query.
pub trait ManagedObject: DeserializeOwned {
    /// APIC class name, used both in the URL and as the `imdata` key.
    const CLASS: &'static str;
}

/// Fault instance (`faultInst`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaultInst {
    pub severity: String,
    #[serde(default)]
    pub descr: String,
    #[serde(default)]
    pub dn: String,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(rename = "lastTransition", default)]
    pub last_transition: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub cause: Option<String>,
    /// Lifecycle: `raised`, `soaking`, `retaining`, `raised-clearing`, ...
    #[serde(default)]
    pub lc: Option<String>,
    /// `"yes"` / `"no"`.
    #[serde(default)]
    pub ack: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
}

impl ManagedObject for FaultInst {
    const CLASS: &'static str = "faultInst";
}

/// Fabric node (`fabricNode`): spines, leaves, and controllers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FabricNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// `spine`, `leaf`, or `controller`.
    #[serde(default)]
    pub role: String,
    /// `active`, `inactive`, `disabled`, `discovering`, `unknown`, ...
    #[serde(rename = "fabricSt", default)]
    pub fabric_st: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub serial: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub dn: Option<String>,
}

impl ManagedObject for FabricNode {
    const CLASS: &'static str = "fabricNode";
}

/// Controller cluster member as seen by the appliance vector (`infraWiNode`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfraWiNode {
    #[serde(rename = "nodeName")]
    pub node_name: String,
    /// `fully-fit`, `data-layer-partially-diverged`, `unavailable`, ...
    #[serde(default)]
    pub health: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub addr: Option<String>,
    #[serde(rename = "operSt", default)]
    pub oper_st: Option<String>,
    #[serde(rename = "adminSt", default)]
    pub admin_st: Option<String>,
}

impl ManagedObject for InfraWiNode {
    const CLASS: &'static str = "infraWiNode";
}
