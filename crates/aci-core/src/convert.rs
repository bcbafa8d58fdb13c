// ── API-to-domain type conversions ──
//
// Bridges raw `aci_api` attribute structs into canonical `aci_core::model`
// types. APIC attributes are all strings; this module parses them into
// strong types and drops what the report doesn't track.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use tracing::debug;

use aci_api::{FabricNode, FaultInst, InfraWiNode};

use crate::model::{Fault, Node, NodeRole, NodeStatus, Severity};

/// Controller health value meaning the cluster member is in sync.
const FULLY_FIT: &str = "fully-fit";

/// Switch fabric state meaning the node is in service.
const FABRIC_ACTIVE: &str = "active";

// ── Helpers ────────────────────────────────────────────────────────

/// Parse an APIC timestamp (`2024-06-15T10:30:00.123+09:00`).
fn parse_datetime(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.is_empty())
}

// ── Fault ──────────────────────────────────────────────────────────

/// Convert one `faultInst`. Returns `None` for severities the report
/// doesn't track (`cleared`, `info`, `condition`).
pub fn fault_from_api(raw: FaultInst) -> Option<Fault> {
    let Ok(severity) = Severity::from_str(&raw.severity) else {
        debug!(severity = %raw.severity, dn = %raw.dn, "skipping untracked fault severity");
        return None;
    };

    Some(Fault {
        severity,
        created: parse_datetime(raw.created.as_deref()),
        description: raw.descr,
        dn: raw.dn,
        code: non_empty(raw.code),
        cause: non_empty(raw.cause),
        lifecycle: non_empty(raw.lc),
        acknowledged: raw.ack.as_deref() == Some("yes"),
    })
}

/// Convert a full `faultInst` query result, preserving controller order.
pub fn faults_from_api(raw: Vec<FaultInst>) -> Vec<Fault> {
    let received = raw.len();
    let faults: Vec<Fault> = raw.into_iter().filter_map(fault_from_api).collect();
    if faults.len() != received {
        debug!(
            received,
            kept = faults.len(),
            "dropped faults with untracked severities"
        );
    }
    faults
}

// ── Node ───────────────────────────────────────────────────────────

/// Index controller health by node name.
///
/// `infraWiNode` has one row per (observer, observed) controller pair, so a
/// name can appear several times. Any row that isn't `fully-fit` wins, so a
/// single diverged view is enough to flag the controller.
pub fn controller_health(controllers: &[InfraWiNode]) -> HashMap<&str, &str> {
    let mut health: HashMap<&str, &str> = HashMap::new();
    for ctrl in controllers {
        health
            .entry(ctrl.node_name.as_str())
            .and_modify(|current| {
                if *current == FULLY_FIT {
                    *current = ctrl.health.as_str();
                }
            })
            .or_insert(ctrl.health.as_str());
    }
    health
}

/// Derive a node's status.
///
/// Controllers use the cluster health view; switches use `fabricSt`.
fn node_status(raw: &FabricNode, role: &NodeRole, health: &HashMap<&str, &str>) -> NodeStatus {
    if *role == NodeRole::Controller {
        return match health.get(raw.name.as_str()) {
            Some(&FULLY_FIT) => NodeStatus::Ok,
            Some(other) => NodeStatus::Degraded((*other).to_owned()),
            None => NodeStatus::Unknown,
        };
    }

    match raw.fabric_st.as_deref() {
        Some(FABRIC_ACTIVE) => NodeStatus::Ok,
        _ => NodeStatus::Down,
    }
}

/// Convert `fabricNode` rows, resolving controller health from `infraWiNode`.
pub fn nodes_from_api(raw: Vec<FabricNode>, controllers: &[InfraWiNode]) -> Vec<Node> {
    let health = controller_health(controllers);

    raw.into_iter()
        .map(|node| {
            let role = NodeRole::parse(&node.role);
            let status = node_status(&node, &role, &health);
            Node {
                id: node.id,
                name: node.name,
                role,
                status,
                model: non_empty(node.model),
                serial: non_empty(node.serial),
                address: non_empty(node.address),
                version: non_empty(node.version),
            }
        })
        .collect()
}
