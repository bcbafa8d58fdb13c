// ── Fabric node domain types ──

use std::fmt;

use serde::{Serialize, Serializer};

/// Role of a node in the fabric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRole {
    Spine,
    Leaf,
    Controller,
    /// Any role string the APIC reports that isn't one of the above.
    Other(String),
}

impl NodeRole {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "spine" => Self::Spine,
            "leaf" => Self::Leaf,
            "controller" => Self::Controller,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Spine => "spine",
            Self::Leaf => "leaf",
            Self::Controller => "controller",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Serialize for NodeRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Health of a node as shown in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeStatus {
    /// Switch `fabricSt == active`, or controller `fully-fit`.
    Ok,
    /// Switch in any fabric state other than `active`.
    Down,
    /// Controller reporting a health other than `fully-fit`.
    Degraded(String),
    /// Controller missing from the cluster health view.
    Unknown,
}

impl NodeStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.pad("OK"),
            Self::Down => f.pad("DOWN"),
            Self::Degraded(health) => f.pad(&health.to_uppercase()),
            Self::Unknown => f.pad("UNKNOWN"),
        }
    }
}

impl Serialize for NodeStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A spine, leaf, or controller. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub role: NodeRole,
    pub status: NodeStatus,

    pub model: Option<String>,
    pub serial: Option<String>,
    pub address: Option<String>,
    pub version: Option<String>,
}

impl Node {
    pub fn is_healthy(&self) -> bool {
        self.status.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_known_and_unknown() {
        assert_eq!(NodeRole::parse("spine"), NodeRole::Spine);
        assert_eq!(NodeRole::parse("controller").as_str(), "controller");
        assert_eq!(
            NodeRole::parse("remote-leaf-wan"),
            NodeRole::Other("remote-leaf-wan".into())
        );
    }

    #[test]
    fn status_display_is_upper_case() {
        assert_eq!(NodeStatus::Ok.to_string(), "OK");
        assert_eq!(NodeStatus::Down.to_string(), "DOWN");
        assert_eq!(
            NodeStatus::Degraded("data-layer-partially-diverged".into()).to_string(),
            "DATA-LAYER-PARTIALLY-DIVERGED"
        );
        assert_eq!(NodeStatus::Unknown.to_string(), "UNKNOWN");
    }

    #[test]
    fn display_honors_width() {
        assert_eq!(format!("{:10}|", NodeRole::Leaf), "leaf      |");
        assert_eq!(format!("{:6}|", NodeStatus::Ok), "OK    |");
    }
}
