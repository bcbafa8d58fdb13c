// ── Fault domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Fault severity, ordered from least to most severe.
///
/// The APIC also reports `cleared`, `info`, and `condition`; those are not
/// fault severities for reporting purposes and never become a `Severity`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Severity {
    Warning,
    Minor,
    Major,
    Critical,
}

impl Severity {
    /// Report order: most severe first.
    pub const DESCENDING: [Severity; 4] = [
        Severity::Critical,
        Severity::Major,
        Severity::Minor,
        Severity::Warning,
    ];

    /// Title-case label used in summaries ("Critical").
    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Major => "Major",
            Self::Minor => "Minor",
            Self::Warning => "Warning",
        }
    }

    /// Upper-case tag used in fault detail lines ("CRITICAL").
    pub fn tag(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Major => "MAJOR",
            Self::Minor => "MINOR",
            Self::Warning => "WARNING",
        }
    }

    /// Critical and major faults are listed individually in the report.
    pub fn is_detailed(self) -> bool {
        self >= Self::Major
    }
}

/// A fault instance raised by the controller. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    pub severity: Severity,
    pub description: String,
    /// Distinguished name of the faulted object.
    pub dn: String,
    pub created: Option<DateTime<Utc>>,

    pub code: Option<String>,
    pub cause: Option<String>,
    /// Lifecycle phase (`raised`, `soaking`, `retaining`, ...).
    pub lifecycle: Option<String>,
    pub acknowledged: bool,
}

impl Fault {
    /// Fabric node the fault belongs to, parsed from `.../node-<id>/...` in the DN.
    pub fn node_id(&self) -> Option<u32> {
        self.dn
            .split('/')
            .find_map(|rn| rn.strip_prefix("node-"))
            .and_then(|id| id.parse().ok())
    }

    /// Description cut to at most `max` characters.
    pub fn short_description(&self, max: usize) -> &str {
        match self.description.char_indices().nth(max) {
            Some((idx, _)) => &self.description[..idx],
            None => &self.description,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::str::FromStr;

    use super::*;

    fn fault(dn: &str, description: &str) -> Fault {
        Fault {
            severity: Severity::Major,
            description: description.into(),
            dn: dn.into(),
            created: None,
            code: None,
            cause: None,
            lifecycle: None,
            acknowledged: false,
        }
    }

    #[test]
    fn severity_parses_case_insensitively() {
        assert_eq!(Severity::from_str("critical").unwrap(), Severity::Critical);
        assert_eq!(Severity::from_str("MAJOR").unwrap(), Severity::Major);
        assert!(Severity::from_str("cleared").is_err());
        assert!(Severity::from_str("info").is_err());
    }

    #[test]
    fn severity_orders_by_impact() {
        assert!(Severity::Critical > Severity::Major);
        assert!(Severity::Major > Severity::Minor);
        assert!(Severity::Minor > Severity::Warning);
        assert!(Severity::Major.is_detailed());
        assert!(!Severity::Minor.is_detailed());
    }

    #[test]
    fn node_id_from_dn() {
        let f = fault("topology/pod-1/node-101/sys/phys-[eth1/1]/phys/fault-F1678", "");
        assert_eq!(f.node_id(), Some(101));

        let f = fault("uni/tn-common/ctx-default/fault-F0467", "");
        assert_eq!(f.node_id(), None);
    }

    #[test]
    fn short_description_counts_characters() {
        let f = fault("", "인터페이스 다운");
        assert_eq!(f.short_description(5), "인터페이스");
        assert_eq!(f.short_description(70), "인터페이스 다운");
    }
}
