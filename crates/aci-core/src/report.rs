// ── Fault aggregation ──
//
// `Report::build` is a pure function over already-fetched faults and nodes.
// It owns no I/O; the renderers in the binary turn it into text.

use serde::Serialize;

use crate::model::{Fault, Node, Severity};

/// Fault count per severity bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub major: usize,
    pub minor: usize,
    pub warning: usize,
}

impl SeverityCounts {
    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::Major => self.major,
            Severity::Minor => self.minor,
            Severity::Warning => self.warning,
        }
    }

    fn increment(&mut self, severity: Severity) {
        let slot = match severity {
            Severity::Critical => &mut self.critical,
            Severity::Major => &mut self.major,
            Severity::Minor => &mut self.minor,
            Severity::Warning => &mut self.warning,
        };
        *slot += 1;
    }

    /// Sum over all buckets.
    pub fn total(&self) -> usize {
        self.critical + self.major + self.minor + self.warning
    }
}

/// One run's aggregate: built once, rendered, discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Always equal to `counts.total()`.
    pub total: usize,
    pub counts: SeverityCounts,
    /// Critical faults first, then major; controller order within each.
    pub critical_major: Vec<Fault>,
    pub nodes: Vec<Node>,
    pub unhealthy_nodes: Vec<Node>,
}

impl Report {
    /// Aggregate faults by severity and collect node health.
    pub fn build(faults: Vec<Fault>, nodes: Vec<Node>) -> Self {
        let mut counts = SeverityCounts::default();
        for fault in &faults {
            counts.increment(fault.severity);
        }

        let mut critical_major: Vec<Fault> = faults
            .into_iter()
            .filter(|f| f.severity.is_detailed())
            .collect();
        // Stable: keeps controller order inside each severity.
        critical_major.sort_by(|a, b| b.severity.cmp(&a.severity));

        let unhealthy_nodes = nodes.iter().filter(|n| !n.is_healthy()).cloned().collect();

        Self {
            total: counts.total(),
            counts,
            critical_major,
            nodes,
            unhealthy_nodes,
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.counts.get(severity)
    }

    /// Number of faults at `threshold` or more severe.
    pub fn at_or_above(&self, threshold: Severity) -> usize {
        Severity::DESCENDING
            .iter()
            .filter(|s| **s >= threshold)
            .map(|s| self.count(*s))
            .sum()
    }

    /// No critical/major faults and every node healthy.
    pub fn is_healthy(&self) -> bool {
        self.critical_major.is_empty() && self.unhealthy_nodes.is_empty()
    }
}
