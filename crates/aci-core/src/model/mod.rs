// ── Domain model ──
//
// Canonical types shared by the aggregator and the renderers.

pub mod fault;
pub mod node;

pub use fault::{Fault, Severity};
pub use node::{Node, NodeRole, NodeStatus};
