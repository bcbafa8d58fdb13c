//! Domain layer between `aci-api` and the `aci-health` binary.
//!
//! - **[`HealthCheck`]**: one-shot facade. [`login()`](HealthCheck::login)
//!   opens the APIC session, [`collect()`](HealthCheck::collect) fetches
//!   faults, fabric nodes, and controller health and aggregates them,
//!   [`HealthCheck::oneshot()`] does the whole run including logout.
//!
//! - **[`Report`]**: pure aggregate over faults and nodes, with per-severity
//!   counts whose sum is always the total.
//!
//! - **Domain model** ([`model`]): `Fault`, `Severity`, `Node`, `NodeRole`,
//!   `NodeStatus`, converted from raw APIC attributes in [`convert`].

pub mod check;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod report;

// ── Primary re-exports ──────────────────────────────────────────────
pub use check::HealthCheck;
pub use config::{FabricConfig, TlsVerification};
pub use error::CoreError;
pub use model::{Fault, Node, NodeRole, NodeStatus, Severity};
pub use report::{Report, SeverityCounts};
