// aci-api: Async Rust client for the Cisco ACI APIC REST API

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::ApicClient;
pub use error::Error;
pub use models::{AaaLogin, FabricNode, FaultInst, InfraWiNode, ManagedObject};
pub use transport::{TlsMode, TransportConfig};
