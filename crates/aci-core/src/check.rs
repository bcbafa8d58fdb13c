// ── Health check orchestration ──
//
// One sequential pass: login, fetch faults, fetch nodes and controller
// health, logout. Every request is awaited before the next one starts.

use tracing::{debug, info, warn};

use aci_api::ApicClient;

use crate::config::FabricConfig;
use crate::convert::{faults_from_api, nodes_from_api};
use crate::error::CoreError;
use crate::model::{Fault, Node};
use crate::report::Report;

/// A logged-in (or about to be) session against one APIC.
pub struct HealthCheck {
    config: FabricConfig,
    client: ApicClient,
}

impl HealthCheck {
    /// Build the HTTP client. No network I/O happens here.
    pub fn new(config: FabricConfig) -> Result<Self, CoreError> {
        let client = ApicClient::new(config.url.clone(), &config.transport())?;
        Ok(Self { config, client })
    }

    /// Open the APIC session.
    pub async fn login(&self) -> Result<(), CoreError> {
        let session = self
            .client
            .login(&self.config.username, &self.config.password)
            .await
            .map_err(|e| self.map_api_error(e))?;

        info!(
            url = %self.config.url,
            user = %self.config.username,
            version = session
                .as_ref()
                .and_then(|s| s.version.as_deref())
                .unwrap_or("unknown"),
            "logged in to APIC"
        );
        Ok(())
    }

    /// End the session. Failures are logged, never returned: the APIC
    /// expires idle sessions on its own.
    pub async fn logout(&self) {
        if let Err(e) = self.client.logout(&self.config.username).await {
            warn!(error = %e, "logout failed");
        }
    }

    /// All tracked faults, in controller order.
    pub async fn faults(&self) -> Result<Vec<Fault>, CoreError> {
        let raw = self
            .client
            .list_faults()
            .await
            .map_err(|e| self.map_api_error(e))?;
        Ok(faults_from_api(raw))
    }

    /// Spines, leaves, and controllers with their resolved status.
    pub async fn nodes(&self) -> Result<Vec<Node>, CoreError> {
        let fabric = self
            .client
            .list_fabric_nodes()
            .await
            .map_err(|e| self.map_api_error(e))?;
        let controllers = self
            .client
            .list_controllers()
            .await
            .map_err(|e| self.map_api_error(e))?;
        Ok(nodes_from_api(fabric, &controllers))
    }

    /// Fetch everything and aggregate. Requires a prior `login`.
    pub async fn collect(&self) -> Result<Report, CoreError> {
        let faults = self.faults().await?;
        let nodes = self.nodes().await?;
        let report = Report::build(faults, nodes);

        debug!(
            total = report.total,
            critical = report.counts.critical,
            major = report.counts.major,
            minor = report.counts.minor,
            warning = report.counts.warning,
            unhealthy_nodes = report.unhealthy_nodes.len(),
            "report built"
        );
        Ok(report)
    }

    /// One-shot: login, collect, logout.
    pub async fn oneshot(config: FabricConfig) -> Result<Report, CoreError> {
        let check = Self::new(config)?;
        check.login().await?;
        let result = check.collect().await;
        check.logout().await;
        result
    }

    /// `From<aci_api::Error>` plus the context only this session knows:
    /// the configured timeout and controller URL.
    fn map_api_error(&self, err: aci_api::Error) -> CoreError {
        match CoreError::from(err) {
            CoreError::Timeout { .. } => CoreError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            },
            CoreError::ConnectionFailed { url, reason } if url.is_empty() => {
                CoreError::ConnectionFailed {
                    url: self.config.url.to_string(),
                    reason,
                }
            }
            other => other,
        }
    }
}
