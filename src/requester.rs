//! License request workflow orchestration.
//!
//! `LicenseRequester` runs the fixed three-step sequence (establish session,
//! login, request license email) inside one owned `PortalSession` and maps
//! the outcome to a `RequestOutcome`. The first failing step ends the run; no
//! step is retried. Errors never escape `run()` — anything outside the portal
//! taxonomy is reported under an "Unexpected error" category.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;
use tracing::{error, info};

use crate::api::{PortalError, PortalSession};
use crate::config::Config;

/// Result of one workflow run: a success flag plus a reporting-only
/// details mapping (identifiers on success, error category and message on
/// failure). Not persisted anywhere.
#[derive(Debug, Clone, Serialize)]
pub struct RequestOutcome {
    pub success: bool,
    pub details: BTreeMap<String, String>,
}

/// Orchestrates one license request workflow.
///
/// Each instance owns its configuration and builds its own session, so
/// independent requesters can run concurrently without shared state.
pub struct LicenseRequester {
    config: Config,
}

impl LicenseRequester {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Execute the complete workflow and report the outcome.
    pub async fn run(&self) -> RequestOutcome {
        info!("Starting Nexacro license request workflow");

        let outcome = match self.run_steps().await {
            Ok(()) => {
                let mut details = BTreeMap::new();
                details.insert("user_id".to_string(), self.config.user_id.clone());
                details.insert("customer_id".to_string(), self.config.customer_id.clone());
                details.insert("email".to_string(), self.config.email.clone());
                RequestOutcome {
                    success: true,
                    details,
                }
            }
            Err(err) => {
                let (category, message) = categorize(&err);
                error!(category, %message, "Workflow failed");
                let mut details = BTreeMap::new();
                details.insert("error".to_string(), category.to_string());
                details.insert("message".to_string(), message);
                RequestOutcome {
                    success: false,
                    details,
                }
            }
        };

        self.log_summary(&outcome);
        outcome
    }

    /// Run the three steps in order, stopping at the first failure.
    ///
    /// The session lives for the duration of this call only; dropping it on
    /// any exit path releases the held connections.
    async fn run_steps(&self) -> Result<()> {
        let session = PortalSession::new(self.config.clone())?;

        info!("Step 1/3: Establishing session");
        let cookies = session.establish_session().await?;
        info!(cookies = cookies.len(), "Session established");

        info!("Step 2/3: Authenticating");
        session.login().await?;
        info!(user_id = %self.config.user_id, "Authentication successful");

        info!("Step 3/3: Requesting license");
        session.request_license_email().await?;
        info!(email = %self.config.email, "License request submitted");

        Ok(())
    }

    fn log_summary(&self, outcome: &RequestOutcome) {
        let summary = serde_json::to_string(outcome).unwrap_or_default();
        if outcome.success {
            info!(summary = %summary, "=== LICENSE REQUEST SUCCESS ===");
        } else {
            error!(summary = %summary, "=== LICENSE REQUEST FAILED ===");
        }
    }
}

/// Map a step failure to a reporting category and message.
fn categorize(err: &anyhow::Error) -> (&'static str, String) {
    match err.downcast_ref::<PortalError>() {
        Some(PortalError::Network(msg)) => ("Network error", msg.clone()),
        Some(PortalError::Authentication(msg)) => ("Authentication failed", msg.clone()),
        Some(PortalError::LicenseRequest(msg)) => ("License request failed", msg.clone()),
        None => ("Unexpected error", err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorize_maps_portal_errors() {
        let err = anyhow::Error::new(PortalError::Network("Request timeout during login".into()));
        assert_eq!(
            categorize(&err),
            ("Network error", "Request timeout during login".to_string())
        );

        let err = anyhow::Error::new(PortalError::Authentication("bad password".into()));
        assert_eq!(categorize(&err).0, "Authentication failed");

        let err = anyhow::Error::new(PortalError::LicenseRequest("Unknown response".into()));
        assert_eq!(
            categorize(&err),
            ("License request failed", "Unknown response".to_string())
        );
    }

    #[test]
    fn categorize_falls_back_for_foreign_errors() {
        let err = anyhow::anyhow!("something unforeseen");
        let (category, message) = categorize(&err);
        assert_eq!(category, "Unexpected error");
        assert!(message.contains("unforeseen"));
    }

    #[test]
    fn outcome_serializes_with_details() {
        let mut details = BTreeMap::new();
        details.insert("user_id".to_string(), "u1".to_string());
        let outcome = RequestOutcome {
            success: true,
            details,
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains(r#""success":true"#));
        assert!(json.contains(r#""user_id":"u1""#));
    }
}
