use thiserror::Error;

/// Errors raised by the portal session workflow.
///
/// Transport-layer problems (timeout, connection failure, HTTP error status)
/// all surface as `Network`; the message distinguishes the cause. `Network` is
/// possible at every step, the other variants are step-specific.
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("License request failed: {0}")]
    LicenseRequest(String),
}

impl PortalError {
    /// Classify a reqwest transport error into a `Network` variant with a
    /// message naming the failure mode.
    pub fn network(context: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            PortalError::Network(format!("Request timeout during {context}"))
        } else if err.is_connect() {
            PortalError::Network(format!("Connection failed during {context}"))
        } else {
            PortalError::Network(format!("Request failed during {context}: {err}"))
        }
    }

    /// Wrap a non-2xx HTTP status as a `Network` variant.
    pub fn http_status(context: &str, status: reqwest::StatusCode) -> Self {
        PortalError::Network(format!("HTTP error during {context}: {status}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_mentions_context_and_code() {
        let err = PortalError::http_status("login", reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        let message = err.to_string();
        assert!(message.contains("login"));
        assert!(message.contains("500"));
    }

    #[test]
    fn variants_render_distinct_categories() {
        assert!(PortalError::Network("x".into()).to_string().starts_with("Network error"));
        assert!(PortalError::Authentication("x".into())
            .to_string()
            .starts_with("Authentication failed"));
        assert!(PortalError::LicenseRequest("x".into())
            .to_string()
            .starts_with("License request failed"));
    }
}
