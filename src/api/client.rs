//! HTTP session for the TOBESOFT support portal.
//!
//! One `PortalSession` owns one `reqwest::Client` with a cookie store, so the
//! cookies handed out by the homepage carry through the login POST and the
//! license GET. The session is scoped to a single workflow run; dropping it
//! releases the pooled connections on every exit path.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use quick_xml::escape::escape;
use reqwest::{header, Client};
use tracing::debug;

use crate::config::Config;

use super::classify::{classify_license, classify_login, ResponseClass};
use super::PortalError;

/// Browser User-Agent expected by the portal; requests without one are served
/// an error page.
const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Portal session covering the three-step license request workflow.
pub struct PortalSession {
    client: Client,
    config: Config,
}

impl PortalSession {
    /// Create a session for one workflow run.
    ///
    /// The timeout applies per HTTP call, not to the workflow as a whole.
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, config })
    }

    /// Retrieve initial session cookies from the portal homepage.
    ///
    /// Returns the cookies set by the response; they also land in the client's
    /// cookie store for the subsequent calls.
    pub async fn establish_session(&self) -> Result<HashMap<String, String>, PortalError> {
        let response = self
            .client
            .get(&self.config.homepage_url)
            .send()
            .await
            .map_err(|e| PortalError::network("session establishment", &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortalError::http_status("session establishment", status));
        }

        let cookies: HashMap<String, String> = response
            .cookies()
            .map(|c| (c.name().to_string(), c.value().to_string()))
            .collect();
        debug!(count = cookies.len(), "Homepage cookies received");
        Ok(cookies)
    }

    /// Authenticate against the portal with the Nexacro dataset XML POST.
    pub async fn login(&self) -> Result<(), PortalError> {
        let xml_body = self.build_login_xml();

        let response = self
            .client
            .post(&self.config.login_url)
            .header(header::CONTENT_TYPE, "text/xml; charset=UTF-8")
            .body(xml_body)
            .send()
            .await
            .map_err(|e| PortalError::network("login", &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortalError::http_status("login", status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PortalError::network("login", &e))?;
        debug!(bytes = body.len(), "Login response received");

        match classify_login(&body) {
            ResponseClass::Success => Ok(()),
            _ => Err(PortalError::Authentication(
                "Invalid credentials or response".to_string(),
            )),
        }
    }

    /// Submit the license email request via GET with query parameters.
    pub async fn request_license_email(&self) -> Result<(), PortalError> {
        let params = self.license_params();

        let response = self
            .client
            .get(&self.config.license_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| PortalError::network("license request", &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortalError::http_status("license request", status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PortalError::network("license request", &e))?;
        debug!(bytes = body.len(), "License response received");

        match classify_license(&body) {
            ResponseClass::Success => Ok(()),
            ResponseClass::Failure => Err(PortalError::LicenseRequest(
                "Rejected by portal".to_string(),
            )),
            ResponseClass::Unknown => Err(PortalError::LicenseRequest(
                "Unknown response".to_string(),
            )),
        }
    }

    /// Build the login POST body.
    ///
    /// The document shape is fixed by the portal (Nexacro dataset XML);
    /// credential values are XML-escaped before substitution so a password
    /// containing `&` or `<` cannot break the document.
    fn build_login_xml(&self) -> String {
        let user_id = escape(self.config.user_id.as_str());
        let user_pass = escape(self.config.user_pass.as_str());
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<Root xmlns="http://www.nexacroplatform.com/platform/dataset">
	<Parameters>
		<Parameter id="RTYPE">XML</Parameter>
		<Parameter id="DB">CS</Parameter>
		<Parameter id="DBUSER">POTAL_USER</Parameter>
	</Parameters>
	<Dataset id="input">
		<ColumnInfo>
			<Column id="userId" type="STRING" size="256" />
			<Column id="userPass" type="STRING" size="256" />
		</ColumnInfo>
		<Rows>
			<Row>
				<Col id="userId">{user_id}</Col>
				<Col id="userPass">{user_pass}</Col>
			</Row>
		</Rows>
	</Dataset>
</Root>"#
        )
    }

    /// Fixed query parameter set for the license request endpoint.
    fn license_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("service", "xupservice".to_string()),
            ("domain", "NEXTp".to_string()),
            ("model", "CE_LicenseEMailSend_R01".to_string()),
            ("format", "xml".to_string()),
            ("version", "xplatform".to_string()),
            ("p_ConType", "TECH2".to_string()),
            ("p_Product", "NP14".to_string()),
            ("p_Language", "KOR".to_string()),
            ("p_CustomID", self.config.customer_id.clone()),
            ("p_Email", self.config.email.clone()),
            ("p_Merge", "N".to_string()),
            ("zip", "false".to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> PortalSession {
        PortalSession::new(Config::new("test_user", "test_pass", "test@example.com")).unwrap()
    }

    #[test]
    fn login_xml_embeds_credentials() {
        let xml = session().build_login_xml();
        assert!(xml.contains(r#"<Col id="userId">test_user</Col>"#));
        assert!(xml.contains(r#"<Col id="userPass">test_pass</Col>"#));
        assert!(xml.contains(r#"xmlns="http://www.nexacroplatform.com/platform/dataset""#));
        assert!(xml.contains(r#"<Parameter id="DBUSER">POTAL_USER</Parameter>"#));
    }

    #[test]
    fn login_xml_escapes_markup_in_credentials() {
        let config = Config::new("a<b", r#"p&ss"word"#, "test@example.com");
        let xml = PortalSession::new(config).unwrap().build_login_xml();
        assert!(xml.contains("a&lt;b"));
        assert!(xml.contains("p&amp;ss&quot;word"));
        assert!(!xml.contains("a<b"));
    }

    #[test]
    fn license_params_cover_fixed_service_identifiers() {
        let params = session().license_params();
        let find = |key: &str| {
            params
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(find("service"), Some("xupservice"));
        assert_eq!(find("domain"), Some("NEXTp"));
        assert_eq!(find("model"), Some("CE_LicenseEMailSend_R01"));
        assert_eq!(find("format"), Some("xml"));
        assert_eq!(find("version"), Some("xplatform"));
        assert_eq!(find("p_ConType"), Some("TECH2"));
        assert_eq!(find("p_Product"), Some("NP14"));
        assert_eq!(find("p_Language"), Some("KOR"));
        assert_eq!(find("p_CustomID"), Some("test_user"));
        assert_eq!(find("p_Email"), Some("test@example.com"));
        assert_eq!(find("p_Merge"), Some("N"));
        assert_eq!(find("zip"), Some("false"));
        assert_eq!(params.len(), 12);
    }
}
