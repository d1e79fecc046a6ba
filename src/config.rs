//! Application configuration management.
//!
//! Credentials are read from `NEXACRO_USER_ID`, `NEXACRO_USER_PASS`, and
//! `NEXACRO_EMAIL` environment variables (a `.env` file is honored by the
//! binary). URLs and timeouts default to the TOBESOFT production portal and
//! are only overridden in tests.

use thiserror::Error;

/// Environment variables that must be present before any network activity.
const REQUIRED_ENV_VARS: [&str; 3] = ["NEXACRO_USER_ID", "NEXACRO_USER_PASS", "NEXACRO_EMAIL"];

/// TOBESOFT support portal homepage, visited first to pick up session cookies.
const DEFAULT_HOMEPAGE_URL: &str = "https://support.tobesoft.co.kr/Support/?menu=home";

/// Login endpoint accepting the Nexacro dataset XML POST.
const DEFAULT_LOGIN_URL: &str =
    "https://support.tobesoft.co.kr/Next_JSP/CS-Homepage/Next_JSP/Login/Login_new.jsp";

/// Front controller servlet handling the license email request.
const DEFAULT_LICENSE_URL: &str = "https://next.tobesoft.com/FrontControllerServlet.do";

/// HTTP request timeout in seconds. Applies per call, not per workflow.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configured retry ceiling. No step currently retries; the value is carried
/// for parity with the portal tooling it replaces.
const DEFAULT_MAX_RETRIES: u32 = 3;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingEnv(Vec<String>),

    #[error("Invalid email format: {0}")]
    InvalidEmail(String),
}

/// Immutable configuration for a license request run.
///
/// Constructed once at process start and read-only thereafter.
#[derive(Debug, Clone)]
pub struct Config {
    pub user_id: String,
    pub user_pass: String,
    /// Customer identifier submitted with the license request.
    /// Defaults to `user_id` when not independently supplied.
    pub customer_id: String,
    pub email: String,

    pub homepage_url: String,
    pub login_url: String,
    pub license_url: String,

    /// Per-call HTTP timeout in seconds.
    pub request_timeout: u64,
    /// Maximum retry attempts. Read from defaults but applied by no step.
    pub max_retries: u32,
}

impl Config {
    /// Build a configuration with portal defaults for URLs and timeouts.
    pub fn new(
        user_id: impl Into<String>,
        user_pass: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        let user_id = user_id.into();
        Self {
            customer_id: user_id.clone(),
            user_id,
            user_pass: user_pass.into(),
            email: email.into(),
            homepage_url: DEFAULT_HOMEPAGE_URL.to_string(),
            login_url: DEFAULT_LOGIN_URL.to_string(),
            license_url: DEFAULT_LICENSE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A variable that is unset or set to the empty string counts as missing.
    /// The error names every missing variable, not just the first.
    pub fn from_env() -> Result<Self, ConfigError> {
        let missing: Vec<String> = REQUIRED_ENV_VARS
            .iter()
            .filter(|var| std::env::var(var).map(|v| v.is_empty()).unwrap_or(true))
            .map(|var| var.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingEnv(missing));
        }

        // Infallible after the missing check above.
        let get = |var: &str| std::env::var(var).unwrap_or_default();
        Ok(Self::new(
            get("NEXACRO_USER_ID"),
            get("NEXACRO_USER_PASS"),
            get("NEXACRO_EMAIL"),
        ))
    }

    /// Validate configured values. Only the email has a format requirement.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.email.is_empty() || !self.email.contains('@') {
            return Err(ConfigError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }
}
