//! Automates license email requests against the TOBESOFT support portal.
//!
//! The workflow is a fixed three-step sequence over one cookie-carrying HTTP
//! session: fetch the homepage to establish cookies, authenticate with a
//! Nexacro dataset XML POST, then submit the license request with a fixed set
//! of query parameters.

pub mod api;
pub mod config;
pub mod requester;

pub use api::{PortalError, PortalSession};
pub use config::{Config, ConfigError};
pub use requester::{LicenseRequester, RequestOutcome};
