//! HTTP client module for the TOBESOFT support portal.
//!
//! This module provides the `PortalSession` for the three-step license
//! workflow (homepage cookies, XML login, license email request) together
//! with the response classifier and the portal error taxonomy.

pub mod classify;
pub mod client;
pub mod error;

pub use classify::{classify_license, classify_login, ResponseClass};
pub use client::PortalSession;
pub use error::PortalError;
