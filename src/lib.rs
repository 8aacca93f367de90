//! # Aruba AirWave XML API Client
//!
//! An async Rust client library for the Aruba AirWave network
//! management platform's XML API.
//!
//! The library covers the appliance's read-side XML surface: access
//! point inventory and detail, wireless client and rogue device detail,
//! report listings, and RRD graph URL composition. Responses come back
//! raw for the caller to inspect, with ordered XML adapters for the
//! access point endpoints.
//!
//! ## Features
//!
//! - **Session-based auth**: logs in to `/LOGIN` with the credential
//!   form and carries the session cookie across requests
//! - **Async**: built on tokio and reqwest for async/await support
//! - **Reproducible URLs**: parameters encode in a canonical sorted
//!   order, so generated URLs are stable byte-for-byte
//! - **Order-preserving XML adapters**: access point fields stay in
//!   document order, the way the appliance presents them
//! - **Error handling**: typed errors for transport, parse, state, and
//!   authentication failures
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use airwave_xml::{AirWaveClient, ApList};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = AirWaveClient::new("192.168.0.100", "admin", "password")?;
//!
//!     // Establish a session; inspect the response on rejection
//!     let login = client.login().await?;
//!     if !login.is_success() {
//!         eprintln!("login rejected with status {}", login.status);
//!         return Ok(());
//!     }
//!
//!     // Fetch and parse the access point inventory
//!     let response = client.ap_list(&[]).await?;
//!     let inventory = ApList::parse(&response.body)?;
//!     for ap in &inventory {
//!         println!("{}: {}", ap.id, ap.name().unwrap_or("(unnamed)"));
//!     }
//!
//!     client.logout()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Authentication
//!
//! You need an AirWave account with API access on the target appliance.
//! Appliances on internal networks often serve self-signed TLS
//! certificates; certificate verification stays enabled unless you opt
//! out via [`AirWaveClientConfig::accept_invalid_certs`].

pub mod ap;
pub mod client;
pub mod error;
pub mod query;
pub mod types;

pub use ap::{ApDetail, ApEntry, ApList, Fields, SearchKey, Value};
pub use client::{AirWaveClient, AirWaveClientConfig};
pub use error::{AirWaveError, Result};
pub use query::QueryParams;
pub use types::{ApGraphParams, ApiRequest, ApiResponse, GraphType, RadioGraphParams};

/// Default user agent string for requests
pub const DEFAULT_USER_AGENT: &str = concat!("airwave-xml-rs/", env!("CARGO_PKG_VERSION"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert!(DEFAULT_USER_AGENT.contains("airwave-xml-rs"));
    }
}
