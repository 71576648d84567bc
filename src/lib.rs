//! # Mulescan
//!
//! **Mule configuration language support for code-scanning hosts.**
//!
//! Two independent pipelines, each a total function over its inputs:
//!
//! - **Entitlement verification**: asks the hosted billing endpoint whether
//!   an add-on is enabled for an organization. Failures never escape; they
//!   come back as a disabled [`EntitlementResult`] with a message.
//! - **Coverage ingestion**: reads an MUnit coverage report, sums processor
//!   counts per file, and publishes synthetic line hits to a
//!   [`CoverageSink`]. A missing or broken report is skipped.
//!
//! ## Quickstart
//!
//! ```no_run
//! use mulescan::{CoverageSensor, EntitlementVerifier, InMemoryCoverage, InputFile};
//! use std::collections::HashMap;
//! use std::path::Path;
//!
//! let mut settings = HashMap::new();
//! settings.insert("sonar.host.url".to_string(), "https://app.codescan.io".to_string());
//! settings.insert("sonar.organization".to_string(), "acme".to_string());
//!
//! let status = EntitlementVerifier::new(settings.clone()).verify_mulesoft();
//! if status.enabled {
//!     let sensor = CoverageSensor::from_settings(&settings);
//!     let mut sink = InMemoryCoverage::new();
//!     let files = [InputFile::new("src/main/mule/api.xml")];
//!     sensor.execute(Path::new("."), &files, &mut sink);
//! }
//! ```
//!
//! ## Configuration
//!
//! - `sonar.host.url`, `sonar.organization` — required for the license check
//! - `sonar.login`, `sonar.password` — optional Basic credentials
//! - `codescan.license_proxy` — proxy URL, used when no environment proxy is set
//! - `sonar.property.language` — `mule3` or `mule4` report schema
//!
//! See [`config`] and [`coverage::schema`] for details.

#![deny(missing_docs)]

// Core modules
pub mod config;
pub mod errors;
pub mod language;
pub mod logging;

// Protocol layer
pub mod protocol;

// Client layer
pub mod client;

// Entitlement verification (public API)
pub mod entitlement;

// Coverage ingestion
pub mod coverage;

// Re-exports for public API
pub use client::proxy::{ProxyEndpoint, ProxyEnvironment};
pub use config::{EntitlementConfig, Settings};
pub use coverage::counter::FlowCoverageCounter;
pub use coverage::publish::{CoverageSink, InMemoryCoverage, InputFile, LineHit};
pub use coverage::schema::{PropertySchema, SchemaVersion};
pub use coverage::sensor::CoverageSensor;
pub use entitlement::EntitlementVerifier;
pub use errors::MulescanError;
pub use language::MuleLanguage;
pub use protocol::models::EntitlementResult;
