//! # sapdm - Deployment Manager manifests for SAP DB2 on Windows
//!
//! sapdm turns a set of deployment properties (zone, sizing, image,
//! networking) into the resource manifest Google Cloud Deployment Manager
//! applies to provision a Windows Compute Engine instance running DB2 for SAP.
//!
//! Generation is a pure, synchronous transformation. Creating the resources,
//! ordering them and rolling back on failure is Deployment Manager's job; the
//! manifest only describes the desired state.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────┐    resolve()    ┌─────────────────────┐
//! │      RawContext      │ ──────────────▶ │  DeploymentContext  │
//! │ properties + env bag │   (validation)  │   (typed inputs)    │
//! └──────────────────────┘                 └─────────────────────┘
//!                                                     │ generate_config()
//!                                                     ▼
//!                                          ┌─────────────────────┐
//!                                          │      Manifest       │
//!                                          │ disks..., instance  │
//!                                          └─────────────────────┘
//! ```
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use sapdm::prelude::*;
//!
//! let raw = RawContext::from_file("db2srv1.yaml")?;
//! let manifest = generate(&raw, BoolCoercion::Literal, &TemplateOptions::default())?;
//! println!("{}", manifest.to_yaml()?);
//! ```

#![warn(clippy::all)]

// Re-export commonly used items in prelude
pub mod prelude {
    //! Convenient re-exports of commonly used types.

    pub use crate::compute::{Resource, ResourceType};
    pub use crate::context::{BoolCoercion, DeploymentContext, RawContext};
    pub use crate::error::{Error, Result};
    pub use crate::manifest::{generate, generate_config, Manifest, OutputFormat, TemplateOptions};
}

// ============================================================================
// Core Modules
// ============================================================================

/// Error types and result aliases for sapdm operations.
pub mod error;

/// Compute Engine resource URLs and typed resource descriptors.
pub mod compute;

/// Deployment context loading and validation.
///
/// Holds the raw `properties` and `env` namespaces and resolves them into a
/// typed [`DeploymentContext`](context::DeploymentContext), reporting every
/// missing required field at once.
pub mod context;

// ============================================================================
// Manifest Generation
// ============================================================================

/// Manifest generation and rendering.
///
/// The builder emits the DB2 volumes (DB2 home, temp, log, data, backup and
/// the optional SAP and pagefile volumes) as disk resources, then the
/// instance that attaches them behind an inline boot disk.
pub mod manifest;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration management for sapdm behavior.
///
/// Handles loading and merging configuration from multiple sources:
/// environment variables, config files, and command-line arguments.
pub mod config;

pub use manifest::generate;

/// Returns the current version of sapdm.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
