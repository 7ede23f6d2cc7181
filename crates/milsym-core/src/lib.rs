//! # Milsym Core
//!
//! Core types, error handling, and configuration shared by the milsym crates.
//!
//! - **Types**: geometry kinds used by the rule table and the shape types a
//!   feature store reports.
//! - **Errors**: the run-level error taxonomy with stable exit codes, plus
//!   per-feature errors that are logged and skipped.
//! - **Configuration**: YAML configuration with environment overrides and
//!   validation.
//!
//! ## Example
//!
//! ```
//! use milsym_core::types::{GeometryKind, ShapeType};
//!
//! assert_eq!(ShapeType::Polyline.geometry_kind(), GeometryKind::Line);
//! assert_eq!("Area".parse::<GeometryKind>().unwrap(), GeometryKind::Area);
//! ```

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types for convenience
pub use config::{AppConfig, BackfillPolicy};
pub use error::{ConfigError, FeatureError, MilsymError, Result, RunError, StoreError};
pub use types::{GeometryKind, ShapeType};
