//! SIDC to feature class routing.
//!
//! Routes each feature to an output feature class using an ordered rule
//! table keyed by SIDC pattern and geometry kind. The first matching rule
//! wins.
//!
//! # Examples
//!
//! ```rust
//! use milsym_core::GeometryKind;
//! use milsym_router::{MappingRule, RuleTable, NOT_FOUND};
//!
//! let table = RuleTable::builder()
//!     .add_rule(MappingRule::new("R1", GeometryKind::Point, "Military", "Units", &["^S.*"]).unwrap())
//!     .build();
//!
//! assert_eq!(table.rule_name_from_symbol_id_and_geometry("SFGPUCI---AAUSG", GeometryKind::Point), "R1");
//! assert_eq!(table.rule_name_from_symbol_id_and_geometry("SFGPUCI---AAUSG", GeometryKind::Line), NOT_FOUND);
//! ```

pub mod config;
pub mod router;
pub mod rules;

pub use config::{load_rule_table, FieldAliases, FileFormat, RuleConfig, RulesConfig};
pub use router::{RuleTable, RuleTableBuilder};
pub use rules::{FeatureTarget, MappingRule, SymbolMapping, NOT_FOUND, NO_GEOMETRY};
