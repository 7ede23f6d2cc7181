//! Military feature append.
//!
//! Copies SIDC-tagged features from an input feature class into the output
//! feature classes picked by a routing rule table, and assigns each output
//! feature the representation rule for its canonical symbol name.
//!
//! - [`FeatureStore`] is the storage contract, with [`MemoryWorkspace`] as a
//!   JSON-backed implementation
//! - [`EditSession`] brackets all writes to a store
//! - [`RuleRegistry`] resolves or creates representation rules
//! - [`MilitaryFeatureAppender`] runs `append` and `calc-rep-rules`

pub mod appender;
pub mod backfill;
pub mod mapping;
pub mod memory;
pub mod registry;
pub mod session;
pub mod store;

pub use appender::{
    AppendSummary, CalcSummary, Candidate, MatchedRules, MilitaryFeatureAppender, RuleSummary,
};
pub use backfill::{Backfill, BackfillState};
pub use mapping::FieldMapping;
pub use memory::{MemoryWorkspace, StoredClass};
pub use registry::{RuleRegistry, NO_RULE};
pub use session::EditSession;
pub use store::{
    ClassHandle, ClassInfo, Feature, FeatureId, FeatureStore, FieldDef, FieldType, FieldValue,
    Geometry, RepresentationRule,
};
