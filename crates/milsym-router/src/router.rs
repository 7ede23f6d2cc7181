//! First-match routing table.
//!
//! Rules are kept in load order and scanned linearly. The first rule whose
//! geometry and expressions both match wins, so table order is significant.

use crate::rules::{FeatureTarget, MappingRule, SymbolMapping, NOT_FOUND};
use milsym_core::GeometryKind;
use std::collections::HashSet;
use tracing::{debug, trace, warn};

/// Ordered routing table.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<MappingRule>,
}

impl RuleTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder.
    pub fn builder() -> RuleTableBuilder {
        RuleTableBuilder::new()
    }

    /// Returns the first rule matching `sidc` and `geometry`.
    ///
    /// The code is upper-cased before matching. No SIDC validity check is
    /// made here.
    pub fn find(&self, sidc: &str, geometry: GeometryKind) -> Option<&MappingRule> {
        let upper = sidc.to_ascii_uppercase();

        let found = self.rules.iter().find(|rule| rule.matches(&upper, geometry));

        trace!(
            sidc = %sidc,
            geometry = %geometry,
            rule = found.map(|r| r.name.as_str()).unwrap_or(NOT_FOUND),
            "Rule lookup"
        );

        found
    }

    /// Returns the name of the first matching rule, or [`NOT_FOUND`].
    pub fn rule_name_from_symbol_id_and_geometry(
        &self,
        sidc: &str,
        geometry: GeometryKind,
    ) -> &str {
        self.find(sidc, geometry)
            .map(|rule| rule.name.as_str())
            .unwrap_or(NOT_FOUND)
    }

    /// Maps a SIDC and geometry to `(rule, dataset, class)`.
    pub fn map_symbol_id(&self, sidc: &str, geometry: GeometryKind) -> SymbolMapping {
        self.find(sidc, geometry)
            .map(SymbolMapping::from)
            .unwrap_or_else(SymbolMapping::not_found)
    }

    /// Looks up the output target of a rule by exact name.
    pub fn map_rule_name_to_feature_type(&self, rule_name: &str) -> FeatureTarget {
        match self.get(rule_name) {
            Some(rule) => FeatureTarget {
                dataset: rule.dataset.clone(),
                feature_class: rule.feature_class.clone(),
                geometry: rule.geometry.as_str().to_string(),
            },
            None => FeatureTarget::not_found(),
        }
    }

    /// Get a rule by exact name
    pub fn get(&self, rule_name: &str) -> Option<&MappingRule> {
        self.rules.iter().find(|rule| rule.name == rule_name)
    }

    /// Rules in table order
    pub fn rules(&self) -> &[MappingRule] {
        &self.rules
    }

    /// Get number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Builder for constructing rule tables
#[derive(Debug, Default)]
pub struct RuleTableBuilder {
    rules: Vec<MappingRule>,
}

impl RuleTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule after all rules added so far
    pub fn add_rule(mut self, rule: MappingRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Build the rule table.
    ///
    /// Rules may share a name. Name lookups resolve to the first of them.
    pub fn build(self) -> RuleTable {
        let mut seen = HashSet::new();
        for rule in &self.rules {
            if !seen.insert(rule.name.as_str()) {
                warn!(rule = %rule.name, "Duplicate rule name, lookups by name use the first rule");
            }
        }

        debug!(rule_count = self.rules.len(), "Rule table built");

        RuleTable { rules: self.rules }
    }
}
