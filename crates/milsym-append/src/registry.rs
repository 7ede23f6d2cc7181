//! Representation rule registry.
//!
//! Maps canonical symbol names to the integer rule ids stored on output
//! features. New rules are appended in memory and only reach the store when
//! the registry is flushed, so callers must [`RuleRegistry::flush`] before
//! committing the edit.

use crate::store::{ClassHandle, FeatureStore, RepresentationRule, DEFAULT_MARKER_SIZE};
use milsym_core::Result;
use milsym_sidc::SymbolComposition;
use tracing::{debug, info};

/// Returned when no rule exists or none could be created.
pub const NO_RULE: i32 = -1;

/// Representation rules of one output feature class.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: Vec<RepresentationRule>,
    added: usize,
    dirty: bool,
}

impl RuleRegistry {
    pub fn new(rules: Vec<RepresentationRule>) -> Self {
        Self {
            rules,
            added: 0,
            dirty: false,
        }
    }

    /// Loads the rule table of `class`.
    pub fn load<S: FeatureStore + ?Sized>(store: &S, class: &ClassHandle) -> Result<Self> {
        Ok(Self::new(store.representation_rules(class)?))
    }

    /// Id of the first rule named `name`, or [`NO_RULE`].
    pub fn get_rule_id(&self, name: &str) -> i32 {
        if name.is_empty() {
            return NO_RULE;
        }

        match self.rules.iter().find(|rule| rule.name == name) {
            Some(rule) => rule.id,
            None => {
                debug!(name = %name, "Existing rule not found");
                NO_RULE
            }
        }
    }

    /// Appends a rule for `name` drawing `symbol`.
    ///
    /// Returns [`NO_RULE`] if the name is empty or there is no symbol.
    pub fn add_rule_id(&mut self, name: &str, symbol: Option<SymbolComposition>) -> i32 {
        if name.is_empty() {
            return NO_RULE;
        }
        let Some(symbol) = symbol else {
            return NO_RULE;
        };

        let id = self.rules.iter().map(|rule| rule.id).max().unwrap_or(0) + 1;
        self.rules.push(RepresentationRule {
            id,
            name: name.to_string(),
            symbol,
            marker_size: DEFAULT_MARKER_SIZE,
        });
        self.added += 1;
        self.dirty = true;

        info!(name = %name, rule_id = id, "Added representation rule");
        id
    }

    /// Existing id for `name`, otherwise a newly created one.
    ///
    /// `symbol` is only called when a rule has to be created.
    pub fn resolve_or_create<F>(&mut self, name: &str, symbol: F) -> i32
    where
        F: FnOnce() -> Option<SymbolComposition>,
    {
        match self.get_rule_id(name) {
            NO_RULE => self.add_rule_id(name, symbol()),
            id => id,
        }
    }

    /// True if rules were added since the last flush.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of rules added through this registry.
    pub fn added(&self) -> usize {
        self.added
    }

    pub fn rules(&self) -> &[RepresentationRule] {
        &self.rules
    }

    /// Writes the rule table back if it changed. Returns whether a write
    /// happened.
    pub fn flush<S: FeatureStore + ?Sized>(
        &mut self,
        store: &mut S,
        class: &ClassHandle,
    ) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }

        store.set_representation_rules(class, self.rules.clone())?;
        self.dirty = false;
        Ok(true)
    }
}
