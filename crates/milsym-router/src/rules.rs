//! Routing rules.
//!
//! A [`MappingRule`] sends features with a given geometry kind and a SIDC
//! matching every one of its expressions to an output feature class.

use milsym_core::{ConfigError, GeometryKind};
use regex::Regex;
use std::fmt;

/// Sentinel returned when no rule applies.
pub const NOT_FOUND: &str = "NOT FOUND";

/// Geometry string returned for an unknown rule name.
pub const NO_GEOMETRY: &str = "None";

/// A single routing rule.
#[derive(Debug, Clone)]
pub struct MappingRule {
    /// Unique rule name
    pub name: String,
    /// Geometry kind this rule applies to
    pub geometry: GeometryKind,
    /// Target feature dataset (may be empty)
    pub dataset: String,
    /// Target feature class
    pub feature_class: String,
    expressions: Vec<Regex>,
}

impl MappingRule {
    /// Creates a rule, compiling its match expressions.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidExpression`] if an expression does not
    /// compile, or [`ConfigError::MissingField`] for an empty name.
    pub fn new<S: AsRef<str>>(
        name: impl Into<String>,
        geometry: GeometryKind,
        dataset: impl Into<String>,
        feature_class: impl Into<String>,
        expressions: &[S],
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigError::missing_field("rule.name"));
        }

        let expressions = expressions
            .iter()
            .map(|expr| {
                Regex::new(expr.as_ref()).map_err(|e| ConfigError::InvalidExpression {
                    rule: name.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name,
            geometry,
            dataset: dataset.into(),
            feature_class: feature_class.into(),
            expressions,
        })
    }

    /// Source text of each match expression, in table order.
    pub fn expressions(&self) -> impl Iterator<Item = &str> {
        self.expressions.iter().map(Regex::as_str)
    }

    /// Evaluates the rule against an already upper-cased SIDC.
    ///
    /// Expressions are unanchored searches and all of them must hit. A rule
    /// without expressions matches any code of its geometry.
    #[inline]
    pub fn matches(&self, sidc_upper: &str, geometry: GeometryKind) -> bool {
        self.geometry == geometry && self.expressions.iter().all(|re| re.is_match(sidc_upper))
    }
}

impl fmt::Display for MappingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} -> {}/{})",
            self.name, self.geometry, self.dataset, self.feature_class
        )
    }
}

/// Result of mapping a SIDC to a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolMapping {
    pub rule_name: String,
    pub dataset: String,
    pub feature_class: String,
}

impl SymbolMapping {
    /// Mapping with every value set to [`NOT_FOUND`].
    pub fn not_found() -> Self {
        Self {
            rule_name: NOT_FOUND.to_string(),
            dataset: NOT_FOUND.to_string(),
            feature_class: NOT_FOUND.to_string(),
        }
    }

    /// Returns true if a rule matched.
    pub fn is_found(&self) -> bool {
        self.rule_name != NOT_FOUND
    }
}

impl From<&MappingRule> for SymbolMapping {
    fn from(rule: &MappingRule) -> Self {
        Self {
            rule_name: rule.name.clone(),
            dataset: rule.dataset.clone(),
            feature_class: rule.feature_class.clone(),
        }
    }
}

/// Output feature class a rule name resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureTarget {
    pub dataset: String,
    pub feature_class: String,
    /// Rule geometry name, or [`NO_GEOMETRY`]
    pub geometry: String,
}

impl FeatureTarget {
    /// Target returned for an unknown rule name.
    pub fn not_found() -> Self {
        Self {
            dataset: NOT_FOUND.to_string(),
            feature_class: NOT_FOUND.to_string(),
            geometry: NO_GEOMETRY.to_string(),
        }
    }

    /// Parsed geometry kind, `None` for the sentinel.
    pub fn geometry_kind(&self) -> Option<GeometryKind> {
        match self.geometry.parse::<GeometryKind>() {
            Ok(GeometryKind::None) | Err(_) => None,
            Ok(kind) => Some(kind),
        }
    }
}
