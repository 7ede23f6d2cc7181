//! Rule table and field alias configuration.
//!
//! Both files load from XML (the `MappingRules` / `FieldMapping` documents
//! shipped with existing military feature templates) or from YAML, chosen
//! by file extension:
//!
//! ```yaml
//! rules:
//!   - name: Friendly Units
//!     geometry: Point
//!     dataset: Military
//!     class: Units
//!     match: ["^S[FAMD]G"]
//! ```
//!
//! ```yaml
//! fields:
//!   - input: Name
//!     output: uniquedesignation
//! ```

use crate::router::{RuleTable, RuleTableBuilder};
use crate::rules::MappingRule;
use milsym_core::{ConfigError, GeometryKind, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Serialized form of a rule file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Xml,
    Yaml,
}

impl FileFormat {
    /// Picks the format from the file extension. Anything that is not YAML is
    /// read as XML.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            _ => FileFormat::Xml,
        }
    }
}

/// Rule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Unique rule name
    pub name: String,
    /// Point, Line or Area
    pub geometry: String,
    /// Output feature dataset
    #[serde(default)]
    pub dataset: String,
    /// Output feature class
    #[serde(rename = "class")]
    pub feature_class: String,
    /// Expressions that must all match the upper-cased SIDC
    #[serde(rename = "match", default)]
    pub expressions: Vec<String>,
}

impl RuleConfig {
    /// Convert to a MappingRule
    pub fn into_rule(self) -> Result<MappingRule> {
        let geometry = self
            .geometry
            .parse::<GeometryKind>()
            .map_err(|reason| ConfigError::invalid_value(format!("{}.geometry", self.name), reason))?;

        Ok(MappingRule::new(
            self.name,
            geometry,
            self.dataset,
            self.feature_class,
            &self.expressions,
        )?)
    }
}

/// Complete rule table configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Rules in match order
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl RulesConfig {
    /// Load a rule table file, XML or YAML by extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileNotFound`] if the file is missing, or a
    /// format error if it cannot be parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = read_config_file(path)?;

        let config = match FileFormat::from_path(path) {
            FileFormat::Yaml => Self::from_yaml(&contents)?,
            FileFormat::Xml => Self::from_xml(&contents)?,
        };

        info!(
            path = %path.display(),
            rule_count = config.rules.len(),
            "Loaded rule table configuration"
        );

        Ok(config)
    }

    /// Parse the YAML form.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| {
            ConfigError::InvalidFormat {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Parse the `MappingRules` XML document.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let doc: XmlMappingRules = quick_xml::de::from_str(xml).map_err(|e| ConfigError::InvalidFormat {
            reason: e.to_string(),
        })?;

        Ok(Self {
            rules: doc.rules.into_iter().map(RuleConfig::from).collect(),
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for rule in &self.rules {
            if rule.name.trim().is_empty() {
                return Err(ConfigError::missing_field("rule.name").into());
            }
            if !seen.insert(rule.name.as_str()) {
                warn!(rule = %rule.name, "Duplicate rule name in rule table");
            }
            if rule.feature_class.trim().is_empty() {
                warn!(rule = %rule.name, "Rule has no output feature class");
            }
        }
        Ok(())
    }

    /// Convert to a RuleTable, preserving rule order
    pub fn into_rule_table(self) -> Result<RuleTable> {
        self.validate()?;

        let mut builder = RuleTableBuilder::new();
        for rule_config in self.rules {
            builder = builder.add_rule(rule_config.into_rule()?);
        }

        Ok(builder.build())
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let yaml = serde_yaml::to_string(self).map_err(|e| ConfigError::InvalidFormat {
            reason: e.to_string(),
        })?;

        fs::write(path, yaml)?;

        info!(path = %path.display(), "Saved rule table configuration");

        Ok(())
    }
}

/// Loads and compiles a rule table file.
pub fn load_rule_table<P: AsRef<Path>>(path: P) -> Result<RuleTable> {
    RulesConfig::from_file(path)?.into_rule_table()
}

#[derive(Debug, Deserialize)]
struct XmlMappingRules {
    #[serde(rename = "MappingRule", default)]
    rules: Vec<XmlMappingRule>,
}

#[derive(Debug, Deserialize)]
struct XmlMappingRule {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "GeometryType")]
    geometry: String,
    #[serde(rename = "FeatureDataSet", default)]
    dataset: String,
    #[serde(rename = "FeatureClass", default)]
    feature_class: String,
    #[serde(rename = "MatchingExpressions", default)]
    expressions: XmlExpressions,
}

#[derive(Debug, Default, Deserialize)]
struct XmlExpressions {
    #[serde(rename = "string", default)]
    items: Vec<String>,
}

impl From<XmlMappingRule> for RuleConfig {
    fn from(rule: XmlMappingRule) -> Self {
        Self {
            name: rule.name,
            geometry: rule.geometry,
            dataset: rule.dataset,
            feature_class: rule.feature_class,
            expressions: rule.expressions.items,
        }
    }
}

/// Input field name to output field name aliases.
///
/// Applied to every output class. Lookup is by exact input name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldAliases {
    aliases: HashMap<String, String>,
}

/// Alias used when no field mapping file is available.
pub const BUILTIN_ALIASES: &[(&str, &str)] = &[("Name", "uniquedesignation")];

impl FieldAliases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in aliases.
    pub fn builtin() -> Self {
        BUILTIN_ALIASES
            .iter()
            .map(|(input, output)| (input.to_string(), output.to_string()))
            .collect()
    }

    /// Loads an alias file, falling back to [`FieldAliases::builtin`] when
    /// no path is given or the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "Using field mapping file");
                Self::from_file(path)
            }
            _ => {
                info!("No field mapping file, using built-in aliases");
                Ok(Self::builtin())
            }
        }
    }

    /// Loads an alias file, XML or YAML by extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = read_config_file(path)?;

        match FileFormat::from_path(path) {
            FileFormat::Yaml => Self::from_yaml(&contents),
            FileFormat::Xml => Self::from_xml(&contents),
        }
    }

    /// Parse the YAML form.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let doc: YamlFieldMapping = serde_yaml::from_str(yaml).map_err(|e| ConfigError::InvalidFormat {
            reason: e.to_string(),
        })?;

        Ok(doc
            .fields
            .into_iter()
            .map(|field| (field.input, field.output))
            .collect())
    }

    /// Parse the `FieldMapping` XML document.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let doc: XmlFieldMapping = quick_xml::de::from_str(xml).map_err(|e| ConfigError::InvalidFormat {
            reason: e.to_string(),
        })?;

        Ok(doc
            .fields
            .into_iter()
            .map(|field| (field.input, field.output))
            .collect())
    }

    /// Output field for an input field, if aliased.
    pub fn get(&self, input: &str) -> Option<&str> {
        self.aliases.get(input).map(String::as_str)
    }

    /// Adds or replaces an alias.
    pub fn insert(&mut self, input: impl Into<String>, output: impl Into<String>) {
        self.aliases.insert(input.into(), output.into());
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl FromIterator<(String, String)> for FieldAliases {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut aliases = FieldAliases::new();
        // Later entries replace earlier ones
        for (input, output) in iter {
            aliases.insert(input, output);
        }
        aliases
    }
}

#[derive(Debug, Deserialize)]
struct YamlFieldMapping {
    #[serde(default)]
    fields: Vec<YamlField>,
}

#[derive(Debug, Deserialize)]
struct YamlField {
    input: String,
    output: String,
}

#[derive(Debug, Deserialize)]
struct XmlFieldMapping {
    #[serde(rename = "Field", default)]
    fields: Vec<XmlField>,
}

#[derive(Debug, Deserialize)]
struct XmlField {
    #[serde(rename = "InputName")]
    input: String,
    #[serde(rename = "OutputName")]
    output: String,
}

fn read_config_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ConfigError::file_not_found(path.display().to_string()).into());
    }
    fs::read_to_string(path)
        .map_err(|e| ConfigError::load_failed(path.display().to_string(), e.to_string()).into())
}
