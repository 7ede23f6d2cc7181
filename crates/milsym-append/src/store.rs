//! Feature store contract.
//!
//! The appender reads input features and writes output features through
//! [`FeatureStore`]. Field names are matched case-insensitively, the way
//! geodatabase schemas resolve them.

use chrono::{DateTime, Utc};
use milsym_core::{Result, ShapeType};
use milsym_sidc::SymbolComposition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a stored feature, unique within its class.
pub type FeatureId = u64;

/// Marker size applied to newly created representation rules.
pub const DEFAULT_MARKER_SIZE: f64 = 32.0;

/// Storage type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Oid,
    Geometry,
    String,
    Integer,
    Double,
    Date,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Oid => "oid",
            FieldType::Geometry => "geometry",
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Double => "double",
            FieldType::Date => "date",
        };
        f.write_str(name)
    }
}

/// Schema entry for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default = "default_editable")]
    pub editable: bool,
    /// Maximum length of string values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

fn default_editable() -> bool {
    true
}

impl FieldDef {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            editable: true,
            max_length: None,
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }
}

/// A field value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Integer(i64),
    Double(f64),
    Date(DateTime<Utc>),
    String(String),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Null, or a string of length zero.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Text form used when comparing against previously written values.
    /// Null renders as an empty string.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Integer(v) => v.to_string(),
            FieldValue::Double(v) => v.to_string(),
            FieldValue::Date(v) => v.to_rfc3339(),
            FieldValue::String(s) => s.clone(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Double(v)
    }
}

/// Feature geometry as a list of vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub shape: ShapeType,
    #[serde(default)]
    pub points: Vec<[f64; 2]>,
}

impl Geometry {
    pub fn point(x: f64, y: f64) -> Self {
        Self {
            shape: ShapeType::Point,
            points: vec![[x, y]],
        }
    }

    pub fn new(shape: ShapeType, points: Vec<[f64; 2]>) -> Self {
        Self { shape, points }
    }
}

/// A stored feature or a record about to be inserted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Assigned by the store on insert
    #[serde(default)]
    pub id: FeatureId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub values: BTreeMap<String, FieldValue>,
}

static NULL: FieldValue = FieldValue::Null;

impl Feature {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_value(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.set(field, value.into());
        self
    }

    /// Value of a field, Null if absent.
    pub fn get(&self, field: &str) -> &FieldValue {
        self.values
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(field))
            .map(|(_, value)| value)
            .unwrap_or(&NULL)
    }

    /// Sets a field, replacing any value stored under the same name in a
    /// different case.
    pub fn set(&mut self, field: &str, value: FieldValue) {
        let key = self
            .values
            .keys()
            .find(|name| name.eq_ignore_ascii_case(field))
            .cloned()
            .unwrap_or_else(|| field.to_string());
        self.values.insert(key, value);
    }
}

/// Schema of a feature class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub name: String,
    #[serde(default)]
    pub dataset: String,
    pub shape_type: ShapeType,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

impl ClassInfo {
    /// Case-insensitive field lookup.
    pub fn find_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(name))
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.find_field(name).is_some()
    }

    /// First of `names` present in the schema.
    pub fn first_field<'a>(&'a self, names: &[&str]) -> Option<&'a FieldDef> {
        names.iter().find_map(|name| self.find_field(name))
    }
}

/// Reference to a feature class inside a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassHandle {
    pub dataset: String,
    pub name: String,
}

impl ClassHandle {
    pub fn new(dataset: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ClassHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dataset.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}/{}", self.dataset, self.name)
        }
    }
}

/// Named rendering rule attached to an output feature class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepresentationRule {
    pub id: i32,
    pub name: String,
    pub symbol: SymbolComposition,
    #[serde(default = "default_marker_size")]
    pub marker_size: f64,
}

fn default_marker_size() -> f64 {
    DEFAULT_MARKER_SIZE
}

/// Readable and editable feature storage.
///
/// Writes must be bracketed by [`FeatureStore::begin_edit`] and
/// [`FeatureStore::end_edit`]; use [`crate::EditSession`] rather than calling
/// them directly.
pub trait FeatureStore {
    /// Store description for logs
    fn describe(&self) -> String;

    /// Opens a class by dataset and class name. An empty dataset matches a
    /// class in any dataset.
    fn open_feature_class(&self, dataset: &str, class: &str) -> Option<ClassHandle>;

    /// Opens a class by `class` or `dataset/class`.
    fn find_feature_class(&self, full_name: &str) -> Option<ClassHandle> {
        match full_name.split_once(['/', '\\']) {
            Some((dataset, class)) => self.open_feature_class(dataset, class),
            None => self.open_feature_class("", full_name),
        }
    }

    fn class_info(&self, class: &ClassHandle) -> Result<ClassInfo>;

    /// Single-pass read of every feature in store order.
    fn read_all<'a>(&'a self, class: &ClassHandle)
        -> Result<Box<dyn Iterator<Item = Feature> + 'a>>;

    /// Whether an exclusive schema lock could be taken now.
    fn schema_lock_available(&self, class: &ClassHandle) -> bool;

    fn begin_edit(&mut self) -> Result<()>;

    /// Ends the edit, keeping the changes if `commit` is set.
    fn end_edit(&mut self, commit: bool) -> Result<()>;

    /// Inserts a record, returning its assigned id.
    fn insert(&mut self, class: &ClassHandle, record: Feature) -> Result<FeatureId>;

    /// Replaces a stored feature with the same id.
    fn update_in_place(&mut self, class: &ClassHandle, feature: &Feature) -> Result<()>;

    fn representation_rules(&self, class: &ClassHandle) -> Result<Vec<RepresentationRule>>;

    /// Rewrites the whole representation rule table of a class.
    fn set_representation_rules(
        &mut self,
        class: &ClassHandle,
        rules: Vec<RepresentationRule>,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_case_insensitive_fields() {
        let mut feature = Feature::new().with_value("Symbol_ID", "SFGPUCI---AAUSG");

        assert_eq!(feature.get("symbol_id").as_str(), Some("SFGPUCI---AAUSG"));
        assert!(feature.get("missing").is_null());

        feature.set("SYMBOL_ID", FieldValue::from("SHGPUCI---AAUSG"));
        assert_eq!(feature.values.len(), 1);
        assert_eq!(feature.get("Symbol_ID").as_str(), Some("SHGPUCI---AAUSG"));
    }

    #[test]
    fn test_field_value_emptiness() {
        assert!(FieldValue::Null.is_empty());
        assert!(FieldValue::from("").is_empty());
        assert!(!FieldValue::from("A").is_empty());
        assert!(!FieldValue::Integer(0).is_empty());
        assert_eq!(FieldValue::Null.to_text(), "");
        assert_eq!(FieldValue::Integer(11).to_text(), "11");
    }

    #[test]
    fn test_field_value_json() {
        let values: Vec<FieldValue> =
            serde_json::from_str(r#"[null, 4, 2.5, "2024-03-01T12:00:00Z", "Alpha"]"#).unwrap();

        assert_eq!(values[0], FieldValue::Null);
        assert_eq!(values[1], FieldValue::Integer(4));
        assert_eq!(values[2], FieldValue::Double(2.5));
        assert!(matches!(values[3], FieldValue::Date(_)));
        assert_eq!(values[4], FieldValue::from("Alpha"));
    }

    #[test]
    fn test_class_info_lookup() {
        let info = ClassInfo {
            name: "Units".into(),
            dataset: "Military".into(),
            shape_type: ShapeType::Point,
            fields: vec![
                FieldDef::new("OBJECTID", FieldType::Oid),
                FieldDef::new("SymbolRule", FieldType::Integer),
            ],
        };

        assert!(info.has_field("objectid"));
        assert_eq!(
            info.first_field(&["ruleid", "symbolrule"]).map(|f| f.name.as_str()),
            Some("SymbolRule")
        );
        assert!(info.first_field(&["sic", "sidc"]).is_none());
    }

    #[test]
    fn test_class_handle_display() {
        assert_eq!(ClassHandle::new("Military", "Units").to_string(), "Military/Units");
        assert_eq!(ClassHandle::new("", "Units").to_string(), "Units");
    }
}
