//! Input to output field mapping.
//!
//! Built once per output feature class. Each input attribute field maps to
//! the output field of the same name, or to its configured alias, when that
//! output field exists with the same type. The input SIDC field maps to the
//! output's `sic` field, or `sidc` when there is no `sic`.

use crate::store::{ClassInfo, Feature, FieldType};
use milsym_core::FeatureError;
use milsym_router::FieldAliases;
use tracing::{debug, warn};

/// Output SIDC field names, in lookup order.
pub const SIDC_FIELD_NAMES: [&str; 2] = ["sic", "sidc"];

/// Output representation rule field names, in lookup order.
pub const RULE_FIELD_NAMES: [&str; 2] = ["ruleid", "symbolrule"];

pub const UNIQUE_DESIGNATION_FIELD: &str = "uniquedesignation";
pub const ECHELON_FIELD: &str = "echelon";
pub const COUNTRY_CODE_FIELD: &str = "countrycode";

/// Ordered `(output, input)` field pairs for one output class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMapping {
    pairs: Vec<(String, String)>,
}

impl FieldMapping {
    /// Builds the mapping from `input` to `output`.
    ///
    /// Object id and geometry fields and `SHAPE_*` fields are never
    /// mapped. The first input field to claim an output field keeps it.
    pub fn build(
        input: &ClassInfo,
        output: &ClassInfo,
        sidc_field: &str,
        aliases: &FieldAliases,
    ) -> Self {
        let mut pairs: Vec<(String, String)> = Vec::new();

        for input_field in &input.fields {
            if matches!(input_field.field_type, FieldType::Oid | FieldType::Geometry)
                || input_field.name.to_ascii_uppercase().starts_with("SHAPE_")
            {
                continue;
            }

            let input_name = input_field.name.as_str();
            let target_name = if input_name.eq_ignore_ascii_case(sidc_field) {
                match output.first_field(&SIDC_FIELD_NAMES) {
                    Some(field) => field.name.as_str(),
                    None => {
                        warn!(class = %output.name, "Could not find SIDC field in output");
                        input_name
                    }
                }
            } else {
                aliases.get(input_name).unwrap_or(input_name)
            };

            let Some(output_field) = output.find_field(target_name) else {
                continue;
            };

            if pairs
                .iter()
                .any(|(out, _)| out.eq_ignore_ascii_case(&output_field.name))
            {
                continue;
            }

            if input_field.field_type == output_field.field_type {
                debug!(
                    input = %input_name,
                    output = %output_field.name,
                    "Mapping input field"
                );
                pairs.push((output_field.name.clone(), input_name.to_string()));
            } else {
                let err = FeatureError::FieldTypeMismatch {
                    field: input_name.to_string(),
                    input_type: input_field.field_type.to_string(),
                    output_type: output_field.field_type.to_string(),
                };
                warn!(error = %err, "Failed to map field");
            }
        }

        Self { pairs }
    }

    /// Copies mapped values from `source` into `target`.
    ///
    /// Null and empty string source values leave the target untouched, as do
    /// read-only output fields.
    pub fn apply(&self, source: &Feature, target: &mut Feature, output: &ClassInfo) {
        for (output_name, input_name) in &self.pairs {
            let value = source.get(input_name);
            if value.is_empty() {
                continue;
            }

            match output.find_field(output_name) {
                Some(field) if field.editable => target.set(&field.name, value.clone()),
                Some(field) => debug!(field = %field.name, "Field not editable"),
                None => {}
            }
        }
    }

    /// `(output, input)` pairs in input field order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Input field mapped to `output`, if any.
    pub fn input_for(&self, output: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(out, _)| out.eq_ignore_ascii_case(output))
            .map(|(_, input)| input.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FieldDef, FieldValue};
    use milsym_core::ShapeType;

    fn input_class() -> ClassInfo {
        ClassInfo {
            name: "Input".into(),
            dataset: String::new(),
            shape_type: ShapeType::Point,
            fields: vec![
                FieldDef::new("OBJECTID", FieldType::Oid),
                FieldDef::new("Shape", FieldType::Geometry),
                FieldDef::new("Shape_Length", FieldType::Double),
                FieldDef::new("Symbol_ID", FieldType::String),
                FieldDef::new("Name", FieldType::String),
                FieldDef::new("Strength", FieldType::String),
                FieldDef::new("comment", FieldType::String),
            ],
        }
    }

    fn output_class(sidc_name: &str) -> ClassInfo {
        ClassInfo {
            name: "Units".into(),
            dataset: "Military".into(),
            shape_type: ShapeType::Point,
            fields: vec![
                FieldDef::new("OBJECTID", FieldType::Oid),
                FieldDef::new("Shape_Length", FieldType::Double),
                FieldDef::new(sidc_name, FieldType::String),
                FieldDef::new("uniquedesignation", FieldType::String),
                FieldDef::new("strength", FieldType::Integer),
                FieldDef::new("Comment", FieldType::String).read_only(),
            ],
        }
    }

    #[test]
    fn test_build_mapping() {
        let mapping = FieldMapping::build(
            &input_class(),
            &output_class("sic"),
            "Symbol_ID",
            &FieldAliases::builtin(),
        );

        assert_eq!(mapping.input_for("sic"), Some("Symbol_ID"));
        assert_eq!(mapping.input_for("uniquedesignation"), Some("Name"));
        // Type mismatch
        assert_eq!(mapping.input_for("strength"), None);
        assert_eq!(mapping.input_for("Shape_Length"), None);
        assert_eq!(mapping.input_for("comment"), Some("comment"));
    }

    #[test]
    fn test_sidc_falls_back_to_sidc_field() {
        let mapping = FieldMapping::build(
            &input_class(),
            &output_class("sidc"),
            "Symbol_ID",
            &FieldAliases::new(),
        );

        assert_eq!(mapping.input_for("sidc"), Some("Symbol_ID"));
        assert_eq!(mapping.input_for("uniquedesignation"), None);
    }

    #[test]
    fn test_first_claim_wins() {
        let mut aliases = FieldAliases::new();
        aliases.insert("Name", "comment");

        let mapping = FieldMapping::build(&input_class(), &output_class("sic"), "Symbol_ID", &aliases);
        assert_eq!(mapping.input_for("comment"), Some("Name"));
    }

    #[test]
    fn test_sidc_field_name_is_case_insensitive() {
        let output = output_class("sic");
        let mapping = FieldMapping::build(&input_class(), &output, "symbol_id", &FieldAliases::builtin());
        assert_eq!(mapping.input_for("sic"), Some("Symbol_ID"));

        let source = Feature::new()
            .with_value("Symbol_ID", "SFGPUCI----CUSG")
            .with_value("comment", "read only");
        let mut target = Feature::new();
        mapping.apply(&source, &mut target, &output);

        assert_eq!(target.get("sic"), &FieldValue::from("SFGPUCI----CUSG"));
        assert!(target.get("Comment").is_null());
    }

    #[test]
    fn test_apply_skips_empty_and_read_only() {
        let output = output_class("sic");
        let mapping = FieldMapping::build(&input_class(), &output, "Symbol_ID", &FieldAliases::builtin());

        let source = Feature::new()
            .with_value("Symbol_ID", "SFGPUCI---AAUSG")
            .with_value("Name", "")
            .with_value("comment", "keep out");
        let mut target = Feature::new().with_value("uniquedesignation", "preset");

        mapping.apply(&source, &mut target, &output);

        assert_eq!(target.get("sic"), &FieldValue::from("SFGPUCI---AAUSG"));
        assert_eq!(target.get("uniquedesignation"), &FieldValue::from("preset"));
        assert!(target.get("Comment").is_null());
    }
}
