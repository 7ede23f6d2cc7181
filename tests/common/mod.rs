//! Common test utilities and helpers for integration tests

#![allow(dead_code)]

use milsym_append::{
    ClassInfo, Feature, FieldDef, FieldType, Geometry, MemoryWorkspace, StoredClass,
};
use milsym_core::ShapeType;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const LIBRARY_YAML: &str = r#"
symbols:
  - name: Infantry
    tags: "Friend;Ground;Unit;SFGPUCI-----***"
  - name: Armour
    tags: "Friend;Ground;Unit;SFGPUCA-----***"
  - name: Hostile Infantry
    tags: "Hostile;Ground;Unit;SHGPUCI-----***"
  - name: Section
    tags: "Echelon;ECH-C"
  - name: Company/Battery/Troop
    tags: "Echelon;ECH-E"
  - name: Delay F
    tags: "Tactical;G-TPL---------X"
"#;

pub const RULES_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<MappingRules xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <MappingRule>
    <Name>Friendly Units</Name>
    <GeometryType>Point</GeometryType>
    <FeatureDataSet>Military</FeatureDataSet>
    <FeatureClass>FriendlyUnits</FeatureClass>
    <MatchingExpressions>
      <string>^S[FAMD]G.U</string>
    </MatchingExpressions>
  </MappingRule>
  <MappingRule>
    <Name>Hostile Units</Name>
    <GeometryType>Point</GeometryType>
    <FeatureDataSet>Military</FeatureDataSet>
    <FeatureClass>HostileUnits</FeatureClass>
    <MatchingExpressions>
      <string>^S[HSJK]G.U</string>
    </MatchingExpressions>
  </MappingRule>
  <MappingRule>
    <Name>Boundaries</Name>
    <GeometryType>Line</GeometryType>
    <FeatureDataSet>Military</FeatureDataSet>
    <FeatureClass>Boundaries</FeatureClass>
    <MatchingExpressions>
      <string>^G.G.GLB</string>
    </MatchingExpressions>
  </MappingRule>
</MappingRules>
"#;

pub const ALIASES_YAML: &str = r#"
fields:
  - input: Name
    output: uniquedesignation
"#;

/// Input records: SIDC and name.
pub const INPUT_RECORDS: &[(&str, &str)] = &[
    ("SFGPUCI----CUSG", "1st Section"),
    ("SHGPUCI----DRUG", ""),
    ("SFGPUCA-----USG", "Tank"),
    ("not a sidc", "junk"),
];

/// Temporary directory holding data files and workspaces for one test.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents)
            .unwrap_or_else(|_| panic!("Failed to write fixture {:?}", path));
        path
    }

    pub fn write_library(&self) -> PathBuf {
        self.write("symbols.yaml", LIBRARY_YAML)
    }

    pub fn write_rules(&self) -> PathBuf {
        self.write("rules.xml", RULES_XML)
    }

    pub fn write_aliases(&self) -> PathBuf {
        self.write("aliases.yaml", ALIASES_YAML)
    }

    /// Writes the data files and a config pointing at them.
    pub fn write_config(&self) -> PathBuf {
        let yaml = format!(
            "data:\n  rules_file: '{}'\n  field_mapping_file: '{}'\n  symbol_library:\n    - '{}'\nappend:\n  sidc_field: Symbol_ID\nlogging:\n  level: warn\n",
            self.write_rules().display(),
            self.write_aliases().display(),
            self.write_library().display(),
        );
        self.write("milsym.yaml", &yaml)
    }

    /// Writes an input workspace with one point class named `Input`.
    pub fn write_input(&self, records: &[(&str, &str)]) -> PathBuf {
        let mut class = StoredClass::new(ClassInfo {
            name: "Input".into(),
            dataset: String::new(),
            shape_type: ShapeType::Point,
            fields: vec![
                FieldDef::new("FID", FieldType::Oid),
                FieldDef::new("Symbol_ID", FieldType::String),
                FieldDef::new("Name", FieldType::String),
            ],
        });
        for (i, (sidc, name)) in records.iter().enumerate() {
            class.features.push(
                Feature {
                    id: i as u64 + 1,
                    ..Feature::default()
                }
                .with_geometry(Geometry::point(i as f64, 1.0))
                .with_value("Symbol_ID", *sidc)
                .with_value("Name", *name),
            );
        }

        let mut workspace = MemoryWorkspace::new();
        workspace.add_class(class);
        let path = self.path("input.json");
        workspace.save_as(&path).expect("Failed to save input workspace");
        path
    }

    /// Writes an output workspace with the friendly and hostile unit
    /// classes. Classes named in `locked` have a schema lock held by
    /// another user.
    pub fn write_output(&self, locked: &[&str]) -> PathBuf {
        let mut workspace = MemoryWorkspace::new();
        for name in ["FriendlyUnits", "HostileUnits"] {
            let mut class = output_class(name);
            if locked.contains(&name) {
                class.lock_holders.push("analyst".into());
            }
            workspace.add_class(class);
        }
        let path = self.path("output.json");
        workspace.save_as(&path).expect("Failed to save output workspace");
        path
    }
}

pub fn output_class(name: &str) -> StoredClass {
    StoredClass::new(ClassInfo {
        name: name.into(),
        dataset: "Military".into(),
        shape_type: ShapeType::Point,
        fields: vec![
            FieldDef::new("OBJECTID", FieldType::Oid),
            FieldDef::new("sic", FieldType::String),
            FieldDef::new("ruleid", FieldType::Integer),
            FieldDef::new("uniquedesignation", FieldType::String),
            FieldDef::new("echelon", FieldType::Integer),
            FieldDef::new("countrycode", FieldType::String),
        ],
    })
}

/// Features of `Military/<class>` in a workspace file.
pub fn read_features(workspace: &Path, class: &str) -> Vec<Feature> {
    use milsym_append::FeatureStore;

    let workspace = MemoryWorkspace::open(workspace).expect("Failed to open workspace");
    let handle = workspace
        .open_feature_class("Military", class)
        .unwrap_or_else(|| panic!("No class {}", class));
    workspace.read_all(&handle).expect("Failed to read features").collect()
}

/// Runs the `milsym` binary.
pub fn milsym(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_milsym"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("MILSYM_CONFIG")
        .output()
        .expect("Failed to run milsym")
}
