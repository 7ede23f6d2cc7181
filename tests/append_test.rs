//! End-to-end append and representation rule runs over workspace files

mod common;

use common::{read_features, Fixture, INPUT_RECORDS};
use milsym_append::{FeatureStore, FieldValue, MemoryWorkspace, MilitaryFeatureAppender};
use milsym_core::{BackfillPolicy, RunError};
use milsym_router::{load_rule_table, FieldAliases};
use milsym_sidc::{SymbolComposer, SymbolLibrary, YamlSymbolSource};
use proptest::prelude::*;

fn appender(fixture: &Fixture) -> MilitaryFeatureAppender {
    let rules = load_rule_table(fixture.write_rules()).expect("Failed to load rules");
    let aliases = FieldAliases::from_file(fixture.write_aliases()).expect("Failed to load aliases");
    let source = YamlSymbolSource::new(fixture.write_library());
    let library = SymbolLibrary::load(&[&source]).expect("Failed to load library");

    MilitaryFeatureAppender::new(rules, aliases, SymbolComposer::new(library))
        .with_backfill(BackfillPolicy::EmptyOnly)
}

#[test]
fn test_append_from_workspace_files() {
    let fixture = Fixture::new();
    let appender = appender(&fixture);
    let input = fixture.write_input(INPUT_RECORDS);
    let output = fixture.write_output(&[]);

    let summary = appender
        .process_workspaces(&input.display().to_string(), &output, "Symbol_ID")
        .unwrap();

    assert_eq!(summary.matched_rules, vec!["Friendly Units", "Hostile Units"]);
    assert_eq!(summary.features_written(), 3);

    let friendly = read_features(&output, "FriendlyUnits");
    assert_eq!(friendly.len(), 2);
    assert_eq!(friendly[0].get("sic").as_str(), Some("SFGPUCI----CUSG"));
    assert_eq!(friendly[0].get("uniquedesignation").as_str(), Some("1st Section"));
    assert_eq!(friendly[0].get("echelon"), &FieldValue::Integer(11));
    assert_eq!(friendly[0].get("countrycode").as_str(), Some("US"));
    assert_eq!(friendly[0].get("ruleid"), &FieldValue::Integer(1));
    assert_eq!(friendly[1].get("ruleid"), &FieldValue::Integer(2));

    let hostile = read_features(&output, "HostileUnits");
    assert_eq!(hostile.len(), 1);
    assert_eq!(hostile[0].get("uniquedesignation").as_str(), Some("Hostile Infantry"));

    let workspace = MemoryWorkspace::open(&output).unwrap();
    let handle = workspace.open_feature_class("Military", "FriendlyUnits").unwrap();
    let rules = workspace.representation_rules(&handle).unwrap();
    let names: Vec<&str> = rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Infantry~Section", "Armour"]);
    assert_eq!(rules[0].symbol.layers, vec!["Section".to_string()]);
}

#[test]
fn test_second_run_reuses_rules() {
    let fixture = Fixture::new();
    let appender = appender(&fixture);
    let input = fixture.write_input(INPUT_RECORDS).display().to_string();
    let output = fixture.write_output(&[]);

    appender.process_workspaces(&input, &output, "Symbol_ID").unwrap();
    let summary = appender.process_workspaces(&input, &output, "Symbol_ID").unwrap();

    assert!(summary.processed.iter().all(|rule| rule.rules_added == 0));
    let friendly = read_features(&output, "FriendlyUnits");
    assert_eq!(friendly.len(), 4);
    assert_eq!(friendly[0].get("ruleid"), friendly[2].get("ruleid"));
}

#[test]
fn test_run_error_codes() {
    let fixture = Fixture::new();
    let appender = appender(&fixture);
    let input = fixture.write_input(INPUT_RECORDS).display().to_string();
    let output = fixture.write_output(&[]);

    let missing_input = fixture.path("nope.json").display().to_string();
    let err = appender
        .process_workspaces(&missing_input, &output, "Symbol_ID")
        .unwrap_err();
    assert_eq!(err.exit_code(), RunError::INPUT_NOT_FOUND);

    let err = appender.process_workspaces(&input, &output, "SIDC").unwrap_err();
    assert_eq!(err.exit_code(), RunError::INPUT_FIELD_MISSING);

    let err = appender
        .process_workspaces(&input, &fixture.path("missing.gdb.json"), "Symbol_ID")
        .unwrap_err();
    assert_eq!(err.exit_code(), RunError::OUTPUT_NOT_FOUND);

    let locked = fixture.write_output(&["HostileUnits"]);
    let err = appender.process_workspaces(&input, &locked, "Symbol_ID").unwrap_err();
    assert_eq!(err.exit_code(), RunError::SCHEMA_LOCK_DENIED);
    assert!(read_features(&locked, "FriendlyUnits").is_empty());
}

#[test]
fn test_no_military_features() {
    let fixture = Fixture::new();
    let appender = appender(&fixture);
    let input = fixture
        .write_input(&[("not a sidc", "junk"), ("GFGPGLB----K--X", "Line on a point")])
        .display()
        .to_string();
    let output = fixture.write_output(&[]);

    let err = appender.process_workspaces(&input, &output, "Symbol_ID").unwrap_err();
    assert_eq!(err.exit_code(), RunError::NO_MATCHING_FEATURES);
}

#[test]
fn test_calc_rep_rules_after_append() {
    let fixture = Fixture::new();
    let appender = appender(&fixture);
    let input = fixture.write_input(INPUT_RECORDS).display().to_string();
    let output = fixture.write_output(&[]);
    appender.process_workspaces(&input, &output, "Symbol_ID").unwrap();

    // Clear the stored rule ids and recalculate them
    let mut workspace = MemoryWorkspace::open(&output).unwrap();
    let handle = workspace.open_feature_class("Military", "FriendlyUnits").unwrap();
    let features: Vec<_> = workspace.read_all(&handle).unwrap().collect();
    workspace.begin_edit().unwrap();
    for mut feature in features {
        feature.set("ruleid", FieldValue::Null);
        workspace.update_in_place(&handle, &feature).unwrap();
    }
    workspace.end_edit(true).unwrap();

    let location = format!("{}#FriendlyUnits", output.display());
    let summary = appender.calculate_rep_rules_in_workspace(&location, "sidc").unwrap();
    assert_eq!(summary.features_updated, 2);
    assert_eq!(summary.rules_added, 0);

    let friendly = read_features(&output, "FriendlyUnits");
    assert_eq!(friendly[0].get("ruleid"), &FieldValue::Integer(1));
    assert_eq!(friendly[1].get("ruleid"), &FieldValue::Integer(2));
}

#[test]
fn test_calc_rep_rules_missing_class() {
    let fixture = Fixture::new();
    let appender = appender(&fixture);
    let output = fixture.write_output(&[]);

    let location = format!("{}#Nope", output.display());
    let err = appender.calculate_rep_rules_in_workspace(&location, "sidc").unwrap_err();
    assert_eq!(err.exit_code(), RunError::OUTPUT_NOT_FOUND);
}

proptest! {
    #[test]
    fn test_rule_names_are_deterministic(
        echelon in "[-A-N]",
        modifier in "[-A-H]",
        country in "[A-Z]{2}",
    ) {
        let fixture = Fixture::new();
        let appender = appender(&fixture);
        let code = format!("SFGPUCI---{}{}{}G", modifier, echelon, country);

        let composer = appender.composer();
        let first = composer.rule_name_from_sidc(&code);
        prop_assert_eq!(first.clone(), composer.rule_name_from_sidc(&code));
        prop_assert!(first.starts_with("Infantry"));
        prop_assert_eq!(composer.symbol_layers(&code), composer.symbol_layers(&code));
    }
}
