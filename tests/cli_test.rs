//! Exit codes and output of the milsym binary

mod common;

use common::{milsym, read_features, Fixture, INPUT_RECORDS};
use milsym_append::FieldValue;

fn path_str(path: &std::path::Path) -> String {
    path.display().to_string()
}

#[test]
fn test_append_succeeds() {
    let fixture = Fixture::new();
    let config = path_str(&fixture.write_config());
    let input = path_str(&fixture.write_input(INPUT_RECORDS));
    let output = fixture.write_output(&[]);

    let result = milsym(&["--config", &config, "append", &input, &path_str(&output)]);

    assert_eq!(result.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Friendly Units"));
    assert_eq!(read_features(&output, "FriendlyUnits").len(), 2);
    assert_eq!(read_features(&output, "HostileUnits").len(), 1);
}

#[test]
fn test_append_exit_codes() {
    let fixture = Fixture::new();
    let config = path_str(&fixture.write_config());
    let input = path_str(&fixture.write_input(INPUT_RECORDS));
    let output = path_str(&fixture.write_output(&[]));
    let missing = path_str(&fixture.path("missing.json"));

    let result = milsym(&["--config", &config, "append", &missing, &output]);
    assert_eq!(result.status.code(), Some(2));

    let result = milsym(&["--config", &config, "append", &input, &output, "NoSuchField"]);
    assert_eq!(result.status.code(), Some(6));
    assert!(String::from_utf8_lossy(&result.stderr).contains("No [SIDC] field in input data"));

    let result = milsym(&["--config", &config, "append", &input, &missing]);
    assert_eq!(result.status.code(), Some(4));

    let locked = fixture.write_output(&["FriendlyUnits"]);
    let result = milsym(&["--config", &config, "append", &input, &path_str(&locked)]);
    assert_eq!(result.status.code(), Some(5));
}

#[test]
fn test_no_military_features_exit_code() {
    let fixture = Fixture::new();
    let config = path_str(&fixture.write_config());
    let input = path_str(&fixture.write_input(&[("not a sidc", "junk")]));
    let output = path_str(&fixture.write_output(&[]));

    let result = milsym(&["--config", &config, "append", &input, &output]);
    assert_eq!(result.status.code(), Some(3));
}

#[test]
fn test_bad_rule_table_exit_code() {
    let fixture = Fixture::new();
    fixture.write_library();
    let rules = fixture.write(
        "rules.yaml",
        "rules:\n  - name: Broken\n    geometry: Point\n    class: Units\n    match: [\"^S[\"]\n",
    );
    let config = fixture.write(
        "milsym.yaml",
        &format!("data:\n  rules_file: '{}'\n", rules.display()),
    );
    let input = path_str(&fixture.write_input(INPUT_RECORDS));
    let output = path_str(&fixture.write_output(&[]));

    let result = milsym(&["--config", &path_str(&config), "append", &input, &output]);
    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("Failed to load dependent data files"));
}

#[test]
fn test_calc_rep_rules() {
    let fixture = Fixture::new();
    let config = path_str(&fixture.write_config());
    let input = path_str(&fixture.write_input(INPUT_RECORDS));
    let output = fixture.write_output(&[]);
    let result = milsym(&["--config", &config, "append", &input, &path_str(&output)]);
    assert_eq!(result.status.code(), Some(0));

    let class = format!("{}#HostileUnits", output.display());
    let result = milsym(&["--config", &config, "calc-rep-rules", &class]);
    assert_eq!(result.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&result.stdout).contains("features_updated: 1"));

    let hostile = read_features(&output, "HostileUnits");
    assert_eq!(hostile[0].get("ruleid"), &FieldValue::Integer(1));
}

#[test]
fn test_decode() {
    let fixture = Fixture::new();
    let config = path_str(&fixture.write_config());

    let result = milsym(&["--config", &config, "decode", "SFGPUCI----CUSG", "GHTPL---------X", "SFG"]);
    assert_eq!(result.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("rule_name: Infantry~Section"));
    assert!(stdout.contains("country_code: US"));
    assert!(stdout.contains("generic_name: Delay"));
    assert!(stdout.contains("valid: false"));
}
