//! CLI integration tests for `taxodepth` using `assert_cmd`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get the CLI binary command, run from an empty working directory.
#[allow(deprecated)]
fn taxodepth_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("taxodepth").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("TAXODEPTH_FILTER__DEFAULT_DEPTH");
    cmd
}

/// food <- fruit <- apple, fruit <- pear
fn write_hierarchy(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("terms.csv");
    fs::write(
        &path,
        "tid,parent\nfood,0\nfruit,food\napple,fruit\npear,fruit\n",
    )
    .unwrap();
    path
}

// =============================================================================
// Help & Version Tests
// =============================================================================

#[test]
fn test_help_displays_usage() {
    let dir = TempDir::new().unwrap();

    taxodepth_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("taxodepth CLI"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_displays_version() {
    let dir = TempDir::new().unwrap();

    taxodepth_cmd(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("taxodepth"));
}

// =============================================================================
// Expand Command Tests
// =============================================================================

#[test]
fn test_expand_descendants_json() {
    let dir = TempDir::new().unwrap();
    let hierarchy = write_hierarchy(&dir);

    let output = taxodepth_cmd(&dir)
        .args(["expand", "--depth=-1", "--format", "json"])
        .arg(&hierarchy)
        .arg("fruit")
        .output()
        .unwrap();

    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["direction"], "descendants");
    assert_eq!(
        doc["matched"],
        serde_json::json!(["apple", "fruit", "pear"])
    );
    assert_eq!(doc["stats"]["added"], 2);
}

#[test]
fn test_expand_ancestors_table() {
    let dir = TempDir::new().unwrap();
    let hierarchy = write_hierarchy(&dir);

    taxodepth_cmd(&dir)
        .arg("expand")
        .arg(&hierarchy)
        .args(["--depth", "5", "apple"])
        .assert()
        .success()
        .stdout(predicate::str::contains("food"))
        .stdout(predicate::str::contains("expanded"))
        .stdout(predicate::str::contains("pear").not());
}

#[test]
fn test_expand_default_depth_from_config() {
    let dir = TempDir::new().unwrap();
    let hierarchy = write_hierarchy(&dir);
    fs::write(dir.path().join("taxodepth.toml"), "[filter]\ndefault_depth = -2\n").unwrap();

    let output = taxodepth_cmd(&dir)
        .args(["expand", "--format", "json"])
        .arg(&hierarchy)
        .arg("food")
        .output()
        .unwrap();

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["depth"], -2);
    assert_eq!(doc["matched"].as_array().unwrap().len(), 4);
}

#[test]
fn test_expand_requires_terms() {
    let dir = TempDir::new().unwrap();
    let hierarchy = write_hierarchy(&dir);

    taxodepth_cmd(&dir)
        .arg("expand")
        .arg(&hierarchy)
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_expand_unsupported_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("terms.txt");
    fs::write(&path, "fruit food").unwrap();

    taxodepth_cmd(&dir)
        .arg("expand")
        .arg(&path)
        .arg("fruit")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported hierarchy format"));
}

// =============================================================================
// Predicate & SQL Command Tests
// =============================================================================

#[test]
fn test_predicate_single_term_with_expansion() {
    let dir = TempDir::new().unwrap();
    let hierarchy = write_hierarchy(&dir);

    let output = taxodepth_cmd(&dir)
        .args(["predicate", "--depth", "1", "--field", "node.tid"])
        .arg(&hierarchy)
        .arg("apple")
        .output()
        .unwrap();

    assert!(output.status.success());
    let condition: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(condition["type"], "or");
    assert_eq!(condition["conditions"][0]["value"], "apple");
    assert_eq!(condition["conditions"][1]["values"], serde_json::json!(["fruit"]));
}

#[test]
fn test_predicate_multiple_terms_uses_in() {
    let dir = TempDir::new().unwrap();
    let hierarchy = write_hierarchy(&dir);

    let output = taxodepth_cmd(&dir)
        .arg("predicate")
        .arg(&hierarchy)
        .args(["apple", "pear"])
        .output()
        .unwrap();

    let condition: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(condition["type"], "in");
    assert_eq!(condition["field"], "tid");
}

#[test]
fn test_sql_renders_recursive_subquery_and_params() {
    let dir = TempDir::new().unwrap();

    taxodepth_cmd(&dir)
        .args(["sql", "--depth", "2", "--alias", "n", "12"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("n.nid IN (WITH RECURSIVE"))
        .stdout(predicate::str::contains("SELECT th.parent, 1"))
        .stdout(predicate::str::contains("[12,2,12]"));
}

#[test]
fn test_sql_extreme_depth_stays_small() {
    let dir = TempDir::new().unwrap();

    taxodepth_cmd(&dir)
        .args(["sql", "--depth=-2147483648", "12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SELECT th.tid, 1"))
        .stdout(predicate::str::contains("[12,2147483648,12]"));
}

// =============================================================================
// Config Command Tests
// =============================================================================

#[test]
fn test_config_prints_effective_toml() {
    let dir = TempDir::new().unwrap();

    taxodepth_cmd(&dir)
        .arg("config")
        .env("TAXODEPTH_SCHEMA__HIERARCHY_TABLE", "term_tree")
        .assert()
        .success()
        .stdout(predicate::str::contains("[filter]"))
        .stdout(predicate::str::contains("hierarchy_table = \"term_tree\""));
}

#[test]
fn test_config_rejects_invalid_values() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");
    fs::write(&config, "[filter]\ngroup = 0\n").unwrap();

    taxodepth_cmd(&dir)
        .arg("--config")
        .arg(&config)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("filter.group"));
}
