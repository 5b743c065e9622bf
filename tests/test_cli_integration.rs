//! CLI Integration Tests for omm
//!
//! These tests execute the binary against a pre-filled response cache, so
//! no network access is needed.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const BODY: &str = r#"{"entities": {"Q405": {"labels": {"en": {"value": "Moon"}}, "claims": {}}}}"#;

const OBJECTS: &str = r#"{"results": {"bindings": [
  {"item": {"type": "uri", "value": "http://www.wikidata.org/entity/Q405"},
   "geo": {"type": "literal", "value": "<http://www.wikidata.org/entity/Q405> Point(176.5 7.0)"},
   "type": {"type": "uri", "value": "http://www.wikidata.org/entity/Q3240715"},
   "itemLabel": {"type": "literal", "value": "Copernicus"}},
  {"item": {"type": "uri", "value": "http://www.wikidata.org/entity/Q500"},
   "geo": {"type": "literal", "value": "<http://www.wikidata.org/entity/Q405> Point(10.0 82.5)"},
   "type": {"type": "uri", "value": "http://www.wikidata.org/entity/Q8072"},
   "itemLabel": {"type": "literal", "value": "Polar"}}
]}}"#;

const CRATERS: &str = r#"{"results": {"bindings": [
  {"item": {"type": "uri", "value": "http://www.wikidata.org/entity/Q405"},
   "diameter": {"type": "literal", "value": "93"}}
]}}"#;

/// Helper to create a cache directory holding all responses for Q405
fn create_cache(root: &Path) -> std::path::PathBuf {
    let cache = root.join("cache");
    fs::create_dir_all(&cache).unwrap();
    fs::write(cache.join("405.json"), BODY).unwrap();
    fs::write(cache.join("405_object.json"), OBJECTS).unwrap();
    fs::write(cache.join("405_crater.json"), CRATERS).unwrap();
    cache
}

fn omm() -> Command {
    Command::cargo_bin("omm").unwrap()
}

#[test]
fn test_help() {
    omm()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--body"))
        .stdout(predicate::str::contains("--extra"));
}

#[test]
fn test_output_required() {
    omm()
        .args(["-b", "405"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output"));
}

#[test]
fn test_builds_map_from_cache() {
    let temp = TempDir::new().unwrap();
    let cache = create_cache(temp.path());
    let output = temp.path().join("moon.osm");

    omm()
        .args(["-b", "405", "-o"])
        .arg(&output)
        .arg("--cache")
        .arg(&cache)
        .assert()
        .success();

    let xml = fs::read_to_string(&output).unwrap();
    assert!(xml.contains(r#"<node id="1" lat="7.0" lon="176.5">"#));
    assert!(xml.contains(r#"<tag k="diameter" v="93000.0"/>"#));
    assert!(!xml.contains("Polar"));
}

#[test]
fn test_max_latitude_override() {
    let temp = TempDir::new().unwrap();
    let cache = create_cache(temp.path());
    let output = temp.path().join("moon.osm");

    omm()
        .args(["-o"])
        .arg(&output)
        .arg("--cache")
        .arg(&cache)
        .args(["--max-latitude", "85"])
        .assert()
        .success();

    let xml = fs::read_to_string(&output).unwrap();
    assert!(xml.contains(r#"<tag k="name" v="Polar"/>"#));
    assert!(xml.contains(r#"maxlat="85.0""#));
}

#[test]
fn test_config_file() {
    let temp = TempDir::new().unwrap();
    let cache = create_cache(temp.path());
    let config = temp.path().join("omm.json");
    fs::write(
        &config,
        format!(r#"{{"cache_dir": {:?}, "language": "la"}}"#, cache.display().to_string()),
    )
    .unwrap();
    let output = temp.path().join("moon.osm");

    omm()
        .arg("-o")
        .arg(&output)
        .arg("-c")
        .arg(&config)
        .assert()
        .success();

    let xml = fs::read_to_string(&output).unwrap();
    assert!(xml.contains(r#"<tag k="name:la" v="Copernicus"/>"#));
}

#[test]
fn test_extra_files_appended() {
    let temp = TempDir::new().unwrap();
    let cache = create_cache(temp.path());
    let extra = temp.path().join("landers.json");
    fs::write(
        &extra,
        r#"[{"tags": {"name": "Tranquility Base", "historic": "monument"}, "lat": 0.674, "lon": 23.473}]"#,
    )
    .unwrap();
    let output = temp.path().join("moon.osm");

    omm()
        .arg("-o")
        .arg(&output)
        .arg("--cache")
        .arg(&cache)
        .arg("-e")
        .arg(&extra)
        .assert()
        .success();

    let xml = fs::read_to_string(&output).unwrap();
    assert!(xml.contains(r#"<node id="2" lat="0.674" lon="23.473">"#));
    assert!(xml.contains(r#"<tag k="name" v="Tranquility Base"/>"#));
}

#[test]
fn test_missing_extra_fails() {
    let temp = TempDir::new().unwrap();
    let cache = create_cache(temp.path());
    let output = temp.path().join("moon.osm");

    omm()
        .arg("-o")
        .arg(&output)
        .arg("--cache")
        .arg(&cache)
        .arg("-e")
        .arg(temp.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_unwritable_output_fails() {
    let temp = TempDir::new().unwrap();
    let cache = create_cache(temp.path());

    omm()
        .arg("-o")
        .arg(temp.path().join("no").join("such").join("moon.osm"))
        .arg("--cache")
        .arg(&cache)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}
