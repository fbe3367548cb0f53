//! End-to-end tests for the bellows binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn bellows() -> Command {
    Command::cargo_bin("bellows").unwrap()
}

#[test]
fn presets_lists_known_names() {
    bellows()
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("c_system_5row"))
        .stdout(predicate::str::contains("stradella_120"));
}

#[test]
fn layout_from_preset_emits_json() {
    bellows()
        .args(["layout", "--preset", "c_system_5row"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"noteIndex\""))
        .stdout(predicate::str::contains("\"c-system\""));
}

#[test]
fn layout_requires_preset_or_system() {
    bellows()
        .arg("layout")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--preset or --system"));
}

#[test]
fn layout_rejects_incomplete_chromatic_request() {
    bellows()
        .args(["layout", "--system", "c-system", "--rows", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires rows, columns, and startMidi"));
}

#[test]
fn map_treble_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let layout_path = dir.path().join("layout.json");
    let events_path = dir.path().join("events.json");

    bellows()
        .args(["layout", "--preset", "c_system_5row"])
        .args(["--output", layout_path.to_str().unwrap()])
        .assert()
        .success();

    std::fs::write(
        &events_path,
        r#"[{"measure":1,"beat":1.0,"duration":1.0,"midi":48},
            {"measure":1,"beat":2.0,"duration":1.0,"midi":52}]"#,
    )
    .unwrap();

    bellows()
        .args(["map-treble", "--layout", layout_path.to_str().unwrap()])
        .args(["--events", events_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"selectedPosition\""))
        .stdout(predicate::str::contains("\"valid\": true"));
}

#[test]
fn map_bass_with_chord_usage() {
    let dir = tempfile::tempdir().unwrap();
    let layout_path = dir.path().join("layout.json");
    let events_path = dir.path().join("events.json");

    bellows()
        .args(["layout", "--preset", "stradella_72"])
        .args(["--output", layout_path.to_str().unwrap()])
        .assert()
        .success();

    std::fs::write(
        &events_path,
        r#"[{"eventType":"chord","measure":1,"beat":1.0,"duration":2.0,"root":"C","chordType":"major"},
            {"eventType":"single_note","measure":1,"beat":3.0,"duration":1.0,"midi":[36]}]"#,
    )
    .unwrap();

    bellows()
        .args(["map-bass", "--layout", layout_path.to_str().unwrap()])
        .args(["--events", events_path.to_str().unwrap()])
        .arg("--chord-usage")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"buttonPosition\""))
        .stdout(predicate::str::contains("\"totalChords\": 1"));
}
