use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

fn fontshelf(state: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fontshelf"))
        .env("FONTSHELF_STATE", state)
        .args(args)
        .output()
        .expect("run fontshelf")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn find_json_respects_filters() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("state.json");

    let output = fontshelf(
        &state,
        &["find", "--categories", "monospaced", "--variable", "--all", "--json"],
    );
    assert_success(&output);

    let parsed: Value = serde_json::from_slice(&output.stdout).expect("json output");
    let fonts = parsed.as_array().expect("array");
    assert!(!fonts.is_empty());
    for font in fonts {
        assert_eq!(font["variable"], true);
        assert!(font["categories"]
            .as_array()
            .unwrap()
            .iter()
            .any(|c| c == "monospaced"));
    }
}

#[test]
fn favorites_survive_between_runs() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("nested").join("state.json");

    assert_success(&fontshelf(&state, &["fav", "toggle", "gh-mona"]));
    assert!(state.exists());

    let output = fontshelf(&state, &["fav", "list", "--ndjson"]);
    assert_success(&output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1, "stdout:\n{stdout}");
    let font: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(font["id"], "gh-mona");

    assert_success(&fontshelf(&state, &["fav", "toggle", "gh-mona"]));
    let output = fontshelf(&state, &["fav", "list", "--json"]);
    assert_success(&output);
    let parsed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed, serde_json::json!([]));
}

#[test]
fn compare_stack_caps_at_three() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("state.json");

    for id in ["pt-1", "gh-mona", "pretendard"] {
        assert_success(&fontshelf(&state, &["compare", "toggle", id]));
    }
    let output = fontshelf(&state, &["compare", "toggle", "hack-font"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("You can only compare up to 3 fonts"), "stderr: {stderr}");

    let output = fontshelf(&state, &["workbench", "--query", "h=2&b=0", "--json"]);
    assert_success(&output);
    let parsed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["heading"], "pretendard");
    assert_eq!(parsed["body"], "pt-1");
    assert_eq!(parsed["sizes"], serde_json::json!([16, 20, 25, 31, 39, 49]));
}

#[test]
fn corrupt_state_file_falls_back_to_empty_state() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("state.json");
    std::fs::write(&state, "{not json").unwrap();

    let output = fontshelf(&state, &["find", "--all", "--ndjson"]);
    assert_success(&output);
    assert!(!output.stdout.is_empty());

    let output = fontshelf(&state, &["fav", "list", "--json"]);
    assert_success(&output);
    let parsed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed, serde_json::json!([]));

    assert_success(&fontshelf(&state, &["fav", "toggle", "gh-mona"]));
    let output = fontshelf(&state, &["fav", "list", "--json"]);
    let parsed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed[0]["id"], "gh-mona");
}

#[test]
fn language_switch_changes_translations() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("state.json");

    let output = fontshelf(&state, &["lang"]);
    assert_success(&output);
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "ru");

    let ru = fontshelf(&state, &["t", "details.licenseDesc", "-a", "license=OFL"]);
    assert_success(&fontshelf(&state, &["lang", "en"]));
    let en = fontshelf(&state, &["t", "details.licenseDesc", "-a", "license=OFL"]);
    assert_success(&en);
    assert_eq!(
        String::from_utf8_lossy(&en.stdout).trim(),
        "Licensed under OFL. Open for digital and print usage."
    );
    assert_ne!(ru.stdout, en.stdout);
}
