use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(parts: &[&str]) -> PathBuf {
    let path = parts
        .iter()
        .fold(repo_root().join("fixtures"), |p, part| p.join(part));
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

#[test]
fn cli_renders_svg_with_assets() {
    let exe = assert_cmd::cargo_bin!("bodymap-cli");
    let output = Command::new(exe)
        .current_dir(repo_root())
        .args([
            "render",
            "--assets",
            fixture(&["body-parts"]).to_string_lossy().as_ref(),
            "--hover",
            "heart",
            "--select",
            "heart",
            "--id",
            "smoke",
            fixture(&["conditions", "heart.json"]).to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run bodymap-cli");
    assert!(output.status.success(), "{output:?}");

    let svg = String::from_utf8(output.stdout).expect("utf-8 svg");
    let doc = roxmltree::Document::parse(&svg).expect("svg parses");
    assert_eq!(doc.root_element().attribute("id"), Some("smoke"));
    assert!(
        doc.descendants()
            .any(|n| n.attribute("class") == Some("silhouette") && n.tag_name().name() == "g")
    );
    let heart = doc
        .descendants()
        .find(|n| n.attribute("data-part") == Some("heart"))
        .expect("heart layer");
    assert_eq!(
        heart.attribute("transform"),
        Some("translate(200,220) scale(0.6)")
    );
    let description = doc
        .descendants()
        .find(|n| n.attribute("class") == Some("detail-description"))
        .and_then(|n| n.text());
    assert_eq!(description, Some("Arrhythmia"));
}

#[test]
fn cli_reads_conditions_from_stdin() {
    let exe = assert_cmd::cargo_bin!("bodymap-cli");
    let output = assert_cmd::Command::new(exe)
        .current_dir(repo_root())
        .args(["render", "--read-only", "-"])
        .write_stdin(r#"[{ "bodyPart": "leftArm", "description": "Sprain" }]"#)
        .output()
        .expect("run bodymap-cli");
    assert!(output.status.success(), "{output:?}");

    let svg = String::from_utf8(output.stdout).expect("utf-8 svg");
    assert!(svg.contains(r#"data-read-only="true""#));
    assert!(svg.contains(r#"<image class="silhouette" href="/body-parts/body.svg""#));
    assert!(svg.contains(r#"class="overlay region affected" data-part="leftArm""#));
}

#[test]
fn cli_renders_png_with_default_out_path_for_file_input() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let tmp_fixture = tmp.path().join("mixed.json");
    fs::copy(fixture(&["conditions", "mixed.json"]), &tmp_fixture).expect("copy fixture");
    let expected_out = tmp_fixture.with_extension("png");

    let exe = assert_cmd::cargo_bin!("bodymap-cli");
    Command::new(exe)
        .current_dir(repo_root())
        .args([
            "render",
            "--format",
            "png",
            "--background",
            "white",
            "--assets",
            fixture(&["body-parts"]).to_string_lossy().as_ref(),
            tmp_fixture.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let bytes = fs::read(&expected_out).expect("read png");
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "output is not a PNG"
    );
}

#[test]
fn cli_lists_parts_and_formats_labels() {
    let exe = assert_cmd::cargo_bin!("bodymap-cli");
    let output = Command::new(exe)
        .arg("parts")
        .output()
        .expect("run bodymap-cli");
    assert!(output.status.success());
    let parts: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let parts = parts.as_array().expect("array");
    assert_eq!(parts.len(), 16);
    assert_eq!(parts[1]["id"], "brain");
    assert_eq!(parts[1]["placement"]["translateX"], 170.0);
    assert_eq!(parts[0]["assetFile"], serde_json::Value::Null);

    let exe = assert_cmd::cargo_bin!("bodymap-cli");
    Command::new(exe)
        .args(["label", "smallIntestine"])
        .assert()
        .success()
        .stdout("Small Intestine\n");
}

#[test]
fn cli_rejects_unknown_parts_and_bad_usage() {
    let exe = assert_cmd::cargo_bin!("bodymap-cli");
    assert_cmd::Command::new(exe)
        .args(["render", "--hover", "tail", "-"])
        .write_stdin("[]")
        .assert()
        .code(1);

    let exe = assert_cmd::cargo_bin!("bodymap-cli");
    Command::new(exe).args(["--format", "gif"]).assert().code(2);
}
