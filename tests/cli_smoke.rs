use std::path::PathBuf;
use std::process::Command;

use ristretto_core::Raster;
use ristretto_core::codec::{load_raster, save_raster};

fn exe() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_ristretto"))
}

#[test]
fn steps_prints_schema_json() {
    let out = Command::new(exe()).args(["steps", "--compact"]).output().unwrap();
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let names: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    for expected in [
        "brightness",
        "saturation",
        "hue",
        "box_blur",
        "unsharp_mask",
        "crop",
        "rotate",
    ] {
        assert!(names.contains(&expected), "missing {expected}");
    }
    assert_eq!(json["unsharp_mask"]["parameters"][1]["max_value"], 21);
}

#[test]
fn run_writes_processed_png() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    let pipeline = dir.path().join("pipeline.json");

    save_raster(&Raster::filled(6, 4, &[100, 100, 100]).unwrap(), &input).unwrap();
    std::fs::write(
        &pipeline,
        r#"{"pipeline": [
            {"step": "brightness", "params": {"factor": 2.0}},
            {"step": "rotate", "params": {"angle": 90}}
        ]}"#,
    )
    .unwrap();

    let status = Command::new(exe())
        .arg("run")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("-p")
        .arg(&pipeline)
        .status()
        .unwrap();
    assert!(status.success());

    let result = load_raster(&output).unwrap();
    assert_eq!(result, Raster::filled(4, 6, &[200, 200, 200]).unwrap());
}

#[test]
fn unknown_step_fails_and_names_it() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    save_raster(&Raster::filled(2, 2, &[1, 2, 3]).unwrap(), &input).unwrap();

    let out = Command::new(exe())
        .arg("run")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--steps", r#"[{"step": "sepia"}]"#])
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("sepia"));
    assert!(!output.exists());
}
