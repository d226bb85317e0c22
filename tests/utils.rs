#![allow(dead_code)]

use paramgen::cli::{Args, Runner};
use paramgen::codec;
use paramgen::config::{ConfigTemplate, DatabaseEngine};
use paramgen::prompt::automatic::AutomaticPrompter;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Copies `tests/templates/<fixture>/parameters.yml.dist` into `dir`.
pub fn copy_template(fixture: &str, dir: &Path) -> PathBuf {
    let source = Path::new("tests/templates").join(fixture).join("parameters.yml.dist");
    let dest = dir.join("parameters.yml.dist");
    fs::copy(&source, &dest)
        .unwrap_or_else(|e| panic!("Failed to copy fixture {}: {e}", source.display()));
    dest
}

/// Loads the `parameters` mapping of a fixture template.
pub fn load_template(fixture: &str) -> ConfigTemplate {
    let path = Path::new("tests/templates").join(fixture).join("parameters.yml.dist");
    read_parameters(&path)
}

pub fn read_parameters(path: &Path) -> ConfigTemplate {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
    codec::parse(&content).unwrap()
}

/// Non-interactive arguments for a template copied into a temp dir.
pub fn args_for(template: &Path, engine: Option<&str>, answers: Option<&str>) -> Args {
    Args {
        template: template.to_path_buf(),
        output: None,
        force: false,
        verbose: 2,
        answers: answers.map(str::to_string),
        engine: engine.map(DatabaseEngine::from_driver),
        non_interactive: true,
        dry_run: false,
    }
}

/// Generates parameters for `fixture` and compares them with
/// `tests/expected/<expected>/parameters.yml`.
pub fn run_and_assert(fixture: &str, expected: &str, engine: &str, answers: Option<&str>) {
    let tmp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let template = copy_template(fixture, tmp_dir.path());

    Runner::new(args_for(&template, Some(engine), answers))
        .run_with(AutomaticPrompter::new())
        .expect("Generation failed");

    let output = tmp_dir.path().join("parameters.yml");
    let generated = fs::read_to_string(&output).expect("Output was not written");
    assert!(
        generated.starts_with("# Generated with paramgen#"),
        "Missing header in:\n{generated}"
    );

    let expected_path = Path::new("tests/expected").join(expected).join("parameters.yml");
    let actual = read_parameters(&output);
    let expected = read_parameters(&expected_path);
    if actual != expected {
        println!("Actual:\n{generated}");
    }
    assert_eq!(Value::Object(actual), Value::Object(expected));
}
