use std::fs;

use tempfile::tempdir;

use bpmn_style::StyleError;
use bpmn_style_cli::{Args, CliError, ConfigError, run};

fn args(output: String, config: Option<String>) -> Args {
    Args {
        output,
        config,
        log_level: "off".to_string(),
        columns: None,
    }
}

#[test]
fn e2e_smoke_test_gallery() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("gallery.svg");

    run(&args(output.to_string_lossy().to_string(), None)).expect("Gallery should render");

    let svg = fs::read_to_string(&output).expect("Output should exist");
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    for layer in ["container", "node", "connector", "label"] {
        assert!(
            svg.contains(&format!("data-layer=\"{layer}\"")),
            "Missing {layer} layer"
        );
    }
    assert!(svg.contains("Ship order"));
    assert!(svg.contains("Supplier"));
}

#[test]
fn e2e_smoke_test_config_and_columns() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config = temp_dir.path().join("config.toml");
    fs::write(
        &config,
        "[style]\nmarker_size = 12.0\n\n[gallery]\ncolumns = 6\nspacing = 20.0\n",
    )
    .unwrap();
    let output = temp_dir.path().join("gallery.svg");

    let mut args = args(
        output.to_string_lossy().to_string(),
        Some(config.to_string_lossy().to_string()),
    );
    args.columns = Some(2);
    run(&args).expect("Gallery should render with a config file");
    assert!(output.exists());
}

#[test]
fn e2e_smoke_test_missing_config() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("gallery.svg");
    let missing = temp_dir.path().join("missing.toml");

    let err = run(&args(
        output.to_string_lossy().to_string(),
        Some(missing.to_string_lossy().to_string()),
    ))
    .unwrap_err();
    assert!(matches!(err, CliError::Config(ConfigError::MissingFile(_))));
    assert!(!output.exists());
}

#[test]
fn e2e_smoke_test_invalid_color() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config = temp_dir.path().join("config.toml");
    fs::write(&config, "[style]\noutline = \"not-a-color\"\n").unwrap();
    let output = temp_dir.path().join("gallery.svg");

    let err = run(&args(
        output.to_string_lossy().to_string(),
        Some(config.to_string_lossy().to_string()),
    ))
    .unwrap_err();
    assert!(matches!(err, CliError::Style(StyleError::Color(_))));
}
