use std::{fs, path::PathBuf};

use tempfile::tempdir;

use waymark_cli::{Args, Pan, run};

/// Collects all .json files from a directory
fn collect_json_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn args(input: &PathBuf, output: &PathBuf) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
        zoom_steps: 0,
        pan: None,
        select: None,
    }
}

#[test]
fn e2e_smoke_test_valid_fixtures() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let fixtures = collect_json_files(fixtures_dir());
    assert!(!fixtures.is_empty(), "No fixtures found in tests/fixtures/");

    let mut failed = Vec::new();

    for fixture in &fixtures {
        let output_path = temp_dir.path().join(format!(
            "{}.svg",
            fixture.file_stem().unwrap().to_string_lossy()
        ));

        match run(&args(fixture, &output_path)) {
            Ok(()) => {
                let svg = fs::read_to_string(&output_path).expect("Failed to read output");
                assert!(svg.contains("<svg"), "{} produced no SVG", fixture.display());
            }
            Err(e) => failed.push((fixture.clone(), e)),
        }
    }

    if !failed.is_empty() {
        eprintln!("\nFixtures that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} fixture(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_error_fixtures() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let fixtures = collect_json_files(fixtures_dir().join("errors"));
    assert!(
        !fixtures.is_empty(),
        "No error fixtures found in tests/fixtures/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for fixture in &fixtures {
        let output_path = temp_dir.path().join(format!(
            "error_{}.svg",
            fixture.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args(fixture, &output_path)).is_ok() {
            unexpectedly_succeeded.push(fixture.clone());
        }
    }

    assert!(
        unexpectedly_succeeded.is_empty(),
        "Error fixtures rendered successfully: {unexpectedly_succeeded:?}"
    );
}

#[test]
fn e2e_view_arguments_shape_output() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = fixtures_dir().join("month_end_close.json");
    let output = temp_dir.path().join("view.svg");

    let mut args = args(&input, &output);
    args.zoom_steps = 50;
    args.pan = Some(Pan { x: -40.0, y: 25.0 });
    args.select = Some("stage-2".to_string());

    run(&args).expect("Failed to render");

    let svg = fs::read_to_string(&output).expect("Failed to read output");
    assert!(svg.contains("scale(3) translate(-40, 25)"));
    assert!(svg.contains("scale(1.05)"));
}

#[test]
fn e2e_unknown_selection_still_renders() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = fixtures_dir().join("approval_chain.json");
    let output = temp_dir.path().join("unknown.svg");

    let mut args = args(&input, &output);
    args.select = Some("stage-99".to_string());

    run(&args).expect("Failed to render");
    let svg = fs::read_to_string(&output).expect("Failed to read output");
    assert!(!svg.contains("scale(1.05)"));
}

#[test]
fn e2e_config_file_is_applied() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[bounds]\nmin_width = 1200\nmin_height = 900\n\n[style]\nbackground_color = \"#f8fafc\"\n",
    )
    .expect("Failed to write config");

    let input = fixtures_dir().join("empty.json");
    let output = temp_dir.path().join("empty.svg");
    let mut args = args(&input, &output);
    args.config = Some(config_path.to_string_lossy().to_string());

    run(&args).expect("Failed to render");
    let svg = fs::read_to_string(&output).expect("Failed to read output");
    assert!(svg.contains(r#"width="1200""#));
    assert!(svg.contains(r#"height="900""#));
}

#[test]
fn e2e_invalid_config_is_rejected() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[layout]\nvertical_spacing = -5\n").expect("Failed to write config");

    let input = fixtures_dir().join("empty.json");
    let output = temp_dir.path().join("never.svg");
    let mut args = args(&input, &output);
    args.config = Some(config_path.to_string_lossy().to_string());

    assert!(run(&args).is_err());
    assert!(!output.exists());
}
