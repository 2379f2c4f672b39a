#[allow(dead_code)]
mod common;

use tempfile::TempDir;

use plante_core::error::PlanteError;
use plante_core::io::image_io::save_png;
use plante_core::pipeline::config::{CalibrationConfig, PipelineConfig};
use plante_core::pipeline::{run_pipeline, GRID_FILE_NAME, OVERLAY_FILE_NAME};
use plante_core::session::Session;

use common::{factor, four_in_a_row, small_params};

fn write_input(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("tray.png");
    save_png(&four_in_a_row(), &path).unwrap();
    path
}

#[test]
fn test_pipeline_writes_all_outputs() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);
    let output_dir = dir.path().join("out");
    let csv = dir.path().join("report.csv");

    let config = PipelineConfig {
        input,
        output_dir: output_dir.clone(),
        conversion_factor: Some(factor(0.1)),
        csv: Some(csv.clone()),
        calibration: None,
        extraction: small_params(4, 1, 4),
    };
    let output = run_pipeline(&config).unwrap();

    assert!(output_dir.join(GRID_FILE_NAME).exists());
    assert!(output_dir.join(OVERLAY_FILE_NAME).exists());
    let grid = image::open(output_dir.join(GRID_FILE_NAME)).unwrap();
    assert_eq!((grid.width(), grid.height()), output.grid.dimensions());

    let text = std::fs::read_to_string(&csv).unwrap();
    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(rows, vec!["A1: 9.0 cm²", "B2: 9.0 cm²", "C3: 9.0 cm²", "D4: 9.0 cm²"]);
}

#[test]
fn test_pipeline_calibrates_from_points() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);

    // 400x120 fits 800x600, so preview points are original pixels.
    let config = PipelineConfig {
        input,
        output_dir: dir.path().join("out"),
        conversion_factor: None,
        csv: None,
        calibration: Some(CalibrationConfig {
            points: vec![[0.0, 0.0], [0.0, 50.0]],
            real_distance: 10.0,
            display_max: (800, 600),
        }),
        extraction: small_params(4, 1, 4),
    };
    let output = run_pipeline(&config).unwrap();
    // factor 0.2, 900 pixels per square
    for line in &output.report.lines {
        approx::assert_relative_eq!(line.area, 36.0, epsilon = 1e-9);
    }
}

#[test]
fn test_missing_input_fails_without_outputs() {
    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("out");
    let config = PipelineConfig {
        input: dir.path().join("nope.png"),
        output_dir: output_dir.clone(),
        conversion_factor: Some(factor(1.0)),
        ..PipelineConfig::default()
    };
    assert!(run_pipeline(&config).is_err());
    assert!(!output_dir.exists());
}

#[test]
fn test_session_processes_selected_image() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);

    let session = Session::new()
        .with_image(&input)
        .with_params(small_params(4, 1, 4))
        .unwrap();
    let err = session
        .process(&plante_core::pipeline::NoOpReporter)
        .unwrap_err();
    assert!(matches!(err, PlanteError::MissingConversionFactor));

    let session = session.with_conversion_factor(factor(0.1));
    let output = session.process(&plante_core::pipeline::NoOpReporter).unwrap();
    assert_eq!(output.report.len(), 4);
}
