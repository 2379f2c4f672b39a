#[allow(dead_code)]
mod common;

use std::collections::HashSet;

use approx::assert_relative_eq;

use plante_core::error::PlanteError;
use plante_core::labels::LabelPreset;
use plante_core::pipeline::{run_extraction, NoOpReporter};
use plante_core::render::grid::grid_dimensions;

use common::{factor, four_in_a_row, green, paint_square, small_params, soil, SQUARE};

#[test]
fn test_four_squares_left_to_right() {
    let image = four_in_a_row();
    let params = small_params(4, 1, 4);

    let out = run_extraction(&image, &params, Some(factor(0.1)), &NoOpReporter).unwrap();

    assert_eq!(out.regions.len(), 4);
    let labels: Vec<&str> = out.regions.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["A1", "B2", "C3", "D4"]);

    let xs: Vec<u32> = out.regions.iter().map(|r| r.center.0).collect();
    assert!(xs.windows(2).all(|w| w[0] < w[1]), "not left to right: {xs:?}");

    for region in &out.regions {
        assert_eq!(region.pixel_count, (SQUARE * SQUARE) as u64);
        assert_relative_eq!(region.area, 9.0, epsilon = 1e-9);
    }
}

#[test]
fn test_crop_contains_whole_sample() {
    let image = four_in_a_row();
    let out = run_extraction(&image, &small_params(4, 1, 4), Some(factor(1.0)), &NoOpReporter)
        .unwrap();

    let first = &out.regions[0];
    assert!(first.crop.x <= 20 && first.crop.x + first.crop.width >= 20 + SQUARE);
    assert!(first.crop.y <= 40 && first.crop.y + first.crop.height >= 40 + SQUARE);
    // Every crop shares the longest side of the dilated boxes.
    let sides: HashSet<(u32, u32)> = out
        .regions
        .iter()
        .map(|r| (r.crop.width, r.crop.height))
        .collect();
    assert_eq!(sides.len(), 1);
}

#[test]
fn test_area_scales_with_square_of_factor() {
    let image = four_in_a_row();
    let params = small_params(4, 1, 4);

    let base = run_extraction(&image, &params, Some(factor(0.05)), &NoOpReporter).unwrap();
    let doubled = run_extraction(&image, &params, Some(factor(0.1)), &NoOpReporter).unwrap();

    for (a, b) in base.regions.iter().zip(&doubled.regions) {
        assert_eq!(a.label, b.label);
        assert_relative_eq!(b.area, a.area * 4.0, epsilon = 1e-3);
    }
}

#[test]
fn test_labels_are_a_bijection_and_report_has_one_line_each() {
    let image = four_in_a_row();
    let mut params = small_params(4, 1, 4);
    params.label_preset = LabelPreset::Field;

    let out = run_extraction(&image, &params, Some(factor(0.1)), &NoOpReporter).unwrap();

    let ranks: Vec<usize> = out.regions.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4]);
    let unique: HashSet<&str> = out.regions.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(unique.len(), 4);

    let lines = out.report.to_lines();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "U1: 9.0 cm²");
    assert_eq!(lines[1], "U6: 9.0 cm²");
    assert_relative_eq!(out.report.total_area(), 36.0, epsilon = 1e-9);
}

#[test]
fn test_row_major_order_independent_of_mass() {
    // Two rows of four; brightness (and so mass) shuffled across positions,
    // with a few pixels of vertical jitter inside each row.
    let mut image = soil(400, 220);
    let row0 = [(20, 20, 130), (110, 24, 250), (200, 18, 170), (290, 22, 210)];
    let row1 = [(20, 120, 230), (110, 126, 150), (200, 122, 190), (290, 118, 110)];
    for &(x, y, g) in row0.iter().chain(row1.iter()) {
        paint_square(&mut image, x, y, green(g));
    }

    let params = small_params(8, 2, 4);
    let out = run_extraction(&image, &params, Some(factor(1.0)), &NoOpReporter).unwrap();

    let expected_x = [35, 125, 215, 305];
    for (i, region) in out.regions.iter().enumerate() {
        let row = i / 4;
        let col = i % 4;
        assert!(
            region.center.0.abs_diff(expected_x[col]) <= 2,
            "rank {} at x={} expected column {col}",
            region.rank,
            region.center.0
        );
        if row == 0 {
            assert!(region.center.1 < 100);
        } else {
            assert!(region.center.1 > 100);
        }
    }
    let labels: Vec<&str> = out.regions.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["A1", "B2", "C3", "D4", "E5", "F6", "G7", "H8"]);
}

#[test]
fn test_heaviest_regions_win_when_truncating() {
    let mut image = soil(400, 120);
    let greens = [90, 250, 100, 240];
    for (x, g) in [20, 110, 200, 290].into_iter().zip(greens) {
        paint_square(&mut image, x, 40, green(g));
    }

    let mut params = small_params(2, 1, 4);
    params.samples_per_row = 2;
    let out = run_extraction(&image, &params, Some(factor(1.0)), &NoOpReporter).unwrap();

    let xs: Vec<u32> = out.regions.iter().map(|r| r.center.0).collect();
    assert_eq!(out.regions.len(), 2);
    assert!(xs[0] < 150 && xs[1] > 250, "kept {xs:?}");
}

#[test]
fn test_samples_on_the_left_edge_are_found() {
    // One square flush with column 0, one two pixels inside it.
    let mut image = soil(200, 200);
    paint_square(&mut image, 0, 20, green(200));
    paint_square(&mut image, 2, 120, green(200));

    let mut params = small_params(2, 2, 1);
    params.samples_per_row = 1;
    let out = run_extraction(&image, &params, Some(factor(1.0)), &NoOpReporter).unwrap();

    assert_eq!(out.regions.len(), 2);
    assert!(out.regions[0].center.1 < out.regions[1].center.1);
    for region in &out.regions {
        assert_eq!(region.crop.x, 0);
        assert_eq!(region.pixel_count, (SQUARE * SQUARE) as u64);
    }
}

#[test]
fn test_small_fragments_are_discarded() {
    let mut image = four_in_a_row();
    for y in 100..104 {
        for x in 380..384 {
            image.put_pixel(x, y, green(200));
        }
    }
    let out = run_extraction(&image, &small_params(4, 1, 4), Some(factor(1.0)), &NoOpReporter)
        .unwrap();
    assert_eq!(out.regions.len(), 4);
}

#[test]
fn test_no_green_means_no_regions() {
    let image = soil(200, 100);
    let err = run_extraction(&image, &small_params(4, 1, 4), Some(factor(1.0)), &NoOpReporter)
        .unwrap_err();
    assert!(matches!(err, PlanteError::NoRegionsFound));
}

#[test]
fn test_fewer_regions_than_expected() {
    let image = four_in_a_row();
    let mut params = small_params(8, 2, 4);

    let out = run_extraction(&image, &params, Some(factor(1.0)), &NoOpReporter).unwrap();
    assert_eq!(out.regions.len(), 4);

    params.require_full_count = true;
    let err = run_extraction(&image, &params, Some(factor(1.0)), &NoOpReporter).unwrap_err();
    assert!(matches!(
        err,
        PlanteError::TooFewRegions {
            found: 4,
            expected: 8
        }
    ));
}

#[test]
fn test_missing_factor_is_rejected() {
    let image = four_in_a_row();
    let err = run_extraction(&image, &small_params(4, 1, 4), None, &NoOpReporter).unwrap_err();
    assert!(matches!(err, PlanteError::MissingConversionFactor));
}

#[test]
fn test_invalid_params_fail_before_processing() {
    let image = four_in_a_row();
    let mut params = small_params(4, 1, 4);
    params.grid_columns = 2;
    let err = run_extraction(&image, &params, Some(factor(1.0)), &NoOpReporter).unwrap_err();
    assert!(matches!(err, PlanteError::GridTooSmall { .. }));
}

#[test]
fn test_visualizations_have_expected_shape() {
    let image = four_in_a_row();
    let out = run_extraction(&image, &small_params(4, 1, 4), Some(factor(1.0)), &NoOpReporter)
        .unwrap();

    assert_eq!(out.overlay.dimensions(), image.dimensions());
    assert_eq!(out.grid.dimensions(), grid_dimensions(1, 4));
    assert_eq!(out.isolated.get_pixel(0, 0), &image::Rgb([0, 0, 0]));
    assert_eq!(out.isolated.get_pixel(25, 45), &green(200));
}

#[test]
fn test_extraction_is_deterministic() {
    let image = four_in_a_row();
    let params = small_params(4, 1, 4);
    let a = run_extraction(&image, &params, Some(factor(0.3)), &NoOpReporter).unwrap();
    let b = run_extraction(&image, &params, Some(factor(0.3)), &NoOpReporter).unwrap();
    assert_eq!(a.report, b.report);
    assert_eq!(a.grid, b.grid);
    assert_eq!(a.overlay, b.overlay);
}
