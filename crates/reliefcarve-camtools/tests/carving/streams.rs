use image::{GrayImage, Luma};
use reliefcarve_camtools::{CarveError, ReliefCarver};
use reliefcarve_core::{CarveParameters, Channel, NoProgress};
use std::fs;

fn write_test_png(name: &str) -> std::path::PathBuf {
    let test_dir = std::env::temp_dir().join("reliefcarve_tests");
    fs::create_dir_all(&test_dir).ok();
    let path = test_dir.join(name);

    let mut img = GrayImage::new(50, 25);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let dx = x as i32 - 25;
        let dy = y as i32 - 12;
        let d2 = (dx * dx + dy * dy) as u32;
        *pixel = Luma([255u32.saturating_sub(d2 * 2).min(255) as u8]);
    }
    img.save(&path).unwrap();
    path
}

fn params() -> CarveParameters {
    let mut params = CarveParameters::default();
    params.block.x = 2.0;
    params.block.y = 1.0;
    params.block.z = 1.0;
    params.relief.min_z = 0.25;
    params.relief.max_z = 0.875;
    params.relief.tool_radius = 0.125;
    params.relief.carve_depth = 0.25;
    params.relief.slice_shave = 0.01;
    params
}

fn assert_field_order(line: &str) {
    let order = ['X', 'Y', 'Z', 'F'];
    let mut last = None;
    for field in line.split_whitespace() {
        let letter = field.chars().next().unwrap();
        let pos = order.iter().position(|&c| c == letter).unwrap();
        if let Some(prev) = last {
            assert!(pos > prev, "fields out of order in {:?}", line);
        }
        last = Some(pos);
        field[1..].parse::<f64>().unwrap();
    }
}

#[test]
fn test_file_to_single_stream() {
    let path = write_test_png("dome_single.png");
    let carver = ReliefCarver::from_file(&path, Channel::Luma, params()).unwrap();
    assert_eq!(carver.schedule().count(), 3);

    let mut out = Vec::new();
    let summary = carver.generate(&mut out, &mut NoProgress::default()).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(summary.slices, 3);
    assert_eq!(summary.lines_written, text.lines().count() as u64);
    for line in text.lines() {
        assert!(!line.is_empty());
        assert_field_order(line);
    }

    fs::remove_file(&path).ok();
}

#[test]
fn test_per_pass_streams_restate_state() {
    let path = write_test_png("dome_passes.png");
    let carver = ReliefCarver::from_file(&path, Channel::Red, params()).unwrap();

    let mut total = 0;
    for slice in carver.schedule().iter() {
        let mut out = Vec::new();
        let summary = carver
            .generate_pass(&slice, &mut out, &mut NoProgress::default())
            .unwrap();
        assert_eq!(summary.slices, 1);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text.lines().next(),
            Some("X0.0000 Y0.0000 Z2.0000 F60.0000")
        );
        assert_eq!(text.lines().last(), Some("Z0.0000"));
        total += 1;
    }
    assert_eq!(total, 3);

    fs::remove_file(&path).ok();
}

#[test]
fn test_intermediate_passes_keep_shave() {
    let path = write_test_png("dome_shave.png");
    let carver = ReliefCarver::from_file(&path, Channel::Red, params()).unwrap();
    let taxi_z = carver.params().block.taxi_z;

    for slice in carver.schedule().iter() {
        let lowest = carver
            .pass_waypoints(&slice)
            .iter()
            .filter(|w| w.z < taxi_z)
            .map(|w| w.z)
            .fold(f64::INFINITY, f64::min);
        // The dark corners clamp to the floor, so the pass bottoms out there.
        assert!((lowest - (slice.floor + slice.shave)).abs() < 1e-12);
    }

    fs::remove_file(&path).ok();
}

#[test]
fn test_missing_image_is_load_error() {
    let result = ReliefCarver::from_file("/nonexistent/dome.png", Channel::Red, params());
    assert!(matches!(result, Err(CarveError::LoadError(_))));
}

#[test]
fn test_bad_params_reported_before_loading() {
    let mut p = params();
    p.relief.max_z = 0.1;
    let result = ReliefCarver::from_file("/nonexistent/dome.png", Channel::Red, p);
    assert!(matches!(result, Err(CarveError::Parameter(_))));
}
