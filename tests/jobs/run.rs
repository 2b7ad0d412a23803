use image::{GrayImage, Luma};
use reliefcarve::{
    run_job_with_progress, BarProgress, CarveConfig, NoProgress, OutputMode, ProgressSink,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_ramp(path: &Path) {
    let mut img = GrayImage::new(40, 20);
    for (x, _y, pixel) in img.enumerate_pixels_mut() {
        *pixel = Luma([(x * 6) as u8]);
    }
    img.save(path).unwrap();
}

fn job(dir: &Path) -> CarveConfig {
    let image = dir.join("ramp.png");
    write_ramp(&image);

    let mut config = CarveConfig::new();
    config.image = image;
    config.channel = reliefcarve::Channel::Luma;
    config.parameters.block.x = 2.0;
    config.parameters.block.y = 1.0;
    config.parameters.block.z = 0.75;
    config.parameters.relief.min_z = 0.25;
    config.parameters.relief.max_z = 0.75;
    config.parameters.relief.tool_radius = 0.1;
    config.parameters.relief.carve_depth = 0.25;
    config.output = OutputMode::Single {
        path: dir.join("out").join("ramp.nc"),
    };
    config
}

#[test]
fn test_single_stream_job() {
    let dir = TempDir::new().unwrap();
    let config = job(dir.path());

    let summary = run_job_with_progress(&config, &mut NoProgress::default()).unwrap();
    assert_eq!(summary.slices, 2);
    assert_eq!(summary.streams, 1);

    let text = fs::read_to_string(dir.path().join("out").join("ramp.nc")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len() as u64, summary.lines_written);
    assert_eq!(lines[0], "X0.0000 Y0.0000 Z2.0000 F60.0000");
    assert_eq!(lines.last().copied(), Some("Z0.0000"));
}

#[test]
fn test_per_pass_job() {
    let dir = TempDir::new().unwrap();
    let mut config = job(dir.path());
    config.output = OutputMode::PerPass {
        directory: dir.path().join("passes"),
        prefix: "slice_".to_string(),
        extension: ".nc".to_string(),
    };

    let summary = run_job_with_progress(&config, &mut NoProgress::default()).unwrap();
    assert_eq!(summary.streams, 2);
    assert_eq!(summary.slices, 2);

    let mut written = 0;
    for index in 0..2 {
        let text =
            fs::read_to_string(dir.path().join("passes").join(format!("slice_{}.nc", index)))
                .unwrap();
        assert!(text.starts_with("X0.0000 Y0.0000 Z2.0000 F60.0000\n"));
        assert!(text.ends_with("Z0.0000\n"));
        written += text.lines().count() as u64;
    }
    assert_eq!(written, summary.lines_written);
}

#[test]
fn test_precision_applies_to_output() {
    let dir = TempDir::new().unwrap();
    let mut config = job(dir.path());
    config.precision = 2;

    run_job_with_progress(&config, &mut NoProgress::default()).unwrap();
    let text = fs::read_to_string(dir.path().join("out").join("ramp.nc")).unwrap();
    assert_eq!(text.lines().next(), Some("X0.00 Y0.00 Z2.00 F60.00"));
}

#[test]
fn test_missing_image_fails() {
    let dir = TempDir::new().unwrap();
    let mut config = job(dir.path());
    config.image = dir.path().join("absent.png");

    assert!(run_job_with_progress(&config, &mut NoProgress::default()).is_err());
    assert!(!dir.path().join("out").join("ramp.nc").exists());
}

#[test]
fn test_job_file_round_trip_runs() {
    let dir = TempDir::new().unwrap();
    let config = job(dir.path());
    let job_path = dir.path().join("job.toml");
    config.save_to_file(&job_path).unwrap();

    let loaded = CarveConfig::load_from_file(&job_path).unwrap();
    let summary = run_job_with_progress(&loaded, &mut NoProgress::default()).unwrap();
    assert_eq!(summary.slices, 2);
}

#[test]
fn test_per_pass_job_without_material_still_parks() {
    let dir = TempDir::new().unwrap();
    let mut config = job(dir.path());
    config.parameters.block.z = 0.25;
    config.output = OutputMode::PerPass {
        directory: dir.path().join("passes"),
        prefix: "slice_".to_string(),
        extension: ".nc".to_string(),
    };

    let summary = run_job_with_progress(&config, &mut NoProgress::default()).unwrap();
    assert_eq!(summary.slices, 0);
    assert_eq!(summary.streams, 1);

    let text = fs::read_to_string(dir.path().join("passes").join("slice_0.nc")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["X0.0000 Y0.0000 Z2.0000 F60.0000", "Z0.0000"]);
}

#[test]
fn test_bar_progress_job() {
    let dir = TempDir::new().unwrap();
    let config = job(dir.path());

    let mut bar = BarProgress::hidden();
    let summary = run_job_with_progress(&config, &mut bar).unwrap();
    assert_eq!(summary.slices, 2);
    // The last pass finished: its bar is full.
    assert_eq!(bar.position(), summary.steps_per_pass);
}
