//! File round-trips through a temp directory.

use std::collections::BTreeSet;

use fl_core::{Coord, SimConfig, simulate_points};
use fl_io::{Canvas, GifRecorder, IoError, read_life105_file, write_life105_file};
use tempfile::TempDir;

fn glider() -> BTreeSet<Coord> {
    [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]
        .into_iter()
        .map(Coord::from)
        .collect()
}

#[test]
fn pattern_file_roundtrip_keeps_position() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("glider.lif");
    let shifted: BTreeSet<Coord> = glider().into_iter().map(|c| c.offset(-7, 12)).collect();

    write_life105_file(&shifted, &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("#Life 1.05\n#P -7 12\n"));

    assert_eq!(read_life105_file(0, 0, &path).unwrap(), shifted);
}

#[test]
fn missing_pattern_file_names_the_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.lif");
    let err = read_life105_file(0, 0, &path).unwrap_err();
    assert!(matches!(err, IoError::Io { .. }));
    assert!(err.to_string().contains("nope.lif"));
}

#[test]
fn recorder_writes_animation_and_last_frame() {
    let dir = TempDir::new().unwrap();
    let cfg = SimConfig::with_sharpness(50.0);
    let mut sim = simulate_points(&cfg, glider()).unwrap();
    let mut recorder = GifRecorder::new(Canvas::new(64, 48));
    let summary = sim.run(8, &mut recorder);

    assert!(!summary.decayed);
    assert_eq!(recorder.frames().len(), 9);

    let gif = dir.path().join("run.gif");
    recorder.write_animation(&gif, 50).unwrap();
    assert!(std::fs::metadata(&gif).unwrap().len() > 0);

    let png = dir.path().join("last.png");
    recorder.write_last(&png).unwrap();
    let img = image::open(&png).unwrap();
    assert_eq!((img.width(), img.height()), (64, 48));
}

#[test]
fn empty_recorder_refuses_to_write() {
    let dir = TempDir::new().unwrap();
    let recorder = GifRecorder::new(Canvas::new(8, 8));
    assert!(matches!(
        recorder.write_animation(&dir.path().join("x.gif"), 10),
        Err(IoError::NoFrames)
    ));
    assert!(matches!(
        recorder.write_last(&dir.path().join("x.png")),
        Err(IoError::NoFrames)
    ));
}
