use std::collections::VecDeque;

use image::{Rgb, RgbImage};
use speedtrack_rs::{Detection, DetectionSource, RadarConfig, RadarSession, SpeedUnit};

const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

#[derive(Debug, thiserror::Error)]
#[error("camera unplugged")]
struct DetectorDown;

/// Replays one scripted result per detector call; empty once the script runs out.
struct ScriptedDetector {
    script: VecDeque<Result<Vec<Detection>, DetectorDown>>,
}

impl ScriptedDetector {
    fn new(script: Vec<Result<Vec<Detection>, DetectorDown>>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

impl DetectionSource for ScriptedDetector {
    type Error = DetectorDown;

    fn detect(
        &mut self,
        _input: &[u8],
        _width: u32,
        _height: u32,
    ) -> Result<Vec<Detection>, Self::Error> {
        self.script.pop_front().unwrap_or(Ok(vec![]))
    }
}

/// 40x40 box centred on `(cx, cy)`.
fn seen(track_id: u64, cx: f32, cy: f32) -> Detection {
    Detection::new(track_id, "car", cx - 20.0, cy - 20.0, cx + 20.0, cy + 20.0, 0.9)
}

fn frame() -> RgbImage {
    RgbImage::from_pixel(320, 240, Rgb([100, 100, 100]))
}

fn config() -> RadarConfig {
    RadarConfig {
        unit: SpeedUnit::MetersPerSecond,
        pixels_per_unit: 50.0,
        min_reported_speed: 1.2,
        ..RadarConfig::default()
    }
}

#[test]
fn test_moving_object_is_reported_and_drawn() {
    let detector = ScriptedDetector::new(vec![
        Ok(vec![seen(7, 100.0, 100.0)]),
        Ok(vec![seen(7, 150.0, 100.0)]),
    ]);
    let mut session = RadarSession::new(detector, &config()).unwrap();

    // Frame 1: creation only
    let out = session.process_at(frame(), 0.0);
    assert!(session.records().is_empty());
    assert!(out.pixels().all(|p| *p != GREEN));

    // Frame 2: 50 px at 50 px/m over 0.5 s
    let out = session.process_at(frame(), 0.5);
    let records = session.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].track_id, 7);
    assert!((records[0].speed - 2.0).abs() < 1e-9);
    assert!((records[0].acceleration - 4.0).abs() < 1e-9);
    assert_eq!(out.get_pixel(130, 100), &GREEN);
    assert_eq!(out.get_pixel(20, 20), &BLACK);

    let track = session.estimator().track(7).unwrap();
    assert!((track.cumulative_distance - 1.0).abs() < 1e-9);

    // Frame 3: inference skipped, overlay persists
    let out = session.process_at(frame(), 0.55);
    assert_eq!(session.stats().inference_runs, 2);
    assert_eq!(out.get_pixel(130, 100), &GREEN);
    assert_eq!(session.hud_record().map(|r| r.track_id), Some(7));
}

#[test]
fn test_slow_object_is_not_annotated() {
    let detector = ScriptedDetector::new(vec![
        Ok(vec![seen(3, 100.0, 100.0)]),
        Ok(vec![seen(3, 110.0, 100.0)]),
    ]);
    let mut session = RadarSession::new(detector, &config()).unwrap();

    session.process_at(frame(), 0.0);
    // 10 px / 50 / 1 s = 0.2 m/s
    let out = session.process_at(frame(), 1.0);

    assert!(session.records().is_empty());
    assert!(session.hud_record().is_none());
    assert!(out.pixels().all(|p| *p != GREEN && *p != BLACK));

    let track = session.estimator().track(3).unwrap();
    assert!((track.last_speed - 0.2).abs() < 1e-9);
}

#[test]
fn test_detector_failure_is_absorbed() {
    let detector = ScriptedDetector::new(vec![
        Ok(vec![seen(1, 50.0, 150.0)]),
        Ok(vec![seen(1, 150.0, 150.0)]),
        Err(DetectorDown),
        Ok(vec![seen(1, 250.0, 150.0)]),
    ]);
    let mut session = RadarSession::new(detector, &config()).unwrap();

    session.process_at(frame(), 0.0);
    session.process_at(frame(), 1.0);
    let before = session.records().to_vec();
    assert_eq!(before.len(), 1);

    let out = session.process_at(frame(), 2.0);
    assert_eq!(session.stats().detector_failures, 1);
    assert_eq!(session.records(), before.as_slice());
    assert_eq!(out.get_pixel(130, 150), &GREEN);

    // Stream continues after the failure
    session.process_at(frame(), 3.0);
    let track = session.estimator().track(1).unwrap();
    assert_eq!(track.observations, 3);
    // 100 px over 2 s since the last successful pass
    assert!((track.last_speed - 1.0).abs() < 1e-9);
}

#[test]
fn test_idle_tracks_are_evicted_when_configured() {
    let detector = ScriptedDetector::new(vec![
        Ok(vec![seen(1, 50.0, 50.0), seen(2, 200.0, 50.0)]),
        Ok(vec![seen(2, 200.0, 50.0)]),
        Ok(vec![seen(2, 200.0, 50.0)]),
    ]);
    let config = RadarConfig {
        idle_eviction_secs: Some(1.0),
        ..config()
    };
    let mut session = RadarSession::new(detector, &config).unwrap();

    session.process_at(frame(), 0.0);
    session.process_at(frame(), 0.8);
    assert_eq!(session.estimator().len(), 2);

    session.process_at(frame(), 1.6);
    assert_eq!(session.estimator().len(), 1);
    assert!(session.estimator().track(1).is_none());
}

#[test]
fn test_tracks_are_kept_by_default() {
    let detector = ScriptedDetector::new(vec![Ok(vec![seen(1, 50.0, 50.0)])]);
    let mut session = RadarSession::new(detector, &config()).unwrap();

    for i in 0..20 {
        session.process_at(frame(), i as f64 * 10.0);
    }
    assert_eq!(session.estimator().len(), 1);
    assert_eq!(session.stats().empty_passes, 19);
}

#[test]
fn test_missing_font_fails_session_creation() {
    let config = RadarConfig {
        font_path: Some("/no/such/font.ttf".into()),
        ..config()
    };
    let result = RadarSession::new(ScriptedDetector::new(vec![]), &config);
    assert!(matches!(result, Err(speedtrack_rs::RadarError::Io { .. })));
}
