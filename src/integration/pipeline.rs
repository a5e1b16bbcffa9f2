//! RadarSession: one video stream, processed frame by frame.

use std::time::Instant;

use image::RgbImage;
use tracing::{debug, warn};

use crate::config::RadarConfig;
use crate::error::Result;
use crate::overlay::{OverlayRenderer, load_font};
use crate::tracker::{MotionEstimator, RenderRecord};

use super::{DetectionSource, SamplingGovernor};

/// Per-session counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Frames processed
    pub frames: u64,
    /// Detector calls allowed by the governor
    pub inference_runs: u64,
    /// Detector calls that returned an error
    pub detector_failures: u64,
    /// Detector calls that returned no detections
    pub empty_passes: u64,
}

/// A radar session bundling a detector with motion estimation and rendering.
///
/// The session owns the track table for one stream. Frames are processed to
/// completion one at a time; dropping the session discards every track.
pub struct RadarSession<D: DetectionSource> {
    detector: D,
    governor: SamplingGovernor,
    estimator: MotionEstimator,
    renderer: OverlayRenderer,
    records: Vec<RenderRecord>,
    hud: Option<RenderRecord>,
    started: Instant,
    stats: SessionStats,
}

impl<D: DetectionSource> RadarSession<D> {
    /// Create a session from a detector and a configuration.
    ///
    /// Fails only if `font_path` is set and the font cannot be loaded.
    pub fn new(detector: D, config: &RadarConfig) -> Result<Self> {
        let mut renderer = OverlayRenderer::new(config.grid_spacing_px, config.unit);
        if let Some(path) = &config.font_path {
            renderer = renderer.with_font(load_font(path)?);
        }

        Ok(Self::with_renderer(detector, config, renderer))
    }

    /// Create a session with a prepared renderer, e.g. one sharing a font.
    pub fn with_renderer(mut detector: D, config: &RadarConfig, renderer: OverlayRenderer) -> Self {
        detector.configure(&config.detector);

        debug!(
            unit = %config.unit,
            pixels_per_unit = config.pixels_per_unit,
            interval = config.inference_interval_secs,
            "radar session started"
        );

        Self {
            detector,
            governor: SamplingGovernor::new(config.inference_interval_secs),
            estimator: MotionEstimator::new(config.motion()),
            renderer,
            records: Vec::new(),
            hud: None,
            started: Instant::now(),
            stats: SessionStats::default(),
        }
    }

    /// Process a frame stamped with the wall-clock time since the session started.
    pub fn process(&mut self, frame: RgbImage) -> RgbImage {
        let now = self.started.elapsed().as_secs_f64();
        self.process_at(frame, now)
    }

    /// Process a frame stamped with `timestamp` seconds.
    ///
    /// Runs the detector only when the governor allows it, folds the result into
    /// the track table, then paints the overlay from the latest records. Never
    /// fails: a detector error leaves the previous records on screen.
    pub fn process_at(&mut self, mut frame: RgbImage, timestamp: f64) -> RgbImage {
        self.stats.frames += 1;

        if self.governor.should_run(timestamp) {
            self.run_inference(&frame, timestamp);
        }

        self.renderer.render(&mut frame, &self.records, self.hud.as_ref());
        frame
    }

    fn run_inference(&mut self, frame: &RgbImage, timestamp: f64) {
        self.stats.inference_runs += 1;

        let detections = match self
            .detector
            .detect(frame.as_raw(), frame.width(), frame.height())
        {
            Ok(detections) => detections,
            Err(err) => {
                self.stats.detector_failures += 1;
                warn!(error = %err, timestamp, "detector failed, keeping last state");
                return;
            }
        };

        self.estimator.evict_idle(timestamp);

        if detections.is_empty() {
            self.stats.empty_passes += 1;
            return;
        }

        let records = self.estimator.update(&detections, timestamp);
        if let Some(last) = records.last() {
            self.hud = Some(last.clone());
        }
        self.records = records;
    }

    /// Records currently painted on every frame.
    pub fn records(&self) -> &[RenderRecord] {
        &self.records
    }

    /// Record shown in the heads-up panel.
    pub fn hud_record(&self) -> Option<&RenderRecord> {
        self.hud.as_ref()
    }

    pub fn estimator(&self) -> &MotionEstimator {
        &self.estimator
    }

    pub fn governor(&self) -> &SamplingGovernor {
        &self.governor
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }
}
