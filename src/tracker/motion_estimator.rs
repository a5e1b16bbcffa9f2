//! Per-session motion estimator: track table, kinematics and significance gate.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::tracker::detection::Detection;
use crate::tracker::observation::Observation;
use crate::tracker::rect::Rect;
use crate::tracker::track::Track;

/// Configuration for the MotionEstimator.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionConfig {
    /// Pixels per calibrated base unit (meter)
    pub pixels_per_unit: f64,
    /// Factor from m/s to the display unit, resolved once per session
    pub unit_factor: f64,
    /// Tracks at or below this speed are not reported
    pub min_reported_speed: f64,
    /// Idle time after which a track is dropped; `None` disables eviction
    pub idle_eviction_secs: Option<f64>,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            pixels_per_unit: 35.0,
            unit_factor: 3.6,
            min_reported_speed: 1.2,
            idle_eviction_secs: None,
        }
    }
}

/// What the renderer needs to annotate one moving object.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRecord {
    pub track_id: u64,
    pub class_label: String,
    pub bbox: Rect,
    pub speed: f64,
    pub acceleration: f64,
}

pub struct MotionEstimator {
    tracks: HashMap<u64, Track>,
    config: MotionConfig,
}

impl MotionEstimator {
    pub fn new(config: MotionConfig) -> Self {
        Self {
            tracks: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Fold one inference pass into the track table.
    ///
    /// Returns a record for every track that moved faster than the significance
    /// threshold during this pass, in detection order. Unseen ids create a
    /// track silently; stale timestamps refresh position only. Detections with a
    /// non-finite centroid, and passes with a non-finite timestamp, are ignored.
    pub fn update(&mut self, detections: &[Detection], timestamp: f64) -> Vec<RenderRecord> {
        let mut records = Vec::new();
        if !timestamp.is_finite() {
            debug!(timestamp, "non-finite timestamp, pass ignored");
            return records;
        }

        for det in detections {
            let position = det.bbox.centroid();
            if !(position.x.is_finite() && position.y.is_finite()) {
                debug!(track_id = det.track_id, "non-finite centroid, detection ignored");
                continue;
            }

            let observation = match self.tracks.get_mut(&det.track_id) {
                Some(track) => {
                    track.class_label.clone_from(&det.class_label);
                    track.observe(
                        position,
                        timestamp,
                        self.config.pixels_per_unit,
                        self.config.unit_factor,
                    )
                }
                None => {
                    debug!(
                        track_id = det.track_id,
                        class = %det.class_label,
                        x = position.x,
                        y = position.y,
                        "new track"
                    );
                    self.tracks.insert(
                        det.track_id,
                        Track::new(det.track_id, det.class_label.clone(), position, timestamp),
                    );
                    Observation::Created
                }
            };

            match observation {
                Observation::Created => {}
                Observation::Stale => {
                    debug!(
                        track_id = det.track_id,
                        timestamp, "timestamp did not advance, kinematics skipped"
                    );
                }
                Observation::Moved(k) if k.speed > self.config.min_reported_speed => {
                    records.push(RenderRecord {
                        track_id: det.track_id,
                        class_label: det.class_label.clone(),
                        bbox: det.bbox,
                        speed: k.speed,
                        acceleration: k.acceleration,
                    });
                }
                Observation::Moved(k) => {
                    trace!(track_id = det.track_id, speed = k.speed, "below significance gate");
                }
            }
        }

        records
    }

    /// Drop tracks idle for longer than the configured eviction window.
    ///
    /// Returns the number of tracks removed; always 0 when eviction is disabled.
    pub fn evict_idle(&mut self, now: f64) -> usize {
        let Some(max_idle) = self.config.idle_eviction_secs else {
            return 0;
        };

        let before = self.tracks.len();
        self.tracks.retain(|_, track| track.idle_for(now) <= max_idle);
        let evicted = before - self.tracks.len();
        if evicted > 0 {
            debug!(evicted, remaining = self.tracks.len(), "evicted idle tracks");
        }
        evicted
    }

    pub fn track(&self, track_id: u64) -> Option<&Track> {
        self.tracks.get(&track_id)
    }

    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Forget every track.
    pub fn reset(&mut self) {
        self.tracks.clear();
    }
}
