//! Kinematic history of a single tracked object.

use nalgebra::Point2;

use crate::tracker::observation::{Kinematics, Observation};

/// Per-object track state, keyed by the external tracker's id.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Identifier assigned by the external tracker
    pub track_id: u64,
    /// Class name of the most recent sighting
    pub class_label: String,
    /// Centroid of the most recent sighting, in pixels
    pub last_position: Point2<f64>,
    /// Time of the first sighting, in seconds
    pub first_timestamp: f64,
    /// Time of the most recent sighting, in seconds
    pub last_timestamp: f64,
    /// Most recent instantaneous speed, in display units (0 until a second sighting)
    pub last_speed: f64,
    /// Most recent acceleration, in display units per second
    pub last_acceleration: f64,
    /// Total distance travelled, in calibrated base units
    pub cumulative_distance: f64,
    /// Number of sightings, including the first
    pub observations: u32,
}

impl Track {
    /// Create a track from its first sighting.
    pub fn new(
        track_id: u64,
        class_label: impl Into<String>,
        position: Point2<f64>,
        timestamp: f64,
    ) -> Self {
        Self {
            track_id,
            class_label: class_label.into(),
            last_position: position,
            first_timestamp: timestamp,
            last_timestamp: timestamp,
            last_speed: 0.0,
            last_acceleration: 0.0,
            cumulative_distance: 0.0,
            observations: 1,
        }
    }

    /// Fold a new sighting into the track.
    ///
    /// A sighting whose timestamp does not advance (`dt <= 0`) only refreshes
    /// the position; speed, acceleration and distance are left as they were.
    pub fn observe(
        &mut self,
        position: Point2<f64>,
        timestamp: f64,
        pixels_per_unit: f64,
        unit_factor: f64,
    ) -> Observation {
        self.observations += 1;

        let dt = timestamp - self.last_timestamp;
        if dt.is_nan() || dt <= 0.0 {
            self.last_position = position;
            self.last_timestamp = self.last_timestamp.max(timestamp);
            return Observation::Stale;
        }

        let dist_px = nalgebra::distance(&self.last_position, &position);
        let distance = dist_px / pixels_per_unit;
        let speed = distance / dt * unit_factor;
        let acceleration = (speed - self.last_speed) / dt;

        self.last_position = position;
        self.last_timestamp = timestamp;
        self.last_speed = speed;
        self.last_acceleration = acceleration;
        self.cumulative_distance += distance;

        Observation::Moved(Kinematics {
            speed,
            acceleration,
            distance,
        })
    }

    /// Seconds since the last sighting.
    #[inline]
    pub fn idle_for(&self, now: f64) -> f64 {
        now - self.last_timestamp
    }

    /// Seconds between the first and the last sighting.
    #[inline]
    pub fn age(&self) -> f64 {
        self.last_timestamp - self.first_timestamp
    }
}
