//! Multi-object speed and acceleration radar.
//!
//! Detections carrying persistent track ids come from an external
//! detector/tracker ([`DetectionSource`]). A [`RadarSession`] rate-limits that
//! detector, turns consecutive centroids of each id into calibrated speed and
//! acceleration, and paints a grid, per-object labels and a heads-up panel onto
//! every frame.
//!
//! ```ignore
//! use speedtrack_rs::{RadarConfig, RadarSession};
//!
//! let config = RadarConfig::load("radar.json")?;
//! let mut session = RadarSession::new(my_detector, &config)?;
//! for frame in frames {
//!     let annotated = session.process(frame);
//!     display(annotated);
//! }
//! ```

pub mod config;
pub mod error;
pub mod integration;
pub mod overlay;
pub mod tracker;

pub use config::{DetectorParams, RadarConfig, SpeedUnit};
pub use error::{RadarError, Result};
pub use integration::{
    DetectionBuilder, DetectionSource, GovernorStats, IntoDetections, RadarSession,
    SamplingGovernor, SessionStats,
};
pub use overlay::{OverlayRenderer, OverlayStyle};
pub use tracker::{
    Detection, Kinematics, MotionConfig, MotionEstimator, Observation, Rect, RenderRecord, Track,
};
