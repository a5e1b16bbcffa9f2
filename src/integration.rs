//! Integration module connecting an external detector/tracker with the radar.
//!
//! This module provides the detector trait, the sampling governor that
//! rate-limits it, and the per-stream session that runs one frame end to end.

mod builder;
mod detector;
mod governor;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, IntoDetections};
pub use governor::{GovernorStats, SamplingGovernor};
pub use pipeline::{RadarSession, SessionStats};
