mod detection;
mod motion_estimator;
mod observation;
mod rect;
mod track;

pub use detection::Detection;
pub use motion_estimator::{MotionConfig, MotionEstimator, RenderRecord};
pub use observation::{Kinematics, Observation};
pub use rect::Rect;
pub use track::Track;
