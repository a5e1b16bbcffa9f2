//! Detector/tracker output consumed by the motion estimator.

use crate::tracker::rect::Rect;

/// One tracked detection from a single inference pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Identifier assigned by the external tracker, stable for the same object
    pub track_id: u64,
    /// Class name from the detector's vocabulary
    pub class_label: String,
    /// Bounding box (built from TLBR coordinates)
    pub bbox: Rect,
    /// Detection confidence score
    pub score: f32,
}

impl Detection {
    pub fn new(
        track_id: u64,
        class_label: impl Into<String>,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        score: f32,
    ) -> Self {
        Self {
            track_id,
            class_label: class_label.into(),
            bbox: Rect::from_tlbr(x1, y1, x2, y2),
            score,
        }
    }

    pub fn from_rect(
        track_id: u64,
        class_label: impl Into<String>,
        bbox: Rect,
        score: f32,
    ) -> Self {
        Self {
            track_id,
            class_label: class_label.into(),
            bbox,
            score,
        }
    }
}
