//! Trait for the external detection-plus-association backend.

use crate::config::DetectorParams;
use crate::tracker::Detection;

/// Trait for detector/tracker backends.
///
/// Implement this trait to feed any detection model that assigns persistent
/// track ids into the radar. An id must keep referring to the same physical
/// object for as long as the backend maintains the association, and must never
/// be reused for another object within a session.
///
/// # Example
///
/// ```ignore
/// use speedtrack_rs::{Detection, DetectionSource};
///
/// struct MyDetector {
///     // Your model and tracker here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, input: &[u8], width: u32, height: u32) -> Result<Vec<Detection>, Self::Error> {
///         // Run inference plus association and return tracked detections
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error: std::error::Error;

    /// Run inference on one frame and return tracked detections.
    ///
    /// # Arguments
    /// * `input` - Packed RGB8 pixels, row-major
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    ///
    /// # Returns
    /// Detections in the backend's order, or an error. Failures are treated as
    /// an empty pass by the session.
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, Self::Error>;

    /// Receive the session's detector parameters once, before the first frame.
    fn configure(&mut self, _params: &DetectorParams) {}
}

/// Helper trait for converting model-specific outputs to `Detection`.
///
/// Implement this for your model's output format to enable easy conversion.
pub trait IntoDetections {
    /// Convert the output into a vector of detections.
    fn into_detections(self) -> Vec<Detection>;
}

impl IntoDetections for Vec<Detection> {
    fn into_detections(self) -> Vec<Detection> {
        self
    }
}

/// `(track_id, class_label, [x1, y1, x2, y2])` tuples, as most trackers emit them.
impl<S: Into<String>> IntoDetections for Vec<(u64, S, [f32; 4])> {
    fn into_detections(self) -> Vec<Detection> {
        self.into_iter()
            .map(|(id, label, [x1, y1, x2, y2])| Detection::new(id, label, x1, y1, x2, y2, 1.0))
            .collect()
    }
}
