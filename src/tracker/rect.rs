use nalgebra::Point2;

/// Axis-aligned bounding box in pixel coordinates.
///
/// Stored as TLWH (top-left x, top-left y, width, height). Detections arrive
/// in TLBR form and are converted with [`Rect::from_tlbr`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: f32,
    /// Top-left y coordinate
    pub y: f32,
    /// Width of the bounding box
    pub width: f32,
    /// Height of the bounding box
    pub height: f32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [f32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    /// Get the center point of the bounding box.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Center point as the tracked position. Zero-area boxes are valid.
    #[inline]
    pub fn centroid(&self) -> Point2<f64> {
        let (cx, cy) = self.center();
        Point2::new(cx as f64, cy as f64)
    }

    /// Get the area of the bounding box.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Integer pixel corners `(x1, y1, x2, y2)`, truncated the way drawing expects.
    ///
    /// Out-of-range coordinates saturate to `i32::MIN`/`i32::MAX`; NaN becomes 0.
    #[inline]
    pub fn pixel_corners(&self) -> (i32, i32, i32, i32) {
        let [x1, y1, x2, y2] = self.to_tlbr();
        (x1 as i32, y1 as i32, x2 as i32, y2 as i32)
    }
}
