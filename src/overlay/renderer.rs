//! Paints the radar overlay onto a frame.

use std::fs;
use std::path::Path;

use ab_glyph::{FontArc, FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect as PixelRect;

use crate::config::SpeedUnit;
use crate::error::{RadarError, Result};
use crate::overlay::grid::draw_grid;
use crate::overlay::label::{annotation_label, hud_lines};
use crate::tracker::RenderRecord;

/// Colors and sizes used by the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    pub box_color: Rgb<u8>,
    pub text_color: Rgb<u8>,
    pub hud_background: Rgb<u8>,
    /// Outline thickness in pixels
    pub box_thickness: u32,
    pub label_scale: f32,
    pub hud_scale: f32,
    /// Gap between the top of a box and the baseline of its label
    pub label_offset: i32,
    /// Panel corners, inclusive: (x1, y1, x2, y2)
    pub hud_panel: (i32, i32, i32, i32),
    /// Top-left corner of each heads-up line
    pub hud_lines: [(i32, i32); 2],
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            box_color: Rgb([0, 255, 0]),
            text_color: Rgb([0, 255, 0]),
            hud_background: Rgb([0, 0, 0]),
            box_thickness: 2,
            label_scale: 20.0,
            hud_scale: 18.0,
            label_offset: 10,
            hud_panel: (10, 10, 250, 80),
            hud_lines: [(20, 20), (20, 45)],
        }
    }
}

/// Load a TrueType/OpenType font for annotation text.
pub fn load_font(path: impl AsRef<Path>) -> Result<FontArc> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| RadarError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(FontArc::new(FontVec::try_from_vec(bytes)?))
}

/// Draws grid, per-object annotations and the heads-up panel.
///
/// Shapes are always drawn; text only when a font is set.
#[derive(Clone)]
pub struct OverlayRenderer {
    grid_spacing: u32,
    unit: SpeedUnit,
    font: Option<FontArc>,
    style: OverlayStyle,
}

impl OverlayRenderer {
    pub fn new(grid_spacing: u32, unit: SpeedUnit) -> Self {
        Self {
            grid_spacing,
            unit,
            font: None,
            style: OverlayStyle::default(),
        }
    }

    pub fn with_font(mut self, font: FontArc) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_style(mut self, style: OverlayStyle) -> Self {
        self.style = style;
        self
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Paint the overlay in place.
    ///
    /// Coordinates outside the frame are clipped by the drawing primitives.
    pub fn render(
        &self,
        frame: &mut RgbImage,
        records: &[RenderRecord],
        hud: Option<&RenderRecord>,
    ) {
        draw_grid(frame, self.grid_spacing);

        for record in records {
            self.annotate(frame, record);
        }

        if let Some(record) = hud {
            self.draw_hud(frame, record);
        }
    }

    fn annotate(&self, frame: &mut RgbImage, record: &RenderRecord) {
        let (width, height) = (frame.width() as i64, frame.height() as i64);
        let (x1, y1, x2, y2) = record.bbox.pixel_corners();
        let (x1, y1, x2, y2) = (x1 as i64, y1 as i64, x2 as i64, y2 as i64);

        // Clamped edges still lie outside the frame.
        let margin = self.style.box_thickness as i64 + 1;
        let clamp_x = |x: i64| x.clamp(-margin, width + margin);
        let clamp_y = |y: i64| y.clamp(-margin, height + margin);
        let (bx1, by1, bx2, by2) = (clamp_x(x1), clamp_y(y1), clamp_x(x2), clamp_y(y2));

        for inset in 0..self.style.box_thickness as i64 {
            let w = bx2 - bx1 - 2 * inset;
            let h = by2 - by1 - 2 * inset;
            if inset > 0 && (w < 1 || h < 1) {
                break;
            }
            let outline = PixelRect::at((bx1 + inset) as i32, (by1 + inset) as i32)
                .of_size(w.max(1) as u32, h.max(1) as u32);
            draw_hollow_rect_mut(frame, outline, self.style.box_color);
        }

        let Some(font) = &self.font else {
            return;
        };
        let top = y1 - self.style.label_offset as i64 - self.style.label_scale as i64;
        // Labels anchored more than a frame away cannot reach the frame.
        if !(-width..=2 * width).contains(&x1) || !(-height..=2 * height).contains(&top) {
            return;
        }
        draw_text_mut(
            frame,
            self.style.text_color,
            x1 as i32,
            top as i32,
            PxScale::from(self.style.label_scale),
            font,
            &annotation_label(record, self.unit),
        );
    }

    fn draw_hud(&self, frame: &mut RgbImage, record: &RenderRecord) {
        let (px1, py1, px2, py2) = self.style.hud_panel;
        let panel =
            PixelRect::at(px1, py1).of_size((px2 - px1 + 1) as u32, (py2 - py1 + 1) as u32);
        draw_filled_rect_mut(frame, panel, self.style.hud_background);

        let Some(font) = &self.font else {
            return;
        };
        let scale = PxScale::from(self.style.hud_scale);
        for ((x, y), line) in self.style.hud_lines.iter().zip(hud_lines(record)) {
            draw_text_mut(frame, self.style.text_color, *x, *y, scale, font, &line);
        }
    }
}
