//! Overlay rendering: reference grid, object annotations and heads-up panel.
//!
//! Rendering runs on every frame, whether or not inference ran, from the
//! latest render records kept by the session.

mod grid;
mod label;
mod renderer;

pub use grid::draw_grid;
pub use label::{annotation_label, hud_lines};
pub use renderer::{OverlayRenderer, OverlayStyle, load_font};
