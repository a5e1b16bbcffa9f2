//! Reference grid painted over the frame.

use image::RgbImage;
use ndarray::{ArrayViewMut3, s};

/// Darken every `spacing`-th row, then every `spacing`-th column, in place.
///
/// Each channel value `v` becomes `v / 2 + 40`. Pixels on both a grid row and a
/// grid column are darkened twice. A spacing of 0 leaves the frame untouched.
pub fn draw_grid(frame: &mut RgbImage, spacing: u32) {
    if spacing == 0 {
        return;
    }

    let (width, height) = frame.dimensions();
    let buffer: &mut [u8] = frame;
    // RgbImage is always packed height x width x 3.
    let Ok(mut pixels) = ArrayViewMut3::from_shape((height as usize, width as usize, 3), buffer)
    else {
        return;
    };

    let step = spacing as isize;
    pixels
        .slice_mut(s![..;step, .., ..])
        .mapv_inplace(|v| v / 2 + 40);
    pixels
        .slice_mut(s![.., ..;step, ..])
        .mapv_inplace(|v| v / 2 + 40);
}
