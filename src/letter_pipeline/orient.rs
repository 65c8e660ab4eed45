//! Fixed orientation correction.
//!
//! The classifier was trained on letters stored transposed relative to how a
//! canvas is laid out, so every prepared image is rotated a quarter turn
//! clockwise and then mirrored left to right.

use image::{imageops, RgbaImage};

pub fn reorient(image: &RgbaImage) -> RgbaImage {
    let rotated = imageops::rotate90(image);
    imageops::flip_horizontal(&rotated)
}
