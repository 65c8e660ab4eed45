//! Grayscale reduction and intensity inversion.

use image::{imageops, GrayImage, RgbaImage};

/// Desaturates `image` and inverts it so paper maps to 0 and ink towards 255.
///
/// Alpha is ignored; the drawing surface always produces opaque pixels.
pub fn normalize(image: &RgbaImage) -> GrayImage {
    let mut gray = imageops::grayscale(image);
    imageops::invert(&mut gray);
    gray
}
