//! Ink bounding box detection on a drawing canvas.

use image::RgbaImage;
use tracing::debug;

/// Tightest rectangle around the ink, `left`/`top` inclusive and `right`/`bottom` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

/// A pixel is ink when its blue channel is strictly below `threshold`.
///
/// Strokes are drawn on an opaque white canvas, so the blue channel alone
/// separates ink from background for any ink colour whose blue component is
/// not saturated.
#[inline]
pub fn is_ink(pixel: &image::Rgba<u8>, threshold: u8) -> bool {
    pixel.0[2] < threshold
}

/// Scans every pixel and returns the box around all ink, or `None` for a blank canvas.
pub fn detect(image: &RgbaImage, threshold: u8) -> Option<BoundingBox> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;
    let mut found = false;

    for (x, y, pixel) in image.enumerate_pixels() {
        if is_ink(pixel, threshold) {
            found = true;
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }

    if !found {
        debug!("No ink found on {}x{} canvas", image.width(), image.height());
        return None;
    }

    let bbox = BoundingBox::new(min_x, min_y, max_x + 1, max_y + 1);
    debug!(?bbox, "Detected ink bounds");
    Some(bbox)
}
