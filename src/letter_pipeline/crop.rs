//! Square crop around the ink with a uniform white margin.

use image::{imageops, Rgba, RgbaImage};
use tracing::debug;

use crate::letter_pipeline::bounds::BoundingBox;
use crate::letter_pipeline::common::error::{PipelineError, Result};

pub const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Side of the padded square, or `None` when the margin is unusable or the
/// side does not fit in `u32`.
fn padded_side(long_side: u32, padding_ratio: f32) -> Option<u32> {
    if !padding_ratio.is_finite() || padding_ratio < 0.0 {
        return None;
    }
    let padding = (f64::from(long_side) * f64::from(padding_ratio)).round();
    if padding > f64::from(u32::MAX) {
        return None;
    }
    let side = (padding as u32).checked_mul(2)?.checked_add(long_side)?;
    Some(side.max(1))
}

/// Crops `image` to `bbox` and centres the crop on a white square canvas.
///
/// The shorter side of the crop is extended with blank canvas rather than
/// stretched, and `round(long_side * padding_ratio)` pixels of margin are added
/// on every side. The returned canvas is never smaller than 1x1.
pub fn crop_and_pad(image: &RgbaImage, bbox: BoundingBox, padding_ratio: f32) -> Result<RgbaImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(PipelineError::InvalidImage { width, height });
    }
    if bbox.left > bbox.right || bbox.top > bbox.bottom || bbox.right > width || bbox.bottom > height {
        return Err(PipelineError::BoundsOutOfRange {
            left: bbox.left,
            top: bbox.top,
            right: bbox.right,
            bottom: bbox.bottom,
            width,
            height,
        });
    }

    let crop_w = bbox.width();
    let crop_h = bbox.height();
    let long_side = crop_w.max(crop_h);
    let diff = crop_w.abs_diff(crop_h);
    let side = padded_side(long_side, padding_ratio)
        .ok_or(PipelineError::InvalidDimensions(crop_w, crop_h))?;
    let padding = (side - long_side) / 2;

    let mut canvas = RgbaImage::from_pixel(side, side, BACKGROUND);

    if crop_w > 0 && crop_h > 0 {
        let cropped = imageops::crop_imm(image, bbox.left, bbox.top, crop_w, crop_h).to_image();
        let (x_offset, y_offset) = if crop_w < crop_h {
            (padding + diff / 2, padding)
        } else {
            (padding, padding + diff / 2)
        };
        imageops::replace(&mut canvas, &cropped, i64::from(x_offset), i64::from(y_offset));
    }

    debug!(crop_w, crop_h, padding, side, "Padded crop to square");
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn filled_rect(canvas: &mut RgbaImage, bbox: BoundingBox) {
        for y in bbox.top..bbox.bottom {
            for x in bbox.left..bbox.right {
                canvas.put_pixel(x, y, BLACK);
            }
        }
    }

    fn ink_bounds(image: &RgbaImage) -> Option<BoundingBox> {
        crate::letter_pipeline::bounds::detect(image, 0xFF)
    }

    #[test]
    fn test_wide_crop_is_square_and_centered_vertically() {
        let mut canvas = RgbaImage::from_pixel(100, 60, BACKGROUND);
        let bbox = BoundingBox::new(10, 20, 50, 30);
        filled_rect(&mut canvas, bbox);

        let padded = crop_and_pad(&canvas, bbox, 0.05).unwrap();

        // long side 40, padding 2, diff 30
        assert_eq!(padded.dimensions(), (44, 44));
        assert_eq!(ink_bounds(&padded), Some(BoundingBox::new(2, 17, 42, 27)));
    }

    #[test]
    fn test_tall_crop_is_square_and_centered_horizontally() {
        let mut canvas = RgbaImage::from_pixel(60, 100, BACKGROUND);
        let bbox = BoundingBox::new(5, 10, 15, 70);
        filled_rect(&mut canvas, bbox);

        let padded = crop_and_pad(&canvas, bbox, 0.1).unwrap();

        // long side 60, padding 6, diff 50
        assert_eq!(padded.dimensions(), (72, 72));
        assert_eq!(ink_bounds(&padded), Some(BoundingBox::new(31, 6, 41, 66)));
    }

    #[test]
    fn test_content_is_not_distorted() {
        let mut canvas = RgbaImage::from_pixel(30, 30, BACKGROUND);
        let bbox = BoundingBox::new(4, 4, 20, 12);
        filled_rect(&mut canvas, bbox);
        canvas.put_pixel(4, 4, Rgba([200, 10, 10, 255]));

        let padded = crop_and_pad(&canvas, bbox, 0.0).unwrap();

        assert_eq!(padded.dimensions(), (16, 16));
        assert_eq!(*padded.get_pixel(0, 4), Rgba([200, 10, 10, 255]));
        let inked = ink_bounds(&padded).unwrap();
        assert_eq!((inked.width(), inked.height()), (16, 8));
    }

    #[test]
    fn test_single_pixel_still_yields_a_canvas() {
        let mut canvas = RgbaImage::from_pixel(20, 20, BACKGROUND);
        canvas.put_pixel(7, 7, BLACK);
        let bbox = BoundingBox::new(7, 7, 8, 8);

        let padded = crop_and_pad(&canvas, bbox, 0.05).unwrap();
        assert_eq!(padded.dimensions(), (1, 1));
        assert_eq!(*padded.get_pixel(0, 0), BLACK);

        let wide_margin = crop_and_pad(&canvas, bbox, 1.0).unwrap();
        assert_eq!(wide_margin.dimensions(), (3, 3));
        assert_eq!(*wide_margin.get_pixel(1, 1), BLACK);
        assert_eq!(*wide_margin.get_pixel(0, 0), BACKGROUND);
    }

    #[test]
    fn test_degenerate_box_produces_blank_square() {
        let canvas = RgbaImage::from_pixel(20, 20, BACKGROUND);
        let padded = crop_and_pad(&canvas, BoundingBox::new(5, 5, 5, 5), 0.05).unwrap();
        assert_eq!(padded.dimensions(), (1, 1));

        let line = crop_and_pad(&canvas, BoundingBox::new(5, 2, 5, 12), 0.2).unwrap();
        assert_eq!(line.dimensions(), (14, 14));
    }

    #[test]
    fn test_oversized_margin_is_rejected() {
        let mut canvas = RgbaImage::from_pixel(64, 64, BACKGROUND);
        let bbox = BoundingBox::new(10, 10, 20, 30);
        filled_rect(&mut canvas, bbox);

        for ratio in [1.0e9, f32::MAX, f32::INFINITY, f32::NAN, -1.0] {
            let result = crop_and_pad(&canvas, bbox, ratio);
            assert!(
                matches!(result, Err(PipelineError::InvalidDimensions(10, 20))),
                "ratio {ratio} gave {result:?}"
            );
        }
    }

    #[test]
    fn test_rejects_zero_area_image() {
        let canvas = RgbaImage::new(0, 12);
        let result = crop_and_pad(&canvas, BoundingBox::new(0, 0, 0, 0), 0.05);
        assert!(matches!(result, Err(PipelineError::InvalidImage { width: 0, height: 12 })));
    }

    #[test]
    fn test_rejects_box_outside_image() {
        let canvas = RgbaImage::from_pixel(10, 10, BACKGROUND);
        let result = crop_and_pad(&canvas, BoundingBox::new(2, 2, 11, 5), 0.05);
        assert!(matches!(result, Err(PipelineError::BoundsOutOfRange { .. })));
    }
}
