//! Flat classifier input.

use std::io::Write;

use image::GrayImage;

use crate::letter_pipeline::common::error::Result;

/// Row-major `side x side` single-channel input, values in `[0, 255]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    side: u32,
    values: Vec<f32>,
}

impl Tensor {
    /// `(batch, height, width, channel)` layout the classifier expects.
    pub fn shape(&self) -> [usize; 4] {
        let side = self.side as usize;
        [1, side, side, 1]
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.values
    }

    pub fn get(&self, row: u32, col: u32) -> Option<f32> {
        if row >= self.side || col >= self.side {
            return None;
        }
        self.values.get((row * self.side + col) as usize).copied()
    }

    /// Serializes the values in host byte order, the layout a native model runtime reads.
    pub fn to_ne_bytes(&self) -> Vec<u8> {
        self.values.iter().flat_map(|v| v.to_ne_bytes()).collect()
    }

    pub fn write_to(&self, output: &mut dyn Write) -> Result<()> {
        output.write_all(&self.to_ne_bytes())?;
        Ok(())
    }
}

/// Packs a square grayscale image row by row into a tensor.
pub fn pack(image: &GrayImage) -> Tensor {
    let values = image.pixels().map(|p| f32::from(p.0[0])).collect();
    Tensor {
        side: image.width(),
        values,
    }
}
