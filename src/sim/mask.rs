//! Per-pixel opacity masks for precise sprite collision
//!
//! A mask is derived once per sprite image when assets are loaded and then
//! shared (via `Arc`) by every entity drawn with that image. Image decoding
//! happens outside the core; callers hand over raw alpha or RGBA bytes.

use std::sync::Arc;

use thiserror::Error;

use crate::settings::Settings;

/// Alpha values above this count as opaque by default
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 127;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaskError {
    #[error("mask size {width}x{height} must be positive")]
    Empty { width: i32, height: i32 },
    #[error("pixel buffer has {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Opacity bitmap, row-major, one bool per pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: i32,
    height: i32,
    bits: Vec<bool>,
}

impl Mask {
    fn check_size(width: i32, height: i32) -> Result<usize, MaskError> {
        if width <= 0 || height <= 0 {
            return Err(MaskError::Empty { width, height });
        }
        Ok(width as usize * height as usize)
    }

    /// Fully opaque rectangle
    pub fn filled(width: i32, height: i32) -> Result<Self, MaskError> {
        let len = Self::check_size(width, height)?;
        Ok(Self {
            width,
            height,
            bits: vec![true; len],
        })
    }

    /// Ellipse inscribed in the given extents
    pub fn ellipse(width: i32, height: i32) -> Result<Self, MaskError> {
        let len = Self::check_size(width, height)?;
        let mut bits = Vec::with_capacity(len);
        let rx = width as f32 / 2.0;
        let ry = height as f32 / 2.0;
        for y in 0..height {
            for x in 0..width {
                // Sample at pixel centers
                let dx = (x as f32 + 0.5 - rx) / rx;
                let dy = (y as f32 + 0.5 - ry) / ry;
                bits.push(dx * dx + dy * dy <= 1.0);
            }
        }
        Ok(Self {
            width,
            height,
            bits,
        })
    }

    /// Build from one alpha byte per pixel. Pixels with alpha above
    /// `threshold` are opaque.
    pub fn from_alpha(
        width: i32,
        height: i32,
        alpha: &[u8],
        threshold: u8,
    ) -> Result<Self, MaskError> {
        let len = Self::check_size(width, height)?;
        if alpha.len() != len {
            return Err(MaskError::SizeMismatch {
                expected: len,
                actual: alpha.len(),
            });
        }
        Ok(Self {
            width,
            height,
            bits: alpha.iter().map(|&a| a > threshold).collect(),
        })
    }

    /// Build from tightly packed RGBA8 pixels
    pub fn from_rgba(width: i32, height: i32, rgba: &[u8], threshold: u8) -> Result<Self, MaskError> {
        let len = Self::check_size(width, height)?;
        if rgba.len() != len * 4 {
            return Err(MaskError::SizeMismatch {
                expected: len * 4,
                actual: rgba.len(),
            });
        }
        let alpha: Vec<u8> = rgba.chunks_exact(4).map(|px| px[3]).collect();
        Self::from_alpha(width, height, &alpha, threshold)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Opacity at a local pixel; out-of-range pixels are transparent
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y * self.width + x) as usize]
    }
}

/// Masks for every sprite kind the core collides
#[derive(Debug, Clone)]
pub struct SpriteSet {
    pub player: Arc<Mask>,
    pub enemy: Arc<Mask>,
    pub coin: Arc<Mask>,
    pub door: Arc<Mask>,
}

impl SpriteSet {
    /// Placeholder silhouettes sized from settings: rectangles for the
    /// player, enemies and door, a disc for coins.
    pub fn from_settings(settings: &Settings) -> Result<Self, MaskError> {
        Ok(Self {
            player: Arc::new(Mask::filled(settings.player_width, settings.player_height)?),
            enemy: Arc::new(Mask::filled(settings.enemy_size, settings.enemy_size)?),
            coin: Arc::new(Mask::ellipse(settings.coin_size, settings.coin_size)?),
            door: Arc::new(Mask::filled(settings.door_width, settings.door_height)?),
        })
    }
}
