use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{InvoiceError, Result};

/// A decoded logo, kept as 8-bit RGB samples plus an optional alpha plane.
#[derive(Debug, Clone, PartialEq)]
pub struct LogoImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
    /// One byte per pixel. `None` when the image is fully opaque.
    pub alpha: Option<Vec<u8>>,
}

impl LogoImage {
    /// Read and decode a PNG, JPEG or GIF file.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| InvoiceError::LogoRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let decoded = ::image::load_from_memory(&bytes).map_err(|e| InvoiceError::LogoDecode {
            path: path.to_path_buf(),
            source: e,
        })?;
        let rgba = decoded.to_rgba8();

        let pixels = (rgba.width() * rgba.height()) as usize;
        let mut rgb = Vec::with_capacity(pixels * 3);
        let mut alpha = Vec::with_capacity(pixels);
        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            rgb.extend_from_slice(&[r, g, b]);
            alpha.push(a);
        }

        Ok(Self {
            path: path.to_path_buf(),
            width: rgba.width(),
            height: rgba.height(),
            rgb,
            alpha: alpha.iter().any(|&a| a != u8::MAX).then_some(alpha),
        })
    }

    /// Height when drawn `width` points wide, keeping the aspect ratio.
    pub fn scaled_height(&self, width: f64) -> f64 {
        if self.width == 0 {
            return 0.0;
        }
        width * f64::from(self.height) / f64::from(self.width)
    }
}
