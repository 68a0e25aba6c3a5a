//! Drawing primitives the layout engine renders through.
//!
//! Coordinates are PostScript points with the origin at the top-left corner
//! of the page and y growing downward.

mod document;
mod image;
mod metrics;
mod recording;

pub use document::{win_ansi_encodable, PdfCanvas};
pub use image::LogoImage;
pub use metrics::text_width;
pub use recording::{DrawOp, RecordingCanvas};

use crate::error::Result;

/// A4 portrait, in points.
pub const PAGE_WIDTH: f64 = 595.28;
pub const PAGE_HEIGHT: f64 = 841.89;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn gray(level: u8) -> Self {
        Self {
            r: level,
            g: level,
            b: level,
        }
    }

    pub const BLACK: Color = Color::gray(0);
}

/// Font, size and colour for one piece of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f64,
    pub color: Color,
}

impl TextStyle {
    pub const fn new(font: Font, size: f64, color: Color) -> Self {
        Self { font, size, color }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    #[default]
    Top,
    Middle,
}

/// A box the text is aligned inside. Text is not clipped or wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellBox {
    pub width: f64,
    pub height: f64,
    pub align: Align,
    pub valign: VAlign,
}

impl CellBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn valign(mut self, valign: VAlign) -> Self {
        self.valign = valign;
        self
    }

    /// Top-left corner of text `text_width` wide and `size` tall placed in this box at (`x`, `y`).
    pub fn place(&self, x: f64, y: f64, text_width: f64, size: f64) -> (f64, f64) {
        let tx = match self.align {
            Align::Left => x,
            Align::Center => x + (self.width - text_width) / 2.0,
            Align::Right => x + self.width - text_width,
        };
        let ty = match self.valign {
            VAlign::Top => y,
            VAlign::Middle => y + (self.height - size) / 2.0,
        };
        (tx, ty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

/// The surface block renderers draw on.
pub trait Canvas {
    /// Draw `text` with its top edge at `y`.
    ///
    /// Returns the horizontal space consumed: the cell width when a cell is
    /// given, the text width otherwise.
    fn text(
        &mut self,
        x: f64,
        y: f64,
        text: &str,
        style: &TextStyle,
        cell: Option<CellBox>,
    ) -> Result<f64>;

    fn text_width(&self, text: &str, style: &TextStyle) -> f64 {
        text_width(text, style.font, style.size)
    }

    /// Draw `image` scaled to `width` x `height` with its top-left corner at (`x`, `y`).
    fn image(&mut self, image: &LogoImage, x: f64, y: f64, width: f64, height: f64)
        -> Result<()>;

    fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &Stroke) -> Result<()>;
}
