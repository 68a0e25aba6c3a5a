use std::fmt;

use super::{Canvas, CellBox, LogoImage, Stroke, TextStyle};
use crate::error::Result;

/// A draw call captured by [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f64,
        y: f64,
        text: String,
        style: TextStyle,
    },
    Image {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
    },
}

impl fmt::Display for DrawOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawOp::Text { x, y, text, style } => {
                write!(f, "text  ({x:7.2}, {y:7.2}) {:>4}pt {text:?}", style.size)
            }
            DrawOp::Image {
                x,
                y,
                width,
                height,
            } => write!(f, "image ({x:7.2}, {y:7.2}) {width:.2}x{height:.2}"),
            DrawOp::Line { from, to } => write!(
                f,
                "line  ({:7.2}, {:7.2}) -> ({:.2}, {:.2})",
                from.0, from.1, to.0, to.1
            ),
        }
    }
}

/// Records draw calls instead of producing a file. Text positions are the
/// final, alignment-resolved top-left corners.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Every drawn string, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The first text op whose string equals `needle`.
    pub fn find_text(&self, needle: &str) -> Option<&DrawOp> {
        self.ops
            .iter()
            .find(|op| matches!(op, DrawOp::Text { text, .. } if text == needle))
    }
}

impl Canvas for RecordingCanvas {
    fn text(
        &mut self,
        x: f64,
        y: f64,
        text: &str,
        style: &TextStyle,
        cell: Option<CellBox>,
    ) -> Result<f64> {
        let width = self.text_width(text, style);
        let (x, y) = match cell {
            Some(cell) => cell.place(x, y, width, style.size),
            None => (x, y),
        };
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            style: *style,
        });
        Ok(cell.map_or(width, |c| c.width))
    }

    fn image(
        &mut self,
        _image: &LogoImage,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<()> {
        self.ops.push(DrawOp::Image {
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), _stroke: &Stroke) -> Result<()> {
        self.ops.push(DrawOp::Line { from, to });
        Ok(())
    }
}
