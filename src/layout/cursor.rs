use crate::pdf::{PAGE_HEIGHT, PAGE_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub const fn uniform(size: f64) -> Self {
        Self {
            top: size,
            right: size,
            bottom: size,
            left: size,
        }
    }
}

/// The current drawing position on a page.
///
/// Owned by a single render pass. Block renderers move it forward; nothing
/// ever moves it back up except an explicit [`Cursor::move_to`].
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    x: f64,
    y: f64,
    page_width: f64,
    page_height: f64,
    margins: Margins,
}

impl Cursor {
    /// A cursor at the top-left content corner of a page.
    pub fn new(page_width: f64, page_height: f64, margins: Margins) -> Self {
        Self {
            x: margins.left,
            y: margins.top,
            page_width,
            page_height,
            margins,
        }
    }

    /// A4 with 40pt margins on every side.
    pub fn a4() -> Self {
        Self::new(PAGE_WIDTH, PAGE_HEIGHT, Margins::uniform(40.0))
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// Move right along the current line, e.g. after an inline text run.
    pub fn advance_x(&mut self, dx: f64) {
        self.x += dx;
    }

    /// Move down `height` and back to the left margin.
    pub fn advance_line(&mut self, height: f64) {
        self.y += height;
        self.x = self.margins.left;
    }

    /// Move down `height` and to column `x` instead of the left margin.
    pub fn advance_line_to(&mut self, height: f64, x: f64) {
        self.y += height;
        self.x = x;
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    pub fn page_width(&self) -> f64 {
        self.page_width
    }

    pub fn page_height(&self) -> f64 {
        self.page_height
    }

    /// Page width minus the left and right margins.
    pub fn content_width(&self) -> f64 {
        self.page_width - self.margins.left - self.margins.right
    }

    /// X coordinate of the right content edge.
    pub fn right_edge(&self) -> f64 {
        self.page_width - self.margins.right
    }

    /// Y coordinate of the bottom content edge.
    pub fn bottom_edge(&self) -> f64 {
        self.page_height - self.margins.bottom
    }
}
