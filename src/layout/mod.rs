//! Page layout: a cursor over the page and the blocks drawn with it.

pub mod blocks;
mod cursor;
pub mod style;

pub use cursor::{Cursor, Margins};
