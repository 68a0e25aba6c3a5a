use crate::pdf::{Color, Font, Stroke, TextStyle};

pub const TITLE: TextStyle = TextStyle::new(Font::Bold, 24.0, Color::BLACK);
pub const META: TextStyle = TextStyle::new(Font::Regular, 12.0, Color::gray(100));
pub const META_SEPARATOR: TextStyle = TextStyle::new(Font::Regular, 12.0, Color::gray(150));

pub const PARTY_NAME: TextStyle = TextStyle::new(Font::Bold, 12.0, Color::gray(75));
pub const PARTY_LINE: TextStyle = TextStyle::new(Font::Regular, 10.0, Color::gray(75));

pub const TABLE_HEADER: TextStyle = TextStyle::new(Font::Bold, 11.0, Color::gray(75));
pub const TABLE_CELL: TextStyle = TextStyle::new(Font::Regular, 8.0, Color::gray(55));
pub const TABLE_RULE: Stroke = Stroke {
    color: Color::gray(75),
    width: 0.5,
};

pub const NOTES_LABEL: TextStyle = TextStyle::new(Font::Regular, 9.0, Color::gray(55));
pub const NOTES_TEXT: TextStyle = TextStyle::new(Font::Regular, 9.0, Color::BLACK);

pub const SUMMARY_LABEL: TextStyle = TextStyle::new(Font::Regular, 9.0, Color::gray(75));
pub const SUMMARY_VALUE: TextStyle = TextStyle::new(Font::Regular, 11.0, Color::BLACK);
pub const AMOUNT_VALUE: TextStyle = TextStyle::new(Font::Regular, 12.0, Color::BLACK);
pub const TOTAL_DUE_VALUE: TextStyle = TextStyle::new(Font::Bold, 11.5, Color::BLACK);

pub const FOOTER: TextStyle = TextStyle::new(Font::Regular, 10.0, Color::gray(55));
pub const FOOTER_RULE: Stroke = Stroke {
    color: Color::gray(225),
    width: 1.0,
};
