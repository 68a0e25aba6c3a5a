//! Block renderers. Each one draws a section of the invoice at the cursor
//! and leaves the cursor where the next section starts.

use log::{debug, warn};

use super::cursor::Cursor;
use super::style;
use crate::config::{split_lines, Party};
use crate::error::Result;
use crate::invoice::{LineItem, Totals};
use crate::pdf::{Align, Canvas, CellBox, LogoImage, TextStyle, VAlign};

pub const ROW_HEIGHT: f64 = 24.0;
pub const SUMMARY_LABEL_X: f64 = 405.0;
pub const SUMMARY_VALUE_X: f64 = 465.0;
pub const FOOTER_Y: f64 = 800.0;
const FOOTER_RULE_END: f64 = 550.0;

const PARTY_CELL_WIDTH: f64 = 100.0;
const PARTY_CELL_HEIGHT: f64 = 45.0;
const PARTY_NAME_ADVANCE: f64 = 18.0;
const PARTY_NAME_EXTRA_ADVANCE: f64 = 14.0;
const PARTY_LINE_ADVANCE: f64 = 18.0;

pub const SUBTOTAL_LABEL: &str = "Subtotal";
pub const DISCOUNT_LABEL: &str = "Discount";
pub const TOTAL_LABEL: &str = "Total Due";
pub const TOTAL_HOURS_LABEL: &str = "Total Hours";
pub const DUE_DATE_LABEL: &str = "Due Date";

/// Column headings and their share of the content width.
pub const TABLE_COLUMNS: [(&str, f64); 5] = [
    ("DATE", 1.0 / 8.0),
    ("DESCRIPTION", 1.0 / 2.0),
    ("HOURS", 1.0 / 8.0),
    ("RATE", 1.0 / 8.0),
    ("AMOUNT", 1.0 / 8.0),
];

pub fn format_money(symbol: &str, amount: f64) -> String {
    format!("{}{:.2}", symbol, amount)
}

/// Label for the tax row, e.g. `VAT 20%`.
pub fn tax_label(tax_name: &str, tax_rate: f64) -> String {
    format!("{} {:.0}%", tax_name, tax_rate * 100.0)
}

/// Title on its own line, then `#<id>  ·  <date>`.
pub fn draw_title<C: Canvas>(
    canvas: &mut C,
    cursor: &mut Cursor,
    title: &str,
    id: &str,
    date: &str,
) -> Result<()> {
    debug!("title at {:?}", cursor.position());
    canvas.text(cursor.x(), cursor.y(), title, &style::TITLE, None)?;
    cursor.advance_line(36.0);

    for (text, text_style) in [
        ("#", &style::META),
        (id, &style::META),
        ("  ·  ", &style::META_SEPARATOR),
        (date, &style::META),
    ] {
        let advance = canvas.text(cursor.x(), cursor.y(), text, text_style, None)?;
        cursor.advance_x(advance);
    }
    cursor.advance_line(12.0);
    Ok(())
}

/// Logo in the top-right corner, `width` points wide. Does not move the cursor.
pub fn draw_logo<C: Canvas>(
    canvas: &mut C,
    cursor: &Cursor,
    logo: &LogoImage,
    width: f64,
) -> Result<()> {
    let x = cursor.page_width() - width - cursor.margins().right;
    let y = cursor.margins().top;
    let height = logo.scaled_height(width);
    debug!("logo at ({x}, {y}) {width}x{height}");
    canvas.image(logo, x, y, width, height)
}

/// Recipient on the left and issuer on the right, both starting at the cursor's line.
///
/// The cursor ends below whichever column is taller.
pub fn draw_parties<C: Canvas>(
    canvas: &mut C,
    cursor: &mut Cursor,
    recipient: &Party,
    issuer: &Party,
) -> Result<()> {
    let (left, top) = cursor.position();
    debug!("parties at ({left}, {top})");

    draw_party(canvas, cursor, left, recipient, Align::Left)?;
    let recipient_bottom = cursor.y();

    let issuer_x = cursor.right_edge() - PARTY_CELL_WIDTH;
    cursor.move_to(issuer_x, top);
    draw_party(canvas, cursor, issuer_x, issuer, Align::Right)?;

    let bottom = cursor.y().max(recipient_bottom);
    cursor.move_to(cursor.margins().left, bottom);
    Ok(())
}

fn draw_party<C: Canvas>(
    canvas: &mut C,
    cursor: &mut Cursor,
    x: f64,
    party: &Party,
    align: Align,
) -> Result<()> {
    let cell = CellBox::new(PARTY_CELL_WIDTH, PARTY_CELL_HEIGHT).align(align);
    cursor.set_x(x);

    for (i, line) in split_lines(&party.name).iter().enumerate() {
        if i == 0 {
            canvas.text(x, cursor.y(), line, &style::PARTY_NAME, Some(cell))?;
            cursor.advance_line_to(PARTY_NAME_ADVANCE, x);
        } else {
            canvas.text(x, cursor.y(), line, &style::PARTY_LINE, Some(cell))?;
            cursor.advance_line_to(PARTY_NAME_EXTRA_ADVANCE, x);
        }
    }

    for line in party.detail_lines().iter().chain(party.address.iter()) {
        canvas.text(x, cursor.y(), line, &style::PARTY_LINE, Some(cell))?;
        cursor.advance_line_to(PARTY_LINE_ADVANCE, x);
    }
    Ok(())
}

/// Five-column item table: a header row, then one fixed-height row per item.
pub fn draw_items_table<C: Canvas>(
    canvas: &mut C,
    cursor: &mut Cursor,
    items: &[LineItem],
    currency_symbol: &str,
) -> Result<()> {
    let (left, top) = cursor.position();
    let width = cursor.content_width();
    debug!("table at ({left}, {top}) with {} rows", items.len());

    let header: Vec<String> = TABLE_COLUMNS.iter().map(|(h, _)| h.to_string()).collect();
    draw_row(canvas, left, top, width, &header, &style::TABLE_HEADER)?;

    let mut y = top + ROW_HEIGHT;
    for item in items {
        let cells = [
            item.date
                .map(|d| d.format("%d-%m-%Y").to_string())
                .unwrap_or_default(),
            item.description.clone(),
            format!("{:.2}", item.quantity),
            format_money(currency_symbol, item.rate),
            format_money(currency_symbol, item.amount),
        ];
        draw_row(canvas, left, y, width, &cells, &style::TABLE_CELL)?;
        y += ROW_HEIGHT;
    }

    canvas.line((left, top), (left + width, top), &style::TABLE_RULE)?;
    canvas.line((left, y), (left + width, y), &style::TABLE_RULE)?;

    cursor.move_to(cursor.margins().left, y);
    Ok(())
}

fn draw_row<C: Canvas>(
    canvas: &mut C,
    left: f64,
    y: f64,
    width: f64,
    cells: &[String],
    text_style: &TextStyle,
) -> Result<()> {
    let mut x = left;
    for (text, (_, share)) in cells.iter().zip(TABLE_COLUMNS.iter()) {
        let column = width * share;
        let cell = CellBox::new(column, ROW_HEIGHT)
            .align(Align::Center)
            .valign(VAlign::Middle);
        canvas.text(x, y, text, text_style, Some(cell))?;
        x += column;
    }
    Ok(())
}

/// `NOTES` heading and the note lines in the left column.
///
/// The cursor is restored afterwards so the summary rows start on the same line.
pub fn draw_notes<C: Canvas>(canvas: &mut C, cursor: &mut Cursor, note: &str) -> Result<()> {
    let saved = cursor.position();
    debug!("notes at {saved:?}");

    canvas.text(cursor.x(), cursor.y(), "NOTES", &style::NOTES_LABEL, None)?;
    cursor.advance_line(18.0);
    for line in split_lines(note) {
        canvas.text(cursor.x(), cursor.y(), &line, &style::NOTES_TEXT, None)?;
        cursor.advance_line(15.0);
    }

    cursor.move_to(saved.0, saved.1);
    Ok(())
}

fn draw_summary_row<C: Canvas>(
    canvas: &mut C,
    cursor: &mut Cursor,
    label: &str,
    value: &str,
    value_style: &TextStyle,
) -> Result<()> {
    canvas.text(SUMMARY_LABEL_X, cursor.y(), label, &style::SUMMARY_LABEL, None)?;
    canvas.text(SUMMARY_VALUE_X, cursor.y(), value, value_style, None)?;
    cursor.advance_line(ROW_HEIGHT);
    Ok(())
}

pub fn draw_total_hours<C: Canvas>(
    canvas: &mut C,
    cursor: &mut Cursor,
    total_hours: f64,
) -> Result<()> {
    draw_summary_row(
        canvas,
        cursor,
        TOTAL_HOURS_LABEL,
        &format!("{:.2}", total_hours),
        &style::SUMMARY_VALUE,
    )
}

/// Subtotal, tax and discount (each only when non-zero) and the total due.
pub fn draw_totals<C: Canvas>(
    canvas: &mut C,
    cursor: &mut Cursor,
    totals: &Totals,
    tax_name: &str,
    currency_symbol: &str,
) -> Result<()> {
    debug!("totals at {:?}", cursor.position());
    draw_summary_row(
        canvas,
        cursor,
        SUBTOTAL_LABEL,
        &format_money(currency_symbol, totals.displayed_subtotal),
        &style::AMOUNT_VALUE,
    )?;

    if totals.shows_tax() {
        draw_summary_row(
            canvas,
            cursor,
            &tax_label(tax_name, totals.tax_rate),
            &format_money(currency_symbol, totals.tax),
            &style::AMOUNT_VALUE,
        )?;
    }

    if totals.shows_discount() {
        draw_summary_row(
            canvas,
            cursor,
            DISCOUNT_LABEL,
            &format_money(currency_symbol, totals.discount),
            &style::AMOUNT_VALUE,
        )?;
    }

    draw_summary_row(
        canvas,
        cursor,
        TOTAL_LABEL,
        &format_money(currency_symbol, totals.total),
        &style::TOTAL_DUE_VALUE,
    )
}

pub fn draw_due_date<C: Canvas>(canvas: &mut C, cursor: &mut Cursor, due: &str) -> Result<()> {
    draw_summary_row(canvas, cursor, DUE_DATE_LABEL, due, &style::SUMMARY_VALUE)
}

/// Invoice identifier and a divider at a fixed height near the bottom of the page.
pub fn draw_footer<C: Canvas>(canvas: &mut C, cursor: &mut Cursor, id: &str) -> Result<()> {
    if cursor.y() > FOOTER_Y {
        warn!(
            "content ends at y={:.1}, past the footer at y={FOOTER_Y}; it will overlap",
            cursor.y()
        );
    }
    cursor.move_to(cursor.margins().left, FOOTER_Y);
    debug!("footer at {:?}", cursor.position());

    let advance = canvas.text(cursor.x(), cursor.y(), id, &style::FOOTER, None)?;
    cursor.advance_x(advance);

    let rule_y = cursor.y() + 6.0;
    canvas.line(
        (cursor.x() + 10.0, rule_y),
        (FOOTER_RULE_END, rule_y),
        &style::FOOTER_RULE,
    )
}
