use log::{debug, info, warn};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::config::{currency_symbol, InvoiceDocument};
use crate::error::{InvoiceError, Result};
use crate::invoice::totals::{compute_totals, line_items, Totals};
use crate::layout::blocks;
use crate::layout::Cursor;
use crate::pdf::{win_ansi_encodable, Canvas, LogoImage, PdfCanvas};

/// Space between the title block and the party columns.
const AFTER_TITLE: f64 = 24.0;
const AFTER_PARTIES: f64 = 18.0;
const AFTER_TABLE: f64 = 32.0;

/// Totals computed straight from the document, without drawing anything.
pub fn document_totals(document: &InvoiceDocument) -> Result<Totals> {
    compute_totals(
        &document.items,
        &document.quantities,
        &document.rates,
        document.tax_rate,
        document.rates_tax_inclusive,
        document.discount_rate,
    )
}

/// Prefix printed before amounts.
///
/// Symbols the built-in fonts cannot draw are replaced by the currency code
/// followed by a space. Unknown codes print no prefix.
pub fn document_currency_symbol(document: &InvoiceDocument) -> String {
    match currency_symbol(&document.currency) {
        Some(symbol) if win_ansi_encodable(symbol) => symbol.to_string(),
        Some(symbol) => {
            let code = document.currency.trim().to_ascii_uppercase();
            debug!("'{symbol}' is not drawable with the built-in fonts, using '{code}'");
            format!("{code} ")
        }
        None => {
            warn!(
                "unknown currency '{}', amounts will have no symbol",
                document.currency
            );
            String::new()
        }
    }
}

/// Load the document's logo, if it has one.
pub fn load_logo(document: &InvoiceDocument) -> Result<Option<LogoImage>> {
    let Some(path) = &document.logo else {
        return Ok(None);
    };
    if document.logo_size <= 0.0 {
        return Err(InvoiceError::InvalidLogoSize(document.logo_size));
    }
    LogoImage::load(path).map(Some)
}

/// Draw the whole invoice onto `canvas`, top to bottom, in one pass.
///
/// Totals are computed before the first draw call, so bad item data never
/// leaves a half-drawn page behind.
pub fn render_to<C: Canvas>(
    document: &InvoiceDocument,
    logo: Option<&LogoImage>,
    canvas: &mut C,
) -> Result<Totals> {
    let rows = line_items(
        &document.items,
        &document.quantities,
        &document.rates,
        &document.dates,
    )?;
    let totals = document_totals(document)?;
    let due = document.due_label()?;
    let symbol = document_currency_symbol(document);

    let mut cursor = Cursor::a4();

    blocks::draw_title(
        canvas,
        &mut cursor,
        &document.title,
        &document.id,
        &document.date,
    )?;
    if let Some(logo) = logo {
        blocks::draw_logo(canvas, &cursor, logo, document.logo_size)?;
    }
    cursor.advance_line(AFTER_TITLE);

    blocks::draw_parties(canvas, &mut cursor, &document.recipient, &document.issuer)?;
    cursor.advance_line(AFTER_PARTIES);

    blocks::draw_items_table(canvas, &mut cursor, &rows, &symbol)?;
    cursor.advance_line(AFTER_TABLE);

    if !document.note.is_empty() {
        blocks::draw_notes(canvas, &mut cursor, &document.note)?;
    }

    blocks::draw_total_hours(canvas, &mut cursor, totals.total_hours)?;
    blocks::draw_totals(canvas, &mut cursor, &totals, &document.tax_name, &symbol)?;

    if let Some(due) = due {
        blocks::draw_due_date(canvas, &mut cursor, &due)?;
    }

    blocks::draw_footer(canvas, &mut cursor, &document.id)?;
    debug!("rendered {} ({} items)", document.id, rows.len());

    Ok(totals)
}

/// Render the invoice to PDF bytes.
///
/// Either the complete document is returned or an error; there is no partial output.
pub fn render(document: &InvoiceDocument) -> Result<Vec<u8>> {
    let logo = load_logo(document)?;
    let mut canvas = PdfCanvas::new();
    render_to(document, logo.as_ref(), &mut canvas)?;
    canvas.finish()
}

/// File the invoice is written to: `<output stem>_<id>.pdf` next to `output`.
pub fn output_path(output: &Path, id: &str) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "invoice".to_string());
    output.with_file_name(format!("{}_{}.pdf", stem, id))
}

/// Render the invoice and write it to disk. Returns the written path.
///
/// Nothing is written unless rendering succeeds. The bytes go to a temporary
/// file next to the target, which is renamed into place once complete.
pub fn generate_invoice(document: &InvoiceDocument, output: &Path) -> Result<PathBuf> {
    let bytes = render(document)?;
    let path = output_path(output, &document.id);
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent)?;
            parent
        }
        None => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(&bytes)?;
    file.as_file().sync_all()?;
    file.persist(&path).map_err(|e| e.error)?;

    info!("wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InvoiceConfig;
    use crate::layout::blocks::{FOOTER_Y, SUMMARY_LABEL_X};
    use crate::pdf::{DrawOp, RecordingCanvas};
    use chrono::NaiveDate;

    fn document(config: InvoiceConfig) -> InvoiceDocument {
        InvoiceDocument::from_config(config, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap())
    }

    fn y_of(canvas: &RecordingCanvas, needle: &str) -> f64 {
        match canvas.find_text(needle) {
            Some(DrawOp::Text { y, .. }) => *y,
            _ => panic!("{needle:?} was not drawn"),
        }
    }

    #[test]
    fn stages_are_drawn_top_to_bottom() {
        let doc = document(InvoiceConfig {
            note: Some("Thanks".to_string()),
            tax: Some(0.1),
            ..Default::default()
        });
        let mut canvas = RecordingCanvas::new();
        render_to(&doc, None, &mut canvas).unwrap();

        let order = [
            "INVOICE",
            "INV202601",
            "Untitled Corporation, Inc.",
            "DESCRIPTION",
            "Paper Cranes",
            "Total Hours",
            "Subtotal",
            "VAT 10%",
            "Total Due",
            "Due Date",
        ];
        let ys: Vec<f64> = order.iter().map(|t| y_of(&canvas, t)).collect();
        assert!(ys.windows(2).all(|w| w[0] < w[1]), "{ys:?}");

        // notes sit beside the summary, not above it
        assert_eq!(y_of(&canvas, "NOTES"), y_of(&canvas, "Total Hours"));
        // the footer id is the last text drawn, at the fixed footer height
        match canvas
            .ops()
            .iter()
            .rev()
            .find(|op| matches!(op, DrawOp::Text { .. }))
        {
            Some(DrawOp::Text { text, y, .. }) => {
                assert_eq!(text, "INV202601");
                assert_eq!(*y, FOOTER_Y);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn issuer_and_recipient_share_a_line() {
        let doc = document(InvoiceConfig::default());
        let mut canvas = RecordingCanvas::new();
        render_to(&doc, None, &mut canvas).unwrap();

        assert_eq!(
            y_of(&canvas, "Untitled Corporation, Inc."),
            y_of(&canvas, "Project Folded, Inc.")
        );
    }

    #[test]
    fn worked_example_totals() {
        let doc = document(InvoiceConfig {
            items: Some(vec!["A".to_string(), "B".to_string()]),
            quantities: Some(vec![2.0, 3.0]),
            rates: Some(vec![10.0]),
            ..Default::default()
        });
        let mut canvas = RecordingCanvas::new();
        let totals = render_to(&doc, None, &mut canvas).unwrap();

        assert_eq!(totals.amounts, vec![20.0, 30.0]);
        assert_eq!(totals.subtotal, 50.0);
        assert_eq!(totals.total_hours, 5.0);
        let texts = canvas.texts();
        assert!(texts.contains(&"$20.00"));
        assert!(texts.contains(&"$30.00"));
        assert!(texts.contains(&"$50.00"));
        assert!(texts.contains(&"5.00"));
    }

    #[test]
    fn zero_tax_draws_no_tax_row() {
        let doc = document(InvoiceConfig::default());
        let mut canvas = RecordingCanvas::new();
        render_to(&doc, None, &mut canvas).unwrap();

        let summary: Vec<&str> = canvas
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { x, text, .. } if *x == SUMMARY_LABEL_X => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(summary, vec!["Total Hours", "Subtotal", "Total Due", "Due Date"]);
    }

    #[test]
    fn inclusive_tax_total_is_not_increased() {
        let doc = document(InvoiceConfig {
            rates: Some(vec![100.0]),
            quantities: Some(vec![1.0]),
            tax: Some(0.1),
            rates_tax_inclusive: Some(true),
            ..Default::default()
        });
        let mut canvas = RecordingCanvas::new();
        let totals = render_to(&doc, None, &mut canvas).unwrap();

        assert!((totals.displayed_subtotal - 90.0).abs() < 1e-9);
        assert!((totals.total - 100.0).abs() < 1e-9);
        let texts = canvas.texts();
        assert!(texts.contains(&"$90.00"));
        assert!(texts.contains(&"$10.00"));
        assert!(texts.contains(&"$100.00"));
    }

    #[test]
    fn missing_rates_fail_before_drawing() {
        let doc = document(InvoiceConfig {
            rates: Some(Vec::new()),
            ..Default::default()
        });
        let mut canvas = RecordingCanvas::new();

        assert!(matches!(
            render_to(&doc, None, &mut canvas),
            Err(InvoiceError::NoRates)
        ));
        assert!(canvas.ops().is_empty());
    }

    #[test]
    fn unknown_currency_renders_bare_amounts() {
        let doc = document(InvoiceConfig {
            currency: Some("XYZ".to_string()),
            ..Default::default()
        });
        let mut canvas = RecordingCanvas::new();
        render_to(&doc, None, &mut canvas).unwrap();

        assert!(canvas.texts().contains(&"50.00"));
    }

    #[test]
    fn undrawable_symbol_falls_back_to_code() {
        let doc = document(InvoiceConfig {
            currency: Some("INR".to_string()),
            ..Default::default()
        });
        assert_eq!(document_currency_symbol(&doc), "INR ");

        let mut canvas = RecordingCanvas::new();
        render_to(&doc, None, &mut canvas).unwrap();
        assert!(canvas.texts().contains(&"INR 50.00"));
    }

    #[test]
    fn inr_invoice_has_no_replacement_characters() {
        let doc = document(InvoiceConfig {
            currency: Some("INR".to_string()),
            ..Default::default()
        });
        let bytes = render(&doc).unwrap();

        let parsed = lopdf::Document::load_mem(&bytes).unwrap();
        let page = *parsed.get_pages().values().next().unwrap();
        let content = parsed.get_page_content(page).unwrap();
        assert!(!content.contains(&b'?'));
        assert!(content.windows(9).any(|w| w == b"INR 50.00"));
    }

    #[test]
    fn drawable_symbol_is_kept() {
        let doc = document(InvoiceConfig {
            currency: Some("gbp".to_string()),
            ..Default::default()
        });
        assert_eq!(document_currency_symbol(&doc), "£");
    }

    #[test]
    fn out_of_range_due_date_fails_before_drawing() {
        let doc = document(InvoiceConfig {
            due_days: Some(100_000_000),
            ..Default::default()
        });
        let mut canvas = RecordingCanvas::new();

        let err = render_to(&doc, None, &mut canvas).unwrap_err();
        assert!(matches!(err, InvoiceError::DueDateOutOfRange(_)));
        assert!(canvas.ops().is_empty());
    }

    #[test]
    fn render_produces_pdf_bytes() {
        let bytes = render(&document(InvoiceConfig::default())).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn missing_logo_aborts_render() {
        let doc = document(InvoiceConfig {
            logo: Some("/no/such/logo.png".into()),
            ..Default::default()
        });

        let err = render(&doc).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Asset);
    }

    #[test]
    fn failed_render_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let doc = document(InvoiceConfig {
            logo: Some(dir.path().join("missing.png")),
            ..Default::default()
        });
        let output = dir.path().join("invoice.pdf");

        assert!(generate_invoice(&doc, &output).is_err());
        assert!(!output_path(&output, &doc.id).exists());
    }

    #[test]
    fn written_file_leaves_no_temporaries() {
        let dir = tempfile::tempdir().unwrap();
        let doc = document(InvoiceConfig::default());
        let output = dir.path().join("invoice.pdf");

        let path = generate_invoice(&doc, &output).unwrap();
        assert!(fs::read(&path).unwrap().starts_with(b"%PDF"));

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("invoice_INV202601.pdf")]);
    }

    #[test]
    fn existing_invoice_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let doc = document(InvoiceConfig::default());
        let output = dir.path().join("invoice.pdf");
        let target = output_path(&output, &doc.id);
        fs::write(&target, b"stale").unwrap();

        generate_invoice(&doc, &output).unwrap();
        assert!(fs::read(&target).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn output_name_includes_id() {
        assert_eq!(
            output_path(Path::new("out/invoice.pdf"), "INV7"),
            PathBuf::from("out/invoice_INV7.pdf")
        );
        assert_eq!(
            output_path(Path::new("bill"), "INV7"),
            PathBuf::from("bill_INV7.pdf")
        );
    }
}
