use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use super::{Canvas, CellBox, Color, Font, LogoImage, Stroke, TextStyle, PAGE_HEIGHT, PAGE_WIDTH};
use crate::error::Result;

/// Distance from the top of a text line to its baseline, as a fraction of the font size.
const ASCENT: f64 = 0.718;

/// A single-page PDF built with `lopdf`, using the standard Helvetica fonts.
pub struct PdfCanvas {
    document: Document,
    pages_id: ObjectId,
    regular_font: ObjectId,
    bold_font: ObjectId,
    operations: Vec<Operation>,
    images: Vec<(String, ObjectId)>,
}

impl Default for PdfCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfCanvas {
    pub fn new() -> Self {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();
        let regular_font = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_font = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });

        Self {
            document,
            pages_id,
            regular_font,
            bold_font,
            operations: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Write the page and serialize the document. Consumes the canvas, so a page is finalized once.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        let content = Content {
            operations: std::mem::take(&mut self.operations),
        };
        let content_id = self
            .document
            .add_object(Stream::new(lopdf::Dictionary::new(), content.encode()?));

        let mut xobjects = lopdf::Dictionary::new();
        for (name, id) in &self.images {
            xobjects.set(name.as_bytes().to_vec(), *id);
        }
        let resources = dictionary! {
            "Font" => dictionary! {
                "F1" => self.regular_font,
                "F2" => self.bold_font,
            },
            "XObject" => xobjects,
        };

        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), (PAGE_WIDTH as f32).into(), (PAGE_HEIGHT as f32).into()],
            "Contents" => content_id,
            "Resources" => resources,
        });
        self.document.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);
        self.document.compress();

        let mut out = Vec::new();
        self.document.save_to(&mut out)?;
        Ok(out)
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }

    fn font_name(font: Font) -> &'static str {
        match font {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    fn flip(y: f64) -> f32 {
        (PAGE_HEIGHT - y) as f32
    }
}

fn rgb(color: Color) -> Vec<Object> {
    [color.r, color.g, color.b]
        .iter()
        .map(|c| (f32::from(*c) / 255.0).into())
        .collect()
}

fn win_ansi_byte(c: char) -> Option<u8> {
    match c {
        ' '..='~' | '\u{a0}'..='\u{ff}' => Some(c as u8),
        '€' => Some(0x80),
        '‘' => Some(0x91),
        '’' => Some(0x92),
        '“' => Some(0x93),
        '”' => Some(0x94),
        '•' => Some(0x95),
        '–' => Some(0x96),
        '—' => Some(0x97),
        _ => None,
    }
}

/// Whether the built-in fonts can draw every character of `text`.
pub fn win_ansi_encodable(text: &str) -> bool {
    text.chars().all(|c| win_ansi_byte(c).is_some())
}

/// Encode text for a WinAnsi-encoded standard font. Unmappable characters become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| win_ansi_byte(c).unwrap_or(b'?'))
        .collect()
}

impl Canvas for PdfCanvas {
    fn text(
        &mut self,
        x: f64,
        y: f64,
        text: &str,
        style: &TextStyle,
        cell: Option<CellBox>,
    ) -> Result<f64> {
        let width = self.text_width(text, style);
        let (tx, ty) = match cell {
            Some(cell) => cell.place(x, y, width, style.size),
            None => (x, y),
        };

        self.push("BT", vec![]);
        self.push(
            "Tf",
            vec![Self::font_name(style.font).into(), (style.size as f32).into()],
        );
        self.push("rg", rgb(style.color));
        self.push(
            "Td",
            vec![
                (tx as f32).into(),
                Self::flip(ty + style.size * ASCENT).into(),
            ],
        );
        self.push(
            "Tj",
            vec![Object::String(win_ansi(text), StringFormat::Literal)],
        );
        self.push("ET", vec![]);

        Ok(cell.map_or(width, |c| c.width))
    }

    fn image(
        &mut self,
        image: &LogoImage,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<()> {
        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(image.width),
            "Height" => i64::from(image.height),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        };
        if let Some(alpha) = &image.alpha {
            let smask_id = self.document.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => i64::from(image.width),
                    "Height" => i64::from(image.height),
                    "ColorSpace" => "DeviceGray",
                    "BitsPerComponent" => 8,
                },
                alpha.clone(),
            ));
            dict.set("SMask", Object::Reference(smask_id));
        }
        let id = self.document.add_object(Stream::new(dict, image.rgb.clone()));
        let name = format!("Im{}", self.images.len() + 1);
        self.images.push((name.clone(), id));

        self.push("q", vec![]);
        self.push(
            "cm",
            vec![
                (width as f32).into(),
                0.into(),
                0.into(),
                (height as f32).into(),
                (x as f32).into(),
                Self::flip(y + height).into(),
            ],
        );
        self.push("Do", vec![Object::Name(name.into_bytes())]);
        self.push("Q", vec![]);
        Ok(())
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &Stroke) -> Result<()> {
        self.push("q", vec![]);
        self.push("w", vec![(stroke.width as f32).into()]);
        self.push("RG", rgb(stroke.color));
        self.push("m", vec![(from.0 as f32).into(), Self::flip(from.1).into()]);
        self.push("l", vec![(to.0 as f32).into(), Self::flip(to.1).into()]);
        self.push("S", vec![]);
        self.push("Q", vec![]);
        Ok(())
    }
}
