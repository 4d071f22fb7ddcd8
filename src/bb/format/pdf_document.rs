// Copyright (c) 2026 Billbook. All Rights Reserved.

//! A `Canvas` that writes a real PDF document.

use std::io::BufWriter;

use printpdf::{
    self, BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};

use bb;
use bb::error::ErrorKind;
use bb::format::pdf::{
    render_invoice, render_statement, Align, Canvas, Color, Invoice, Statement, TextStyle,
    BLACK, PAGE_HEIGHT, PAGE_WIDTH,
};

const LAYER: &str = "Layer 1";
const MM_PER_POINT: f32 = 25.4 / 72.0;
// Helvetica's average advance, as a fraction of the font size.
const AVERAGE_ADVANCE: f32 = 0.5;
const RULE_THICKNESS: f64 = 0.5;

fn export_error(e: printpdf::Error) -> bb::Error {
    ErrorKind::Export(format!("{:?}", e)).into()
}

fn rgb(color: Color) -> printpdf::Color {
    let Color(r, g, b) = color;
    printpdf::Color::Rgb(Rgb::new(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        None,
    ))
}

/// Estimated rendered width of `text` in millimetres.
fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVERAGE_ADVANCE * MM_PER_POINT
}

/// The left edge of `text` drawn at `x` with `align`.
fn left_edge(x: f32, text: &str, style: TextStyle) -> f32 {
    match style.align {
        Align::Left => x,
        Align::Center => x - text_width(text, style.size) / 2.0,
        Align::Right => x - text_width(text, style.size),
    }
}

// Canvas coordinates run down from the top of the page; PDF's run up from
// the bottom.
fn point(x: f32, y: f32) -> Point {
    Point::new(Mm(f64::from(x)), Mm(f64::from(PAGE_HEIGHT - y)))
}

/// An A4 document drawn with the built-in Helvetica faces.
pub struct PdfCanvas {
    title: String,
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    pages: usize,
}

impl PdfCanvas {
    pub fn new<S: Into<String>>(title: S) -> bb::Result<Self> {
        let title = title.into();
        let (doc, page, layer) = PdfDocument::new(
            title.as_str(),
            Mm(f64::from(PAGE_WIDTH)),
            Mm(f64::from(PAGE_HEIGHT)),
            LAYER,
        );
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(export_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(export_error)?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            title,
            doc,
            layer,
            regular,
            bold,
            pages: 1,
        })
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Serialize the document.
    pub fn into_bytes(self) -> bb::Result<Vec<u8>> {
        debug!(title = %self.title, pages = self.pages, "bb:format:pdf:save");
        let mut out = BufWriter::new(Vec::new());
        self.doc.save(&mut out).map_err(export_error)?;
        out.into_inner()
            .map_err(|e| ErrorKind::Export(e.to_string()).into())
    }
}

impl Canvas for PdfCanvas {
    fn text(&mut self, x: f32, y: f32, text: &str, style: TextStyle) {
        if text.is_empty() {
            return;
        }
        let font = if style.bold { &self.bold } else { &self.regular };
        let left = left_edge(x, text, style);
        self.layer.set_fill_color(rgb(style.color));
        self.layer.use_text(
            text,
            f64::from(style.size),
            Mm(f64::from(left)),
            Mm(f64::from(PAGE_HEIGHT - y)),
            font,
        );
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.layer.set_outline_color(rgb(BLACK));
        self.layer.set_outline_thickness(RULE_THICKNESS);
        self.layer.add_shape(Line {
            points: vec![(point(x1, y1), false), (point(x2, y2), false)],
            is_closed: false,
            has_fill: false,
            has_stroke: true,
            is_clipping_path: false,
        });
    }

    fn filled_rect(&mut self, x: f32, y: f32, width: f32, height: f32, fill: Color) {
        self.layer.set_fill_color(rgb(fill));
        self.layer.add_shape(Line {
            points: vec![
                (point(x, y), false),
                (point(x + width, y), false),
                (point(x + width, y + height), false),
                (point(x, y + height), false),
            ],
            is_closed: true,
            has_fill: true,
            has_stroke: false,
            is_clipping_path: false,
        });
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(
            Mm(f64::from(PAGE_WIDTH)),
            Mm(f64::from(PAGE_HEIGHT)),
            LAYER,
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.pages += 1;
    }
}

/// An invoice as PDF bytes.
pub fn render_invoice_pdf(invoice: &Invoice) -> bb::Result<Vec<u8>> {
    let mut canvas = PdfCanvas::new(format!("Invoice {}", invoice.number))?;
    render_invoice(&mut canvas, invoice);
    canvas.into_bytes()
}

/// A customer statement as PDF bytes.
pub fn render_statement_pdf(statement: &Statement) -> bb::Result<Vec<u8>> {
    let mut canvas = PdfCanvas::new(format!("Statement {}", statement.customer.name))?;
    render_statement(&mut canvas, statement);
    canvas.into_bytes()
}
