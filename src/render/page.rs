//! Single-page A4 drawing surface over the PDF backend.
//!
//! Layout code positions everything in PDF points with a top-left origin,
//! the coordinate system the official document templates were measured in;
//! this wrapper converts to the backend's bottom-left millimetre space.

use super::RenderError;
use printpdf::image_crate;
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point, Rgb,
};

pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;

const PT_TO_MM: f32 = 25.4 / 72.0;

fn x_mm(x: f32) -> Mm {
    Mm(x * PT_TO_MM)
}

fn y_mm(y: f32) -> Mm {
    Mm((PAGE_HEIGHT - y) * PT_TO_MM)
}

/// The builtin font set used across all document layouts.
pub struct Fonts {
    pub regular: IndirectFontRef,
    pub bold: IndirectFontRef,
    pub oblique: IndirectFontRef,
    pub mono_bold: IndirectFontRef,
    pub times: IndirectFontRef,
    pub times_bold: IndirectFontRef,
    pub times_italic: IndirectFontRef,
}

pub struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    pub fonts: Fonts,
}

impl PageWriter {
    pub fn new(title: &str) -> Result<Self, RenderError> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(210.0), Mm(297.0), "Layer 1");
        let layer = doc.get_page(page).get_layer(layer);
        let font = |f: BuiltinFont| {
            doc.add_builtin_font(f)
                .map_err(|e| RenderError::Backend(e.to_string()))
        };
        let fonts = Fonts {
            regular: font(BuiltinFont::Helvetica)?,
            bold: font(BuiltinFont::HelveticaBold)?,
            oblique: font(BuiltinFont::HelveticaOblique)?,
            mono_bold: font(BuiltinFont::CourierBold)?,
            times: font(BuiltinFont::TimesRoman)?,
            times_bold: font(BuiltinFont::TimesBold)?,
            times_italic: font(BuiltinFont::TimesItalic)?,
        };
        Ok(Self { doc, layer, fonts })
    }

    /// Text color (the backend draws glyphs with the fill color).
    pub fn set_color(&self, r: f32, g: f32, b: f32) {
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
    }

    pub fn set_stroke(&self, r: f32, g: f32, b: f32, thickness: f32) {
        self.layer
            .set_outline_color(Color::Rgb(Rgb::new(r, g, b, None)));
        self.layer.set_outline_thickness(thickness);
    }

    /// Draw text with `y` at the top of the line (the backend positions the
    /// baseline, so an ascent offset is applied).
    pub fn text(&self, s: impl Into<String>, size: f32, x: f32, y: f32, font: &IndirectFontRef) {
        self.layer.use_text(s, size, x_mm(x), y_mm(y + size * 0.8), font);
    }

    pub fn hline(&self, x1: f32, x2: f32, y: f32) {
        let line = Line {
            points: vec![
                (Point::new(x_mm(x1), y_mm(y)), false),
                (Point::new(x_mm(x2), y_mm(y)), false),
            ],
            is_closed: false,
        };
        self.layer.add_line(line);
    }

    /// Stroked rectangle; `x`/`y` is the top-left corner.
    pub fn rect(&self, x: f32, y: f32, w: f32, h: f32) {
        let line = Line {
            points: vec![
                (Point::new(x_mm(x), y_mm(y)), false),
                (Point::new(x_mm(x + w), y_mm(y)), false),
                (Point::new(x_mm(x + w), y_mm(y + h)), false),
                (Point::new(x_mm(x), y_mm(y + h)), false),
            ],
            is_closed: true,
        };
        self.layer.add_line(line);
    }

    /// Decode an image (PNG/JPEG) and place it scaled to the given box.
    pub fn image(&self, bytes: &[u8], x: f32, y: f32, w: f32, h: f32) -> Result<(), RenderError> {
        let decoded = image_crate::load_from_memory(bytes)
            .map_err(|e| RenderError::Backend(format!("image decode: {e}")))?;
        let (px_w, px_h) = (decoded.width() as f32, decoded.height() as f32);
        let image = Image::from_dynamic_image(&decoded);

        let dpi = 300.0;
        let native_w_mm = px_w * 25.4 / dpi;
        let native_h_mm = px_h * 25.4 / dpi;
        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(x_mm(x)),
                translate_y: Some(y_mm(y + h)),
                scale_x: Some(w * PT_TO_MM / native_w_mm),
                scale_y: Some(h * PT_TO_MM / native_h_mm),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
        Ok(())
    }

    pub fn finish(self) -> Result<Vec<u8>, RenderError> {
        self.doc
            .save_to_bytes()
            .map_err(|e| RenderError::Backend(e.to_string()))
    }
}
