use crate::compose::canvas::CM_PER_INCH;
use crate::export::raster::{JpegRasterEncoder, RasterEncoder};
use crate::foundation::error::PosterResult;
use crate::render::backend::FrameRGBA;

pub const DEFAULT_PAGE_WIDTH_CM: f64 = 20.0;
pub const DEFAULT_PAGE_HEIGHT_CM: f64 = 30.0;
pub const POINTS_PER_INCH: f64 = 72.0;

const HEADER: &[u8] = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n";
const OBJECT_COUNT: usize = 5;

/// Physical page size of the exported document.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageSize {
    pub width_cm: f64,
    pub height_cm: f64,
}

impl Default for PageSize {
    fn default() -> Self {
        Self {
            width_cm: DEFAULT_PAGE_WIDTH_CM,
            height_cm: DEFAULT_PAGE_HEIGHT_CM,
        }
    }
}

fn positive_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { fallback }
}

impl PageSize {
    /// Page size in PDF points; non-positive or non-finite sides use the 20 x 30 cm default.
    pub fn points(&self) -> (f64, f64) {
        let w = positive_or(self.width_cm, DEFAULT_PAGE_WIDTH_CM);
        let h = positive_or(self.height_cm, DEFAULT_PAGE_HEIGHT_CM);
        (
            w / CM_PER_INCH * POINTS_PER_INCH,
            h / CM_PER_INCH * POINTS_PER_INCH,
        )
    }
}

/// Round to 3 decimals and drop trailing zeros (`566.929`, `1.5`, `0`).
pub fn format_pdf_number(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_owned()
    } else {
        s.to_owned()
    }
}

struct PdfWriter {
    buf: Vec<u8>,
    offsets: [usize; OBJECT_COUNT + 1],
}

impl PdfWriter {
    fn new() -> Self {
        Self {
            buf: HEADER.to_vec(),
            offsets: [0; OBJECT_COUNT + 1],
        }
    }

    fn object(&mut self, id: usize, dict: &str, stream: Option<&[u8]>) {
        self.offsets[id] = self.buf.len();
        self.buf.extend_from_slice(format!("{id} 0 obj\n{dict}\n").as_bytes());
        match stream {
            Some(bytes) => {
                self.buf.extend_from_slice(b"stream\n");
                self.buf.extend_from_slice(bytes);
                self.buf.extend_from_slice(b"\nendstream\nendobj\n");
            }
            None => self.buf.extend_from_slice(b"endobj\n"),
        }
    }

    fn finish(mut self) -> Vec<u8> {
        let xref = self.buf.len();
        let mut tail = format!("xref\n0 {}\n0000000000 65535 f \n", OBJECT_COUNT + 1);
        for offset in &self.offsets[1..] {
            tail.push_str(&format!("{offset:010} 00000 n \n"));
        }
        tail.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref}\n%%EOF",
            OBJECT_COUNT + 1
        ));
        self.buf.extend_from_slice(tail.as_bytes());
        self.buf
    }
}

/// Wrap an already-encoded baseline JPEG as the only content of a one-page PDF.
///
/// The image is stretched to fill the whole page.
pub fn encode_pdf_with_jpeg(
    jpeg: &[u8],
    width_px: u32,
    height_px: u32,
    page: PageSize,
) -> Vec<u8> {
    let (w_pt, h_pt) = page.points();
    let (w, h) = (format_pdf_number(w_pt), format_pdf_number(h_pt));
    let content = format!("q\n{w} 0 0 {h} 0 0 cm\n/Im0 Do\nQ");

    let mut pdf = PdfWriter::new();
    pdf.object(1, "<< /Type /Catalog /Pages 2 0 R >>", None);
    pdf.object(2, "<< /Type /Pages /Kids [3 0 R] /Count 1 >>", None);
    pdf.object(
        3,
        &format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {w} {h}] \
             /Resources << /XObject << /Im0 4 0 R >> >> /Contents 5 0 R >>"
        ),
        None,
    );
    pdf.object(
        4,
        &format!(
            "<< /Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceRGB \
             /BitsPerComponent 8 /Filter /DCTDecode /Length {} >>",
            width_px.max(1),
            height_px.max(1),
            jpeg.len()
        ),
        Some(jpeg),
    );
    pdf.object(
        5,
        &format!("<< /Length {} >>", content.len()),
        Some(content.as_bytes()),
    );
    pdf.finish()
}

/// JPEG-compress `frame` (quality 94) and embed it in a single-page PDF of `page` size.
#[tracing::instrument(skip(frame), fields(width = frame.width, height = frame.height))]
pub fn encode_pdf(frame: &FrameRGBA, page: PageSize) -> PosterResult<Vec<u8>> {
    let jpeg = JpegRasterEncoder::default().encode(frame)?;
    let bytes = encode_pdf_with_jpeg(&jpeg, frame.width, frame.height, page);
    tracing::debug!(jpeg_bytes = jpeg.len(), pdf_bytes = bytes.len(), "encoded pdf");
    Ok(bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/export/pdf.rs"]
mod tests;
