//! Verification QR codes.

use super::page::PageWriter;
use super::RenderError;
use image::{ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};
use std::io::Cursor;

/// Minimum rendered size. High error correction keeps the code scannable
/// when printed small or partially obscured by a stamp.
const QR_SIZE_PX: u32 = 300;

/// Encode `data` as a PNG QR code.
pub fn qr_png(data: &str) -> Result<Vec<u8>, RenderError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::H)
        .map_err(|e| RenderError::Qr(e.to_string()))?;
    let rendered = code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .min_dimensions(QR_SIZE_PX, QR_SIZE_PX)
        .build();
    let mut png = Vec::new();
    rendered
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| RenderError::Qr(e.to_string()))?;
    Ok(png)
}

/// Stamp the verification QR at its fixed bottom-right position. Failures
/// are logged and swallowed; the document is still served without the code.
pub(super) fn embed(page: &PageWriter, url: &str) {
    let png = match qr_png(url) {
        Ok(png) => png,
        Err(e) => {
            tracing::warn!(error = %e, "qr generation failed, document rendered without code");
            return;
        }
    };
    if let Err(e) = page.image(&png, 460.0, 700.0, 80.0, 80.0) {
        tracing::warn!(error = %e, "qr embed failed, document rendered without code");
        return;
    }
    page.set_color(0.0, 0.4, 0.0);
    page.text("SCAN TO VERIFY", 7.0, 468.0, 784.0, &page.fonts.regular);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qr_png_is_a_png() {
        let png = qr_png("https://www.dha.gov.za/verify/PR/PTA/2025/10/13459").unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn qr_handles_long_payloads() {
        let long = "x".repeat(500);
        assert!(qr_png(&long).is_ok());
    }
}
