//! Payment QR code rendering (PNG / SVG)

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use qrcode::render::svg;
use qrcode::{Color, QrCode};
use shared::error::ErrorCode;

use crate::utils::{AppError, AppResult};

/// Light border around the symbol, in modules
pub const QUIET_ZONE: u32 = 4;

fn render_error(err: impl std::fmt::Display) -> AppError {
    AppError::with_message(ErrorCode::RenderFailed, format!("QR rendering failed: {err}"))
}

/// Encoded QR symbol for a payment payload
pub struct PaymentQr {
    code: QrCode,
}

impl PaymentQr {
    pub fn encode(payload: &str) -> AppResult<Self> {
        let code = QrCode::new(payload.as_bytes()).map_err(render_error)?;
        Ok(Self { code })
    }

    /// Modules per side, without the quiet zone
    pub fn width(&self) -> u32 {
        self.code.width() as u32
    }

    /// Dark-module matrix, row-major, without the quiet zone
    pub fn modules(&self) -> Vec<bool> {
        self.code
            .to_colors()
            .into_iter()
            .map(|c| c == Color::Dark)
            .collect()
    }

    /// Grayscale PNG, `scale` pixels per module
    pub fn to_png(&self, scale: u32) -> AppResult<Vec<u8>> {
        let scale = scale.max(1);
        let width = self.width();
        let modules = self.modules();
        let side = (width + 2 * QUIET_ZONE) * scale;

        let img = GrayImage::from_fn(side, side, |x, y| {
            let (mx, my) = (x / scale, y / scale);
            let inside = (QUIET_ZONE..QUIET_ZONE + width).contains(&mx)
                && (QUIET_ZONE..QUIET_ZONE + width).contains(&my);
            let dark = inside
                && modules[((my - QUIET_ZONE) * width + (mx - QUIET_ZONE)) as usize];
            if dark { Luma([0u8]) } else { Luma([255u8]) }
        });

        let mut bytes = Vec::new();
        DynamicImage::ImageLuma8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(render_error)?;
        Ok(bytes)
    }

    pub fn to_svg(&self, scale: u32) -> String {
        let scale = scale.max(1);
        self.code
            .render::<svg::Color<'_>>()
            .module_dimensions(scale, scale)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = "upi://pay?pa=canteen@upi&pn=Canteen&am=45.00&cu=INR&tn=Canteen%20Order%201";

    #[test]
    fn test_png_signature_and_size() {
        let qr = PaymentQr::encode(PAYLOAD).unwrap();
        let png = qr.to_png(4).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.width(), (qr.width() + 2 * QUIET_ZONE) * 4);
    }

    #[test]
    fn test_matrix_matches_width() {
        let qr = PaymentQr::encode(PAYLOAD).unwrap();
        assert_eq!(qr.modules().len(), (qr.width() * qr.width()) as usize);
        // top-left finder pattern corner is dark
        assert!(qr.modules()[0]);
    }

    #[test]
    fn test_svg_output() {
        let svg = PaymentQr::encode(PAYLOAD).unwrap().to_svg(4);
        assert!(svg.contains("<svg"));
        assert!(svg.contains("#000000"));
    }
}
