//! Rendering of payment codes as scannable QR images.

use qrcode::render::{svg, unicode};
use qrcode::{EcLevel, QrCode};

use crate::error::CheckoutError;

/// Side length, in pixels, of the QR image shown in the overlay.
pub const QR_IMAGE_SIZE: u32 = 256;

fn encode(data: &str) -> Result<QrCode, CheckoutError> {
    QrCode::with_error_correction_level(data.as_bytes(), EcLevel::H)
        .map_err(|e| CheckoutError::Qr(e.to_string()))
}

/// SVG markup for `data`, at least `size` pixels square, with a quiet zone.
pub fn render_svg(data: &str, size: u32) -> Result<String, CheckoutError> {
    let code = encode(data)?;
    Ok(code
        .render::<svg::Color>()
        .min_dimensions(size, size)
        .quiet_zone(true)
        .build())
}

/// Half-block text rendering for terminals with a dark background.
pub fn render_terminal(data: &str) -> Result<String, CheckoutError> {
    let code = encode(data)?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .quiet_zone(true)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIETQR: &str = "00020101021238570010A000000727012700069704220113VQRQ000000001020852034";

    #[test]
    fn test_render_svg() {
        let svg = render_svg(VIETQR, QR_IMAGE_SIZE).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_render_terminal_is_square_block() {
        let text = render_terminal(VIETQR).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines.len() > 10);
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn test_oversized_payload_is_error() {
        let data = "x".repeat(5_000);
        assert!(matches!(render_svg(&data, 256), Err(CheckoutError::Qr(_))));
    }
}
