//! Color helpers for snippet rendering.

use ratatui::style::Color;

/// Saturation of snippet text.
const TEXT_SATURATION: f32 = 0.3;
/// Lightness of snippet text at full opacity.
const TEXT_LIGHTNESS: f32 = 0.85;

/// Convert HSL (hue in degrees, saturation and lightness in 0.0-1.0) to RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Color {
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let sector = h / 60.0;
    let second = chroma * (1.0 - (sector % 2.0 - 1.0).abs());

    let (r, g, b) = match sector as u8 {
        0 => (chroma, second, 0.0),
        1 => (second, chroma, 0.0),
        2 => (0.0, chroma, second),
        3 => (0.0, second, chroma),
        4 => (second, 0.0, chroma),
        _ => (chroma, 0.0, second),
    };
    let m = l - chroma / 2.0;
    let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;

    Color::Rgb(channel(r), channel(g), channel(b))
}

/// Text color for a snippet of the given hue at the given opacity.
///
/// Terminals have no alpha channel, so opacity darkens toward black.
pub fn snippet_color(hue: f32, alpha: f32) -> Color {
    hsl_to_rgb(hue, TEXT_SATURATION, TEXT_LIGHTNESS * alpha.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_hues() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Color::Rgb(255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), Color::Rgb(0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), Color::Rgb(0, 0, 255));
        assert_eq!(hsl_to_rgb(360.0, 1.0, 0.5), Color::Rgb(255, 0, 0));
    }

    #[test]
    fn test_greys() {
        assert_eq!(hsl_to_rgb(200.0, 0.0, 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(hsl_to_rgb(200.0, 0.0, 1.0), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_snippet_color_fades_to_black() {
        assert_eq!(snippet_color(220.0, 0.0), Color::Rgb(0, 0, 0));
        assert_ne!(snippet_color(220.0, 1.0), Color::Rgb(0, 0, 0));
    }
}
