use crossterm::style::Color;

/// Convert HSL to an RGB terminal color.
/// H: hue (0-360), S: saturation (0-100), L: lightness (0-100)
pub(crate) fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Color {
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 100.0) / 100.0;
    let l = l.clamp(0.0, 100.0) / 100.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::Rgb { r: channel(r), g: channel(g), b: channel(b) }
}

/// The color at column `index` of a left-to-right hue sweep over `total` columns.
pub(crate) fn gradient_color(index: usize, total: usize, hues: (f32, f32), lightness: f32) -> Color {
    let progress = if total <= 1 { 0.0 } else { index as f32 / (total - 1) as f32 };
    let hue = hues.0 + (hues.1 - hues.0) * progress.clamp(0.0, 1.0);
    hsl_to_rgb(hue, 90.0, lightness)
}

/// Blend `color` halfway towards `towards`; used to dim the cursor.
pub(crate) fn dim(color: Color, towards: Color) -> Color {
    match (color, towards) {
        (Color::Rgb { r, g, b }, Color::Rgb { r: r2, g: g2, b: b2 }) => {
            let mix = |a: u8, b: u8| ((a as u16 + b as u16) / 2) as u8;
            Color::Rgb { r: mix(r, r2), g: mix(g, g2), b: mix(b, b2) }
        }
        _ => Color::DarkGrey,
    }
}
