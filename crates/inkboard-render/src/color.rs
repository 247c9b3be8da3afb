//! Stroke color parsing.

use peniko::Color;

/// Parse a stroke color: `#rgb`, `#rrggbb`, `#rrggbbaa`, or one of the
/// basic named colors. Anything unrecognized falls back to black with a
/// warning; a bad color never stops a stroke from drawing.
pub fn parse_color(value: &str) -> Color {
    match value {
        "black" => return Color::from_rgba8(0, 0, 0, 255),
        "white" => return Color::from_rgba8(255, 255, 255, 255),
        "red" => return Color::from_rgba8(255, 0, 0, 255),
        "green" => return Color::from_rgba8(0, 128, 0, 255),
        "blue" => return Color::from_rgba8(0, 0, 255, 255),
        _ => {}
    }

    if let Some(hex) = value.strip_prefix('#') {
        let hex = hex.trim();
        match hex.len() {
            3 => {
                // #rgb -> #rrggbb
                let r = u8::from_str_radix(&hex[0..1], 16).unwrap_or(0) * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).unwrap_or(0) * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).unwrap_or(0) * 17;
                return Color::from_rgba8(r, g, b, 255);
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
                return Color::from_rgba8(r, g, b, 255);
            }
            8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
                let a = u8::from_str_radix(&hex[6..8], 16).unwrap_or(255);
                return Color::from_rgba8(r, g, b, a);
            }
            _ => {}
        }
    }

    log::warn!("unrecognized stroke color {value:?}, using black");
    Color::from_rgba8(0, 0, 0, 255)
}
