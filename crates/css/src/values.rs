/// Parse a CSS colour into RGBA.
///
/// Supports `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`/`rgba()` with
/// comma or space separated channels (percentages allowed), `transparent`, and
/// the basic named colours.
pub fn parse_color(value: &str) -> Option<(u8, u8, u8, u8)> {
    let s = value.trim().to_ascii_lowercase();
    // HEX
    if let Some(hex) = s.strip_prefix('#') {
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let short = |i: usize| u8::from_str_radix(&hex[i..i + 1].repeat(2), 16).ok();
        let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        return match hex.len() {
            3 => Some((short(0)?, short(1)?, short(2)?, 255)),
            4 => Some((short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some((long(0)?, long(2)?, long(4)?, 255)),
            8 => Some((long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        };
    }

    if let Some(args) = s
        .strip_prefix("rgba(")
        .or_else(|| s.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_rgb_args(args);
    }

    let named = match s.as_str() {
        "transparent" => (0, 0, 0, 0),
        "black" => (0, 0, 0, 255),
        "blue" => (0, 0, 255, 255),
        "cyan" | "aqua" => (0, 255, 255, 255),
        "gray" | "grey" => (128, 128, 128, 255),
        "green" => (0, 128, 0, 255),
        "lime" => (0, 255, 0, 255),
        "magenta" | "fuchsia" => (255, 0, 255, 255),
        "maroon" => (128, 0, 0, 255),
        "navy" => (0, 0, 128, 255),
        "olive" => (128, 128, 0, 255),
        "orange" => (255, 165, 0, 255),
        "pink" => (255, 192, 203, 255),
        "purple" => (128, 0, 128, 255),
        "red" => (255, 0, 0, 255),
        "silver" => (192, 192, 192, 255),
        "teal" => (0, 128, 128, 255),
        "white" => (255, 255, 255, 255),
        "yellow" => (255, 255, 0, 255),
        _ => return None,
    };
    Some(named)
}

// "255, 255, 123" | "255 255 123 / 50%" | "100%, 0%, 0%, 0.5"
fn parse_rgb_args(args: &str) -> Option<(u8, u8, u8, u8)> {
    let parts: Vec<&str> = args
        .split([',', '/'])
        .flat_map(str::split_whitespace)
        .collect();
    let (r, g, b, a) = match parts.as_slice() {
        [r, g, b] => (r, g, b, None),
        [r, g, b, a] => (r, g, b, Some(a)),
        _ => return None,
    };
    let alpha = match a {
        Some(a) => parse_alpha(a)?,
        None => 255,
    };
    Some((parse_channel(r)?, parse_channel(g)?, parse_channel(b)?, alpha))
}

fn parse_channel(s: &str) -> Option<u8> {
    let v = match s.strip_suffix('%') {
        Some(pct) => pct.parse::<f32>().ok()? * 2.55,
        None => s.parse::<f32>().ok()?,
    };
    v.is_finite().then(|| v.round().clamp(0.0, 255.0) as u8)
}

fn parse_alpha(s: &str) -> Option<u8> {
    let v = match s.strip_suffix('%') {
        Some(pct) => pct.parse::<f32>().ok()? / 100.0,
        None => s.parse::<f32>().ok()?,
    };
    v.is_finite()
        .then(|| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
}
