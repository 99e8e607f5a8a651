//! CSS color text to packed pixel conversion.
//!
//! Accepts the forms beginners are likely to type: hex (`#f00`, `#ff0000`,
//! `#ff000080`), `rgb()`/`rgba()`, `hsl()`/`hsla()` and the CSS named
//! keywords. Anything unrecognized or malformed converts to a fully
//! transparent zero pixel instead of failing, so a typo in a color name makes
//! a shape invisible rather than crashing the program.

use super::named;

/// Packed `0xAARRGGBB` value returned for unrecognized color text.
pub const TRANSPARENT_PIXEL: u32 = 0x0000_0000;

const OPAQUE: u32 = 0xFF;

/// Converts CSS color text to a packed `0xAARRGGBB` pixel.
///
/// # Examples
///
/// ```
/// use easel::draw::css::to_pixel;
/// assert_eq!(to_pixel("#FF0000"), 0xFFFF_0000);
/// assert_eq!(to_pixel("rgba(0,0,0,0.5)"), 0x8000_0000);
/// assert_eq!(to_pixel("not-a-color"), 0);
/// ```
pub fn to_pixel(text: &str) -> u32 {
    let text = text.trim();
    let lower = text.to_ascii_lowercase();

    let parsed = if let Some(hex) = lower.strip_prefix('#') {
        parse_hex(hex)
    } else if let Some(args) = function_args(&lower, "rgba") {
        parse_rgb(args)
    } else if let Some(args) = function_args(&lower, "rgb") {
        parse_rgb(args)
    } else if let Some(args) = function_args(&lower, "hsla") {
        parse_hsl(args)
    } else if let Some(args) = function_args(&lower, "hsl") {
        parse_hsl(args)
    } else {
        named::lookup(&lower)
    };

    parsed.unwrap_or_else(|| {
        log::debug!("Unrecognized color '{}', using transparent", text);
        TRANSPARENT_PIXEL
    })
}

fn pack(a: u32, r: u32, g: u32, b: u32) -> u32 {
    (a << 24) | (r << 16) | (g << 8) | b
}

/// Returns the comma-separated arguments of `name(...)`, if `text` has that shape.
fn function_args<'a>(text: &'a str, name: &str) -> Option<Vec<&'a str>> {
    let inner = text
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')?;
    Some(inner.split(',').map(str::trim).collect())
}

fn parse_hex(digits: &str) -> Option<u32> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u32::from_str_radix(&digits[i..=i], 16).ok();
    let byte = |i: usize| u32::from_str_radix(&digits[i..i + 2], 16).ok();

    match digits.len() {
        3 => Some(pack(OPAQUE, nibble(0)? * 0x11, nibble(1)? * 0x11, nibble(2)? * 0x11)),
        4 => Some(pack(
            nibble(3)? * 0x11,
            nibble(0)? * 0x11,
            nibble(1)? * 0x11,
            nibble(2)? * 0x11,
        )),
        6 => Some(pack(OPAQUE, byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(pack(byte(6)?, byte(0)?, byte(2)?, byte(4)?)),
        _ => None,
    }
}

fn parse_rgb(args: Vec<&str>) -> Option<u32> {
    if args.len() != 3 && args.len() != 4 {
        return None;
    }
    let channel = |s: &str| s.parse::<i64>().ok().map(|v| v.clamp(0, 255) as u32);
    let r = channel(args[0])?;
    let g = channel(args[1])?;
    let b = channel(args[2])?;
    let a = match args.get(3) {
        Some(alpha) => parse_alpha(alpha)?,
        None => OPAQUE,
    };
    Some(pack(a, r, g, b))
}

fn parse_hsl(args: Vec<&str>) -> Option<u32> {
    if args.len() != 3 && args.len() != 4 {
        return None;
    }
    let hue = args[0].trim_end_matches("deg").trim().parse::<f64>().ok()?;
    let saturation = parse_percentage(args[1])?;
    let lightness = parse_percentage(args[2])?;
    let a = match args.get(3) {
        Some(alpha) => parse_alpha(alpha)?,
        None => OPAQUE,
    };
    let (r, g, b) = hsl_to_rgb(hue, saturation, lightness);
    Some(pack(a, r, g, b))
}

/// Alpha in `[0, 1]` scaled to `[0, 255]`.
fn parse_alpha(text: &str) -> Option<u32> {
    let alpha = text.parse::<f64>().ok()?;
    if !alpha.is_finite() {
        return None;
    }
    Some((alpha.clamp(0.0, 1.0) * 255.0).round() as u32)
}

/// Percentage (with or without `%`) as a fraction in `[0, 1]`.
fn parse_percentage(text: &str) -> Option<f64> {
    let value = text.trim_end_matches('%').trim().parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some((value / 100.0).clamp(0.0, 1.0))
}

/// Standard HSL to RGB conversion, hue in degrees.
fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u32, u32, u32) {
    let to_byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u32;

    if saturation == 0.0 {
        let grey = to_byte(lightness);
        return (grey, grey, grey);
    }

    let h = hue.rem_euclid(360.0) / 360.0;
    let q = if lightness < 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let p = 2.0 * lightness - q;

    (
        to_byte(hue_to_channel(p, q, h + 1.0 / 3.0)),
        to_byte(hue_to_channel(p, q, h)),
        to_byte(hue_to_channel(p, q, h - 1.0 / 3.0)),
    )
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
