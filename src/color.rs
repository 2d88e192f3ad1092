use palette::Srgb;

/// An opaque 8-bit sRGB color. Output alpha is always 255, so none is stored.
pub type Color = Srgb<u8>;

/// Number of brightness bands (and palette entries).
pub const BAND_COUNT: usize = 4;

/// Width of one brightness band on the 0-255 luma scale.
const BAND_WIDTH: f64 = 64.0;

/// Standard luma weighting (0.299 / 0.587 / 0.114) on 0-255 channels.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> f64 {
    0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
}

/// Luma of a palette color, handy for ordering colors by brightness.
#[inline]
pub fn color_luma(c: Color) -> f64 {
    luma(c.red, c.green, c.blue)
}

/// Map a gray value to its band: 0 is darkest, 3 is brightest.
///
/// Out-of-range input is clamped, so negative values and NaN land in band 0
/// and anything past 255 lands in band 3.
#[inline]
pub fn band_for_gray(gray: f64) -> usize {
    let band = (gray / BAND_WIDTH).floor();
    if band.is_nan() || band < 0.0 {
        0
    } else {
        (band as usize).min(BAND_COUNT - 1)
    }
}

/// Parse a `#RRGGBB` string.
///
/// Length is measured in UTF-16 code units, the way browser color inputs
/// report it, and anything other than exactly seven resolves to black rather
/// than failing. The leading character is skipped without being checked. Each
/// channel reads the longest run of leading hex digits in its two units (so
/// `"1g"` is 1), and a channel with no digits or a minus sign reads as 0.
pub fn hex_to_color(hex: &str) -> Color {
    let units: Vec<u16> = hex.encode_utf16().collect();
    if units.len() != 7 {
        return Color::new(0, 0, 0);
    }
    Color::new(
        hex_prefix_value(&units[1..3]),
        hex_prefix_value(&units[3..5]),
        hex_prefix_value(&units[5..7]),
    )
}

/// Value of the leading hex digits in `units`, after optional whitespace, a
/// sign and a `0x` prefix. Negative values clamp to 0.
fn hex_prefix_value(units: &[u16]) -> u8 {
    let mut chars = units
        .iter()
        .map(|&u| char::from_u32(u as u32))
        .skip_while(|c| c.is_some_and(char::is_whitespace))
        .peekable();

    let negative = match chars.peek() {
        Some(Some('-')) => {
            chars.next();
            true
        }
        Some(Some('+')) => {
            chars.next();
            false
        }
        _ => false,
    };

    let rest: Vec<Option<char>> = chars.collect();
    let digits = match rest.as_slice() {
        [Some('0'), Some('x' | 'X'), tail @ ..] => tail,
        all => all,
    };

    let value = digits
        .iter()
        .map_while(|c| c.and_then(|c| c.to_digit(16)))
        .fold(0u32, |acc, d| acc * 16 + d);

    if negative { 0 } else { value.min(u8::MAX as u32) as u8 }
}

pub fn color_to_hex(c: Color) -> String {
    format!("#{:02X}{:02X}{:02X}", c.red, c.green, c.blue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn band_boundaries() {
        assert_eq!(band_for_gray(0.0), 0);
        assert_eq!(band_for_gray(63.999), 0);
        assert_eq!(band_for_gray(64.0), 1);
        assert_eq!(band_for_gray(127.9), 1);
        assert_eq!(band_for_gray(128.0), 2);
        assert_eq!(band_for_gray(191.99), 2);
        assert_eq!(band_for_gray(192.0), 3);
        assert_eq!(band_for_gray(255.0), 3);
    }

    #[test]
    fn band_clamps_out_of_range_input() {
        assert_eq!(band_for_gray(-10.0), 0);
        assert_eq!(band_for_gray(f64::NAN), 0);
        assert_eq!(band_for_gray(300.0), 3);
        assert_eq!(band_for_gray(f64::INFINITY), 3);
    }

    #[test]
    fn luma_extremes() {
        assert_eq!(luma(0, 0, 0), 0.0);
        assert!((luma(255, 255, 255) - 255.0).abs() < 1e-9);
        assert_eq!(band_for_gray(luma(255, 255, 255)), 3);
    }

    #[test]
    fn luma_weights_green_heaviest() {
        assert!(luma(0, 255, 0) > luma(255, 0, 0));
        assert!(luma(255, 0, 0) > luma(0, 0, 255));
    }

    #[test]
    fn parses_hex() {
        assert_eq!(hex_to_color("#FFCCCC"), Color::new(255, 204, 204));
        assert_eq!(hex_to_color("#9999cc"), Color::new(153, 153, 204));
    }

    #[test]
    fn malformed_hex_is_black() {
        assert_eq!(hex_to_color("abc"), Color::new(0, 0, 0));
        assert_eq!(hex_to_color(""), Color::new(0, 0, 0));
        assert_eq!(hex_to_color("#FFF"), Color::new(0, 0, 0));
        assert_eq!(hex_to_color("#FFFFFFFF"), Color::new(0, 0, 0));
    }

    #[test]
    fn bad_channel_digits_read_as_zero() {
        assert_eq!(hex_to_color("#zz80FF"), Color::new(0, 128, 255));
        assert_eq!(hex_to_color("#-1+f00"), Color::new(0, 15, 0));
    }

    #[test]
    fn channels_read_leading_hex_digits() {
        assert_eq!(hex_to_color("#1g2h3i"), Color::new(1, 2, 3));
        assert_eq!(hex_to_color("#FFFFFé"), Color::new(255, 255, 15));
        assert_eq!(hex_to_color("# f0a0b"), Color::new(15, 10, 11));
    }

    #[test]
    fn length_counts_utf16_units_not_bytes() {
        // six characters, seven bytes
        assert_eq!(hex_to_color("#1é234"), Color::new(0, 0, 0));
        // surrogate pair makes seven units; its halves read as 0
        assert_eq!(hex_to_color("#😀1234"), Color::new(0, 0x12, 0x34));
    }

    #[test]
    fn leading_char_is_not_checked() {
        assert_eq!(hex_to_color("x102030"), Color::new(16, 32, 48));
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(color_to_hex(Color::new(255, 204, 0)), "#FFCC00");
        assert_eq!(color_to_hex(hex_to_color("#0a0b0c")), "#0A0B0C");
    }
}
