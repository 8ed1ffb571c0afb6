//! Byte-count humanizing and aspect ratios.

use crate::metadata::format_fixed;

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Humanize a byte count with 1024-based units.
///
/// Whole numbers are printed for bytes and for scaled values of 10 or more;
/// smaller scaled values keep one decimal.
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit_index = 0;

    while value >= 1024.0 && unit_index < UNITS.len() - 1 {
        value /= 1024.0;
        unit_index += 1;
    }

    let digits = if unit_index == 0 || value >= 10.0 { 0 } else { 1 };
    format!("{} {}", format_fixed(value, digits), UNITS[unit_index])
}

/// Reduced aspect ratio such as `16:9`.
///
/// Returns `None` when either side is missing or zero.
pub fn aspect_ratio(width: Option<u32>, height: Option<u32>) -> Option<String> {
    let (width, height) = (width?, height?);
    if width == 0 || height == 0 {
        return None;
    }
    let divisor = gcd(width, height);
    Some(format!("{}:{}", width / divisor, height / divisor))
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}
