//! Presentation formatting of decoded EXIF fields.
//!
//! Turns the merged raw fields of IFD0, the Exif IFD and the GPS IFD into the
//! flat record handed to callers: exposure as a fraction, aperture as an
//! f-number, focal length in millimetres and GPS as signed decimal degrees.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::format::tiff::{DecodedValue, ExifTag};

/// Output field name of the combined GPS coordinate.
pub const GPS_FIELD: &str = "GPS";

// =============================================================================
// MetadataValue / MetadataRecord
// =============================================================================

/// A formatted metadata value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Text, including formatted numbers and joined sequences
    Text(String),

    /// Integer value (SHORT, LONG, BYTE)
    Integer(u32),

    /// Floating point value (RATIONAL)
    Float(f64),
}

impl MetadataValue {
    /// Text content, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Text(text) => f.write_str(text),
            MetadataValue::Integer(value) => write!(f, "{value}"),
            MetadataValue::Float(value) => write!(f, "{value}"),
        }
    }
}

/// Final metadata mapping from field name to formatted value.
///
/// Directory pointers and raw GPS components never appear here.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetadataRecord {
    fields: BTreeMap<&'static str, MetadataValue>,
}

impl MetadataRecord {
    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&MetadataValue> {
        self.fields.get(name)
    }

    /// Whether a field is present.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &MetadataValue)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }

    fn insert(&mut self, name: &'static str, value: MetadataValue) {
        self.fields.insert(name, value);
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Format merged directory fields into a [`MetadataRecord`].
///
/// GPS is emitted only when both latitude and longitude convert; the raw
/// GPS fields are dropped either way.
pub fn format_fields(fields: &BTreeMap<ExifTag, DecodedValue>) -> MetadataRecord {
    let mut record = MetadataRecord::default();

    for (&tag, value) in fields {
        if tag.is_pointer() || is_raw_gps(tag) {
            continue;
        }

        let formatted = match tag {
            ExifTag::ExposureTime => value.as_f64().map(format_exposure_time),
            ExifTag::FNumber => value.as_f64().map(|v| format!("f/{}", format_fixed(v, 1))),
            ExifTag::FocalLength => value.as_f64().map(|v| format!("{}mm", format_fixed(v, 1))),
            _ => None,
        };

        let formatted = match formatted {
            Some(text) => Some(MetadataValue::Text(text)),
            None => passthrough(value),
        };

        if let Some(formatted) = formatted {
            record.insert(tag.name(), formatted);
        }
    }

    if let Some(gps) = gps_coordinates(fields) {
        record.insert(GPS_FIELD, MetadataValue::Text(gps));
    }

    record
}

/// Fixed-point rendering with `digits` decimals.
///
/// Values exactly halfway between two outputs round away from zero; all
/// other values round to the nearest output.
pub fn format_fixed(value: f64, digits: usize) -> String {
    let value = if is_decimal_tie(value, digits) {
        // One ulp away from zero; the neighbour is no longer a tie
        f64::from_bits(value.to_bits() + 1)
    } else {
        value
    };
    format!("{value:.digits$}")
}

/// Whether `value * 10^digits` has a fractional part of exactly one half.
fn is_decimal_tie(value: f64, digits: usize) -> bool {
    if !value.is_finite() || value == 0.0 {
        return false;
    }

    let bits = value.to_bits();
    let biased_exponent = ((bits >> 52) & 0x7FF) as i64;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased_exponent == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased_exponent - 1075)
    };

    // value * 10^d * 2 = mantissa * 5^d * 2^(exponent + d + 1) must be an odd integer
    let Ok(digits) = i64::try_from(digits) else {
        return false;
    };
    let half_shift = -(exponent + digits + 1);
    half_shift >= 0 && i64::from(mantissa.trailing_zeros()) == half_shift
}

/// Render an exposure time in seconds.
///
/// Sub-second exposures become `1/N`; anything else is printed as-is.
pub fn format_exposure_time(seconds: f64) -> String {
    if seconds > 0.0 && seconds < 1.0 {
        format!("1/{}", (1.0 / seconds).round())
    } else {
        format!("{seconds}")
    }
}

/// Convert a [degrees, minutes, seconds] triple to decimal degrees.
///
/// Missing components count as zero; fewer than three components is `None`.
pub fn dms_to_decimal(dms: &[Option<f64>], negate: bool) -> Option<f64> {
    let [degrees, minutes, seconds]: [Option<f64>; 3] = dms.get(..3)?.try_into().ok()?;
    let decimal = degrees.unwrap_or(0.0)
        + minutes.unwrap_or(0.0) / 60.0
        + seconds.unwrap_or(0.0) / 3600.0;
    Some(if negate { -decimal } else { decimal })
}

fn gps_coordinates(fields: &BTreeMap<ExifTag, DecodedValue>) -> Option<String> {
    let latitude = fields.get(&ExifTag::GpsLatitude)?.as_f64_seq()?;
    let longitude = fields.get(&ExifTag::GpsLongitude)?.as_f64_seq()?;

    let reference = |tag: ExifTag, default: &'static str| -> String {
        fields
            .get(&tag)
            .and_then(DecodedValue::as_text)
            .filter(|text| !text.is_empty())
            .unwrap_or(default)
            .to_string()
    };
    let latitude_ref = reference(ExifTag::GpsLatitudeRef, "N");
    let longitude_ref = reference(ExifTag::GpsLongitudeRef, "E");

    let latitude = dms_to_decimal(&latitude, latitude_ref == "S")?;
    let longitude = dms_to_decimal(&longitude, longitude_ref == "W")?;
    Some(format!(
        "{}, {}",
        format_fixed(latitude, 6),
        format_fixed(longitude, 6)
    ))
}

fn is_raw_gps(tag: ExifTag) -> bool {
    matches!(
        tag,
        ExifTag::GpsLatitude
            | ExifTag::GpsLatitudeRef
            | ExifTag::GpsLongitude
            | ExifTag::GpsLongitudeRef
    )
}

fn passthrough(value: &DecodedValue) -> Option<MetadataValue> {
    let value = match value {
        DecodedValue::Ascii(text) => MetadataValue::Text(text.clone()),
        DecodedValue::Short(v) => MetadataValue::Integer(u32::from(*v)),
        DecodedValue::Long(v) => MetadataValue::Integer(*v),
        DecodedValue::Byte(v) => MetadataValue::Integer(u32::from(*v)),
        DecodedValue::Rational(v) => MetadataValue::Float(*v),
        DecodedValue::Shorts(values) => MetadataValue::Text(join(values)),
        DecodedValue::Longs(values) => MetadataValue::Text(join(values)),
        DecodedValue::Bytes(values) => MetadataValue::Text(join(values)),
        DecodedValue::Rationals(values) => MetadataValue::Text(
            values
                .iter()
                .map(|v| v.map_or_else(|| "null".to_string(), |v| v.to_string()))
                .collect::<Vec<_>>()
                .join(", "),
        ),
        DecodedValue::Absent(_) => return None,
    };
    Some(value)
}

fn join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
