//! Directory entry value decoding.
//!
//! Values are stored either inline in the entry's 4-byte value field (when
//! `count × width` fits) or at an offset relative to the TIFF header. Both
//! the entry and the value it points to are untrusted: every range is
//! checked against the buffer before it is read, and a bad range only costs
//! the one field.

use crate::error::{FieldError, IoError};
use crate::io::ByteBuffer;

use super::ifd::IfdEntry;
use super::parser::{ByteOrder, TiffHeader};
use super::tags::FieldType;

/// Maximum number of elements kept from a BYTE or UNDEFINED array.
pub const MAX_BYTE_VALUES: usize = 64;

// =============================================================================
// DecodedValue
// =============================================================================

/// A typed directory entry value.
///
/// Scalars and sequences are separate variants: a TIFF count of 1 yields the
/// scalar form, anything else the sequence form.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValue {
    /// ASCII text up to the first NUL
    Ascii(String),

    /// Single SHORT
    Short(u16),

    /// SHORT array
    Shorts(Vec<u16>),

    /// Single LONG
    Long(u32),

    /// LONG array
    Longs(Vec<u32>),

    /// Single RATIONAL with a non-zero denominator
    Rational(f64),

    /// RATIONAL array; elements with a zero denominator are `None`
    Rationals(Vec<Option<f64>>),

    /// Single BYTE or UNDEFINED
    Byte(u8),

    /// BYTE or UNDEFINED array, capped at [`MAX_BYTE_VALUES`] elements
    Bytes(Vec<u8>),

    /// Entry with a type code this crate does not decode
    Absent(u16),
}

impl DecodedValue {
    /// Scalar integer value, used for directory pointers.
    pub fn as_u32(&self) -> Option<u32> {
        match *self {
            DecodedValue::Short(value) => Some(u32::from(value)),
            DecodedValue::Long(value) => Some(value),
            DecodedValue::Byte(value) => Some(u32::from(value)),
            _ => None,
        }
    }

    /// Scalar numeric value of any type.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            DecodedValue::Rational(value) => Some(value),
            _ => self.as_u32().map(f64::from),
        }
    }

    /// Numeric sequence; zero-denominator rationals are `None`.
    pub fn as_f64_seq(&self) -> Option<Vec<Option<f64>>> {
        match self {
            DecodedValue::Rationals(values) => Some(values.clone()),
            DecodedValue::Shorts(values) => {
                Some(values.iter().map(|&v| Some(f64::from(v))).collect())
            }
            DecodedValue::Longs(values) => {
                Some(values.iter().map(|&v| Some(f64::from(v))).collect())
            }
            DecodedValue::Bytes(values) => {
                Some(values.iter().map(|&v| Some(f64::from(v))).collect())
            }
            _ => None,
        }
    }

    /// Text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DecodedValue::Ascii(text) => Some(text),
            _ => None,
        }
    }
}

// =============================================================================
// Value decoding
// =============================================================================

/// Decode the value of one directory entry.
///
/// # Errors
/// - `OutOfBounds` if the value range lies outside the buffer
/// - `ZeroDenominator` for a scalar rational with a zero denominator
/// - `Overflow` if the declared size or offset cannot be addressed
pub fn decode_value(
    buffer: &ByteBuffer<'_>,
    header: &TiffHeader,
    entry: &IfdEntry,
) -> Result<DecodedValue, FieldError> {
    let Some(field_type) = entry.field_type else {
        return Ok(DecodedValue::Absent(entry.field_type_raw));
    };

    let overflow = FieldError::Overflow {
        count: entry.count,
        width: field_type.size_in_bytes(),
    };
    let size = field_type.total_size(entry.count).ok_or(overflow.clone())?;
    let pointer = if field_type.fits_inline(entry.count) {
        entry.value_field_pos
    } else {
        header.resolve(entry.value_offset).ok_or(overflow)?
    };

    let byte_order = header.byte_order;
    let single = entry.count == 1;

    let value = match field_type {
        FieldType::Ascii => DecodedValue::Ascii(read_ascii(buffer, pointer, size)?),
        FieldType::Short => {
            let bytes = buffer.read_exact_at(pointer, size)?;
            if single {
                DecodedValue::Short(byte_order.read_u16(bytes))
            } else {
                DecodedValue::Shorts(parse_u16_array(bytes, byte_order))
            }
        }
        FieldType::Long => {
            let bytes = buffer.read_exact_at(pointer, size)?;
            if single {
                DecodedValue::Long(byte_order.read_u32(bytes))
            } else {
                DecodedValue::Longs(parse_u32_array(bytes, byte_order))
            }
        }
        FieldType::Rational => {
            let bytes = buffer.read_exact_at(pointer, size)?;
            if single {
                let value = parse_rational(bytes, byte_order).ok_or(FieldError::ZeroDenominator)?;
                DecodedValue::Rational(value)
            } else {
                DecodedValue::Rationals(
                    bytes
                        .chunks_exact(8)
                        .map(|chunk| parse_rational(chunk, byte_order))
                        .collect(),
                )
            }
        }
        FieldType::Byte | FieldType::Undefined => {
            if single {
                DecodedValue::Byte(buffer.read_u8(pointer)?)
            } else {
                let kept = size.min(MAX_BYTE_VALUES);
                DecodedValue::Bytes(buffer.read_exact_at(pointer, kept)?.to_vec())
            }
        }
    };

    Ok(value)
}

/// Read up to `count` bytes of ASCII, stopping at the first NUL.
///
/// The field only fails if the buffer ends before both the terminator and
/// `count` bytes are reached.
fn read_ascii(buffer: &ByteBuffer<'_>, pointer: usize, count: usize) -> Result<String, IoError> {
    let available = buffer.read_up_to(pointer, count);
    let text = match available.iter().position(|&b| b == 0) {
        Some(end) => &available[..end],
        None if available.len() == count => available,
        None => {
            return Err(IoError::RangeOutOfBounds {
                offset: pointer as u64,
                requested: count as u64,
                size: buffer.len() as u64,
            })
        }
    };
    Ok(String::from_utf8_lossy(text).into_owned())
}

// =============================================================================
// Convenience functions for reading from bytes directly
// =============================================================================

/// Parse a packed array of u16 values.
pub fn parse_u16_array(bytes: &[u8], byte_order: ByteOrder) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|chunk| byte_order.read_u16(chunk))
        .collect()
}

/// Parse a packed array of u32 values.
pub fn parse_u32_array(bytes: &[u8], byte_order: ByteOrder) -> Vec<u32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| byte_order.read_u32(chunk))
        .collect()
}

/// Parse one RATIONAL (8 bytes); `None` when the denominator is zero.
pub fn parse_rational(bytes: &[u8], byte_order: ByteOrder) -> Option<f64> {
    let numerator = byte_order.read_u32(&bytes[0..4]);
    let denominator = byte_order.read_u32(&bytes[4..8]);
    if denominator == 0 {
        return None;
    }
    Some(f64::from(numerator) / f64::from(denominator))
}

// =============================================================================
// Tests
// =============================================================================
