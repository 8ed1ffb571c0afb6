//! TIFF field types and the EXIF tag dictionaries.
//!
//! This module defines the vocabulary for directory decoding:
//! - Field types that determine how entry values are encoded
//! - The subset of EXIF tags this crate extracts, grouped by directory kind
//!
//! Dictionaries are closed `match` tables keyed by the raw 16-bit tag id, so
//! lookups are exact and allocation-free. Tags not listed here are skipped
//! during decoding.

// =============================================================================
// TIFF Field Types
// =============================================================================

/// TIFF field types that determine how values are encoded.
///
/// Only the types that carry the extracted tags are defined. Any other type
/// code (SRATIONAL, FLOAT, ...) decodes as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum FieldType {
    /// Unsigned 8-bit integer (1 byte)
    Byte = 1,

    /// 8-bit ASCII character (1 byte)
    Ascii = 2,

    /// Unsigned 16-bit integer (2 bytes)
    Short = 3,

    /// Unsigned 32-bit integer (4 bytes)
    Long = 4,

    /// Two unsigned 32-bit integers: numerator, denominator (8 bytes)
    Rational = 5,

    /// Undefined byte data (1 byte per element)
    Undefined = 7,
}

impl FieldType {
    /// Maximum bytes that can be stored inline in an IFD entry.
    pub const INLINE_THRESHOLD: usize = 4;

    /// Size of a single value of this type in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Byte => 1,
            FieldType::Ascii => 1,
            FieldType::Short => 2,
            FieldType::Long => 4,
            FieldType::Rational => 8,
            FieldType::Undefined => 1,
        }
    }

    /// Create a FieldType from its numeric value.
    ///
    /// Returns `None` for unsupported or unknown type values.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(FieldType::Byte),
            2 => Some(FieldType::Ascii),
            3 => Some(FieldType::Short),
            4 => Some(FieldType::Long),
            5 => Some(FieldType::Rational),
            7 => Some(FieldType::Undefined),
            _ => None,
        }
    }

    /// Total byte size of `count` values, or `None` on overflow.
    #[inline]
    pub fn total_size(self, count: u32) -> Option<usize> {
        usize::try_from(count)
            .ok()
            .and_then(|count| count.checked_mul(self.size_in_bytes()))
    }

    /// Check if `count` values of this type fit in the 4-byte value field.
    #[inline]
    pub fn fits_inline(self, count: u32) -> bool {
        self.total_size(count)
            .is_some_and(|size| size <= Self::INLINE_THRESHOLD)
    }
}

// =============================================================================
// EXIF Tags
// =============================================================================

/// EXIF tags extracted by this crate.
///
/// The discriminant is the tag id as it appears in the directory entry.
/// GPS tag ids live in their own namespace; they only mean these tags when
/// looked up through [`TagDictionary::Gps`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum ExifTag {
    // -------------------------------------------------------------------------
    // IFD0
    // -------------------------------------------------------------------------
    /// Camera manufacturer
    Make = 0x010F,

    /// Camera model
    Model = 0x0110,

    /// Image orientation (1-8)
    Orientation = 0x0112,

    /// File change date and time
    DateTime = 0x0132,

    /// Offset of the Exif sub-IFD
    ExifIfdPointer = 0x8769,

    /// Offset of the GPS sub-IFD
    GpsIfdPointer = 0x8825,

    // -------------------------------------------------------------------------
    // Exif sub-IFD
    // -------------------------------------------------------------------------
    /// Exposure time in seconds
    ExposureTime = 0x829A,

    /// Aperture as an f-number
    FNumber = 0x829D,

    /// ISO sensitivity
    IsoSpeedRatings = 0x8827,

    /// Capture date and time
    DateTimeOriginal = 0x9003,

    /// Lens focal length in millimetres
    FocalLength = 0x920A,

    /// Lens model name
    LensModel = 0xA434,

    // -------------------------------------------------------------------------
    // GPS sub-IFD
    // -------------------------------------------------------------------------
    /// "N" or "S"
    GpsLatitudeRef = 0x0001,

    /// Latitude as [degrees, minutes, seconds]
    GpsLatitude = 0x0002,

    /// "E" or "W"
    GpsLongitudeRef = 0x0003,

    /// Longitude as [degrees, minutes, seconds]
    GpsLongitude = 0x0004,
}

impl ExifTag {
    /// Get the numeric tag id.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Field name used in the decoded metadata.
    pub const fn name(self) -> &'static str {
        match self {
            ExifTag::Make => "Make",
            ExifTag::Model => "Model",
            ExifTag::Orientation => "Orientation",
            ExifTag::DateTime => "DateTime",
            ExifTag::ExifIfdPointer => "ExifIFDPointer",
            ExifTag::GpsIfdPointer => "GPSInfoIFDPointer",
            ExifTag::ExposureTime => "ExposureTime",
            ExifTag::FNumber => "FNumber",
            ExifTag::IsoSpeedRatings => "ISOSpeedRatings",
            ExifTag::DateTimeOriginal => "DateTimeOriginal",
            ExifTag::FocalLength => "FocalLength",
            ExifTag::LensModel => "LensModel",
            ExifTag::GpsLatitudeRef => "GPSLatitudeRef",
            ExifTag::GpsLatitude => "GPSLatitude",
            ExifTag::GpsLongitudeRef => "GPSLongitudeRef",
            ExifTag::GpsLongitude => "GPSLongitude",
        }
    }

    /// Whether this tag points at another directory rather than carrying data.
    pub const fn is_pointer(self) -> bool {
        matches!(self, ExifTag::ExifIfdPointer | ExifTag::GpsIfdPointer)
    }
}

// =============================================================================
// Tag Dictionaries
// =============================================================================

/// Per-directory tag dictionary.
///
/// Each directory kind has its own tag namespace; the dictionary is handed to
/// the IFD decoder, which skips every entry the dictionary does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagDictionary {
    /// Primary image directory
    Ifd0,
    /// Exif sub-directory
    Exif,
    /// GPS sub-directory
    Gps,
}

impl TagDictionary {
    /// Look up a raw tag id.
    pub const fn lookup(self, tag_id: u16) -> Option<ExifTag> {
        match (self, tag_id) {
            (TagDictionary::Ifd0, 0x010F) => Some(ExifTag::Make),
            (TagDictionary::Ifd0, 0x0110) => Some(ExifTag::Model),
            (TagDictionary::Ifd0, 0x0112) => Some(ExifTag::Orientation),
            (TagDictionary::Ifd0, 0x0132) => Some(ExifTag::DateTime),
            (TagDictionary::Ifd0, 0x8769) => Some(ExifTag::ExifIfdPointer),
            (TagDictionary::Ifd0, 0x8825) => Some(ExifTag::GpsIfdPointer),

            (TagDictionary::Exif, 0x829A) => Some(ExifTag::ExposureTime),
            (TagDictionary::Exif, 0x829D) => Some(ExifTag::FNumber),
            (TagDictionary::Exif, 0x8827) => Some(ExifTag::IsoSpeedRatings),
            (TagDictionary::Exif, 0x9003) => Some(ExifTag::DateTimeOriginal),
            (TagDictionary::Exif, 0x920A) => Some(ExifTag::FocalLength),
            (TagDictionary::Exif, 0xA434) => Some(ExifTag::LensModel),

            (TagDictionary::Gps, 0x0001) => Some(ExifTag::GpsLatitudeRef),
            (TagDictionary::Gps, 0x0002) => Some(ExifTag::GpsLatitude),
            (TagDictionary::Gps, 0x0003) => Some(ExifTag::GpsLongitudeRef),
            (TagDictionary::Gps, 0x0004) => Some(ExifTag::GpsLongitude),

            _ => None,
        }
    }

    /// Human-readable directory name, used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            TagDictionary::Ifd0 => "IFD0",
            TagDictionary::Exif => "Exif IFD",
            TagDictionary::Gps => "GPS IFD",
        }
    }
}
