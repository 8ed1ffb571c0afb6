//! Best-effort EXIF extraction.
//!
//! [`extract`] wires the container scanner, the TIFF header reader and the
//! directory decoder together and reports how complete the result is.
//! [`decode`] is the plain variant that only returns the record.
//!
//! # Pipeline
//!
//! ```text
//! buffer ─► APP1 scan (JPEG only) ─► TIFF header ─► IFD0
//!                                                   ├─► Exif IFD (via 0x8769)
//!                                                   └─► GPS IFD  (via 0x8825)
//!        ─► merge ─► format ─► MetadataRecord
//! ```
//!
//! Only the sub-IFDs referenced by IFD0 pointer tags are followed. The
//! next-IFD chain (IFD1 thumbnails, further TIFF pages) is read but not
//! traversed.

mod formatter;

use tracing::debug;

use crate::error::{ContainerError, DecodeIssue};
use crate::format::tiff::{decode_ifd, DecodedIfd, ExifTag, TagDictionary, TiffHeader};
use crate::format::{find_exif_tiff_start, has_soi, ContainerKind};
use crate::io::ByteBuffer;

pub use formatter::{
    dms_to_decimal, format_exposure_time, format_fields, format_fixed, MetadataRecord,
    MetadataValue, GPS_FIELD,
};

// =============================================================================
// Extraction
// =============================================================================

/// Why no metadata was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbsentReason {
    /// Extension hint names a container without EXIF support
    UnsupportedContainer,

    /// JPEG has no EXIF APP1 segment before the image data
    NoExifSegment,

    /// Container structure was rejected
    Container(ContainerError),
}

/// Outcome of one extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// Every directory and field decoded cleanly
    Complete(MetadataRecord),

    /// Metadata was produced, but some fields or structures were dropped
    Degraded {
        record: MetadataRecord,
        issues: Vec<DecodeIssue>,
    },

    /// No metadata
    Absent(AbsentReason),
}

impl Extraction {
    /// Take the record, if any.
    pub fn into_record(self) -> Option<MetadataRecord> {
        match self {
            Extraction::Complete(record) | Extraction::Degraded { record, .. } => Some(record),
            Extraction::Absent(_) => None,
        }
    }

    /// Issues met while decoding; empty unless degraded.
    pub fn issues(&self) -> &[DecodeIssue] {
        match self {
            Extraction::Degraded { issues, .. } => issues,
            _ => &[],
        }
    }

    /// Whether no metadata was produced.
    pub fn is_absent(&self) -> bool {
        matches!(self, Extraction::Absent(_))
    }
}

// =============================================================================
// Entry points
// =============================================================================

/// Decode EXIF metadata from a file buffer.
///
/// Returns `None` when the container is unsupported or rejected, or when a
/// JPEG carries no EXIF segment. Never panics on malformed input.
pub fn decode(buffer: &[u8], extension_hint: &str) -> Option<MetadataRecord> {
    extract(buffer, extension_hint).into_record()
}

/// Decode EXIF metadata and report how complete the result is.
///
/// The extension hint selects the container; the buffer is not inspected at
/// all for extensions other than JPEG and TIFF.
pub fn extract(buffer: &[u8], extension_hint: &str) -> Extraction {
    let Some(kind) = ContainerKind::from_extension(extension_hint) else {
        return Extraction::Absent(AbsentReason::UnsupportedContainer);
    };

    let tiff_start = match kind {
        ContainerKind::Jpeg => {
            if !has_soi(buffer) {
                debug!("JPEG buffer does not start with SOI");
                return Extraction::Absent(AbsentReason::Container(ContainerError::MissingSoi));
            }
            match find_exif_tiff_start(buffer) {
                Some(tiff_start) => tiff_start,
                None => return Extraction::Absent(AbsentReason::NoExifSegment),
            }
        }
        ContainerKind::Tiff => 0,
    };

    extract_tiff(&ByteBuffer::new(buffer), tiff_start)
}

/// Decode the TIFF block at `tiff_start`.
pub fn extract_tiff(buffer: &ByteBuffer<'_>, tiff_start: usize) -> Extraction {
    let header = match TiffHeader::parse(buffer, tiff_start) {
        Ok(header) => header,
        Err(error) => {
            debug!(%error, tiff_start, "Rejected TIFF block");
            return Extraction::Absent(AbsentReason::Container(error));
        }
    };

    let ifd0 = decode_ifd(buffer, &header, header.first_ifd_offset, TagDictionary::Ifd0);
    let sub_directories = [
        (ifd0.pointer(ExifTag::ExifIfdPointer), TagDictionary::Exif),
        (ifd0.pointer(ExifTag::GpsIfdPointer), TagDictionary::Gps),
    ];

    let DecodedIfd {
        mut fields,
        mut issues,
        next_offset,
    } = ifd0;
    if next_offset != 0 {
        debug!(next_offset, "Not following IFD0 next-directory chain");
    }

    for (pointer, dictionary) in sub_directories {
        let Some(offset) = pointer else {
            continue;
        };
        let sub = decode_ifd(buffer, &header, offset, dictionary);
        fields.extend(sub.fields);
        issues.extend(sub.issues);
    }

    let record = format_fields(&fields);
    if issues.is_empty() {
        Extraction::Complete(record)
    } else {
        debug!(
            fields = record.len(),
            dropped = issues.len(),
            "Decoded metadata with issues"
        );
        Extraction::Degraded { record, issues }
    }
}
