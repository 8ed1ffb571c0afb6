//! JPEG marker segment scanning.
//!
//! EXIF data in a JPEG file lives in an APP1 segment whose payload starts
//! with the `"Exif\0\0"` signature followed by a complete TIFF block.
//!
//! # Segment Layout
//!
//! ```text
//! FF D8                      SOI
//! FF Ex LL LL <payload>      APPn, LL LL = big-endian length incl. itself
//! ...
//! FF DA                      SOS (entropy-coded data follows)
//! ```
//!
//! The scanner walks segment headers only; it never enters the scan data.

use tracing::trace;

// =============================================================================
// JPEG Markers
// =============================================================================

/// Start Of Image marker
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// End Of Image marker second byte
const EOI: u8 = 0xD9;

/// Start Of Scan marker second byte
const SOS: u8 = 0xDA;

/// Application segment 1 (EXIF, XMP) marker second byte
const APP1: u8 = 0xE1;

/// Signature that opens an EXIF APP1 payload
pub const EXIF_SIGNATURE: &[u8; 6] = b"Exif\0\0";

/// Smallest legal segment length (the length field itself)
const MIN_SEGMENT_LENGTH: usize = 2;

// =============================================================================
// Segment Scanning
// =============================================================================

/// Check if data starts with the JPEG SOI marker.
#[inline]
pub fn has_soi(data: &[u8]) -> bool {
    data.len() >= 2 && data[0..2] == SOI
}

/// Locate the TIFF block embedded in the first EXIF APP1 segment.
///
/// The caller is expected to have checked [`has_soi`]. Returns the absolute
/// position of the TIFF header, or `None` if the scan reaches SOS, EOI, a
/// malformed segment length, or the end of the buffer first.
pub fn find_exif_tiff_start(data: &[u8]) -> Option<usize> {
    let mut pos = 2;

    while pos + 4 < data.len() {
        if data[pos] != 0xFF {
            pos += 1;
            continue;
        }

        let marker = data[pos + 1];
        if marker == EOI || marker == SOS {
            trace!(pos, marker, "Reached end of marker segments");
            return None;
        }

        let length = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        if length < MIN_SEGMENT_LENGTH {
            trace!(pos, length, "Invalid segment length");
            return None;
        }

        if marker == APP1 {
            let payload = pos + 4;
            let signature = data.get(payload..payload + EXIF_SIGNATURE.len())?;
            if signature == EXIF_SIGNATURE {
                let tiff_start = payload + EXIF_SIGNATURE.len();
                trace!(pos, tiff_start, "Found EXIF APP1 segment");
                return Some(tiff_start);
            }
        }

        trace!(pos, marker, length, "Skipping segment");
        pos += 2 + length;
    }

    None
}

// =============================================================================
// Tests
// =============================================================================
