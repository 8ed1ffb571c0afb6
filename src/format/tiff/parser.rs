//! TIFF header parsing.
//!
//! The header is the entry point of every EXIF block: embedded in a JPEG APP1
//! segment or at offset 0 of a bare TIFF file.
//!
//! # TIFF Header Structure (8 bytes)
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Version (42 = 0x002A)
//! Bytes 4-7: Offset to first IFD, relative to the header start
//! ```

use tracing::debug;

use crate::error::ContainerError;
use crate::io::{read_u16_be, read_u16_le, read_u32_be, read_u32_le, ByteBuffer};

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Magic bytes indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// Version number for classic TIFF
const VERSION_TIFF: u16 = 42;

/// Size of the TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of a TIFF block.
///
/// TIFF blocks declare their byte order in the first two bytes of the header.
/// All multi-byte values in the block must be read respecting this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Read a u16 from a byte slice using this byte order.
    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        match self {
            ByteOrder::LittleEndian => read_u16_le(bytes),
            ByteOrder::BigEndian => read_u16_be(bytes),
        }
    }

    /// Read a u32 from a byte slice using this byte order.
    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        match self {
            ByteOrder::LittleEndian => read_u32_le(bytes),
            ByteOrder::BigEndian => read_u32_be(bytes),
        }
    }
}

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF header.
///
/// All offsets inside the block (directories, out-of-line values) are
/// relative to `tiff_start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Absolute position of the header within the buffer
    pub tiff_start: usize,

    /// Byte order for all multi-byte values in the block
    pub byte_order: ByteOrder,

    /// Offset to IFD0, relative to `tiff_start`
    pub first_ifd_offset: u32,
}

impl TiffHeader {
    /// Parse the TIFF header located at `tiff_start`.
    ///
    /// The IFD0 offset is not range-checked here; an unreachable directory
    /// simply decodes as empty.
    ///
    /// # Errors
    /// - `Truncated` if fewer than 8 bytes remain at `tiff_start`
    /// - `InvalidByteOrder` if the byte order bytes are not II or MM
    /// - `InvalidVersion` if the version is not 42
    pub fn parse(buffer: &ByteBuffer<'_>, tiff_start: usize) -> Result<Self, ContainerError> {
        let bytes = buffer
            .read_exact_at(tiff_start, TIFF_HEADER_SIZE)
            .map_err(|_| ContainerError::Truncated {
                required: TIFF_HEADER_SIZE as u64,
                actual: buffer.len().saturating_sub(tiff_start) as u64,
            })?;

        // Checked as raw byte patterns, so read little-endian
        let magic = u16::from_le_bytes([bytes[0], bytes[1]]);
        let byte_order = match magic {
            BYTE_ORDER_LITTLE_ENDIAN => ByteOrder::LittleEndian,
            BYTE_ORDER_BIG_ENDIAN => ByteOrder::BigEndian,
            _ => return Err(ContainerError::InvalidByteOrder(magic)),
        };

        let version = byte_order.read_u16(&bytes[2..4]);
        if version != VERSION_TIFF {
            return Err(ContainerError::InvalidVersion(version));
        }

        let first_ifd_offset = byte_order.read_u32(&bytes[4..8]);
        debug!(
            tiff_start,
            ?byte_order,
            first_ifd_offset,
            "Parsed TIFF header"
        );

        Ok(TiffHeader {
            tiff_start,
            byte_order,
            first_ifd_offset,
        })
    }

    /// Resolve an offset relative to the header into an absolute position.
    ///
    /// Returns `None` if the sum does not fit in `usize`.
    #[inline]
    pub fn resolve(&self, relative: u32) -> Option<usize> {
        usize::try_from(relative)
            .ok()
            .and_then(|relative| self.tiff_start.checked_add(relative))
    }
}

// =============================================================================
// Tests
// =============================================================================
