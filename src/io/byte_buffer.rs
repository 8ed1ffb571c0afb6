//! Bounds-checked reads over an untrusted in-memory buffer.
//!
//! Every offset handed to [`ByteBuffer`] comes from attacker-controlled data,
//! so all accessors validate the full range before touching the slice and
//! report [`IoError::RangeOutOfBounds`] instead of panicking.

use crate::error::IoError;
use crate::format::tiff::ByteOrder;

// =============================================================================
// ByteBuffer
// =============================================================================

/// Read-only view over a byte buffer with checked, endian-aware accessors.
#[derive(Debug, Clone, Copy)]
pub struct ByteBuffer<'a> {
    data: &'a [u8],
}

impl<'a> ByteBuffer<'a> {
    /// Wrap a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Total buffer length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether `len` bytes starting at `offset` lie inside the buffer.
    #[inline]
    pub fn contains(&self, offset: usize, len: usize) -> bool {
        offset
            .checked_add(len)
            .is_some_and(|end| end <= self.data.len())
    }

    /// Read exactly `len` bytes at `offset`.
    pub fn read_exact_at(&self, offset: usize, len: usize) -> Result<&'a [u8], IoError> {
        if !self.contains(offset, len) {
            return Err(IoError::RangeOutOfBounds {
                offset: offset as u64,
                requested: len as u64,
                size: self.data.len() as u64,
            });
        }
        Ok(&self.data[offset..offset + len])
    }

    /// Read at most `len` bytes at `offset`, clamped to the end of the buffer.
    ///
    /// Returns an empty slice when `offset` is past the end.
    pub fn read_up_to(&self, offset: usize, len: usize) -> &'a [u8] {
        let start = offset.min(self.data.len());
        let end = offset.saturating_add(len).min(self.data.len());
        &self.data[start..end]
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&self, offset: usize) -> Result<u8, IoError> {
        Ok(self.read_exact_at(offset, 1)?[0])
    }

    /// Read a u16 using the given byte order.
    #[inline]
    pub fn read_u16(&self, offset: usize, byte_order: ByteOrder) -> Result<u16, IoError> {
        Ok(byte_order.read_u16(self.read_exact_at(offset, 2)?))
    }

    /// Read a u32 using the given byte order.
    #[inline]
    pub fn read_u32(&self, offset: usize, byte_order: ByteOrder) -> Result<u32, IoError> {
        Ok(byte_order.read_u32(self.read_exact_at(offset, 4)?))
    }
}

// =============================================================================
// Raw integer helpers
// =============================================================================

/// Read a little-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_le(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

/// Read a big-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_be(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

/// Read a little-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a big-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_be(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
