//! Image File Directory decoding.
//!
//! # IFD Structure
//! ```text
//! Bytes 0-1:        Entry count N
//! Bytes 2..2+12N:   N entries of 12 bytes each
//!                     0-1  tag id
//!                     2-3  field type
//!                     4-7  value count
//!                     8-11 value, or offset to value (relative to TIFF start)
//! Bytes 2+12N..+4:  Offset of the next IFD (0 = none)
//! ```
//!
//! The declared entry count is not trusted. Entries are read one at a time
//! and decoding stops at the first record that would overrun the buffer,
//! keeping whatever was decoded before it.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::DecodeIssue;
use crate::io::ByteBuffer;

use super::parser::{ByteOrder, TiffHeader};
use super::tags::{ExifTag, FieldType, TagDictionary};
use super::values::{decode_value, DecodedValue};

/// Size of one IFD entry in bytes.
pub const IFD_ENTRY_SIZE: usize = 12;

/// Size of the entry count field at the start of an IFD.
const IFD_COUNT_SIZE: usize = 2;

/// Size of the next IFD offset field at the end of an IFD.
const IFD_NEXT_OFFSET_SIZE: usize = 4;

// =============================================================================
// IfdEntry
// =============================================================================

/// One raw 12-byte directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfdEntry {
    /// Tag id
    pub tag_id: u16,

    /// Field type, if supported
    pub field_type: Option<FieldType>,

    /// Raw field type code
    pub field_type_raw: u16,

    /// Number of values
    pub count: u32,

    /// The value field read as an offset
    pub value_offset: u32,

    /// Absolute buffer position of the 4-byte value field
    pub value_field_pos: usize,
}

impl IfdEntry {
    /// Parse an entry from its 12 bytes located at absolute `position`.
    ///
    /// # Panics
    /// Panics if `bytes` is shorter than [`IFD_ENTRY_SIZE`].
    pub fn parse(bytes: &[u8], position: usize, byte_order: ByteOrder) -> Self {
        let field_type_raw = byte_order.read_u16(&bytes[2..4]);
        IfdEntry {
            tag_id: byte_order.read_u16(&bytes[0..2]),
            field_type: FieldType::from_u16(field_type_raw),
            field_type_raw,
            count: byte_order.read_u32(&bytes[4..8]),
            value_offset: byte_order.read_u32(&bytes[8..12]),
            value_field_pos: position + 8,
        }
    }
}

// =============================================================================
// DecodedIfd
// =============================================================================

/// Result of decoding one directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedIfd {
    /// Decoded fields keyed by tag
    pub fields: BTreeMap<ExifTag, DecodedValue>,

    /// Offset of the next IFD relative to the TIFF start (0 = none)
    pub next_offset: u32,

    /// Fields and structures dropped while decoding
    pub issues: Vec<DecodeIssue>,
}

impl DecodedIfd {
    /// Look up a decoded field.
    pub fn get(&self, tag: ExifTag) -> Option<&DecodedValue> {
        self.fields.get(&tag)
    }

    /// Resolve a pointer tag to a sub-IFD offset.
    ///
    /// A zero pointer means no sub-IFD.
    pub fn pointer(&self, tag: ExifTag) -> Option<u32> {
        self.get(tag)
            .and_then(DecodedValue::as_u32)
            .filter(|&offset| offset != 0)
    }
}

// =============================================================================
// Directory decoding
// =============================================================================

/// Decode the directory at `ifd_offset` (relative to the TIFF start).
///
/// Only tags known to `dictionary` are decoded. This never fails: an
/// unreachable directory decodes as empty, a truncated entry array yields the
/// entries read so far, and a field that cannot be decoded is dropped. Each
/// of these is recorded in [`DecodedIfd::issues`].
pub fn decode_ifd(
    buffer: &ByteBuffer<'_>,
    header: &TiffHeader,
    ifd_offset: u32,
    dictionary: TagDictionary,
) -> DecodedIfd {
    let mut ifd = DecodedIfd::default();
    let byte_order = header.byte_order;

    let Some(start) = header
        .resolve(ifd_offset)
        .filter(|&start| buffer.contains(start, IFD_COUNT_SIZE))
    else {
        debug!(
            directory = dictionary.name(),
            ifd_offset, "Directory start is outside the buffer"
        );
        ifd.issues.push(DecodeIssue::Truncated {
            structure: "directory entry count",
            offset: u64::from(ifd_offset),
            size: buffer.len() as u64,
        });
        return ifd;
    };

    let entry_count = match buffer.read_u16(start, byte_order) {
        Ok(count) => usize::from(count),
        Err(_) => return ifd,
    };
    let entries_start = start + IFD_COUNT_SIZE;

    for index in 0..entry_count {
        let position = entries_start + index * IFD_ENTRY_SIZE;
        let Ok(bytes) = buffer.read_exact_at(position, IFD_ENTRY_SIZE) else {
            debug!(
                directory = dictionary.name(),
                declared = entry_count,
                read = index,
                "Entry array overruns the buffer"
            );
            ifd.issues.push(DecodeIssue::Truncated {
                structure: "directory entry array",
                offset: position as u64,
                size: buffer.len() as u64,
            });
            break;
        };

        let entry = IfdEntry::parse(bytes, position, byte_order);
        let Some(tag) = dictionary.lookup(entry.tag_id) else {
            continue;
        };

        match decode_value(buffer, header, &entry) {
            Ok(value) => {
                ifd.fields.insert(tag, value);
            }
            Err(error) => {
                debug!(
                    directory = dictionary.name(),
                    field = tag.name(),
                    %error,
                    "Dropping undecodable field"
                );
                ifd.issues.push(DecodeIssue::Field {
                    tag: entry.tag_id,
                    name: tag.name(),
                    source: error,
                });
            }
        }
    }

    let next_offset_pos = entries_start + entry_count * IFD_ENTRY_SIZE;
    if buffer.contains(next_offset_pos, IFD_NEXT_OFFSET_SIZE) {
        ifd.next_offset = buffer.read_u32(next_offset_pos, byte_order).unwrap_or(0);
    }

    ifd
}

// =============================================================================
// Tests
// =============================================================================
