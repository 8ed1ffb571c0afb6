//! TIFF structure parsing for EXIF blocks.
//!
//! # Key Concepts
//!
//! - **Byte order**: TIFF blocks declare their endianness (II = little-endian,
//!   MM = big-endian) in the header. All multi-byte values must be read
//!   respecting this order.
//!
//! - **IFD (Image File Directory)**: A counted array of tagged entries. EXIF
//!   data lives in IFD0 and in the Exif and GPS sub-IFDs that IFD0 points to.
//!
//! - **Inline vs offset values**: Values of at most 4 bytes are stored inline
//!   in the entry; larger values are stored at an offset relative to the TIFF
//!   header start.

mod ifd;
mod parser;
mod tags;
mod values;

pub use ifd::{decode_ifd, DecodedIfd, IfdEntry, IFD_ENTRY_SIZE};
pub use parser::{ByteOrder, TiffHeader, TIFF_HEADER_SIZE};
pub use tags::{ExifTag, FieldType, TagDictionary};
pub use values::{
    decode_value, parse_rational, parse_u16_array, parse_u32_array, DecodedValue,
    MAX_BYTE_VALUES,
};
