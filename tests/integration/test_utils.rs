//! Test utilities for integration tests.
//!
//! Builders that synthesize EXIF-bearing TIFF blocks in either byte order,
//! plus helpers to wrap them in JPEG segments.

// =============================================================================
// Field Values
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrderType {
    LittleEndian,
    BigEndian,
}

/// A typed value to store in a directory entry.
#[derive(Clone, Debug)]
pub enum TestValue {
    /// ASCII text; a NUL terminator is appended
    Ascii(String),
    Short(u16),
    Long(u32),
    Rational(u32, u32),
    Rationals(Vec<(u32, u32)>),
    Bytes(Vec<u8>),
}

impl TestValue {
    pub fn ascii(text: &str) -> Self {
        TestValue::Ascii(text.to_string())
    }

    fn field_type(&self) -> u16 {
        match self {
            TestValue::Bytes(_) => 1,
            TestValue::Ascii(_) => 2,
            TestValue::Short(_) => 3,
            TestValue::Long(_) => 4,
            TestValue::Rational(..) | TestValue::Rationals(_) => 5,
        }
    }

    fn count(&self) -> u32 {
        let count = match self {
            TestValue::Ascii(text) => text.len() + 1,
            TestValue::Short(_) | TestValue::Long(_) | TestValue::Rational(..) => 1,
            TestValue::Rationals(values) => values.len(),
            TestValue::Bytes(bytes) => bytes.len(),
        };
        count as u32
    }

    fn encode(&self, order: ByteOrderType) -> Vec<u8> {
        let mut out = Vec::new();
        match self {
            TestValue::Ascii(text) => {
                out.extend_from_slice(text.as_bytes());
                out.push(0);
            }
            TestValue::Short(v) => write_value(&mut out, order, u64::from(*v), 2),
            TestValue::Long(v) => write_value(&mut out, order, u64::from(*v), 4),
            TestValue::Rational(num, den) => {
                write_value(&mut out, order, u64::from(*num), 4);
                write_value(&mut out, order, u64::from(*den), 4);
            }
            TestValue::Rationals(values) => {
                for (num, den) in values {
                    write_value(&mut out, order, u64::from(*num), 4);
                    write_value(&mut out, order, u64::from(*den), 4);
                }
            }
            TestValue::Bytes(bytes) => out.extend_from_slice(bytes),
        }
        out
    }
}

// =============================================================================
// EXIF Builder
// =============================================================================

const HEADER_SIZE: usize = 8;
const ENTRY_SIZE: usize = 12;
const EXIF_POINTER_TAG: u16 = 0x8769;
const GPS_POINTER_TAG: u16 = 0x8825;

/// Builder for a TIFF block with IFD0 and optional Exif and GPS sub-IFDs.
///
/// Layout: header, IFD0, IFD0 data, Exif IFD, Exif data, GPS IFD, GPS data.
#[derive(Clone, Debug)]
pub struct ExifBuilder {
    byte_order: ByteOrderType,
    ifd0: Vec<(u16, TestValue)>,
    exif: Option<Vec<(u16, TestValue)>>,
    gps: Option<Vec<(u16, TestValue)>>,
}

impl ExifBuilder {
    pub fn new(byte_order: ByteOrderType) -> Self {
        Self {
            byte_order,
            ifd0: Vec::new(),
            exif: None,
            gps: None,
        }
    }

    pub fn ifd0(mut self, tag: u16, value: TestValue) -> Self {
        self.ifd0.push((tag, value));
        self
    }

    pub fn exif(mut self, tag: u16, value: TestValue) -> Self {
        self.exif.get_or_insert_with(Vec::new).push((tag, value));
        self
    }

    pub fn gps(mut self, tag: u16, value: TestValue) -> Self {
        self.gps.get_or_insert_with(Vec::new).push((tag, value));
        self
    }

    /// Build the TIFF block.
    pub fn build(self) -> Vec<u8> {
        let order = self.byte_order;
        let pointer_count = usize::from(self.exif.is_some()) + usize::from(self.gps.is_some());

        let ifd0_offset = HEADER_SIZE;
        let ifd0_size = directory_size(self.ifd0.len() + pointer_count)
            + external_size(&self.ifd0, order);

        let exif_offset = ifd0_offset + ifd0_size;
        let exif_size = self.exif.as_ref().map_or(0, |entries| {
            directory_size(entries.len()) + external_size(entries, order)
        });
        let gps_offset = exif_offset + exif_size;

        let mut ifd0 = self.ifd0.clone();
        if self.exif.is_some() {
            ifd0.push((EXIF_POINTER_TAG, TestValue::Long(exif_offset as u32)));
        }
        if self.gps.is_some() {
            ifd0.push((GPS_POINTER_TAG, TestValue::Long(gps_offset as u32)));
        }

        let mut data = Vec::new();
        match order {
            ByteOrderType::LittleEndian => data.extend_from_slice(b"II"),
            ByteOrderType::BigEndian => data.extend_from_slice(b"MM"),
        }
        write_value(&mut data, order, 42, 2);
        write_value(&mut data, order, ifd0_offset as u64, 4);

        write_directory(&mut data, order, &ifd0);
        if let Some(entries) = &self.exif {
            assert_eq!(data.len(), exif_offset);
            write_directory(&mut data, order, entries);
        }
        if let Some(entries) = &self.gps {
            assert_eq!(data.len(), gps_offset);
            write_directory(&mut data, order, entries);
        }

        data
    }
}

fn directory_size(entry_count: usize) -> usize {
    2 + entry_count * ENTRY_SIZE + 4
}

fn external_size(entries: &[(u16, TestValue)], order: ByteOrderType) -> usize {
    entries
        .iter()
        .map(|(_, value)| value.encode(order).len())
        .filter(|&len| len > 4)
        .sum()
}

/// Append a directory at the end of `data`, followed by its out-of-line values.
fn write_directory(data: &mut Vec<u8>, order: ByteOrderType, entries: &[(u16, TestValue)]) {
    let mut external_offset = data.len() + directory_size(entries.len());
    let mut external = Vec::new();

    write_value(data, order, entries.len() as u64, 2);
    for (tag, value) in entries {
        let payload = value.encode(order);
        write_value(data, order, u64::from(*tag), 2);
        write_value(data, order, u64::from(value.field_type()), 2);
        write_value(data, order, u64::from(value.count()), 4);

        if payload.len() <= 4 {
            let mut inline = payload;
            inline.resize(4, 0);
            data.extend_from_slice(&inline);
        } else {
            write_value(data, order, external_offset as u64, 4);
            external_offset += payload.len();
            external.extend_from_slice(&payload);
        }
    }
    write_value(data, order, 0, 4);
    data.extend_from_slice(&external);
}

fn write_value(data: &mut Vec<u8>, order: ByteOrderType, value: u64, size: usize) {
    match (order, size) {
        (ByteOrderType::LittleEndian, 2) => data.extend_from_slice(&(value as u16).to_le_bytes()),
        (ByteOrderType::BigEndian, 2) => data.extend_from_slice(&(value as u16).to_be_bytes()),
        (ByteOrderType::LittleEndian, 4) => data.extend_from_slice(&(value as u32).to_le_bytes()),
        (ByteOrderType::BigEndian, 4) => data.extend_from_slice(&(value as u32).to_be_bytes()),
        _ => panic!("unsupported value size {size}"),
    }
}

// =============================================================================
// Common Fixtures
// =============================================================================

/// Camera-like metadata in the given byte order.
pub fn camera_exif(order: ByteOrderType) -> Vec<u8> {
    ExifBuilder::new(order)
        .ifd0(0x010F, TestValue::ascii("Canon"))
        .ifd0(0x0110, TestValue::ascii("Canon EOS 5D"))
        .ifd0(0x0112, TestValue::Short(1))
        .exif(0x829A, TestValue::Rational(1, 125))
        .exif(0x829D, TestValue::Rational(28, 10))
        .exif(0x8827, TestValue::Short(400))
        .exif(0x9003, TestValue::ascii("2024:05:01 10:30:00"))
        .exif(0x920A, TestValue::Rational(50, 1))
        .gps(0x0001, TestValue::ascii("N"))
        .gps(0x0002, TestValue::Rationals(vec![(37, 1), (48, 1), (30, 1)]))
        .gps(0x0003, TestValue::ascii("W"))
        .gps(0x0004, TestValue::Rationals(vec![(122, 1), (16, 1), (12, 1)]))
        .build()
}

// =============================================================================
// JPEG Wrappers
// =============================================================================

/// Append a marker segment with a big-endian length.
pub fn push_segment(data: &mut Vec<u8>, marker: u8, payload: &[u8]) {
    data.push(0xFF);
    data.push(marker);
    data.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    data.extend_from_slice(payload);
}

/// A JFIF APP0 payload.
pub fn jfif_payload() -> Vec<u8> {
    vec![
        b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00,
    ]
}

/// Minimal scan data: SOS header, entropy bytes, EOI.
pub fn push_scan(data: &mut Vec<u8>) {
    push_segment(data, 0xDA, &[0x01, 0x01, 0x00, 0x00, 0x3F, 0x00]);
    data.extend_from_slice(&[0x12, 0x34, 0xFF, 0x00, 0x56]);
    data.extend_from_slice(&[0xFF, 0xD9]);
}

/// JPEG with APP0/JFIF followed by an APP1 EXIF segment holding `tiff`.
pub fn wrap_in_jpeg(tiff: &[u8]) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8];
    push_segment(&mut data, 0xE0, &jfif_payload());

    let mut app1 = b"Exif\0\0".to_vec();
    app1.extend_from_slice(tiff);
    push_segment(&mut data, 0xE1, &app1);

    push_scan(&mut data);
    data
}

/// JPEG with only an APP0/JFIF segment.
pub fn jfif_only_jpeg() -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8];
    push_segment(&mut data, 0xE0, &jfif_payload());
    push_scan(&mut data);
    data
}

/// Overwrite the IFD0 entry count of a TIFF block built by [`ExifBuilder`].
pub fn set_ifd0_entry_count(tiff: &mut [u8], count: u16) {
    let bytes = match &tiff[..2] {
        b"II" => count.to_le_bytes(),
        _ => count.to_be_bytes(),
    };
    tiff[HEADER_SIZE..HEADER_SIZE + 2].copy_from_slice(&bytes);
}
