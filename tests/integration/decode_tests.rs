//! End-to-end metadata decoding tests.
//!
//! Tests verify:
//! - Both byte orders decode to identical records
//! - JPEG wrappers yield the same record as the bare TIFF block
//! - Display formatting of exposure, aperture, focal length and GPS
//! - Corrupt or truncated input degrades instead of failing

use std::sync::Arc;
use std::thread;

use exif_inspect::{decode, extract, AbsentReason, Extraction, MetadataValue};

use super::test_utils::{
    camera_exif, jfif_only_jpeg, set_ifd0_entry_count, wrap_in_jpeg, ByteOrderType, ExifBuilder,
    TestValue,
};

fn text<'a>(record: &'a exif_inspect::MetadataRecord, name: &str) -> Option<&'a str> {
    record.get(name).and_then(MetadataValue::as_str)
}

// =============================================================================
// Byte Order Tests
// =============================================================================

#[test]
fn test_little_endian_make() {
    let tiff = ExifBuilder::new(ByteOrderType::LittleEndian)
        .ifd0(0x010F, TestValue::ascii("Canon"))
        .build();
    assert_eq!(&tiff[..2], b"II");

    let record = decode(&tiff, "tif").expect("record");
    assert_eq!(text(&record, "Make"), Some("Canon"));
    assert_eq!(record.len(), 1);
}

#[test]
fn test_byte_orders_decode_identically() {
    let little = camera_exif(ByteOrderType::LittleEndian);
    let big = camera_exif(ByteOrderType::BigEndian);
    assert_eq!(&big[..2], b"MM");

    let little = decode(&little, "tiff").expect("little-endian record");
    let big = decode(&big, "tiff").expect("big-endian record");
    assert_eq!(little, big);
    assert!(!little.is_empty());
}

#[test]
fn test_decode_is_repeatable() {
    let tiff = camera_exif(ByteOrderType::BigEndian);
    assert_eq!(decode(&tiff, "tif"), decode(&tiff, "tif"));
}

// =============================================================================
// Formatting Tests
// =============================================================================

#[test]
fn test_camera_fields() {
    let record = decode(&camera_exif(ByteOrderType::LittleEndian), "tif").expect("record");

    assert_eq!(text(&record, "Make"), Some("Canon"));
    assert_eq!(text(&record, "Model"), Some("Canon EOS 5D"));
    assert_eq!(record.get("Orientation"), Some(&MetadataValue::Integer(1)));
    assert_eq!(record.get("ISOSpeedRatings"), Some(&MetadataValue::Integer(400)));
    assert_eq!(text(&record, "ExposureTime"), Some("1/125"));
    assert_eq!(text(&record, "FNumber"), Some("f/2.8"));
    assert_eq!(text(&record, "FocalLength"), Some("50.0mm"));
    assert_eq!(text(&record, "DateTimeOriginal"), Some("2024:05:01 10:30:00"));
}

#[test]
fn test_gps_combined() {
    let record = decode(&camera_exif(ByteOrderType::BigEndian), "tif").expect("record");

    assert_eq!(text(&record, "GPS"), Some("37.808333, -122.270000"));
    for raw in ["GPSLatitude", "GPSLatitudeRef", "GPSLongitude", "GPSLongitudeRef"] {
        assert!(!record.contains(raw), "{raw} should not be emitted");
    }
    assert!(!record.contains("ExifIFDPointer"));
    assert!(!record.contains("GPSInfoIFDPointer"));
}

#[test]
fn test_gps_missing_longitude() {
    let tiff = ExifBuilder::new(ByteOrderType::LittleEndian)
        .gps(0x0002, TestValue::Rationals(vec![(37, 1), (48, 1), (30, 1)]))
        .build();
    let record = decode(&tiff, "tif").expect("record");
    assert!(record.is_empty());
}

#[test]
fn test_long_exposure() {
    let tiff = ExifBuilder::new(ByteOrderType::LittleEndian)
        .exif(0x829A, TestValue::Rational(2, 1))
        .build();
    let record = decode(&tiff, "tif").expect("record");
    assert_eq!(text(&record, "ExposureTime"), Some("2"));
}

#[test]
fn test_zero_denominator_drops_field() {
    let tiff = ExifBuilder::new(ByteOrderType::BigEndian)
        .ifd0(0x010F, TestValue::ascii("Nikon"))
        .exif(0x829D, TestValue::Rational(28, 0))
        .build();

    let extraction = extract(&tiff, "tif");
    assert_eq!(extraction.issues().len(), 1);

    let record = extraction.into_record().expect("record");
    assert_eq!(text(&record, "Make"), Some("Nikon"));
    assert!(!record.contains("FNumber"));
}

#[test]
fn test_unknown_tags_excluded() {
    let tiff = ExifBuilder::new(ByteOrderType::LittleEndian)
        .ifd0(0x010F, TestValue::ascii("Canon"))
        // ImageWidth is not in the IFD0 dictionary
        .ifd0(0x0100, TestValue::Long(4000))
        // Make is an IFD0 tag, not an Exif one
        .exif(0x010F, TestValue::ascii("Other"))
        .build();

    let extraction = extract(&tiff, "tif");
    assert!(matches!(extraction, Extraction::Complete(_)));
    let record = extraction.into_record().expect("record");
    assert_eq!(record.len(), 1);
    assert_eq!(text(&record, "Make"), Some("Canon"));
}

// =============================================================================
// Container Tests
// =============================================================================

#[test]
fn test_jpeg_matches_bare_tiff() {
    for order in [ByteOrderType::LittleEndian, ByteOrderType::BigEndian] {
        let tiff = camera_exif(order);
        let jpeg = wrap_in_jpeg(&tiff);
        assert_eq!(decode(&jpeg, "jpg"), decode(&tiff, "tif"));
        assert_eq!(decode(&jpeg, "JPEG"), decode(&jpeg, "jfif"));
    }
}

#[test]
fn test_jfif_only_jpeg() {
    assert_eq!(
        extract(&jfif_only_jpeg(), "jpg"),
        Extraction::Absent(AbsentReason::NoExifSegment)
    );
}

#[test]
fn test_non_exif_hint_skips_buffer() {
    let tiff = camera_exif(ByteOrderType::LittleEndian);
    assert!(decode(&tiff, "png").is_none());
    assert_eq!(
        extract(&tiff, "heic"),
        Extraction::Absent(AbsentReason::UnsupportedContainer)
    );
}

// =============================================================================
// Corrupt Input Tests
// =============================================================================

#[test]
fn test_entry_count_beyond_buffer() {
    let mut tiff = ExifBuilder::new(ByteOrderType::LittleEndian)
        .ifd0(0x010F, TestValue::ascii("Canon"))
        .ifd0(0x0112, TestValue::Short(6))
        .build();
    set_ifd0_entry_count(&mut tiff, 500);

    let extraction = extract(&tiff, "tif");
    assert!(matches!(extraction, Extraction::Degraded { .. }));

    let record = extraction.into_record().expect("partial record");
    assert_eq!(text(&record, "Make"), Some("Canon"));
    assert_eq!(record.get("Orientation"), Some(&MetadataValue::Integer(6)));
}

#[test]
fn test_every_truncation_is_safe() {
    let jpeg = wrap_in_jpeg(&camera_exif(ByteOrderType::BigEndian));
    for len in 0..jpeg.len() {
        let _ = extract(&jpeg[..len], "jpg");
    }

    let tiff = camera_exif(ByteOrderType::LittleEndian);
    for len in 0..tiff.len() {
        let _ = extract(&tiff[..len], "tif");
    }
}

#[test]
fn test_corrupted_bytes_are_safe() {
    let tiff = camera_exif(ByteOrderType::LittleEndian);
    for index in 0..tiff.len() {
        for value in [0x00, 0xFF, 0x80] {
            let mut corrupted = tiff.clone();
            corrupted[index] = value;
            let _ = extract(&corrupted, "tif");
        }
    }
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_decoding() {
    let tiff = Arc::new(camera_exif(ByteOrderType::BigEndian));
    let expected = decode(&tiff, "tif");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let tiff = Arc::clone(&tiff);
            thread::spawn(move || decode(&tiff, "tif"))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("decoder thread panicked"), expected);
    }
}
