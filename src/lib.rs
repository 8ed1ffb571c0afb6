//! # exif-inspect
//!
//! Best-effort EXIF extraction from JPEG and TIFF buffers.
//!
//! The decoder takes a complete file buffer plus an extension hint and
//! returns a flat record of human-readable camera metadata: make, model,
//! capture time, exposure settings and GPS position. Corrupt or truncated
//! input never panics; unreadable fields are dropped and the rest is kept.
//!
//! ## Architecture
//!
//! - [`io`] - Bounds-checked reads over an in-memory buffer
//! - [`mod@format`] - JPEG segment scanning and TIFF header/IFD decoding
//! - [`metadata`] - Extraction pipeline and display formatting
//! - [`report`] - Per-file reports (size, hash, dimensions) and batches
//! - [`config`] - CLI configuration
//!
//! ## Example
//!
//! ```rust,no_run
//! use exif_inspect::decode;
//!
//! let data = std::fs::read("photo.jpg").unwrap();
//! if let Some(record) = decode(&data, "jpg") {
//!     for (name, value) in record.iter() {
//!         println!("{name}: {value}");
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod io;
pub mod metadata;
pub mod report;

// Re-export commonly used types
pub use config::Config;
pub use error::{ContainerError, DecodeIssue, FieldError, IoError, ReportError};
pub use format::tiff::{ByteOrder, DecodedValue, ExifTag, FieldType, TagDictionary, TiffHeader};
pub use format::ContainerKind;
pub use io::ByteBuffer;
pub use metadata::{decode, extract, AbsentReason, Extraction, MetadataRecord, MetadataValue};
pub use report::{
    build_report, inspect_files, BatchItem, BatchReport, ExifStatus, FileReport,
    SUPPORTED_EXTENSIONS,
};
