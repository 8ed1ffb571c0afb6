//! Per-file inspection reports.
//!
//! A report bundles what a viewer shows next to an image: size, content
//! hash, pixel dimensions, aspect ratio and the decoded EXIF record. Each
//! file is read into memory once and every probe borrows the same buffer.

mod dimensions;
mod hashing;
mod size;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use bytes::Bytes;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ReportError;
use crate::metadata::{extract, Extraction, MetadataRecord};

pub use dimensions::{probe_dimensions, svg_dimensions, ImageProbe};
pub use hashing::{mime_type, sha256_hex};
pub use size::{aspect_ratio, format_size};

/// Extensions accepted for inspection.
pub const SUPPORTED_EXTENSIONS: [&str; 26] = [
    "jpg", "jpeg", "jfif", "jpe", "png", "webp", "gif", "bmp", "tif", "tiff", "svg", "ico", "avif",
    "heic", "heif", "jxl", "psd", "dng", "cr2", "cr3", "nef", "arw", "raf", "orf", "rw2", "pef",
];

/// Lowercased extension of the final path component, without the dot.
pub fn extension_of(name: &str) -> String {
    let file_name = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
            ext.to_ascii_lowercase()
        }
        _ => String::new(),
    }
}

/// Whether an extension (lowercase, no dot) is accepted for inspection.
pub fn is_supported_extension(extension: &str) -> bool {
    SUPPORTED_EXTENSIONS.contains(&extension)
}

// =============================================================================
// FileReport
// =============================================================================

/// How much EXIF metadata a file yielded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExifStatus {
    /// All fields decoded
    Complete,
    /// Some fields or directories were dropped
    Degraded,
    /// No metadata
    Absent,
}

/// Inspection report for one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub name: String,
    pub ext: String,
    pub mime: Option<String>,
    pub size_bytes: u64,
    pub size_human: String,
    pub last_modified: Option<String>,
    pub sha256: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub aspect: Option<String>,
    pub previewable: bool,
    pub exif_status: ExifStatus,
    pub exif: MetadataRecord,
}

impl FileReport {
    /// Build a report from file contents already in memory.
    pub fn from_bytes(name: &str, data: &[u8], modified: Option<SystemTime>) -> Self {
        let ext = extension_of(name);
        let probe = probe_dimensions(data, &ext);

        let extraction = extract(data, &ext);
        let exif_status = match &extraction {
            Extraction::Complete(_) => ExifStatus::Complete,
            Extraction::Degraded { issues, .. } => {
                debug!(name, dropped = issues.len(), "EXIF decoded with issues");
                ExifStatus::Degraded
            }
            Extraction::Absent(_) => ExifStatus::Absent,
        };

        FileReport {
            name: name.to_string(),
            mime: mime_type(data),
            size_bytes: data.len() as u64,
            size_human: format_size(data.len() as u64),
            last_modified: modified.map(format_timestamp),
            sha256: sha256_hex(data),
            width: probe.width,
            height: probe.height,
            aspect: aspect_ratio(probe.width, probe.height),
            previewable: probe.previewable,
            exif_status,
            exif: extraction.into_record().unwrap_or_default(),
            ext,
        }
    }
}

/// Read a file fully into memory.
pub fn load_file(path: &Path) -> Result<(Bytes, Option<SystemTime>), ReportError> {
    let read_error = |error: std::io::Error| ReportError::Read {
        path: path.display().to_string(),
        message: error.to_string(),
    };
    let data = fs::read(path).map_err(read_error)?;
    let modified = fs::metadata(path).and_then(|meta| meta.modified()).ok();
    Ok((Bytes::from(data), modified))
}

/// Build the report for a file on disk.
pub fn build_report(path: &Path) -> Result<FileReport, ReportError> {
    let (data, modified) = load_file(path)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(FileReport::from_bytes(&name, &data, modified))
}

fn format_timestamp(time: SystemTime) -> String {
    let datetime: DateTime<Utc> = time.into();
    datetime.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// =============================================================================
// Batch inspection
// =============================================================================

/// One inspected file in a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchItem {
    pub path: PathBuf,
    pub ext: String,
    /// `None` when the file could not be read
    pub report: Option<FileReport>,
}

/// Reports for a set of files.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
    /// Files skipped for their extension
    pub unsupported: Vec<PathBuf>,
    /// Files with a supported extension that could not be read
    pub read_failures: Vec<PathBuf>,
}

/// Inspect files in order.
///
/// Unsupported extensions are listed and skipped. Read failures are listed
/// and still produce an item without a report.
pub fn inspect_files<I, P>(paths: I) -> BatchReport
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut batch = BatchReport::default();

    for path in paths {
        let path = path.as_ref();
        let ext = extension_of(&path.to_string_lossy());
        if !is_supported_extension(&ext) {
            debug!(path = %path.display(), "Skipping unsupported file");
            batch.unsupported.push(path.to_path_buf());
            continue;
        }

        let report = match build_report(path) {
            Ok(report) => Some(report),
            Err(error) => {
                warn!(%error, "Could not read file");
                batch.read_failures.push(path.to_path_buf());
                None
            }
        };

        batch.items.push(BatchItem {
            path: path.to_path_buf(),
            ext,
            report,
        });
    }

    batch
}
