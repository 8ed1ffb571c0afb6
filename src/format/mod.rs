//! Container parsers for EXIF-bearing files.
//!
//! # Container Detection
//!
//! The container is chosen from the file extension hint, never sniffed from
//! content. Currently supported containers:
//!
//! - **JPEG**: EXIF block located through the APP1 marker segment
//! - **TIFF**: the file itself is the EXIF block

pub mod jpeg;
pub mod tiff;

pub use jpeg::{find_exif_tiff_start, has_soi, EXIF_SIGNATURE, SOI};

// =============================================================================
// ContainerKind
// =============================================================================

/// Container that can carry EXIF metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// JPEG family (jpg, jpeg, jfif, jpe)
    Jpeg,

    /// Bare TIFF (tif, tiff)
    Tiff,
}

impl ContainerKind {
    /// Map an extension hint to a container.
    ///
    /// Matching is case-insensitive and tolerates a leading dot. Returns
    /// `None` for containers this crate does not read metadata from.
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.strip_prefix('.').unwrap_or(extension);
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "jfif" | "jpe" => Some(ContainerKind::Jpeg),
            "tif" | "tiff" => Some(ContainerKind::Tiff),
            _ => None,
        }
    }
}
