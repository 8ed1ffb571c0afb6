use thiserror::Error;

/// I/O errors raised by bounds-checked reads over an untrusted buffer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IoError {
    /// Requested range exceeds the buffer
    #[error("Range out of bounds: requested {requested} bytes at offset {offset}, size is {size}")]
    RangeOutOfBounds {
        offset: u64,
        requested: u64,
        size: u64,
    },
}

/// Errors that reject the whole container.
///
/// When one of these is hit the decode yields no metadata at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    /// JPEG stream does not begin with the SOI marker
    #[error("Missing JPEG SOI marker")]
    MissingSoi,

    /// Invalid TIFF byte order mark (not II or MM)
    #[error("Invalid TIFF byte order: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    InvalidByteOrder(u16),

    /// Invalid TIFF version number
    #[error("Invalid TIFF version: expected 42, got {0}")]
    InvalidVersion(u16),

    /// Buffer is too small to contain the TIFF header
    #[error("Truncated TIFF header: need at least {required} bytes, got {actual}")]
    Truncated { required: u64, actual: u64 },
}

/// Errors that drop a single directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Value range falls outside the buffer
    #[error("Value out of bounds: {0}")]
    OutOfBounds(#[from] IoError),

    /// Scalar rational with a zero denominator
    #[error("Rational value has a zero denominator")]
    ZeroDenominator,

    /// Declared size or offset does not fit the address space
    #[error("Value size overflows: {count} units of {width} bytes")]
    Overflow { count: u32, width: usize },
}

/// Non-fatal problems met while decoding a directory.
///
/// These degrade the result (fewer fields) without aborting the decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeIssue {
    /// A fixed-size structure ended before the buffer did
    #[error("Truncated {structure} at offset {offset} (buffer size {size})")]
    Truncated {
        structure: &'static str,
        offset: u64,
        size: u64,
    },

    /// One entry could not be decoded and was dropped
    #[error("Dropped field {name} (tag 0x{tag:04X}): {source}")]
    Field {
        tag: u16,
        name: &'static str,
        #[source]
        source: FieldError,
    },
}

/// Errors from the file-report pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// File could not be read
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },
}
