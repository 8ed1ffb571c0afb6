//! Content hashing for file reports.

use sha2::{Digest, Sha256};

/// SHA-256 of the buffer as lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Best-effort MIME type sniffed from the content.
pub fn mime_type(data: &[u8]) -> Option<String> {
    infer::get(data).map(|kind| kind.mime_type().to_string())
}
