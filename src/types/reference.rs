//! Code-reference file models.
//!
//! A reference file is an uploaded solution/test file forwarded to the bridge
//! once, then removed from host storage. The bytes are never retained here.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

use crate::storage::StoredFile;

/// A reference file ready to be forwarded to the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeReferenceFile {
    /// Base name, i.e. the part before the first `.` of the original name.
    pub filename: String,
    /// Everything after the first `.`; empty when the name has no dot.
    pub extension: String,
    /// Opaque content hash assigned by the host file storage.
    pub content_hash: String,
    /// Raw file bytes, base64-encoded on the wire.
    pub raw_content: Vec<u8>,
}

impl CodeReferenceFile {
    /// Build a reference file from a host-storage entry.
    ///
    /// Returns `None` for the directory placeholder entry (filename `"."`),
    /// which must never be uploaded.
    #[must_use]
    pub fn from_stored(file: &StoredFile) -> Option<Self> {
        if file.filename == "." {
            return None;
        }
        let (base, extension) = split_filename(&file.filename);
        Some(Self {
            filename: base.to_string(),
            extension: extension.to_string(),
            content_hash: file.content_hash.clone(),
            raw_content: file.content.clone(),
        })
    }
}

/// Split a filename into base name and extension on the first `.`.
///
/// `"main.py"` gives `("main", "py")`; a name without a dot has an empty
/// extension.
#[must_use]
pub fn split_filename(name: &str) -> (&str, &str) {
    match name.split_once('.') {
        Some((base, ext)) => (base, ext),
        None => (name, ""),
    }
}

/// Wire shape of the `POST /moodle/saveReference` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReferenceRequest<'a> {
    pub course_id: i64,
    pub assignment_id: i64,
    pub content_hash: &'a str,
    pub extension: &'a str,
    pub filename: &'a str,
    /// Base64-encoded file content.
    pub raw_content: String,
}

impl<'a> SaveReferenceRequest<'a> {
    /// Assemble the upload body for one reference file.
    #[must_use]
    pub fn new(course_id: i64, assignment_id: i64, file: &'a CodeReferenceFile) -> Self {
        Self {
            course_id,
            assignment_id,
            content_hash: &file.content_hash,
            extension: &file.extension,
            filename: &file.filename,
            raw_content: STANDARD.encode(&file.raw_content),
        }
    }
}
