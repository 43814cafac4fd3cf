//! Reading import documents from disk.

use serde_json::Value;
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::DocumentType;

/// Reads and parses a JSON file
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        IoErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
        _ => Error::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;
    log::debug!("loaded {} byte(s) from {:?}", content.len(), path);

    Ok(serde_json::from_str(&content)?)
}

/// Returns the records of a document that is either a bare array or a
/// mapping wrapping one under the type's key (`{"categories": [...]}`).
///
/// A mapping without that key holds no records. Anything else, including a
/// wrapped value that is not an array, returns `None`.
pub fn records_of(document: &Value, document_type: DocumentType) -> Option<&[Value]> {
    match document {
        Value::Array(records) => Some(records.as_slice()),
        Value::Object(map) => match map.get(document_type.envelope_key()) {
            Some(Value::Array(records)) => Some(records.as_slice()),
            Some(_) => None,
            None => Some(&[][..]),
        },
        _ => None,
    }
}
