//! Protection inspection
//!
//! Lets callers confirm that a written document is protected and can be
//! opened with the expected password.

use crate::encrypt::ensure_input_file;
use crate::error::{EncryptError, EncryptResult};
use lopdf::Document;
use std::path::Path;

/// Report whether the PDF at `path` carries an encryption dictionary.
///
/// Documents protected with an empty user password are opened transparently
/// by the reader and therefore report `false`.
pub fn is_protected<P: AsRef<Path>>(path: P) -> EncryptResult<bool> {
    let path = path.as_ref();
    ensure_input_file(path)?;

    let document = Document::load(path)?;
    Ok(document.is_encrypted())
}

/// Open the PDF at `path` with `password` and return its page count.
///
/// Unprotected documents are opened without using the password.
pub fn unlock_page_count<P: AsRef<Path>>(path: P, password: &str) -> EncryptResult<usize> {
    let path = path.as_ref();
    ensure_input_file(path)?;

    let mut document = Document::load(path)?;
    if document.is_encrypted() {
        document
            .decrypt(password)
            .map_err(|e| EncryptError::Processing(format!("could not unlock document: {e}")))?;
    }
    Ok(document.get_pages().len())
}
