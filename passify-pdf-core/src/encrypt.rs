//! PDF password protection
//!
//! Reads a document, copies its pages into a fresh document, applies the
//! standard security handler with the caller's password and writes the
//! result to disk in a single linear pass.

use crate::error::{EncryptError, EncryptResult};
use crate::pages::copy_pages;
use lopdf::encryption::crypt_filters::{Aes256CryptFilter, CryptFilter};
use lopdf::encryption::PasswordAlgorithm;
use lopdf::{Document, EncryptionState, EncryptionVersion, Object, Permissions, StringFormat};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// AES file encryption key length, in bits, used by the standard security handler
pub const KEY_LENGTH_BITS: usize = 256;

/// Lowest header version that announces AES-256 encryption
const MIN_AES_256_VERSION: &str = "1.7";

/// Name of the crypt filter applied to streams and strings
const CRYPT_FILTER_NAME: &[u8] = b"StdCF";

/// Outcome of a successful encryption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionReport {
    /// Where the protected document was written
    pub output: PathBuf,
    /// Number of pages carried into the protected document
    pub page_count: usize,
}

/// Encrypt a PDF file with a password.
///
/// The password becomes both the user password (needed to open the file)
/// and the owner password. It is prepared with SASLprep and stored as
/// UTF-8, so any script can be used. Empty passwords are accepted here;
/// adapters that collect passwords from people are expected to reject them.
///
/// # Errors
///
/// * [`EncryptError::NotFound`] if `input_path` does not exist.
/// * [`EncryptError::InvalidInputType`] if `input_path` is not a regular file.
/// * [`EncryptError::Processing`] for anything that goes wrong while reading,
///   copying, encrypting or writing, and for non-empty passwords that SASLprep
///   rejects or reduces to nothing. The output file may be left partially
///   written when saving fails.
///
/// # Example
///
/// ```no_run
/// use passify_pdf::encrypt_pdf;
///
/// let report = encrypt_pdf("report.pdf", "report-protected.pdf", "strongpassword")?;
/// println!("protected {} pages", report.page_count);
/// # Ok::<(), passify_pdf::EncryptError>(())
/// ```
pub fn encrypt_pdf<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    output_path: Q,
    password: &str,
) -> EncryptResult<EncryptionReport> {
    let input_path = input_path.as_ref();
    let output_path = output_path.as_ref();

    ensure_input_file(input_path)?;

    debug!(input = %input_path.display(), "loading source document");
    let source = Document::load(input_path)?;
    if source.is_encrypted() {
        return Err(EncryptError::Processing(
            "input document is already password-protected".to_string(),
        ));
    }

    let mut destination = copy_pages(&source)?;
    drop(source);

    let page_count = destination.get_pages().len();
    debug!(pages = page_count, "copied pages into destination document");

    protect(&mut destination, password)?;

    destination.save(output_path)?;
    info!(
        output = %output_path.display(),
        pages = page_count,
        "encrypted document written"
    );

    Ok(EncryptionReport {
        output: output_path.to_path_buf(),
        page_count,
    })
}

/// Check that `path` names an existing regular file.
pub(crate) fn ensure_input_file(path: &Path) -> EncryptResult<()> {
    if !path.exists() {
        return Err(EncryptError::NotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(EncryptError::InvalidInputType(path.to_path_buf()));
    }
    Ok(())
}

/// Apply the standard security handler (AES-256, revision 6) to `document`.
fn protect(document: &mut Document, password: &str) -> EncryptResult<()> {
    let file_id: [u8; 16] = rand::random();
    document.trailer.set(
        "ID",
        Object::Array(vec![
            Object::String(file_id.to_vec(), StringFormat::Hexadecimal),
            Object::String(file_id.to_vec(), StringFormat::Hexadecimal),
        ]),
    );
    if document.version.as_str() < MIN_AES_256_VERSION {
        document.version = MIN_AES_256_VERSION.to_string();
    }

    let file_encryption_key: [u8; 32] = rand::random();
    let crypt_filter: Arc<dyn CryptFilter> = Arc::new(Aes256CryptFilter);
    let version = EncryptionVersion::V5 {
        encrypt_metadata: true,
        crypt_filters: BTreeMap::from([(CRYPT_FILTER_NAME.to_vec(), crypt_filter)]),
        file_encryption_key: &file_encryption_key,
        stream_filter: CRYPT_FILTER_NAME.to_vec(),
        string_filter: CRYPT_FILTER_NAME.to_vec(),
        owner_password: password,
        user_password: password,
        permissions: Permissions::all(),
    };
    let state = EncryptionState::try_from(version)
        .map_err(|e| EncryptError::Processing(format!("password cannot be used: {e}")))?;

    document
        .encrypt(&state)
        .map_err(|e| EncryptError::Processing(e.to_string()))?;

    // A password that prepares to nothing would open without being typed.
    if !password.is_empty() && prepared_password(document, password)?.is_empty() {
        return Err(EncryptError::Processing(
            "password has no characters left after preparation".to_string(),
        ));
    }

    debug!(key_length = KEY_LENGTH_BITS, "applied standard security handler");
    Ok(())
}

/// The bytes a reader derives from `password` for the document's handler.
fn prepared_password(document: &Document, password: &str) -> EncryptResult<Vec<u8>> {
    let algorithm = PasswordAlgorithm::try_from(document)?;
    algorithm
        .sanitize_password(password)
        .map_err(|e| EncryptError::Processing(format!("password cannot be used: {e}")))
}
