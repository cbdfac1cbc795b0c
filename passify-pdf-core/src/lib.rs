//! # passify-pdf
//!
//! Password protection for PDF documents.
//!
//! The crate exposes one operation, [`encrypt_pdf`], which copies every page
//! of an input document into a fresh document, protects it with the PDF
//! standard security handler and writes it to disk. Parsing, the page model
//! and the AES-256 filter come from [`lopdf`].
//!
//! ```no_run
//! use passify_pdf::{encrypt_pdf, is_protected};
//!
//! encrypt_pdf("input.pdf", "output.pdf", "strongpassword")?;
//! assert!(is_protected("output.pdf")?);
//! # Ok::<(), passify_pdf::EncryptError>(())
//! ```

pub mod encrypt;
pub mod error;
pub mod inspect;
pub mod pages;

pub use encrypt::{encrypt_pdf, EncryptionReport, KEY_LENGTH_BITS};
pub use error::{EncryptError, EncryptResult};
pub use inspect::{is_protected, unlock_page_count};
pub use pages::copy_pages;
