//! Minimal PDF Generators
//!
//! Generates small valid PDFs used as encryption inputs.

use super::test_pdf_builder::{to_bytes, PageSpec, PdfVersion, TestPdfBuilder};
use anyhow::{anyhow, Result};
use lopdf::{EncryptionState, EncryptionVersion, Object, Permissions, StringFormat};
use std::fs;
use std::path::Path;

/// Page count of [`nested_tree_pdf`]
pub const NESTED_TREE_PAGES: usize = 4;

/// Page width inherited by every page of [`nested_tree_pdf`]
pub const NESTED_TREE_WIDTH: i64 = 500;

/// Generate all minimal test PDFs
pub fn generate_all<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    fs::write(output_dir.join("blank_1_page.pdf"), blank_pdf(1)?)?;
    fs::write(output_dir.join("blank_10_pages.pdf"), blank_pdf(10)?)?;
    fs::write(
        output_dir.join("mixed_sizes.pdf"),
        sized_pages_pdf(&[
            PageSpec::letter(),
            PageSpec::new(595, 842),
            PageSpec::new(420, 595),
        ])?,
    )?;
    fs::write(output_dir.join("nested_tree.pdf"), nested_tree_pdf()?)?;
    fs::write(output_dir.join("encrypted.pdf"), encrypted_pdf("fixture")?)?;

    for (version, name) in [
        (PdfVersion::V1_4, "minimal_v1_4.pdf"),
        (PdfVersion::V1_7, "minimal_v1_7.pdf"),
    ] {
        let pdf = TestPdfBuilder::minimal()
            .with_version(version)
            .with_title(&format!("PDF Version {version} Test"))
            .build()?;
        fs::write(output_dir.join(name), pdf)?;
    }

    Ok(())
}

/// Blank letter-size pages carrying a one-line label each
pub fn blank_pdf(pages: usize) -> Result<Vec<u8>> {
    TestPdfBuilder::new()
        .with_producer("passify-pdf test suite")
        .with_pages(std::iter::repeat(PageSpec::letter()).take(pages))
        .build()
}

/// One page per `PageSpec`, in the given order
pub fn sized_pages_pdf(specs: &[PageSpec]) -> Result<Vec<u8>> {
    TestPdfBuilder::new()
        .with_pages(specs.iter().copied())
        .build()
}

/// A two-level page tree whose pages inherit MediaBox and Resources
pub fn nested_tree_pdf() -> Result<Vec<u8>> {
    TestPdfBuilder::new()
        .with_title("Nested Page Tree")
        .with_pages(std::iter::repeat(PageSpec::new(NESTED_TREE_WIDTH, 700)).take(NESTED_TREE_PAGES))
        .with_nested_tree(2)
        .build()
}

/// A one-page document already protected with `password`
pub fn encrypted_pdf(password: &str) -> Result<Vec<u8>> {
    let mut doc = TestPdfBuilder::minimal().build_document();
    doc.trailer.set(
        "ID",
        Object::Array(vec![
            Object::String(vec![7u8; 16], StringFormat::Hexadecimal),
            Object::String(vec![7u8; 16], StringFormat::Hexadecimal),
        ]),
    );

    let version = EncryptionVersion::V2 {
        document: &doc,
        owner_password: password,
        user_password: password,
        key_length: 128,
        permissions: Permissions::all(),
    };
    let state = EncryptionState::try_from(version).map_err(|e| anyhow!("{e}"))?;
    doc.encrypt(&state).map_err(|e| anyhow!("{e}"))?;

    to_bytes(&mut doc)
}
