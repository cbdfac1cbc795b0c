//! Invalid PDF Generators
//!
//! Generates deliberately broken inputs for error handling tests.

use super::minimal_pdfs::blank_pdf;
use anyhow::Result;
use std::fs;
use std::path::Path;

/// Generate all invalid test inputs
pub fn generate_all<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    fs::write(output_dir.join("truncated.pdf"), truncated_pdf()?)?;
    fs::write(output_dir.join("not_a_pdf.pdf"), not_a_pdf())?;
    fs::write(output_dir.join("header_only.pdf"), header_only())?;

    Ok(())
}

/// A valid document cut off before its cross-reference table
pub fn truncated_pdf() -> Result<Vec<u8>> {
    let mut pdf = blank_pdf(1)?;
    pdf.truncate(pdf.len() / 3);
    Ok(pdf)
}

/// Plain text with a PDF extension
pub fn not_a_pdf() -> Vec<u8> {
    b"This is not a PDF document.\n".to_vec()
}

/// A header followed directly by the end-of-file marker
pub fn header_only() -> Vec<u8> {
    b"%PDF-1.4\n%%EOF\n".to_vec()
}
