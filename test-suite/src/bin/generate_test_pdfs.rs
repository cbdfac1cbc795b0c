//! Generate Test PDFs
//!
//! This binary writes every generated fixture to disk for manual inspection.

use anyhow::Result;
use passify_pdf_test_suite::generators::{invalid_pdfs, minimal_pdfs};
use passify_pdf_test_suite::utils::fixtures_dir;

fn main() -> Result<()> {
    println!("Generating test PDFs for passify-pdf test suite...");

    let fixtures_dir = fixtures_dir();

    let valid_dir = fixtures_dir.join("valid");
    println!("Generating valid PDFs in {:?}...", valid_dir);
    minimal_pdfs::generate_all(&valid_dir)?;

    let invalid_dir = fixtures_dir.join("invalid");
    println!("Generating invalid inputs in {:?}...", invalid_dir);
    invalid_pdfs::generate_all(&invalid_dir)?;

    println!("Test PDF generation complete!");
    Ok(())
}
