//! PDF Test Generators
//!
//! This module provides utilities for generating test PDFs programmatically.

pub mod invalid_pdfs;
pub mod minimal_pdfs;
pub mod test_pdf_builder;

pub use test_pdf_builder::{PageSpec, PdfVersion, TestPdfBuilder};
