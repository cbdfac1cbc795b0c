//! Test Suite for passify-pdf
//!
//! Fixture generators shared by the tests of every workspace crate, plus
//! the encryption benchmarks.

pub mod generators;

pub use generators::{PageSpec, PdfVersion, TestPdfBuilder};

/// Common test utilities
pub mod utils {
    use std::path::{Path, PathBuf};

    /// Get the path to the generated fixtures directory
    pub fn fixtures_dir() -> PathBuf {
        let manifest_dir = env!("CARGO_MANIFEST_DIR");
        PathBuf::from(manifest_dir).join("fixtures")
    }

    /// Write `bytes` to `dir/name` and return the full path
    pub fn write_fixture<P: AsRef<Path>>(dir: P, name: &str, bytes: &[u8]) -> anyhow::Result<PathBuf> {
        let path = dir.as_ref().join(name);
        std::fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Count the entries left in a directory
    pub fn entry_count<P: AsRef<Path>>(dir: P) -> anyhow::Result<usize> {
        Ok(std::fs::read_dir(dir)?.count())
    }
}
