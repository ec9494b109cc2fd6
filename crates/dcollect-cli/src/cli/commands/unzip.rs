//! `dcollect unzip <file> <destination>` – extract a zip archive.

use anyhow::{Context, Result};
use dcollect_core::archive;
use std::path::Path;

pub fn run_unzip(file: &Path, destination: &Path) -> Result<()> {
    let written = archive::unzip_file(file, destination)
        .with_context(|| format!("extracting {}", file.display()))?;
    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}
