//! Archive readers: single-entry `.tar.gz` payloads and zip extraction.

use flate2::read::GzDecoder;
use std::fs;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("archive contains no file entry")]
    Empty,
    #[error("zip: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("refusing entry outside destination: {0}")]
    UnsafeEntryName(String),
}

/// Decompress a gzip'd tar and return the contents of its first file entry.
/// Directory entries before it are skipped.
pub fn read_single_tar_gz_entry(payload: &[u8]) -> Result<Vec<u8>, ArchiveError> {
    let decoder = GzDecoder::new(Cursor::new(payload));
    let mut archive = tar::Archive::new(decoder);

    for entry in archive.entries()? {
        let mut entry = entry?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        tracing::debug!("reading archive entry {}", entry.path()?.display());
        let mut content = Vec::new();
        entry.read_to_end(&mut content)?;
        return Ok(content);
    }
    Err(ArchiveError::Empty)
}

/// Extract every entry of the zip at `file` under `destination`.
///
/// Parent directories are created as needed. Files that already exist are
/// left untouched. Returns the paths written.
pub fn unzip_file(file: &Path, destination: &Path) -> Result<Vec<PathBuf>, ArchiveError> {
    tracing::info!("Unzip {}", file.display());
    let mut archive = zip::ZipArchive::new(fs::File::open(file)?)?;
    let mut written = Vec::new();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let relative = entry
            .enclosed_name()
            .ok_or_else(|| ArchiveError::UnsafeEntryName(entry.name().to_string()))?;
        let target = destination.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        if target.exists() {
            tracing::debug!("{} exists, skipping", target.display());
            continue;
        }
        let mut out = fs::File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
        written.push(target);
    }

    tracing::info!("Unzipped {} file(s) into {}", written.len(), destination.display());
    Ok(written)
}
