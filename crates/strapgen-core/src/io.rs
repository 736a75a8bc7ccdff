use crate::error::{GenError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write `data` to `path` using a tempfile in the same directory.
/// The parent directory must already exist.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Create a single directory level if it is missing. Parent segments are not
/// created: a missing parent is an error. Returns true if created.
pub fn ensure_folder(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir(path)?;
    Ok(true)
}

/// Write a file only if it does not already exist. Returns true if written.
pub fn write_if_missing(path: &Path, data: &[u8]) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    atomic_write(path, data)?;
    Ok(true)
}

/// Make sure `folder/<file_name>.js` exists, seeding it with `default_content`.
/// An existing file is never touched. Returns true if the file was created.
pub fn ensure_file(folder: &Path, file_name: &str, default_content: &str) -> Result<bool> {
    ensure_folder(folder)?;
    let path = folder.join(format!("{file_name}.js"));
    let created = write_if_missing(&path, default_content.as_bytes())?;
    if created {
        tracing::info!(path = %path.display(), "created");
    }
    Ok(created)
}

/// Read a file that must exist, mapping absence to [`GenError::MissingFile`].
pub fn read_required(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(GenError::MissingFile(path.display().to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}
