//! Atomic write of the generated module.

use std::io::Write;
use std::path::Path;

use sqltype_core::errors::OutputError;

/// Write `contents` to a temporary file beside `path`, then rename it over
/// `path`. Readers see either the previous module or the new one in full.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), OutputError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let write_err = |source: std::io::Error| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(contents.as_bytes()).map_err(write_err)?;
    file.as_file().sync_all().map_err(write_err)?;

    file.persist(path).map_err(|e| OutputError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
