use crate::errors::{Result, StorageError};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Object key used when the caller gives none: the final segment of the local path.
pub fn default_object_key(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            StorageError::local_file(
                path,
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "path has no file name to use as object key",
                ),
            )
        })
}

/// Content type sent on upload
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Write `contents` to `dest` via a temp file in the same directory, so `dest`
/// only ever holds a complete file.
pub fn write_atomically(dest: &Path, contents: &[u8]) -> Result<()> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StorageError::local_file(dest, e))?;
    tmp.write_all(contents)
        .map_err(|e| StorageError::local_file(dest, e))?;
    tmp.flush().map_err(|e| StorageError::local_file(dest, e))?;
    tmp.persist(dest)
        .map_err(|e| StorageError::local_file(dest, e.error))?;
    Ok(())
}
