//! Atomic file I/O with advisory locking

use std::fs;
use std::io::Write;
use std::path::Path;

use fs2::FileExt;
use tempfile::{Builder, NamedTempFile};

use crate::{Error, Result};

/// Write `content` to `path` through a locked temp file in the same directory.
///
/// The temp file is renamed over the target only after it is fully written
/// and synced, so readers never observe a partial manifest. It is removed
/// again if any step fails. An existing target file is replaced.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    let mut temp = Builder::new()
        .prefix(".envpin-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| Error::io(dir, e))?;

    fill_locked(&mut temp, path, content)?;

    temp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}

fn fill_locked(temp: &mut NamedTempFile, target: &Path, content: &[u8]) -> Result<()> {
    let lock_failed = || Error::LockFailed {
        path: target.to_path_buf(),
    };

    temp.as_file().lock_exclusive().map_err(|_| lock_failed())?;
    temp.write_all(content)
        .map_err(|e| Error::io(temp.path(), e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| Error::io(temp.path(), e))?;
    temp.as_file().unlock().map_err(|_| lock_failed())
}

/// Read a whole file as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}
