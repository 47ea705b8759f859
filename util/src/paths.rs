use crate::config;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Create a directory (and all parents) if it doesn't exist, and return the path.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let p = path.as_ref();
    fs::create_dir_all(p)?;
    Ok(p.to_path_buf())
}

/// Global storage root (absolute), from `config::storage_root()`.
/// If relative in env, resolve against current_dir().
pub fn storage_root() -> PathBuf {
    let p = PathBuf::from(config::storage_root());
    if p.is_absolute() {
        p
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(p)
    }
}

/// Stored name for an uploaded document: `{unix_millis}_{original}`.
///
/// Path separators in the original name are replaced so the blob always lands
/// directly under the storage root.
pub fn upload_file_name(original: &str, unix_millis: i64) -> String {
    let cleaned: String = original
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{unix_millis}_{cleaned}")
}

/// Absolute path of a stored upload.
pub fn upload_path(stored_name: &str) -> PathBuf {
    storage_root().join(stored_name)
}
