//! Utility functions used in all other neurojaccard modules.

use std::path::Path;

/// Check whether the file needs gzip decoding when read as an MGH volume: ".mgz" or any ".gz" file.
pub fn is_compressed_mgh_file<P>(path: P) -> bool
where
    P: AsRef<Path>,
{
    file_name_lowercase(path)
        .map(|name| name.ends_with(".mgz") || name.ends_with(".gz"))
        .unwrap_or(false)
}

/// The lowercased final component of the path, if it has one.
pub fn file_name_lowercase<P>(path: P) -> Option<String>
where
    P: AsRef<Path>,
{
    path.as_ref()
        .file_name()
        .map(|a| a.to_string_lossy().to_lowercase())
}
