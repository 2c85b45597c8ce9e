use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Ensure the output directory exists, creating parents as needed.
pub fn ensure_output_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
        debug!("Created directory: {}", path.display());
    }
    Ok(())
}

/// List the names of the files directly inside `dir`, sorted.
///
/// Every regular file counts as a metadata record regardless of its
/// extension. Subdirectories are skipped. Names are kept as the OS
/// reports them so they can be reopened even when they are not UTF-8.
pub fn list_metadata_files(dir: &Path) -> io::Result<Vec<OsString>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }
        names.push(entry.file_name());
    }
    names.sort();
    Ok(names)
}

/// Name of the image written for `record`: `<stem>-img.<ext>`.
///
/// `stem` is the record name up to its first `.`, `ext` is the URL after
/// its last `.`.
pub fn output_filename(record: &str, url: &str) -> String {
    let stem = record.split('.').next().unwrap_or(record);
    let ext = url.rsplit('.').next().unwrap_or(url);
    format!("{}-img.{}", stem, ext)
}
