//! File system helpers for writing reports.

use chrono::Local;
use color_eyre::eyre::{Report, Result, WrapErr};
use std::fmt::Debug;
use std::path::{Path, PathBuf};

/// Format of the timestamp embedded in default output file names.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Create the parent directory of a file path, if it does not exist yet.
pub fn create_parent_dir<P>(path: &P) -> Result<(), Report>
where
    P: AsRef<Path> + Debug,
{
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create parent directory of: {path:?}"))?;
        }
    }
    Ok(())
}

/// Build a default output file name, stamped with the local time.
///
/// ## Examples
///
/// ```rust
/// use burden::utils::timestamped_path;
///
/// let path = timestamped_path("output", "enrichment", Some("dominant"));
/// let name = path.file_name().unwrap().to_str().unwrap();
/// assert!(name.starts_with("enrichment_"));
/// assert!(name.ends_with("_dominant.tsv"));
/// // enrichment_yyyy-mm-dd-HH-MM-SS_dominant.tsv
/// assert_eq!(name.len(), "enrichment__dominant.tsv".len() + 19);
/// ```
pub fn timestamped_path<P>(dir: P, prefix: &str, suffix: Option<&str>) -> PathBuf
where
    P: AsRef<Path>,
{
    let timestamp = Local::now().format(TIMESTAMP_FORMAT);
    let name = match suffix {
        Some(suffix) => format!("{prefix}_{timestamp}_{suffix}.tsv"),
        None => format!("{prefix}_{timestamp}.tsv"),
    };
    dir.as_ref().join(name)
}
