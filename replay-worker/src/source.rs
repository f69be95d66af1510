use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to resolve data directory {path}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to list data directory {path}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Lists the parquet files under `data_dir` in lexicographic order,
/// optionally filtered to an inclusive `[date_from, date_to]` range taken
/// from the filename. This sort is the pipeline's only cross-file ordering
/// guarantee.
///
/// A directory resolution or listing failure is yielded as a single `Err`
/// element, ending the sequence; the caller is expected to abort on it.
/// When a range is given, a file whose date segment cannot be parsed is
/// skipped with a warning and the sequence continues.
pub fn discover_files(
    data_dir: &Path,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
) -> Box<dyn Iterator<Item = Result<PathBuf, DiscoveryError>>> {
    let files = match list_parquet_files(data_dir) {
        Ok(files) => files,
        Err(e) => return Box::new(std::iter::once(Err(e))),
    };

    if date_from.is_none() && date_to.is_none() {
        return Box::new(files.into_iter().map(Ok));
    }

    Box::new(files.into_iter().filter_map(move |file| {
        let date = match filename_date(&file) {
            Some(date) => date,
            None => {
                warn!(
                    "Cannot parse date from filename: {}",
                    file.file_name().unwrap_or_default().to_string_lossy()
                );
                return None;
            }
        };
        if date_from.is_some_and(|from| date < from) {
            return None;
        }
        if date_to.is_some_and(|to| date > to) {
            return None;
        }
        Some(Ok(file))
    }))
}

fn list_parquet_files(data_dir: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    let data_dir = data_dir
        .canonicalize()
        .map_err(|e| DiscoveryError::Resolve {
            path: data_dir.to_path_buf(),
            source: e,
        })?;

    let entries = std::fs::read_dir(&data_dir).map_err(|e| DiscoveryError::List {
        path: data_dir.clone(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DiscoveryError::List {
            path: data_dir.clone(),
            source: e,
        })?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "parquet") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Pulls the date out of `<prefix>_<YYYY-MM-DD>_<chunk>.parquet`.
fn filename_date(file: &Path) -> Option<NaiveDate> {
    let stem = file.file_stem()?.to_str()?;
    let date_segment = stem.split('_').nth(1)?;
    NaiveDate::parse_from_str(date_segment, "%Y-%m-%d").ok()
}
