//! Selecting which documents a batch run reads

use biolit_common::{BiolitError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Read a file list: one document path per line, blank lines ignored
pub fn load_file_list(path: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(BiolitError::FileNotFound(path.display().to_string()));
    }

    let files: Vec<PathBuf> = std::fs::read_to_string(path)?
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect();

    info!("Found {} files.", files.len());
    Ok(files)
}

/// Log how many of the files are of each document type
pub fn log_file_types(files: &[PathBuf]) {
    for ext in ["nxml", "txt"] {
        let count = files
            .iter()
            .filter(|file| file.extension().is_some_and(|e| e == ext))
            .count();
        debug!("{} are {}", count, ext);
    }
}

/// Pick `n` distinct files at random; all of them if `n` is not smaller
pub fn sample_files<R: Rng + ?Sized>(files: &[PathBuf], n: usize, rng: &mut R) -> Vec<PathBuf> {
    if n >= files.len() {
        return files.to_vec();
    }
    files.choose_multiple(rng, n).cloned().collect()
}

/// Parse a `start:end` range
pub fn parse_range(range: &str) -> Result<(usize, usize)> {
    let invalid = || BiolitError::InvalidRange(range.to_string());

    let (start, end) = range.split_once(':').ok_or_else(invalid)?;
    let start: usize = start.trim().parse().map_err(|_| invalid())?;
    let end: usize = end.trim().parse().map_err(|_| invalid())?;

    if start > end {
        return Err(invalid());
    }
    Ok((start, end))
}

/// Keep files in the half-open range `[start, end)`, clamped to the list
pub fn apply_range(files: &[PathBuf], (start, end): (usize, usize)) -> Vec<PathBuf> {
    let end = end.min(files.len());
    let start = start.min(end);
    files[start..end].to_vec()
}

/// Narrow a file list for one run: sample first, then slice the sample
pub fn select_files<R: Rng + ?Sized>(
    files: Vec<PathBuf>,
    sample: Option<usize>,
    range: Option<(usize, usize)>,
    rng: &mut R,
) -> Vec<PathBuf> {
    let files = match sample {
        Some(n) => sample_files(&files, n, rng),
        None => files,
    };
    match range {
        Some(range) => apply_range(&files, range),
        None => files,
    }
}
