use std::path::{Path, PathBuf};

use log::info;

use crate::{
    config::AnalysisConfig,
    errors::{RasterQaError, Result},
};

/// Raster files directly inside `dir`, sorted by file name.
///
/// Errors when `dir` is not a directory or holds no matching file.
pub fn find_rasters(dir: impl AsRef<Path>, config: &AnalysisConfig) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(RasterQaError::NotADirectory(dir.to_path_buf()));
    }
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && config.matches_extension(&path) {
            paths.push(path);
        }
    }
    if paths.is_empty() {
        return Err(RasterQaError::NoRasterFiles(dir.to_path_buf()));
    }
    paths.sort_by(|lhs, rhs| lhs.file_name().cmp(&rhs.file_name()));
    info!("found {} raster files in {}", paths.len(), dir.display());
    Ok(paths)
}
