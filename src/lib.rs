//! Quality and coverage reports for directories of GeoTIFF rasters.
//!
//! A run discovers raster files in a folder, reads metadata and first band
//! statistics of every file, folds them into a [Corpus] and derives a
//! [QualityReport] which renders as text, csv or json.

pub mod analyzer;
pub mod components;
pub mod config;
pub mod corpus;
pub mod discovery;
mod errors;
pub mod extent;
mod intersection;
pub mod issues;
pub mod recommendations;
pub mod report;
#[cfg(test)]
mod test_utils;

use std::path::{Path, PathBuf};

use log::info;
use rayon::prelude::*;

pub use components::{GdalFile, RasterFile};
pub use config::AnalysisConfig;
pub use corpus::Corpus;
pub use errors::{RasterQaError, Result};
pub use report::QualityReport;

use analyzer::{analyze_path, FileAnalysis};
use corpus::CorpusState;
use extent::{collect_bounds, SpatialExtent};

/// Per file analyses, in the order of `paths` whether or not they ran in parallel.
pub fn analyze_paths<F: RasterFile>(paths: &[PathBuf], config: &AnalysisConfig) -> Vec<FileAnalysis> {
    if config.parallel {
        paths
            .par_iter()
            .map(|path| analyze_path::<F>(path, config))
            .collect()
    } else {
        paths
            .iter()
            .map(|path| analyze_path::<F>(path, config))
            .collect()
    }
}

/// Full run over `dir`, opening rasters through `F`.
pub fn analyze_directory<F: RasterFile>(dir: impl AsRef<Path>, config: &AnalysisConfig) -> Result<QualityReport> {
    let dir = dir.as_ref();
    let paths = discovery::find_rasters(dir, config)?;
    let corpus = analyze_paths::<F>(&paths, config)
        .into_iter()
        .collect::<CorpusState>()
        .finalize();
    info!(
        "analyzed {} files, {} issues",
        corpus.total_files(),
        corpus.total_issues()
    );
    let spatial_extent = SpatialExtent::from_bounds(&collect_bounds::<F>(&paths));
    Ok(QualityReport::new(dir, corpus, spatial_extent))
}
