//! Union extent and pairwise overlaps of the corpus bounds.

use std::path::PathBuf;

use itertools::Itertools;
use log::{debug, info};
use serde::Serialize;

use crate::components::{bounds::GeoBounds, file::file_name, RasterFile};

/// Bounds of one file, read independently of the per file analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileBounds {
    pub file_name: String,
    pub bounds: GeoBounds,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpatialExtent {
    /// Union of all bounds.
    pub bounds: GeoBounds,
    /// Unordered pairs of files whose bounds overlap with nonzero area.
    pub overlap_pairs: usize,
    pub file_count: usize,
}

impl SpatialExtent {
    /// `None` for fewer than two files.
    pub fn from_bounds(bounds: &[FileBounds]) -> Option<Self> {
        if bounds.len() < 2 {
            return None;
        }
        let union = bounds
            .iter()
            .map(|file| file.bounds)
            .reduce(|lhs, rhs| lhs.union(&rhs))?;
        let extent = Self {
            bounds: union,
            overlap_pairs: count_overlaps(bounds.iter().map(|file| &file.bounds)),
            file_count: bounds.len(),
        };
        info!("spatial extent {extent:?}");
        Some(extent)
    }

    /// `(right - left) * (top - bottom)` of the union.
    pub fn area(&self) -> f64 {
        self.bounds.area()
    }

    pub fn has_overlaps(&self) -> bool {
        self.overlap_pairs > 0
    }
}

/// Number of unordered pairs that overlap. Quadratic in the number of bounds.
pub fn count_overlaps<'a>(bounds: impl Iterator<Item = &'a GeoBounds> + Clone) -> usize {
    bounds
        .tuple_combinations()
        .filter(|(lhs, rhs)| lhs.overlaps(rhs))
        .count()
}

/// Reopens every path and reads its bounds. Files that fail to open
/// are skipped without raising an issue.
pub fn collect_bounds<F: RasterFile>(paths: &[PathBuf]) -> Vec<FileBounds> {
    paths
        .iter()
        .filter_map(|path| match F::open(path).and_then(|file| file.bounds()) {
            Ok(bounds) => Some(FileBounds {
                file_name: file_name(path),
                bounds,
            }),
            Err(err) => {
                debug!("skipping {} in spatial pass: {err}", path.display());
                None
            }
        })
        .collect()
}
