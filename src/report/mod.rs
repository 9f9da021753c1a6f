//! Structured result of an analysis run and its renderings.

pub mod export;
pub mod text;

use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use log::info;
use serde::Serialize;

use crate::{
    corpus::{Corpus, GlobalStatistics},
    errors::Result,
    extent::SpatialExtent,
    recommendations::{issue_hints, recommend, Recommendation},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub total_files: usize,
    pub total_issues: usize,
    pub files_with_issues: usize,
    pub global_statistics: Option<GlobalStatistics>,
}

/// Everything a renderer needs, computed once the corpus is final.
#[derive(Debug, Serialize)]
pub struct QualityReport {
    pub folder: PathBuf,
    pub generated_at: DateTime<Local>,
    pub summary: Summary,
    pub corpus: Corpus,
    pub spatial_extent: Option<SpatialExtent>,
    pub recommendations: Vec<Recommendation>,
    pub issue_hints: Vec<&'static str>,
}

impl QualityReport {
    pub fn new(folder: impl Into<PathBuf>, corpus: Corpus, spatial_extent: Option<SpatialExtent>) -> Self {
        let summary = Summary {
            total_files: corpus.total_files(),
            total_issues: corpus.total_issues(),
            files_with_issues: corpus.distinct_files_with_issues(),
            global_statistics: corpus.global_statistics(),
        };
        Self {
            folder: folder.into(),
            generated_at: Local::now(),
            recommendations: recommend(&corpus),
            issue_hints: issue_hints(&corpus),
            summary,
            corpus,
            spatial_extent,
        }
    }

    /// `Quality-Report-<YYYYmmddHHMM>`, the shared stem of every artifact.
    pub fn file_stem(&self) -> String {
        format!("Quality-Report-{}", self.generated_at.format("%Y%m%d%H%M"))
    }

    pub fn to_text(&self) -> String {
        self.to_string()
    }

    pub fn write_text(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(&path, self.to_text())?;
        info!("text report written to {}", path.as_ref().display());
        Ok(())
    }

    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        export::write_csv(self, BufWriter::new(File::create(&path)?))?;
        info!("csv export written to {}", path.as_ref().display());
        Ok(())
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        serde_json::to_writer_pretty(BufWriter::new(File::create(&path)?), self)?;
        info!("json report written to {}", path.as_ref().display());
        Ok(())
    }
}
