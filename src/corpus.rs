//! Corpus wide aggregation of per file analyses.

use std::collections::{BTreeMap, HashSet};

use log::info;
use serde::Serialize;

use crate::{
    analyzer::FileAnalysis,
    components::band::{mean_and_std, BandStatistics},
    issues::{IssueKind, QualityIssue},
};

/// Band statistics tagged with the file they come from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileBandStatistics {
    pub file_name: String,
    #[serde(flatten)]
    pub statistics: BandStatistics,
}

/// Accumulator filled file by file, in file order.
#[derive(Debug, Default, Serialize)]
pub struct CorpusState {
    files: Vec<FileAnalysis>,
    crs_distribution: BTreeMap<String, usize>,
    pixel_size_distribution: BTreeMap<String, usize>,
    total_area: f64,
    issues: Vec<QualityIssue>,
    band_statistics: Vec<FileBandStatistics>,
}

impl CorpusState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fold(&mut self, analysis: FileAnalysis) {
        if let Some(details) = analysis.details() {
            *self
                .crs_distribution
                .entry(details.crs_key().to_string())
                .or_default() += 1;
            *self
                .pixel_size_distribution
                .entry(details.pixel_size_key())
                .or_default() += 1;
            self.total_area += details.file_area();
            if let Some(statistics) = details.statistics() {
                self.band_statistics.push(FileBandStatistics {
                    file_name: analysis.file_name.clone(),
                    statistics: *statistics,
                });
            }
        }
        self.issues.extend(analysis.issues.iter().cloned());
        self.files.push(analysis);
    }

    /// Freezes the state, nothing can be folded afterwards.
    pub fn finalize(self) -> Corpus {
        let corpus = Corpus(self);
        info!(
            "corpus of {} files, {} issues in {} files",
            corpus.total_files(),
            corpus.total_issues(),
            corpus.distinct_files_with_issues()
        );
        corpus
    }
}

impl FromIterator<FileAnalysis> for CorpusState {
    fn from_iter<I: IntoIterator<Item = FileAnalysis>>(iter: I) -> Self {
        let mut state = Self::new();
        iter.into_iter().for_each(|analysis| state.fold(analysis));
        state
    }
}

/// Summary over the band statistics of all files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GlobalStatistics {
    pub min: f64,
    pub max: f64,
    pub mean_of_means: f64,
    /// Population standard deviation of the per file means.
    pub std_of_means: f64,
}

/// Read only view on a finished [CorpusState].
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct Corpus(CorpusState);

impl Corpus {
    /// Analyses in file order.
    pub fn files(&self) -> &[FileAnalysis] {
        &self.0.files
    }

    pub fn total_files(&self) -> usize {
        self.0.files.len()
    }

    pub fn crs_distribution(&self) -> &BTreeMap<String, usize> {
        &self.0.crs_distribution
    }

    pub fn pixel_size_distribution(&self) -> &BTreeMap<String, usize> {
        &self.0.pixel_size_distribution
    }

    /// Sum of every file's pixel area times pixel count. Overlapping files
    /// are counted once per file.
    pub fn total_area(&self) -> f64 {
        self.0.total_area
    }

    pub fn issues(&self) -> &[QualityIssue] {
        &self.0.issues
    }

    pub fn band_statistics(&self) -> &[FileBandStatistics] {
        &self.0.band_statistics
    }

    pub fn total_issues(&self) -> usize {
        self.0.issues.len()
    }

    pub fn distinct_files_with_issues(&self) -> usize {
        self.0
            .issues
            .iter()
            .map(|issue| issue.file_name.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn has_issue(&self, kind: IssueKind) -> bool {
        self.0.issues.iter().any(|issue| issue.kind == kind)
    }

    /// `(crs, count, percent of all files)` with one decimal precision intended for display.
    pub fn crs_percentages(&self) -> Vec<(&str, usize, f64)> {
        let total = self.total_files() as f64;
        self.0
            .crs_distribution
            .iter()
            .map(|(crs, count)| (crs.as_str(), *count, *count as f64 / total * 100.))
            .collect()
    }

    pub fn has_mixed_crs(&self) -> bool {
        self.0.crs_distribution.len() > 1
    }

    pub fn has_mixed_pixel_sizes(&self) -> bool {
        self.0.pixel_size_distribution.len() > 1
    }

    /// `None` when no file produced band statistics.
    pub fn global_statistics(&self) -> Option<GlobalStatistics> {
        let statistics = self.0.band_statistics.iter().map(|tagged| &tagged.statistics);
        let min = statistics.clone().map(|stats| stats.min).reduce(f64::min)?;
        let max = statistics.clone().map(|stats| stats.max).reduce(f64::max)?;
        let means: Vec<f64> = statistics.map(|stats| stats.mean).collect();
        let (mean_of_means, std_of_means) = mean_and_std(&means)?;
        Some(GlobalStatistics {
            min,
            max,
            mean_of_means,
            std_of_means,
        })
    }
}
