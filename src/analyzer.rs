//! Metrics and quality checks of a single raster file.

use std::{fmt::Display, path::Path};

use log::{info, warn};
use serde::Serialize;

use crate::{
    components::{
        band::BandStatistics, bounds::GeoBounds, file::file_name, transforms::PixelTransform,
        RasterFile,
    },
    config::{bytes_to_mib, AnalysisConfig},
    errors::Result,
    issues::QualityIssue,
};

/// Crs key of files without a crs.
pub const NO_CRS: &str = "No CRS";

/// Distribution key of a pixel width: absolute value, fixed point, 4 decimals.
///
/// Widths that agree to 4 decimals share a key.
pub fn pixel_size_key(pixel_width: f64) -> String {
    format!("{:.4}", pixel_width.abs())
}

/// Outcome of reading band 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BandSummary {
    NoBands,
    NoValidData,
    Statistics(BandStatistics),
    Error { message: String },
}

/// Metadata and derived metrics of a readable file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileDetails {
    pub file_name: String,
    pub width: usize,
    pub height: usize,
    pub band_count: usize,
    /// Data type of band 1.
    pub data_type: Option<String>,
    pub crs: Option<String>,
    pub transform: PixelTransform,
    pub bounds: GeoBounds,
    pub nodata: Option<f64>,
    pub file_size_bytes: u64,
    pub band: BandSummary,
}

impl FileDetails {
    pub fn crs_key(&self) -> &str {
        self.crs.as_deref().unwrap_or(NO_CRS)
    }

    /// Only the pixel width enters the key, also for non square pixels.
    pub fn pixel_size_key(&self) -> String {
        pixel_size_key(self.transform.pixel_width())
    }

    pub fn pixel_size(&self) -> (f64, f64) {
        self.transform.pixel_size()
    }

    /// Pixel area times pixel count.
    pub fn file_area(&self) -> f64 {
        self.transform.pixel_area() * self.width as f64 * self.height as f64
    }

    /// Area of the bounding box.
    pub fn coverage_area(&self) -> f64 {
        self.bounds.area()
    }

    pub fn file_size_mib(&self) -> f64 {
        bytes_to_mib(self.file_size_bytes)
    }

    pub fn statistics(&self) -> Option<&BandStatistics> {
        match &self.band {
            BandSummary::Statistics(statistics) => Some(statistics),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Analyzed(FileDetails),
    Unreadable { error: String },
}

/// Everything the analysis of one file contributes to the corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileAnalysis {
    pub file_name: String,
    pub outcome: FileOutcome,
    pub issues: Vec<QualityIssue>,
}

impl FileAnalysis {
    pub fn unreadable(file_name: String, error: impl Display) -> Self {
        let issue = QualityIssue::read_error(&file_name, &error);
        Self {
            outcome: FileOutcome::Unreadable {
                error: error.to_string(),
            },
            issues: vec![issue],
            file_name,
        }
    }

    pub fn details(&self) -> Option<&FileDetails> {
        match &self.outcome {
            FileOutcome::Analyzed(details) => Some(details),
            FileOutcome::Unreadable { .. } => None,
        }
    }
}

/// Opens and analyzes `path`. Failures end up as a read error issue.
///
/// The file is closed before returning.
pub fn analyze_path<F: RasterFile>(path: impl AsRef<Path>, config: &AnalysisConfig) -> FileAnalysis {
    let path = path.as_ref();
    match F::open(path).and_then(|file| analyze_file(&file, config)) {
        Ok(analysis) => analysis,
        Err(err) => {
            warn!("could not read {}: {err}", path.display());
            FileAnalysis::unreadable(file_name(path), err)
        }
    }
}

pub fn analyze_file<F: RasterFile>(file: &F, config: &AnalysisConfig) -> Result<FileAnalysis> {
    let file_name = file.file_name();
    let (width, height) = file.size();
    let details = FileDetails {
        width,
        height,
        band_count: file.num_bands(),
        data_type: file.data_types()?.into_iter().next(),
        crs: file.crs(),
        transform: file.transform()?,
        bounds: file.bounds()?,
        nodata: file.nodata(),
        file_size_bytes: file.file_size()?,
        band: BandSummary::NoBands,
        file_name: file_name.clone(),
    };

    let mut issues = Vec::new();
    if details.crs.is_none() {
        issues.push(QualityIssue::missing_crs(&file_name));
    }
    if details.nodata.is_none() {
        issues.push(QualityIssue::missing_nodata(&file_name));
    }

    let band = if details.band_count > 0 {
        summarize_band(file, config, &mut issues)
    } else {
        BandSummary::NoBands
    };

    let size_mib = details.file_size_mib();
    if size_mib < config.min_file_size_mib {
        issues.push(QualityIssue::file_too_small(&file_name, size_mib));
    } else if size_mib > config.max_file_size_mib {
        issues.push(QualityIssue::file_too_large(&file_name, size_mib));
    }

    info!(
        "analyzed {file_name}: {width}x{height}, crs {}, {} issues",
        details.crs_key(),
        issues.len()
    );
    Ok(FileAnalysis {
        outcome: FileOutcome::Analyzed(FileDetails { band, ..details }),
        issues,
        file_name,
    })
}

fn summarize_band<F: RasterFile>(
    file: &F,
    config: &AnalysisConfig,
    issues: &mut Vec<QualityIssue>,
) -> BandSummary {
    let file_name = file.file_name();
    match file.read_band_masked(1) {
        Ok(band) => match band.statistics() {
            Some(statistics) => {
                if statistics.is_suspicious(config.suspicious_min, config.suspicious_max) {
                    issues.push(QualityIssue::suspicious_values(
                        &file_name,
                        statistics.min,
                        statistics.max,
                    ));
                }
                BandSummary::Statistics(statistics)
            }
            None => BandSummary::NoValidData,
        },
        Err(err) => {
            warn!("could not read band 1 of {file_name}: {err}");
            issues.push(QualityIssue::band_statistics_error(&file_name, &err));
            BandSummary::Error {
                message: err.to_string(),
            }
        }
    }
}
