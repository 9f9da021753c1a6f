//! Plain text rendering, one section after the other.

use std::fmt::{self, Write};

use itertools::Itertools;

use crate::{
    analyzer::{BandSummary, FileDetails, FileOutcome},
    extent::SpatialExtent,
    report::QualityReport,
};

impl fmt::Display for QualityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_report(f, self)
    }
}

fn section(out: &mut impl Write, header: &str) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "{header}")?;
    writeln!(out, "{}", "-".repeat(header.chars().count()))
}

/// `1234567` as `1,234,567`.
pub fn thousands(value: usize) -> String {
    let digits = value.to_string();
    let head = digits.len() % 3;
    let mut groups = Vec::new();
    if head > 0 {
        groups.push(&digits[..head]);
    }
    groups.extend((head..digits.len()).step_by(3).map(|idx| &digits[idx..idx + 3]));
    groups.join(",")
}

fn write_report(out: &mut impl Write, report: &QualityReport) -> fmt::Result {
    let corpus = &report.corpus;
    let summary = &report.summary;

    writeln!(out, "GeoTIFF Quality Report")?;
    writeln!(out)?;
    writeln!(out, "Folder: {}", report.folder.display())?;
    writeln!(
        out,
        "Report generated: {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(out, "Total files found: {}", summary.total_files)?;

    section(out, "OVERALL SUMMARY")?;
    writeln!(out, "Total GeoTIFF files analyzed: {}", summary.total_files)?;
    writeln!(
        out,
        "Total approximate area covered: {:.2} km² (overlaps counted once per file)",
        corpus.total_area() / 1_000_000.
    )?;
    writeln!(out, "Quality issues found: {}", summary.total_issues)?;
    writeln!(out, "Files with issues: {}", summary.files_with_issues)?;

    section(out, "COORDINATE REFERENCE SYSTEM ANALYSIS")?;
    writeln!(out, "CRS Distribution:")?;
    for (crs, count, percent) in corpus.crs_percentages() {
        writeln!(out, "  {crs}: {count} files ({percent:.1}%)")?;
    }
    if corpus.has_mixed_crs() {
        writeln!(out)?;
        writeln!(
            out,
            "WARNING: Multiple CRS found! This may cause issues in analysis."
        )?;
    }

    section(out, "PIXEL SIZE ANALYSIS")?;
    writeln!(out, "Pixel Size Distribution:")?;
    for (pixel_size, count) in corpus.pixel_size_distribution() {
        writeln!(out, "  {pixel_size} units: {count} files")?;
    }
    if corpus.has_mixed_pixel_sizes() {
        writeln!(out)?;
        writeln!(
            out,
            "NOTE: Multiple pixel sizes detected. Consider resampling for consistency."
        )?;
    }

    section(out, "RASTER STATISTICS SUMMARY")?;
    if let Some(global) = summary.global_statistics {
        writeln!(out, "Data Value Range Across All Files:")?;
        writeln!(out, "  Global Minimum: {:.4}", global.min)?;
        writeln!(out, "  Global Maximum: {:.4}", global.max)?;
        writeln!(out, "  Average of Means: {:.4}", global.mean_of_means)?;
        writeln!(out, "  Standard Deviation of Means: {:.4}", global.std_of_means)?;
    }

    section(out, "QUALITY ISSUES AND RECOMMENDATIONS")?;
    if corpus.issues().is_empty() {
        writeln!(out, "No significant quality issues detected.")?;
    } else {
        writeln!(out, "Issues found:")?;
        for issue in corpus.issues() {
            writeln!(out, "  • {issue}")?;
        }
        writeln!(out)?;
        writeln!(out, "Recommendations:")?;
        for hint in &report.issue_hints {
            writeln!(out, "  • {hint}")?;
        }
    }

    section(out, "DETAILED FILE ANALYSIS")?;
    for analysis in corpus.files() {
        writeln!(out, "File: {}", analysis.file_name)?;
        match &analysis.outcome {
            FileOutcome::Analyzed(details) => write_details(out, details)?,
            FileOutcome::Unreadable { error } => {
                writeln!(out, "  Error reading file: {error}")?
            }
        }
        writeln!(out)?;
    }

    section(out, "SPATIAL COVERAGE ANALYSIS")?;
    if let Some(extent) = &report.spatial_extent {
        write_extent(out, extent)?;
    }

    section(out, "PROCESSING RECOMMENDATIONS")?;
    writeln!(out, "Based on the analysis, consider the following:")?;
    writeln!(out)?;
    for (idx, recommendation) in report.recommendations.iter().enumerate() {
        writeln!(out, "{}. {}:", idx + 1, recommendation.title)?;
        writeln!(
            out,
            "{}",
            recommendation
                .actions
                .iter()
                .map(|action| format!("   • {action}"))
                .join("\n")
        )?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_details(out: &mut impl Write, details: &FileDetails) -> fmt::Result {
    let (pixel_x, pixel_y) = details.pixel_size();
    let bounds = details.bounds;
    writeln!(out, "  Dimensions: {} x {} pixels", details.width, details.height)?;
    writeln!(out, "  Bands: {}", details.band_count)?;
    writeln!(
        out,
        "  Data type: {}",
        details.data_type.as_deref().unwrap_or("Unknown")
    )?;
    writeln!(out, "  CRS: {}", details.crs_key())?;
    writeln!(out, "  Pixel Size: {pixel_x:.6} x {pixel_y:.6} units")?;
    writeln!(out, "  Bounds:")?;
    writeln!(out, "    Left: {:.6}", bounds.left())?;
    writeln!(out, "    Bottom: {:.6}", bounds.bottom())?;
    writeln!(out, "    Right: {:.6}", bounds.right())?;
    writeln!(out, "    Top: {:.6}", bounds.top())?;
    writeln!(out, "  Coverage Area: {:.2} square units", details.coverage_area())?;
    match details.nodata {
        Some(nodata) => writeln!(out, "  NoData Value: {nodata:?}")?,
        None => writeln!(out, "  NoData Value: None")?,
    }
    writeln!(out, "  File Size: {:.2} MB", details.file_size_mib())?;
    match &details.band {
        BandSummary::Statistics(stats) => {
            writeln!(out, "  Band 1 Statistics:")?;
            writeln!(out, "    Min: {:.4}", stats.min)?;
            writeln!(out, "    Max: {:.4}", stats.max)?;
            writeln!(out, "    Mean: {:.4}", stats.mean)?;
            writeln!(out, "    Std Dev: {:.4}", stats.std)?;
            writeln!(out, "    Valid Pixels: {}", thousands(stats.valid_pixels))?;
            writeln!(out, "    NoData Pixels: {}", thousands(stats.nodata_pixels()))?;
            writeln!(out, "    Data Coverage: {:.1}%", stats.coverage_percent())?;
        }
        BandSummary::NoValidData => writeln!(out, "  Band 1: No valid data")?,
        BandSummary::Error { message } => {
            writeln!(out, "  Band statistics error: {message}")?
        }
        BandSummary::NoBands => (),
    }
    Ok(())
}

fn write_extent(out: &mut impl Write, extent: &SpatialExtent) -> fmt::Result {
    let bounds = extent.bounds;
    writeln!(out, "Overall Spatial Extent:")?;
    writeln!(out, "  Left: {:.6}", bounds.left())?;
    writeln!(out, "  Right: {:.6}", bounds.right())?;
    writeln!(out, "  Bottom: {:.6}", bounds.bottom())?;
    writeln!(out, "  Top: {:.6}", bounds.top())?;
    writeln!(out, "  Total Extent Area: {:.2} square units", extent.area())?;
    writeln!(
        out,
        "  Potential overlapping file pairs: {}",
        extent.overlap_pairs
    )?;
    if extent.has_overlaps() {
        writeln!(out, "  Note: Overlaps detected - consider mosaic creation")?;
    }
    Ok(())
}
