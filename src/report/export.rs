//! One row per file csv export.

use std::io::Write;

use csv::Writer;

use crate::{
    analyzer::{BandSummary, FileAnalysis, FileDetails, FileOutcome},
    errors::Result,
    report::QualityReport,
};

pub const HEADER: [&str; 20] = [
    "Filename",
    "Width",
    "Height",
    "Bands",
    "Data_Type",
    "CRS",
    "Pixel_Size_X",
    "Pixel_Size_Y",
    "Bounds_Left",
    "Bounds_Bottom",
    "Bounds_Right",
    "Bounds_Top",
    "NoData_Value",
    "File_Size_MB",
    "Min_Value",
    "Max_Value",
    "Mean_Value",
    "Std_Value",
    "Valid_Pixels",
    "Coverage_Percent",
];

pub fn write_csv<W: Write>(report: &QualityReport, writer: W) -> Result<()> {
    let mut writer = Writer::from_writer(writer);
    writer.write_record(HEADER)?;
    for analysis in report.corpus.files() {
        writer.write_record(row(analysis))?;
    }
    writer.flush()?;
    Ok(())
}

/// For unreadable files every column but the last reads `Error`,
/// the last one carries the error message.
pub fn row(analysis: &FileAnalysis) -> Vec<String> {
    match &analysis.outcome {
        FileOutcome::Analyzed(details) => details_row(details),
        FileOutcome::Unreadable { error } => {
            let mut row = vec!["Error".to_string(); HEADER.len() - 1];
            row.push(error.clone());
            row
        }
    }
}

fn details_row(details: &FileDetails) -> Vec<String> {
    let (pixel_x, pixel_y) = details.pixel_size();
    let bounds = details.bounds;
    let mut row = vec![
        details.file_name.clone(),
        details.width.to_string(),
        details.height.to_string(),
        details.band_count.to_string(),
        details.data_type.clone().unwrap_or_default(),
        details.crs_key().to_string(),
        format!("{pixel_x:.6}"),
        format!("{pixel_y:.6}"),
        format!("{:.6}", bounds.left()),
        format!("{:.6}", bounds.bottom()),
        format!("{:.6}", bounds.right()),
        format!("{:.6}", bounds.top()),
        details
            .nodata
            .map_or_else(|| "None".to_string(), |nodata| format!("{nodata:?}")),
        format!("{:.2}", details.file_size_mib()),
    ];
    match &details.band {
        BandSummary::Statistics(stats) => row.extend([
            format!("{:.4}", stats.min),
            format!("{:.4}", stats.max),
            format!("{:.4}", stats.mean),
            format!("{:.4}", stats.std),
            stats.valid_pixels.to_string(),
            format!("{:.1}", stats.coverage_percent()),
        ]),
        BandSummary::NoValidData => {
            row.extend(std::iter::repeat(String::new()).take(4));
            row.extend(["0".to_string(), "0.0".to_string()]);
        }
        BandSummary::NoBands | BandSummary::Error { .. } => {
            row.extend(std::iter::repeat(String::new()).take(6))
        }
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analyzer::analyze_path,
        config::AnalysisConfig,
        corpus::CorpusState,
        test_utils::{MemoryRaster, RasterSpec},
    };
    use rstest::rstest;

    fn report(files: Vec<(&str, RasterSpec)>) -> QualityReport {
        let corpus = files
            .into_iter()
            .map(|(name, spec)| {
                let path = format!("/memory/export/{name}");
                spec.register(&path);
                analyze_path::<MemoryRaster>(&path, &AnalysisConfig::default())
            })
            .collect::<CorpusState>()
            .finalize();
        QualityReport::new("/memory/export", corpus, None)
    }

    fn export(report: &QualityReport) -> Vec<Vec<String>> {
        let mut buffer = Vec::new();
        write_csv(report, &mut buffer).unwrap();
        csv::Reader::from_reader(buffer.as_slice())
            .records()
            .map(|record| record.unwrap().iter().map(String::from).collect())
            .collect()
    }

    #[rstest]
    fn header_order() {
        let mut buffer = Vec::new();
        write_csv(&report(vec![]), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text.lines().next().unwrap(),
            "Filename,Width,Height,Bands,Data_Type,CRS,Pixel_Size_X,Pixel_Size_Y,\
             Bounds_Left,Bounds_Bottom,Bounds_Right,Bounds_Top,NoData_Value,File_Size_MB,\
             Min_Value,Max_Value,Mean_Value,Std_Value,Valid_Pixels,Coverage_Percent"
        );
    }

    #[rstest]
    fn analyzed_row() {
        let rows = export(&report(vec![(
            "row.tif",
            RasterSpec::new(2, 2)
                .bounds(10., 20., 12., 22.)
                .pixels(vec![1., 3., -9999., 5.]),
        )]));
        assert_eq!(
            rows,
            vec![vec![
                "row.tif", "2", "2", "1", "Float32", "EPSG:4326", "1.000000", "1.000000",
                "10.000000", "20.000000", "12.000000", "22.000000", "-9999.0", "2.00", "1.0000",
                "5.0000", "3.0000", "1.6330", "3", "75.0",
            ]]
        );
    }

    #[rstest]
    fn unreadable_row() {
        let rows = export(&report(vec![(
            "unreadable.tif",
            RasterSpec::new(1, 1).opens(0),
        )]));
        assert_eq!(rows[0].len(), HEADER.len());
        assert!(rows[0][..19].iter().all(|field| field == "Error"));
        assert!(rows[0][19].contains("No raster registered"));
    }

    #[rstest]
    fn unreadable_row_hides_file_name() {
        let row = row(&FileAnalysis::unreadable("bad.tif".into(), "boom"));
        let mut expected = vec!["Error"; 19];
        expected.push("boom");
        assert_eq!(row, expected);
    }

    #[rstest]
    fn row_without_valid_data() {
        let rows = export(&report(vec![(
            "blank.tif",
            RasterSpec::new(1, 1).nodata(Some(0.)).pixels(vec![0.]),
        )]));
        assert_eq!(&rows[0][12..], &["0.0", "2.00", "", "", "", "", "0", "0.0"]);
    }
}
