use std::path::{Path, PathBuf};

use clap::Parser;
use log::{debug, error, info};

use rasterqa::{analyze_directory, AnalysisConfig, GdalFile, QualityReport, RasterQaError, Result};

/// Quality report of a folder of GeoTIFF files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Folder holding the GeoTIFF files.
    directory: Option<PathBuf>,

    /// Where reports are written, defaults to the analyzed folder.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Json file with analysis thresholds.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the csv export.
    #[arg(long)]
    no_csv: bool,

    /// Also write the report as json.
    #[arg(long)]
    json: bool,

    /// Analyze one file after the other.
    #[arg(long)]
    sequential: bool,

    #[arg(long, allow_negative_numbers = true)]
    suspicious_min: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    suspicious_max: Option<f64>,
}

impl Cli {
    fn analysis_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_file(path)?,
            None => AnalysisConfig::default(),
        };
        if self.sequential {
            config.parallel = false;
        }
        if let Some(min) = self.suspicious_min {
            config.suspicious_min = min;
        }
        if let Some(max) = self.suspicious_max {
            config.suspicious_max = max;
        }
        Ok(config)
    }
}

fn write_reports(report: &QualityReport, output_dir: &Path, cli: &Cli) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let stem = output_dir.join(report.file_stem());
    let text_path = stem.with_extension("txt");
    report.write_text(&text_path)?;
    if !cli.no_csv {
        report.write_csv(stem.with_extension("csv"))?;
    }
    if cli.json {
        report.write_json(stem.with_extension("json"))?;
    }
    Ok(text_path)
}

/// Runs the analysis and writes the reports, returning the text report path.
fn run(cli: &Cli) -> Result<(QualityReport, PathBuf)> {
    let directory = cli.directory.as_ref().ok_or(RasterQaError::NoDirectory)?;
    let config = cli.analysis_config()?;
    debug!("running with {config:?}");

    let report = analyze_directory::<GdalFile>(directory, &config)?;
    let output_dir = cli.output_dir.as_deref().unwrap_or(directory.as_path());
    let text_path = write_reports(&report, output_dir, cli)?;
    Ok((report, text_path))
}

fn exit_code(err: &RasterQaError) -> i32 {
    match err {
        RasterQaError::NoDirectory => 2,
        _ => 1,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    debug!("parsed cli args: {cli:?}");

    match run(&cli) {
        Ok((report, text_path)) => {
            println!("Report saved: {}", text_path.display());
            println!("Files analyzed: {}", report.summary.total_files);
            println!("Issues found: {}", report.summary.total_issues);
            info!("done");
        }
        Err(err) => {
            error!("{err}");
            std::process::exit(exit_code(&err));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn artifacts(dir: &Path) -> Vec<String> {
        let mut extensions: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| {
                path.file_name()
                    .unwrap()
                    .to_string_lossy()
                    .starts_with("Quality-Report-")
            })
            .map(|path| path.extension().unwrap().to_string_lossy().into_owned())
            .collect();
        extensions.sort();
        extensions
    }

    fn folder_with_raster() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.tif"), b"not a tiff").unwrap();
        dir
    }

    #[rstest]
    fn missing_directory_exits_with_two() {
        let cli = Cli::try_parse_from(["rasterqa"]).unwrap();
        let err = run(&cli).unwrap_err();
        assert!(matches!(err, RasterQaError::NoDirectory));
        assert_eq!(exit_code(&err), 2);
    }

    #[rstest]
    fn folder_without_rasters_exits_with_one() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from(["rasterqa", dir.path().to_str().unwrap()]).unwrap();
        let err = run(&cli).unwrap_err();
        assert_eq!(exit_code(&err), 1);
        assert!(artifacts(dir.path()).is_empty());
    }

    #[test_log::test]
    fn reports_land_in_scanned_folder_by_default() {
        let dir = folder_with_raster();
        let cli = Cli::try_parse_from(["rasterqa", dir.path().to_str().unwrap()]).unwrap();
        let (report, text_path) = run(&cli).unwrap();
        assert_eq!(report.summary.total_files, 1);
        assert_eq!(text_path.parent(), Some(dir.path()));
        assert_eq!(artifacts(dir.path()), vec!["csv", "txt"]);
    }

    #[test_log::test]
    fn output_flags() {
        let dir = folder_with_raster();
        let output = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from([
            "rasterqa",
            dir.path().to_str().unwrap(),
            "--output-dir",
            output.path().to_str().unwrap(),
            "--no-csv",
            "--json",
            "--sequential",
        ])
        .unwrap();
        run(&cli).unwrap();
        assert_eq!(artifacts(output.path()), vec!["json", "txt"]);
        assert!(artifacts(dir.path()).is_empty());
    }

    #[rstest]
    fn threshold_overrides() {
        let cli = Cli::try_parse_from([
            "rasterqa",
            "somewhere",
            "--sequential",
            "--suspicious-min",
            "-5",
            "--suspicious-max",
            "5",
        ])
        .unwrap();
        let config = cli.analysis_config().unwrap();
        assert!(!config.parallel);
        assert_eq!((config.suspicious_min, config.suspicious_max), (-5., 5.));
    }
}
