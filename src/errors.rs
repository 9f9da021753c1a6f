use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, RasterQaError>;

#[derive(thiserror::Error, Debug)]
pub enum RasterQaError {
    #[error(transparent)]
    GdalError(#[from] gdal::errors::GdalError),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    CsvError(#[from] csv::Error),
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    #[error("No directory was supplied")]
    NoDirectory,
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),
    #[error("No GeoTIFF files found in {0}")]
    NoRasterFiles(PathBuf),
    #[error("Band {index} requested but raster has {count} bands")]
    BandOutOfRange { index: usize, count: usize },
    #[error("No raster registered at {0}")]
    UnknownRaster(PathBuf),
}
