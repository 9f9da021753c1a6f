pub mod backends;
pub mod band;
pub mod bounds;
pub mod file;
pub mod transforms;

pub use backends::gdal_backend::GdalFile;
pub use band::{BandStatistics, MaskedBand};
pub use bounds::GeoBounds;
pub use file::RasterFile;
pub use transforms::PixelTransform;
