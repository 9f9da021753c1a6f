use std::{fmt::Debug, path::Path};

use crate::{
    components::{band::MaskedBand, bounds::GeoBounds, transforms::PixelTransform},
    errors::Result,
};

/// Read-only view on an opened raster file.
///
/// The handle owns the underlying dataset, dropping it closes the file.
pub trait RasterFile: Debug + Sized {
    fn open<P: AsRef<Path>>(path: P) -> Result<Self>;
    fn path(&self) -> &Path;
    /// (width, height) in pixels.
    fn size(&self) -> (usize, usize);
    fn num_bands(&self) -> usize;
    /// Pixel data type name of each band.
    fn data_types(&self) -> Result<Vec<String>>;
    /// Crs descriptor, `None` when the file has no crs.
    fn crs(&self) -> Option<String>;
    fn transform(&self) -> Result<PixelTransform>;
    /// Nodata value of the first band.
    fn nodata(&self) -> Option<f64>;
    /// Pixels of band `index` (1 based) with nodata masked out.
    fn read_band_masked(&self, index: usize) -> Result<MaskedBand>;

    fn bounds(&self) -> Result<GeoBounds> {
        Ok(self.transform()?.bounds(self.size()))
    }

    fn file_size(&self) -> Result<u64> {
        Ok(std::fs::metadata(self.path())?.len())
    }

    fn file_name(&self) -> String {
        file_name(self.path())
    }
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
