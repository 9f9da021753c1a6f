use std::path::{Path, PathBuf};

use crate::{
    components::{band::MaskedBand, file::RasterFile, transforms::PixelTransform},
    errors::{RasterQaError, Result},
};

/// Implementations for gdal
pub mod gdal_backend {
    use super::*;
    use gdal::{
        errors::Result as GdalResult,
        raster::{GdalDataType, RasterBand},
        Dataset as GdalDataset,
    };
    use log::warn;

    #[derive(Debug)]
    pub struct GdalFile {
        path: PathBuf,
        dataset: GdalDataset,
    }

    impl GdalFile {
        pub fn dataset(&self) -> &GdalDataset {
            &self.dataset
        }
    }

    impl RasterFile for GdalFile {
        fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
            Ok(GdalFile {
                path: path.as_ref().to_path_buf(),
                dataset: GdalDataset::open(&path)?,
            })
        }
        fn path(&self) -> &Path {
            &self.path
        }
        fn size(&self) -> (usize, usize) {
            self.dataset.raster_size()
        }
        fn num_bands(&self) -> usize {
            self.dataset.raster_count()
        }
        fn data_types(&self) -> Result<Vec<String>> {
            let bands = self.dataset.rasterbands().collect::<GdalResult<Vec<_>>>()?;
            Ok(bands.iter().map(|band| band.band_type().name()).collect())
        }
        fn crs(&self) -> Option<String> {
            let projection = self.dataset.projection();
            if projection.is_empty() {
                return None;
            }
            let descriptor = self.dataset.spatial_ref().ok().and_then(|spatial_ref| {
                match (spatial_ref.auth_name(), spatial_ref.auth_code()) {
                    (Some(name), Ok(code)) => Some(format!("{name}:{code}")),
                    _ => spatial_ref.to_wkt().ok(),
                }
            });
            Some(descriptor.unwrap_or(projection))
        }
        fn transform(&self) -> Result<PixelTransform> {
            match self.dataset.geo_transform() {
                Ok(gdal_transform) => Ok(PixelTransform::from_gdal(gdal_transform)),
                Err(err) => {
                    warn!(
                        "{} has no geotransform ({err}), using identity",
                        self.path.display()
                    );
                    Ok(PixelTransform::from_gdal(PixelTransform::IDENTITY))
                }
            }
        }
        fn nodata(&self) -> Option<f64> {
            self.dataset
                .rasterband(1)
                .ok()
                .and_then(|band| band.no_data_value())
        }
        fn read_band_masked(&self, index: usize) -> Result<MaskedBand> {
            let count = self.num_bands();
            if index == 0 || index > count {
                return Err(RasterQaError::BandOutOfRange { index, count });
            }
            let band = self.dataset.rasterband(index)?;
            let nodata = nodata_in_band_type(&band);
            let buffer = band.read_band_as::<f64>()?;
            Ok(MaskedBand::mask(buffer.data().iter().copied(), nodata))
        }
    }

    /// Nodata as it compares against pixels widened to `f64`.
    ///
    /// Float32 pixels carry the nodata rounded to `f32`, so `-3.4e38` only
    /// matches once it went through the same rounding.
    fn nodata_in_band_type(band: &RasterBand) -> Option<f64> {
        let nodata = band.no_data_value()?;
        match band.band_type() {
            GdalDataType::Float32 => Some(nodata as f32 as f64),
            _ => Some(nodata),
        }
    }
}
