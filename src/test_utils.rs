//! In-memory [RasterFile] for tests that should not depend on gdal files.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Mutex, OnceLock},
};

use crate::{
    components::{band::MaskedBand, file::RasterFile, transforms::PixelTransform},
    errors::{RasterQaError, Result},
};

fn registry() -> &'static Mutex<HashMap<PathBuf, RasterSpec>> {
    static REGISTRY: OnceLock<Mutex<HashMap<PathBuf, RasterSpec>>> = OnceLock::new();
    REGISTRY.get_or_init(Default::default)
}

/// Description of a fake raster, opened through [MemoryRaster::open].
#[derive(Debug, Clone)]
pub struct RasterSpec {
    size: (usize, usize),
    data_type: String,
    crs: Option<String>,
    transform: [f64; 6],
    nodata: Option<f64>,
    file_size: u64,
    bands: Vec<Vec<f64>>,
    band_error: Option<String>,
    /// Remaining successful opens, unlimited when `None`.
    opens: Option<usize>,
}

impl RasterSpec {
    /// `width x height` raster of ones in EPSG:4326, unit pixels with origin
    /// at `(0, height)`, nodata `-9999` and a 2 MiB file size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            size: (width, height),
            data_type: "Float32".into(),
            crs: Some("EPSG:4326".into()),
            transform: [0., 1., 0., height as f64, 0., -1.],
            nodata: Some(-9999.),
            file_size: 2 * 1024 * 1024,
            bands: vec![vec![1.; width * height]],
            band_error: None,
            opens: None,
        }
    }

    pub fn crs(mut self, crs: Option<&str>) -> Self {
        self.crs = crs.map(String::from);
        self
    }

    pub fn transform(mut self, transform: [f64; 6]) -> Self {
        self.transform = transform;
        self
    }

    /// Places the raster so it covers `(left, bottom, right, top)`.
    pub fn bounds(self, left: f64, bottom: f64, right: f64, top: f64) -> Self {
        let (width, height) = (self.size.0 as f64, self.size.1 as f64);
        self.transform([
            left,
            (right - left) / width,
            0.,
            top,
            0.,
            -(top - bottom) / height,
        ])
    }

    pub fn nodata(mut self, nodata: Option<f64>) -> Self {
        self.nodata = nodata;
        self
    }

    pub fn file_size(mut self, bytes: u64) -> Self {
        self.file_size = bytes;
        self
    }

    pub fn pixels(mut self, pixels: Vec<f64>) -> Self {
        self.bands = vec![pixels];
        self
    }

    pub fn without_bands(mut self) -> Self {
        self.bands.clear();
        self
    }

    pub fn band_error(mut self, message: &str) -> Self {
        self.band_error = Some(message.into());
        self
    }

    pub fn opens(mut self, count: usize) -> Self {
        self.opens = Some(count);
        self
    }

    pub fn register(self, path: impl AsRef<Path>) {
        registry()
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf(), self);
    }
}

#[derive(Debug)]
pub struct MemoryRaster {
    path: PathBuf,
    spec: RasterSpec,
}

impl RasterFile for MemoryRaster {
    fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut registry = registry().lock().unwrap();
        let spec = registry
            .get_mut(&path)
            .ok_or_else(|| RasterQaError::UnknownRaster(path.clone()))?;
        match spec.opens.as_mut() {
            Some(0) => return Err(RasterQaError::UnknownRaster(path)),
            Some(opens) => *opens -= 1,
            None => (),
        }
        Ok(Self {
            spec: spec.clone(),
            path,
        })
    }
    fn path(&self) -> &Path {
        &self.path
    }
    fn size(&self) -> (usize, usize) {
        self.spec.size
    }
    fn num_bands(&self) -> usize {
        self.spec.bands.len()
    }
    fn data_types(&self) -> Result<Vec<String>> {
        Ok(vec![self.spec.data_type.clone(); self.num_bands()])
    }
    fn crs(&self) -> Option<String> {
        self.spec.crs.clone()
    }
    fn transform(&self) -> Result<PixelTransform> {
        Ok(PixelTransform::from_gdal(self.spec.transform))
    }
    fn nodata(&self) -> Option<f64> {
        self.spec.nodata
    }
    fn read_band_masked(&self, index: usize) -> Result<MaskedBand> {
        if let Some(message) = &self.spec.band_error {
            return Err(std::io::Error::other(message.clone()).into());
        }
        let count = self.num_bands();
        let pixels = index
            .checked_sub(1)
            .and_then(|idx| self.spec.bands.get(idx))
            .ok_or(RasterQaError::BandOutOfRange { index, count })?;
        Ok(MaskedBand::mask(pixels.iter().copied(), self.spec.nodata))
    }
    fn file_size(&self) -> Result<u64> {
        Ok(self.spec.file_size)
    }
}
