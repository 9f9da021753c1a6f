use itertools::{Itertools, MinMaxResult};
use serde::Serialize;

/// Samples of one band with nodata pixels removed.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedBand {
    valid: Vec<f64>,
    total_pixels: usize,
}

impl MaskedBand {
    /// Masks every pixel equal to `nodata`. A NaN `nodata` masks NaN pixels.
    pub fn mask(pixels: impl IntoIterator<Item = f64>, nodata: Option<f64>) -> Self {
        let mut total_pixels = 0;
        let valid = pixels
            .into_iter()
            .inspect(|_| total_pixels += 1)
            .filter(|pixel| match nodata {
                Some(nodata) if nodata.is_nan() => !pixel.is_nan(),
                Some(nodata) => *pixel != nodata,
                None => true,
            })
            .collect();
        Self {
            valid,
            total_pixels,
        }
    }

    pub fn valid(&self) -> &[f64] {
        &self.valid
    }

    pub fn valid_pixels(&self) -> usize {
        self.valid.len()
    }

    pub fn total_pixels(&self) -> usize {
        self.total_pixels
    }

    pub fn statistics(&self) -> Option<BandStatistics> {
        BandStatistics::from_masked(self)
    }
}

/// Statistics over the valid pixels of a band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    pub valid_pixels: usize,
    pub total_pixels: usize,
}

impl BandStatistics {
    /// `None` when the band has no valid pixel.
    pub fn from_masked(band: &MaskedBand) -> Option<Self> {
        let (min, max) = match band.valid().iter().copied().minmax() {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(value) => (value, value),
            MinMaxResult::MinMax(min, max) => (min, max),
        };
        let (mean, std) = mean_and_std(band.valid())?;
        Some(Self {
            min,
            max,
            mean,
            std,
            valid_pixels: band.valid_pixels(),
            total_pixels: band.total_pixels(),
        })
    }

    pub fn nodata_pixels(&self) -> usize {
        self.total_pixels - self.valid_pixels
    }

    /// Share of valid pixels, in percent.
    pub fn coverage_percent(&self) -> f64 {
        self.valid_pixels as f64 / self.total_pixels as f64 * 100.
    }

    pub fn is_suspicious(&self, min_threshold: f64, max_threshold: f64) -> bool {
        self.min < min_threshold || self.max > max_threshold
    }
}

/// Mean and population standard deviation, `None` for an empty slice.
pub fn mean_and_std(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / count;
    Some((mean, variance.sqrt()))
}
