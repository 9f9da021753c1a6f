//! Thresholds and run options of an analysis.

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

const MIB: f64 = 1024. * 1024.;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Band minimum below this flags suspicious values.
    pub suspicious_min: f64,
    /// Band maximum above this flags suspicious values.
    pub suspicious_max: f64,
    pub min_file_size_mib: f64,
    pub max_file_size_mib: f64,
    /// Matched case-insensitively, without the leading dot.
    pub extensions: Vec<String>,
    /// Analyze files on the rayon pool. Output order does not depend on it.
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            suspicious_min: -1000.,
            suspicious_max: 10000.,
            min_file_size_mib: 1.,
            max_file_size_mib: 1000.,
            extensions: vec!["tif".into(), "tiff".into()],
            parallel: true,
        }
    }
}

impl AnalysisConfig {
    /// Reads a json config, missing keys take their default.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        debug!("loaded {config:?} from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| {
                self.extensions
                    .iter()
                    .any(|accepted| accepted.eq_ignore_ascii_case(extension))
            })
    }
}

pub fn bytes_to_mib(bytes: u64) -> f64 {
    bytes as f64 / MIB
}
