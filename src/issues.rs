use std::fmt::Display;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IssueKind {
    MissingCrs,
    MissingNoData,
    SuspiciousValues,
    FileTooSmall,
    FileTooLarge,
    ReadError,
    /// Band 1 could not be read, the rest of the file metadata is still valid.
    BandStatisticsError,
}

/// Quality problem found in one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityIssue {
    pub file_name: String,
    pub kind: IssueKind,
    pub message: String,
}

impl QualityIssue {
    pub fn new(file_name: impl Into<String>, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn missing_crs(file_name: &str) -> Self {
        Self::new(file_name, IssueKind::MissingCrs, "Missing CRS")
    }

    pub fn missing_nodata(file_name: &str) -> Self {
        Self::new(file_name, IssueKind::MissingNoData, "No NoData value defined")
    }

    pub fn suspicious_values(file_name: &str, min: f64, max: f64) -> Self {
        Self::new(
            file_name,
            IssueKind::SuspiciousValues,
            format!("Suspicious data values (min: {min:.2}, max: {max:.2})"),
        )
    }

    pub fn file_too_small(file_name: &str, size_mib: f64) -> Self {
        Self::new(
            file_name,
            IssueKind::FileTooSmall,
            format!("Very small file size ({size_mib:.2} MB)"),
        )
    }

    pub fn file_too_large(file_name: &str, size_mib: f64) -> Self {
        Self::new(
            file_name,
            IssueKind::FileTooLarge,
            format!("Very large file size ({size_mib:.2} MB)"),
        )
    }

    pub fn read_error(file_name: &str, error: impl Display) -> Self {
        Self::new(
            file_name,
            IssueKind::ReadError,
            format!("Error reading file - {error}"),
        )
    }

    pub fn band_statistics_error(file_name: &str, error: impl Display) -> Self {
        Self::new(
            file_name,
            IssueKind::BandStatisticsError,
            format!("Band statistics error: {error}"),
        )
    }
}

impl Display for QualityIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.file_name, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn suspicious_message_has_two_decimals() {
        let issue = QualityIssue::suspicious_values("a.tif", -5000., 12.5);
        assert_eq!(
            issue.to_string(),
            "a.tif: Suspicious data values (min: -5000.00, max: 12.50)"
        );
    }

    #[rstest]
    fn read_error_carries_cause() {
        let issue = QualityIssue::read_error("b.tif", "not a TIFF");
        assert_eq!(issue.kind, IssueKind::ReadError);
        assert_eq!(issue.message, "Error reading file - not a TIFF");
    }
}
