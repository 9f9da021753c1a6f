//! Remediation advice derived from a finished corpus.

use serde::Serialize;

use crate::{corpus::Corpus, issues::IssueKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecommendationKind {
    CrsStandardization,
    PixelSizeHarmonization,
    MissingCrsCorrection,
    General,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub title: &'static str,
    pub actions: Vec<&'static str>,
}

impl Recommendation {
    fn new(kind: RecommendationKind) -> Self {
        let (title, actions) = match kind {
            RecommendationKind::CrsStandardization => (
                "COORDINATE SYSTEM STANDARDIZATION",
                vec![
                    "Reproject all files to a common CRS",
                    "Consider using UTM zone appropriate for your area",
                ],
            ),
            RecommendationKind::PixelSizeHarmonization => (
                "PIXEL SIZE HARMONIZATION",
                vec![
                    "Resample files to consistent pixel size",
                    "Use appropriate resampling method (bilinear, cubic, etc.)",
                ],
            ),
            RecommendationKind::MissingCrsCorrection => (
                "MISSING CRS CORRECTION",
                vec![
                    "Define appropriate coordinate system for files missing CRS",
                    "Verify spatial alignment after CRS assignment",
                ],
            ),
            RecommendationKind::General => (
                "GENERAL RECOMMENDATIONS",
                vec![
                    "Create backup copies before processing",
                    "Validate results after any transformations",
                    "Consider creating a mosaic for seamless coverage",
                    "Document all processing steps for reproducibility",
                ],
            ),
        };
        Self {
            kind,
            title,
            actions,
        }
    }
}

/// Processing recommendations, in fixed order. General advice always closes the list.
pub fn recommend(corpus: &Corpus) -> Vec<Recommendation> {
    [
        (corpus.has_mixed_crs(), RecommendationKind::CrsStandardization),
        (
            corpus.has_mixed_pixel_sizes(),
            RecommendationKind::PixelSizeHarmonization,
        ),
        (
            corpus.has_issue(IssueKind::MissingCrs),
            RecommendationKind::MissingCrsCorrection,
        ),
        (true, RecommendationKind::General),
    ]
    .into_iter()
    .filter_map(|(triggered, kind)| triggered.then(|| Recommendation::new(kind)))
    .collect()
}

/// Short remediation hints listed below the quality issues, one per triggered rule.
pub fn issue_hints(corpus: &Corpus) -> Vec<&'static str> {
    [
        (
            corpus.has_issue(IssueKind::MissingCrs),
            "Define coordinate reference system for files missing CRS",
        ),
        (
            corpus.has_issue(IssueKind::MissingNoData),
            "Set appropriate NoData values for better data handling",
        ),
        (
            corpus.has_issue(IssueKind::SuspiciousValues),
            "Review data values for potential errors or outliers",
        ),
        (
            corpus.has_mixed_crs(),
            "Consider reprojecting all files to a common CRS",
        ),
        (
            corpus.has_mixed_pixel_sizes(),
            "Consider resampling to consistent pixel size",
        ),
    ]
    .into_iter()
    .filter_map(|(triggered, hint)| triggered.then_some(hint))
    .collect()
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

    fn corpus(files: Vec<(&str, RasterSpec)>) -> Corpus {
        files
            .into_iter()
            .map(|(name, spec)| {
                let path = format!("/memory/recommendations/{name}");
                spec.register(&path);
                analyze_path::<MemoryRaster>(&path, &AnalysisConfig::default())
            })
            .collect::<CorpusState>()
            .finalize()
    }

    fn kinds(recommendations: &[Recommendation]) -> Vec<RecommendationKind> {
        recommendations.iter().map(|rec| rec.kind).collect()
    }

    #[rstest]
    fn mixed_crs_triggers_reprojection() {
        let corpus = corpus(vec![
            ("mixed_a.tif", RasterSpec::new(1, 1)),
            ("mixed_b.tif", RasterSpec::new(1, 1)),
            ("mixed_c.tif", RasterSpec::new(1, 1).crs(Some("EPSG:3857"))),
        ]);
        assert_eq!(
            kinds(&recommend(&corpus)),
            vec![
                RecommendationKind::CrsStandardization,
                RecommendationKind::General
            ]
        );
        assert_eq!(
            issue_hints(&corpus),
            vec!["Consider reprojecting all files to a common CRS"]
        );
    }

    #[rstest]
    fn single_crs_only_general_advice() {
        let corpus = corpus(vec![
            ("single_a.tif", RasterSpec::new(1, 1)),
            ("single_b.tif", RasterSpec::new(1, 1)),
        ]);
        let recommendations = recommend(&corpus);
        assert_eq!(kinds(&recommendations), vec![RecommendationKind::General]);
        assert_eq!(recommendations[0].actions.len(), 4);
        assert!(issue_hints(&corpus).is_empty());
    }

    #[rstest]
    fn every_rule_fires_once_in_order() {
        let corpus = corpus(vec![
            ("all_a.tif", RasterSpec::new(1, 1).crs(None).nodata(None)),
            (
                "all_b.tif",
                RasterSpec::new(1, 1)
                    .crs(None)
                    .pixels(vec![20000.])
                    .transform([0., 2., 0., 0., 0., -2.]),
            ),
            ("all_c.tif", RasterSpec::new(1, 1)),
        ]);
        assert_eq!(
            kinds(&recommend(&corpus)),
            vec![
                RecommendationKind::CrsStandardization,
                RecommendationKind::PixelSizeHarmonization,
                RecommendationKind::MissingCrsCorrection,
                RecommendationKind::General,
            ]
        );
        assert_eq!(issue_hints(&corpus).len(), 5);
    }
}
