//! Quality bands for presenting scores.
//!
//! Both metrics are "lower is better". A score falls in the first band whose
//! upper threshold it is strictly below, so a score equal to a threshold
//! belongs to the next (worse) band.

use std::fmt;

use crate::observe::Metric;

/// Four-step quality rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Rating {
    /// All ratings, best first.
    pub const ALL: [Rating; 4] = [Self::Excellent, Self::Good, Self::Fair, Self::Poor];

    /// Lowercase label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }

    /// Display colour as RGB.
    #[must_use]
    pub fn color(self) -> [u8; 3] {
        match self {
            Self::Excellent => [0, 200, 0],
            Self::Good => [120, 200, 0],
            Self::Fair => [230, 180, 0],
            Self::Poor => [220, 0, 0],
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Score thresholds and descriptions for one metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingScale {
    /// Upper (exclusive) bounds of excellent, good and fair.
    pub thresholds: [f64; 3],
    /// Human-readable description per rating, best first.
    pub descriptions: [&'static str; 4],
}

impl RatingScale {
    /// Naturalness bands: < 3, < 4, < 6.
    pub const NATURALNESS: RatingScale = RatingScale {
        thresholds: [3.0, 4.0, 6.0],
        descriptions: [
            "Indistinguishable from natural images",
            "Mostly natural appearance",
            "Visible unnatural artifacts",
            "Strongly unnatural appearance",
        ],
    };

    /// Lightness-order bands: < 35, < 50, < 65.
    pub const LIGHTNESS_ORDER: RatingScale = RatingScale {
        thresholds: [35.0, 50.0, 65.0],
        descriptions: [
            "Lightness order preserved",
            "Minor lightness order changes",
            "Noticeable lightness order distortion",
            "Lightness order largely lost",
        ],
    };

    /// Scale for a metric.
    #[must_use]
    pub fn for_metric(metric: Metric) -> &'static RatingScale {
        match metric {
            Metric::Naturalness => &Self::NATURALNESS,
            Metric::LightnessOrder => &Self::LIGHTNESS_ORDER,
        }
    }

    /// Rates a score. NaN rates as poor.
    #[must_use]
    pub fn rate(&self, score: f64) -> Rating {
        self.thresholds
            .iter()
            .zip(Rating::ALL)
            .find(|(threshold, _)| score < **threshold)
            .map_or(Rating::Poor, |(_, rating)| rating)
    }

    /// Description for a rating.
    #[must_use]
    pub fn describe(&self, rating: Rating) -> &'static str {
        self.descriptions[rating as usize]
    }
}
