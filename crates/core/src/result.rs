//! The enhancement result model shared by the client, the workflow
//! machine and the history ledger.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Result record
// ---------------------------------------------------------------------------

/// Canonical record of one completed enhancement.
///
/// `filename` is the identity key used by the history ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancementResult {
    pub filename: String,
    pub original_rating: OriginalRating,
    pub enhancement_info: EnhancementInfo,
    pub enhanced_rating: Rating,
    pub improvement_analysis: ImprovementAnalysis,
    /// Raw base64 payload on the wire; a full `data:` image reference once
    /// the client has re-wrapped it.
    pub enhanced_image_base64: String,
    pub success: bool,
    /// Fields the service sent beyond the documented shape, passed through
    /// untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Rating of the image as uploaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginalRating {
    pub raw_score: f64,
    pub quality_score: f64,
    /// Seconds spent rating.
    pub processing_time: f64,
    pub image_info: ImageInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// `None` when the service could not identify the container format.
    pub format: Option<String>,
    /// Pixel mode, e.g. `RGB` or `RGBA`.
    pub mode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancementInfo {
    /// `[width, height]` before upscaling.
    pub original_size: [u32; 2],
    /// `[width, height]` after upscaling.
    pub enhanced_size: [u32; 2],
    pub scale_factor: f64,
    /// Ratio of enhanced to original pixel count.
    pub size_increase: f64,
    /// Seconds spent enhancing.
    pub processing_time: f64,
}

/// Rating of the enhanced image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub raw_score: f64,
    pub quality_score: f64,
    pub processing_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementAnalysis {
    pub score_improvement: f64,
    pub percentage_improvement: f64,
    pub improved: bool,
}

impl ImprovementAnalysis {
    /// `improved` must agree with a positive score delta, and the
    /// percentage must never point the other way.
    ///
    /// A zero percentage alongside a positive delta is accepted: the
    /// service reports 0% when the original score is not positive.
    pub fn is_consistent(&self) -> bool {
        let improved_matches = self.improved == (self.score_improvement > 0.0);
        let signs_agree = self.percentage_improvement * self.score_improvement >= 0.0;
        improved_matches && signs_agree
    }
}

// ---------------------------------------------------------------------------
// Quality bands
// ---------------------------------------------------------------------------

/// Coarse bucket for a quality score on the observed 0–10 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityBand {
    Poor,
    Fair,
    Good,
}

/// Scores below this are [`QualityBand::Poor`].
pub const FAIR_THRESHOLD: f64 = 4.0;

/// Scores at or above this are [`QualityBand::Good`].
pub const GOOD_THRESHOLD: f64 = 7.0;

impl QualityBand {
    pub fn from_score(score: f64) -> Self {
        if score < FAIR_THRESHOLD {
            Self::Poor
        } else if score < GOOD_THRESHOLD {
            Self::Fair
        } else {
            Self::Good
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Fair => "Fair",
            Self::Good => "Good",
        }
    }
}
