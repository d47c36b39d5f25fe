//! Wire schemas for the enhancement service's response bodies.
//!
//! Success bodies are checked in two steps: the `success` flag first, then
//! the full [`EnhancementResult`] shape. Anything that does not match is
//! classified rather than trusted.

use enhancer_core::error::EnhanceError;
use enhancer_core::result::EnhancementResult;
use serde::Deserialize;

/// Error body returned with non-2xx responses.
///
/// `detail` is usually a string but may be a structured validation report.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

/// Minimal envelope used to read the `success` flag before the full shape.
#[derive(Debug, Deserialize)]
struct SuccessFlag {
    #[serde(default)]
    success: Option<bool>,
}

/// Message for a non-2xx response: the service's `detail` string when
/// present, otherwise one naming the status code.
pub fn service_error_message(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .and_then(|detail| match detail {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        })
        .unwrap_or_else(|| format!("Request failed with status {status}"))
}

/// Validate a 2xx body and turn it into an [`EnhancementResult`].
///
/// `enhanced_image_base64` is returned as sent (raw base64).
pub fn parse_success_body(status: u16, body: &[u8]) -> Result<EnhancementResult, EnhanceError> {
    let flag: SuccessFlag = serde_json::from_slice(body).map_err(|e| malformed(status, e))?;
    if flag.success != Some(true) {
        return Err(EnhanceError::LogicalFailure);
    }

    let result: EnhancementResult =
        serde_json::from_slice(body).map_err(|e| malformed(status, e))?;

    if !result.improvement_analysis.is_consistent() {
        let analysis = &result.improvement_analysis;
        return Err(EnhanceError::Service {
            status,
            message: format!(
                "Inconsistent improvement analysis from the enhancement service: \
                 improved={} with score_improvement={} and percentage_improvement={}",
                analysis.improved, analysis.score_improvement, analysis.percentage_improvement
            ),
        });
    }

    Ok(result)
}

fn malformed(status: u16, e: serde_json::Error) -> EnhanceError {
    EnhanceError::Service {
        status,
        message: format!("Malformed response from the enhancement service: {e}"),
    }
}
