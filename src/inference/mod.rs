//! Skin-condition inference: client trait, HTTP implementation, and the
//! post-processing that turns a raw label into something displayable.

pub mod confidence;
pub mod diseases;
pub mod http;
pub mod mock;

pub use confidence::{Confidence, ConfidenceError, RawConfidence};
pub use diseases::{DiseaseDetails, Severity};
pub use http::HttpInferenceClient;
pub use mock::MockInferenceClient;

use serde::Deserialize;

use crate::api::ApiError;
use crate::models::ImageUpload;

/// Errors from the inference round trip.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    #[error(transparent)]
    Transport(#[from] ApiError),
    #[error("Inference response has no disease label")]
    MissingLabel,
    #[error(transparent)]
    Confidence(#[from] ConfidenceError),
}

/// Body of a successful `/predict_*` call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPrediction {
    pub disease: String,
    pub confidence: RawConfidence,
}

/// Client for the external inference service.
pub trait InferenceClient: Send + Sync {
    /// `POST /predict_image` with the image as multipart field `image`.
    fn predict_image(&self, image: &ImageUpload) -> Result<RawPrediction, InferenceError>;

    /// `POST /predict_text` with `{text}`.
    fn predict_text(&self, text: &str) -> Result<RawPrediction, InferenceError>;
}

/// A prediction joined with local care guidance.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub disease: String,
    pub confidence: Confidence,
    pub severity: Severity,
    pub recommendation: &'static str,
}

impl Prediction {
    pub fn from_raw(raw: RawPrediction) -> Result<Self, InferenceError> {
        let disease = raw.disease.trim().to_string();
        if disease.is_empty() {
            return Err(InferenceError::MissingLabel);
        }
        let confidence = Confidence::parse(&raw.confidence)?;
        let details = diseases::lookup(&disease);
        Ok(Self {
            disease,
            confidence,
            severity: details.severity,
            recommendation: details.recommendation,
        })
    }

    pub fn display_name(&self) -> String {
        diseases::display_name(&self.disease)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_label_with_guidance() {
        let prediction = Prediction::from_raw(RawPrediction {
            disease: "Dermatitis".into(),
            confidence: RawConfidence::Text("88.2%".into()),
        })
        .unwrap();
        assert_eq!(prediction.severity, Severity::High);
        assert_eq!(prediction.confidence.to_string(), "88.2%");
        assert!(prediction.recommendation.contains("hot spots"));
    }

    #[test]
    fn unknown_label_still_displays() {
        let prediction = Prediction::from_raw(RawPrediction {
            disease: "Alopecia_x".into(),
            confidence: RawConfidence::Number(51.0),
        })
        .unwrap();
        assert_eq!(prediction.severity, Severity::Unknown);
        assert_eq!(prediction.display_name(), "Alopecia x");
    }

    #[test]
    fn blank_label_is_error() {
        let err = Prediction::from_raw(RawPrediction {
            disease: "  ".into(),
            confidence: RawConfidence::Number(10.0),
        })
        .unwrap_err();
        assert_eq!(err, InferenceError::MissingLabel);
    }

    #[test]
    fn bad_confidence_is_error() {
        let err = Prediction::from_raw(RawPrediction {
            disease: "Healthy".into(),
            confidence: RawConfidence::Text("n/a".into()),
        })
        .unwrap_err();
        assert!(matches!(err, InferenceError::Confidence(_)));
    }
}
