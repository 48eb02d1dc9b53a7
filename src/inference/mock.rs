use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{InferenceClient, InferenceError, RawConfidence, RawPrediction};
use crate::api::ApiError;
use crate::models::ImageUpload;

/// Mock inference client for testing: returns a configurable response.
pub struct MockInferenceClient {
    response: Mutex<Result<RawPrediction, InferenceError>>,
    calls: AtomicUsize,
}

impl MockInferenceClient {
    pub fn new(disease: &str, confidence: RawConfidence) -> Self {
        Self {
            response: Mutex::new(Ok(RawPrediction {
                disease: disease.to_string(),
                confidence,
            })),
            calls: AtomicUsize::new(0),
        }
    }

    /// Every call fails with a 500 carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            response: Mutex::new(Err(InferenceError::Transport(ApiError::Status {
                status: 500,
                message: message.to_string(),
            }))),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn respond(&self) -> Result<RawPrediction, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response
            .lock()
            .map_err(|_| InferenceError::Transport(ApiError::HttpClient("mock poisoned".into())))?
            .clone()
    }
}

impl InferenceClient for MockInferenceClient {
    fn predict_image(&self, _image: &ImageUpload) -> Result<RawPrediction, InferenceError> {
        self.respond()
    }

    fn predict_text(&self, _text: &str) -> Result<RawPrediction, InferenceError> {
        self.respond()
    }
}
