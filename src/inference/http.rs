use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use serde::Serialize;

use super::{InferenceClient, InferenceError, RawPrediction};
use crate::api::transport::{build_client, decode, execute};
use crate::api::ApiError;
use crate::config::{normalize_base_url, ClientConfig};
use crate::models::ImageUpload;

/// Blocking HTTP client for the inference service.
pub struct HttpInferenceClient {
    base_url: String,
    client: Client,
}

#[derive(Serialize)]
struct TextPredictRequest<'a> {
    text: &'a str,
}

impl HttpInferenceClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: normalize_base_url(base_url),
            client: build_client(timeout)?,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::new(&config.inference_base_url, config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl InferenceClient for HttpInferenceClient {
    fn predict_image(&self, image: &ImageUpload) -> Result<RawPrediction, InferenceError> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)
            .map_err(|e| ApiError::HttpClient(e.to_string()))?;
        let form = Form::new().part("image", part);

        let url = format!("{}/predict_image", self.base_url);
        let body = execute(self.client.post(url).multipart(form), &self.base_url)?;
        Ok(decode(body, "image prediction")?)
    }

    fn predict_text(&self, text: &str) -> Result<RawPrediction, InferenceError> {
        let url = format!("{}/predict_text", self.base_url);
        let request = self.client.post(url).json(&TextPredictRequest { text });
        let body = execute(request, &self.base_url)?;
        Ok(decode(body, "text prediction")?)
    }
}
