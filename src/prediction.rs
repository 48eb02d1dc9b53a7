//! Skin-condition prediction for owners: an uploaded photo or a typed
//! symptom description goes to the inference service, and the returned
//! label is joined with the local care table.

use std::path::Path;
use std::str::FromStr;

use crate::core_state::CoreState;
use crate::error::{AppError, FormError};
use crate::inference::Prediction;
use crate::models::{ImageUpload, UnknownVariant};
use crate::router::View;

/// Input mode. The two tabs are mutually exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PredictTab {
    #[default]
    Upload,
    Symptoms,
}

impl FromStr for PredictTab {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upload" | "image" => Ok(Self::Upload),
            "symptoms" | "text" => Ok(Self::Symptoms),
            other => Err(UnknownVariant {
                kind: "PredictTab",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Default)]
pub struct PredictForm {
    tab: PredictTab,
    image: Option<ImageUpload>,
    symptoms: String,
    result: Option<Prediction>,
}

impl PredictForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> PredictTab {
        self.tab
    }

    pub fn image(&self) -> Option<&ImageUpload> {
        self.image.as_ref()
    }

    pub fn symptoms(&self) -> &str {
        &self.symptoms
    }

    /// Last successful prediction for the current input.
    pub fn result(&self) -> Option<&Prediction> {
        self.result.as_ref()
    }

    pub fn select_tab(&mut self, tab: PredictTab) {
        if self.tab != tab {
            self.tab = tab;
            self.result = None;
        }
    }

    /// Pick a new photo. Clears the previous prediction.
    pub fn select_image(&mut self, image: ImageUpload) {
        self.tab = PredictTab::Upload;
        self.image = Some(image);
        self.result = None;
    }

    pub fn select_image_file(&mut self, path: &Path) -> Result<(), AppError> {
        let image = ImageUpload::from_path(path)?;
        if image.is_empty() {
            return Err(FormError::NoImageSelected.into());
        }
        if !image.is_image() {
            return Err(FormError::NotAnImage(image.file_name).into());
        }
        self.select_image(image);
        Ok(())
    }

    pub fn set_symptoms(&mut self, text: &str) {
        self.tab = PredictTab::Symptoms;
        self.symptoms = text.to_string();
        self.result = None;
    }

    /// Send the active tab's input for inference.
    ///
    /// Empty input is reported without contacting the service.
    pub fn submit(&mut self, state: &CoreState) -> Result<&Prediction, AppError> {
        state.ensure_access(View::Predict)?;

        let raw = match self.tab {
            PredictTab::Upload => {
                let image = self.image.as_ref().ok_or(FormError::NoImageSelected)?;
                tracing::info!(file = %image.file_name, bytes = image.len(), "Predicting from image");
                state.inference().predict_image(image)?
            }
            PredictTab::Symptoms => {
                let text = self.symptoms.trim();
                if text.is_empty() {
                    return Err(FormError::NoSymptoms.into());
                }
                tracing::info!(chars = text.len(), "Predicting from symptoms");
                state.inference().predict_text(text)?
            }
        };

        let prediction = Prediction::from_raw(raw)?;
        tracing::info!(
            disease = %prediction.disease,
            confidence = %prediction.confidence,
            "Prediction received"
        );
        Ok(&*self.result.insert(prediction))
    }
}
