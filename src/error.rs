//! Application-level errors. Their `Display` text is what the user sees as
//! an alert when a foreground action fails.

use crate::api::ApiError;
use crate::inference::InferenceError;
use crate::models::{TransitionError, UnknownVariant};
use crate::router::View;

/// Client-side validation failures, caught before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Invalid date '{0}'. Use YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid time '{0}'. Use HH:MM")]
    InvalidTime(String),
    #[error("Age must be a whole number of years, got '{0}'")]
    InvalidAge(String),
    #[error("Image must be under {limit} bytes (selected file is {size} bytes)")]
    ImageTooLarge { size: usize, limit: usize },
    #[error("'{0}' is not an image file")]
    NotAnImage(String),
    #[error("Please select an image first.")]
    NoImageSelected,
    #[error("Please describe the symptoms.")]
    NoSymptoms,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("You do not have access to {0}")]
    Forbidden(View),
    #[error("Please log in to continue")]
    NotSignedIn,
    #[error("Appointment {0} not found")]
    AppointmentNotFound(String),
    #[error("Cannot read image: {0}")]
    ImageRead(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] UnknownVariant),
}
