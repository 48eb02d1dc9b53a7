//! Posting a dog for adoption.
//!
//! The photo is either a link or a local file inlined as a `data:` URL.
//! Inlined files must be under [`config::MAX_EMBEDDED_IMAGE_BYTES`]; larger
//! selections are refused here, before anything is sent.

use std::path::Path;

use crate::config;
use crate::core_state::CoreState;
use crate::error::{AppError, FormError};
use crate::forms;
use crate::models::{AdoptionListing, ImageUpload, NewListing};
use crate::router::View;

pub const CONFIRMATION_TITLE: &str = "Dog Added!";
pub const CONFIRMATION_MESSAGE: &str = "Your dog has been listed for adoption.";

/// Where the listing photo comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListingImage {
    /// Falls back to the placeholder photo.
    #[default]
    None,
    Url(String),
    Embedded(ImageUpload),
}

impl ListingImage {
    /// Read a local photo for inlining. Oversized files are refused from
    /// their metadata without reading them.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let size = usize::try_from(std::fs::metadata(path)?.len()).unwrap_or(usize::MAX);
        if size >= config::MAX_EMBEDDED_IMAGE_BYTES {
            tracing::warn!(path = %path.display(), size, "Refusing oversized listing photo");
            return Err(FormError::ImageTooLarge {
                size,
                limit: config::MAX_EMBEDDED_IMAGE_BYTES,
            }
            .into());
        }
        Ok(Self::Embedded(ImageUpload::from_path(path)?))
    }

    /// The value sent in the `image` field.
    fn resolve(&self) -> Result<String, FormError> {
        match self {
            Self::None => Ok(config::PLACEHOLDER_DOG_IMAGE.to_string()),
            Self::Url(url) if url.trim().is_empty() => Ok(config::PLACEHOLDER_DOG_IMAGE.to_string()),
            Self::Url(url) => Ok(url.trim().to_string()),
            Self::Embedded(upload) => {
                if upload.len() >= config::MAX_EMBEDDED_IMAGE_BYTES {
                    return Err(FormError::ImageTooLarge {
                        size: upload.len(),
                        limit: config::MAX_EMBEDDED_IMAGE_BYTES,
                    });
                }
                if !upload.is_image() {
                    return Err(FormError::NotAnImage(upload.file_name.clone()));
                }
                Ok(upload.to_data_url())
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingForm {
    pub name: String,
    pub age: String,
    pub breed: String,
    pub description: String,
    pub location: String,
    pub image: ListingImage,
}

impl ListingForm {
    pub fn validate(&self, owner_email: &str) -> Result<NewListing, FormError> {
        let name = forms::require(&self.name, "Dog's name")?;
        let age_raw = forms::require(&self.age, "Age")?;
        let age = age_raw
            .parse::<u32>()
            .map_err(|_| FormError::InvalidAge(age_raw.clone()))?;
        let breed = forms::require(&self.breed, "Breed")?;
        let description = forms::require(&self.description, "Description")?;
        let location = forms::require(&self.location, "Location")?;
        let image = self.image.resolve()?;

        Ok(NewListing {
            name,
            age,
            breed,
            description,
            location,
            image,
            owner_email: owner_email.to_string(),
        })
    }
}

/// Validate, post with the owner's email, cache, then confirm.
pub fn submit(state: &mut CoreState, form: &ListingForm) -> Result<AdoptionListing, AppError> {
    state.ensure_access(View::AddDog)?;
    let owner_email = state
        .session()
        .map(|s| s.email.clone())
        .ok_or(AppError::NotSignedIn)?;
    let listing = form.validate(&owner_email)?;

    let created = state.api().create_listing(&listing)?;
    tracing::info!(id = %created.id, name = %created.name, "Dog listed for adoption");

    state.commit_listing(created.clone());
    state.show_confirmation(
        CONFIRMATION_TITLE,
        CONFIRMATION_MESSAGE,
        config::LISTING_CONFIRMATION,
    );
    Ok(created)
}
