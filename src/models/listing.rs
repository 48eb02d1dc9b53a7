use serde::{Deserialize, Serialize};

use super::ids::RecordId;

/// A dog posted for adoption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionListing {
    #[serde(alias = "_id")]
    pub id: RecordId,
    pub name: String,
    pub age: u32,
    pub breed: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_email: Option<String>,
}

/// Payload for `POST /api/dogs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub name: String,
    pub age: u32,
    pub breed: String,
    pub description: String,
    pub location: String,
    /// Either an http(s) URL or a `data:` URL.
    pub image: String,
    pub owner_email: String,
}

impl AdoptionListing {
    /// "1 year" / "3 years".
    pub fn age_label(&self) -> String {
        if self.age == 1 {
            "1 year".to_string()
        } else {
            format!("{} years", self.age)
        }
    }

    /// Whether the image is inlined rather than linked.
    pub fn has_embedded_image(&self) -> bool {
        self.image.starts_with("data:")
    }
}

impl NewListing {
    /// Materialize as a stored record (used by in-memory backends).
    pub fn into_listing(self, id: RecordId) -> AdoptionListing {
        AdoptionListing {
            id,
            name: self.name,
            age: self.age,
            breed: self.breed,
            description: self.description,
            location: self.location,
            image: self.image,
            owner_email: Some(self.owner_email),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn listing(id: &str, name: &str, age: u32) -> AdoptionListing {
        AdoptionListing {
            id: RecordId::from(id),
            name: name.into(),
            age,
            breed: "Golden Retriever".into(),
            description: "Friendly and energetic, loves to play fetch!".into(),
            location: "Los Angeles, CA".into(),
            image: "https://example.com/dog.jpg".into(),
            owner_email: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::listing;
    use super::*;

    #[test]
    fn age_label_singular_and_plural() {
        assert_eq!(listing("1", "Max", 1).age_label(), "1 year");
        assert_eq!(listing("2", "Buddy", 3).age_label(), "3 years");
        assert_eq!(listing("3", "Pup", 0).age_label(), "0 years");
    }

    #[test]
    fn deserializes_with_optional_fields_missing() {
        let json = r#"{"id": 2, "name": "Luna", "age": 2, "breed": "Husky"}"#;
        let parsed: AdoptionListing = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.id.as_str(), "2");
        assert!(parsed.description.is_empty());
        assert!(parsed.owner_email.is_none());
    }

    #[test]
    fn negative_age_is_rejected() {
        let json = r#"{"id": 2, "name": "Luna", "age": -1, "breed": "Husky"}"#;
        assert!(serde_json::from_str::<AdoptionListing>(json).is_err());
    }

    #[test]
    fn new_listing_uses_camel_case_owner_email() {
        let payload = NewListing {
            name: "Rex".into(),
            age: 4,
            breed: "Beagle".into(),
            description: "Calm".into(),
            location: "Austin, TX".into(),
            image: "https://example.com/rex.jpg".into(),
            owner_email: "owner@example.com".into(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["ownerEmail"], "owner@example.com");
    }

    #[test]
    fn embedded_image_detected() {
        let mut dog = listing("1", "Max", 1);
        assert!(!dog.has_embedded_image());
        dog.image = "data:image/png;base64,AAAA".into();
        assert!(dog.has_embedded_image());
    }
}
