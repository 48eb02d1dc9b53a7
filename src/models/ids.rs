use serde::{Deserialize, Deserializer, Serialize};

/// Opaque record identifier.
///
/// Backends hand out either numeric ids (millisecond timestamps) or string
/// ids; both are kept as their decimal/string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Fresh random id, used by in-memory backends.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Self(n.to_string()),
            Raw::Text(s) => Self(s),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_id_becomes_decimal_string() {
        let id: RecordId = serde_json::from_str("1718000000123").unwrap();
        assert_eq!(id.as_str(), "1718000000123");
    }

    #[test]
    fn string_id_kept_verbatim() {
        let id: RecordId = serde_json::from_str("\"65f1c2ab\"").unwrap();
        assert_eq!(id, RecordId::from("65f1c2ab"));
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(RecordId::generate(), RecordId::generate());
    }
}
