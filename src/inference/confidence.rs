use serde::{Deserialize, Serialize};

/// Confidence as the inference service sends it: `73.5` or `"73.5%"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawConfidence {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unreadable confidence value: '{0}'")]
pub struct ConfidenceError(pub String);

/// A confidence percentage in `0.0..=100.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Confidence(f64);

impl Confidence {
    /// Normalize either wire form. Out-of-range values are clamped.
    pub fn parse(raw: &RawConfidence) -> Result<Self, ConfidenceError> {
        let value = match raw {
            RawConfidence::Number(n) => *n,
            RawConfidence::Text(text) => {
                let trimmed = text.trim();
                trimmed
                    .strip_suffix('%')
                    .unwrap_or(trimmed)
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| ConfidenceError(text.clone()))?
            }
        };
        if !value.is_finite() {
            return Err(ConfidenceError(value.to_string()));
        }
        Ok(Self(value.clamp(0.0, 100.0)))
    }

    pub fn percent(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_and_number_render_identically() {
        let from_text = Confidence::parse(&RawConfidence::Text("73.5%".into())).unwrap();
        let from_number = Confidence::parse(&RawConfidence::Number(73.5)).unwrap();
        assert_eq!(from_text, from_number);
        assert_eq!(from_text.to_string(), "73.5%");
        assert_eq!(from_number.to_string(), "73.5%");
    }

    #[test]
    fn bare_numeric_string_accepted() {
        let c = Confidence::parse(&RawConfidence::Text(" 99.9 ".into())).unwrap();
        assert_eq!(c.percent(), 99.9);
    }

    #[test]
    fn whole_numbers_keep_one_decimal() {
        let c = Confidence::parse(&RawConfidence::Number(80.0)).unwrap();
        assert_eq!(c.to_string(), "80.0%");
    }

    #[test]
    fn garbage_is_error() {
        assert!(Confidence::parse(&RawConfidence::Text("high".into())).is_err());
        assert!(Confidence::parse(&RawConfidence::Text("%".into())).is_err());
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(Confidence::parse(&RawConfidence::Number(140.0)).unwrap().percent(), 100.0);
        assert_eq!(Confidence::parse(&RawConfidence::Number(-2.0)).unwrap().percent(), 0.0);
    }

    #[test]
    fn deserializes_both_wire_forms() {
        let n: RawConfidence = serde_json::from_str("73.5").unwrap();
        let s: RawConfidence = serde_json::from_str("\"73.5%\"").unwrap();
        assert_eq!(n, RawConfidence::Number(73.5));
        assert_eq!(s, RawConfidence::Text("73.5%".into()));
    }
}
