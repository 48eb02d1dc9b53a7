//! Static care guidance keyed by the labels the inference service emits.

/// How urgently a condition needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    None,
    Low,
    Moderate,
    High,
    Unknown,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiseaseDetails {
    pub severity: Severity,
    pub recommendation: &'static str,
}

pub const UNKNOWN_RECOMMENDATION: &str = "Please consult a vet for specific advice.";

const DISEASE_TABLE: &[(&str, DiseaseDetails)] = &[
    (
        "ringworm",
        DiseaseDetails {
            severity: Severity::Moderate,
            recommendation: "Highly contagious. Isolate pet and wash hands after touching. Use antifungal shampoo or ointment prescribed by a vet.",
        },
    ),
    (
        "demodicosis",
        DiseaseDetails {
            severity: Severity::Moderate,
            recommendation: "Caused by mites. Requires veterinary diagnosis for specific miticide treatment. Immune support is often needed.",
        },
    ),
    (
        "Fungal_infections",
        DiseaseDetails {
            severity: Severity::Low,
            recommendation: "Keep the area dry and clean. Anti-fungal creams/sprays are usually effective. Check for underlying allergies.",
        },
    ),
    (
        "Dermatitis",
        DiseaseDetails {
            severity: Severity::High,
            recommendation: "Likely caused by infection or allergy. Look for hot spots. Antibiotics or steroids may be required to stop itching.",
        },
    ),
    (
        "Hypersensitivity",
        DiseaseDetails {
            severity: Severity::Low,
            recommendation: "Allergic reaction (fleas, food, or environment). Identification of the allergen is key. Antihistamines may help.",
        },
    ),
    (
        "Healthy",
        DiseaseDetails {
            severity: Severity::None,
            recommendation: "Great news! Your dog's skin looks healthy. Maintain regular grooming and check-ups.",
        },
    ),
];

/// Exact label match; anything else is `Unknown`.
pub fn lookup(label: &str) -> DiseaseDetails {
    DISEASE_TABLE
        .iter()
        .find(|(key, _)| *key == label)
        .map(|(_, details)| *details)
        .unwrap_or(DiseaseDetails {
            severity: Severity::Unknown,
            recommendation: UNKNOWN_RECOMMENDATION,
        })
}

/// Labels the table knows about, in table order.
pub fn known_labels() -> impl Iterator<Item = &'static str> {
    DISEASE_TABLE.iter().map(|(key, _)| *key)
}

/// `Fungal_infections` → `Fungal infections`.
pub fn display_name(label: &str) -> String {
    label.replace('_', " ")
}
