use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

pub mod analytics;

/// One stored classification, as returned by `GET /api/records`.
///
/// Records are server-assigned and append-only from the client's point of
/// view: the client never mutates one, it only re-fetches the full set.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ClassificationRecord {
    /// Store-assigned identifier (Mongo-style `_id` on the wire).
    #[serde(rename = "_id", default)]
    pub id: String,
    pub waste_type: String,
    /// Heating-value estimate in MJ/kg.
    #[serde(default)]
    pub calorific_value: f64,
    /// Nominally "Low" / "Medium" / "High"; open set on the wire.
    pub carbon_impact: String,
    /// Disposal channel, e.g. "Recycling / Energy Recovery". May be empty.
    #[serde(default)]
    pub route: String,
    /// ISO-8601 creation time, server-assigned. Display ordering only.
    #[serde(default)]
    pub timestamp: String,
    /// Original upload filename, when the store kept one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
}

/// Immediate `POST /api/classify` response body.
///
/// Every field defaults: the response carries best-effort display values
/// with no `_id`/`timestamp`, and the subsequent history refresh is
/// authoritative.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Prediction {
    #[serde(default)]
    pub waste_type: String,
    #[serde(default)]
    pub calorific_value: f64,
    #[serde(default)]
    pub carbon_impact: String,
    #[serde(default)]
    pub route: String,
}

/// Ordinal carbon-impact category.
#[derive(Display, EnumString, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarbonImpact {
    Low,
    Medium,
    High,
}

impl CarbonImpact {
    /// Ordinal weight used by the average-carbon aggregate.
    pub fn score(self) -> u32 {
        match self {
            CarbonImpact::Low => 1,
            CarbonImpact::Medium => 2,
            CarbonImpact::High => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_deserializes_store_json() {
        let json = r#"{
            "_id": "665f1c2e9b3a",
            "timestamp": "2026-08-07T10:15:00",
            "waste_type": "plastic",
            "calorific_value": 4.5,
            "carbon_impact": "High",
            "route": "Recycling / Energy Recovery",
            "image_name": "capture.jpg"
        }"#;

        let record: ClassificationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "665f1c2e9b3a");
        assert_eq!(record.waste_type, "plastic");
        assert_eq!(record.calorific_value, 4.5);
        assert_eq!(record.image_name.as_deref(), Some("capture.jpg"));
    }

    #[test]
    fn prediction_tolerates_sparse_response() {
        let prediction: Prediction =
            serde_json::from_str(r#"{"waste_type": "glass"}"#).unwrap();
        assert_eq!(prediction.waste_type, "glass");
        assert_eq!(prediction.carbon_impact, "");
        assert_eq!(prediction.calorific_value, 0.0);
    }

    #[test]
    fn carbon_impact_parses_known_labels() {
        assert_eq!("High".parse::<CarbonImpact>().unwrap().score(), 3);
        assert_eq!("Low".parse::<CarbonImpact>().unwrap().score(), 1);
        assert!("Unranked".parse::<CarbonImpact>().is_err());
    }
}
