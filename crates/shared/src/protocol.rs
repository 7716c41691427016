use serde::{Deserialize, Serialize};

use crate::domain::{Product, Season};

/// Body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub country: String,
    pub province: String,
    pub product: Product,
    pub season_name: Season,
    /// Days between planting and harvest.
    pub time_to_harvest: f64,
    /// Hectares.
    pub area: f64,
    /// Tons.
    pub production: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(alias = "predicted_yield")]
    pub prediction: f64,
}

/// Document served at the service root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predict_endpoint: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_snake_case_wire_names() {
        let request = PredictRequest {
            country: "Kenya".into(),
            province: "Nakuru".into(),
            product: Product::Corn,
            season_name: Season::Spring,
            time_to_harvest: 90.0,
            area: 10.0,
            production: 25.0,
        };
        let value = serde_json::to_value(&request).expect("json");
        assert_eq!(value["season_name"], "Spring");
        assert_eq!(value["product"], "Corn");
        assert_eq!(value["time_to_harvest"], 90.0);
    }

    #[test]
    fn response_accepts_predicted_yield_alias() {
        let parsed: PredictResponse =
            serde_json::from_str(r#"{"predicted_yield": 1.5}"#).expect("alias");
        assert_eq!(parsed.prediction, 1.5);
    }
}
