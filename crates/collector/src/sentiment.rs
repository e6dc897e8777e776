//! Fear & Greed index (alternative.me).

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct FearGreedResponse {
    #[serde(default)]
    pub data: Vec<FearGreedEntry>,
}

#[derive(Debug, Deserialize)]
pub struct FearGreedEntry {
    /// Index value 0 (extreme fear) to 100 (extreme greed), sent as a string
    pub value: String,
    #[serde(default)]
    pub value_classification: Option<String>,
}

/// Latest index value scaled to [0, 1].
#[must_use]
pub fn parse_fear_greed(response: &FearGreedResponse) -> Option<f64> {
    let value: f64 = response.data.first()?.value.parse().ok()?;
    Some((value / 100.0).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_latest_value() {
        let response: FearGreedResponse = serde_json::from_str(
            r#"{
                "name": "Fear and Greed Index",
                "data": [
                    {"value": "40", "value_classification": "Fear", "timestamp": "1551157200"},
                    {"value": "90", "value_classification": "Extreme Greed", "timestamp": "1551070800"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(parse_fear_greed(&response), Some(0.4));
        assert_eq!(
            response.data[0].value_classification.as_deref(),
            Some("Fear")
        );
    }

    #[test]
    fn empty_or_garbage_is_none() {
        let empty: FearGreedResponse = serde_json::from_str(r#"{"name": "x"}"#).unwrap();
        assert_eq!(parse_fear_greed(&empty), None);

        let garbage = FearGreedResponse {
            data: vec![FearGreedEntry {
                value: "n/a".to_string(),
                value_classification: None,
            }],
        };
        assert_eq!(parse_fear_greed(&garbage), None);
    }
}
