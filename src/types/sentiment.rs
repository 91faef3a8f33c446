use serde::{Deserialize, Serialize};

/// Fear & Greed index reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentReading {
    /// Score from 0 (extreme fear) to 100 (extreme greed).
    pub value: u8,
    /// Upstream label such as "Fear" or "Extreme Greed".
    pub classification: String,
    /// Unix seconds.
    pub timestamp: i64,
}

impl SentimentReading {
    pub const MAX_VALUE: u8 = 100;

    /// Fraction of the gauge sweep, 0.0 at extreme fear and 1.0 at extreme greed.
    pub fn ratio(&self) -> f64 {
        f64::from(self.value.min(Self::MAX_VALUE)) / f64::from(Self::MAX_VALUE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_serialization() {
        let reading = SentimentReading {
            value: 25,
            classification: "Extreme Fear".to_string(),
            timestamp: 1_700_000_000,
        };

        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json["value"], 25);
        assert_eq!(json["classification"], "Extreme Fear");
        assert_eq!(json["timestamp"], 1_700_000_000i64);
    }

    #[test]
    fn test_sentiment_ratio() {
        let reading = SentimentReading {
            value: 50,
            classification: "Neutral".to_string(),
            timestamp: 0,
        };
        assert_eq!(reading.ratio(), 0.5);
    }
}
