//! Analysis data model
//!
//! Field names follow the camelCase JSON contract the model is asked to
//! return. Every field has a serde default, so a payload that omits fields
//! still deserializes and the missing parts render blank. Field values are
//! read leniently: `null` means absent, numbers are accepted where text is
//! expected and numeric text where numbers are expected.

use crate::error::AnalysisError;
use crate::prompts::Language;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated user query: a ticker or company name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisQuery(String);

impl AnalysisQuery {
    /// Trim the input and reject it when nothing is left
    pub fn new(input: &str) -> Result<Self, AnalysisError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AnalysisError::EmptyQuery);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnalysisQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Categorical trading suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Sell,
    /// Also used for any value the model invents
    #[default]
    #[serde(other)]
    Hold,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Buy => "BUY",
            Action::Sell => "SELL",
            Action::Hold => "HOLD",
        }
    }

    /// Card headline for the given output language
    pub fn label(self, language: Language) -> String {
        let local = match (language, self) {
            (Language::Chinese, Action::Buy) => "建议买入",
            (Language::Chinese, Action::Sell) => "建议卖出",
            (Language::Chinese, Action::Hold) => "建议持有",
            (Language::English, Action::Buy) => "Buy",
            (Language::English, Action::Sell) => "Sell",
            (Language::English, Action::Hold) => "Hold",
        };
        format!("{local} ({})", self.as_str())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(deserialize_with = "lenient::action")]
    pub action: Action,
    /// 0-100 by contract; not enforced. Fractions are rounded.
    #[serde(deserialize_with = "lenient::integer")]
    pub confidence: i64,
    #[serde(deserialize_with = "lenient::text")]
    pub entry_price_range: String,
    #[serde(deserialize_with = "lenient::text")]
    pub exit_price_range: String,
    #[serde(deserialize_with = "lenient::text")]
    pub time_horizon: String,
}

/// One point on the trend chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartPoint {
    #[serde(deserialize_with = "lenient::text")]
    pub date: String,
    #[serde(deserialize_with = "lenient::number")]
    pub price: f64,
    #[serde(
        deserialize_with = "lenient::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub sentiment: Option<f64>,
    #[serde(
        deserialize_with = "lenient::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub volume: Option<f64>,
}

/// A cited web page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Source {
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub uri: String,
}

/// The structured analysis shown to the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(deserialize_with = "lenient::text")]
    pub symbol: String,
    #[serde(deserialize_with = "lenient::text")]
    pub company_name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub current_price: String,
    #[serde(deserialize_with = "lenient::text")]
    pub markdown_analysis: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub recommendation: Recommendation,
    #[serde(deserialize_with = "lenient::or_default")]
    pub trend_data: Vec<ChartPoint>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub sources: Vec<Source>,
}

impl AnalysisResult {
    /// Lowest and highest price across the trend, if there is one
    pub fn price_range(&self) -> Option<(f64, f64)> {
        let mut prices = self.trend_data.iter().map(|p| p.price);
        let first = prices.next()?;
        Some(prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    pub fn has_sentiment(&self) -> bool {
        self.trend_data.iter().any(|p| p.sentiment.is_some())
    }

    pub fn summary(&self) -> String {
        format!(
            "{} ({}) {} - {} {}%",
            self.company_name,
            self.symbol,
            self.current_price,
            self.recommendation.action,
            self.recommendation.confidence
        )
    }
}

/// Field deserializers that accept whatever shape a model tends to emit
mod lenient {
    use super::Action;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// `null` becomes the default; anything else must fit `T`
    pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    /// Strings pass through, `null` is blank, other values keep their JSON text
    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(as_f64(&Value::deserialize(deserializer)?).unwrap_or_default())
    }

    pub fn optional_number<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        Ok(as_f64(&Value::deserialize(deserializer)?))
    }

    pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        Ok(as_f64(&Value::deserialize(deserializer)?)
            .map(|v| v.round() as i64)
            .unwrap_or_default())
    }

    /// Case-insensitive; anything unrecognised is HOLD
    pub fn action<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Action, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => match s.trim().to_uppercase().as_str() {
                "BUY" => Action::Buy,
                "SELL" => Action::Sell,
                _ => Action::Hold,
            },
            _ => Action::Hold,
        })
    }

    /// Numbers, or text such as "248.1", "$1,250.50" or "85%"
    fn as_f64(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s
                .trim()
                .trim_start_matches('$')
                .trim_end_matches('%')
                .replace(',', "")
                .parse()
                .ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_trims() {
        let query = AnalysisQuery::new("  TSLA \n").unwrap();
        assert_eq!(query.as_str(), "TSLA");
        assert_eq!(query.to_string(), "TSLA");
    }

    #[test]
    fn test_query_rejects_blank() {
        assert!(matches!(AnalysisQuery::new(""), Err(AnalysisError::EmptyQuery)));
        assert!(matches!(
            AnalysisQuery::new(" \t\n"),
            Err(AnalysisError::EmptyQuery)
        ));
    }

    #[test]
    fn test_action_wire_format() {
        assert_eq!(serde_json::to_string(&Action::Buy).unwrap(), "\"BUY\"");
        let sell: Action = serde_json::from_str("\"SELL\"").unwrap();
        assert_eq!(sell, Action::Sell);
        let odd: Action = serde_json::from_str("\"STRONG BUY\"").unwrap();
        assert_eq!(odd, Action::Hold);
    }

    #[test]
    fn test_action_label() {
        assert_eq!(Action::Buy.label(Language::Chinese), "建议买入 (BUY)");
        assert_eq!(Action::Sell.label(Language::English), "Sell (SELL)");
    }

    #[test]
    fn test_missing_fields_default_blank() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "symbol": "AAPL",
            "trendData": [{ "date": "05-01" }]
        }))
        .unwrap();

        assert_eq!(result.symbol, "AAPL");
        assert!(result.company_name.is_empty());
        assert_eq!(result.recommendation, Recommendation::default());
        assert_eq!(result.trend_data[0].price, 0.0);
        assert!(result.trend_data[0].sentiment.is_none());
        assert!(result.sources.is_empty());
    }

    #[test]
    fn test_nulls_read_as_blank() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "symbol": "AAPL",
            "companyName": null,
            "recommendation": null,
            "trendData": null,
            "sources": null
        }))
        .unwrap();

        assert_eq!(result.symbol, "AAPL");
        assert!(result.company_name.is_empty());
        assert_eq!(result.recommendation, Recommendation::default());
        assert!(result.trend_data.is_empty());
    }

    #[test]
    fn test_numbers_and_text_are_interchangeable() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "currentPrice": 250.5,
            "recommendation": { "action": "buy", "confidence": 72.6, "timeHorizon": 4 },
            "trendData": [
                { "date": 501, "price": "248.1", "sentiment": "55", "volume": null },
                { "date": "05-02", "price": "$1,250.50", "sentiment": "n/a" }
            ]
        }))
        .unwrap();

        assert_eq!(result.current_price, "250.5");
        assert_eq!(result.recommendation.action, Action::Buy);
        assert_eq!(result.recommendation.confidence, 73);
        assert_eq!(result.recommendation.time_horizon, "4");
        assert_eq!(result.trend_data[0].date, "501");
        assert_eq!(result.trend_data[0].price, 248.1);
        assert_eq!(result.trend_data[0].sentiment, Some(55.0));
        assert_eq!(result.trend_data[0].volume, None);
        assert_eq!(result.trend_data[1].price, 1250.5);
        assert_eq!(result.trend_data[1].sentiment, None);
    }

    #[test]
    fn test_non_string_action_is_hold() {
        let rec: Recommendation = serde_json::from_value(json!({ "action": 1 })).unwrap();
        assert_eq!(rec.action, Action::Hold);
        let rec: Recommendation = serde_json::from_value(json!({ "action": " Sell " })).unwrap();
        assert_eq!(rec.action, Action::Sell);
    }

    #[test]
    fn test_optional_point_fields_not_serialized() {
        let point = ChartPoint {
            date: "05-01".to_string(),
            price: 248.0,
            sentiment: None,
            volume: None,
        };
        assert_eq!(
            serde_json::to_value(&point).unwrap(),
            json!({ "date": "05-01", "price": 248.0 })
        );
    }

    #[test]
    fn test_summary() {
        let result = AnalysisResult {
            symbol: "TSLA".to_string(),
            company_name: "Tesla Inc.".to_string(),
            current_price: "$250.00".to_string(),
            recommendation: Recommendation {
                action: Action::Buy,
                confidence: 72,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(result.summary(), "Tesla Inc. (TSLA) $250.00 - BUY 72%");
    }

    #[test]
    fn test_price_range() {
        let mut result = AnalysisResult::default();
        assert_eq!(result.price_range(), None);
        assert!(!result.has_sentiment());

        for (price, sentiment) in [(10.0, None), (12.5, Some(60.0)), (9.0, None)] {
            result.trend_data.push(ChartPoint {
                date: String::new(),
                price,
                sentiment,
                volume: None,
            });
        }
        assert_eq!(result.price_range(), Some((9.0, 12.5)));
        assert!(result.has_sentiment());
    }
}
