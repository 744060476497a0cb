//! Decodes loosely-typed provider payloads into a [`MovieRecord`].
//!
//! This is the only place raw provider JSON is interpreted. Everything
//! downstream works with the fixed record shape.

use serde_json::Value;

use crate::error::{MovieIntelError, Result};
use crate::record::{Money, MovieRecord, UNKNOWN};

/// Builds a [`MovieRecord`] from the two provider payloads.
///
/// `metadata` carries descriptive fields (OMDb-shaped keys); `financials`
/// is the best-effort budget/revenue payload and may be absent entirely.
pub struct ContextBuilder;

impl ContextBuilder {
    /// Decode the provider payloads into a fully-populated record.
    ///
    /// Fails with [`MovieIntelError::InsufficientData`] only when both
    /// inputs are empty or absent. Individual missing fields decode to
    /// the `unknown` sentinel.
    pub fn build(metadata: &Value, financials: Option<&Value>) -> Result<MovieRecord> {
        let meta_empty = is_empty_payload(metadata);
        let fin_empty = financials.map(is_empty_payload).unwrap_or(true);
        if meta_empty && fin_empty {
            return Err(MovieIntelError::InsufficientData(
                "both metadata and financial payloads are empty".to_string(),
            ));
        }

        Ok(MovieRecord {
            title: text_field(metadata, "Title"),
            year: text_field(metadata, "Year"),
            genre: text_field(metadata, "Genre"),
            director: text_field(metadata, "Director"),
            cast: cast_field(metadata, "Actors"),
            runtime: text_field(metadata, "Runtime"),
            rating: text_field(metadata, "imdbRating"),
            plot: text_field(metadata, "Plot"),
            budget: money_field(financials, "budget"),
            revenue: money_field(financials, "revenue"),
        })
    }
}

fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Decode a descriptive string field, mapping absent, empty, and the
/// provider's own "N/A" placeholder to the sentinel.
fn text_field(payload: &Value, key: &str) -> String {
    match payload.get(key).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() && s.trim() != "N/A" => s.trim().to_string(),
        _ => UNKNOWN.to_string(),
    }
}

/// Decode a comma-separated name list into an ordered sequence.
fn cast_field(payload: &Value, key: &str) -> Vec<String> {
    let raw = text_field(payload, key);
    if raw == UNKNOWN {
        return Vec::new();
    }
    raw.split(',')
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Decode a numeric financial field; anything non-numeric is unknown.
fn money_field(payload: Option<&Value>, key: &str) -> Money {
    payload
        .and_then(|p| p.get(key))
        .and_then(Value::as_u64)
        .map(Money::Amount)
        .unwrap_or(Money::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_full_payloads() {
        let metadata = json!({
            "Title": "Inception",
            "Year": "2010",
            "Genre": "Action, Sci-Fi",
            "Director": "Christopher Nolan",
            "Actors": "Leonardo DiCaprio, Elliot Page, Tom Hardy",
            "Runtime": "148 min",
            "imdbRating": "8.8",
            "Plot": "A thief who steals corporate secrets...",
        });
        let financials = json!({ "budget": 160000000u64, "revenue": 836800000u64 });

        let record = ContextBuilder::build(&metadata, Some(&financials)).unwrap();
        assert_eq!(record.title, "Inception");
        assert_eq!(record.cast.len(), 3);
        assert_eq!(record.cast[0], "Leonardo DiCaprio");
        assert_eq!(record.budget, Money::Amount(160000000));
        assert_eq!(record.revenue, Money::Amount(836800000));
    }

    #[test]
    fn test_every_field_populated_when_metadata_sparse() {
        let metadata = json!({ "Title": "Inception" });
        let record = ContextBuilder::build(&metadata, None).unwrap();

        assert_eq!(record.title, "Inception");
        assert_eq!(record.year, UNKNOWN);
        assert_eq!(record.genre, UNKNOWN);
        assert_eq!(record.director, UNKNOWN);
        assert!(record.cast.is_empty());
        assert_eq!(record.runtime, UNKNOWN);
        assert_eq!(record.rating, UNKNOWN);
        assert_eq!(record.plot, UNKNOWN);
        assert_eq!(record.budget, Money::Unknown);
        assert_eq!(record.revenue, Money::Unknown);
    }

    #[test]
    fn test_na_placeholder_becomes_sentinel() {
        let metadata = json!({ "Title": "Obscure Short", "Director": "N/A", "Runtime": "  " });
        let record = ContextBuilder::build(&metadata, None).unwrap();
        assert_eq!(record.director, UNKNOWN);
        assert_eq!(record.runtime, UNKNOWN);
    }

    #[test]
    fn test_both_payloads_empty_is_insufficient_data() {
        let err = ContextBuilder::build(&Value::Null, None).unwrap_err();
        assert!(matches!(err, MovieIntelError::InsufficientData(_)));

        let err = ContextBuilder::build(&json!({}), Some(&json!({}))).unwrap_err();
        assert!(matches!(err, MovieIntelError::InsufficientData(_)));
    }

    #[test]
    fn test_financials_alone_are_sufficient() {
        let financials = json!({ "budget": 1000u64 });
        let record = ContextBuilder::build(&Value::Null, Some(&financials)).unwrap();
        assert_eq!(record.title, UNKNOWN);
        assert_eq!(record.budget, Money::Amount(1000));
    }

    #[test]
    fn test_non_numeric_money_is_unknown() {
        let financials = json!({ "budget": "N/A", "revenue": -5 });
        let record = ContextBuilder::build(&json!({"Title": "X"}), Some(&financials)).unwrap();
        assert_eq!(record.budget, Money::Unknown);
        assert_eq!(record.revenue, Money::Unknown);
    }

    #[test]
    fn test_zero_budget_is_kept_as_amount() {
        let financials = json!({ "budget": 0u64 });
        let record = ContextBuilder::build(&json!({"Title": "X"}), Some(&financials)).unwrap();
        assert_eq!(record.budget, Money::Amount(0));
    }
}
