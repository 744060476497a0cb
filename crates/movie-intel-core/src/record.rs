//! The normalized movie record fed to every agent prompt.

use serde::{Deserialize, Serialize};

/// Sentinel used for any field the sources did not supply.
///
/// Fields are never omitted; keeping the record shape-stable keeps the
/// downstream prompts shape-stable.
pub const UNKNOWN: &str = "unknown";

/// A monetary fact from the financial source: either a concrete amount in
/// USD or unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Money {
    Amount(u64),
    Unknown,
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Money::Amount(v) => write!(f, "{v}"),
            Money::Unknown => write!(f, "{UNKNOWN}"),
        }
    }
}

/// Immutable facts about one movie, assembled once per run.
///
/// Every field is populated: missing source values decode to [`UNKNOWN`]
/// (or [`Money::Unknown`] for the financial fields).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    pub year: String,
    pub genre: String,
    pub director: String,
    /// Credited cast, in billing order.
    pub cast: Vec<String>,
    pub runtime: String,
    pub rating: String,
    pub plot: String,
    pub budget: Money,
    pub revenue: Money,
}

impl MovieRecord {
    /// Render the fixed-shape context block used as prompt context for
    /// every agent. Field order is part of the contract.
    pub fn context_block(&self) -> String {
        let actors = if self.cast.is_empty() {
            UNKNOWN.to_string()
        } else {
            self.cast.join(", ")
        };
        format!(
            "Title: {}\n\
             Year: {}\n\
             Genre: {}\n\
             Director: {}\n\
             Actors: {}\n\
             Runtime: {}\n\
             IMDb Rating: {}\n\
             Plot: {}\n\
             Budget: {}\n\
             Revenue: {}",
            self.title,
            self.year,
            self.genre,
            self.director,
            actors,
            self.runtime,
            self.rating,
            self.plot,
            self.budget,
            self.revenue,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> MovieRecord {
        MovieRecord {
            title: "Inception".to_string(),
            year: "2010".to_string(),
            genre: "Sci-Fi".to_string(),
            director: "Christopher Nolan".to_string(),
            cast: vec![
                "Leonardo DiCaprio".to_string(),
                "Joseph Gordon-Levitt".to_string(),
            ],
            runtime: "148 min".to_string(),
            rating: "8.8".to_string(),
            plot: "A thief steals secrets through dream-sharing.".to_string(),
            budget: Money::Amount(160_000_000),
            revenue: Money::Unknown,
        }
    }

    #[test]
    fn test_context_block_field_order() {
        let block = sample_record().context_block();
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines[0].starts_with("Title: Inception"));
        assert!(lines[3].starts_with("Director: Christopher Nolan"));
        assert!(lines[6].starts_with("IMDb Rating: 8.8"));
        assert!(lines[9].starts_with("Revenue: unknown"));
    }

    #[test]
    fn test_context_block_joins_cast_in_order() {
        let block = sample_record().context_block();
        assert!(block.contains("Actors: Leonardo DiCaprio, Joseph Gordon-Levitt"));
    }

    #[test]
    fn test_context_block_empty_cast_is_unknown() {
        let mut record = sample_record();
        record.cast.clear();
        assert!(record.context_block().contains("Actors: unknown"));
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::Amount(42).to_string(), "42");
        assert_eq!(Money::Unknown.to_string(), "unknown");
    }
}
