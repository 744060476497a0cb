//! The four agent roles and their fixed instruction profiles.

use serde::{Deserialize, Serialize};

/// The four role archetypes in the report pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// Summarizes the movie context.
    Analyzer,
    /// Answers a user question from the context.
    Answerer,
    /// Judges whether an answer is supported by the context.
    Validator,
    /// Formats the assembled body into the final report.
    Composer,
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AgentRole::Analyzer => "analyzer",
            AgentRole::Answerer => "answerer",
            AgentRole::Validator => "validator",
            AgentRole::Composer => "composer",
        };
        write!(f, "{s}")
    }
}

/// Whether an agent's output is expected to be long-form markdown or a
/// short plain answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    Structured,
    Plain,
}

/// One agent's fixed behavioral contract: identity, model, instructions.
///
/// Profiles are immutable, created once at startup, and shared read-only
/// across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub role: AgentRole,
    /// Human-readable agent name (used in logs and report metadata).
    pub name: String,
    /// Backend model identifier.
    pub model: String,
    /// Instruction text sent as the system contract on every call.
    pub instructions: String,
    pub output_mode: OutputMode,
}

impl AgentProfile {
    pub fn new(
        role: AgentRole,
        name: &str,
        model: &str,
        instructions: &str,
        output_mode: OutputMode,
    ) -> Self {
        Self {
            role,
            name: name.to_string(),
            model: model.to_string(),
            instructions: instructions.to_string(),
            output_mode,
        }
    }

    /// The canonical four-profile crew for a standard run, all bound to
    /// the given model.
    ///
    /// Each instruction profile forbids knowledge outside the supplied
    /// context; that contract is behavioral and is checked downstream by
    /// the validator stage rather than trusted.
    pub fn standard_crew(model: &str) -> Vec<AgentProfile> {
        vec![
            AgentProfile::new(
                AgentRole::Analyzer,
                "Movie Analysis Agent",
                model,
                "Summarize the movie strictly using the provided data. \
                 Do not use outside knowledge.",
                OutputMode::Structured,
            ),
            AgentProfile::new(
                AgentRole::Answerer,
                "Movie QnA Agent",
                model,
                "Answer questions only using the provided movie data. \
                 If the data does not contain the answer, say so.",
                OutputMode::Plain,
            ),
            AgentProfile::new(
                AgentRole::Validator,
                "Movie Test Agent",
                model,
                "Validate the AI answer against the movie data.\n\
                 PASS means the answer matches the movie data.\n\
                 FAIL means hallucination or unrelated content.\n\
                 Output format:\n\
                 TEST RESULT: PASS or FAIL\n\
                 REASON:",
                OutputMode::Plain,
            ),
            AgentProfile::new(
                AgentRole::Composer,
                "Movie Document Agent",
                model,
                "Format the validated content into a professional report. \
                 Do not add new facts.",
                OutputMode::Structured,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_crew_covers_all_roles() {
        let crew = AgentProfile::standard_crew("gemini-2.5-flash");
        assert_eq!(crew.len(), 4);

        let roles: Vec<AgentRole> = crew.iter().map(|p| p.role).collect();
        assert!(roles.contains(&AgentRole::Analyzer));
        assert!(roles.contains(&AgentRole::Answerer));
        assert!(roles.contains(&AgentRole::Validator));
        assert!(roles.contains(&AgentRole::Composer));
    }

    #[test]
    fn test_validator_profile_is_plain_and_names_the_token_contract() {
        let crew = AgentProfile::standard_crew("gemini-2.5-flash");
        let validator = crew
            .iter()
            .find(|p| p.role == AgentRole::Validator)
            .unwrap();
        assert_eq!(validator.output_mode, OutputMode::Plain);
        assert!(validator.instructions.contains("TEST RESULT"));
        assert!(validator.instructions.contains("PASS"));
    }

    #[test]
    fn test_role_display() {
        assert_eq!(AgentRole::Analyzer.to_string(), "analyzer");
        assert_eq!(AgentRole::Composer.to_string(), "composer");
    }
}
