//! Assembly of the pre-composition report body.
//!
//! Section markers are part of the report contract and are asserted by
//! the integration tests.

use crate::verdict::VerdictOutcome;

pub const REPORT_HEADER: &str = "MOVIE REPORT";
pub const QUESTION_MARKER: &str = "QUESTION:";
pub const ANSWER_MARKER: &str = "ANSWER:";
pub const VALIDATION_MARKER: &str = "VALIDATION:";
pub const REJECTION_MARKER: &str = "ANSWER REJECTED";

/// The question/answer/verdict material for a run that asked a question.
#[derive(Debug, Clone)]
pub struct QaSection {
    pub question: String,
    pub answer: String,
    pub verdict_text: String,
    pub outcome: VerdictOutcome,
}

/// Assemble the report body handed to the composer.
///
/// A passed answer appears under trusted `ANSWER:` / `VALIDATION:`
/// headings. A rejected answer's body is kept out of the trusted
/// narrative; the rejection marker plus the validator's full output is
/// surfaced instead, as the audit trail.
pub fn assemble_body(summary: &str, qa: Option<&QaSection>) -> String {
    let mut body = format!("{REPORT_HEADER}\n\n{summary}\n");

    let Some(qa) = qa else {
        return body;
    };

    match qa.outcome {
        VerdictOutcome::Pass => {
            body.push_str(&format!(
                "\n{QUESTION_MARKER}\n{}\n\n{ANSWER_MARKER}\n{}\n\n{VALIDATION_MARKER}\n{}\n",
                qa.question, qa.answer, qa.verdict_text
            ));
        }
        VerdictOutcome::Fail | VerdictOutcome::None => {
            body.push_str(&format!(
                "\n{QUESTION_MARKER}\n{}\n\n{REJECTION_MARKER}\n{}\n",
                qa.question, qa.verdict_text
            ));
        }
    }
    body
}
