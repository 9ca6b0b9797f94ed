//! Console seam: everything the orchestrator needs from the human
//! complainant and everything it reports back.
//!
//! The loop talks only to [`CourtroomIo`]; the CLI provides the terminal
//! implementation and tests provide a scripted one.

use crate::state::{JudgmentUpdate, Message, Phase};

/// Consumer command words, matched case-insensitively on the raw input.
pub const REST_COMMAND: &str = "rest";
pub const EVIDENCE_COMMAND: &str = "evidence";
pub const QUIT_COMMAND: &str = "quit";

/// One resolved consumer turn: either a statement to put on the record or
/// a request to leave the proceeding unconcluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsumerTurn {
    Statement(String),
    Quit,
}

/// Canonical expansion of the `rest` command.
pub fn rest_statement() -> String {
    "Your Honor, I have presented all my evidence and arguments. I rest my case and pray for the relief claimed in my complaint.".to_string()
}

/// Canonical expansion of the `evidence` command around the free-text
/// description the complainant supplies.
pub fn evidence_statement(description: &str) -> String {
    format!(
        "Your Honor, I wish to place on record the following evidence: {}",
        description
    )
}

/// The orchestrator's window to the outside world.
pub trait CourtroomIo {
    /// Collect the complainant's next turn, with command words already
    /// expanded into full statements.
    fn consumer_turn(&mut self) -> std::io::Result<ConsumerTurn>;

    /// A transcript entry was recorded.
    fn show_message(&mut self, message: &Message);

    /// The court record was amended during the proceeding.
    fn show_judgment_update(&mut self, update: &JudgmentUpdate);

    /// The proceeding entered a new phase.
    fn show_phase_banner(&mut self, phase: Phase);

    /// Free-form progress notice (loading, persistence, errors).
    fn notify(&mut self, text: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_expansion_is_a_full_submission() {
        let statement = rest_statement();
        assert!(statement.starts_with("Your Honor"));
        assert!(statement.contains("rest my case"));
    }

    #[test]
    fn evidence_expansion_embeds_the_description() {
        let statement = evidence_statement("purchase invoice dated 12 March 2025");
        assert!(statement.contains("place on record"));
        assert!(statement.ends_with("purchase invoice dated 12 March 2025"));
    }
}
