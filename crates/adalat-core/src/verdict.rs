//! Final judgment generation: one oracle call over the full transcript,
//! then the structured verdict entry for the artifacts.

use chrono::Utc;

use crate::error::OracleError;
use crate::oracle::CompletionOracle;
use crate::prompts;
use crate::record::CaseRecord;
use crate::state::{CourtroomState, Message, Phase, Speaker, StateDelta, VerdictDetails};

const VERDICT_TEMPERATURE: f32 = 0.2;

/// Full-transcript rendering for the judgment call, one entry per line
/// with the phase it was spoken in.
fn transcript(state: &CourtroomState) -> String {
    state
        .messages
        .iter()
        .map(|m| format!("[{}] ({}): {}", m.speaker.as_str(), m.phase.as_str(), m.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn updates_summary(state: &CourtroomState) -> String {
    if state.judgment_updates.is_empty() {
        return "No modifications during proceedings.".to_string();
    }
    state
        .judgment_updates
        .iter()
        .map(|u| {
            format!(
                "- {}: {} -> {} ({})",
                u.field,
                u.old_value.as_deref().unwrap_or("not set"),
                u.new_value,
                u.reason
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Produces the pronounced judgment and the terminal state delta.
pub struct VerdictGenerator;

impl VerdictGenerator {
    /// Pronounce the final judgment. The full order text becomes the last
    /// transcript entry and the structured verdict for the artifacts.
    pub async fn pronounce(
        &self,
        oracle: &dyn CompletionOracle,
        state: &CourtroomState,
        record: &CaseRecord,
    ) -> Result<StateDelta, OracleError> {
        let user = prompts::verdict_user_prompt(
            &prompts::case_details(record),
            state.hearing_number,
            state.turn_count,
            &updates_summary(state),
            &transcript(state),
        );
        let order = oracle
            .complete(prompts::VERDICT_SYSTEM_PROMPT, &user, VERDICT_TEMPERATURE)
            .await?;

        let details = VerdictDetails {
            summary: "Judgment pronounced after full hearing".to_string(),
            issues_determined: record
                .get("Judgment_Reasoning.Issues_Framed")
                .cloned()
                .unwrap_or(serde_json::Value::Null),
            final_order: order.clone(),
            relief_granted: record
                .get("Relief_Granted")
                .cloned()
                .unwrap_or(serde_json::Value::Null),
            costs: "As awarded in judgment".to_string(),
            pronounced_on: Utc::now().format("%d %B %Y").to_string(),
        };

        let mut delta = StateDelta::default();
        delta
            .messages
            .push(Message::now(Speaker::Judge, order, Phase::Verdict));
        delta.phase = Some(Phase::Verdict);
        delta.concluded = true;
        delta.awaiting_human_input = Some(false);
        delta.verdict = Some(details);
        Ok(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::JudgmentUpdate;

    #[test]
    fn empty_update_trail_reads_as_no_modifications() {
        let state = CourtroomState::new();
        assert_eq!(updates_summary(&state), "No modifications during proceedings.");
    }

    #[test]
    fn updates_render_with_prior_value_placeholder() {
        let mut state = CourtroomState::new();
        state.apply(StateDelta {
            judgment_updates: vec![JudgmentUpdate {
                field: "Relief_Granted.Costs".into(),
                old_value: None,
                new_value: "Rs. 5000".into(),
                reason: "conduct of parties".into(),
                updated_by: Speaker::Judge,
            }],
            ..Default::default()
        });
        let summary = updates_summary(&state);
        assert!(summary.contains("not set -> Rs. 5000"));
        assert!(summary.contains("conduct of parties"));
    }

    #[test]
    fn transcript_lines_carry_speaker_and_phase() {
        let mut state = CourtroomState::new();
        state.apply(StateDelta {
            messages: vec![
                Message::now(Speaker::Judge, "The matter is taken up.", Phase::Opening),
                Message::now(Speaker::Consumer, "I press my complaint.", Phase::Arguments),
            ],
            ..Default::default()
        });
        let rendered = transcript(&state);
        assert!(rendered.contains("[JUDGE] (opening): The matter is taken up."));
        assert!(rendered.contains("[CONSUMER] (arguments): I press my complaint."));
    }
}
