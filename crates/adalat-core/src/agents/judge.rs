//! The presiding judge: opens hearings, probes the parties, moves the
//! proceeding through its phases, and may amend the draft judgment.

use crate::parser::ParsedResponse;
use crate::prompts;
use crate::record::CaseRecord;
use crate::state::{clip, Actor, CourtroomState, JudgmentUpdate, Message, Phase, Speaker, StateDelta};

use super::SpeakerAgent;

const JUDGE_TEMPERATURE: f32 = 0.3;
const JUDGE_CONTEXT_MESSAGES: usize = 10;
const SIGNIFICANT_STATEMENT_CHARS: usize = 500;

/// Judicial agent. Its directives carry the most authority: phase
/// transitions and judgment edits are honored only from this agent.
pub struct PresidingJudge;

impl SpeakerAgent for PresidingJudge {
    fn speaker(&self) -> Speaker {
        Speaker::Judge
    }

    fn temperature(&self) -> f32 {
        JUDGE_TEMPERATURE
    }

    fn build_prompt(&self, state: &CourtroomState, record: &CaseRecord) -> (String, String) {
        let system = prompts::judge_system_prompt(
            &prompts::case_details(record),
            state.phase,
            state.hearing_number,
            state.turn_count,
        );
        let conversation = prompts::conversation_window(&state.messages, JUDGE_CONTEXT_MESSAGES);
        (system, prompts::judge_user_prompt(&conversation))
    }

    fn apply_response(
        &self,
        state: &CourtroomState,
        record: &mut CaseRecord,
        parsed: ParsedResponse,
    ) -> StateDelta {
        let mut delta = StateDelta::default();

        for directive in &parsed.judgment_updates {
            let old_value = record.set_field(&directive.field, &directive.new_value);
            delta.judgment_updates.push(JudgmentUpdate {
                field: directive.field.clone(),
                old_value,
                new_value: directive.new_value.clone(),
                reason: directive.reason.clone(),
                updated_by: Speaker::Judge,
            });
        }

        // Unknown phase tokens are ignored; the phase stands.
        let new_phase = parsed
            .phase_transition
            .as_deref()
            .and_then(Phase::from_token);
        if let Some(phase) = new_phase {
            delta.phase = Some(phase);
            if phase == Phase::Verdict {
                delta.concluded = true;
            }
        }

        let message_phase = new_phase.unwrap_or(state.phase);
        delta.last_significant_statement = Some(clip(
            &parsed.clean_content,
            SIGNIFICANT_STATEMENT_CHARS,
        ));
        delta
            .messages
            .push(Message::now(Speaker::Judge, parsed.clean_content, message_phase));

        let next = parsed
            .next_speaker
            .as_deref()
            .map(Actor::from_token)
            .unwrap_or(Actor::Consumer);
        delta.next_actor = Some(next);
        delta.awaiting_human_input = Some(next == Actor::Consumer);
        delta.turn_increment = 1;
        delta
    }
}
