//! The defense counsel: argues the opposite party's case and is pushed to
//! put documentary evidence on the record.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::ParsedResponse;
use crate::prompts;
use crate::record::CaseRecord;
use crate::state::{clip, Actor, CourtroomState, Message, Speaker, StateDelta};

use super::SpeakerAgent;

const DEFENSE_TEMPERATURE: f32 = 0.4;
const DEFENSE_CONTEXT_MESSAGES: usize = 8;
const SIGNIFICANT_STATEMENT_CHARS: usize = 500;

const EVIDENCE_KEYWORDS: [&str; 8] = [
    "exhibit",
    "document",
    "affidavit",
    "report",
    "record",
    "produce",
    "submit",
    "place on record",
];

static EXHIBIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)exhibit\s*[d\-]*\d*").expect("valid regex"));

/// Evidence markers found in the counsel's prior statements, deduplicated
/// and sorted. Feeds the prompt so the agent knows what it already filed.
fn evidence_presented(state: &CourtroomState) -> String {
    let mut markers: BTreeSet<String> = BTreeSet::new();
    for message in &state.messages {
        if message.speaker != Speaker::Defense {
            continue;
        }
        let lower = message.content.to_lowercase();
        for keyword in EVIDENCE_KEYWORDS {
            if lower.contains(keyword) {
                markers.insert(keyword.to_string());
            }
        }
        for m in EXHIBIT_RE.find_iter(&message.content) {
            markers.insert(m.as_str().trim().to_lowercase());
        }
    }
    if markers.is_empty() {
        "None yet - evidence still required".to_string()
    } else {
        markers.into_iter().collect::<Vec<_>>().join(", ")
    }
}

/// Advocate for the opposite party.
pub struct DefenseCounsel;

impl DefenseCounsel {
    /// Whether any defense statement so far carries an evidence marker.
    pub fn has_presented_evidence(state: &CourtroomState) -> bool {
        state.messages.iter().any(|m| {
            m.speaker == Speaker::Defense && {
                let lower = m.content.to_lowercase();
                EVIDENCE_KEYWORDS.iter().any(|k| lower.contains(k))
                    || EXHIBIT_RE.is_match(&m.content)
            }
        })
    }
}

impl SpeakerAgent for DefenseCounsel {
    fn speaker(&self) -> Speaker {
        Speaker::Defense
    }

    fn temperature(&self) -> f32 {
        DEFENSE_TEMPERATURE
    }

    fn build_prompt(&self, state: &CourtroomState, record: &CaseRecord) -> (String, String) {
        let last_statement = state
            .last_message()
            .map(|m| clip(&m.content, SIGNIFICANT_STATEMENT_CHARS))
            .unwrap_or_default();
        let system = prompts::defense_system_prompt(
            &prompts::defense_brief(record),
            &prompts::consumer_allegations(record),
            state.phase,
            state.hearing_number,
            &evidence_presented(state),
            &last_statement,
        );
        let conversation = prompts::conversation_window(&state.messages, DEFENSE_CONTEXT_MESSAGES);
        let instructions =
            prompts::phase_instructions(state.phase, Self::has_presented_evidence(state));
        (system, prompts::defense_user_prompt(&conversation, instructions))
    }

    fn apply_response(
        &self,
        state: &CourtroomState,
        _record: &mut CaseRecord,
        parsed: ParsedResponse,
    ) -> StateDelta {
        let mut delta = StateDelta::default();
        delta.last_significant_statement = Some(clip(
            &parsed.clean_content,
            SIGNIFICANT_STATEMENT_CHARS,
        ));
        delta
            .messages
            .push(Message::now(Speaker::Defense, parsed.clean_content, state.phase));

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
