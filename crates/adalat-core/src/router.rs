//! Turn router: decides who speaks next when no agent directive settled it.
//!
//! The router is generative first (a low-temperature JSON decision) with a
//! deterministic fallback table, so a malformed or failed routing call can
//! never stall the proceeding.

use serde::Deserialize;

use crate::oracle::CompletionOracle;
use crate::prompts;
use crate::state::{clip, Actor, CourtroomState, Phase, Speaker, StateDelta};

const ROUTER_TEMPERATURE: f32 = 0.1;
const ROUTER_CONTEXT_MESSAGES: usize = 5;
const LAST_STATEMENT_CHARS: usize = 300;

/// The JSON decision the routing call is asked to produce. Everything but
/// the speaker is optional so a terse but valid reply still routes.
#[derive(Debug, Deserialize)]
pub struct RouterDecision {
    pub next_speaker: String,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub suggest_phase_change: Option<String>,
    #[serde(default)]
    pub should_conclude: bool,
}

/// Strip a Markdown code fence if the reply arrived wrapped in one.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Deterministic routing when the generative decision is unusable:
/// consumer and defense alternate, anything else hands to the consumer.
fn fallback_next(last_speaker: Option<Speaker>) -> Actor {
    match last_speaker {
        Some(Speaker::Consumer) => Actor::Defense,
        Some(Speaker::Defense) => Actor::Judge,
        _ => Actor::Consumer,
    }
}

fn parse_decision(raw: &str) -> Option<RouterDecision> {
    serde_json::from_str(strip_code_fences(raw)).ok()
}

/// Flow controller between explicit speaker handoffs.
pub struct TurnRouter;

impl TurnRouter {
    /// Resolve the next speaker. Oracle failures and unparseable replies
    /// degrade to the fallback table rather than erroring out.
    pub async fn decide(&self, oracle: &dyn CompletionOracle, state: &CourtroomState) -> StateDelta {
        let last_speaker = state.last_message().map(|m| m.speaker);
        let system = prompts::router_system_prompt(
            state.phase,
            last_speaker.map(|s| s.as_str()).unwrap_or("NONE"),
            &clip(&state.last_significant_statement, LAST_STATEMENT_CHARS),
            state.turn_count,
            state.concluded,
            &prompts::recent_messages(&state.messages, ROUTER_CONTEXT_MESSAGES),
        );

        let decision = match oracle
            .complete(&system, prompts::ROUTER_USER_PROMPT, ROUTER_TEMPERATURE)
            .await
        {
            Ok(raw) => parse_decision(&raw),
            Err(err) => {
                tracing::warn!(error = %err, "routing call failed, using fallback");
                None
            }
        };
        self.decision_delta(state, last_speaker, decision)
    }

    fn decision_delta(
        &self,
        state: &CourtroomState,
        last_speaker: Option<Speaker>,
        decision: Option<RouterDecision>,
    ) -> StateDelta {
        let mut delta = StateDelta::default();
        let next = match decision {
            Some(decision) => {
                if !decision.reasoning.is_empty() {
                    tracing::debug!(reasoning = %decision.reasoning, "routing decision");
                }
                if let Some(phase) = decision
                    .suggest_phase_change
                    .as_deref()
                    .and_then(Phase::from_token)
                    // The proceeding never returns to opening.
                    .filter(|p| *p != Phase::Opening && *p != state.phase)
                {
                    delta.phase = Some(phase);
                    if phase == Phase::Verdict {
                        delta.concluded = true;
                    }
                }
                if decision.should_conclude {
                    delta.concluded = true;
                }
                match Actor::from_token(&decision.next_speaker.to_uppercase()) {
                    // The decision must name a party; anything else falls back.
                    Actor::Router | Actor::Verdict => fallback_next(last_speaker),
                    actor => actor,
                }
            }
            None => fallback_next(last_speaker),
        };
        delta.next_actor = Some(next);
        delta.awaiting_human_input = Some(next == Actor::Consumer);
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Message, StateDelta};

    fn state_after(speaker: Speaker) -> CourtroomState {
        let mut state = CourtroomState::new();
        state.apply(StateDelta {
            messages: vec![Message::now(speaker, "statement", Phase::Arguments)],
            phase: Some(Phase::Arguments),
            ..Default::default()
        });
        state
    }

    #[test]
    fn fallback_alternates_the_parties() {
        assert_eq!(fallback_next(Some(Speaker::Consumer)), Actor::Defense);
        assert_eq!(fallback_next(Some(Speaker::Defense)), Actor::Judge);
        assert_eq!(fallback_next(Some(Speaker::Judge)), Actor::Consumer);
        assert_eq!(fallback_next(None), Actor::Consumer);
    }

    #[test]
    fn fenced_json_is_parsed() {
        let raw = "```json\n{\"next_speaker\": \"DEFENSE\", \"reasoning\": \"rebuttal due\"}\n```";
        let decision = parse_decision(raw).unwrap();
        assert_eq!(decision.next_speaker, "DEFENSE");
        assert!(!decision.should_conclude);
        assert!(decision.suggest_phase_change.is_none());
    }

    #[test]
    fn garbage_reply_falls_back() {
        let state = state_after(Speaker::Consumer);
        let delta = TurnRouter.decision_delta(&state, Some(Speaker::Consumer), None);
        assert_eq!(delta.next_actor, Some(Actor::Defense));
        assert_eq!(delta.awaiting_human_input, Some(false));
        assert_eq!(delta.turn_increment, 0);
    }

    #[test]
    fn verdict_suggestion_concludes() {
        let state = state_after(Speaker::Defense);
        let decision = RouterDecision {
            next_speaker: "JUDGE".into(),
            reasoning: String::new(),
            suggest_phase_change: Some("verdict".into()),
            should_conclude: false,
        };
        let delta = TurnRouter.decision_delta(&state, Some(Speaker::Defense), Some(decision));
        assert_eq!(delta.phase, Some(Phase::Verdict));
        assert!(delta.concluded);
        assert_eq!(delta.next_actor, Some(Actor::Judge));
    }

    #[test]
    fn opening_suggestion_is_rejected() {
        let state = state_after(Speaker::Judge);
        let decision = RouterDecision {
            next_speaker: "CONSUMER".into(),
            reasoning: String::new(),
            suggest_phase_change: Some("opening".into()),
            should_conclude: false,
        };
        let delta = TurnRouter.decision_delta(&state, Some(Speaker::Judge), Some(decision));
        assert_eq!(delta.phase, None);
        assert_eq!(delta.next_actor, Some(Actor::Consumer));
        assert_eq!(delta.awaiting_human_input, Some(true));
    }

    #[test]
    fn unroutable_speaker_token_falls_back() {
        let state = state_after(Speaker::Consumer);
        let decision = RouterDecision {
            next_speaker: "WITNESS".into(),
            reasoning: String::new(),
            suggest_phase_change: None,
            should_conclude: false,
        };
        let delta = TurnRouter.decision_delta(&state, Some(Speaker::Consumer), Some(decision));
        assert_eq!(delta.next_actor, Some(Actor::Defense));
    }
}
