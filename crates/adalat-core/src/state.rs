//! Proceeding state schema: speakers, phases, transcript messages, the
//! judgment audit trail, and the mutable aggregate the orchestrator owns.
//!
//! Components never mutate `CourtroomState` directly; they return a
//! [`StateDelta`] that the orchestrator merges via [`CourtroomState::apply`].
//! `apply` is where the ordering guarantees live: messages and judgment
//! updates are append-only, the turn count only grows, and the concluded
//! flag never resets once set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A party on the record. SYSTEM is reserved for clerk-style notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Speaker {
    Judge,
    Defense,
    Consumer,
    System,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::Judge => "JUDGE",
            Speaker::Defense => "DEFENSE",
            Speaker::Consumer => "CONSUMER",
            Speaker::System => "SYSTEM",
        }
    }
}

/// Dispatch target for the next loop iteration. `Router` is a transient
/// pseudo-target (it never appears in the transcript) and `Verdict` is the
/// absorbing pre-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Judge,
    Defense,
    Consumer,
    Router,
    Verdict,
}

impl Actor {
    /// Resolve an uppercased speaker token from a directive. Unknown tokens
    /// fall through to the router, which owns the routing decision.
    pub fn from_token(token: &str) -> Self {
        match token {
            "JUDGE" => Actor::Judge,
            "DEFENSE" => Actor::Defense,
            "CONSUMER" => Actor::Consumer,
            _ => Actor::Router,
        }
    }
}

/// The five ordered stages of a proceeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Opening,
    Arguments,
    Evidence,
    Closing,
    Verdict,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Opening => "opening",
            Phase::Arguments => "arguments",
            Phase::Evidence => "evidence",
            Phase::Closing => "closing",
            Phase::Verdict => "verdict",
        }
    }

    /// Parse a lowercased phase token. Anything outside the five known
    /// phases yields `None` and the caller leaves the phase unchanged.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "opening" => Some(Phase::Opening),
            "arguments" => Some(Phase::Arguments),
            "evidence" => Some(Phase::Evidence),
            "closing" => Some(Phase::Closing),
            "verdict" => Some(Phase::Verdict),
            _ => None,
        }
    }

    /// Banner title shown when the proceeding enters this phase.
    pub fn banner(&self) -> &'static str {
        match self {
            Phase::Opening => "OPENING OF PROCEEDINGS",
            Phase::Arguments => "ARGUMENTS",
            Phase::Evidence => "EVIDENCE EXAMINATION",
            Phase::Closing => "CLOSING SUBMISSIONS",
            Phase::Verdict => "FINAL JUDGMENT",
        }
    }
}

/// An entry in the append-only transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub speaker: Speaker,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub phase: Phase,
}

impl Message {
    pub fn now(speaker: Speaker, content: impl Into<String>, phase: Phase) -> Self {
        Self {
            speaker,
            content: content.into(),
            timestamp: Utc::now(),
            phase,
        }
    }
}

/// One audited, field-level edit applied to the case record during the
/// proceeding. `old_value` is always re-read from the live record at
/// mutation time, never trusted from the directive text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgmentUpdate {
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: String,
    pub reason: String,
    pub updated_by: Speaker,
}

/// Final verdict, produced exactly once per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdictDetails {
    pub summary: String,
    pub issues_determined: serde_json::Value,
    pub final_order: String,
    pub relief_granted: serde_json::Value,
    pub costs: String,
    pub pronounced_on: String,
}

/// The mutable proceeding aggregate, owned by the orchestrator.
#[derive(Debug, Clone)]
pub struct CourtroomState {
    pub messages: Vec<Message>,
    pub judgment_updates: Vec<JudgmentUpdate>,
    pub phase: Phase,
    pub hearing_number: u32,
    pub turn_count: u32,
    pub next_actor: Actor,
    pub concluded: bool,
    pub awaiting_human_input: bool,
    pub last_significant_statement: String,
    pub verdict: Option<VerdictDetails>,
}

impl CourtroomState {
    /// Fresh state at simulation start: opening phase, Judge to open.
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            judgment_updates: Vec::new(),
            phase: Phase::Opening,
            hearing_number: 1,
            turn_count: 0,
            next_actor: Actor::Judge,
            concluded: false,
            awaiting_human_input: false,
            last_significant_statement: String::new(),
            verdict: None,
        }
    }

    /// Merge a component's delta. Messages and judgment updates are
    /// appended in order; `concluded` is monotonic and never resets.
    pub fn apply(&mut self, delta: StateDelta) {
        self.messages.extend(delta.messages);
        self.judgment_updates.extend(delta.judgment_updates);
        if let Some(phase) = delta.phase {
            self.phase = phase;
        }
        if let Some(next) = delta.next_actor {
            self.next_actor = next;
        }
        if delta.concluded {
            self.concluded = true;
        }
        if let Some(awaiting) = delta.awaiting_human_input {
            self.awaiting_human_input = awaiting;
        }
        if let Some(statement) = delta.last_significant_statement {
            self.last_significant_statement = statement;
        }
        if self.verdict.is_none() {
            if let Some(verdict) = delta.verdict {
                self.verdict = Some(verdict);
            }
        }
        self.turn_count += delta.turn_increment;
    }

    /// The most recent `count` transcript entries, oldest first.
    pub fn recent_messages(&self, count: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(count);
        &self.messages[start..]
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

impl Default for CourtroomState {
    fn default() -> Self {
        Self::new()
    }
}

/// State changes returned by an actor, merged exclusively by the
/// orchestrator. `concluded: true` requests conclusion; `false` is a no-op
/// so a delta can never un-conclude a proceeding.
#[derive(Debug, Default)]
pub struct StateDelta {
    pub messages: Vec<Message>,
    pub judgment_updates: Vec<JudgmentUpdate>,
    pub phase: Option<Phase>,
    pub next_actor: Option<Actor>,
    pub concluded: bool,
    pub awaiting_human_input: Option<bool>,
    pub last_significant_statement: Option<String>,
    pub verdict: Option<VerdictDetails>,
    pub turn_increment: u32,
}

/// Char-safe prefix used for bounded context snapshots (`&str[..n]` would
/// panic on multi-byte content).
pub fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concluded_is_monotonic() {
        let mut state = CourtroomState::new();
        state.apply(StateDelta {
            concluded: true,
            ..Default::default()
        });
        assert!(state.concluded);

        // A later delta without the flag must not reset it.
        state.apply(StateDelta {
            next_actor: Some(Actor::Consumer),
            ..Default::default()
        });
        assert!(state.concluded);
    }

    #[test]
    fn turn_count_only_grows_by_increment() {
        let mut state = CourtroomState::new();
        state.apply(StateDelta {
            turn_increment: 1,
            ..Default::default()
        });
        state.apply(StateDelta::default()); // router-style delta
        state.apply(StateDelta {
            turn_increment: 1,
            ..Default::default()
        });
        assert_eq!(state.turn_count, 2);
    }

    #[test]
    fn messages_are_append_only() {
        let mut state = CourtroomState::new();
        state.apply(StateDelta {
            messages: vec![Message::now(Speaker::Judge, "first", Phase::Opening)],
            ..Default::default()
        });
        state.apply(StateDelta {
            messages: vec![Message::now(Speaker::Consumer, "second", Phase::Opening)],
            ..Default::default()
        });
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[0].content, "first");
        assert_eq!(state.messages[1].content, "second");
    }

    #[test]
    fn verdict_is_set_at_most_once() {
        let mut state = CourtroomState::new();
        let verdict = VerdictDetails {
            summary: "first".into(),
            issues_determined: serde_json::Value::Null,
            final_order: "order".into(),
            relief_granted: serde_json::Value::Null,
            costs: "none".into(),
            pronounced_on: "01 January 2026".into(),
        };
        let mut second = verdict.clone();
        second.summary = "second".into();

        state.apply(StateDelta {
            verdict: Some(verdict),
            ..Default::default()
        });
        state.apply(StateDelta {
            verdict: Some(second),
            ..Default::default()
        });
        assert_eq!(state.verdict.as_ref().map(|v| v.summary.as_str()), Some("first"));
    }

    #[test]
    fn clip_respects_char_boundaries() {
        assert_eq!(clip("abcdef", 3), "abc");
        assert_eq!(clip("ab", 3), "ab");
        // Devanagari: each char is multiple bytes.
        assert_eq!(clip("अदालत", 3), "अदा");
    }

    #[test]
    fn unknown_speaker_token_routes_to_router() {
        assert_eq!(Actor::from_token("JUDGE"), Actor::Judge);
        assert_eq!(Actor::from_token("WITNESS"), Actor::Router);
    }
}
