//! Generative speaker agents: the presiding judge and the defense counsel.
//!
//! An agent turn is prompt-building, one oracle call, directive parsing,
//! and a [`StateDelta`] describing what the turn changed. Agents never
//! touch `CourtroomState` directly; the orchestrator merges their deltas.

pub mod defense;
pub mod judge;

pub use defense::DefenseCounsel;
pub use judge::PresidingJudge;

use crate::error::OracleError;
use crate::oracle::CompletionOracle;
use crate::parser::{parse_agent_response, ParsedResponse};
use crate::record::CaseRecord;
use crate::state::{CourtroomState, Speaker, StateDelta};
use async_trait::async_trait;

/// A generative participant in the proceeding.
#[async_trait]
pub trait SpeakerAgent: Send + Sync {
    /// Transcript identity of this agent.
    fn speaker(&self) -> Speaker;

    /// Sampling temperature for this role.
    fn temperature(&self) -> f32;

    /// Build the (system, user) prompt pair for the current turn.
    fn build_prompt(&self, state: &CourtroomState, record: &CaseRecord) -> (String, String);

    /// Turn the parsed response into a state delta, applying any record
    /// edits the directives request.
    fn apply_response(
        &self,
        state: &CourtroomState,
        record: &mut CaseRecord,
        parsed: ParsedResponse,
    ) -> StateDelta;

    /// One full turn: prompt, oracle call, directive extraction, delta.
    async fn take_turn(
        &self,
        oracle: &dyn CompletionOracle,
        state: &CourtroomState,
        record: &mut CaseRecord,
    ) -> Result<StateDelta, OracleError> {
        let (system, user) = self.build_prompt(state, record);
        let raw = oracle.complete(&system, &user, self.temperature()).await?;
        tracing::debug!(speaker = self.speaker().as_str(), chars = raw.len(), "agent turn completed");
        let parsed = parse_agent_response(&raw);
        Ok(self.apply_response(state, record, parsed))
    }
}
