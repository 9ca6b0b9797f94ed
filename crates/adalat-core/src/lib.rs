//! adalat-core: a multi-turn Indian consumer-court proceeding simulator.
//!
//! A human complainant argues their case against a generative defense
//! counsel before a generative presiding judge. The orchestrator owns all
//! state; agents, router, and verdict generator return deltas it merges.
//! Every run ends with persisted artifacts, however it terminated.

pub mod agents;
pub mod artifacts;
pub mod config;
pub mod error;
pub mod io;
pub mod oracle;
pub mod parser;
pub mod prompts;
pub mod record;
pub mod router;
pub mod simulation;
pub mod state;
pub mod verdict;

pub use agents::{DefenseCounsel, PresidingJudge, SpeakerAgent};
pub use artifacts::ArtifactWriter;
pub use config::SimConfig;
pub use error::{OracleError, SimResult, SimulationError};
pub use io::{ConsumerTurn, CourtroomIo};
pub use oracle::{CompletionOracle, OpenRouterOracle};
pub use parser::{parse_agent_response, ParsedResponse, UpdateDirective};
pub use record::CaseRecord;
pub use router::TurnRouter;
pub use simulation::{Courtroom, ProceedingOutcome, Termination, MAX_TURNS};
pub use state::{
    Actor, CourtroomState, JudgmentUpdate, Message, Phase, Speaker, StateDelta, VerdictDetails,
};
pub use verdict::VerdictGenerator;
