//! The single-threaded proceeding loop: dispatches one actor per
//! iteration, merges its delta, and terminates through verdict, user
//! abort, or fault. Whatever the termination, the accumulated state is
//! returned so the artifacts can always be written.

use std::sync::Arc;

use crate::agents::{DefenseCounsel, PresidingJudge, SpeakerAgent};
use crate::io::{ConsumerTurn, CourtroomIo};
use crate::oracle::CompletionOracle;
use crate::record::CaseRecord;
use crate::router::TurnRouter;
use crate::state::{Actor, CourtroomState, Message, Phase, Speaker, StateDelta};
use crate::verdict::VerdictGenerator;

/// Hard ceiling on counted exchanges; reaching it forces the verdict.
pub const MAX_TURNS: u32 = 30;

const SIGNIFICANT_KEYWORDS: [&str; 12] = [
    "exhibit",
    "affidavit",
    "submit",
    "produce",
    "place on record",
    "your honor",
    "may it please the court",
    "conclusively",
    "no evidence",
    "burden of proof",
    "fabricat",
    "false",
];

/// Whether the judge takes the floor after a defense turn. Triggers on an
/// explicit request, on a legally significant statement once at least two
/// exchanges have passed since the judge last spoke, or unconditionally
/// after four such exchanges.
pub fn judge_should_intervene(requested: bool, defense_text: &str, turns_since_judge: u32) -> bool {
    if requested {
        return true;
    }
    let lower = defense_text.to_lowercase();
    if turns_since_judge >= 2 && SIGNIFICANT_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return true;
    }
    turns_since_judge >= 4
}

/// How a proceeding ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// The judgment was pronounced and recorded.
    VerdictPronounced,
    /// The complainant quit before conclusion.
    UserAborted,
    /// An oracle or input failure ended the run early.
    Fault(String),
}

/// Everything a finished (or interrupted) run leaves behind.
pub struct ProceedingOutcome {
    pub state: CourtroomState,
    pub record: CaseRecord,
    /// The case document as loaded, before any courtroom edits.
    pub original: serde_json::Value,
    pub termination: Termination,
}

/// Owns the agents and drives the turn loop.
pub struct Courtroom {
    judge: PresidingJudge,
    defense: DefenseCounsel,
    router: TurnRouter,
    verdict: VerdictGenerator,
    oracle: Arc<dyn CompletionOracle>,
}

impl Courtroom {
    pub fn new(oracle: Arc<dyn CompletionOracle>) -> Self {
        Self {
            judge: PresidingJudge,
            defense: DefenseCounsel,
            router: TurnRouter,
            verdict: VerdictGenerator,
            oracle,
        }
    }

    /// Run the proceeding to termination. Never returns an error: faults
    /// are folded into the outcome so partial state still gets persisted.
    pub async fn run(&self, record: CaseRecord, io: &mut dyn CourtroomIo) -> ProceedingOutcome {
        let original = record.value().clone();
        let mut record = record;
        let mut state = CourtroomState::new();
        io.show_phase_banner(state.phase);

        // Counted exchanges since the judge last spoke.
        let mut intervention_counter: u32 = 0;

        let termination = loop {
            let actor = if state.concluded || state.turn_count >= MAX_TURNS {
                if !state.concluded {
                    io.notify("Maximum turns reached. Proceeding to verdict.");
                }
                Actor::Verdict
            } else {
                state.next_actor
            };

            match actor {
                Actor::Judge => {
                    io.notify("The Hon'ble Judge is considering...");
                    let phase_before = state.phase;
                    let delta = match self
                        .judge
                        .take_turn(self.oracle.as_ref(), &state, &mut record)
                        .await
                    {
                        Ok(delta) => delta,
                        Err(err) => break Termination::Fault(err.to_string()),
                    };
                    intervention_counter = 0;
                    for update in &delta.judgment_updates {
                        io.show_judgment_update(update);
                    }
                    for message in &delta.messages {
                        io.show_message(message);
                    }
                    state.apply(delta);
                    if state.phase != phase_before {
                        io.show_phase_banner(state.phase);
                    }
                }
                Actor::Consumer => match io.consumer_turn() {
                    Ok(ConsumerTurn::Quit) => {
                        io.notify("Simulation terminated by user.");
                        break Termination::UserAborted;
                    }
                    Ok(ConsumerTurn::Statement(text)) => {
                        let message = Message::now(Speaker::Consumer, text, state.phase);
                        io.show_message(&message);
                        intervention_counter += 1;
                        state.apply(StateDelta {
                            messages: vec![message],
                            next_actor: Some(Actor::Defense),
                            awaiting_human_input: Some(false),
                            turn_increment: 1,
                            ..Default::default()
                        });
                    }
                    Err(err) => break Termination::Fault(err.to_string()),
                },
                Actor::Defense => {
                    io.notify("Defense counsel is preparing response...");
                    let delta = match self
                        .defense
                        .take_turn(self.oracle.as_ref(), &state, &mut record)
                        .await
                    {
                        Ok(delta) => delta,
                        Err(err) => break Termination::Fault(err.to_string()),
                    };
                    intervention_counter += 1;
                    let requested_judge = delta.next_actor == Some(Actor::Judge);
                    let statement = delta
                        .messages
                        .last()
                        .map(|m| m.content.clone())
                        .unwrap_or_default();
                    for message in &delta.messages {
                        io.show_message(message);
                    }
                    state.apply(delta);

                    let next =
                        if judge_should_intervene(requested_judge, &statement, intervention_counter)
                        {
                            Actor::Judge
                        } else {
                            Actor::Consumer
                        };
                    state.apply(StateDelta {
                        next_actor: Some(next),
                        awaiting_human_input: Some(next == Actor::Consumer),
                        ..Default::default()
                    });
                }
                Actor::Router => {
                    let delta = self.router.decide(self.oracle.as_ref(), &state).await;
                    state.apply(delta);
                }
                Actor::Verdict => {
                    io.notify("The Hon'ble Judge is preparing the final verdict...");
                    io.show_phase_banner(Phase::Verdict);
                    match self
                        .verdict
                        .pronounce(self.oracle.as_ref(), &state, &record)
                        .await
                    {
                        Ok(delta) => {
                            for message in &delta.messages {
                                io.show_message(message);
                            }
                            state.apply(delta);
                            break Termination::VerdictPronounced;
                        }
                        Err(err) => break Termination::Fault(err.to_string()),
                    }
                }
            }
        };

        ProceedingOutcome {
            state,
            record,
            original,
            termination,
        }
    }
}
