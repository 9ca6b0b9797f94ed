//! End-of-run persistence: a timestamped directory with the final
//! judgment, the proceedings log, and the before/after comparison.
//!
//! Written unconditionally, including after aborts and faults, so an
//! interrupted proceeding still leaves a usable record.

use std::path::{Path, PathBuf};

use chrono::{Local, Utc};
use serde::Serialize;

use crate::error::{SimResult, SimulationError};
use crate::simulation::ProceedingOutcome;
use crate::state::{JudgmentUpdate, Message, Phase, VerdictDetails};

const FINAL_JUDGMENT_FILE: &str = "final_judgment.json";
const PROCEEDINGS_LOG_FILE: &str = "proceedings_log.json";
const COMPARISON_FILE: &str = "judgment_comparison.json";

#[derive(Serialize)]
struct ProceedingsLog<'a> {
    case_title: &'a str,
    simulation_date: String,
    total_hearings: u32,
    total_turns: u32,
    case_concluded: bool,
    final_phase: Phase,
    proceedings: &'a [Message],
    judgment_modifications: &'a [JudgmentUpdate],
    #[serde(skip_serializing_if = "Option::is_none")]
    verdict: Option<&'a VerdictDetails>,
}

#[derive(Serialize)]
struct JudgmentComparison<'a> {
    original_prediction: &'a serde_json::Value,
    final_judgment: &'a serde_json::Value,
    modifications_count: usize,
    total_exchanges: u32,
}

/// Writes the three run artifacts under a per-run directory.
pub struct ArtifactWriter {
    base_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Persist the outcome into `courtroom_{timestamp}/` under the base
    /// directory and return the created directory.
    pub fn persist(&self, outcome: &ProceedingOutcome) -> SimResult<PathBuf> {
        let dir = self
            .base_dir
            .join(format!("courtroom_{}", Local::now().format("%Y%m%d_%H%M%S")));
        std::fs::create_dir_all(&dir)
            .map_err(|e| SimulationError::Artifact(format!("{}: {}", dir.display(), e)))?;

        outcome.record.save(&dir.join(FINAL_JUDGMENT_FILE))?;
        self.write_proceedings_log(&dir, outcome)?;
        self.write_comparison(&dir, outcome)?;

        tracing::info!(dir = %dir.display(), "simulation artifacts written");
        Ok(dir)
    }

    fn write_proceedings_log(&self, dir: &Path, outcome: &ProceedingOutcome) -> SimResult<()> {
        let state = &outcome.state;
        let log = ProceedingsLog {
            case_title: outcome
                .record
                .str_or("Case_Summary.Title", "Consumer Case"),
            simulation_date: Utc::now().to_rfc3339(),
            total_hearings: state.hearing_number,
            total_turns: state.turn_count,
            case_concluded: state.concluded,
            final_phase: state.phase,
            proceedings: &state.messages,
            judgment_modifications: &state.judgment_updates,
            verdict: state.verdict.as_ref(),
        };
        write_json(&dir.join(PROCEEDINGS_LOG_FILE), &log)
    }

    fn write_comparison(&self, dir: &Path, outcome: &ProceedingOutcome) -> SimResult<()> {
        let comparison = JudgmentComparison {
            original_prediction: &outcome.original,
            final_judgment: outcome.record.value(),
            modifications_count: outcome.state.judgment_updates.len(),
            total_exchanges: outcome.state.turn_count,
        };
        write_json(&dir.join(COMPARISON_FILE), &comparison)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> SimResult<()> {
    let text = serde_json::to_string_pretty(value)?;
    std::fs::write(path, text)
        .map_err(|e| SimulationError::Artifact(format!("{}: {}", path.display(), e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CaseRecord;
    use crate::simulation::Termination;
    use crate::state::{CourtroomState, Speaker, StateDelta};
    use serde_json::json;

    fn outcome() -> ProceedingOutcome {
        let original = json!({
            "Case_Summary": { "Title": "Sharma v. Galaxy Electronics" },
            "Judgment_Reasoning": { "Liability_Confidence": "78%" }
        });
        let mut record = CaseRecord::new(original.clone());
        record.set_field("Judgment_Reasoning.Liability_Confidence", "92%");

        let mut state = CourtroomState::new();
        state.apply(StateDelta {
            messages: vec![Message::now(
                Speaker::Judge,
                "The matter is taken up.",
                Phase::Opening,
            )],
            judgment_updates: vec![JudgmentUpdate {
                field: "Judgment_Reasoning.Liability_Confidence".into(),
                old_value: Some("78%".into()),
                new_value: "92%".into(),
                reason: "unrebutted report".into(),
                updated_by: Speaker::Judge,
            }],
            turn_increment: 3,
            ..Default::default()
        });

        ProceedingOutcome {
            state,
            record,
            original,
            termination: Termination::UserAborted,
        }
    }

    #[test]
    fn persist_writes_all_three_artifacts() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = ArtifactWriter::new(tmp.path()).persist(&outcome()).unwrap();

        assert!(dir
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("courtroom_"));
        for file in [FINAL_JUDGMENT_FILE, PROCEEDINGS_LOG_FILE, COMPARISON_FILE] {
            assert!(dir.join(file).exists(), "missing {}", file);
        }
    }

    #[test]
    fn proceedings_log_reflects_state() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = ArtifactWriter::new(tmp.path()).persist(&outcome()).unwrap();

        let log: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.join(PROCEEDINGS_LOG_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(log["case_title"], "Sharma v. Galaxy Electronics");
        assert_eq!(log["total_turns"], 3);
        assert_eq!(log["case_concluded"], false);
        assert_eq!(log["final_phase"], "opening");
        assert_eq!(log["proceedings"][0]["speaker"], "JUDGE");
        assert_eq!(
            log["judgment_modifications"][0]["updated_by"],
            "JUDGE"
        );
        assert!(log.get("verdict").is_none());
    }

    #[test]
    fn comparison_keeps_the_unmutated_original() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = ArtifactWriter::new(tmp.path()).persist(&outcome()).unwrap();

        let cmp: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.join(COMPARISON_FILE)).unwrap())
                .unwrap();
        assert_eq!(
            cmp["original_prediction"]["Judgment_Reasoning"]["Liability_Confidence"],
            "78%"
        );
        assert_eq!(
            cmp["final_judgment"]["Judgment_Reasoning"]["Liability_Confidence"],
            "92%"
        );
        assert_eq!(cmp["modifications_count"], 1);
        assert_eq!(cmp["total_exchanges"], 3);
    }
}
