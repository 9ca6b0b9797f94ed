//! Adalat CLI: interactive consumer-court simulation over a predicted
//! judgment file.
//!
//! Usage:
//!   cargo run -p adalat-cli -- --case-file path/to/prediction.json
//!
//! The human plays the complainant; a generative judge and defense counsel
//! take the other turns. Artifacts are written under ADALAT_STORAGE_PATH
//! (default ./data/simulations). Requires OPENROUTER_API_KEY in `.env`.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use adalat_core::io::{evidence_statement, rest_statement};
use adalat_core::{
    ArtifactWriter, CaseRecord, ConsumerTurn, Courtroom, CourtroomIo, JudgmentUpdate, Message,
    OpenRouterOracle, Phase, SimConfig, Speaker, Termination,
};
use tracing::info;

const RULE: &str = "════════════════════════════════════════════════════════════════════════════════";
const THIN_RULE: &str = "────────────────────────────────────────";

fn speaker_icon(speaker: Speaker) -> &'static str {
    match speaker {
        Speaker::Judge => "⚖️ ",
        Speaker::Defense => "🛡️ ",
        Speaker::Consumer => "🙋",
        Speaker::System => "ℹ️ ",
    }
}

/// Terminal implementation of the courtroom console.
struct ConsoleIo {
    stdin: std::io::Stdin,
}

impl ConsoleIo {
    fn new() -> Self {
        Self {
            stdin: std::io::stdin(),
        }
    }

    fn read_line(&mut self, prompt: &str) -> std::io::Result<String> {
        print!("{}", prompt);
        std::io::stdout().flush()?;
        let mut line = String::new();
        self.stdin.lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

impl CourtroomIo for ConsoleIo {
    fn consumer_turn(&mut self) -> std::io::Result<ConsumerTurn> {
        println!("\n{}", THIN_RULE);
        println!("  YOUR TURN (Consumer/Complainant)");
        println!("{}", THIN_RULE);
        println!("  Commands:");
        println!("    Type your statement or argument");
        println!("    'evidence' - Present documentary evidence");
        println!("    'rest' - Rest your case");
        println!("    'quit' - Exit simulation");
        println!();

        loop {
            let input = self.read_line("  Your statement: ")?;
            if input.is_empty() {
                continue;
            }
            return Ok(match input.to_lowercase().as_str() {
                adalat_core::io::QUIT_COMMAND => ConsumerTurn::Quit,
                adalat_core::io::REST_COMMAND => ConsumerTurn::Statement(rest_statement()),
                adalat_core::io::EVIDENCE_COMMAND => {
                    println!("\n  Describe the evidence you wish to present:");
                    let description = self.read_line("  Evidence: ")?;
                    ConsumerTurn::Statement(evidence_statement(&description))
                }
                _ => ConsumerTurn::Statement(input),
            });
        }
    }

    fn show_message(&mut self, message: &Message) {
        println!(
            "\n{} {}:",
            speaker_icon(message.speaker),
            message.speaker.as_str()
        );
        println!("{}", message.content);
    }

    fn show_judgment_update(&mut self, update: &JudgmentUpdate) {
        println!("\n📝 COURT RECORD UPDATED:");
        println!("   Field: {}", update.field);
        if let Some(old) = &update.old_value {
            println!("   Previous: {}", old);
        }
        println!("   Updated to: {}", update.new_value);
        println!("   Reason: {}", update.reason);
    }

    fn show_phase_banner(&mut self, phase: Phase) {
        println!("\n{}", RULE);
        println!("{:^80}", phase.banner());
        println!("{}", RULE);
    }

    fn notify(&mut self, text: &str) {
        println!("\n💭 {}", text);
    }
}

fn usage() {
    eprintln!("Adalat — Consumer Court Simulation");
    eprintln!("  --case-file, -f PATH    Judgment prediction JSON file (required)");
    eprintln!();
    eprintln!("Requires OPENROUTER_API_KEY in the environment or .env.");
    eprintln!("Artifacts: ADALAT_STORAGE_PATH (default ./data/simulations)");
}

fn parse_case_file() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "--case-file" | "-f" => return args.next().map(PathBuf::from),
            _ => {}
        }
    }
    None
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let Some(case_path) = parse_case_file() else {
        usage();
        std::process::exit(1);
    };
    if !case_path.exists() {
        eprintln!("❌ Error: Case file not found: {}", case_path.display());
        std::process::exit(1);
    }
    if case_path.extension().and_then(|e| e.to_str()) != Some("json") {
        eprintln!("❌ Error: Case file must be a JSON file: {}", case_path.display());
        std::process::exit(1);
    }

    println!("{}", RULE);
    println!("{:^80}", "DISTRICT CONSUMER DISPUTES REDRESSAL COMMISSION");
    println!("{:^80}", "COURTROOM SIMULATION");
    println!("{}", RULE);

    println!("\n📁 Loading case file: {}", case_path.display());
    let record = CaseRecord::load(&case_path)?;
    println!(
        "\n📋 CASE: {}",
        record.str_or("Case_Summary.Title", "Consumer Case")
    );
    println!("📅 Date: {}", chrono::Local::now().format("%d %B %Y"));

    let oracle = Arc::new(OpenRouterOracle::from_env()?);
    let config = SimConfig::from_env();
    info!(storage = %config.storage_path.display(), "starting simulation");

    let mut console = ConsoleIo::new();
    let outcome = Courtroom::new(oracle).run(record, &mut console).await;

    match &outcome.termination {
        Termination::VerdictPronounced => {}
        Termination::UserAborted => println!("\n⚠️  Proceeding left unconcluded."),
        Termination::Fault(reason) => println!("\n❌ Error during simulation: {}", reason),
    }

    let dir = ArtifactWriter::new(&config.storage_path).persist(&outcome)?;
    println!("\n✅ Final judgment saved to: {}", dir.join("final_judgment.json").display());
    println!("✅ Proceedings log saved to: {}", dir.join("proceedings_log.json").display());
    println!("✅ Judgment comparison saved to: {}", dir.join("judgment_comparison.json").display());

    println!("\n{}", RULE);
    println!("{:^80}", "SIMULATION COMPLETE");
    println!("{}", RULE);
    Ok(())
}
