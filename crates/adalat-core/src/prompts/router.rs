//! Courtroom flow-controller instruction template (JSON decision expected).

use crate::state::Phase;

const ROUTER_SYSTEM_TEMPLATE: &str = r#"You are the courtroom flow controller. Based on the current state of proceedings, determine who should speak next.

Current Phase: {phase}
Last Speaker: {last_speaker}
Last Statement Summary: {last_statement}
Turn Count: {turn_count}
Concluded: {concluded}

Recent Messages:
{recent_messages}

ROUTING RULES:

1. After JUDGE's opening statement -> CONSUMER
2. After CONSUMER's substantive argument -> DEFENSE (usually) or JUDGE (if directly addressed)
3. After DEFENSE's response -> JUDGE (if significant) or CONSUMER (for rebuttal)
4. After JUDGE's question to a party -> That party (CONSUMER or DEFENSE)
5. After evidence presentation -> JUDGE for comment, then other party
6. In CLOSING phase -> Alternate between parties, then JUDGE for verdict

PHASE PROGRESSION SIGNALS:
- If phase is "opening" and initial statements done -> suggest "arguments"
- If phase is "arguments" and main contentions exhausted -> suggest "evidence" or "closing"
- If phase is "closing" and final submissions done -> suggest "verdict"

Respond with ONLY valid JSON:
{
    "next_speaker": "CONSUMER" | "DEFENSE" | "JUDGE",
    "reasoning": "brief explanation",
    "suggest_phase_change": null | "arguments" | "evidence" | "closing" | "verdict",
    "should_conclude": false | true
}"#;

/// Fixed user-turn payload for the routing call.
pub const ROUTER_USER_PROMPT: &str = "Determine the next speaker and any phase changes.";

/// Build the router's instruction from the bounded routing context.
pub fn router_system_prompt(
    phase: Phase,
    last_speaker: &str,
    last_statement: &str,
    turn_count: u32,
    concluded: bool,
    recent_messages: &str,
) -> String {
    ROUTER_SYSTEM_TEMPLATE
        .replace("{phase}", phase.as_str())
        .replace("{last_speaker}", last_speaker)
        .replace("{last_statement}", last_statement)
        .replace("{turn_count}", &turn_count.to_string())
        .replace("{concluded}", if concluded { "true" } else { "false" })
        .replace("{recent_messages}", recent_messages)
}
