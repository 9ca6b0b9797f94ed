//! Final judgment instruction template.

/// Role instruction for the judgment-pronouncement call.
pub const VERDICT_SYSTEM_PROMPT: &str =
    "You are an experienced Judge delivering a formal judgment.";

const VERDICT_USER_TEMPLATE: &str = r#"You are delivering the FINAL JUDGMENT in this consumer case.

=== CASE FILE ===

{case_details}

=== PROCEEDINGS SUMMARY ===

Hearings conducted: {hearing_number}
Total exchanges: {turn_count}

Judgment modifications during proceedings:
{updates_summary}

=== FULL TRANSCRIPT ===

{transcript}

=== YOUR TASK ===

Deliver a complete, formal judgment in proper Indian consumer court style:

1. CASE SUMMARY: Brief recap of the dispute
2. ISSUES FOR DETERMINATION: The issues framed
3. FINDINGS ON EACH ISSUE: Analysis with reference to what transpired in proceedings
4. EVIDENCE ASSESSMENT: What evidence was presented and its weight
5. APPLICABLE LAW: Sections of the Consumer Protection Act applied
6. FINAL ORDER: Specific relief granted or complaint dismissed, with amounts
7. COSTS: Whether costs are awarded
8. COMPLIANCE TIMELINE: Time given for compliance

Begin with "JUDGMENT" as a heading and deliver the complete verdict."#;

/// Build the judgment-pronouncement payload from the full proceedings.
pub fn verdict_user_prompt(
    case_details: &str,
    hearing_number: u32,
    turn_count: u32,
    updates_summary: &str,
    transcript: &str,
) -> String {
    VERDICT_USER_TEMPLATE
        .replace("{case_details}", case_details)
        .replace("{hearing_number}", &hearing_number.to_string())
        .replace("{turn_count}", &turn_count.to_string())
        .replace("{updates_summary}", updates_summary)
        .replace("{transcript}", transcript)
}
