//! Response parser: extracts control directives from free-text agent output.
//!
//! Agents embed a small tag sublanguage in their responses:
//!
//! - `<next_speaker>CONSUMER</next_speaker>`
//! - `<phase_transition>arguments</phase_transition>`
//! - `<judgment_update> FIELD: ... / OLD_VALUE: ... / NEW_VALUE: ... / REASON: ... </judgment_update>`
//!
//! Extraction is tolerant: absent tags yield `None`/empty, and a malformed
//! judgment-update body is dropped without aborting the turn or the other
//! directives in the same response. All recognized tags are stripped from
//! the clean content so no markup reaches the transcript or the console.

use once_cell::sync::Lazy;
use regex::Regex;

static NEXT_SPEAKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<next_speaker>\s*(\w+)\s*</next_speaker>").expect("valid regex")
});

static PHASE_TRANSITION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<phase_transition>\s*(\w+)\s*</phase_transition>").expect("valid regex")
});

static UPDATE_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<judgment_update>(.*?)</judgment_update>").expect("valid regex")
});

static UPDATE_BODY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)FIELD:\s*(.+?)\s*(?:OLD_VALUE:\s*(.+?)\s*)?NEW_VALUE:\s*(.+?)\s*REASON:\s*(.+?)\s*$",
    )
    .expect("valid regex")
});

/// A judgment-edit directive as written by the agent. The `old_value` here
/// is advisory only; the audit trail re-derives it from the live record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateDirective {
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: String,
    pub reason: String,
}

/// Structured control signals extracted from one agent response.
#[derive(Debug, Clone, Default)]
pub struct ParsedResponse {
    /// The response with all recognized tags stripped and trimmed.
    pub clean_content: String,
    /// Uppercased speaker token, if a next-speaker tag was present.
    pub next_speaker: Option<String>,
    /// Lowercased phase token, if a phase-transition tag was present.
    pub phase_transition: Option<String>,
    /// All well-formed judgment-update directives, in document order.
    pub judgment_updates: Vec<UpdateDirective>,
}

/// Single pass over raw agent output. Tag names match case-insensitively;
/// captured tokens are case-normalized (speaker upper, phase lower) so
/// downstream comparisons are exact.
pub fn parse_agent_response(raw: &str) -> ParsedResponse {
    let mut parsed = ParsedResponse::default();

    if let Some(caps) = NEXT_SPEAKER_RE.captures(raw) {
        parsed.next_speaker = Some(caps[1].to_uppercase());
    }
    if let Some(caps) = PHASE_TRANSITION_RE.captures(raw) {
        parsed.phase_transition = Some(caps[1].to_lowercase());
    }

    for block in UPDATE_BLOCK_RE.captures_iter(raw) {
        match UPDATE_BODY_RE.captures(&block[1]) {
            Some(body) => parsed.judgment_updates.push(UpdateDirective {
                field: body[1].trim().to_string(),
                old_value: body.get(2).map(|m| m.as_str().trim().to_string()),
                new_value: body[3].trim().to_string(),
                reason: body[4].trim().to_string(),
            }),
            // Malformed body: drop the directive, keep the rest of the turn.
            None => tracing::debug!("dropping malformed judgment_update block"),
        }
    }

    let stripped = NEXT_SPEAKER_RE.replace_all(raw, "");
    let stripped = PHASE_TRANSITION_RE.replace_all(&stripped, "");
    let stripped = UPDATE_BLOCK_RE.replace_all(&stripped, "");
    parsed.clean_content = stripped.trim().to_string();

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_speaker_is_extracted_and_uppercased() {
        let parsed = parse_agent_response("Heard. <next_speaker>consumer</next_speaker>");
        assert_eq!(parsed.next_speaker.as_deref(), Some("CONSUMER"));
        assert_eq!(parsed.clean_content, "Heard.");
    }

    #[test]
    fn phase_transition_is_extracted_and_lowercased() {
        let parsed =
            parse_agent_response("We proceed. <PHASE_TRANSITION>Arguments</PHASE_TRANSITION>");
        assert_eq!(parsed.phase_transition.as_deref(), Some("arguments"));
        assert_eq!(parsed.clean_content, "We proceed.");
    }

    #[test]
    fn absent_tags_yield_none_without_error() {
        let parsed = parse_agent_response("Plain judicial observation.");
        assert_eq!(parsed.next_speaker, None);
        assert_eq!(parsed.phase_transition, None);
        assert!(parsed.judgment_updates.is_empty());
        assert_eq!(parsed.clean_content, "Plain judicial observation.");
    }

    #[test]
    fn judgment_update_block_is_parsed_and_stripped() {
        let raw = "I revise my assessment.\n<judgment_update>\nFIELD: Judgment_Reasoning.Liability_Confidence\nOLD_VALUE: 78%\nNEW_VALUE: 92%\nREASON: Technical report went unrebutted\n</judgment_update>\nProceed.";
        let parsed = parse_agent_response(raw);
        assert_eq!(parsed.judgment_updates.len(), 1);
        let update = &parsed.judgment_updates[0];
        assert_eq!(update.field, "Judgment_Reasoning.Liability_Confidence");
        assert_eq!(update.old_value.as_deref(), Some("78%"));
        assert_eq!(update.new_value, "92%");
        assert_eq!(update.reason, "Technical report went unrebutted");
        assert!(!parsed.clean_content.contains("judgment_update"));
        assert!(parsed.clean_content.contains("I revise my assessment."));
        assert!(parsed.clean_content.contains("Proceed."));
    }

    #[test]
    fn old_value_is_optional() {
        let raw = "<judgment_update>FIELD: Relief_Granted.Costs NEW_VALUE: Rs. 5000 REASON: conduct of parties</judgment_update>";
        let parsed = parse_agent_response(raw);
        assert_eq!(parsed.judgment_updates.len(), 1);
        assert_eq!(parsed.judgment_updates[0].old_value, None);
        assert_eq!(parsed.judgment_updates[0].new_value, "Rs. 5000");
    }

    #[test]
    fn multiple_updates_keep_document_order() {
        let raw = "<judgment_update>FIELD: A NEW_VALUE: 1 REASON: r1</judgment_update>\n<judgment_update>FIELD: B NEW_VALUE: 2 REASON: r2</judgment_update>";
        let parsed = parse_agent_response(raw);
        let fields: Vec<&str> = parsed
            .judgment_updates
            .iter()
            .map(|u| u.field.as_str())
            .collect();
        assert_eq!(fields, vec!["A", "B"]);
    }

    #[test]
    fn malformed_update_is_dropped_but_still_stripped() {
        let raw = "Before. <judgment_update>no structured body here</judgment_update> After. <judgment_update>FIELD: X NEW_VALUE: y REASON: z</judgment_update>";
        let parsed = parse_agent_response(raw);
        assert_eq!(parsed.judgment_updates.len(), 1);
        assert_eq!(parsed.judgment_updates[0].field, "X");
        assert!(!parsed.clean_content.contains('<'));
        assert!(parsed.clean_content.contains("Before."));
        assert!(parsed.clean_content.contains("After."));
    }

    #[test]
    fn no_tag_like_residue_remains_in_clean_content() {
        let raw = "Order reserved.\n<next_speaker>DEFENSE</next_speaker>\n<phase_transition>closing</phase_transition>\n<judgment_update>FIELD: F NEW_VALUE: v REASON: r</judgment_update>";
        let parsed = parse_agent_response(raw);
        assert!(!parsed.clean_content.contains("next_speaker"));
        assert!(!parsed.clean_content.contains("phase_transition"));
        assert!(!parsed.clean_content.contains("judgment_update"));
        assert_eq!(parsed.clean_content, "Order reserved.");
    }

    #[test]
    fn multiline_values_are_captured() {
        let raw = "<judgment_update>\nFIELD: Judgment_Reasoning.Findings\nNEW_VALUE: The opposite party's service\nlog contradicts the claimed timeline\nREASON: Exhibit D-2\n</judgment_update>";
        let parsed = parse_agent_response(raw);
        assert_eq!(parsed.judgment_updates.len(), 1);
        assert!(parsed.judgment_updates[0]
            .new_value
            .contains("log contradicts"));
    }
}
