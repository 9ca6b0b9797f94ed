//! Render the nested case record into role-specific case material.
//!
//! Every accessor tolerates absent fields (`N/A` placeholders, empty
//! bullet lists): the record is schema-agnostic and the oracle may have
//! produced a sparse prediction.

use crate::record::CaseRecord;
use crate::state::{clip, Message};

/// Most recent `count` transcript entries, each truncated to 200 chars,
/// one `[SPEAKER]: content` line per message. Routing context only.
pub fn recent_messages(messages: &[Message], count: usize) -> String {
    let start = messages.len().saturating_sub(count);
    messages[start..]
        .iter()
        .map(|m| {
            let content = clip(&m.content, 200);
            if content.len() < m.content.len() {
                format!("[{}]: {}...", m.speaker.as_str(), content)
            } else {
                format!("[{}]: {}", m.speaker.as_str(), content)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full-content conversation window for an agent turn (bounded by count,
/// not by per-message length).
pub fn conversation_window(messages: &[Message], count: usize) -> String {
    let start = messages.len().saturating_sub(count);
    messages[start..]
        .iter()
        .map(|m| format!("[{}]: {}", m.speaker.as_str(), m.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn bullets(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("  - {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn numbered(items: &[&str]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("  {}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Complete case file rendered for the judge's instruction and for the
/// final-judgment call.
pub fn case_details(record: &CaseRecord) -> String {
    let sections = record
        .object_list("Legal_Grounds.Applicable_Sections")
        .iter()
        .map(|s| {
            format!(
                "  - Section {} ({}): {}",
                s.get("Section").and_then(|v| v.as_str()).unwrap_or(""),
                s.get("Act").and_then(|v| v.as_str()).unwrap_or(""),
                s.get("Description").and_then(|v| v.as_str()).unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let precedents = record
        .object_list("Legal_Grounds.Precedents_Cited")
        .iter()
        .map(|p| {
            format!(
                "  - {} ({}): {}",
                p.get("Case_Name").and_then(|v| v.as_str()).unwrap_or(""),
                p.get("Year").and_then(|v| v.as_str()).unwrap_or(""),
                p.get("Key_Holding").and_then(|v| v.as_str()).unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let issues = record
        .object_list("Judgment_Reasoning.Issues_Framed")
        .iter()
        .map(|i| {
            format!(
                "  Issue {}: {}",
                i.get("Issue_Number")
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
                i.get("Issue").and_then(|v| v.as_str()).unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "CASE TITLE: {title}\nCASE TYPE: {case_type}\n\nCOMPLAINANT'S DETAILS:\nDescription: {consumer_desc}\nClaim Amount: Rs. {claim}\n\nKey Grievances:\n{grievances}\n\nOPPOSITE PARTY DETAILS:\nDescription: {op_desc}\n\nDefense Arguments on Record:\n{defense_args}\n\nFACTS OF THE CASE:\n{facts}\n\nEVIDENCE ON RECORD:\nAvailable:\n{evidence_available}\n\nPotentially Missing:\n{evidence_missing}\n\nAPPLICABLE LAW:\n{sections}\n\nRELEVANT PRECEDENTS:\n{precedents}\n\nPRELIMINARY ASSESSMENT:\nIssues Framed:\n{issues}\n\nCurrent Findings: {findings}\nLiability Status: {liability_status}\nConfidence: {liability_confidence}\n\nProposed Relief:\n  Primary: {relief_type} - Rs. {relief_amount}\n  Total Range: Rs. {relief_min} - Rs. {relief_max}",
        title = record.str_or("Case_Summary.Title", "Consumer Complaint"),
        case_type = record.str_or("Case_Summary.Case_Type", "N/A"),
        consumer_desc = record.str_or("Case_Summary.Consumer_Details.Description", "N/A"),
        claim = record.str_or("Case_Summary.Consumer_Details.Claim_Amount", "N/A"),
        grievances = bullets(&record.str_list("Case_Summary.Consumer_Details.Key_Grievances")),
        op_desc = record.str_or("Case_Summary.Opposite_Party_Details.Description", "N/A"),
        defense_args =
            bullets(&record.str_list("Case_Summary.Opposite_Party_Details.Defense_Arguments")),
        facts = numbered(&record.str_list("Case_Summary.Facts_of_Case")),
        evidence_available = bullets(&record.str_list("Case_Summary.Evidence_Available")),
        evidence_missing = bullets(&record.str_list("Case_Summary.Evidence_Missing")),
        sections = sections,
        precedents = precedents,
        issues = issues,
        findings = record.str_or("Judgment_Reasoning.Findings", "N/A"),
        liability_status = record.str_or("Judgment_Reasoning.Liability_Status", "N/A"),
        liability_confidence = record.str_or("Judgment_Reasoning.Liability_Confidence", "N/A"),
        relief_type = record.str_or("Relief_Granted.Primary_Relief.Type", "N/A"),
        relief_amount = record.str_or("Relief_Granted.Primary_Relief.Amount", "N/A"),
        relief_min = record.str_or("Relief_Granted.Total_Compensation_Range.Minimum", "N/A"),
        relief_max = record.str_or("Relief_Granted.Total_Compensation_Range.Maximum", "N/A"),
    )
}

/// The defense counsel's brief: client position, strategic counters, and
/// the gaps in the complainant's evidence worth exploiting.
pub fn defense_brief(record: &CaseRecord) -> String {
    format!(
        "CLIENT: {client}\n\nYOUR DEFENSE POINTS:\n{points}\n\nSTRATEGIC COUNTER-ARGUMENTS:\n{counters}\n\nCRITICAL MOMENTS TO EXPLOIT:\n{moments}\n\nEVIDENCE GAPS IN COMPLAINANT'S CASE:\n{gaps}",
        client = record.str_or("Case_Summary.Opposite_Party_Details.Description", "Retail Seller"),
        points = bullets(&record.str_list("Case_Summary.Opposite_Party_Details.Defense_Arguments")),
        counters =
            bullets(&record.str_list("Simulation_Metadata.Key_Arguments_For_Opposite_Party")),
        moments = bullets(&record.str_list("Simulation_Metadata.Critical_Moments")),
        gaps = bullets(&record.str_list("Case_Summary.Evidence_Missing")),
    )
}

/// The complainant's side of the record, rendered as context for the
/// defense counsel.
pub fn consumer_allegations(record: &CaseRecord) -> String {
    format!(
        "CLAIM AMOUNT: Rs. {claim}\n\nGRIEVANCES:\n{grievances}\n\nTHEIR KEY ARGUMENTS:\n{arguments}\n\nEVIDENCE THEY POSSESS:\n{evidence}",
        claim = record.str_or("Case_Summary.Consumer_Details.Claim_Amount", "N/A"),
        grievances = bullets(&record.str_list("Case_Summary.Consumer_Details.Key_Grievances")),
        arguments = bullets(&record.str_list("Simulation_Metadata.Key_Arguments_For_Consumer")),
        evidence = bullets(&record.str_list("Case_Summary.Evidence_Available")),
    )
}
