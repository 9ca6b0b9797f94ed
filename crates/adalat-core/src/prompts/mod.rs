//! Prompt templates for the courtroom roles and turn routing.
//!
//! Templates use `{placeholder}` substitution; the brief builders render
//! the nested case record into the role-specific case material.

pub mod briefs;
pub mod defense;
pub mod judge;
pub mod router;
pub mod verdict;

pub use briefs::{
    case_details, consumer_allegations, conversation_window, defense_brief, recent_messages,
};
pub use defense::{defense_system_prompt, defense_user_prompt, phase_instructions};
pub use judge::{judge_system_prompt, judge_user_prompt};
pub use router::{router_system_prompt, ROUTER_USER_PROMPT};
pub use verdict::{verdict_user_prompt, VERDICT_SYSTEM_PROMPT};
