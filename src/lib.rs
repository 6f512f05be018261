//! Helpers for writing Korean student-record text with an LLM.
//!
//! Two independent flows share nothing but the completion backend:
//! sentence variations ([`flows::generate_variations`]) and tiered
//! assessment comments ([`flows::generate_assessment`]).

pub mod config;
pub mod error;
pub mod flows;
pub mod llm;
pub mod outcome;
pub mod palette;
pub mod parser;
pub mod prompts;
pub mod render;
pub mod request;
pub mod tier;
pub mod tui;
