//! Readers for the completion API's plain-text replies.
//!
//! Both flows trust the model to follow the requested line format. There is no
//! schema validation beyond what each reader documents.

mod assessment;
mod variation;

pub use assessment::{
    AssessmentReport, AssessmentResult, SUMMARY_DELIMITER, parse_assessment_reply,
    parse_summary, parse_tier_comments, split_summary,
};
pub use variation::parse_variations;

pub fn trim_line(line: &str) -> Option<String> {
    let trimmed_line = line.trim().to_string();
    if trimmed_line.is_empty() {
        return None;
    }
    Some(trimmed_line)
}

/// Non-empty trimmed lines of `text`, in order.
pub(crate) fn non_empty_lines(text: &str) -> Vec<String> {
    text.lines().filter_map(trim_line).collect()
}
