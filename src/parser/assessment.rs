use std::collections::BTreeMap;

use crate::error::CompletionError;
use crate::request::AssessmentVariant;
use crate::tier::Tier;

use super::{non_empty_lines, trim_line};

/// Marker the extended prompt asks the model to place before its summary.
pub const SUMMARY_DELIMITER: &str = "###요약###";

/// Comments grouped by tier. Every tier is present, possibly with no comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentResult {
    comments: BTreeMap<Tier, Vec<String>>,
}

impl AssessmentResult {
    pub fn new() -> Self {
        Self {
            comments: Tier::ALL.into_iter().map(|tier| (tier, Vec::new())).collect(),
        }
    }

    pub fn comments(&self, tier: Tier) -> &[String] {
        self.comments.get(&tier).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn push(&mut self, tier: Tier, comment: String) {
        self.comments.entry(tier).or_default().push(comment);
    }

    /// Tiers with their comments, in fixed tier order.
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &[String])> {
        self.comments
            .iter()
            .map(|(tier, comments)| (*tier, comments.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.comments.values().all(Vec::is_empty)
    }
}

impl Default for AssessmentResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Parsed reply of the assessment flow. `summary` is only set for the
/// extended variant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssessmentReport {
    pub tiers: AssessmentResult,
    pub summary: Option<Vec<String>>,
}

impl AssessmentReport {
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty() && self.summary.as_ref().is_none_or(Vec::is_empty)
    }
}

/// Splits a reply around [`SUMMARY_DELIMITER`].
///
/// Exactly one occurrence is required; zero or several fail the request.
pub fn split_summary(reply: &str) -> Result<(&str, &str), CompletionError> {
    let found = reply.matches(SUMMARY_DELIMITER).count();
    if found != 1 {
        return Err(CompletionError::Delimiter {
            delimiter: SUMMARY_DELIMITER,
            found,
        });
    }
    reply
        .split_once(SUMMARY_DELIMITER)
        .ok_or(CompletionError::Delimiter {
            delimiter: SUMMARY_DELIMITER,
            found,
        })
}

/// Buckets `<tier>-<index>: <text>` lines by tier.
///
/// The text after the first `:` is kept. Lines that start with no tier label
/// are dropped. A tier line without any `:` fails the whole reply.
pub fn parse_tier_comments(segment: &str) -> Result<AssessmentResult, CompletionError> {
    let mut result = AssessmentResult::new();

    for line in segment.lines().filter_map(trim_line) {
        let Some(tier) = Tier::match_line(&line) else {
            continue;
        };
        let (_, comment) = line
            .split_once(':')
            .ok_or_else(|| CompletionError::MalformedLine { line: line.clone() })?;
        result.push(tier, comment.trim().to_string());
    }

    Ok(result)
}

pub fn parse_summary(segment: &str) -> Vec<String> {
    non_empty_lines(segment)
}

pub fn parse_assessment_reply(
    reply: &str,
    variant: AssessmentVariant,
) -> Result<AssessmentReport, CompletionError> {
    let reply = reply.trim();

    if !variant.expects_summary() {
        return Ok(AssessmentReport {
            tiers: parse_tier_comments(reply)?,
            summary: None,
        });
    }

    let (assessment, summary) = split_summary(reply)?;
    Ok(AssessmentReport {
        tiers: parse_tier_comments(assessment)?,
        summary: Some(parse_summary(summary)),
    })
}
