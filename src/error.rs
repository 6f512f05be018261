use std::fmt::Display;

use async_openai::error::OpenAIError;
use thiserror::Error;

/// A form field was missing or out of range. The request is never sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("문장을 입력해주세요!")]
    EmptySentence,
    #[error("생성할 문장 수는 {min}~{max} 사이여야 합니다. (입력값: {value})")]
    CountOutOfRange { value: u8, min: u8, max: u8 },
    #[error("학년은 1~3 사이여야 합니다. (입력값: {0})")]
    GradeOutOfRange(u8),
    #[error("모든 필드를 입력해주세요! ({0} 비어 있음)")]
    MissingField(&'static str),
    #[error("OpenAI API 키를 입력해주세요!")]
    MissingApiKey,
}

/// The completion call, or the reading of its reply, failed.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error(transparent)]
    Api(#[from] OpenAIError),
    #[error("failed to connect to the completion API: {0}")]
    Connect(String),
    #[error("no content returned from model")]
    NoContent,
    #[error("expected exactly one `{delimiter}` in the reply, found {found}")]
    Delimiter { delimiter: &'static str, found: usize },
    #[error("reply line has no ':' separator: {line}")]
    MalformedLine { line: String },
}

/// Formats an error and its context into a vector of error message lines
pub fn format_error_lines(context: &str, error: &impl Display) -> Vec<String> {
    let mut lines = vec![context.to_string()];
    lines.extend(error.to_string().lines().map(String::from));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn failure_lines_start_with_context() {
        let err = CompletionError::Connect("invalid api key".into());
        let lines = format_error_lines("오류가 발생했습니다:", &err);

        assert_eq!(
            lines,
            vec![
                "오류가 발생했습니다:",
                "failed to connect to the completion API: invalid api key",
            ]
        );
    }

    #[test]
    fn multiline_causes_become_separate_lines() {
        let error = anyhow!("rate limited\nretry after 20s");
        let lines = format_error_lines("오류가 발생했습니다:", &error);
        assert_eq!(lines[1..], ["rate limited", "retry after 20s"]);

        let lines = format_error_lines("오류가 발생했습니다:", &anyhow!(""));
        assert_eq!(lines, vec!["오류가 발생했습니다:"]);
    }

    #[test]
    fn completion_error_messages_name_the_cause() {
        let err = CompletionError::Delimiter {
            delimiter: "###요약###",
            found: 0,
        };
        assert_eq!(
            err.to_string(),
            "expected exactly one `###요약###` in the reply, found 0"
        );

        let err = CompletionError::MalformedLine {
            line: "최상-1 missing colon".into(),
        };
        assert!(err.to_string().contains("최상-1 missing colon"));
    }

    #[test]
    fn input_error_messages_match_the_form_prompts() {
        assert_eq!(InputError::EmptySentence.to_string(), "문장을 입력해주세요!");
        assert_eq!(
            InputError::MissingApiKey.to_string(),
            "OpenAI API 키를 입력해주세요!"
        );
        assert!(
            InputError::MissingField("과목명")
                .to_string()
                .starts_with("모든 필드를 입력해주세요!")
        );
    }
}
