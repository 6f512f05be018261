use clap::ValueEnum;

use crate::error::InputError;

pub const MIN_VARIATIONS: u8 = 1;
pub const MAX_VARIATIONS: u8 = 10;
pub const DEFAULT_VARIATIONS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchoolLevel {
    /// 중학교
    Middle,
    /// 고등학교
    High,
}

impl SchoolLevel {
    pub fn label(self) -> &'static str {
        match self {
            SchoolLevel::Middle => "중학교",
            SchoolLevel::High => "고등학교",
        }
    }
}

/// Which assessment prompt to send. `Extended` adds the writing-policy
/// system prompt and asks for a delimited summary section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssessmentVariant {
    #[default]
    Basic,
    Extended,
}

impl AssessmentVariant {
    pub fn expects_summary(self) -> bool {
        matches!(self, AssessmentVariant::Extended)
    }
}

/// Input for the variation flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    sentence: String,
    count: u8,
}

impl GenerationRequest {
    pub fn new(sentence: impl Into<String>, count: u8) -> Result<Self, InputError> {
        let sentence = sentence.into();
        if sentence.trim().is_empty() {
            return Err(InputError::EmptySentence);
        }
        if !(MIN_VARIATIONS..=MAX_VARIATIONS).contains(&count) {
            return Err(InputError::CountOutOfRange {
                value: count,
                min: MIN_VARIATIONS,
                max: MAX_VARIATIONS,
            });
        }
        Ok(Self { sentence, count })
    }

    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    pub fn count(&self) -> u8 {
        self.count
    }
}

/// Input for the assessment flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentRequest {
    pub school: SchoolLevel,
    pub grade: u8,
    pub subject: String,
    pub content: String,
    pub achievement: String,
}

impl AssessmentRequest {
    pub fn new(
        school: SchoolLevel,
        grade: u8,
        subject: impl Into<String>,
        content: impl Into<String>,
        achievement: impl Into<String>,
    ) -> Result<Self, InputError> {
        if !(1..=3).contains(&grade) {
            return Err(InputError::GradeOutOfRange(grade));
        }
        let subject = required(subject.into(), "과목명")?;
        let content = required(content.into(), "학습 내용")?;
        let achievement = required(achievement.into(), "성취수준")?;

        Ok(Self {
            school,
            grade,
            subject,
            content,
            achievement,
        })
    }
}

/// Raw assessment form fields as entered, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentForm {
    pub school: SchoolLevel,
    pub grade: u8,
    pub subject: String,
    pub content: String,
    pub achievement: String,
}

impl AssessmentForm {
    pub fn validate(self) -> Result<AssessmentRequest, InputError> {
        AssessmentRequest::new(
            self.school,
            self.grade,
            self.subject,
            self.content,
            self.achievement,
        )
    }
}

fn required(value: String, field: &'static str) -> Result<String, InputError> {
    if value.trim().is_empty() {
        return Err(InputError::MissingField(field));
    }
    Ok(value)
}
