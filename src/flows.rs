//! The two request/response pipelines: build the prompt, make one completion
//! call, read the reply. Nothing is shared between calls.

use anyhow::Result;
use tracing::warn;

use crate::error::{CompletionError, InputError};
use crate::llm::CompletionBackend;
use crate::outcome::Generation;
use crate::parser::{AssessmentReport, parse_assessment_reply, parse_variations};
use crate::prompts::{assessment_prompt, variation_prompt};
use crate::request::{AssessmentForm, AssessmentRequest, AssessmentVariant, GenerationRequest};

pub async fn generate_variations<B>(backend: &B, request: &GenerationRequest) -> Generation<Vec<String>>
where
    B: CompletionBackend + ?Sized,
{
    let prompt = variation_prompt(request);
    match backend.complete(&prompt).await {
        Ok(reply) => {
            let variations = parse_variations(&reply);
            if variations.is_empty() {
                Generation::Empty
            } else {
                Generation::Success(variations)
            }
        }
        Err(err) => failure(err),
    }
}

/// Variation flow with a per-session key.
///
/// A missing key is an input error and `connect` is never called, so no
/// request leaves the process.
pub async fn run_variation<B, F>(
    request: &GenerationRequest,
    api_key: Option<&str>,
    connect: F,
) -> Result<Generation<Vec<String>>, InputError>
where
    B: CompletionBackend,
    F: FnOnce(&str) -> Result<B>,
{
    let Some(api_key) = api_key.filter(|key| !key.trim().is_empty()) else {
        return Err(InputError::MissingApiKey);
    };

    let backend = match connect(api_key) {
        Ok(backend) => backend,
        Err(err) => return Ok(failure(CompletionError::Connect(format!("{err:#}")))),
    };
    Ok(generate_variations(&backend, request).await)
}

pub async fn generate_assessment<B>(
    backend: &B,
    request: &AssessmentRequest,
    variant: AssessmentVariant,
) -> Generation<AssessmentReport>
where
    B: CompletionBackend + ?Sized,
{
    let prompt = assessment_prompt(request, variant);
    let parsed = backend
        .complete(&prompt)
        .await
        .and_then(|reply| parse_assessment_reply(&reply, variant));

    match parsed {
        Ok(report) if report.is_empty() => Generation::Empty,
        Ok(report) => Generation::Success(report),
        Err(err) => failure(err),
    }
}

/// Assessment flow from raw form fields.
///
/// Fields are validated before `resolve_key` runs, so a blank field is always
/// reported as an input error. The key is assumed to be configured; failing to
/// read it or to connect is reported like any other failed call.
pub async fn submit_assessment<B, K, F>(
    form: AssessmentForm,
    variant: AssessmentVariant,
    resolve_key: K,
    connect: F,
) -> Result<Generation<AssessmentReport>, InputError>
where
    B: CompletionBackend,
    K: FnOnce() -> Result<String>,
    F: FnOnce(&str) -> Result<B>,
{
    let request = form.validate()?;

    let backend = match resolve_key().and_then(|key| connect(&key)) {
        Ok(backend) => backend,
        Err(err) => return Ok(failure(CompletionError::Connect(format!("{err:#}")))),
    };
    Ok(generate_assessment(&backend, &request, variant).await)
}

fn failure<T>(err: CompletionError) -> Generation<T> {
    warn!(error = %err, "generation failed");
    Generation::Failure(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::Prompt;
    use crate::request::SchoolLevel;
    use crate::tier::Tier;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::sync::Mutex;

    /// Replays a fixed reply and records every prompt it receives.
    struct StubBackend {
        reply: Result<String, String>,
        seen: Mutex<Vec<Prompt>>,
    }

    impl StubBackend {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionBackend for StubBackend {
        async fn complete(&self, prompt: &Prompt) -> Result<String, CompletionError> {
            self.seen.lock().unwrap().push(prompt.clone());
            self.reply
                .clone()
                .map_err(CompletionError::Connect)
        }
    }

    fn science_request() -> AssessmentRequest {
        AssessmentRequest::new(SchoolLevel::Middle, 2, "과학", "광합성", "중").unwrap()
    }

    #[tokio::test]
    async fn variations_success() {
        let backend = StubBackend::replying("1. 하늘이 맑다.\n\n2. 맑은 하늘이다.\n");
        let request = GenerationRequest::new("하늘이 맑다.", 2).unwrap();

        let outcome = generate_variations(&backend, &request).await;
        assert_eq!(
            outcome,
            Generation::Success(vec!["1. 하늘이 맑다.".into(), "2. 맑은 하늘이다.".into()])
        );

        let seen = backend.seen.lock().unwrap();
        assert!(seen[0].user.contains("\"하늘이 맑다.\""));
        assert!(seen[0].user.contains("2개의 다른 표현"));
    }

    #[tokio::test]
    async fn blank_reply_is_empty_not_failure() {
        let backend = StubBackend::replying("  \n\n");
        let request = GenerationRequest::new("문장", 3).unwrap();

        assert_eq!(generate_variations(&backend, &request).await, Generation::Empty);
    }

    #[tokio::test]
    async fn backend_error_becomes_failure_message() {
        let backend = StubBackend::failing("quota exceeded");
        let request = GenerationRequest::new("문장", 3).unwrap();

        let outcome = generate_variations(&backend, &request).await;
        let Generation::Failure(message) = outcome else {
            panic!("expected failure, got {outcome:?}");
        };
        assert!(message.contains("quota exceeded"));
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn missing_key_blocks_the_call() {
        let request = GenerationRequest::new("문장", 3).unwrap();
        let mut connected = false;

        let result = run_variation(&request, None, |_key| {
            connected = true;
            Ok(StubBackend::replying("1. x"))
        })
        .await;
        assert_eq!(result, Err(InputError::MissingApiKey));

        let result = run_variation(&request, Some("  "), |_key| {
            Ok(StubBackend::replying("1. x"))
        })
        .await;
        assert_eq!(result, Err(InputError::MissingApiKey));
        assert!(!connected);
    }

    #[tokio::test]
    async fn supplied_key_reaches_connect() {
        let request = GenerationRequest::new("문장", 1).unwrap();

        let result = run_variation(&request, Some("sk-session"), |key| {
            assert_eq!(key, "sk-session");
            Ok(StubBackend::replying("1. 다른 문장"))
        })
        .await;
        assert_eq!(result, Ok(Generation::Success(vec!["1. 다른 문장".into()])));
    }

    #[tokio::test]
    async fn connect_error_is_a_failure() {
        let request = GenerationRequest::new("문장", 1).unwrap();

        let result = run_variation(&request, Some("sk"), |_key| {
            Err::<StubBackend, _>(anyhow!("bad base url"))
        })
        .await
        .unwrap();
        assert!(matches!(result, Generation::Failure(message) if message.contains("bad base url")));
    }

    #[tokio::test]
    async fn extended_assessment_end_to_end() {
        let backend =
            StubBackend::replying("최상-1: x\n최상-2: y\n하-1: z\n###요약###\n- p1\n- p2");

        let outcome =
            generate_assessment(&backend, &science_request(), AssessmentVariant::Extended).await;
        let report = outcome.success().expect("assessment should parse");

        let tiers: Vec<(Tier, Vec<String>)> = report
            .tiers
            .iter()
            .map(|(tier, comments)| (tier, comments.to_vec()))
            .collect();
        assert_eq!(
            tiers,
            vec![
                (Tier::Top, vec!["x".to_string(), "y".to_string()]),
                (Tier::High, vec![]),
                (Tier::Mid, vec![]),
                (Tier::Low, vec!["z".to_string()]),
                (Tier::Bottom, vec![]),
            ]
        );
        assert_eq!(
            report.summary,
            Some(vec!["- p1".to_string(), "- p2".to_string()])
        );

        let seen = backend.seen.lock().unwrap();
        assert!(seen[0].user.contains("중학교 2학년 과학 과목의 '광합성' 단원"));
    }

    fn science_form(achievement: &str) -> AssessmentForm {
        AssessmentForm {
            school: SchoolLevel::Middle,
            grade: 2,
            subject: "과학".into(),
            content: "광합성".into(),
            achievement: achievement.into(),
        }
    }

    #[tokio::test]
    async fn blank_field_is_reported_before_key_lookup() {
        let key_lookups = Cell::new(0);

        let result = submit_assessment(
            science_form(""),
            AssessmentVariant::Basic,
            || {
                key_lookups.set(key_lookups.get() + 1);
                Err(anyhow!("No API key configured"))
            },
            |_key| Ok(StubBackend::replying("최상-1: x")),
        )
        .await;

        assert_eq!(result, Err(InputError::MissingField("성취수준")));
        assert_eq!(key_lookups.get(), 0);
    }

    #[tokio::test]
    async fn missing_key_after_valid_form_is_a_failure() {
        let result = submit_assessment(
            science_form("중"),
            AssessmentVariant::Basic,
            || Err(anyhow!("No API key configured")),
            |_key| -> Result<StubBackend> { panic!("connect must not run without a key") },
        )
        .await
        .unwrap();

        assert!(matches!(result, Generation::Failure(message) if message.contains("No API key configured")));
    }

    #[tokio::test]
    async fn submitted_form_reaches_backend() {
        let result = submit_assessment(
            science_form("중"),
            AssessmentVariant::Basic,
            || Ok("sk-stored".to_string()),
            |key| {
                assert_eq!(key, "sk-stored");
                Ok(StubBackend::replying("중-1: 성실하게 참여함"))
            },
        )
        .await
        .unwrap();

        let report = result.success().expect("assessment should parse");
        assert_eq!(report.tiers.comments(Tier::Mid).to_vec(), vec!["성실하게 참여함".to_string()]);
    }

    #[tokio::test]
    async fn missing_delimiter_fails_the_request() {
        let backend = StubBackend::replying("최상-1: x\n최상-2: y");

        let outcome =
            generate_assessment(&backend, &science_request(), AssessmentVariant::Extended).await;
        assert!(matches!(outcome, Generation::Failure(message) if message.contains("found 0")));
    }

    #[tokio::test]
    async fn basic_assessment_without_tier_lines_is_empty() {
        let backend = StubBackend::replying("죄송하지만 작성할 수 없습니다.");

        let outcome =
            generate_assessment(&backend, &science_request(), AssessmentVariant::Basic).await;
        assert_eq!(outcome, Generation::Empty);
    }
}
