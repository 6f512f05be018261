use crate::parser::SUMMARY_DELIMITER;
use crate::request::{AssessmentRequest, AssessmentVariant, GenerationRequest};
use crate::tier::Tier;

/// A system + user message pair ready to send to the completion API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: &'static str,
    pub user: String,
}

const VARIATION_SYSTEM_PROMPT: &str =
    "당신은 한국어 전문가입니다. 문장을 자연스럽게 변형하는 작업을 수행합니다.";

const VARIATION_RULES: &str = r#"
규칙:
1. 원래 의미는 반드시 유지
2. 어순 변경, 어미 변경, 유의어 사용 등 다양한 방식으로 변형
3. 각각의 변형된 문장은 새로운 줄에 숫자와 함께 표시
4. 자연스러운 한국어로 표현
"#;

const ASSESSMENT_SYSTEM_PROMPT: &str =
    "당신은 학생 평가 전문가입니다. 교육적이고 발전적인 관점에서 학생을 평가합니다.";

const ASSESSMENT_POLICY_SYSTEM_PROMPT: &str = r#"당신은 학생평가 전문가이자 생활기록부 작성 전문가입니다.

## 작성 원칙
1. 기본 서술 방향
    - 긍정적 서술을 기본으로 함
    - 성취도가 낮은 경우 '참여함', '수행함', '해결함' 등 중립적 표현 사용
    - 부정적 표현 대신 발전 가능성과 성장 과정을 기술

2. 문장 구조
    - 주어('학생은', '위 학생은' 등) 생략
    - '~했음', '~함', '~하였음' 등의 어미 사용
    - '~습니다', '~입니다' 등의 종결어미 사용 금지

3. 내용 구성
    - 각 문장은 80-100자 내외로 작성
    - 구체적인 학습 활동과 과정 중심으로 기술
    - 문제해결 과정과 사고력 발현 과정을 상세히 서술
    - 단원별 특징적인 활동과 성과를 개별적으로 기술
    - 교과 특성을 반영한 전문적 용어 적절히 사용

4. 금지 사항
    - 평가 결과나 점수 언급 금지
    - 등수나 석차 관련 내용 언급 금지
    - 부정적 표현 사용 금지
    - 나열식 단순 기술 지양
    - 추상적이고 모호한 표현 지양

5. 수준별 서술 원칙
    - 최상위권: 탁월한 사고력과 문제해결력 중심 서술
    - 상위권: 우수한 이해도와 적용력 중심 서술
    - 중위권: 기본 개념 이해와 성실한 참여도 중심 서술
    - 하위권: 수업 참여도와 과제 완수 중심 서술
    - 최하위권: 기본적인 활동 참여와 발전 가능성 중심 서술

6. 필수 포함 요소
    - 구체적인 학습 활동
    - 문제해결 과정
    - 창의적 사고력
    - 참여도와 태도
    - 발전 가능성"#;

const ASSESSMENT_REQUIREMENTS: &str = r#"
요구사항:
1. 각 수준마다 2개의 다른 문장을 작성
2. 구체적이고 객관적인 표현 사용
3. 학생의 실제 수행 과정과 결과를 포함
4. 부정적인 표현보다는 발전 가능성을 제시
5. 교육적인 언어 사용
6. 각 문장은 100자 내외로 작성
"#;

const ASSESSMENT_FORMAT: &str = r#"
형식:
최상-1: [문장1]
최상-2: [문장2]
상-1: [문장1]
...처럼 각 수준별로 두 개의 문장을 작성해주세요.
"#;

pub fn variation_prompt(request: &GenerationRequest) -> Prompt {
    let user = format!(
        "\n다음 문장의 의미는 유지하면서 {count}개의 다른 표현으로 바꿔주세요:\n\"{sentence}\"\n{VARIATION_RULES}",
        count = request.count(),
        sentence = request.sentence(),
    );

    Prompt {
        system: VARIATION_SYSTEM_PROMPT,
        user,
    }
}

pub fn assessment_prompt(request: &AssessmentRequest, variant: AssessmentVariant) -> Prompt {
    let AssessmentRequest {
        school,
        grade,
        subject,
        content,
        achievement,
    } = request;
    let school = school.label();
    let tier_names = Tier::ALL.map(Tier::label).join("/");
    let definitions: String = Tier::ALL
        .iter()
        .map(|tier| format!("- {}: {}\n", tier.label(), tier.band()))
        .collect();

    let (system, user) = match variant {
        AssessmentVariant::Basic => (
            ASSESSMENT_SYSTEM_PROMPT,
            format!(
                "\n{school} {grade}학년 {subject} 과목의 '{content}' 단원에 대해 학생의 성취수준이 '{achievement}'일 때,\n\
                 각각의 성취수준({tier_names})에 해당하는 세부능력 특기사항을 2개씩 작성해주세요.\n\
                 \n각 수준별 정의:\n\
                 {definitions}{ASSESSMENT_REQUIREMENTS}{ASSESSMENT_FORMAT}"
            ),
        ),
        AssessmentVariant::Extended => (
            ASSESSMENT_POLICY_SYSTEM_PROMPT,
            format!(
                "\n{school} {grade}학년 {subject} 과목의 '{content}' 단원에 대해 교과의 성취기준이 '{achievement}'일 때,\n\
                 각각의 성취수준({tier_names})에 해당하는 세부능력 특기사항을 2개씩 작성하고,\n\
                 마지막에는 생성된 평가의 주요 포인트를 3줄로 요약해주세요.\n\
                 \n각 수준별 정의:\n\
                 {definitions}{ASSESSMENT_FORMAT}\
                 \n마지막에 '{SUMMARY_DELIMITER}' 구분자를 넣고 평가 시 중요 포인트 3줄을 작성해주세요.\n"
            ),
        ),
    };

    Prompt { system, user }
}
