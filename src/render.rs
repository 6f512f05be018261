use std::io::{self, Write};

use crate::palette::Palette;
use crate::parser::AssessmentReport;
use crate::tier::Tier;

const SUMMARY_SCREEN_TITLE: &str = "📌 평가 작성 시 주요 포인트";
const SUMMARY_COPY_HEADER: &str = "[ 평가 작성 주요 포인트 ]";
pub const COPY_BLOCK_TITLE: &str = "전체 복사";

/// What a section holds; the panel styles each kind differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Variations,
    Tier(Tier),
    Summary,
}

/// One titled group of lines in the results panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub title: String,
    pub items: Vec<String>,
}

/// What the user sees for a successful request: grouped lines on screen and
/// a plain-text block meant for the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub sections: Vec<Section>,
    pub copy_block: String,
}

impl Presentation {
    pub fn variations(variations: &[String]) -> Self {
        Self {
            sections: vec![Section {
                kind: SectionKind::Variations,
                title: "생성된 문장 변형:".to_string(),
                items: numbered(variations),
            }],
            copy_block: variations.join("\n"),
        }
    }

    pub fn assessment(report: &AssessmentReport) -> Self {
        let mut sections: Vec<Section> = report
            .tiers
            .iter()
            .map(|(tier, comments)| Section {
                kind: SectionKind::Tier(tier),
                title: format!("▶ {} 수준 평가", tier.label()),
                items: numbered(comments),
            })
            .collect();

        if let Some(summary) = &report.summary {
            sections.push(Section {
                kind: SectionKind::Summary,
                title: SUMMARY_SCREEN_TITLE.to_string(),
                items: summary.iter().map(|point| format!("- {point}")).collect(),
            });
        }

        Self {
            sections,
            copy_block: assessment_copy_block(report),
        }
    }
}

/// Tier header, numbered comments and a blank line per tier, then the
/// summary lines verbatim when present. Not readable by the reply parser.
pub fn assessment_copy_block(report: &AssessmentReport) -> String {
    let mut lines = Vec::new();
    for (tier, comments) in report.tiers.iter() {
        lines.push(format!("【 {} 수준 】", tier.label()));
        lines.extend(numbered(comments));
        lines.push(String::new());
    }

    if let Some(summary) = &report.summary {
        lines.push(String::new());
        lines.push(SUMMARY_COPY_HEADER.to_string());
        lines.extend(summary.iter().cloned());
    }

    lines.join("\n")
}

fn numbered(items: &[String]) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {item}", i + 1))
        .collect()
}

pub fn print_presentation(out: &mut impl Write, presentation: &Presentation) -> io::Result<()> {
    writeln!(out, "{}", Palette::paint(Palette::SUCCESS, "생성 완료!"))?;
    for section in &presentation.sections {
        writeln!(out)?;
        writeln!(out, "{}", Palette::bold(&section.title))?;
        for item in &section.items {
            writeln!(out, "  {item}")?;
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", Palette::bold(format!("### {COPY_BLOCK_TITLE}")))?;
    writeln!(out, "{}", presentation.copy_block)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{AssessmentResult, parse_assessment_reply};
    use crate::request::AssessmentVariant;
    use pretty_assertions::assert_eq;

    fn extended_report() -> AssessmentReport {
        parse_assessment_reply(
            "최상-1: x\n최상-2: y\n하-1: z\n###요약###\n- p1\n- p2",
            AssessmentVariant::Extended,
        )
        .unwrap()
    }

    #[test]
    fn variation_copy_block_joins_lines() {
        let variations = vec!["1. 가".to_string(), "2. 나".to_string()];
        let presentation = Presentation::variations(&variations);

        assert_eq!(presentation.copy_block, "1. 가\n2. 나");
        assert_eq!(presentation.sections[0].items, ["1. 1. 가", "2. 2. 나"]);
    }

    #[test]
    fn assessment_copy_block_layout() {
        let expected = "【 최상 수준 】\n1. x\n2. y\n\n\
                        【 상 수준 】\n\n\
                        【 중 수준 】\n\n\
                        【 하 수준 】\n1. z\n\n\
                        【 최하 수준 】\n\n\
                        \n[ 평가 작성 주요 포인트 ]\n- p1\n- p2";
        assert_eq!(assessment_copy_block(&extended_report()), expected);
    }

    #[test]
    fn basic_copy_block_has_no_summary_header() {
        let mut tiers = AssessmentResult::new();
        tiers.push(Tier::Mid, "성실히 참여함".into());
        let report = AssessmentReport {
            tiers,
            summary: None,
        };

        let block = assessment_copy_block(&report);
        assert!(block.contains("【 중 수준 】\n1. 성실히 참여함\n"));
        assert!(!block.contains("주요 포인트"));
        assert!(block.ends_with("【 최하 수준 】\n"));
    }

    #[test]
    fn copy_block_does_not_reparse() {
        let block = assessment_copy_block(&extended_report());
        let reparsed = parse_assessment_reply(&block, AssessmentVariant::Basic).unwrap();
        assert!(reparsed.tiers.is_empty());
    }

    #[test]
    fn assessment_sections_group_by_tier() {
        let presentation = Presentation::assessment(&extended_report());
        let titles: Vec<&str> = presentation
            .sections
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(
            titles,
            [
                "▶ 최상 수준 평가",
                "▶ 상 수준 평가",
                "▶ 중 수준 평가",
                "▶ 하 수준 평가",
                "▶ 최하 수준 평가",
                "📌 평가 작성 시 주요 포인트",
            ]
        );
        assert_eq!(presentation.sections[0].kind, SectionKind::Tier(Tier::Top));
        assert_eq!(presentation.sections[0].items, ["1. x", "2. y"]);
        assert_eq!(presentation.sections[5].kind, SectionKind::Summary);
        assert_eq!(presentation.sections[5].items, ["- - p1", "- - p2"]);
    }

    #[test]
    fn printed_output_ends_with_copy_block() {
        let presentation = Presentation::variations(&["1. 가".to_string()]);
        let mut out = Vec::new();
        print_presentation(&mut out, &presentation).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("생성된 문장 변형:"));
        assert!(text.ends_with("전체 복사\u{1b}[0m\n1. 가\n"));
    }
}
