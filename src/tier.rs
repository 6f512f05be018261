/// The five narrative-evaluation bands, in the order they are requested,
/// parsed and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    Top,
    High,
    Mid,
    Low,
    Bottom,
}

impl Tier {
    pub const ALL: [Tier; 5] = [Tier::Top, Tier::High, Tier::Mid, Tier::Low, Tier::Bottom];

    /// Label the model is asked to prefix each comment with.
    pub fn label(self) -> &'static str {
        match self {
            Tier::Top => "최상",
            Tier::High => "상",
            Tier::Mid => "중",
            Tier::Low => "하",
            Tier::Bottom => "최하",
        }
    }

    /// Percentile band shown to the model. Never used when parsing.
    pub fn band(self) -> &'static str {
        match self {
            Tier::Top => "상위 5% 수준",
            Tier::High => "상위 6~30% 수준",
            Tier::Mid => "상위 31~70% 수준",
            Tier::Low => "상위 71~90% 수준",
            Tier::Bottom => "상위 91~100% 수준",
        }
    }

    pub fn from_label(label: &str) -> Option<Tier> {
        Self::ALL.into_iter().find(|tier| tier.label() == label)
    }

    /// Returns the tier a reply line belongs to, if it starts with
    /// `<label>-`. The whole token before the first hyphen must equal the
    /// label, so a label can never match as a prefix of a longer word.
    pub fn match_line(line: &str) -> Option<Tier> {
        let (token, _) = line.split_once('-')?;
        Self::from_label(token)
    }
}
