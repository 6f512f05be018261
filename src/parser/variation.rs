use super::non_empty_lines;

/// Splits a variation reply into one entry per non-blank line.
///
/// Enumeration prefixes such as `1.` are kept as received. A reply with no
/// text yields an empty list rather than an error.
pub fn parse_variations(reply: &str) -> Vec<String> {
    non_empty_lines(reply)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_blank_lines_and_keeps_order() {
        let parsed = parse_variations("1. A\n\n2. B\n  \n3. C");
        assert_eq!(parsed, vec!["1. A", "2. B", "3. C"]);
    }

    #[test]
    fn keeps_enumeration_prefixes_and_trims() {
        let parsed = parse_variations("  1. 오늘은 날씨가 맑다.  \r\n2) 날씨가 좋은 하루다.\n");
        assert_eq!(parsed, vec!["1. 오늘은 날씨가 맑다.", "2) 날씨가 좋은 하루다."]);
    }

    #[test]
    fn empty_reply_is_empty_list() {
        assert!(parse_variations("").is_empty());
        assert!(parse_variations("\n   \n\t\n").is_empty());
    }
}
