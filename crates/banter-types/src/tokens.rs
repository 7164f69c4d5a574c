/// Whitespace as chat clients see it: Unicode white space plus the byte
/// order mark, which browsers and editors paste in as an invisible character
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// `text` without leading or trailing [`is_space`] characters
pub fn trim_text(text: &str) -> &str {
    text.trim_matches(is_space)
}

/// Rough token count for a piece of text.
///
/// Counts whitespace-separated words and scales by 1.3, rounding up. Any
/// non-empty text counts as at least one token. This is a heuristic shared by
/// the server and its tests, not a real tokenizer.
pub fn estimate_tokens(text: &str) -> u64 {
    let words = text.split(is_space).filter(|w| !w.is_empty()).count();
    if words == 0 {
        return 0;
    }
    let estimate = (words as f64 * 1.3).ceil() as u64;
    estimate.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_zero() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("   \n\t "), 0);
    }

    #[test]
    fn test_single_word_rounds_up() {
        assert_eq!(estimate_tokens("x"), 2);
    }

    #[test]
    fn test_three_words() {
        assert_eq!(estimate_tokens("one two three"), 4);
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(estimate_tokens("  one \n\n two\t\tthree  "), 4);
    }

    #[test]
    fn test_float_scaling() {
        // 3 * 1.3 is 3.9000000000000004 and 10 * 1.3 is exactly 13
        assert_eq!(estimate_tokens(&"w ".repeat(3)), 4);
        assert_eq!(estimate_tokens(&"w ".repeat(10)), 13);
        assert_eq!(estimate_tokens(&"w ".repeat(2)), 3);
    }

    #[test]
    fn test_byte_order_mark_is_space() {
        assert_eq!(estimate_tokens("\u{FEFF}"), 0);
        assert_eq!(estimate_tokens("\u{FEFF}hello\u{FEFF}world"), 3);
        assert_eq!(trim_text("\u{FEFF} hi \u{FEFF}"), "hi");
        assert_eq!(trim_text("\u{FEFF}\n"), "");
    }

    #[test]
    fn test_estimate_is_stable() {
        let text = "the quick brown fox";
        assert_eq!(estimate_tokens(text), estimate_tokens(text));
    }
}
