//! Input preparation: free text to sentence list.

/// Split text into sentences, one per line.
///
/// Lines are trimmed; blank lines are dropped.
pub fn parse_sentences(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_drops_blank_lines() {
        let text = "  I love this!  \n\n\tThis is terrible.\r\n   \nIt is a table.";
        assert_eq!(
            parse_sentences(text),
            vec!["I love this!", "This is terrible.", "It is a table."]
        );
    }

    #[test]
    fn empty_text_has_no_sentences() {
        assert!(parse_sentences("").is_empty());
        assert!(parse_sentences(" \n \n").is_empty());
    }
}
