//! Stitch per-window summaries into one combined summary.

use super::WindowError;

/// Combine ordered per-window summaries.
///
/// The first summary is kept verbatim. Every later summary loses its first
/// `overlap_size` whitespace tokens (all of them when it is shorter) and the
/// remainder is appended after a single space. The trim is a fixed count and
/// does not check that the dropped tokens really repeat the previous summary.
///
/// # Errors
/// Returns [`WindowError::NoSummaries`] when `summaries` is empty.
pub fn combine_summaries<S: AsRef<str>>(
    summaries: &[S],
    overlap_size: usize,
) -> Result<String, WindowError> {
    let (first, rest) = summaries.split_first().ok_or(WindowError::NoSummaries)?;

    let mut combined = first.as_ref().to_string();
    for summary in rest {
        let remainder: Vec<&str> = summary
            .as_ref()
            .split_whitespace()
            .skip(overlap_size)
            .collect();
        combined.push(' ');
        combined.push_str(&remainder.join(" "));
    }

    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_count(text: &str) -> usize {
        text.split_whitespace().count()
    }

    #[test]
    fn test_single_summary_is_unchanged() {
        for overlap in [0, 1, 50] {
            let combined = combine_summaries(&["  keep  this\tverbatim "], overlap);
            assert_eq!(combined, Ok("  keep  this\tverbatim ".to_string()));
        }
    }

    #[test]
    fn test_drops_overlap_from_later_summaries() {
        let combined = combine_summaries(&["alpha beta gamma", "gamma delta epsilon"], 1);
        assert_eq!(combined, Ok("alpha beta gamma delta epsilon".to_string()));
    }

    #[test]
    fn test_short_later_summary_contributes_nothing() {
        let combined = combine_summaries(&["x y", "z"], 5);
        assert_eq!(combined, Ok("x y ".to_string()));
    }

    #[test]
    fn test_zero_overlap_concatenates() {
        let combined = combine_summaries(&["one two", "three", "four five"], 0);
        assert_eq!(combined, Ok("one two three four five".to_string()));
    }

    #[test]
    fn test_later_summaries_are_renormalized() {
        let combined = combine_summaries(&["a", "drop  b\n c"], 1);
        assert_eq!(combined, Ok("a b c".to_string()));
    }

    #[test]
    fn test_trim_is_blind_to_content() {
        // Nothing is actually repeated, the first token is dropped anyway.
        let combined = combine_summaries(&["red green", "blue yellow"], 1);
        assert_eq!(combined, Ok("red green yellow".to_string()));
    }

    #[test]
    fn test_token_count_matches_formula() {
        let summaries = [
            "the quick brown fox",
            "brown fox jumps over",
            "over",
            "the lazy dog sleeps soundly",
        ];
        let overlap = 2;
        let combined = combine_summaries(&summaries, overlap).unwrap_or_default();

        let expected = token_count(summaries[0])
            + summaries[1..]
                .iter()
                .map(|s| token_count(s).saturating_sub(overlap))
                .sum::<usize>();
        assert_eq!(token_count(&combined), expected);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let summaries: [&str; 0] = [];
        assert_eq!(combine_summaries(&summaries, 1), Err(WindowError::NoSummaries));
    }

    #[test]
    fn test_accepts_owned_strings() {
        let summaries = vec!["a b".to_string(), "b c".to_string()];
        assert_eq!(combine_summaries(&summaries, 1), Ok("a b c".to_string()));
    }
}
