//! Regex score extraction from fetched page text.

use regex::Regex;

/// Scans `body` line by line and returns the first score that both matches
/// `pattern` and parses as an integer from capture group 1.
///
/// A line that matches but fails to parse (or has no capture) does not stop
/// the scan — source pages often carry unrelated near-matches, and only a
/// successfully parsed numeric capture counts. Returns `None` when no line
/// yields a score.
#[must_use]
pub fn extract_score(pattern: &Regex, body: &str) -> Option<i64> {
    for line in body.lines() {
        let Some(captures) = pattern.captures(line) else {
            continue;
        };
        let Some(capture) = captures.get(1) else {
            continue;
        };
        if let Ok(score) = capture.as_str().parse::<i64>() {
            return Some(score);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(re: &str) -> Regex {
        Regex::new(re).unwrap()
    }

    #[test]
    fn first_match_wins() {
        let re = pattern(r"Score: (\d+)");
        let body = "foo\nScore: 42\nScore: 99";
        assert_eq!(extract_score(&re, body), Some(42));
    }

    #[test]
    fn no_match_yields_none() {
        let re = pattern(r"Score: (\d+)");
        let body = "nothing here\nstill nothing";
        assert_eq!(extract_score(&re, body), None);
    }

    #[test]
    fn empty_body_yields_none() {
        let re = pattern(r"Score: (\d+)");
        assert_eq!(extract_score(&re, ""), None);
    }

    #[test]
    fn unparseable_capture_keeps_scanning() {
        // Group 1 matches a non-numeric token on the first hit.
        let re = pattern(r"Score: (\S+)");
        let body = "Score: n/a\nScore: 57";
        assert_eq!(extract_score(&re, body), Some(57));
    }

    #[test]
    fn zero_is_a_real_score() {
        let re = pattern(r"Score: (\d+)");
        assert_eq!(extract_score(&re, "Score: 0"), Some(0));
    }

    #[test]
    fn score_embedded_in_html_markup() {
        let re = pattern(r#"class="points">(\d+)<"#);
        let body = r#"<div class="rank">7</div>
<span class="points">1337</span>"#;
        assert_eq!(extract_score(&re, body), Some(1337));
    }

    #[test]
    fn pattern_does_not_match_across_lines() {
        let re = pattern(r"Score: (\d+)");
        let body = "Score:\n42";
        assert_eq!(extract_score(&re, body), None);
    }
}
