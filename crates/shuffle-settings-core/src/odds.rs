//! # Odds Module
//!
//! Parsing of raw odds strings and the magnitude-to-bucket mapping.
//!
//! - Raw odds are whitespace-separated integer percentages, e.g. `"50 75 100 100"`
//! - Parsing stops at the first malformed token; earlier buckets keep their
//!   parsed values, the rest stay at the default
//! - Parsing never fails outright; the error is handed back for reporting

use crate::primitives::{MAX_MAGNITUDE, MIN_MAGNITUDE, ODDS_LEN, PERCENT_SCALE};
use crate::{Odds, SettingsError};

/// The outcome of parsing a raw odds string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedOdds {
    /// The odds to use, possibly partially defaulted.
    pub odds: Odds,
    /// The first malformed token, if parsing stopped early.
    pub error: Option<SettingsError>,
}

impl ParsedOdds {
    /// Whether every present token parsed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.error.is_none()
    }
}

/// Parse a raw odds string.
///
/// Tokens are separated by runs of whitespace (space, tab, line feed,
/// vertical tab, form feed, carriage return). A value that starts with a
/// separator has an empty first token, which is malformed. Only the first
/// `ODDS_LEN` tokens are considered; missing tokens leave the default.
///
/// # Example
/// ```
/// use shuffle_settings_core::odds::parse_odds;
///
/// let parsed = parse_odds("80 bad 90 70");
/// assert_eq!(parsed.odds.values(), [0.8, 1.0, 1.0, 1.0]);
/// assert!(parsed.error.is_some());
/// ```
#[must_use]
pub fn parse_odds(raw: &str) -> ParsedOdds {
    let mut values = Odds::DEFAULT.values();

    for (position, token) in tokenize(raw).into_iter().take(ODDS_LEN).enumerate() {
        let trimmed = token.trim_matches(|c: char| c <= ' ');
        match trimmed.parse::<i32>() {
            Ok(percent) => values[position] = f64::from(percent) / PERCENT_SCALE,
            Err(source) => {
                return ParsedOdds {
                    odds: Odds::new(values),
                    error: Some(SettingsError::InvalidOdds {
                        token: trimmed.to_string(),
                        position,
                        source,
                    }),
                };
            }
        }
    }

    ParsedOdds {
        odds: Odds::new(values),
        error: None,
    }
}

const fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Split on separator runs. A leading separator yields an empty first
/// token; trailing empty tokens are dropped.
fn tokenize(raw: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = raw
        .split(is_separator)
        .enumerate()
        .filter(|(i, token)| *i == 0 || !token.is_empty())
        .map(|(_, token)| token)
        .collect();
    while tokens.last().is_some_and(|token| token.is_empty()) {
        tokens.pop();
    }
    tokens
}

/// Map a magnitude onto an odds bucket index.
///
/// Magnitudes at or below `MIN_MAGNITUDE` use bucket 0; at or above
/// `MAX_MAGNITUDE` use the last bucket.
#[must_use]
pub fn odds_index(magnitude: i32) -> usize {
    (magnitude.clamp(MIN_MAGNITUDE, MAX_MAGNITUDE) - MIN_MAGNITUDE) as usize
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn full_entry_parses_all_buckets() {
        let parsed = parse_odds("50 75 90 100");
        assert!(parsed.is_clean());
        assert_eq!(parsed.odds.values(), [0.5, 0.75, 0.9, 1.0]);
    }

    #[test]
    fn short_entry_keeps_defaults() {
        let parsed = parse_odds("25");
        assert!(parsed.is_clean());
        assert_eq!(parsed.odds.values(), [0.25, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn extra_tokens_are_ignored() {
        let parsed = parse_odds("10 20 30 40 oops 60");
        assert!(parsed.is_clean());
        assert_eq!(parsed.odds.values(), [0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn stops_at_first_bad_token() {
        let parsed = parse_odds("80 bad 90 70");
        assert_eq!(parsed.odds.values(), [0.8, 1.0, 1.0, 1.0]);
        match parsed.error {
            Some(SettingsError::InvalidOdds {
                token, position, ..
            }) => {
                assert_eq!(token, "bad");
                assert_eq!(position, 1);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn bad_first_token_leaves_all_defaults() {
        let parsed = parse_odds("1.5 20");
        assert_eq!(parsed.odds, Odds::DEFAULT);
        assert!(!parsed.is_clean());
    }

    #[test]
    fn runs_of_whitespace_separate_tokens() {
        let parsed = parse_odds("30\t\t40 \n 50\r\n60  ");
        assert!(parsed.is_clean());
        assert_eq!(parsed.odds.values(), [0.3, 0.4, 0.5, 0.6]);
    }

    #[test]
    fn vertical_tab_and_form_feed_separate_tokens() {
        let parsed = parse_odds("50\u{b}60\u{c}70");
        assert!(parsed.is_clean());
        assert_eq!(parsed.odds.values(), [0.5, 0.6, 0.7, 1.0]);
    }

    #[test]
    fn leading_whitespace_is_an_empty_first_token() {
        for raw in [" 50 60 70 80", "  30\t\t40 \n 50   60 ", "\t25"] {
            let parsed = parse_odds(raw);
            assert_eq!(parsed.odds, Odds::DEFAULT, "{:?}", raw);
            match parsed.error {
                Some(SettingsError::InvalidOdds {
                    token, position, ..
                }) => {
                    assert_eq!(token, "");
                    assert_eq!(position, 0);
                }
                other => panic!("unexpected for {:?}: {:?}", raw, other),
            }
        }
    }

    #[test]
    fn tokenize_drops_only_trailing_empties() {
        assert_eq!(tokenize("1  2 "), vec!["1", "2"]);
        assert_eq!(tokenize(" 1"), vec!["", "1"]);
        assert!(tokenize(" \t ").is_empty());
    }

    #[test]
    fn whitespace_only_is_all_defaults() {
        let parsed = parse_odds("   ");
        assert!(parsed.is_clean());
        assert_eq!(parsed.odds, Odds::DEFAULT);
    }

    #[test]
    fn signed_and_oversized_percentages_pass_through() {
        let parsed = parse_odds("-10 +20 250 0");
        assert_eq!(parsed.odds.values(), [-0.1, 0.2, 2.5, 0.0]);
    }

    #[test]
    fn index_clamps_into_range() {
        assert_eq!(odds_index(i32::MIN), 0);
        assert_eq!(odds_index(0), 0);
        assert_eq!(odds_index(3), 0);
        assert_eq!(odds_index(4), 1);
        assert_eq!(odds_index(5), 2);
        assert_eq!(odds_index(6), 3);
        assert_eq!(odds_index(i32::MAX), 3);
    }
}
