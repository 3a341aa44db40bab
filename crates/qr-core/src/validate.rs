//! Input acceptance rules applied before encoding is attempted.

use crate::{EMPTY_MESSAGE, TOO_LONG_MESSAGE};

/// Upper bound on accepted input, in characters after trimming.
///
/// A fixed policy margin below QR byte-mode capacity at the Medium level,
/// not derived from the encoder's capacity tables.
pub const MAX_INPUT_CHARS: usize = 1200;

/// Why an input was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("input is empty")]
    Empty,

    #[error("input is {actual} characters, limit is {max}")]
    TooLong { max: usize, actual: usize },
}

impl Rejection {
    /// User-facing message for this rejection.
    pub fn message(&self) -> &'static str {
        match self {
            Rejection::Empty => EMPTY_MESSAGE,
            Rejection::TooLong { .. } => TOO_LONG_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Carries the trimmed text.
    Accepted(String),
    Rejected(Rejection),
}

impl ValidationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationResult::Accepted(_))
    }
}

/// Strip surrounding whitespace and byte-order marks (U+FEFF), the set a
/// browser's `String.prototype.trim` removes.
pub fn trim_input(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Trim `raw` and check it against the emptiness and length rules.
pub fn validate(raw: &str) -> ValidationResult {
    let text = trim_input(raw);
    if text.is_empty() {
        return ValidationResult::Rejected(Rejection::Empty);
    }

    let actual = text.chars().count();
    if actual > MAX_INPUT_CHARS {
        return ValidationResult::Rejected(Rejection::TooLong {
            max: MAX_INPUT_CHARS,
            actual,
        });
    }

    ValidationResult::Accepted(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_inputs_are_empty() {
        for raw in ["", " ", "\t\n", "\u{3000} \r\n"] {
            assert_eq!(validate(raw), ValidationResult::Rejected(Rejection::Empty));
        }
    }

    #[test]
    fn byte_order_marks_are_trimmed() {
        assert_eq!(validate("\u{feff}"), ValidationResult::Rejected(Rejection::Empty));
        assert_eq!(
            validate("\u{feff} hello\u{feff}"),
            ValidationResult::Accepted("hello".to_string())
        );
    }

    #[test]
    fn accepted_text_is_trimmed() {
        assert_eq!(
            validate("  https://example.com \n"),
            ValidationResult::Accepted("https://example.com".to_string())
        );
    }

    #[test]
    fn limit_is_inclusive() {
        let text = "a".repeat(MAX_INPUT_CHARS);
        assert_eq!(validate(&text), ValidationResult::Accepted(text.clone()));
    }

    #[test]
    fn one_over_limit_is_too_long() {
        let text = "a".repeat(MAX_INPUT_CHARS + 1);
        assert_eq!(
            validate(&text),
            ValidationResult::Rejected(Rejection::TooLong {
                max: 1200,
                actual: 1201
            })
        );
    }

    #[test]
    fn surrounding_whitespace_does_not_count_toward_limit() {
        let text = format!("   {}   ", "b".repeat(MAX_INPUT_CHARS));
        assert!(validate(&text).is_accepted());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let text = "\u{00e9}".repeat(MAX_INPUT_CHARS);
        assert!(validate(&text).is_accepted());
    }

    #[test]
    fn rejection_messages_are_user_facing() {
        assert_eq!(Rejection::Empty.message(), EMPTY_MESSAGE);
        let too_long = Rejection::TooLong { max: 1200, actual: 1300 };
        assert_eq!(too_long.message(), TOO_LONG_MESSAGE);
        assert_eq!(too_long.to_string(), "input is 1300 characters, limit is 1200");
    }
}
