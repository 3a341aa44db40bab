//! Download filename derivation.

use std::sync::LazyLock;

use regex::Regex;

use crate::validate::trim_input;

const FALLBACK_BASE: &str = "qrcode";
const MAX_BASE_CHARS: usize = 24;

static RE_NON_ALNUM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]+").unwrap());

/// Derive a download filename from `text`, stamped with the current time.
pub fn sanitize(text: &str) -> String {
    sanitize_at(text, chrono::Utc::now().timestamp_millis())
}

/// Derive a download filename from `text` with an explicit millisecond stamp.
///
/// `Hello, World!!! 2024` becomes `hello-world-2024-<millis>.png`; input
/// with no usable characters becomes `qrcode-<millis>.png`.
pub fn sanitize_at(text: &str, millis: i64) -> String {
    let text = trim_input(text);
    let text = if text.is_empty() { FALLBACK_BASE } else { text };

    let truncated: String = text.chars().take(MAX_BASE_CHARS).collect();
    let replaced = RE_NON_ALNUM.replace_all(&truncated, "-");
    let base = replaced.trim_matches('-').to_lowercase();
    let base = if base.is_empty() { FALLBACK_BASE } else { base.as_str() };

    format!("{base}-{millis}.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp_of(name: &str) -> &str {
        let stem = name.strip_suffix(".png").expect("png suffix");
        stem.rsplit('-').next().expect("stamp")
    }

    #[test]
    fn empty_and_blank_fall_back() {
        for text in ["", "   "] {
            let name = sanitize(text);
            assert!(name.starts_with("qrcode-"), "{name}");
            assert!(name.ends_with(".png"), "{name}");
        }
    }

    #[test]
    fn punctuation_runs_collapse_to_single_hyphen() {
        assert_eq!(
            sanitize_at("Hello, World!!! 2024", 1_700_000_000_000),
            "hello-world-2024-1700000000000.png"
        );
    }

    #[test]
    fn live_stamp_is_all_digits() {
        let name = sanitize("Hello, World!!! 2024");
        assert!(name.starts_with("hello-world-2024-"));
        let stamp = stamp_of(&name);
        assert!(!stamp.is_empty());
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn truncates_before_replacing() {
        assert_eq!(
            sanitize_at("abcdefghijklmnopqrstuvwxyz", 1),
            "abcdefghijklmnopqrstuvwx-1.png"
        );
        // Cut lands right after a separator, which is then stripped.
        assert_eq!(
            sanitize_at("https://github.com/rust-lang/rust", 5),
            "https-github-com-rust-5.png"
        );
    }

    #[test]
    fn byte_order_mark_is_trimmed_before_truncating() {
        let text = format!("\u{feff}{}b", "a".repeat(24));
        assert_eq!(sanitize_at(&text, 9), format!("{}-9.png", "a".repeat(24)));
    }

    #[test]
    fn symbols_only_falls_back() {
        assert_eq!(sanitize_at("!!! ??? ***", 7), "qrcode-7.png");
    }

    #[test]
    fn non_ascii_letters_are_replaced() {
        assert_eq!(sanitize_at("caf\u{e9} au lait", 9), "caf-au-lait-9.png");
        assert_eq!(sanitize_at("\u{3053}\u{3093}\u{306b}\u{3061}\u{306f}", 9), "qrcode-9.png");
    }

    #[test]
    fn leading_and_trailing_hyphens_are_stripped() {
        assert_eq!(sanitize_at("--GitHub.com--", 3), "github-com-3.png");
    }
}
