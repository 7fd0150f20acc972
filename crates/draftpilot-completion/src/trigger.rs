//! Completion trigger heuristics
//!
//! A cheap gate deciding whether the text before the caret looks like a
//! place the user would want a continuation. It runs on every input event,
//! so it must stay allocation-free.

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum trimmed length before any completion is considered
const MIN_PREFIX_CHARS: usize = 3;

/// Trimmed length required when the user just typed whitespace
const MIN_PREFIX_CHARS_AFTER_SPACE: usize = 5;

/// Latin/CJK word characters, closing paren, and sentence punctuation in
/// both Latin and CJK variants
static TRIGGER_TAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.,!?;:，。！？；：、a-zA-Z\u{4e00}-\u{9fa5})]$")
        .expect("trigger tail pattern is valid")
});

/// Whether the text immediately preceding the caret warrants a completion
///
/// Accepts when the trimmed text ends in a word character or punctuation,
/// or when the user paused after a space with enough prefix behind it.
/// Rejects anything shorter than three characters outright.
pub fn should_trigger(before: &str) -> bool {
    let trimmed = before.trim();
    let trimmed_chars = trimmed.chars().count();
    if trimmed_chars < MIN_PREFIX_CHARS {
        return false;
    }

    if TRIGGER_TAIL.is_match(trimmed) {
        return true;
    }

    let ends_with_space = before.chars().next_back().is_some_and(char::is_whitespace);
    ends_with_space && trimmed_chars > MIN_PREFIX_CHARS_AFTER_SPACE
}
