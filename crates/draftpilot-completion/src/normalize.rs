//! Completion candidate normalization
//!
//! Raw model output routinely echoes the prompt: it may repeat the text
//! before the caret, wrap itself in quotes, or restart on the last few words
//! the user typed. [`normalize`] strips all of that so the suggestion splices
//! cleanly at the seam. Pure function, never panics.

use draftpilot_surface::CursorContext;

/// Longest word-suffix of the before-text checked for overlap
const MAX_OVERLAP_WORDS: usize = 5;

/// Punctuation that is redundant right after the user's own text, in Latin
/// and CJK variants
const REDUNDANT_LEADING_PUNCT: [char; 5] = [',', '，', '、', '。', '.'];

/// Clean a raw completion candidate against the context it was produced for
///
/// Steps, in order: trim, unwrap one layer of quotes, drop a case-folded
/// echo of the full before-text, drop the longest overlapping word suffix,
/// drop one redundant leading punctuation mark. Empty input comes back
/// empty.
pub fn normalize(raw: &str, context: &CursorContext) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut clean = strip_wrapping_quotes(raw.trim());

    let before_trimmed = context.before.trim();
    if !before_trimmed.is_empty() {
        if let Some(len) = case_insensitive_prefix_len(clean, before_trimmed) {
            clean = clean[len..].trim_start();
        }
    }

    // Longest-suffix/prefix de-duplication at the seam: the model often
    // restarts on the last few words the user typed.
    let words: Vec<&str> = before_trimmed.split_whitespace().collect();
    for k in (1..=words.len().min(MAX_OVERLAP_WORDS)).rev() {
        let tail = words[words.len() - k..].join(" ");
        if let Some(len) = case_insensitive_prefix_len(clean, &tail) {
            clean = clean[len..].trim_start();
            break;
        }
    }

    strip_leading_redundant_punct(clean).trim_start().to_string()
}

/// Byte length of `prefix` as it appears at the start of `text`, compared
/// case-folded char by char
///
/// Folding is done per char on both sides, so a length change under case
/// folding cannot cause a byte-offset slip. Empty prefixes never match.
fn case_insensitive_prefix_len(text: &str, prefix: &str) -> Option<usize> {
    if prefix.is_empty() {
        return None;
    }
    let mut consumed = 0;
    let mut text_chars = text.chars();
    for expected in prefix.chars() {
        let found = text_chars.next()?;
        if !found.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
        consumed += found.len_utf8();
    }
    Some(consumed)
}

fn strip_wrapping_quotes(text: &str) -> &str {
    let mut chars = text.chars();
    match (chars.next(), text.chars().next_back()) {
        (Some(first), Some(last))
            if text.chars().count() >= 2 && is_quote(first) && is_quote(last) =>
        {
            &text[first.len_utf8()..text.len() - last.len_utf8()]
        }
        _ => text,
    }
}

fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\'')
}

fn strip_leading_redundant_punct(text: &str) -> &str {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if REDUNDANT_LEADING_PUNCT.contains(&c) => chars.as_str().trim_start(),
        _ => text,
    }
}
