use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*```[A-Za-z0-9_-]*[ \t]*$").unwrap());

static BROKEN_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<head>\w)-[ \t]*\r?\n[ \t]*(?P<tail>\p{Ll})").unwrap());

static INLINE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\S\n]+").unwrap());

/// Cleans text transcribed by a vision model.
///
/// Removes markdown fence lines and composes characters to NFC, keeping
/// ordinal indicators such as `nº` and `1ª` intact. Words hyphenated across a
/// line break are rejoined when the next line starts in lowercase. That also
/// drops the hyphen of a compound split at the break (`guarda-\nchuva`).
/// Horizontal whitespace is collapsed and at most one blank line separates
/// paragraphs.
pub fn sanitize_transcription(raw: &str) -> String {
    let unfenced = CODE_FENCE.replace_all(raw, "");
    let normalized: String = unfenced.nfc().collect();
    let rejoined = BROKEN_WORD.replace_all(&normalized, "$head$tail");

    let mut paragraphs: Vec<Vec<String>> = vec![Vec::new()];
    for line in rejoined.lines() {
        let line = INLINE_WHITESPACE.replace_all(line.trim(), " ");
        if line.is_empty() {
            if paragraphs.last().is_some_and(|p| !p.is_empty()) {
                paragraphs.push(Vec::new());
            }
        } else if let Some(current) = paragraphs.last_mut() {
            current.push(line.into_owned());
        }
    }

    paragraphs
        .iter()
        .filter(|lines| !lines.is_empty())
        .map(|lines| lines.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}
