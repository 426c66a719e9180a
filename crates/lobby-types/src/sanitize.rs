//! Markup stripping for user-supplied strings.
//!
//! Names, identity headers, recipients and message text all pass through
//! [`sanitize`] before they are validated or persisted. The output never
//! contains a tag opener (`<` followed by a letter, `/`, `!` or `?`).

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>").expect("valid regex")
});

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?-->|<[/!?]?[A-Za-z][^<>]*>").expect("valid regex")
});

/// A tag opener with no closing `>` before the next `<` or the end of input.
/// Only applied once no complete tag is left, so every match is unterminated.
static DANGLING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*|<[/!?]?[A-Za-z][^<>]*").expect("valid regex")
});

/// Strip HTML tags (and the bodies of `<script>`/`<style>` blocks), then trim.
///
/// Stripping repeats until the text stops changing, so tags split around
/// other tags (`<<b>script>`) cannot reassemble. Every pass that changes the
/// text shortens it, which bounds the loop.
pub fn sanitize(input: &str) -> String {
    let mut text = input.to_string();
    loop {
        if let Some(next) = strip(&SCRIPT_BLOCK, &text).or_else(|| strip(&TAG, &text)) {
            text = next;
            continue;
        }
        match strip(&DANGLING, &text) {
            Some(next) => text = next,
            None => break,
        }
    }
    text.trim().to_string()
}

fn strip(pattern: &Regex, text: &str) -> Option<String> {
    match pattern.replace_all(text, "") {
        Cow::Borrowed(_) => None,
        Cow::Owned(stripped) => Some(stripped),
    }
}
