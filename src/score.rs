use std::fmt;

/// Result of scoring one practice attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreResult {
    pub elapsed_secs: f64,
    pub error_count: usize,
    pub wpm: f64,
    pub accuracy: f64,
}

impl fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tempo: {:.1}s, Velocidade: {:.1} WPM, Erros: {}, Precisão: {:.1}%",
            self.elapsed_secs, self.wpm, self.error_count, self.accuracy
        )
    }
}

/// Counts mismatched characters over the common prefix of both texts.
///
/// Characters past the end of the shorter text are never counted.
pub fn count_errors(typed: &str, reference: &str) -> usize {
    typed
        .chars()
        .zip(reference.chars())
        .filter(|(t, r)| t != r)
        .count()
}

/// Unicode whitespace plus the ASCII file/group/record/unit separators (U+001C..=U+001F).
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Strips leading and trailing separators, see [`is_separator`].
pub fn trim_text(text: &str) -> &str {
    text.trim_matches(is_separator)
}

pub fn word_count(text: &str) -> usize {
    text.split(is_separator).filter(|word| !word.is_empty()).count()
}

/// Words per minute for `words` typed over `elapsed_secs`, or 0 when no time elapsed.
pub fn words_per_minute(words: usize, elapsed_secs: f64) -> f64 {
    if elapsed_secs > 0.0 {
        (words as f64 / elapsed_secs) * 60.0
    } else {
        0.0
    }
}

/// Percentage of the reference typed correctly, or `None` for an empty reference.
pub fn accuracy_percent(error_count: usize, reference_len: usize) -> Option<f64> {
    match reference_len {
        0 => None,
        len => Some(100.0 - (error_count as f64 / len as f64 * 100.0)),
    }
}
