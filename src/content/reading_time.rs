//! Reading-time estimation from body word count

use serde::Serialize;

/// Default reading speed
pub const DEFAULT_WORDS_PER_MINUTE: usize = 200;

/// Result of estimating how long a text takes to read
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingEstimate {
    pub words: usize,
    pub minutes: f64,
    /// Whole minutes shown to readers
    pub displayed: u64,
    /// Label such as "5 min read"
    pub text: String,
}

/// Word-count based reading-time estimator
#[derive(Debug, Clone, Copy)]
pub struct ReadingTime {
    words_per_minute: usize,
}

impl ReadingTime {
    pub fn new(words_per_minute: usize) -> Self {
        Self {
            words_per_minute: words_per_minute.max(1),
        }
    }

    /// Estimate reading time for a body of text
    ///
    /// Whitespace separates words and every CJK ideograph counts as a word of
    /// its own. Minutes are rounded to two decimals, then up to a whole
    /// minute, so the label never pluralizes: "1 min read", "2 min read".
    pub fn estimate(&self, text: &str) -> ReadingEstimate {
        let words = count_words(text);
        let minutes = words as f64 / self.words_per_minute as f64;
        let displayed = ((minutes * 100.0).round() / 100.0).ceil() as u64;

        ReadingEstimate {
            words,
            minutes,
            displayed,
            text: format!("{} min read", displayed),
        }
    }
}

impl Default for ReadingTime {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS_PER_MINUTE)
    }
}

fn count_words(text: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;

    for c in text.chars() {
        if is_cjk(c) {
            count += 1;
            in_word = false;
        } else if c.is_whitespace() {
            in_word = false;
        } else if !in_word {
            in_word = true;
            count += 1;
        }
    }

    count
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{309F}'   // Hiragana
        | '\u{30A0}'..='\u{30FF}' // Katakana
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{AC00}'..='\u{D7AF}' // Hangul syllables
        | '\u{F900}'..='\u{FAFF}')
}
