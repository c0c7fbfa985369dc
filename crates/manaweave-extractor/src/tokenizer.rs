//! Word tokenization and inflection-tolerant matching

/// Lower-cased word tokens of a rules text
///
/// Tokens keep the characters that matter in rules text (`+1/+1`,
/// `urza's`, `power-plant`) and drop everything else, so `toward` is one
/// token and never matches `ward`.
#[derive(Debug, Clone, Default)]
pub struct Tokens {
    words: Vec<String>,
}

impl Tokens {
    /// Tokenize `text`
    pub fn new(text: &str) -> Self {
        let words = text
            .split(|c: char| !(c.is_alphanumeric() || matches!(c, '+' | '-' | '/' | '\'')))
            .filter_map(clean_token)
            .collect();
        Self { words }
    }

    /// The tokens, in text order
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Whether any token matches `word` (allowing inflections)
    pub fn has_word(&self, word: &str) -> bool {
        self.words.iter().any(|token| word_matches(token, word))
    }

    /// Whether the words of `phrase` appear as consecutive tokens
    pub fn has_phrase(&self, phrase: &str) -> bool {
        self.phrase_positions(phrase).next().is_some()
    }

    /// Start positions of every occurrence of `phrase`
    pub fn phrase_positions<'a>(&'a self, phrase: &'a str) -> impl Iterator<Item = usize> + 'a {
        let parts: Vec<&str> = phrase.split_whitespace().collect();
        let n = parts.len();
        let last_start = if n == 0 { 0 } else { (self.words.len() + 1).saturating_sub(n) };
        (0..last_start).filter(move |&start| {
            parts
                .iter()
                .enumerate()
                .all(|(offset, part)| word_matches(&self.words[start + offset], part))
        })
    }

    /// Every entry of `vocabulary` present in the tokens
    pub fn find_all(&self, vocabulary: &[&str]) -> Vec<String> {
        vocabulary
            .iter()
            .filter(|entry| self.has_phrase(entry))
            .map(|entry| entry.to_string())
            .collect()
    }

    /// Whether `first` is followed by `second` within `window` tokens
    pub fn has_near(&self, first: &str, second: &str, window: usize) -> bool {
        self.words.iter().enumerate().any(|(i, token)| {
            word_matches(token, first)
                && self.words[i + 1..]
                    .iter()
                    .take(window)
                    .any(|next| word_matches(next, second))
        })
    }
}

fn clean_token(raw: &str) -> Option<String> {
    let mut token = raw.trim_matches(|c| c == '\'' || c == '/');
    token = token.trim_end_matches(['-', '+']);
    if let Some(rest) = token.strip_prefix(['-', '+']) {
        if !rest.starts_with(|c: char| c.is_ascii_digit()) {
            token = rest;
        }
    }
    if token.is_empty() {
        None
    } else {
        Some(token.to_lowercase())
    }
}

/// Whether `token` is `word` or an inflected form of it
///
/// Handles possessive `'s`, plural `s`/`es`/`ies`, past `d`/`ed`/`ied`
/// and `ing`, with or without a doubled final consonant or dropped `e`.
///
/// ```
/// use manaweave_extractor::word_matches;
///
/// assert!(word_matches("mills", "mill"));
/// assert!(word_matches("untapped", "untap"));
/// assert!(word_matches("sacrificing", "sacrifice"));
/// assert!(word_matches("copies", "copy"));
/// assert!(!word_matches("toward", "ward"));
/// ```
pub fn word_matches(token: &str, word: &str) -> bool {
    if token == word {
        return true;
    }
    if !token.starts_with(word.get(..1).unwrap_or_default()) {
        return false;
    }
    stems(token).any(|stem| stem.len() >= 3 && stem == word)
}

fn stems(token: &str) -> impl Iterator<Item = String> + '_ {
    let mut out = Vec::new();
    let base = token.strip_suffix("'s").unwrap_or(token);
    out.push(base.to_string());

    for suffix in ["ies", "ied"] {
        if let Some(stem) = base.strip_suffix(suffix) {
            out.push(format!("{}y", stem));
        }
    }
    for suffix in ["es", "s", "d"] {
        if let Some(stem) = base.strip_suffix(suffix) {
            out.push(stem.to_string());
        }
    }
    for suffix in ["ed", "ing"] {
        if let Some(stem) = base.strip_suffix(suffix) {
            out.push(stem.to_string());
            out.push(format!("{}e", stem));
            if let Some(undoubled) = undouble(stem) {
                out.push(undoubled.to_string());
            }
        }
    }
    out.into_iter()
}

fn undouble(stem: &str) -> Option<&str> {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n >= 2 && bytes[n - 1] == bytes[n - 2] && !b"aeiou".contains(&bytes[n - 1]) {
        stem.get(..n - 1)
    } else {
        None
    }
}
