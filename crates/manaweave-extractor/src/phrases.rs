//! Auxiliary free-text features: noun phrases and named entities
//!
//! Neither feeds the scorer. They are kept for display and for callers
//! that want a rough picture of what the text talks about.

use crate::tokenizer::Tokens;
use crate::vocabulary::{self, DETERMINERS, PHRASE_STOP_WORDS};

const MAX_PHRASE_WORDS: usize = 4;

/// Determiner-led phrases such as `target creature card`
///
/// Phrases never cross clause punctuation and stop at the first
/// function word. Duplicates are dropped, first occurrence wins.
pub fn noun_phrases(text: &str) -> Vec<String> {
    let mut phrases: Vec<String> = Vec::new();

    for clause in text.split(|c: char| matches!(c, '.' | ',' | ';' | ':' | '\n' | '(' | ')')) {
        let tokens = Tokens::new(clause);
        let words = tokens.words();
        let mut i = 0;
        while i < words.len() {
            if !vocabulary::contains(DETERMINERS, &words[i]) {
                i += 1;
                continue;
            }
            let body: Vec<&str> = words[i + 1..]
                .iter()
                .take_while(|w| !vocabulary::contains(PHRASE_STOP_WORDS, w))
                .take(MAX_PHRASE_WORDS)
                .map(String::as_str)
                .collect();
            if !body.is_empty() {
                let phrase = format!("{} {}", words[i], body.join(" "));
                if !phrases.contains(&phrase) {
                    phrases.push(phrase);
                }
            }
            i += 1 + body.len();
        }
    }

    phrases
}

/// Runs of capitalised words that do not start a sentence
///
/// Card names and creature types in rules text are capitalised, so
/// `Whenever Goblin Guide attacks` yields `Goblin Guide`.
pub fn named_entities(text: &str) -> Vec<String> {
    let mut entities: Vec<String> = Vec::new();

    for sentence in text.split(|c: char| matches!(c, '.' | '!' | '?' | '\n' | ':' | '(' | ')')) {
        let mut run: Vec<&str> = Vec::new();
        for (index, raw) in sentence.split_whitespace().enumerate() {
            let word = raw.trim_matches(|c: char| !(c.is_alphanumeric() || c == '\''));
            let capitalised = word.chars().next().is_some_and(char::is_uppercase);

            if index > 0 && capitalised {
                run.push(word);
                if raw.ends_with([',', ';']) {
                    flush(&mut run, &mut entities);
                }
            } else {
                flush(&mut run, &mut entities);
            }
        }
        flush(&mut run, &mut entities);
    }

    entities
}

fn flush(run: &mut Vec<&str>, entities: &mut Vec<String>) {
    if !run.is_empty() {
        let entity = run.join(" ");
        if !entities.contains(&entity) {
            entities.push(entity);
        }
        run.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noun_phrases() {
        let phrases = noun_phrases(
            "Put target creature card from a graveyard onto the battlefield under your control.",
        );
        assert_eq!(
            phrases,
            vec!["target creature card", "a graveyard", "the battlefield"]
        );
    }

    #[test]
    fn test_phrases_stop_at_punctuation() {
        let phrases = noun_phrases("Counter target spell. Draw a card.");
        assert_eq!(phrases, vec!["target spell", "a card"]);
    }

    #[test]
    fn test_named_entities() {
        let entities = named_entities(
            "Haste\nWhenever Goblin Guide attacks, defending player reveals the top card.",
        );
        assert_eq!(entities, vec!["Goblin Guide"]);
    }

    #[test]
    fn test_sentence_start_is_not_an_entity() {
        assert!(named_entities("Counter target spell.").is_empty());
    }
}
