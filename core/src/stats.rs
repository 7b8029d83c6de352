use crate::tokenizer::simple_tokenize;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

lazy_static! {
    static ref SENTENCE_END: Regex = Regex::new(r"\w+[.!?]").expect("valid regex");
}

pub const DEFAULT_TOP_WORDS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStatistics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_word_length: f64,
}

/// The `k` most common words, highest count first. Equal counts keep the order in which
/// the words first appeared.
///
/// Counts are case-folded: words come from [`simple_tokenize`], so "The" and "the" share a
/// count. Punctuation is never counted as a word.
pub fn word_frequencies(text: &str, k: usize) -> Vec<WordFrequency> {
    let mut order: Vec<WordFrequency> = Vec::new();
    let mut slot: HashMap<String, usize> = HashMap::new();
    for word in simple_tokenize(text) {
        match slot.get(&word).copied() {
            Some(i) => order[i].count += 1,
            None => {
                slot.insert(word.clone(), order.len());
                order.push(WordFrequency { word, count: 1 });
            }
        }
    }
    // stable: ties stay in first-seen order
    order.sort_by(|a, b| b.count.cmp(&a.count));
    order.truncate(k);
    order
}

pub fn text_statistics(text: &str) -> TextStatistics {
    let words = simple_tokenize(text);
    let word_count = words.len();
    let sentence_count = SENTENCE_END.find_iter(text).count();
    let avg_word_length = if word_count > 0 {
        words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / word_count as f64
    } else {
        0.0
    };
    TextStatistics { word_count, sentence_count, avg_word_length }
}
