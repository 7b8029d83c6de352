use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_LATIN: Regex = Regex::new(r"[^a-zA-Z\s]").expect("valid regex");
    static ref LETTER_RUN: Regex = Regex::new(r"[a-zA-Z]+").expect("valid regex");
    static ref WORD: Regex = Regex::new(r"\b\w+\b").expect("valid regex");
}

/// Lower-case the text and drop every character that is neither an ASCII letter nor whitespace.
///
/// Whitespace is kept exactly as written; runs are not collapsed.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_LATIN.replace_all(&lowered, "").into_owned()
}

/// Split normalized text into maximal runs of letters, the unit the vocabulary was built from.
pub fn tokenize(normalized: &str) -> impl Iterator<Item = &str> {
    LETTER_RUN.find_iter(normalized).map(|m| m.as_str())
}

/// Lower-cased Unicode word runs of the raw text. Used for frequency counts and statistics,
/// where digits and non-Latin words still count as words.
pub fn simple_tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_normalize() {
        assert_eq!(normalize("Hello, World! 42"), "hello world ");
    }

    #[test]
    fn tokenize_splits_on_whitespace_runs() {
        let toks: Vec<&str> = tokenize("dog  dog\tcat\n").collect();
        assert_eq!(toks, vec!["dog", "dog", "cat"]);
    }
}
