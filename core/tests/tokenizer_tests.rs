use keyrank_core::tokenizer::{normalize, simple_tokenize, tokenize};

#[test]
fn it_lowercases_and_strips_non_latin() {
    assert_eq!(normalize("Café-au-lait, 3 Times!"), "cafaulait  times");
    assert_eq!(normalize("naïve Ωmega"), "nave mega");
}

#[test]
fn it_preserves_whitespace_runs() {
    assert_eq!(normalize("a  b\t\nc"), "a  b\t\nc");
}

#[test]
fn normalize_is_idempotent() {
    for text in ["", "Hello, World!", "  The 2nd café\u{00A0}opens  ", "日本語 text", "MiXeD_case-words"] {
        let once = normalize(text);
        assert_eq!(normalize(&once), once);
    }
}

#[test]
fn empty_input() {
    assert_eq!(normalize(""), "");
    assert_eq!(tokenize("").count(), 0);
}

#[test]
fn simple_tokenize_keeps_unicode_words() {
    let toks = simple_tokenize("Hello, wörld 42 times_two.");
    assert_eq!(toks, vec!["hello", "wörld", "42", "times_two"]);
}
