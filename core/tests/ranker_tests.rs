use keyrank_core::ranker::{score, top_n};
use keyrank_core::tokenizer::normalize;
use keyrank_core::{KeywordExtractor, VocabularyModel};
use std::sync::Arc;

fn model(terms: &[&str], idf: &[f64]) -> VocabularyModel {
    VocabularyModel::new(terms.iter().map(|s| s.to_string()).collect(), idf.to_vec()).unwrap()
}

fn pets() -> VocabularyModel {
    model(&["cat", "dog", "zoo"], &[1.0, 2.0, 1.0])
}

#[test]
fn ranks_dog_over_cat() {
    let m = pets();
    let v = score(&normalize("dog dog cat"), &m);
    assert_eq!(v.len(), 2);
    assert!((v.get(0).unwrap() - 1.0 / 17f64.sqrt()).abs() < 1e-12);
    assert!((v.get(1).unwrap() - 4.0 / 17f64.sqrt()).abs() < 1e-12);

    let ranking = top_n(&v, m.terms(), 10);
    let got: Vec<(&str, f64)> = ranking.iter().map(|k| (k.term.as_str(), k.score)).collect();
    assert_eq!(got, vec![("dog", 0.970), ("cat", 0.243)]);
}

#[test]
fn out_of_vocabulary_text_is_empty() {
    let m = pets();
    assert!(score(&normalize("zebra lion"), &m).is_empty());
    let ex = KeywordExtractor::new(Arc::new(m));
    assert!(ex.extract("zebra lion", 10).is_empty());
}

#[test]
fn empty_and_whitespace_inputs() {
    let ex = KeywordExtractor::new(Arc::new(pets()));
    for text in ["", "   \n\t", "1234 !!!", "кошка собака"] {
        assert!(ex.extract(text, 10).is_empty(), "expected no keywords for {text:?}");
    }
}

#[test]
fn punctuation_and_case_do_not_hide_terms() {
    let ex = KeywordExtractor::new(Arc::new(pets()));
    let r = ex.extract("DOG! Dog? cat.", 10);
    assert_eq!(r.terms().collect::<Vec<_>>(), vec!["dog", "cat"]);
}

#[test]
fn digits_glue_letters_together() {
    // "d0g" normalizes to "dg", which is not in the vocabulary
    let ex = KeywordExtractor::new(Arc::new(pets()));
    assert!(ex.extract("d0g", 10).is_empty());
    assert_eq!(ex.extract("c4at", 10).score_of("cat"), Some(1.0));
}

#[test]
fn equal_scores_prefer_later_vocabulary_entry() {
    let m = model(&["alpha", "beta", "gamma"], &[1.0, 1.0, 1.0]);
    let ranking = top_n(&score("gamma alpha beta", &m), m.terms(), 10);
    assert_eq!(ranking.terms().collect::<Vec<_>>(), vec!["gamma", "beta", "alpha"]);
}

#[test]
fn truncates_to_n() {
    let m = model(&["a", "b", "c", "d"], &[1.0, 2.0, 3.0, 4.0]);
    let v = score("a b c d", &m);
    for n in 0..6 {
        assert_eq!(top_n(&v, m.terms(), n).len(), n.min(v.len()));
    }
    assert_eq!(top_n(&v, m.terms(), 2).terms().collect::<Vec<_>>(), vec!["d", "c"]);
}

#[test]
fn scores_are_unit_length_and_bounded() {
    let m = model(&["rust", "memory", "safety", "speed", "borrow"], &[1.2, 2.5, 3.1, 1.7, 4.0]);
    for text in ["rust rust memory", "safety speed borrow borrow rust", "borrow", "memory safety memory safety"] {
        let v = score(&normalize(text), &m);
        assert!(!v.is_empty());
        let sum_sq: f64 = v.entries().iter().map(|(_, s)| s * s).sum();
        assert!((sum_sq - 1.0).abs() < 1e-9);
        assert!(v.entries().iter().all(|(_, s)| *s > 0.0 && *s <= 1.0));
    }
}

#[test]
fn zero_idf_terms_are_dropped() {
    let m = model(&["the", "cat"], &[0.0, 1.5]);
    let v = score("the the the cat", &m);
    assert_eq!(v.entries(), &[(1, 1.0)]);
}

#[test]
fn repeated_calls_are_identical() {
    let ex = KeywordExtractor::new(Arc::new(model(&["x", "y", "z"], &[1.1, 2.2, 3.3])));
    let text = "x y z z y x x; Z? y!";
    assert_eq!(ex.extract(text, 10), ex.extract(text, 10));
}

#[test]
fn ranking_serializes_as_ordered_list() {
    let ex = KeywordExtractor::new(Arc::new(pets()));
    let json = serde_json::to_value(ex.extract("dog dog cat", 10)).unwrap();
    assert_eq!(json, serde_json::json!([{"term": "dog", "score": 0.97}, {"term": "cat", "score": 0.243}]));
}
