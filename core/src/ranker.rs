use crate::model::{FeatureId, VocabularyModel};
use crate::tokenizer::{normalize, tokenize};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

pub const DEFAULT_TOP_N: usize = 10;

/// L2-normalized TF-IDF weights of one text, ascending by feature id. Only non-zero
/// entries are stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseScoreVector {
    entries: Vec<(FeatureId, f64)>,
}

impl SparseScoreVector {
    pub fn entries(&self) -> &[(FeatureId, f64)] { &self.entries }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn get(&self, id: FeatureId) -> Option<f64> {
        self.entries
            .binary_search_by_key(&id, |(fid, _)| *fid)
            .ok()
            .map(|i| self.entries[i].1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub term: String,
    pub score: f64,
}

/// Top keywords of a text, best first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordRanking {
    keywords: Vec<Keyword>,
}

impl KeywordRanking {
    pub fn iter(&self) -> impl Iterator<Item = &Keyword> { self.keywords.iter() }

    pub fn len(&self) -> usize { self.keywords.len() }

    pub fn is_empty(&self) -> bool { self.keywords.is_empty() }

    pub fn score_of(&self, term: &str) -> Option<f64> {
        self.keywords.iter().find(|k| k.term == term).map(|k| k.score)
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(|k| k.term.as_str())
    }

    pub fn into_vec(self) -> Vec<Keyword> { self.keywords }
}

impl IntoIterator for KeywordRanking {
    type Item = Keyword;
    type IntoIter = std::vec::IntoIter<Keyword>;
    fn into_iter(self) -> Self::IntoIter { self.keywords.into_iter() }
}

/// Raw-count TF times IDF for every vocabulary term in `normalized`, then L2-normalized.
/// Out-of-vocabulary words are ignored. Returns an empty vector when nothing scores.
pub fn score(normalized: &str, model: &VocabularyModel) -> SparseScoreVector {
    let mut counts: BTreeMap<FeatureId, u32> = BTreeMap::new();
    for token in tokenize(normalized) {
        if let Some(id) = model.feature_id(token) {
            *counts.entry(id).or_insert(0) += 1;
        }
    }

    let mut entries: Vec<(FeatureId, f64)> = counts
        .into_iter()
        .map(|(id, tf)| (id, tf as f64 * model.idf(id)))
        .filter(|(_, w)| *w > 0.0)
        .collect();
    if entries.is_empty() {
        return SparseScoreVector::default();
    }

    let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    for (_, w) in entries.iter_mut() {
        *w /= norm;
    }
    SparseScoreVector { entries }
}

/// Best `n` entries of `vector` ordered by score, then feature id, both descending.
/// Scores are rounded to three decimals.
pub fn top_n(vector: &SparseScoreVector, terms: &[String], n: usize) -> KeywordRanking {
    let mut sorted = vector.entries.clone();
    sorted.sort_by(|a, b| match b.1.total_cmp(&a.1) {
        Ordering::Equal => b.0.cmp(&a.0),
        ord => ord,
    });
    sorted.truncate(n);

    let keywords = sorted
        .into_iter()
        .map(|(id, s)| Keyword { term: terms[id as usize].clone(), score: round3(s) })
        .collect();
    KeywordRanking { keywords }
}

/// Round to three decimals, ties to even on the exact binary value.
fn round3(x: f64) -> f64 {
    // Fixed-precision formatting rounds the exact decimal expansion, half to even.
    format!("{x:.3}").parse().unwrap_or(x)
}

/// The ranking entry point: normalize, score against the shared model, keep the top `n`.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    model: Arc<VocabularyModel>,
}

impl KeywordExtractor {
    pub fn new(model: Arc<VocabularyModel>) -> Self { Self { model } }

    pub fn model(&self) -> &Arc<VocabularyModel> { &self.model }

    pub fn extract(&self, text: &str, n: usize) -> KeywordRanking {
        let normalized = normalize(text);
        let vector = score(&normalized, &self.model);
        let ranking = top_n(&vector, self.model.terms(), n);
        tracing::debug!(matched = vector.len(), returned = ranking.len(), n, "extracted keywords");
        ranking
    }
}
