use anyhow::{bail, ensure, Result};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

pub type FeatureId = u32;

/// On-disk and export shape of a fitted model: the vocabulary and its aligned IDF weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    pub terms: Vec<String>,
    pub idf: Vec<f64>,
}

/// A fitted TF-IDF vocabulary. Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct VocabularyModel {
    terms: Vec<String>,
    idf: Vec<f64>,
    dictionary: HashMap<String, FeatureId>,
    fingerprint: u64,
}

impl VocabularyModel {
    /// Build a model, rejecting misaligned arrays, duplicate terms, and weights that are
    /// negative or not finite.
    pub fn new(terms: Vec<String>, idf: Vec<f64>) -> Result<Self> {
        ensure!(
            terms.len() == idf.len(),
            "vocabulary has {} terms but {} idf weights",
            terms.len(),
            idf.len()
        );
        ensure!(
            terms.len() <= FeatureId::MAX as usize,
            "vocabulary too large: {} terms",
            terms.len()
        );
        let mut dictionary: HashMap<String, FeatureId> = HashMap::with_capacity(terms.len());
        for (id, term) in terms.iter().enumerate() {
            if dictionary.insert(term.clone(), id as FeatureId).is_some() {
                bail!("duplicate vocabulary term {term:?} at feature id {id}");
            }
        }
        for (id, w) in idf.iter().enumerate() {
            if !w.is_finite() || *w < 0.0 {
                bail!("invalid idf weight {w} for term {:?}", terms[id]);
            }
        }

        let mut hasher = DefaultHasher::new();
        terms.hash(&mut hasher);
        for w in &idf {
            w.to_bits().hash(&mut hasher);
        }
        let fingerprint = hasher.finish();

        Ok(Self { terms, idf, dictionary, fingerprint })
    }

    pub fn from_file(file: ModelFile) -> Result<Self> {
        Self::new(file.terms, file.idf)
    }

    pub fn to_file(&self) -> ModelFile {
        ModelFile { terms: self.terms.clone(), idf: self.idf.clone() }
    }

    pub fn terms(&self) -> &[String] { &self.terms }

    pub fn idf_weights(&self) -> &[f64] { &self.idf }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    pub fn feature_id(&self, term: &str) -> Option<FeatureId> {
        self.dictionary.get(term).copied()
    }

    pub fn idf(&self, id: FeatureId) -> f64 {
        self.idf[id as usize]
    }

    /// Identity of this vocabulary and weight set, stable for the process lifetime.
    pub fn fingerprint(&self) -> u64 { self.fingerprint }
}
