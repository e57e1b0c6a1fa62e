//! TF-IDF vectorizer over word n-grams.
//!
//! Documents are normalized strings; tokens are separated by whitespace. The
//! vocabulary holds every contiguous n-gram of 1 to `max_ngram` tokens seen
//! during fitting, indexed in lexical order, with a smoothed idf weight:
//!
//! ```text
//! idf(t) = ln((1 + D) / (1 + d(t))) + 1
//! ```
//!
//! where `D` is the number of documents and `d(t)` the number of documents
//! containing `t`.

use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;

use crate::config::{FeatureNorm, VectorizerConfig};
use crate::error::{PalaverError, Result};

/// Sparse feature vector with entries sorted by index.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    dimension: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// The all-zero vector.
    pub fn zeros(dimension: usize) -> Self {
        FeatureVector {
            dimension,
            entries: Vec::new(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Non-zero `(index, value)` entries in ascending index order.
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value at `index`, zero when absent.
    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |&(i, _)| i)
            .map(|position| self.entries[position].1)
            .unwrap_or(0.0)
    }

    pub fn squared_norm(&self) -> f64 {
        self.entries.iter().map(|&(_, v)| v * v).sum()
    }

    /// Dot product with a dense row of at least `dimension` values.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|&(i, v)| dense.get(i).map(|w| w * v))
            .sum()
    }

    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dimension];
        for &(i, v) in &self.entries {
            dense[i] = v;
        }
        dense
    }
}

/// Fitted n-gram vocabulary. Immutable once built.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// N-gram -> index.
    index: AHashMap<String, usize>,
    /// Index -> n-gram, lexically sorted.
    terms: Vec<String>,
    /// Inverse document frequency for each index.
    idf: Vec<f64>,
    n_documents: usize,
    max_ngram: usize,
    norm: FeatureNorm,
}

impl Vocabulary {
    /// Number of n-grams.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Index of an n-gram.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// N-grams in index order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Idf weight of an n-gram.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.index_of(term).map(|i| self.idf[i])
    }

    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    pub fn max_ngram(&self) -> usize {
        self.max_ngram
    }

    /// Convert a normalized string into a TF-IDF vector.
    ///
    /// N-grams absent from the vocabulary contribute nothing, so text with no
    /// known n-gram maps to the zero vector.
    pub fn transform(&self, text: &str) -> FeatureVector {
        let mut counts: AHashMap<usize, f64> = AHashMap::new();
        for_each_ngram(text, self.max_ngram, |ngram| {
            if let Some(&i) = self.index.get(ngram) {
                *counts.entry(i).or_insert(0.0) += 1.0;
            }
        });

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(i, count)| (i, count * self.idf[i]))
            .collect();
        entries.sort_unstable_by_key(|&(i, _)| i);

        if self.norm == FeatureNorm::L2 {
            let norm = entries.iter().map(|&(_, v)| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, v) in &mut entries {
                    *v /= norm;
                }
            }
        }

        FeatureVector {
            dimension: self.len(),
            entries,
        }
    }

    /// Transform many documents in parallel, preserving order.
    pub fn transform_all(&self, documents: &[String]) -> Vec<FeatureVector> {
        documents
            .par_iter()
            .map(|document| self.transform(document))
            .collect()
    }
}

/// Builds a [`Vocabulary`] from normalized documents.
#[derive(Debug, Clone, Default)]
pub struct TfIdfVectorizer {
    config: VectorizerConfig,
}

impl TfIdfVectorizer {
    pub fn new(config: VectorizerConfig) -> Self {
        Self { config }
    }

    /// Fit the vocabulary on training documents.
    ///
    /// Fails when the configuration is invalid or no document contains a
    /// token.
    pub fn fit(&self, documents: &[String]) -> Result<Vocabulary> {
        self.config.validate()?;
        let max_ngram = self.config.max_ngram;

        let document_ngrams: Vec<AHashSet<String>> = documents
            .par_iter()
            .map(|document| {
                let mut ngrams = AHashSet::new();
                for_each_ngram(document, max_ngram, |ngram| {
                    if !ngrams.contains(ngram) {
                        ngrams.insert(ngram.to_string());
                    }
                });
                ngrams
            })
            .collect();

        let mut document_frequency: AHashMap<String, usize> = AHashMap::new();
        for ngrams in document_ngrams {
            for ngram in ngrams {
                *document_frequency.entry(ngram).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(PalaverError::training(
                "empty vocabulary: every training pattern normalizes to nothing",
            ));
        }

        let mut terms: Vec<String> = document_frequency.keys().cloned().collect();
        terms.sort_unstable();

        let n_documents = documents.len();
        let idf: Vec<f64> = terms
            .iter()
            .map(|term| {
                let df = document_frequency[term];
                ((n_documents as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0
            })
            .collect();
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();

        Ok(Vocabulary {
            index,
            terms,
            idf,
            n_documents,
            max_ngram,
            norm: self.config.norm,
        })
    }
}

/// Call `f` with every n-gram of 1..=`max_ngram` whitespace-separated tokens.
fn for_each_ngram<F: FnMut(&str)>(text: &str, max_ngram: usize, mut f: F) {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut ngram = String::new();
    for n in 1..=max_ngram.min(tokens.len()) {
        for window in tokens.windows(n) {
            ngram.clear();
            for (i, token) in window.iter().enumerate() {
                if i > 0 {
                    ngram.push(' ');
                }
                ngram.push_str(token);
            }
            f(&ngram);
        }
    }
}
