use crate::tokenizer::{tokenize, unigrams_and_bigrams};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub type TermId = u32;

/// One non-zero cell of a sparse document vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermWeight {
    pub term_id: TermId,
    pub weight: f32,
}

/// The sparse document-term matrix produced by fitting: one L2-normalized
/// row per posting, cells sorted by term id. Row order matches the posting
/// order the vectorizer was fitted over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobVectors {
    pub rows: Vec<Vec<TermWeight>>,
    pub num_terms: u32,
}

/// A fitted TF-IDF vectorizer over unigram + bigram terms, with smoothed
/// idf `ln((1 + n) / (1 + df)) + 1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    pub vocabulary: HashMap<String, TermId>,
    pub idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Learn the vocabulary and idf weights from the document collection and
    /// return the fitted vectorizer together with the document matrix.
    pub fn fit(docs: &[String]) -> (Self, JobVectors) {
        let mut vocabulary: HashMap<String, TermId> = HashMap::new();
        let mut df: Vec<u32> = Vec::new();
        let mut doc_terms: Vec<HashMap<TermId, u32>> = Vec::with_capacity(docs.len());

        for doc in docs {
            let terms = unigrams_and_bigrams(&tokenize(doc));
            let mut counts: HashMap<TermId, u32> = HashMap::new();
            let mut seen: HashSet<TermId> = HashSet::new();
            for term in terms {
                let next_id = vocabulary.len() as TermId;
                let tid = *vocabulary.entry(term).or_insert(next_id);
                if df.len() <= tid as usize {
                    df.resize(tid as usize + 1, 0);
                }
                *counts.entry(tid).or_insert(0) += 1;
                if seen.insert(tid) {
                    df[tid as usize] += 1;
                }
            }
            doc_terms.push(counts);
        }

        let n = docs.len() as f32;
        let idf: Vec<f32> = df
            .iter()
            .map(|&df_t| ((1.0 + n) / (1.0 + df_t as f32)).ln() + 1.0)
            .collect();

        let vectorizer = Self { vocabulary, idf };
        let rows = doc_terms
            .into_iter()
            .map(|counts| vectorizer.weigh(counts))
            .collect();
        let num_terms = vectorizer.vocabulary.len() as u32;
        (vectorizer, JobVectors { rows, num_terms })
    }

    /// Project new text into the fitted term space. Terms outside the
    /// vocabulary are ignored.
    pub fn transform(&self, text: &str) -> Vec<TermWeight> {
        let mut counts: HashMap<TermId, u32> = HashMap::new();
        for term in unigrams_and_bigrams(&tokenize(text)) {
            if let Some(&tid) = self.vocabulary.get(&term) {
                *counts.entry(tid).or_insert(0) += 1;
            }
        }
        self.weigh(counts)
    }

    fn weigh(&self, counts: HashMap<TermId, u32>) -> Vec<TermWeight> {
        let mut row: Vec<TermWeight> = counts
            .into_iter()
            .map(|(term_id, tf)| TermWeight {
                term_id,
                weight: tf as f32 * self.idf[term_id as usize],
            })
            .collect();

        let norm: f32 = row.iter().map(|c| c.weight * c.weight).sum::<f32>().sqrt();
        if norm > 0.0 {
            for cell in &mut row {
                cell.weight /= norm;
            }
        }
        row.sort_by_key(|c| c.term_id);
        row
    }
}
