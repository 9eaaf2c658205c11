use crate::normalize::normalize;
use siphasher::sip::SipHasher13;
use std::hash::{Hash, Hasher};

// Fixed seeds keep token hashing stable across Rust versions; changing them
// invalidates every embedding computed so far.
const HASH_SEED_K0: u64 = 0x6a6f_626d_6174_6368;
const HASH_SEED_K1: u64 = 0x736b_696c_6c73_7631;

/// Embedding width of the built-in model.
pub const DEFAULT_DIMENSION: usize = 384;

const BIGRAM_WEIGHT: f32 = 0.5;

/// A sentence-embedding model: maps text to a fixed-width dense vector.
/// Implementations must be deterministic at inference time.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Vec<f32>;
    fn dimension(&self) -> usize;
    fn model_name(&self) -> &str;
}

/// Deterministic feature-hashing sentence embedder.
///
/// Each unigram and adjacent bigram of the normalized input is sign-hashed
/// into one of `dimension` buckets and the result is L2-normalized, so the
/// dot product of two embeddings is their cosine similarity. Needs no model
/// download and no training, and two texts sharing tokens land close
/// together in the embedding space.
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn bucket(&self, term: &str) -> usize {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        term.hash(&mut hasher);
        (hasher.finish() as usize) % self.dimension
    }

    fn sign(&self, term: &str) -> f32 {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K1, HASH_SEED_K0);
        term.hash(&mut hasher);
        if hasher.finish() % 2 == 0 {
            1.0
        } else {
            -1.0
        }
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl Embedder for HashEmbedder {
    fn embed(&self, text: &str) -> Vec<f32> {
        let cleaned = normalize(text);
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();

        let mut vector = vec![0.0f32; self.dimension];
        for token in &tokens {
            vector[self.bucket(token)] += self.sign(token);
        }
        for pair in tokens.windows(2) {
            let bigram = format!("{} {}", pair[0], pair[1]);
            vector[self.bucket(&bigram)] += self.sign(&bigram) * BIGRAM_WEIGHT;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        "hash-sign-384"
    }
}

/// Cosine similarity: dot product over the product of L2 norms. Returns 0
/// when either vector has zero norm or the dimensions disagree.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        tracing::warn!(
            a_len = a.len(),
            b_len = b.len(),
            "embedding dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
