pub mod corpus;
pub mod dataset;
pub mod embed;
pub mod extract;
pub mod links;
pub mod normalize;
pub mod persist;
pub mod rank;
pub mod tokenizer;
pub mod vectorizer;

pub use corpus::{JobCorpus, JobPosting};
pub use embed::{cosine_similarity, Embedder, HashEmbedder};
pub use rank::{rank, MatchResult, MAX_RESULTS};
pub use vectorizer::{JobVectors, TermId, TermWeight, TfidfVectorizer};
