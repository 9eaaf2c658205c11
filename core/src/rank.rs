use crate::corpus::{JobCorpus, JobPosting};
use crate::embed::{cosine_similarity, Embedder};
use crate::links::{job_links, JobLinks};

/// How many postings a single query returns at most.
pub const MAX_RESULTS: usize = 5;

/// A posting annotated with its similarity score and outbound links for one
/// query. Discarded at the end of the request.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub posting: JobPosting,
    pub score: f32,
    pub links: JobLinks,
}

/// Rank the corpus against a normalized query string: embed the query with
/// the corpus's model, score every posting by cosine similarity, sort
/// descending with corpus order breaking ties, truncate to `MAX_RESULTS`.
/// Deterministic for a fixed query and corpus.
pub fn rank(query: &str, corpus: &JobCorpus, embedder: &dyn Embedder) -> Vec<MatchResult> {
    let query_embedding = embedder.embed(query);

    let mut results: Vec<MatchResult> = corpus
        .postings()
        .iter()
        .zip(corpus.embeddings().iter())
        .map(|(posting, embedding)| MatchResult {
            posting: posting.clone(),
            score: cosine_similarity(&query_embedding, embedding),
            links: job_links(&posting.skills),
        })
        .collect();

    // sort_by is stable, so equal scores keep corpus order.
    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results.truncate(MAX_RESULTS);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::HashEmbedder;
    use std::collections::BTreeMap;

    fn corpus_of(skills: &[&str], embedder: &HashEmbedder) -> JobCorpus {
        let postings = skills
            .iter()
            .map(|s| JobPosting {
                skills: s.to_string(),
                extra: BTreeMap::new(),
            })
            .collect();
        JobCorpus::build(postings, embedder)
    }

    #[test]
    fn scores_are_non_increasing() {
        let embedder = HashEmbedder::default();
        let corpus = corpus_of(
            &["python sql", "java spring", "welding", "python", "sql nosql"],
            &embedder,
        );
        let results = rank("python sql", &corpus, &embedder);
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn result_length_is_capped_at_five() {
        let embedder = HashEmbedder::default();
        let corpus = corpus_of(
            &["a1", "b2", "c3", "d4", "e5", "f6", "g7"],
            &embedder,
        );
        assert_eq!(rank("a1", &corpus, &embedder).len(), MAX_RESULTS);
    }

    #[test]
    fn small_corpus_returns_everything() {
        let embedder = HashEmbedder::default();
        let corpus = corpus_of(&["rust", "go"], &embedder);
        assert_eq!(rank("rust", &corpus, &embedder).len(), 2);
    }

    #[test]
    fn ranking_is_deterministic() {
        let embedder = HashEmbedder::default();
        let corpus = corpus_of(&["python sql", "java", "welding"], &embedder);
        let a = rank("python data", &corpus, &embedder);
        let b = rank("python data", &corpus, &embedder);
        let skills_a: Vec<&str> = a.iter().map(|r| r.posting.skills.as_str()).collect();
        let skills_b: Vec<&str> = b.iter().map(|r| r.posting.skills.as_str()).collect();
        assert_eq!(skills_a, skills_b);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.score, y.score);
        }
    }

    #[test]
    fn ties_keep_corpus_order() {
        let embedder = HashEmbedder::default();
        // Identical skills text embeds identically, so the scores tie exactly
        // and the stable sort must preserve corpus order.
        let mut first = JobPosting {
            skills: "welding".into(),
            extra: BTreeMap::new(),
        };
        first.extra.insert("title".into(), "first".into());
        let mut second = first.clone();
        second.extra.insert("title".into(), "second".into());
        let corpus = JobCorpus::build(vec![first, second], &embedder);

        let results = rank("python", &corpus, &embedder);
        assert_eq!(results[0].score, results[1].score);
        assert_eq!(results[0].posting.extra["title"], "first");
        assert_eq!(results[1].posting.extra["title"], "second");
    }

    #[test]
    fn empty_query_scores_zero_everywhere() {
        let embedder = HashEmbedder::default();
        let corpus = corpus_of(&["python", "sql"], &embedder);
        let results = rank("", &corpus, &embedder);
        assert!(results.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn relevant_posting_outranks_unrelated_one() {
        let embedder = HashEmbedder::default();
        let corpus = corpus_of(&["Welding, Carpentry", "Python, SQL, Data Science"], &embedder);
        let results = rank("python sql machine learning", &corpus, &embedder);
        assert_eq!(results[0].posting.skills, "Python, SQL, Data Science");
        assert!(results[0].score > results[1].score);
    }
}
