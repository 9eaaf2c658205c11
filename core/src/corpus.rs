use crate::embed::Embedder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the job dataset. `skills` is the only column the matcher
/// interprets; everything else rides along untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub skills: String,
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

/// The in-memory match index: postings plus one embedding per posting,
/// aligned index-for-index. Built once per process and read-only afterwards.
pub struct JobCorpus {
    postings: Vec<JobPosting>,
    embeddings: Vec<Vec<f32>>,
}

impl JobCorpus {
    /// Embed every posting's skills text with a shared model instance.
    pub fn build(postings: Vec<JobPosting>, embedder: &dyn Embedder) -> Self {
        let embeddings: Vec<Vec<f32>> = postings
            .iter()
            .map(|p| embedder.embed(&p.skills))
            .collect();
        tracing::info!(
            num_jobs = postings.len(),
            dimension = embedder.dimension(),
            model = embedder.model_name(),
            "embedded job corpus"
        );
        Self {
            postings,
            embeddings,
        }
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn postings(&self) -> &[JobPosting] {
        &self.postings
    }

    pub fn embeddings(&self) -> &[Vec<f32>] {
        &self.embeddings
    }
}
