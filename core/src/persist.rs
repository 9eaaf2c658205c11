use crate::corpus::JobPosting;
use crate::vectorizer::{JobVectors, TfidfVectorizer};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_jobs: u32,
    pub created_at: String,
    pub version: u32,
}

/// Fixed file layout of a built corpus directory.
pub struct ArtifactPaths {
    pub root: PathBuf,
}

impl ArtifactPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
    fn vectorizer(&self) -> PathBuf {
        self.root.join("vectorizer.bin")
    }
    fn job_vectors(&self) -> PathBuf {
        self.root.join("job_vectors.bin")
    }
    fn jobs(&self) -> PathBuf {
        self.root.join("jobs_data.bin")
    }
    fn meta(&self) -> PathBuf {
        self.root.join("meta.json")
    }
}

pub fn save_vectorizer(paths: &ArtifactPaths, vectorizer: &TfidfVectorizer) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.vectorizer())?;
    let bytes = bincode::serialize(vectorizer)?;
    f.write_all(&bytes)?;
    Ok(())
}

pub fn load_vectorizer(paths: &ArtifactPaths) -> Result<TfidfVectorizer> {
    let mut f = File::open(paths.vectorizer())?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let vectorizer = bincode::deserialize(&buf)?;
    Ok(vectorizer)
}

pub fn save_job_vectors(paths: &ArtifactPaths, vectors: &JobVectors) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.job_vectors())?;
    let bytes = bincode::serialize(vectors)?;
    f.write_all(&bytes)?;
    Ok(())
}

pub fn load_job_vectors(paths: &ArtifactPaths) -> Result<JobVectors> {
    let mut f = File::open(paths.job_vectors())?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let vectors = bincode::deserialize(&buf)?;
    Ok(vectors)
}

pub fn save_jobs(paths: &ArtifactPaths, jobs: &[JobPosting]) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.jobs())?;
    let bytes = bincode::serialize(jobs)?;
    f.write_all(&bytes)?;
    Ok(())
}

pub fn load_jobs(paths: &ArtifactPaths) -> Result<Vec<JobPosting>> {
    let mut f = File::open(paths.jobs())?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let jobs = bincode::deserialize(&buf)?;
    Ok(jobs)
}

pub fn save_meta(paths: &ArtifactPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &ArtifactPaths) -> Result<MetaFile> {
    let mut f = File::open(paths.meta())?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}

/// Load only what the matcher needs at startup: the cleaned postings and the
/// meta file. The vectorizer artifacts stay on disk untouched.
pub fn load_matcher_artifacts(paths: &ArtifactPaths) -> Result<(Vec<JobPosting>, MetaFile)> {
    let jobs = load_jobs(paths)?;
    let meta = load_meta(paths)?;
    Ok((jobs, meta))
}
