use anyhow::Result;
use clap::{Parser, Subcommand};
use jobmatch_core::dataset::load_jobs_csv;
use jobmatch_core::normalize::normalize;
use jobmatch_core::persist::{
    save_job_vectors, save_jobs, save_meta, save_vectorizer, ArtifactPaths, MetaFile,
};
use jobmatch_core::TfidfVectorizer;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "builder")]
#[command(about = "Build job corpus artifacts from a CSV dataset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit the TF-IDF vectorizer over the dataset and write the artifacts
    Build {
        /// Input CSV path (Latin-1, must contain a `skills` column)
        #[arg(long)]
        input: String,
        /// Output artifact directory
        #[arg(long)]
        output: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output } => build_corpus(&input, &output),
    }
}

fn build_corpus(input: &str, output: &str) -> Result<()> {
    let mut postings = load_jobs_csv(Path::new(input))?;

    // Clean the skills text in place; rows reduced to nothing by cleaning
    // are as useless as missing ones.
    for posting in &mut postings {
        posting.skills = normalize(&posting.skills);
    }
    let before = postings.len();
    postings.retain(|p| !p.skills.is_empty());
    if postings.len() < before {
        tracing::info!(
            dropped = before - postings.len(),
            "dropped rows with empty skills after cleaning"
        );
    }

    let docs: Vec<String> = postings.iter().map(|p| p.skills.clone()).collect();
    let (vectorizer, vectors) = TfidfVectorizer::fit(&docs);
    tracing::info!(
        num_jobs = postings.len(),
        num_terms = vectorizer.vocabulary.len(),
        "fitted tf-idf vectorizer"
    );

    let paths = ArtifactPaths::new(output);
    save_vectorizer(&paths, &vectorizer)?;
    save_job_vectors(&paths, &vectors)?;
    save_jobs(&paths, &postings)?;
    let meta = MetaFile {
        num_jobs: postings.len() as u32,
        created_at: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "".into()),
        version: 1,
    };
    save_meta(&paths, &meta)?;

    tracing::info!(output, "corpus build complete");
    Ok(())
}
