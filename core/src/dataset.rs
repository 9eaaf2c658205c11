use crate::corpus::JobPosting;
use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

/// Load the job dataset: CSV, Latin-1 encoded, with a required `skills`
/// column. Rows with any blank field are dropped, mirroring the build-time
/// cleaning contract. Fails with a descriptive error if the file is missing
/// or the `skills` column is absent.
pub fn load_jobs_csv(path: &Path) -> Result<Vec<JobPosting>> {
    let file = File::open(path)
        .with_context(|| format!("opening job dataset {}", path.display()))?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let headers: Vec<String> = reader
        .byte_headers()
        .context("reading dataset header row")?
        .iter()
        .map(latin1_to_string)
        .collect();
    let Some(skills_idx) = headers.iter().position(|h| h.trim() == "skills") else {
        bail!("dataset must contain a column named 'skills'");
    };

    let mut postings = Vec::new();
    let mut dropped = 0usize;
    for record in reader.byte_records() {
        let record = record.context("reading dataset row")?;
        let fields: Vec<String> = record.iter().map(latin1_to_string).collect();
        if fields.len() != headers.len() || fields.iter().any(|f| f.trim().is_empty()) {
            dropped += 1;
            continue;
        }
        let mut extra = BTreeMap::new();
        let mut skills = String::new();
        for (idx, value) in fields.into_iter().enumerate() {
            if idx == skills_idx {
                skills = value;
            } else {
                extra.insert(headers[idx].clone(), value);
            }
        }
        postings.push(JobPosting { skills, extra });
    }

    tracing::info!(
        num_rows = postings.len(),
        dropped,
        "loaded job dataset"
    );
    Ok(postings)
}

// Latin-1 maps each byte to the identical Unicode code point.
fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
