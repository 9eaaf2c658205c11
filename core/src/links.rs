use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref SEPARATORS: Regex = Regex::new(r"[,\s]+").expect("valid regex");
}

/// Outbound job-board search URLs generated from a posting's skills text.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JobLinks {
    pub linkedin: String,
    pub naukri: String,
}

/// Build the two outbound links for a posting. The LinkedIn URL carries the
/// skills percent-encoded as a query parameter; the Naukri URL is path-style
/// with commas and whitespace collapsed to hyphens and no percent-encoding
/// (skills text outside the URL path character set produces a malformed
/// link, matching upstream behavior).
pub fn job_links(skills: &str) -> JobLinks {
    let linkedin = format!(
        "https://www.linkedin.com/jobs/search/?keywords={}",
        urlencoding::encode(skills)
    );
    let naukri = format!(
        "https://www.naukri.com/{}-jobs",
        SEPARATORS.replace_all(skills, "-")
    );
    JobLinks { linkedin, naukri }
}
