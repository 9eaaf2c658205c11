/// Outcome of résumé text extraction. Extraction never fails: anything that
/// goes wrong inside the PDF parser degrades to `Empty`, and callers treat
/// that the same as "no document provided".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Text(String),
    Empty,
}

impl Extraction {
    pub fn into_text(self) -> String {
        match self {
            Extraction::Text(t) => t,
            Extraction::Empty => String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Extraction::Empty)
    }
}

/// Pull the text out of an uploaded PDF: pages concatenated, lowercased,
/// whitespace-joined. Parser errors and parser panics both collapse to
/// `Extraction::Empty`; the caller never sees a failure.
pub fn extract_pdf_text(bytes: &[u8]) -> Extraction {
    // pdf-extract panics on some malformed files, so contain unwinds too.
    let parsed = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));
    let text = match parsed {
        Ok(Ok(text)) => text,
        Ok(Err(err)) => {
            tracing::debug!(error = %err, "resume extraction failed; treating as empty");
            return Extraction::Empty;
        }
        Err(_) => {
            tracing::debug!("resume parser panicked; treating as empty");
            return Extraction::Empty;
        }
    };

    let joined = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    if joined.is_empty() {
        Extraction::Empty
    } else {
        Extraction::Text(joined)
    }
}
