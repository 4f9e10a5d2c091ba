use std::fs;
use std::path::Path;

use crate::error::ExtractError;

/// Whether ingestion recognizes this file as text-bearing.
pub fn is_supported(path: &Path) -> bool {
    matches!(
        extension(path).as_deref(),
        Some("txt") | Some("md") | Some("pdf")
    )
}

/// Pull plain text out of a document.
///
/// `.txt` and `.md` are read as UTF-8 with invalid bytes replaced; `.pdf`
/// goes through the PDF text extractor. Anything else is `Unsupported`.
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    match extension(path).as_deref() {
        Some("txt") | Some("md") => read_lossy(path),
        Some("pdf") => read_pdf(path),
        _ => Err(ExtractError::Unsupported {
            path: path.to_path_buf(),
        }),
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
}

fn read_lossy(path: &Path) -> Result<String, ExtractError> {
    let bytes = fs::read(path).map_err(|e| ExtractError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn read_pdf(path: &Path) -> Result<String, ExtractError> {
    pdf_extract::extract_text(path).map_err(|e| ExtractError::Pdf {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
