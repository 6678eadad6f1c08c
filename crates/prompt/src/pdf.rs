//! PDF text extraction through the `pdftotext` tool.

use crate::{Error, Result};
use tokio::process::Command;

/// Extract the text of a PDF document.
///
/// The bytes are written to a private temporary directory and converted
/// with `pdftotext -layout`. Fails with [`Error::Extraction`] on empty
/// input, when the tool is missing, or when it exits unsuccessfully.
pub async fn extract_pdf(bytes: &[u8]) -> Result<String> {
    if bytes.is_empty() {
        return Err(Error::Extraction("PDF data cannot be empty".into()));
    }

    let dir = tempfile::Builder::new()
        .prefix("pdf_extract_")
        .tempdir()
        .map_err(|e| Error::Extraction(format!("failed to create temporary directory: {e}")))?;
    let input = dir.path().join("input.pdf");
    let output = dir.path().join("output.txt");
    tokio::fs::write(&input, bytes)
        .await
        .map_err(|e| Error::Extraction(format!("failed to write temporary PDF file: {e}")))?;

    let result = Command::new("pdftotext")
        .arg("-layout")
        .arg(&input)
        .arg(&output)
        .output()
        .await
        .map_err(|e| Error::Extraction(format!("failed to run pdftotext: {e}")))?;
    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        return Err(Error::Extraction(format!(
            "pdftotext failed ({}): {}",
            result.status,
            stderr.trim()
        )));
    }

    let text = tokio::fs::read(&output)
        .await
        .map_err(|e| Error::Extraction(format!("failed to read extracted text: {e}")))?;
    tracing::debug!("extracted {} bytes of text from PDF", text.len());
    Ok(String::from_utf8_lossy(&text).into_owned())
}
