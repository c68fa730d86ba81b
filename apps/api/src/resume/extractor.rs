//! Resume Extractor: PDF bytes to plain text.
//!
//! Size limits are enforced by the upload handler; this module only reads.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use thiserror::Error;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("document is not a PDF")]
    NotPdf,

    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse PDF: {0}")]
    Parse(String),
}

/// Extracts the text layer of an in-memory PDF.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(ExtractionError::NotPdf);
    }

    // pdf-extract panics on some malformed documents instead of returning an error.
    match panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractionError::Parse(format!("{e:?}"))),
        Err(_) => Err(ExtractionError::Parse(
            "parser aborted on malformed document".to_string(),
        )),
    }
}

/// Reads a PDF from disk and extracts its text.
pub fn extract_text_from_file(path: &Path) -> Result<String, ExtractionError> {
    let bytes = std::fs::read(path)?;
    extract_text(&bytes)
}

/// Builds a minimal single-page PDF showing `line` in Helvetica.
/// Offsets in the xref table are computed, so the output is well-formed.
#[cfg(test)]
pub(crate) fn sample_pdf(line: &str) -> Vec<u8> {
    let stream = format!("BT /F1 12 Tf 72 712 Td ({line}) Tj ET");
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Contents 4 0 R /Resources << /Font << /F1 5 0 R >> >> >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{stream}\nendstream",
            stream.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica \
         /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_start = pdf.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{offset:010} 00000 n \n"));
    }
    xref.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_start}\n%%EOF\n",
        objects.len() + 1
    ));
    pdf.extend_from_slice(xref.as_bytes());
    pdf
}
