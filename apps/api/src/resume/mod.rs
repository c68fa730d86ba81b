// Resume upload and text extraction.

pub mod extractor;
pub mod handlers;
