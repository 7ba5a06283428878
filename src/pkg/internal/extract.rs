use std::io::Cursor;

use standard_error::{Interpolate, StandardError};

use crate::prelude::Result;

pub fn extract_text_from_pdf(data: &[u8]) -> Result<String> {
    use lopdf::Document;
    let cursor = Cursor::new(data);
    let doc = Document::load_from(cursor)
        .map_err(|e| StandardError::new("ERR-PDF-001").interpolate_err(e.to_string()))?;

    let pages = doc.get_pages();
    let mut text = String::new();

    for page_num in pages.keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(page_text) => {
                text.push_str(&page_text);
                text.push(' ');
            }
            Err(e) => {
                tracing::warn!("failed to extract text from page {}: {}", page_num, e);
            }
        }
    }

    if text.trim().is_empty() {
        return Err(
            StandardError::new("ERR-PDF-001").interpolate_err("no text extracted from pdf".into())
        );
    }
    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(extract_text_from_pdf(b"definitely not a pdf").is_err());
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(extract_text_from_pdf(&[]).is_err());
    }
}
