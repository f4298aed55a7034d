//! Output module for persisting extracted documents and reporting
//!
//! The document collection is written as a pretty-printed JSON array of
//! `{webpage_url, text_chunk}` objects. An unwritable destination is the
//! only hard failure a completed crawl can produce.

mod stats;

pub use stats::print_report;

use crate::crawler::ExtractedDocument;
use crate::Result;
use std::path::Path;

/// Writes the extracted documents to a JSON file
///
/// Documents keep their extraction order. The output is human-readable,
/// with two-space indentation.
pub fn write_documents(path: &Path, documents: &[ExtractedDocument]) -> Result<()> {
    let json = serde_json::to_string_pretty(documents)?;
    std::fs::write(path, json)?;
    tracing::info!("Wrote {} documents to {}", documents.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_documents() -> Vec<ExtractedDocument> {
        vec![
            ExtractedDocument {
                webpage_url: "https://example.com/".to_string(),
                text_chunk: "start\nHome\n\nwelcome\nend".to_string(),
            },
            ExtractedDocument {
                webpage_url: "https://example.com/about".to_string(),
                text_chunk: "start\nAbout\n\nus\nend".to_string(),
            },
        ]
    }

    #[test]
    fn test_write_documents_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("documents.json");

        let documents = sample_documents();
        write_documents(&path, &documents).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<ExtractedDocument> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, documents);
    }

    #[test]
    fn test_write_documents_preserves_order_and_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("documents.json");

        write_documents(&path, &sample_documents()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"webpage_url\""));
        assert!(content.contains("\"text_chunk\""));
        let home = content.find("https://example.com/\"").unwrap();
        let about = content.find("https://example.com/about").unwrap();
        assert!(home < about);
    }

    #[test]
    fn test_write_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("documents.json");

        write_documents(&path, &[]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "[]");
    }

    #[test]
    fn test_unwritable_destination_is_an_error() {
        let path = Path::new("/nonexistent-dir/documents.json");
        assert!(write_documents(path, &sample_documents()).is_err());
    }
}
