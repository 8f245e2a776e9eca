//! Input strategies
//!
//! An input turns a source identifier (a search query, a file path) into a
//! list of raw records.

use serde::Deserialize;

use crate::error::Result;
use crate::record::Record;

/// Trait for input strategies (sources)
pub trait Input {
    /// Fetch every raw record named by `source`
    fn fetch(&self, source: &str) -> Result<Vec<Record>>;

    /// One-line description shown in the CLI help
    fn describe(&self) -> &'static str;
}

// ============================================================================
// archive.org advanced search
// ============================================================================

/// Searches archive.org and returns the matching documents
pub struct ArchiveSearch {
    search_url: String,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    response: SearchResponse,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    docs: Vec<Record>,
}

impl ArchiveSearch {
    /// Create a search input querying `search_url`
    pub fn new(search_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("ao2pyv/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            search_url: search_url.into(),
            client,
        })
    }

    /// Search endpoint this input queries
    pub fn search_url(&self) -> &str {
        &self.search_url
    }
}

impl Input for ArchiveSearch {
    fn fetch(&self, source: &str) -> Result<Vec<Record>> {
        tracing::debug!(url = %self.search_url, query = source, "searching archive.org");
        let body = self
            .client
            .get(&self.search_url)
            .query(&[("q", source), ("output", "json")])
            .send()?
            .error_for_status()?
            .text()?;
        decode_search_response(&body)
    }

    fn describe(&self) -> &'static str {
        "search archive.org for a query"
    }
}

/// Extract `response.docs` from an advanced search JSON body
pub fn decode_search_response(body: &str) -> Result<Vec<Record>> {
    let envelope: SearchEnvelope = serde_json::from_str(body)?;
    Ok(envelope.response.docs)
}

// ============================================================================
// Local JSON file
// ============================================================================

/// Reads records from a JSON file holding an array of objects
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFileInput;

impl Input for JsonFileInput {
    fn fetch(&self, source: &str) -> Result<Vec<Record>> {
        tracing::debug!(path = source, "reading records");
        let contents = std::fs::read_to_string(source)?;
        let records: Vec<Record> = serde_json::from_str(&contents)?;
        Ok(records)
    }

    fn describe(&self) -> &'static str {
        "read results from a JSON file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_decode_search_response() {
        let body = r#"{
            "responseHeader": {"status": 0},
            "response": {
                "numFound": 2,
                "start": 0,
                "docs": [
                    {"identifier": "talk-1", "title": "First"},
                    {"identifier": "talk-2", "title": "Second"}
                ]
            }
        }"#;
        let docs = decode_search_response(body).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["identifier"], "talk-1");
        assert_eq!(docs[1]["title"], "Second");
    }

    #[test]
    fn test_decode_search_response_empty_docs() {
        let docs = decode_search_response(r#"{"response": {"docs": []}}"#).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn test_decode_search_response_missing_docs() {
        let err = decode_search_response(r#"{"response": {}}"#).unwrap_err();
        assert!(err.is_data_format());
    }

    #[test]
    fn test_decode_search_response_not_json() {
        let err = decode_search_response("<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_archive_search_new() {
        let input = ArchiveSearch::new("http://127.0.0.1:9/search").unwrap();
        assert_eq!(input.search_url(), "http://127.0.0.1:9/search");
    }

    #[test]
    fn test_json_file_reads_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("videos.json");
        std::fs::write(&path, r#"[{"title": "A"}, {"title": "B"}]"#).unwrap();

        let records = JsonFileInput.fetch(path.to_str().unwrap()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["title"], "A");
        assert_eq!(records[1]["title"], "B");
    }

    #[test]
    fn test_json_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = JsonFileInput.fetch(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_file_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "[{\"title\": ").unwrap();
        let err = JsonFileInput.fetch(path.to_str().unwrap()).unwrap_err();
        assert!(err.is_data_format());
    }

    #[test]
    fn test_json_file_not_an_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("object.json");
        std::fs::write(&path, r#"{"title": "A"}"#).unwrap();
        let err = JsonFileInput.fetch(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
