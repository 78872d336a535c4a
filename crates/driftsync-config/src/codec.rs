//! JSON document codec.

use std::io::BufReader;

use driftsync_core::{BoxError, DocumentCodec, DocumentInput};
use serde::de::DeserializeOwned;

/// Decodes documents with `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl DocumentCodec for JsonCodec {
    fn decode<T: DeserializeOwned>(&self, input: DocumentInput<'_>) -> Result<T, BoxError> {
        let doc = match input {
            DocumentInput::Stream(reader) => serde_json::from_reader(BufReader::new(reader))?,
            DocumentInput::Text(text) => serde_json::from_str(text)?,
        };
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftsync_core::RepoDocument;

    #[test]
    fn test_stream_and_text_agree() {
        let json = r#"{"repo_id":"beef","chunker":{"type":"fixed"}}"#;

        let from_text: RepoDocument = JsonCodec.decode(DocumentInput::Text(json)).unwrap();
        let from_stream: RepoDocument = JsonCodec
            .decode(DocumentInput::Stream(&mut json.as_bytes()))
            .unwrap();

        assert_eq!(from_text, from_stream);
        assert_eq!(from_text.repo_id, "beef");
    }

    #[test]
    fn test_malformed_input() {
        let result: Result<RepoDocument, _> = JsonCodec.decode(DocumentInput::Text("{not json"));
        assert!(result.is_err());
    }
}
