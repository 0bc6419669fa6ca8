use serde::{Deserialize, Serialize};

use crate::citations::{self, SourceCitation, SourceKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// Body of a successful ask call. Every field tolerates being absent so an
/// older backend cannot fail the whole decode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub sources: SourcesField,
    #[serde(default)]
    pub follow_up_questions: Vec<String>,
}

/// The sources field has had two wire shapes: a list of records in early
/// backends, then a single preformatted string. Decoded untagged so both
/// keep working.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourcesField {
    Structured(Vec<StructuredSource>),
    Raw(String),
}

impl Default for SourcesField {
    fn default() -> Self {
        SourcesField::Raw(String::new())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredSource {
    #[serde(rename = "type")]
    pub kind: String,
    pub document: String,
    #[serde(default)]
    pub page: PageRef,
}

/// Early backends sent `"N/A"` (or a stringified number) where later ones
/// send an integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageRef {
    Number(u32),
    Label(String),
}

impl Default for PageRef {
    fn default() -> Self {
        PageRef::Label("N/A".to_string())
    }
}

impl PageRef {
    pub fn number(&self) -> Option<u32> {
        match self {
            PageRef::Number(n) => Some(*n),
            PageRef::Label(label) => label.trim().parse().ok(),
        }
    }
}

impl AskResponse {
    /// Citations from either wire shape, in response order. Structured
    /// records keep their original position as the citation index, so a
    /// dropped neighbor leaves a visible gap rather than renumbering.
    pub fn citations(&self) -> Vec<SourceCitation> {
        match &self.sources {
            SourcesField::Raw(text) => citations::parse_citations(text),
            SourcesField::Structured(list) => list
                .iter()
                .enumerate()
                .filter_map(|(i, source)| {
                    // early backends sent raw content types, later ones the
                    // display names
                    let kind = match source.kind.trim() {
                        "Text" | "text" => SourceKind::Text,
                        "Image Description" | "image" => SourceKind::ImageDescription,
                        other => {
                            log::debug!("dropping source with unhandled type {:?}", other);
                            return None;
                        }
                    };
                    let page = match source.page.number() {
                        Some(page) => page,
                        None => {
                            log::debug!(
                                "dropping source without a numeric page: {}",
                                source.document
                            );
                            return None;
                        }
                    };
                    Some(SourceCitation {
                        index: (i + 1) as u32,
                        kind,
                        file_name: citations::normalize_file_name(&source.document),
                        page,
                        note: None,
                    })
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectivityStatus {
    #[serde(default)]
    pub status: String,
}

impl ConnectivityStatus {
    /// Case-sensitive marker check; a disconnect report must not read as
    /// connected just because it embeds the word.
    pub fn is_connected(&self) -> bool {
        self.status.contains("Connected") && !self.status.contains("Disconnected")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ask_request_serializes_to_a_question_object() {
        let body = serde_json::to_string(&AskRequest {
            question: "what is photolithography?".to_string(),
        })
        .unwrap();
        assert_eq!(body, r#"{"question":"what is photolithography?"}"#);
    }

    #[test]
    fn decodes_string_sources() {
        let raw = r#"{
            "response": "See the process overview.",
            "sources": "1. Text from ./data/overview.pdf (Page 2)",
            "follow_up_questions": ["What about yield?"]
        }"#;
        let decoded: AskResponse = serde_json::from_str(raw).unwrap();
        let citations = decoded.citations();
        assert_eq!(citations.len(), 1);
        assert_eq!(citations[0].file_name, "overview.pdf");
        assert_eq!(decoded.follow_up_questions.len(), 1);
    }

    #[test]
    fn decodes_structured_sources() {
        let raw = r#"{
            "response": "ok",
            "sources": [
                {"type": "text", "document": "data\\fab\\flow.pdf", "page": 3, "paragraph": 2},
                {"type": "table", "document": "t.pdf", "page": 1},
                {"type": "image", "document": "wafer.pdf", "page": "N/A", "image_path": "img/w.png"},
                {"type": "Image Description", "document": "mask.pdf", "page": "7"}
            ]
        }"#;
        let decoded: AskResponse = serde_json::from_str(raw).unwrap();
        let citations = decoded.citations();

        // table record and the page-less record drop; positions are kept
        assert_eq!(citations.len(), 2);
        assert_eq!(citations[0].index, 1);
        assert_eq!(citations[0].file_name, "fab/flow.pdf");
        assert_eq!(citations[1].index, 4);
        assert_eq!(citations[1].kind, SourceKind::ImageDescription);
        assert_eq!(citations[1].page, 7);
    }

    #[test]
    fn missing_fields_decode_to_defaults() {
        let decoded: AskResponse = serde_json::from_str("{}").unwrap();
        assert!(decoded.response.is_empty());
        assert!(decoded.citations().is_empty());
        assert!(decoded.follow_up_questions.is_empty());
    }

    #[test]
    fn non_numeric_page_does_not_fail_the_decode() {
        let raw = r#"{"sources": [{"type": "Text", "document": "a.pdf", "page": "N/A"}]}"#;
        let decoded: AskResponse = serde_json::from_str(raw).unwrap();
        assert!(decoded.citations().is_empty());
    }

    #[test]
    fn connected_marker_is_case_sensitive_and_exact() {
        let status = |s: &str| ConnectivityStatus {
            status: s.to_string(),
        };
        assert!(status("Connected to search backend").is_connected());
        assert!(!status("Disconnected from search backend").is_connected());
        assert!(!status("connected").is_connected());
        assert!(!status("").is_connected());
    }
}
