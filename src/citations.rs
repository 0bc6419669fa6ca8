//! Parsing for the delimited source-citation strings returned by the ask
//! endpoint, e.g. `1. Text from ./data/report.pdf (Page 4, Paragraph 2)`.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

// Start-of-entry token. Entries are located by scanning for these and
// slicing between successive starts, so an entry may span multiple lines.
static ENTRY_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\.\s*(?:Text|Image Description)\s+from\s").unwrap());

static ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(\d+)\.\s*(Text|Image Description)\s+from\s+(.+?\.pdf)\s*\(Page\s+(\d+)\s*(?:,\s*([^)]+))?\)")
        .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Text,
    ImageDescription,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Text => "Text",
            SourceKind::ImageDescription => "Image Description",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed entry from the sources field, in response order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCitation {
    pub index: u32,
    pub kind: SourceKind,
    /// Normalized to forward slashes with any leading `./` or `data/` removed.
    pub file_name: String,
    pub page: u32,
    /// Locator text after the page number, e.g. `Paragraph 2`.
    pub note: Option<String>,
}

impl fmt::Display for SourceCitation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} from {} (Page {}",
            self.index, self.kind, self.file_name, self.page
        )?;
        if let Some(note) = &self.note {
            write!(f, ", {}", note)?;
        }
        write!(f, ")")
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CitationParseError {
    #[error("source entry did not match the citation format: {0:?}")]
    Malformed(String),
    #[error("source entry has an out-of-range number: {0:?}")]
    NumberOutOfRange(String),
}

/// Split a sources string into one chunk per entry. Splitting happens at
/// entry-start tokens rather than newlines, so entries wrapped across lines
/// stay intact. Any text before the first token becomes its own chunk and
/// will fail entry parsing.
pub fn split_source_entries(text: &str) -> Vec<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut starts: Vec<usize> = ENTRY_START.find_iter(text).map(|m| m.start()).collect();
    if starts.first() != Some(&0) {
        let lead_end = starts.first().copied().unwrap_or(text.len());
        if !text[..lead_end].trim().is_empty() {
            starts.insert(0, 0);
        }
    }

    let mut entries = Vec::new();
    for (i, &start) in starts.iter().enumerate() {
        let end = if i + 1 < starts.len() {
            starts[i + 1]
        } else {
            text.len()
        };
        let entry = text[start..end].trim();
        if !entry.is_empty() {
            entries.push(entry);
        }
    }
    entries
}

/// Parse a single entry chunk.
pub fn parse_entry(entry: &str) -> Result<SourceCitation, CitationParseError> {
    let caps = ENTRY
        .captures(entry.trim())
        .ok_or_else(|| CitationParseError::Malformed(entry.trim().to_string()))?;

    let number = |i: usize| -> Result<u32, CitationParseError> {
        caps[i]
            .parse()
            .map_err(|_| CitationParseError::NumberOutOfRange(entry.trim().to_string()))
    };

    let kind = match &caps[2] {
        "Text" => SourceKind::Text,
        _ => SourceKind::ImageDescription,
    };

    Ok(SourceCitation {
        index: number(1)?,
        kind,
        file_name: normalize_file_name(&caps[3]),
        page: number(4)?,
        note: caps.get(5).map(|m| squish(m.as_str())),
    })
}

/// Parse every entry in a sources string, keeping response order. Entries
/// that do not match the citation format are dropped; the surrounding
/// entries are unaffected.
pub fn parse_citations(text: &str) -> Vec<SourceCitation> {
    split_source_entries(text)
        .into_iter()
        .filter_map(|entry| match parse_entry(entry) {
            Ok(citation) => Some(citation),
            Err(e) => {
                log::debug!("dropping source entry: {}", e);
                None
            }
        })
        .collect()
}

/// Backend paths arrive in several historical spellings; reduce them all to
/// a path relative to the document root.
pub fn normalize_file_name(raw: &str) -> String {
    let slashes = raw.trim().replace('\\', "/");
    let stripped = slashes.strip_prefix("./").unwrap_or(&slashes);
    let stripped = stripped.strip_prefix("data/").unwrap_or(stripped);
    stripped.to_string()
}

/// Build the viewer URL for a cited document. Each path segment is escaped
/// separately so separators in normalized sub-paths survive, and the page
/// fragment drives the embedded viewer to the cited page.
pub fn document_url(data_prefix: &str, file_name: &str, page: u32) -> String {
    let encoded: Vec<String> = file_name
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!(
        "{}/{}#page={}",
        data_prefix.trim_end_matches('/'),
        encoded.join("/"),
        page
    )
}

// collapse runs of whitespace left over from line wrapping
fn squish(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
