//! Content model: sections in, a flat list of placeable items out

mod item;

pub use item::{ContentItem, ItemKind};

use crate::error::LayoutError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One section of source content: an optional title and its paragraphs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    pub title: Option<String>,
    pub paragraphs: Vec<String>,
}

impl Section {
    pub fn new(title: Option<&str>, paragraphs: &[&str]) -> Self {
        Self {
            title: title.map(str::to_string),
            paragraphs: paragraphs.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Trimmed title, if it is non-blank
    pub fn trimmed_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// True when the section would produce at least one item
    pub fn is_meaningful(&self) -> bool {
        self.trimmed_title().is_some() || self.paragraphs.iter().any(|p| !p.trim().is_empty())
    }
}

/// Ordered document content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Content {
    pub sections: Vec<Section>,
}

impl Content {
    /// Build content, dropping sections that have nothing to place
    pub fn new(sections: Vec<Section>) -> Self {
        Self {
            sections: meaningful_sections(sections),
        }
    }

    /// Parse `{"sections": [{"title": ..., "paragraphs": [...]}]}`
    pub fn from_json_str(json: &str) -> Result<Self, LayoutError> {
        let raw: Content = serde_json::from_str(json)?;
        let content = Self::new(raw.sections);
        tracing::debug!(sections = content.sections.len(), "read content");
        Ok(content)
    }

    /// Read content from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Get section count
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Flatten into placeable items
    pub fn items(&self) -> Vec<ContentItem> {
        flatten(&self.sections)
    }
}

/// Drop sections with neither a non-blank title nor a non-blank paragraph
pub fn meaningful_sections(sections: Vec<Section>) -> Vec<Section> {
    let before = sections.len();
    let kept: Vec<Section> = sections.into_iter().filter(Section::is_meaningful).collect();
    if kept.len() != before {
        tracing::debug!(dropped = before - kept.len(), "skipped empty sections");
    }
    kept
}

/// Flatten sections into one ordered list of titles and paragraphs.
///
/// Blank titles and paragraphs are skipped and do not consume an index.
/// Titles are stored trimmed; paragraph text is kept as given.
pub fn flatten(sections: &[Section]) -> Vec<ContentItem> {
    let mut items = Vec::new();

    for (section_index, section) in sections.iter().enumerate() {
        if let Some(title) = section.trimmed_title() {
            items.push(ContentItem::title(title, section_index));
        }

        let mut emitted = 0;
        for text in &section.paragraphs {
            if text.trim().is_empty() {
                continue;
            }
            items.push(ContentItem::paragraph(text.as_str(), section_index, emitted));
            emitted += 1;
        }
    }

    tracing::debug!(items = items.len(), "flattened content");
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_order_and_indices() {
        let sections = vec![
            Section::new(Some("  One  "), &["a", "   ", "b"]),
            Section::new(None, &["c"]),
        ];

        let items = flatten(&sections);
        assert_eq!(items.len(), 4);

        assert_eq!(items[0], ContentItem::title("One", 0));
        assert_eq!(items[1], ContentItem::paragraph("a", 0, 0));
        // The blank paragraph does not consume an index
        assert_eq!(items[2], ContentItem::paragraph("b", 0, 1));
        assert_eq!(items[3], ContentItem::paragraph("c", 1, 0));
    }

    #[test]
    fn test_blank_title_is_dropped() {
        let items = flatten(&[Section::new(Some(" \t "), &["body"])]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, ItemKind::Paragraph);
    }

    #[test]
    fn test_paragraph_text_kept_verbatim() {
        let items = flatten(&[Section::new(None, &["  padded  "])]);
        assert_eq!(items[0].text, "  padded  ");
    }

    #[test]
    fn test_empty_sections_dropped_before_indexing() {
        let content = Content::new(vec![
            Section::new(Some("A"), &[]),
            Section::new(Some(""), &["", "  "]),
            Section::new(None, &["tail"]),
        ]);
        assert_eq!(content.section_count(), 2);

        let items = content.items();
        assert_eq!(items[1].section_index, 1);
    }

    #[test]
    fn test_content_from_json() {
        let json = r#"{"sections":[{"title":"T","paragraphs":["p1","p2"]},{"paragraphs":[" "]}]}"#;
        let content = Content::from_json_str(json).unwrap();
        assert_eq!(content.section_count(), 1);
        assert_eq!(content.items().len(), 3);
    }

    #[test]
    fn test_content_from_bad_json() {
        assert!(matches!(
            Content::from_json_str("{\"sections\": 3}"),
            Err(LayoutError::Json(_))
        ));
    }
}
