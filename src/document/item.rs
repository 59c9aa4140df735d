//! Content items: the units the placement engine flows into frames

use crate::config::{LayoutConfig, TextStyle};
use serde::{Deserialize, Serialize};

/// The kind of content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Section title
    Title,
    /// Body paragraph
    #[default]
    Paragraph,
}

impl ItemKind {
    /// Check if this is a title
    pub fn is_title(&self) -> bool {
        matches!(self, ItemKind::Title)
    }

    /// Single-letter tag used in frame names
    pub fn abbr(&self) -> char {
        match self {
            ItemKind::Title => 't',
            ItemKind::Paragraph => 'x',
        }
    }

    /// Font size and line spacing for this kind
    pub fn style<'a>(&self, config: &'a LayoutConfig) -> &'a TextStyle {
        match self {
            ItemKind::Title => &config.title,
            ItemKind::Paragraph => &config.paragraph,
        }
    }
}

/// A title or paragraph ready for placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub kind: ItemKind,
    pub text: String,
    /// Index of the originating section (0-based)
    pub section_index: usize,
    /// Position among emitted items of the same kind in the section (0-based)
    pub index_in_section: usize,
}

impl ContentItem {
    /// Create a title item
    pub fn title(text: impl Into<String>, section_index: usize) -> Self {
        Self {
            kind: ItemKind::Title,
            text: text.into(),
            section_index,
            index_in_section: 0,
        }
    }

    /// Create a paragraph item
    pub fn paragraph(text: impl Into<String>, section_index: usize, index_in_section: usize) -> Self {
        Self {
            kind: ItemKind::Paragraph,
            text: text.into(),
            section_index,
            index_in_section,
        }
    }

    /// True when the text has something other than whitespace
    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Name prefix shared by every frame of this item, e.g. `sec2_x3`
    pub fn name_base(&self) -> String {
        format!(
            "sec{}_{}{}",
            self.section_index + 1,
            self.kind.abbr(),
            self.index_in_section + 1
        )
    }

    /// Unique frame name for one link of the chain
    pub fn frame_name(&self, page: u32, chain_index: usize, column: usize) -> String {
        format!(
            "{}_p{}_f{}_c{}",
            self.name_base(),
            page,
            chain_index + 1,
            column + 1
        )
    }

    /// Text as handed to the host: paragraphs get the indent marker
    pub fn prepared_text(&self, config: &LayoutConfig) -> String {
        match self.kind {
            ItemKind::Paragraph if self.has_content() => {
                format!("{}{}", config.paragraph_indent, self.text)
            }
            _ => self.text.clone(),
        }
    }
}
