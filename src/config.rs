//! Layout configuration
//!
//! All values are in points. Defaults reproduce an A4 page with 14.111mm
//! margins, two columns 10mm apart, 16pt titles and 12pt body text.

use crate::error::LayoutError;
use crate::layout::ColumnTopology;
use crate::units::mm_to_pt;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Narrowest column accepted by validation
pub const MIN_COLUMN_WIDTH: f32 = 10.0;

/// Absolute floor for the minimum placeable height
pub const MIN_PLACEABLE_FLOOR: f32 = 5.0;

/// Chain cap used by two-column layouts
pub const DEFAULT_MAX_CHAIN_FRAMES: usize = 100;

/// Chain cap used by single-column layouts
pub const SINGLE_COLUMN_MAX_CHAIN_FRAMES: usize = 50;

/// Number of column slots per page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnMode {
    /// One full-width column; overflow always continues on a new page
    Single,
    /// Two columns filled left to right
    #[default]
    Double,
}

impl ColumnMode {
    /// Number of column slots
    pub fn slot_count(&self) -> usize {
        match self {
            ColumnMode::Single => 1,
            ColumnMode::Double => 2,
        }
    }

    /// Parse from a column count
    pub fn from_count(count: u8) -> Option<Self> {
        match count {
            1 => Some(ColumnMode::Single),
            2 => Some(ColumnMode::Double),
            _ => None,
        }
    }
}

/// Font size and fixed line spacing for one kind of item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size: f32,
    /// Fixed (non-proportional) distance between baselines
    pub line_spacing: f32,
}

impl TextStyle {
    pub fn new(font_size: f32, line_spacing: f32) -> Self {
        Self {
            font_size,
            line_spacing,
        }
    }

    fn title_default() -> Self {
        Self::new(16.0, 16.0 * 1.2)
    }

    fn paragraph_default() -> Self {
        Self::new(12.0, 12.0 * 1.4)
    }
}

/// Everything the placement engine needs to know about the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub mode: ColumnMode,
    pub page_width: f32,
    pub page_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    /// Horizontal gap between the two columns
    pub column_gap: f32,
    /// Space between consecutive items in a column
    pub item_gap: f32,
    /// Extra space before the first item of a new section
    pub section_gap: f32,
    /// Smallest vertical space worth starting a frame in
    pub min_placeable_height: f32,
    pub min_column_width: f32,
    pub title: TextStyle,
    pub paragraph: TextStyle,
    /// Prefixed to every paragraph's text
    pub paragraph_indent: String,
    /// Upper bound on frames per item
    pub max_chain_frames: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let margin = mm_to_pt(14.111);
        let paragraph = TextStyle::paragraph_default();

        Self {
            mode: ColumnMode::Double,
            page_width: mm_to_pt(210.0), // A4
            page_height: mm_to_pt(297.0),
            margin_top: margin,
            margin_bottom: margin,
            margin_left: margin,
            margin_right: margin,
            column_gap: mm_to_pt(10.0),
            item_gap: mm_to_pt(4.0),
            section_gap: mm_to_pt(8.0),
            min_placeable_height: (paragraph.line_spacing * 1.5).max(MIN_PLACEABLE_FLOOR),
            min_column_width: MIN_COLUMN_WIDTH,
            title: TextStyle::title_default(),
            paragraph,
            paragraph_indent: "\t".to_string(),
            max_chain_frames: DEFAULT_MAX_CHAIN_FRAMES,
        }
    }
}

impl LayoutConfig {
    /// Default two-column configuration
    pub fn two_column() -> Self {
        Self::default()
    }

    /// Default single-column configuration
    pub fn single_column() -> Self {
        Self {
            mode: ColumnMode::Single,
            max_chain_frames: SINGLE_COLUMN_MAX_CHAIN_FRAMES,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self, LayoutError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Get usable content width
    pub fn content_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    /// Get usable content height per page
    pub fn content_height(&self) -> f32 {
        self.page_height - self.margin_top - self.margin_bottom
    }

    /// Width of one column slot in the configured mode
    pub fn column_width(&self) -> f32 {
        match self.mode {
            ColumnMode::Single => self.content_width(),
            ColumnMode::Double => (self.content_width() - self.column_gap) / 2.0,
        }
    }

    /// Column slots for the configured mode
    pub fn topology(&self) -> ColumnTopology {
        ColumnTopology::from_config(self)
    }

    /// Space left between `y` and the bottom margin
    pub fn available_below(&self, y: f32) -> f32 {
        self.page_height - y - self.margin_bottom
    }

    /// Check that the page can hold at least one column of text
    pub fn validate(&self) -> Result<(), LayoutError> {
        let invalid = |msg: String| Err(LayoutError::InvalidConfig(msg));

        if self.page_width <= 0.0 || self.page_height <= 0.0 {
            return invalid(format!(
                "page size {:.2}x{:.2}pt must be positive",
                self.page_width, self.page_height
            ));
        }
        if self.content_height() <= 0.0 {
            return invalid(format!(
                "vertical margins leave no content height ({:.2}pt)",
                self.content_height()
            ));
        }
        if self.mode == ColumnMode::Double {
            let required = 2.0 * self.min_column_width + self.column_gap;
            if self.content_width() < required {
                return invalid(format!(
                    "content width {:.2}pt is too narrow for two columns (needs at least {:.2}pt)",
                    self.content_width(),
                    required
                ));
            }
        }
        if self.column_width() <= 1.0 {
            return invalid(format!(
                "column width {:.2}pt is too small; check margins and column gap",
                self.column_width()
            ));
        }
        for (label, style) in [("title", &self.title), ("paragraph", &self.paragraph)] {
            if style.font_size <= 0.0 || style.line_spacing <= 0.0 {
                return invalid(format!(
                    "{} font size and line spacing must be positive",
                    label
                ));
            }
        }
        if self.min_placeable_height <= 0.0 {
            return invalid("minimum placeable height must be positive".to_string());
        }
        if self.item_gap < 0.0 || self.section_gap < 0.0 {
            return invalid("item and section gaps must not be negative".to_string());
        }
        if self.max_chain_frames == 0 {
            return invalid("max_chain_frames must be at least 1".to_string());
        }
        Ok(())
    }
}
