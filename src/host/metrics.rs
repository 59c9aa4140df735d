//! Font metrics for the simulated host

use rustc_hash::FxHashMap;

/// Font used for new frames when nothing else is set
pub const DEFAULT_FONT: &str = "Liberation Serif Regular";

/// Horizontal advances, in em (multiply by font size for points)
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetrics {
    /// Width of ASCII characters (0-127)
    pub char_widths: Vec<f32>,
    /// Default width for non-ASCII characters
    pub default_width: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::uniform(0.5)
    }
}

impl FontMetrics {
    pub fn new(char_widths: Vec<f32>, default_width: f32) -> Self {
        Self {
            char_widths,
            default_width,
        }
    }

    /// Every character has the same advance
    pub fn uniform(width: f32) -> Self {
        Self {
            char_widths: vec![width; 128],
            default_width: width,
        }
    }

    /// Get width of a character in em
    pub fn width(&self, c: char) -> f32 {
        if c.is_ascii() {
            if let Some(w) = self.char_widths.get(c as usize) {
                return *w;
            }
        }
        self.default_width
    }

    /// Tab advance in em
    pub fn tab_width(&self) -> f32 {
        self.default_width * 4.0
    }
}

/// Fonts known to the simulated host, by full name
#[derive(Debug, Clone)]
pub struct FontLibrary {
    fonts: FxHashMap<String, FontMetrics>,
}

impl Default for FontLibrary {
    fn default() -> Self {
        let mut library = Self::empty();
        library.add(DEFAULT_FONT, FontMetrics::uniform(0.5));
        library.add("Liberation Serif Bold", FontMetrics::uniform(0.55));
        library.add("Liberation Serif Italic", FontMetrics::uniform(0.5));
        library.add("DejaVu Sans Book", FontMetrics::uniform(0.55));
        library.add("DejaVu Sans Bold", FontMetrics::uniform(0.6));
        library
    }
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Library with no fonts at all
    pub fn empty() -> Self {
        Self {
            fonts: FxHashMap::default(),
        }
    }

    /// Add or replace a font
    pub fn add(&mut self, name: impl Into<String>, metrics: FontMetrics) {
        self.fonts.insert(name.into(), metrics);
    }

    /// Get font metrics by name
    pub fn get(&self, name: &str) -> Option<&FontMetrics> {
        self.fonts.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    /// Font names in a stable order
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.fonts.keys().cloned().collect();
        names.sort();
        names
    }
}
