//! Line breaking for the simulated host

use crate::host::metrics::FontMetrics;
use std::ops::Range;
use unicode_linebreak::{linebreaks, BreakOpportunity};
use unicode_segmentation::UnicodeSegmentation;

/// One laid-out line
#[derive(Debug, Clone, PartialEq)]
pub struct LineSpan {
    /// Byte range within the text this line covers
    pub byte_range: Range<usize>,
    /// Width of the visible content, trailing whitespace excluded
    pub width: f32,
}

/// Greedy line breaker over UAX #14 break opportunities
#[derive(Debug, Default, Clone, Copy)]
pub struct LineBreaker;

impl LineBreaker {
    pub fn new() -> Self {
        Self
    }

    /// Width of `text` in points
    pub fn measure(&self, text: &str, metrics: &FontMetrics, font_size: f32) -> f32 {
        text.graphemes(true)
            .map(|grapheme| self.grapheme_width(grapheme, metrics))
            .sum::<f32>()
            * font_size
    }

    fn grapheme_width(&self, grapheme: &str, metrics: &FontMetrics) -> f32 {
        if grapheme == "\t" {
            metrics.tab_width()
        } else if grapheme.chars().all(|c| c.is_control()) {
            0.0
        } else {
            grapheme.chars().map(|c| metrics.width(c)).sum()
        }
    }

    /// Break text into lines no wider than `max_width`.
    ///
    /// Empty text produces no lines. A word wider than the line is split at
    /// grapheme boundaries.
    pub fn break_lines(
        &self,
        text: &str,
        max_width: f32,
        metrics: &FontMetrics,
        font_size: f32,
    ) -> Vec<LineSpan> {
        let mut lines = Vec::new();
        if text.is_empty() {
            return lines;
        }

        let mut line_start = 0;
        let mut line_width: f32 = 0.0;
        let mut visible_width: f32 = 0.0;
        let mut segment_start = 0;

        for (segment_end, opportunity) in linebreaks(text) {
            let segment = &text[segment_start..segment_end];
            let content = segment.trim_end_matches(char::is_whitespace);
            let content_width = self.measure(content, metrics, font_size);
            let full_width = self.measure(segment, metrics, font_size);

            // Soft wrap before this segment
            if segment_start > line_start && line_width + content_width > max_width {
                lines.push(LineSpan {
                    byte_range: line_start..segment_start,
                    width: visible_width,
                });
                line_start = segment_start;
                line_width = 0.0;
                visible_width = 0.0;
            }

            if segment_start == line_start && content_width > max_width {
                // Emergency break inside the segment
                for (offset, grapheme) in segment.grapheme_indices(true) {
                    let width = self.grapheme_width(grapheme, metrics) * font_size;
                    let at = segment_start + offset;
                    if at > line_start && line_width + width > max_width {
                        lines.push(LineSpan {
                            byte_range: line_start..at,
                            width: visible_width,
                        });
                        line_start = at;
                        line_width = 0.0;
                        visible_width = 0.0;
                    }
                    line_width += width;
                    if !grapheme.chars().all(char::is_whitespace) {
                        visible_width = line_width;
                    }
                }
            } else {
                if !content.is_empty() {
                    visible_width = line_width + content_width;
                }
                line_width += full_width;
            }

            if opportunity == BreakOpportunity::Mandatory && segment_end > line_start {
                lines.push(LineSpan {
                    byte_range: line_start..segment_end,
                    width: visible_width,
                });
                line_start = segment_end;
                line_width = 0.0;
                visible_width = 0.0;
            }

            segment_start = segment_end;
        }

        lines
    }
}
