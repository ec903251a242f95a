//! Page geometry and the vertical render cursor.
//!
//! Coordinates are PDF points with the origin at the bottom-left corner, so the
//! cursor moves *down* the page by decreasing `y`.

use crate::layout::font_metrics::{Font, FontSpec};

/// ISO A4 in points.
pub const A4_WIDTH_PT: f32 = 595.2756;
pub const A4_HEIGHT_PT: f32 = 841.8898;

/// Fixed layout parameters for the directory document.
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub width_pt: f32,
    pub height_pt: f32,
    /// Left margin; the text width is `width - 2 * margin`.
    pub margin: f32,
    pub line_height: f32,
    /// Space after every family block.
    pub record_gap: f32,
    /// Space after every field.
    pub field_gap: f32,
    /// Extra indent of value lines relative to labels.
    pub value_indent: f32,
    /// A cursor below this height triggers a page break.
    pub bottom_limit: f32,
    /// Distance from the page top to the cursor after a page break.
    pub top_offset: f32,
    /// Title and subtitle baselines, measured down from the page top.
    pub title_offset: f32,
    pub subtitle_offset: f32,
    /// Space reserved under the subtitle on the first page.
    pub header_gap: f32,
    pub title_font: FontSpec,
    pub subtitle_font: FontSpec,
    pub family_font: FontSpec,
    pub label_font: FontSpec,
    pub value_font: FontSpec,
}

/// The directory layout: A4, 50pt margins, 16pt lines.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        width_pt: A4_WIDTH_PT,
        height_pt: A4_HEIGHT_PT,
        margin: 50.0,
        line_height: 16.0,
        record_gap: 20.0,
        field_gap: 6.0,
        value_indent: 20.0,
        bottom_limit: 60.0,
        top_offset: 60.0,
        title_offset: 40.0,
        subtitle_offset: 60.0,
        header_gap: 30.0,
        title_font: FontSpec::new(Font::HelveticaBold, 18.0),
        subtitle_font: FontSpec::new(Font::HelveticaBold, 12.0),
        family_font: FontSpec::new(Font::HelveticaBold, 12.0),
        label_font: FontSpec::new(Font::HelveticaBold, 11.0),
        value_font: FontSpec::new(Font::Helvetica, 10.0),
    }
}

impl PageConfig {
    pub fn max_text_width(&self) -> f32 {
        self.width_pt - 2.0 * self.margin
    }

    /// Cursor height at the top of a continuation page.
    pub fn top(&self) -> f32 {
        self.height_pt - self.top_offset
    }

    /// Cursor height for the first content line, below the document header.
    pub fn first_content_y(&self) -> f32 {
        self.top() - self.header_gap
    }
}

/// Vertical position and page index for one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub y: f32,
    /// 0-based page index.
    pub page: usize,
}

impl Cursor {
    pub fn new(y: f32) -> Self {
        Cursor { y, page: 0 }
    }

    /// Moves down by `dy`. If that crosses the bottom limit, moves to the top of
    /// the next page and returns `true`.
    pub fn advance(&mut self, dy: f32, config: &PageConfig) -> bool {
        self.y -= dy;
        if self.y < config.bottom_limit {
            self.page += 1;
            self.y = config.top();
            return true;
        }
        false
    }
}
