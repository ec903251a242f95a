//! Display list the renderer draws into.
//!
//! Every `DrawOp` carries its complete `DrawState`. Nothing is inherited from a
//! previous draw, so the PDF writer re-selects font and colour for every string.

use crate::layout::font_metrics::FontSpec;

/// RGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };
    /// Family markers.
    pub const RED: Color = Color { r: 1.0, g: 0.0, b: 0.0 };
    /// Accent for links and photo fields.
    pub const BLUE: Color = Color { r: 0.0, g: 0.0, b: 1.0 };
}

/// Font and fill colour for one draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawState {
    pub font: FontSpec,
    pub color: Color,
}

impl DrawState {
    pub const fn new(font: FontSpec, color: Color) -> Self {
        DrawState { font, color }
    }
}

/// A single string placed at a baseline-left position.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOp {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub state: DrawState,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

/// Pages of draw operations for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    pub width_pt: f32,
    pub height_pt: f32,
    pages: Vec<Page>,
}

impl DisplayList {
    /// Starts a document with one empty page.
    pub fn new(width_pt: f32, height_pt: f32) -> Self {
        DisplayList {
            width_pt,
            height_pt,
            pages: vec![Page::default()],
        }
    }

    pub fn draw_string(&mut self, state: DrawState, x: f32, y: f32, text: &str) {
        let op = DrawOp {
            x,
            y,
            text: text.to_string(),
            state,
        };
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    /// Draws `text` horizontally centred on `centre_x`.
    pub fn draw_centred_string(&mut self, state: DrawState, centre_x: f32, y: f32, text: &str) {
        let x = centre_x - state.font.string_width(text) / 2.0;
        self.draw_string(state, x, y, text);
    }

    /// Closes the current page and starts a new one.
    pub fn show_page(&mut self) {
        self.pages.push(Page::default());
    }

    /// Drops a trailing page that received no drawing. The first page is
    /// always kept.
    pub fn finish(mut self) -> Self {
        if self.pages.len() > 1 && self.pages.last().is_some_and(|p| p.ops.is_empty()) {
            self.pages.pop();
        }
        self
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All operations in drawing order, tagged with their 0-based page index.
    pub fn ops(&self) -> impl Iterator<Item = (usize, &DrawOp)> + '_ {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(i, page)| page.ops.iter().map(move |op| (i, op)))
    }
}
