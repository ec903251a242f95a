//! Lays out a `Table` as numbered family blocks on A4 pages.
//!
//! Each row becomes one block: a red "Family N:" marker, then every non-empty
//! field as a bold label followed by its indented value. The marker is placed
//! right before the first timestamp column of the row; rows without one get the
//! marker after their fields.
//!
//! The cursor is checked against the bottom limit after every vertical move,
//! so no string is ever drawn below `PageConfig::bottom_limit`.

use tracing::debug;

use crate::layout::page::{Cursor, PageConfig};
use crate::layout::wrap::wrap_text;
use crate::models::table::{Record, Table};
use crate::render::surface::{Color, DisplayList, DrawState};

/// The two header lines drawn once at the top of the first page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHeader {
    pub title: String,
    pub subtitle: String,
}

impl Default for DocumentHeader {
    fn default() -> Self {
        DocumentHeader {
            title: "DIRECTORY".to_string(),
            subtitle: "ST MARY'S BETHLEHEM ORTHODOX CHURCH, KULAPPARACHAL".to_string(),
        }
    }
}

/// Column names containing "timestamp" anchor the family marker.
pub fn is_timestamp_column(column: &str) -> bool {
    column.to_lowercase().contains("timestamp")
}

pub fn is_photo_column(column: &str) -> bool {
    column.to_lowercase().contains("photo")
}

/// Values drawn in the accent colour: photo columns and anything link-like.
pub fn value_color(column: &str, value: &str) -> Color {
    if is_photo_column(column) || value.starts_with("http") {
        Color::BLUE
    } else {
        Color::BLACK
    }
}

pub fn family_label(family_number: usize) -> String {
    format!("Family {family_number}:")
}

/// Builds the display list for the whole document.
pub fn layout_directory(table: &Table, header: &DocumentHeader, config: &PageConfig) -> DisplayList {
    let mut layout = DirectoryLayout::new(config);
    layout.draw_header(header);

    for (index, record) in table.records().enumerate() {
        layout.draw_family(index + 1, &record);
    }

    let list = layout.list.finish();
    debug!(
        families = table.row_count(),
        pages = list.page_count(),
        "Directory layout complete"
    );
    list
}

struct DirectoryLayout<'a> {
    config: &'a PageConfig,
    list: DisplayList,
    cursor: Cursor,
}

impl<'a> DirectoryLayout<'a> {
    fn new(config: &'a PageConfig) -> Self {
        DirectoryLayout {
            config,
            list: DisplayList::new(config.width_pt, config.height_pt),
            cursor: Cursor::new(config.first_content_y()),
        }
    }

    fn draw_header(&mut self, header: &DocumentHeader) {
        let c = self.config;
        let centre = c.width_pt / 2.0;
        self.list.draw_centred_string(
            DrawState::new(c.title_font, Color::BLACK),
            centre,
            c.height_pt - c.title_offset,
            &header.title,
        );
        self.list.draw_centred_string(
            DrawState::new(c.subtitle_font, Color::BLACK),
            centre,
            c.height_pt - c.subtitle_offset,
            &header.subtitle,
        );
    }

    fn advance(&mut self, dy: f32) {
        if self.cursor.advance(dy, self.config) {
            self.list.show_page();
        }
    }

    fn draw_line(&mut self, state: DrawState, x: f32, text: &str) {
        self.list.draw_string(state, x, self.cursor.y, text);
        self.advance(self.config.line_height);
    }

    fn draw_wrapped(&mut self, state: DrawState, x: f32, text: &str) {
        for line in wrap_text(text, state.font, self.config.max_text_width()) {
            self.draw_line(state, x, &line);
        }
    }

    fn draw_family_label(&mut self, family_number: usize) {
        let state = DrawState::new(self.config.family_font, Color::RED);
        self.draw_line(state, self.config.margin, &family_label(family_number));
    }

    fn draw_family(&mut self, family_number: usize, record: &Record<'_>) {
        let c = self.config;
        let mut family_label_inserted = false;

        for field in &record.fields {
            if !family_label_inserted && is_timestamp_column(field.column) {
                self.draw_family_label(family_number);
                family_label_inserted = true;
            }

            let label_state = DrawState::new(c.label_font, Color::BLACK);
            self.draw_wrapped(label_state, c.margin, &format!("{}:", field.column));

            let value_state = DrawState::new(c.value_font, value_color(field.column, &field.value));
            self.draw_wrapped(value_state, c.margin + c.value_indent, &field.value);

            self.advance(c.field_gap);
        }

        if !family_label_inserted {
            self.draw_family_label(family_number);
        }

        self.advance(c.record_gap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::Font;
    use crate::layout::page::default_page_config;
    use crate::render::surface::DrawOp;

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        Table::new(
            columns.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|row| {
                    row.iter()
                        .map(|v| if v.is_empty() { None } else { Some(v.to_string()) })
                        .collect()
                })
                .collect(),
        )
    }

    fn render(table: &Table) -> DisplayList {
        layout_directory(table, &DocumentHeader::default(), &default_page_config())
    }

    /// Body ops only; the first two ops are the header lines.
    fn body(list: &DisplayList) -> Vec<&DrawOp> {
        list.ops().skip(2).map(|(_, op)| op).collect()
    }

    fn texts(list: &DisplayList) -> Vec<&str> {
        body(list).iter().map(|op| op.text.as_str()).collect()
    }

    // ── predicates ───────────────────────────────────────────────────────────

    #[test]
    fn test_timestamp_predicate_is_case_insensitive_substring() {
        assert!(is_timestamp_column("Timestamp"));
        assert!(is_timestamp_column("Form TIMESTAMP (UTC)"));
        assert!(!is_timestamp_column("Time stamp"));
    }

    #[test]
    fn test_value_color_policy() {
        assert_eq!(value_color("Family Photo", "IMG_001.jpg"), Color::BLUE);
        assert_eq!(value_color("Website", "https://example.org"), Color::BLUE);
        assert_eq!(value_color("Name", "Smith"), Color::BLACK);
        assert_eq!(
            value_color("Name", "see http://x"),
            Color::BLACK,
            "only a leading http prefix counts"
        );
        assert_eq!(value_color("Note", "HTTP://X"), Color::BLACK, "prefix match is case-sensitive");
    }

    // ── header ───────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_table_renders_header_on_single_page() {
        let list = render(&table(&[], &[]));
        assert_eq!(list.page_count(), 1);
        let all: Vec<&str> = list.ops().map(|(_, op)| op.text.as_str()).collect();
        assert_eq!(
            all,
            vec!["DIRECTORY", "ST MARY'S BETHLEHEM ORTHODOX CHURCH, KULAPPARACHAL"]
        );
        let title = &list.pages()[0].ops[0];
        assert_eq!(title.state.font.size_pt, 18.0);
        assert_eq!(title.state.font.font, Font::HelveticaBold);
        assert!((title.y - (list.height_pt - 40.0)).abs() < 1e-3);
    }

    #[test]
    fn test_header_is_not_repeated_on_later_pages() {
        let rows: Vec<Vec<&str>> = (0..80).map(|_| vec!["Smith"]).collect();
        let rows: Vec<&[&str]> = rows.iter().map(|r| r.as_slice()).collect();
        let list = render(&table(&["Name"], &rows));
        assert!(list.page_count() > 1);
        let titles = list.ops().filter(|(_, op)| op.text == "DIRECTORY").count();
        assert_eq!(titles, 1);
    }

    // ── family blocks ────────────────────────────────────────────────────────

    #[test]
    fn test_end_to_end_family_block() {
        let list = render(&table(
            &["Name", "Timestamp", "Photo Link"],
            &[&["Smith", "2024-01-01", "http://x/y.jpg"]],
        ));
        let ops = body(&list);
        let got: Vec<(&str, Color)> = ops.iter().map(|op| (op.text.as_str(), op.state.color)).collect();
        assert_eq!(
            got,
            vec![
                ("Name:", Color::BLACK),
                ("Smith", Color::BLACK),
                ("Family 1:", Color::RED),
                ("Timestamp:", Color::BLACK),
                ("2024-01-01", Color::BLACK),
                ("Photo Link:", Color::BLACK),
                ("http://x/y.jpg", Color::BLUE),
            ]
        );
        let family = ops[2];
        assert_eq!(family.state.font.font, Font::HelveticaBold);
        assert_eq!(family.state.font.size_pt, 12.0);
        assert_eq!(ops[3].state.font.size_pt, 11.0);
        assert_eq!(ops[4].state.font.font, Font::Helvetica);
    }

    #[test]
    fn test_first_line_starts_below_header() {
        let list = render(&table(&["Name"], &[&["Smith"]]));
        let config = default_page_config();
        assert!((body(&list)[0].y - config.first_content_y()).abs() < 1e-3);
    }

    #[test]
    fn test_values_are_indented_relative_to_labels() {
        let list = render(&table(&["Name"], &[&["Smith"]]));
        let ops = body(&list);
        assert_eq!(ops[0].x, 50.0);
        assert_eq!(ops[1].x, 70.0);
        assert_eq!(ops[1].y, ops[0].y - 16.0);
    }

    #[test]
    fn test_row_without_timestamp_gets_label_after_fields() {
        let list = render(&table(&["Name", "Phone"], &[&["Smith", "555"]]));
        assert_eq!(
            texts(&list),
            vec!["Name:", "Smith", "Phone:", "555", "Family 1:"]
        );
    }

    #[test]
    fn test_row_with_no_fields_still_gets_label() {
        let list = render(&table(&["Name"], &[&["Smith"], &[""], &["Jones"]]));
        let config = default_page_config();
        let ops = body(&list);
        let empty_row_label = ops
            .iter()
            .find(|op| op.text == "Family 2:")
            .map(|op| op.y)
            .expect("row 2 should have a family label");
        // Row 1: label, value, field gap, family label, record gap.
        let expected = config.first_content_y() - 3.0 * 16.0 - 6.0 - 20.0;
        assert!((empty_row_label - expected).abs() < 1e-3, "got {empty_row_label}");
    }

    #[test]
    fn test_timestamp_with_blank_value_does_not_anchor_label() {
        let list = render(&table(&["Timestamp", "Name"], &[&["", "Smith"]]));
        assert_eq!(texts(&list), vec!["Name:", "Smith", "Family 1:"]);
    }

    #[test]
    fn test_only_first_timestamp_column_anchors_label() {
        let list = render(&table(
            &["Timestamp", "Edit Timestamp"],
            &[&["2024-01-01", "2024-02-02"]],
        ));
        let labels = texts(&list).iter().filter(|t| t.starts_with("Family")).count();
        assert_eq!(labels, 1);
        assert_eq!(texts(&list)[0], "Family 1:");
    }

    #[test]
    fn test_family_numbers_are_sequential_across_pages() {
        let rows: Vec<Vec<&str>> = (0..120)
            .map(|_| vec!["2024-01-01", "A fairly long value that wraps maybe"])
            .collect();
        let rows: Vec<&[&str]> = rows.iter().map(|r| r.as_slice()).collect();
        let list = render(&table(&["Timestamp", "Address"], &rows));
        assert!(list.page_count() > 1, "120 families should not fit on one page");

        let numbers: Vec<usize> = list
            .ops()
            .filter_map(|(_, op)| op.text.strip_prefix("Family "))
            .filter_map(|rest| rest.trim_end_matches(':').parse().ok())
            .collect();
        assert_eq!(numbers, (1..=120).collect::<Vec<_>>());
    }

    #[test]
    fn test_no_line_is_drawn_below_bottom_limit() {
        let long_value = "word ".repeat(300);
        let rows: Vec<Vec<&str>> = (0..30)
            .map(|_| vec!["2024-01-01", long_value.as_str(), "Smith"])
            .collect();
        let rows: Vec<&[&str]> = rows.iter().map(|r| r.as_slice()).collect();
        let list = render(&table(&["Timestamp", "Notes", "Name"], &rows));
        let config = default_page_config();

        assert!(list.page_count() > 2);
        for (page, op) in list.ops() {
            assert!(
                op.y >= config.bottom_limit,
                "{:?} on page {page} drawn at y={} below the limit",
                op.text,
                op.y
            );
        }
    }

    #[test]
    fn test_break_on_value_line_applies_field_gap_on_new_page() {
        // One-field rows: the 60th value line crosses the limit, so the new
        // page starts with the field gap before the fallback label.
        let rows: Vec<Vec<&str>> = (0..60).map(|_| vec!["Smith"]).collect();
        let rows: Vec<&[&str]> = rows.iter().map(|r| r.as_slice()).collect();
        let list = render(&table(&["Name"], &rows));
        let config = default_page_config();
        let second_page_first = &list.pages()[1].ops[0];
        assert!(second_page_first.text.starts_with("Family "));
        assert!(
            (second_page_first.y - (config.top() - config.field_gap)).abs() < 1e-3,
            "got {}",
            second_page_first.y
        );
    }

    #[test]
    fn test_break_on_record_gap_starts_next_family_at_top() {
        // An empty first row shifts the one-field rows so that the record gap
        // after family 10 is what crosses the limit.
        let mut rows: Vec<Vec<&str>> = vec![vec![""]];
        rows.extend((0..39).map(|_| vec!["Smith"]));
        let rows: Vec<&[&str]> = rows.iter().map(|r| r.as_slice()).collect();
        let list = render(&table(&["Name"], &rows));
        let config = default_page_config();

        let first_page_last = list.pages()[0].ops.last().expect("first page has ops");
        assert_eq!(first_page_last.text, "Family 10:");
        assert!(first_page_last.y - config.line_height >= config.bottom_limit);

        let second_page_first = &list.pages()[1].ops[0];
        assert_eq!(second_page_first.text, "Name:");
        assert!(
            (second_page_first.y - config.top()).abs() < 1e-3,
            "got {}",
            second_page_first.y
        );
    }

    #[test]
    fn test_long_values_wrap_within_text_width() {
        let value = "lorem ipsum dolor sit amet ".repeat(20);
        let list = render(&table(&["Notes"], &[&[value.as_str()]]));
        let config = default_page_config();
        let value_lines: Vec<&DrawOp> = body(&list)
            .into_iter()
            .filter(|op| op.state.font.font == Font::Helvetica)
            .collect();
        assert!(value_lines.len() > 1, "long value should wrap");
        for op in value_lines {
            assert!(op.state.font.string_width(&op.text) <= config.max_text_width());
        }
    }

    #[test]
    fn test_every_row_gets_exactly_one_family_label() {
        let list = render(&table(
            &["Name", "Timestamp"],
            &[&["A", "t1"], &["B", ""], &["", ""], &["D", "t4"]],
        ));
        for n in 1..=4 {
            let label = family_label(n);
            let count = list.ops().filter(|(_, op)| op.text == label).count();
            assert_eq!(count, 1, "{label} should appear exactly once");
        }
    }
}
