//! Serialises a `DisplayList` into PDF bytes with `lopdf`.
//!
//! Both fonts are unembedded standard Type1 fonts with `WinAnsiEncoding`.
//! Every string is written inside its own `BT`/`ET` block with font and fill
//! colour set explicitly.

use chrono::{DateTime, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::layout::font_metrics::Font;
use crate::render::surface::{DisplayList, DrawOp, Page};
use crate::render::RenderError;

/// Entries for the document information dictionary.
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub created_at: DateTime<Utc>,
}

const PRODUCER: &str = concat!("directory ", env!("CARGO_PKG_VERSION"));

pub fn write_pdf(list: &DisplayList, info: &DocumentInfo) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in Font::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), Object::Reference(font_id));
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Real(list.width_pt),
        Object::Real(list.height_pt),
    ];

    let mut kids = Vec::with_capacity(list.page_count());
    for page in list.pages() {
        let page_id = write_page(&mut doc, page, pages_id, resources_id, &media_box)?;
        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(&info.title), StringFormat::Literal),
        "Producer" => Object::string_literal(PRODUCER),
        "CreationDate" => Object::string_literal(pdf_date(&info.created_at)),
    });
    doc.trailer.set("Info", Object::Reference(info_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf)
        .map_err(|e| RenderError::Pdf(format!("failed to write document: {e}")))?;
    Ok(buf)
}

fn write_page(
    doc: &mut Document,
    page: &Page,
    pages_id: ObjectId,
    resources_id: ObjectId,
    media_box: &[Object],
) -> Result<ObjectId, RenderError> {
    let operations: Vec<Operation> = page.ops.iter().flat_map(text_operations).collect();
    let content = Content { operations }
        .encode()
        .map_err(|e| RenderError::Pdf(format!("failed to encode page content: {e}")))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));

    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => Object::Reference(pages_id),
        "MediaBox" => media_box.to_vec(),
        "Contents" => Object::Reference(content_id),
        "Resources" => Object::Reference(resources_id),
    }))
}

fn text_operations(op: &DrawOp) -> Vec<Operation> {
    let font = op.state.font;
    let color = op.state.color;
    vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![font.font.resource_name().into(), Object::Real(font.size_pt)],
        ),
        Operation::new(
            "rg",
            vec![Object::Real(color.r), Object::Real(color.g), Object::Real(color.b)],
        ),
        Operation::new("Td", vec![Object::Real(op.x), Object::Real(op.y)]),
        Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(&op.text), StringFormat::Literal)],
        ),
        Operation::new("ET", vec![]),
    ]
}

/// Maps text to WinAnsiEncoding bytes. Characters with no code point in the
/// encoding become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

fn pdf_date(at: &DateTime<Utc>) -> String {
    at.format("D:%Y%m%d%H%M%SZ").to_string()
}
