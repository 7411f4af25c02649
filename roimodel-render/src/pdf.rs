//! PDF report: logo, title, executive summary, inputs, results, benchmarks.

use crate::{ExportError, ReportDocument};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 50;
const LOGO_HEIGHT: i64 = 40;
const WRAP_COLUMNS: usize = 90;

/// A JPEG logo ready to embed as a DCT-encoded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
    components: u8,
}

impl Logo {
    pub fn from_jpeg(bytes: Vec<u8>) -> Result<Self, ExportError> {
        let (width, height, components) =
            jpeg_frame(&bytes).ok_or_else(|| ExportError::LogoUnavailable {
                message: "not a baseline or progressive JPEG".to_string(),
            })?;
        Ok(Self {
            bytes,
            width,
            height,
            components,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn color_space(&self) -> &'static str {
        match self.components {
            1 => "DeviceGray",
            4 => "DeviceCMYK",
            _ => "DeviceRGB",
        }
    }

    fn to_stream(&self) -> Stream {
        let dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => Object::Integer(i64::from(self.width)),
            "Height" => Object::Integer(i64::from(self.height)),
            "ColorSpace" => self.color_space(),
            "BitsPerComponent" => Object::Integer(8),
            "Filter" => "DCTDecode",
        };
        Stream::new(dict, self.bytes.clone()).with_compression(false)
    }
}

// Width, height and component count from the first SOF segment.
fn jpeg_frame(bytes: &[u8]) -> Option<(u32, u32, u8)> {
    if bytes.len() < 4 || bytes[0] != 0xFF || bytes[1] != 0xD8 {
        return None;
    }
    let mut i = 2;
    while i + 3 < bytes.len() {
        if bytes[i] != 0xFF {
            return None;
        }
        let marker = bytes[i + 1];
        if marker == 0xFF {
            i += 1;
            continue;
        }
        if marker == 0x01 || (0xD0..=0xD7).contains(&marker) {
            i += 2;
            continue;
        }
        if marker == 0xD9 || marker == 0xDA {
            return None;
        }
        let len = usize::from(u16::from_be_bytes([bytes[i + 2], bytes[i + 3]]));
        let is_sof = matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
        if is_sof {
            let seg = bytes.get(i + 4..i + 2 + len)?;
            if seg.len() < 6 {
                return None;
            }
            let height = u32::from(u16::from_be_bytes([seg[1], seg[2]]));
            let width = u32::from(u16::from_be_bytes([seg[3], seg[4]]));
            if width == 0 || height == 0 {
                return None;
            }
            return Some((width, height, seg[5]));
        }
        i += 2 + len;
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Title,
    Heading,
    Body,
}

impl Style {
    fn font(self) -> &'static str {
        match self {
            Style::Title | Style::Heading => "F2",
            Style::Body => "F1",
        }
    }

    fn size(self) -> i64 {
        match self {
            Style::Title => 18,
            Style::Heading => 12,
            Style::Body => 10,
        }
    }

    fn leading(self) -> i64 {
        match self {
            Style::Title => 28,
            Style::Heading => 22,
            Style::Body => 14,
        }
    }
}

struct Line {
    style: Style,
    text: String,
}

fn layout(doc: &ReportDocument) -> Vec<Line> {
    let mut lines = vec![Line {
        style: Style::Title,
        text: doc.title.clone(),
    }];
    push_section(&mut lines, "Executive Summary", vec![doc.summary.clone()]);
    push_section(&mut lines, "Inputs", pairs(&doc.inputs));
    push_section(&mut lines, "Results", pairs(&doc.results));
    push_section(&mut lines, "Benchmarks", doc.benchmarks.clone());
    lines
}

fn push_section(lines: &mut Vec<Line>, heading: &str, body: Vec<String>) {
    lines.push(Line {
        style: Style::Heading,
        text: heading.to_string(),
    });
    let body = if body.is_empty() {
        vec!["None".to_string()]
    } else {
        body
    };
    for paragraph in body {
        for text in wrap(&paragraph, WRAP_COLUMNS) {
            lines.push(Line {
                style: Style::Body,
                text,
            });
        }
    }
}

fn pairs(items: &[(String, String)]) -> Vec<String> {
    items.iter().map(|(l, v)| format!("{l}: {v}")).collect()
}

fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > columns {
            out.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || out.is_empty() {
        out.push(current);
    }
    out
}

// Standard Type1 fonts only cover WinAnsi; keep the text printable ASCII.
fn pdf_text(text: &str) -> Object {
    let ascii: String = text
        .chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '-' })
        .collect();
    Object::string_literal(ascii)
}

fn pdf_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Pdf {
        message: e.to_string(),
    }
}

/// Lay out `doc` on as many A4 pages as needed and serialize the PDF.
pub fn render_pdf(doc: &ReportDocument, logo: Option<&Logo>) -> Result<Vec<u8>, ExportError> {
    let mut pdf = Document::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let regular = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });

    let mut xobjects = Dictionary::new();
    let logo_box = logo.map(|l| {
        let id = pdf.add_object(l.to_stream());
        xobjects.set("Logo", id);
        let width = (i64::from(l.width) * LOGO_HEIGHT / i64::from(l.height).max(1)).max(1);
        (width, LOGO_HEIGHT)
    });

    let resources_id = pdf.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
        },
        "XObject" => xobjects,
    });

    let mut pages: Vec<Vec<Operation>> = vec![Vec::new()];
    let mut y = PAGE_HEIGHT - MARGIN;
    if let Some((w, h)) = logo_box {
        y -= h;
        pages[0].extend([
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    Object::Integer(w),
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(h),
                    Object::Integer(MARGIN),
                    Object::Integer(y),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Logo".to_vec())]),
            Operation::new("Q", vec![]),
        ]);
        y -= 16;
    }

    for line in layout(doc) {
        y -= line.style.leading();
        if y < MARGIN {
            pages.push(Vec::new());
            y = PAGE_HEIGHT - MARGIN - line.style.leading();
        }
        if let Some(ops) = pages.last_mut() {
            ops.extend([
                Operation::new("BT", vec![]),
                Operation::new(
                    "Tf",
                    vec![line.style.font().into(), Object::Integer(line.style.size())],
                ),
                Operation::new("Td", vec![Object::Integer(MARGIN), Object::Integer(y)]),
                Operation::new("Tj", vec![pdf_text(&line.text)]),
                Operation::new("ET", vec![]),
            ]);
        }
    }

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let encoded = content.encode().map_err(pdf_err)?;
        let content_id = pdf.add_object(Stream::new(dictionary! {}, encoded));
        let page_id: ObjectId = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(count),
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(PAGE_WIDTH),
                Object::Integer(PAGE_HEIGHT),
            ],
        }),
    );

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    pdf.save_to(&mut out).map_err(pdf_err)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    // SOI, APP0 stub, SOF0, EOI.
    fn tiny_jpeg(width: u16, height: u16) -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xD8];
        bytes.extend([0xFF, 0xE0, 0x00, 0x04, 0x00, 0x00]);
        bytes.extend([0xFF, 0xC0, 0x00, 0x0B, 0x08]);
        bytes.extend(height.to_be_bytes());
        bytes.extend(width.to_be_bytes());
        bytes.extend([0x01, 0x01, 0x11, 0x00]);
        bytes.extend([0xFF, 0xD9]);
        bytes
    }

    #[test]
    fn parses_jpeg_dimensions() {
        let logo = Logo::from_jpeg(tiny_jpeg(120, 40)).expect("jpeg");
        assert_eq!(logo.width(), 120);
        assert_eq!(logo.height(), 40);
        assert_eq!(logo.color_space(), "DeviceGray");
    }

    #[test]
    fn rejects_non_jpeg() {
        let err = Logo::from_jpeg(b"\x89PNG\r\n\x1a\n".to_vec()).expect_err("png");
        assert!(err.is_logo_failure());
    }

    #[test]
    fn wrap_respects_columns() {
        let lines = wrap("alpha beta gamma delta", 11);
        assert_eq!(lines, vec!["alpha beta", "gamma delta"]);
        assert_eq!(wrap("", 10), vec![String::new()]);
    }

    #[test]
    fn non_ascii_is_replaced() {
        let Object::String(bytes, _) = pdf_text("café") else {
            panic!("expected string object");
        };
        assert_eq!(bytes, b"caf-".to_vec());
    }
}
