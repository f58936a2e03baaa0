//! DOCX text extraction
//!
//! Reads `word/document.xml` out of the zip container and walks it with a
//! small state machine. Body paragraphs come first, then every row of every
//! body-level table rendered as `cell | cell`. Entries are separated by a
//! blank line.

use crate::error::{ExtractError, Result};
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;
use std::io::{Cursor, Read};

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract text from DOCX bytes.
///
/// `max_part_bytes` bounds the inflated size of `word/document.xml`; the
/// sizes declared in the zip headers are not trusted.
pub fn extract_text(bytes: &[u8], max_part_bytes: usize) -> Result<String> {
    let xml = read_document_part(bytes, max_part_bytes)?;
    let body = parse_document_xml(&xml)?;
    Ok(body.render())
}

fn read_document_part(bytes: &[u8], max_part_bytes: usize) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractError::DocumentParse(format!("{}: {}", DOCUMENT_PART, e)))?;

    let mut raw = Vec::new();
    part.take((max_part_bytes as u64).saturating_add(1))
        .read_to_end(&mut raw)
        .map_err(|e| ExtractError::DocumentParse(format!("{}: {}", DOCUMENT_PART, e)))?;
    if raw.len() > max_part_bytes {
        return Err(ExtractError::DocumentParse(format!(
            "{} expands beyond {} bytes",
            DOCUMENT_PART, max_part_bytes
        )));
    }

    String::from_utf8(raw)
        .map_err(|e| ExtractError::DocumentParse(format!("{}: {}", DOCUMENT_PART, e)))
}

/// Text pulled out of a document body
#[derive(Debug, Default, PartialEq)]
pub struct DocumentBody {
    /// Trimmed, non-empty body paragraphs in document order
    pub paragraphs: Vec<String>,

    /// Rendered table rows in document order
    pub table_rows: Vec<String>,
}

impl DocumentBody {
    /// Paragraphs then table rows, separated by blank lines
    pub fn render(&self) -> String {
        self.paragraphs
            .iter()
            .chain(self.table_rows.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Join a row's cells with `" | "`, leaving out cells that are blank
pub fn render_row<S: AsRef<str>>(cells: &[S]) -> String {
    cells
        .iter()
        .map(|c| c.as_ref().trim())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Parse the WordprocessingML of `word/document.xml`
pub fn parse_document_xml(xml: &str) -> Result<DocumentBody> {
    let mut reader = Reader::from_str(xml);
    let mut parser = BodyParser::default();

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => parser.handle_start(e),
            Event::Empty(ref e) => parser.handle_empty(e),
            Event::Text(ref e) => parser.handle_text(e)?,
            Event::End(_) => parser.handle_end(),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(parser.body)
}

/// Where a run of text belongs
#[derive(Debug, Clone, Copy, PartialEq)]
enum Target {
    Paragraph,
    Cell,
}

/// WordprocessingML state machine.
///
/// `stack` holds local element names from the root. A body paragraph sits at
/// `document/body/p`; a table cell paragraph at `document/body/tbl/tr/tc/p`.
/// Anything deeper (nested tables, content controls) is ignored.
#[derive(Default)]
struct BodyParser {
    body: DocumentBody,
    stack: Vec<String>,
    paragraph: String,
    cell_paragraphs: Vec<String>,
    row_cells: Vec<String>,
}

impl BodyParser {
    fn at(&self, index: usize, name: &str) -> bool {
        self.stack.get(index).map(String::as_str) == Some(name)
    }

    fn in_body(&self) -> bool {
        self.at(0, "document") && self.at(1, "body")
    }

    fn target(&self) -> Option<Target> {
        if !self.in_body() {
            return None;
        }
        if self.at(2, "p") {
            return Some(Target::Paragraph);
        }
        if self.at(2, "tbl") && self.at(3, "tr") && self.at(4, "tc") && self.at(5, "p") {
            return Some(Target::Cell);
        }
        None
    }

    fn handle_start(&mut self, e: &BytesStart<'_>) {
        self.stack.push(local_name(e));
    }

    /// Self-closing run children that stand for whitespace
    fn handle_empty(&mut self, e: &BytesStart<'_>) {
        if self.stack.last().map(String::as_str) != Some("r") || self.target().is_none() {
            return;
        }
        match local_name(e).as_str() {
            "tab" => self.paragraph.push('\t'),
            "cr" => self.paragraph.push('\n'),
            "br" if is_line_break(e) => self.paragraph.push('\n'),
            _ => {}
        }
    }

    fn handle_text(&mut self, e: &BytesText<'_>) -> Result<()> {
        if self.stack.last().map(String::as_str) != Some("t") || self.target().is_none() {
            return Ok(());
        }
        self.paragraph.push_str(&e.unescape()?);
        Ok(())
    }

    fn handle_end(&mut self) {
        let depth = self.stack.len();
        let closing = self.stack.last().cloned().unwrap_or_default();

        match (closing.as_str(), depth) {
            ("p", 3) if self.target() == Some(Target::Paragraph) => {
                let text = std::mem::take(&mut self.paragraph);
                let text = text.trim();
                if !text.is_empty() {
                    self.body.paragraphs.push(text.to_string());
                }
            }
            ("p", 6) if self.target() == Some(Target::Cell) => {
                let text = std::mem::take(&mut self.paragraph);
                self.cell_paragraphs.push(text);
            }
            ("tc", 5) if self.in_body() && self.at(2, "tbl") => {
                let cell = std::mem::take(&mut self.cell_paragraphs).join("\n");
                self.row_cells.push(cell);
            }
            ("tr", 4) if self.in_body() && self.at(2, "tbl") => {
                let cells = std::mem::take(&mut self.row_cells);
                let row = render_row(&cells);
                if !row.is_empty() {
                    self.body.table_rows.push(row);
                }
            }
            _ => {}
        }

        self.stack.pop();
    }
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

/// `<w:br/>` without a type, or with `textWrapping`, is a soft line break.
/// Page and column breaks carry no text.
fn is_line_break(e: &BytesStart<'_>) -> bool {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == b"type" {
            return attr.value.as_ref() == b"textWrapping";
        }
    }
    true
}
