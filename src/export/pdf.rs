//! Vector PDF rendering of a [`LetterLayout`].
//!
//! US Letter, 0.75in margins, Times 11pt at 1.4 line height. Body
//! paragraphs are greedily wrapped with the static Times metrics and
//! justified through the `Tw` word-spacing operator; the last line of a
//! paragraph stays ragged. Lines flow to a new page only when the current
//! one is full, and the closing block is never split across pages.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tracing::info;

use super::font_metrics::{encode_win_ansi, FontStyle};
use super::layout::LetterLayout;
use crate::error::AppError;

pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
pub const MARGIN: f32 = 54.0;
pub const FONT_SIZE: f32 = 11.0;
pub const LINE_HEIGHT: f32 = FONT_SIZE * 1.4;
pub const TEXT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const SENDER_GAP: f32 = 15.0;
const DATE_GAP: f32 = 15.0;
const RECIPIENT_GAP: f32 = 20.0;
const BODY_GAP: f32 = 20.0;
const SIGNATURE_GAP: f32 = 15.0;
const PARAGRAPH_GAP: f32 = LINE_HEIGHT * 0.5;

/// One wrapped line of encoded text.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    pub words: Vec<Vec<u8>>,
    /// Whether the line should be stretched to the full text width.
    pub justify: bool,
}

impl WrappedLine {
    fn encoded(&self) -> Vec<u8> {
        self.words.join(&b' ')
    }

    /// Width with single spaces between words.
    pub fn natural_width(&self, style: FontStyle) -> f32 {
        style.measure(&self.encoded(), FONT_SIZE)
    }

    /// Extra space added to each inter-word gap when justified.
    pub fn word_spacing(&self, style: FontStyle, max_width: f32) -> f32 {
        if !self.justify || self.words.len() < 2 {
            return 0.0;
        }
        let slack = max_width - self.natural_width(style);
        (slack / (self.words.len() - 1) as f32).max(0.0)
    }
}

/// Greedy word wrap of one paragraph. Words wider than a line are broken
/// between characters.
pub fn wrap_paragraph(text: &str, style: FontStyle, max_width: f32) -> Vec<WrappedLine> {
    let space = style.measure(b" ", FONT_SIZE);
    let mut lines = Vec::new();
    let mut current: Vec<Vec<u8>> = Vec::new();
    let mut width = 0.0_f32;

    for word in text.split_whitespace() {
        for piece in split_oversized(encode_win_ansi(word), style, max_width) {
            let piece_width = style.measure(&piece, FONT_SIZE);
            let needed = if current.is_empty() {
                piece_width
            } else {
                width + space + piece_width
            };
            if needed > max_width && !current.is_empty() {
                lines.push(WrappedLine {
                    words: std::mem::take(&mut current),
                    justify: true,
                });
                width = piece_width;
            } else {
                width = needed;
            }
            current.push(piece);
        }
    }

    if !current.is_empty() {
        lines.push(WrappedLine {
            words: current,
            justify: false,
        });
    }
    lines
}

fn split_oversized(word: Vec<u8>, style: FontStyle, max_width: f32) -> Vec<Vec<u8>> {
    if style.measure(&word, FONT_SIZE) <= max_width {
        return vec![word];
    }
    let mut pieces = Vec::new();
    let mut piece = Vec::new();
    for byte in word {
        piece.push(byte);
        if style.measure(&piece, FONT_SIZE) > max_width && piece.len() > 1 {
            let overflow = piece.pop().unwrap_or(byte);
            pieces.push(std::mem::take(&mut piece));
            piece.push(overflow);
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// A line positioned on a page.
#[derive(Debug, Clone, PartialEq)]
struct PlacedLine {
    style: FontStyle,
    baseline: f32,
    text: Vec<u8>,
    word_spacing: f32,
}

/// Top-down cursor over a growing list of pages.
struct Pager {
    pages: Vec<Vec<PlacedLine>>,
    cursor: f32,
}

impl Pager {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            cursor: PAGE_HEIGHT - MARGIN,
        }
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor = PAGE_HEIGHT - MARGIN;
    }

    /// Start a new page unless `height` still fits on this one.
    fn keep_together(&mut self, height: f32) {
        let page_is_empty = self.pages.last().map_or(true, |p| p.is_empty());
        if self.cursor - height < MARGIN && !page_is_empty {
            self.new_page();
        }
    }

    fn gap(&mut self, amount: f32) {
        self.cursor -= amount;
    }

    fn place(&mut self, style: FontStyle, text: Vec<u8>, word_spacing: f32) {
        self.keep_together(LINE_HEIGHT);
        // Centre the glyphs in the line box; descenders sit ~0.2em low.
        let baseline = self.cursor - (LINE_HEIGHT + FONT_SIZE) / 2.0 + FONT_SIZE * 0.2;
        if let Some(page) = self.pages.last_mut() {
            page.push(PlacedLine {
                style,
                baseline,
                text,
                word_spacing,
            });
        }
        self.cursor -= LINE_HEIGHT;
    }

    /// Place ragged lines; a blank entry still takes up one line.
    fn place_lines(&mut self, style: FontStyle, lines: Vec<WrappedLine>) {
        if lines.is_empty() {
            self.place(style, Vec::new(), 0.0);
        }
        for line in lines {
            self.place(style, line.encoded(), 0.0);
        }
    }

    fn place_text(&mut self, style: FontStyle, text: &str) {
        self.place_lines(style, wrap_ragged(text, style));
    }
}

/// Wrap a single-line field (letterhead, recipient, closing) without
/// justification.
fn wrap_ragged(text: &str, style: FontStyle) -> Vec<WrappedLine> {
    wrap_paragraph(text, style, TEXT_WIDTH)
        .into_iter()
        .map(|line| WrappedLine {
            justify: false,
            ..line
        })
        .collect()
}

fn lay_out(layout: &LetterLayout) -> Vec<Vec<PlacedLine>> {
    let mut pager = Pager::new();

    for (i, line) in layout.sender.iter().enumerate() {
        let style = if i == 0 {
            FontStyle::Bold
        } else {
            FontStyle::Regular
        };
        pager.place_text(style, line);
    }
    pager.gap(SENDER_GAP);

    pager.place_text(FontStyle::Regular, &layout.date);
    pager.gap(DATE_GAP);

    for line in &layout.recipient {
        pager.place_text(FontStyle::Regular, line);
    }
    pager.gap(RECIPIENT_GAP);

    for paragraph in &layout.paragraphs {
        if paragraph.is_empty() {
            pager.gap(PARAGRAPH_GAP);
            continue;
        }
        for line in wrap_paragraph(paragraph, FontStyle::Regular, TEXT_WIDTH) {
            let spacing = line.word_spacing(FontStyle::Regular, TEXT_WIDTH);
            pager.place(FontStyle::Regular, line.encoded(), spacing);
        }
    }
    pager.gap(BODY_GAP);

    let closing = wrap_ragged(&layout.closing, FontStyle::Regular);
    let signature = wrap_ragged(&layout.signature, FontStyle::Bold);
    let closing_lines = closing.len().max(1) + signature.len().max(1);
    pager.keep_together(closing_lines as f32 * LINE_HEIGHT + SIGNATURE_GAP);
    pager.place_lines(FontStyle::Regular, closing);
    pager.gap(SIGNATURE_GAP);
    pager.place_lines(FontStyle::Bold, signature);

    pager.pages
}

fn page_content(lines: &[PlacedLine]) -> Content {
    let mut operations = Vec::with_capacity(lines.len() * 6);
    for line in lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![line.style.resource_name().into(), FONT_SIZE.into()],
        ));
        operations.push(Operation::new("Td", vec![MARGIN.into(), line.baseline.into()]));
        operations.push(Operation::new("Tw", vec![line.word_spacing.into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(line.text.clone())],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}

fn font_dictionary(style: FontStyle) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => style.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Render the letter to PDF bytes.
pub fn render_pdf(layout: &LetterLayout) -> Result<Vec<u8>, AppError> {
    let pages = lay_out(layout);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(font_dictionary(FontStyle::Regular));
    let bold_id = doc.add_object(font_dictionary(FontStyle::Bold));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FontStyle::Regular.resource_name() => regular_id,
            FontStyle::Bold.resource_name() => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for lines in &pages {
        let content = page_content(lines)
            .encode()
            .map_err(|e| AppError::Export(format!("content stream: {}", e)))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| AppError::Export(format!("write failed: {}", e)))?;

    info!("Rendered {} page PDF ({} bytes)", page_count, bytes.len());
    Ok(bytes)
}
