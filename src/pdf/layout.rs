//! Greedy line breaking and pagination of a story into positioned text runs.

use super::fonts::Font;
use super::markup::{self, Token};
use super::style::{Alignment, PageSize, ParagraphStyle};
use super::{Flowable, PdfError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 72.0,
            right: 72.0,
            bottom: 72.0,
            left: 72.0,
        }
    }
}

/// A run of text at an absolute baseline position, in points from the bottom-left.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRun {
    pub x: f32,
    pub y: f32,
    pub font: Font,
    pub size: f32,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub runs: Vec<PlacedRun>,
    pub lines: usize,
}

impl PageLayout {
    pub fn is_empty(&self) -> bool {
        self.lines == 0
    }
}

#[derive(Debug, Clone)]
struct Run {
    text: String,
    font: Font,
}

#[derive(Debug, Clone)]
struct Word {
    runs: Vec<Run>,
    width: f32,
}

#[derive(Debug, Clone)]
struct Line {
    words: Vec<Word>,
    words_width: f32,
    ends_segment: bool,
}

impl Line {
    fn natural_width(&self, space: f32) -> f32 {
        let gaps = self.words.len().saturating_sub(1) as f32;
        self.words_width + gaps * space
    }
}

pub fn layout(
    story: &[Flowable],
    page: PageSize,
    margins: Margins,
) -> Result<Vec<PageLayout>, PdfError> {
    let frame_width = page.width - margins.left - margins.right;
    let top = page.height - margins.top;

    let mut pages = Vec::new();
    let mut current = PageLayout::default();
    let mut cursor = top;

    for flowable in story {
        match flowable {
            Flowable::PageBreak => {
                if !current.is_empty() {
                    pages.push(std::mem::take(&mut current));
                    cursor = top;
                }
            }
            Flowable::Paragraph(paragraph) => {
                let style = &paragraph.style;
                let tokens = markup::parse(&paragraph.markup)?;

                for line in break_lines(&tokens, style, frame_width) {
                    if cursor - style.leading < margins.bottom && !current.is_empty() {
                        pages.push(std::mem::take(&mut current));
                        cursor = top;
                    }
                    let baseline = cursor - style.font_size;
                    place_line(&line, style, margins.left, frame_width, baseline, &mut current);
                    current.lines += 1;
                    cursor -= style.leading;
                }
                cursor -= style.space_after;
            }
        }
    }

    if !current.is_empty() || pages.is_empty() {
        pages.push(current);
    }

    Ok(pages)
}

fn place_line(
    line: &Line,
    style: &ParagraphStyle,
    left: f32,
    frame_width: f32,
    baseline: f32,
    page: &mut PageLayout,
) {
    let space = style.font.space_width(style.font_size);
    let slack = (frame_width - line.natural_width(space)).max(0.0);

    let (mut x, gap) = match style.alignment {
        Alignment::Center => (left + slack / 2.0, space),
        Alignment::Justify if !line.ends_segment && line.words.len() > 1 => {
            let gaps = (line.words.len() - 1) as f32;
            (left, (frame_width - line.words_width).max(0.0) / gaps)
        }
        Alignment::Justify => (left, space),
    };

    for word in &line.words {
        let mut run_x = x;
        for run in &word.runs {
            page.runs.push(PlacedRun {
                x: run_x,
                y: baseline,
                font: run.font,
                size: style.font_size,
                text: run.text.clone(),
            });
            run_x += run.font.text_width(&run.text, style.font_size);
        }
        x += word.width + gap;
    }
}

fn break_lines(tokens: &[Token], style: &ParagraphStyle, max_width: f32) -> Vec<Line> {
    let space = style.font.space_width(style.font_size);
    let mut lines = Vec::new();

    for words in segments(tokens, style) {
        if words.is_empty() {
            lines.push(Line {
                words: Vec::new(),
                words_width: 0.0,
                ends_segment: true,
            });
            continue;
        }

        let mut line_words: Vec<Word> = Vec::new();
        let mut words_width = 0.0;
        let words = words
            .into_iter()
            .flat_map(|word| split_long_word(word, max_width, style.font_size));
        for word in words {
            let needed = words_width + line_words.len() as f32 * space + word.width;
            if !line_words.is_empty() && needed > max_width {
                lines.push(Line {
                    words: std::mem::take(&mut line_words),
                    words_width,
                    ends_segment: false,
                });
                words_width = 0.0;
            }
            words_width += word.width;
            line_words.push(word);
        }
        lines.push(Line {
            words: line_words,
            words_width,
            ends_segment: true,
        });
    }

    lines
}

/// Breaks a word wider than the frame into character chunks that each fit.
fn split_long_word(word: Word, max_width: f32, size: f32) -> Vec<Word> {
    if word.width <= max_width {
        return vec![word];
    }

    let mut pieces = Vec::new();
    let mut runs: Vec<Run> = Vec::new();
    let mut width = 0.0;
    for run in word.runs {
        for c in run.text.chars() {
            let mut buf = [0u8; 4];
            let char_width = run.font.text_width(c.encode_utf8(&mut buf), size);
            if !runs.is_empty() && width + char_width > max_width {
                pieces.push(Word {
                    runs: std::mem::take(&mut runs),
                    width,
                });
                width = 0.0;
            }
            match runs.last_mut() {
                Some(last) if last.font == run.font => last.text.push(c),
                _ => runs.push(Run {
                    text: c.to_string(),
                    font: run.font,
                }),
            }
            width += char_width;
        }
    }
    if !runs.is_empty() {
        pieces.push(Word { runs, width });
    }
    pieces
}

/// Splits tokens into hard-break segments of whitespace-separated words.
fn segments(tokens: &[Token], style: &ParagraphStyle) -> Vec<Vec<Word>> {
    let mut segments: Vec<Vec<Word>> = vec![Vec::new()];
    let mut word: Vec<Run> = Vec::new();

    for token in tokens {
        match token {
            Token::LineBreak => {
                finish_word(&mut word, &mut segments, style.font_size);
                segments.push(Vec::new());
            }
            Token::Text { text, bold } => {
                let font = style.font_for(*bold);
                for c in text.chars() {
                    if c.is_whitespace() && c != '\u{A0}' {
                        finish_word(&mut word, &mut segments, style.font_size);
                        continue;
                    }
                    match word.last_mut() {
                        Some(run) if run.font == font => run.text.push(c),
                        _ => word.push(Run {
                            text: c.to_string(),
                            font,
                        }),
                    }
                }
            }
        }
    }
    finish_word(&mut word, &mut segments, style.font_size);

    // markup ending in a break leaves an empty trailing segment
    if segments.len() > 1 && segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }

    segments
}

fn finish_word(word: &mut Vec<Run>, segments: &mut [Vec<Word>], size: f32) {
    if word.is_empty() {
        return;
    }
    let runs = std::mem::take(word);
    let width = runs.iter().map(|r| r.font.text_width(&r.text, size)).sum();
    if let Some(segment) = segments.last_mut() {
        segment.push(Word { runs, width });
    }
}
