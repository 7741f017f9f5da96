pub mod document;
pub mod fonts;
pub mod layout;
pub mod markup;
pub mod style;

use thiserror::Error;

pub use document::{DocTemplate, DocumentInfo, RenderedDocument};
pub use style::{A4, Alignment, PageSize, ParagraphStyle};

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("invalid markup: {0}")]
    Markup(#[from] markup::MarkupError),

    #[error("failed to encode document: {0}")]
    Encode(#[from] lopdf::Error),

    #[error("failed to serialize document: {0}")]
    Io(#[from] std::io::Error),
}

/// A unit of content submitted to the document template.
#[derive(Debug, Clone, PartialEq)]
pub enum Flowable {
    Paragraph(Paragraph),
    PageBreak,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub markup: String,
    pub style: ParagraphStyle,
}

impl Paragraph {
    pub fn new(markup: impl Into<String>, style: ParagraphStyle) -> Self {
        Self {
            markup: markup.into(),
            style,
        }
    }
}
