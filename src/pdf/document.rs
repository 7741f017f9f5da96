use chrono::{DateTime, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};

use super::fonts::{Font, encode_win_ansi};
use super::layout::{self, Margins, PageLayout};
use super::style::PageSize;
use super::{Flowable, PdfError};

#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub producer: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Lays a story out on fixed-size pages and serialises it as a PDF.
#[derive(Debug, Clone, Copy)]
pub struct DocTemplate {
    pub page_size: PageSize,
    pub margins: Margins,
}

impl DocTemplate {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_size,
            margins: Margins::default(),
        }
    }

    pub fn build(
        &self,
        story: &[Flowable],
        info: &DocumentInfo,
    ) -> Result<RenderedDocument, PdfError> {
        let pages = layout::layout(story, self.page_size, self.margins)?;

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for font in Font::ALL {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_name(), font_id);
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts,
        });

        let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
        for page in &pages {
            let content = Content {
                operations: page_operations(page),
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len();
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.page_size.width),
                Object::Real(self.page_size.height),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(encode_win_ansi(&info.title)),
            "Producer" => Object::string_literal(encode_win_ansi(&info.producer)),
            "CreationDate" => Object::string_literal(
                info.created_at.format("D:%Y%m%d%H%M%SZ").to_string(),
            ),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;

        Ok(RenderedDocument { bytes, page_count })
    }
}

fn page_operations(page: &PageLayout) -> Vec<Operation> {
    let mut operations = vec![Operation::new("BT", vec![])];
    let mut active: Option<(Font, f32)> = None;

    for run in &page.runs {
        if active != Some((run.font, run.size)) {
            operations.push(Operation::new(
                "Tf",
                vec![run.font.resource_name().into(), Object::Real(run.size)],
            ));
            active = Some((run.font, run.size));
        }
        operations.push(Operation::new(
            "Tm",
            vec![
                Object::Integer(1),
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(1),
                Object::Real(run.x),
                Object::Real(run.y),
            ],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_win_ansi(&run.text))],
        ));
    }

    operations.push(Operation::new("ET", vec![]));
    operations
}
