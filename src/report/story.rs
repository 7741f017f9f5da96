use crate::pdf::markup::{escape, escape_multiline};
use crate::pdf::{Flowable, Paragraph, ParagraphStyle};

use super::request::ValidatedReport;

pub const INTRODUCTION: &str = "This report provides an extensive analysis of the Web, its evolution, \
architecture, technologies, applications, and future trends.";

/// Number of body sections. The title page takes one of the requested pages,
/// but the body is always emitted at least once.
pub fn repeat_count(pages: u32) -> u32 {
    pages.saturating_sub(1).max(1)
}

/// Title block plus `repeat_count` body blocks, each followed by a page break.
pub fn build_story(report: &ValidatedReport) -> Vec<Flowable> {
    let repeats = repeat_count(report.pages) as usize;
    let mut story = Vec::with_capacity(2 * (repeats + 1));

    let title_markup = format!(
        "<b>{}</b><br/><br/>{INTRODUCTION}",
        escape(&report.title)
    );
    story.push(Flowable::Paragraph(Paragraph::new(
        title_markup,
        ParagraphStyle::title(),
    )));
    story.push(Flowable::PageBreak);

    let section = Paragraph::new(
        format!(
            "<b>{}</b><br/><br/>{}",
            escape(&report.section_title),
            escape_multiline(&report.section_body)
        ),
        ParagraphStyle::body(),
    );
    for _ in 0..repeats {
        story.push(Flowable::Paragraph(section.clone()));
        story.push(Flowable::PageBreak);
    }

    story
}
