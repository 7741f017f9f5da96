use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use opentelemetry::KeyValue;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::pdf::{A4, DocTemplate, DocumentInfo};
use crate::telemetry::metrics::{
    REPORT_FAILURES, REPORT_GENERATION_DURATION, REPORT_PAGES_RENDERED, REPORT_PAGES_REQUESTED,
    REPORTS_GENERATED,
};

use super::request::ValidatedReport;
use super::story::build_story;

const PRODUCER: &str = concat!("seminar-report-api ", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub file_path: PathBuf,
    pub page_count: usize,
    pub content_blocks: usize,
    pub bytes_written: usize,
}

/// Writes paginated PDF reports into a single output directory.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    output_dir: PathBuf,
    template: DocTemplate,
}

impl ReportGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            template: DocTemplate::new(A4),
        }
    }

    /// Lays out and writes the report on the blocking pool.
    #[tracing::instrument(
        name = "report generate",
        skip(self, report),
        fields(
            report.pages = report.pages,
            report.filename = %report.filename,
            report.page_count,
            report.bytes,
        )
    )]
    pub async fn generate(&self, report: ValidatedReport) -> AppResult<GeneratedReport> {
        let generator = self.clone();
        let span = tracing::Span::current();
        let pages_requested = report.pages;

        let start = Instant::now();
        let result = tokio::task::spawn_blocking(move || {
            let _entered = span.enter();
            generator.generate_blocking(&report)
        })
        .await
        .map_err(|e| AppError::Internal(format!("report generation task failed: {e}")))
        .and_then(|result| result);

        REPORT_PAGES_REQUESTED.record(f64::from(pages_requested), &[]);
        match &result {
            Ok(generated) => {
                REPORT_GENERATION_DURATION.record(start.elapsed().as_secs_f64(), &[]);
                REPORT_PAGES_RENDERED.record(generated.page_count as f64, &[]);
                REPORTS_GENERATED.add(1, &[]);

                let span = tracing::Span::current();
                span.record("report.page_count", generated.page_count);
                span.record("report.bytes", generated.bytes_written);
            }
            Err(e) => {
                REPORT_FAILURES.add(1, &[KeyValue::new("error.kind", error_kind(e))]);
            }
        }

        result
    }

    pub fn generate_blocking(&self, report: &ValidatedReport) -> AppResult<GeneratedReport> {
        let story = build_story(report);
        let content_blocks = story.len() / 2;

        let rendered = self.template.build(
            &story,
            &DocumentInfo {
                title: report.title.clone(),
                producer: PRODUCER.to_string(),
                created_at: Utc::now(),
            },
        )?;

        fs::create_dir_all(&self.output_dir)?;
        let file_path = std::path::absolute(self.output_dir.join(&report.filename))?;
        write_atomically(&file_path, &rendered.bytes)?;

        tracing::info!(
            file_path = %file_path.display(),
            page_count = rendered.page_count,
            content_blocks,
            bytes = rendered.bytes.len(),
            "Report written"
        );

        Ok(GeneratedReport {
            file_path,
            page_count: rendered.page_count,
            content_blocks,
            bytes_written: rendered.bytes.len(),
        })
    }
}

fn error_kind(error: &AppError) -> &'static str {
    match error {
        AppError::Validation(_) => "validation",
        AppError::Pdf(_) => "pdf",
        AppError::Io(_) => "io",
        AppError::Internal(_) => "internal",
    }
}

/// Writes through a temporary sibling and renames it into place, so readers
/// never observe a partially written report.
fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let tmp = dir.join(format!(".{}.part", Uuid::new_v4()));

    let result = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}
