use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const MIN_PAGES: i64 = 1;
pub const MAX_PAGES: i64 = 200;

pub const DEFAULT_TITLE: &str = "Seminar Report: The Web (World Wide Web)";
pub const DEFAULT_PAGES: i64 = 80;
pub const DEFAULT_SECTION_TITLE: &str = "Chapter: The Evolution of the Web";
pub const DEFAULT_FILENAME: &str = "Web_Seminar_Report_80Pages.pdf";
pub const DEFAULT_SECTION_BODY: &str = "The Web has evolved from a collection of static documents into a dynamic, interactive, and intelligent ecosystem.\n\
It started with Web 1.0, primarily focused on static pages, progressed into Web 2.0 characterized by user-generated content \
and social platforms, and is currently transitioning into Web 3.0, which emphasizes decentralization, security, trustless systems, \
semantic understanding, and immersive digital experiences.\n\n\
The Web continues to be the backbone of the digital era, enabling communication, business, entertainment, and global connectivity.\n\
Detailed studies show that the future Web will integrate AI, blockchain, edge computing, and mixed reality technologies.";

/// Body of `POST /generate-report`. Every field is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_pages")]
    pub pages: i64,
    #[serde(default = "default_section_title")]
    pub section_title: String,
    #[serde(default = "default_section_body")]
    pub section_body: String,
    #[serde(default = "default_filename")]
    pub filename: Option<String>,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_pages() -> i64 {
    DEFAULT_PAGES
}

fn default_section_title() -> String {
    DEFAULT_SECTION_TITLE.to_string()
}

fn default_section_body() -> String {
    DEFAULT_SECTION_BODY.to_string()
}

fn default_filename() -> Option<String> {
    Some(DEFAULT_FILENAME.to_string())
}

impl Default for ReportRequest {
    fn default() -> Self {
        Self {
            title: default_title(),
            pages: default_pages(),
            section_title: default_section_title(),
            section_body: default_section_body(),
            filename: default_filename(),
        }
    }
}

/// A request that passed boundary validation, with its filename resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedReport {
    pub title: String,
    pub pages: u32,
    pub section_title: String,
    pub section_body: String,
    pub filename: String,
}

impl ReportRequest {
    pub fn validate(self) -> AppResult<ValidatedReport> {
        if !(MIN_PAGES..=MAX_PAGES).contains(&self.pages) {
            return Err(AppError::Validation(format!(
                "pages must be between {MIN_PAGES} and {MAX_PAGES}, got {}",
                self.pages
            )));
        }

        Ok(ValidatedReport {
            filename: resolve_filename(self.filename.as_deref()),
            title: self.title,
            pages: self.pages as u32,
            section_title: self.section_title,
            section_body: self.section_body,
        })
    }
}

/// Reduces a requested name to a bare file name ending in `.pdf`.
///
/// Directory components are dropped so the file always lands in the output
/// directory. Missing, blank, `.` and `..` names fall back to [`DEFAULT_FILENAME`].
pub fn resolve_filename(requested: Option<&str>) -> String {
    let base = requested
        .and_then(|name| name.trim().rsplit(['/', '\\']).next())
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .unwrap_or(DEFAULT_FILENAME);

    if base.to_ascii_lowercase().ends_with(".pdf") {
        base.to_string()
    } else {
        format!("{base}.pdf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_uses_defaults() {
        let request: ReportRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.title, DEFAULT_TITLE);
        assert_eq!(request.pages, 80);
        assert_eq!(request.section_title, DEFAULT_SECTION_TITLE);
        assert_eq!(request.section_body, DEFAULT_SECTION_BODY);
        assert_eq!(request.filename.as_deref(), Some(DEFAULT_FILENAME));
    }

    #[test]
    fn test_default_body_has_line_breaks() {
        assert_eq!(DEFAULT_SECTION_BODY.matches('\n').count(), 4);
        assert!(DEFAULT_SECTION_BODY.contains("ecosystem.\nIt started"));
        assert!(DEFAULT_SECTION_BODY.contains("experiences.\n\nThe Web"));
    }

    #[test]
    fn test_null_filename_resolves_to_default() {
        let request: ReportRequest = serde_json::from_str(r#"{"filename": null}"#).unwrap();
        assert_eq!(request.filename, None);
        assert_eq!(request.validate().unwrap().filename, DEFAULT_FILENAME);
    }

    #[test]
    fn test_pages_bounds() {
        for pages in [1, 2, 80, 200] {
            let request = ReportRequest {
                pages,
                ..Default::default()
            };
            assert_eq!(request.validate().unwrap().pages, pages as u32);
        }

        for pages in [0, 201, -5] {
            let request = ReportRequest {
                pages,
                ..Default::default()
            };
            let err = request.validate().unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
            assert!(err.to_string().contains("between 1 and 200"));
        }
    }

    #[test]
    fn test_resolve_filename_appends_extension() {
        assert_eq!(resolve_filename(Some("report")), "report.pdf");
    }

    #[test]
    fn test_resolve_filename_keeps_existing_extension() {
        assert_eq!(resolve_filename(Some("report.pdf")), "report.pdf");
        assert_eq!(resolve_filename(Some("REPORT.PDF")), "REPORT.PDF");
    }

    #[test]
    fn test_resolve_filename_defaults() {
        assert_eq!(resolve_filename(None), DEFAULT_FILENAME);
        assert_eq!(resolve_filename(Some("")), DEFAULT_FILENAME);
        assert_eq!(resolve_filename(Some("   ")), DEFAULT_FILENAME);
    }

    #[test]
    fn test_resolve_filename_strips_directories() {
        assert_eq!(resolve_filename(Some("../../etc/passwd")), "passwd.pdf");
        assert_eq!(resolve_filename(Some("/tmp/out.pdf")), "out.pdf");
        assert_eq!(resolve_filename(Some("dir\\win.pdf")), "win.pdf");
        assert_eq!(resolve_filename(Some("reports/")), DEFAULT_FILENAME);
        assert_eq!(resolve_filename(Some("..")), DEFAULT_FILENAME);
    }
}
