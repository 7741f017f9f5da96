pub mod generator;
pub mod request;
pub mod story;

pub use generator::{GeneratedReport, ReportGenerator};
pub use request::{ReportRequest, ValidatedReport, resolve_filename};
