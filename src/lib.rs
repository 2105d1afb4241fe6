//! Helper utilities for actix-web request handlers: a streaming CSV
//! export generator, construction-time form-field exclusion, and a
//! fixed-size queryset pagination helper.
//!
//! The three utilities are independent and share no state. Each is
//! invoked per request: build a [`CsvExporter`] over your records and
//! hand it to [`csv_attachment_response`], filter a [`FieldMap`] with
//! an exclusion set, or call [`paginate`] with the request's query
//! parameters and a [`RecordSet`].

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

// Re-export the most commonly used types at the crate root.
pub use application::use_cases::csv_export::{Chunks, CsvExporter, EXPORT_BATCH_ROWS};
pub use application::use_cases::pagination::{paginate, Page, RequestParams, PER_PAGE};
pub use domain::{
    AppError, FieldMap, FormDef, FormField, RawValue, Record, RecordSet, Result, TagValue,
};
pub use infrastructure::config::ExporterSettings;
pub use infrastructure::csv::RowEncoder;
pub use interfaces::http::csv_attachment_response;
