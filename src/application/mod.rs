pub mod use_cases;

pub use use_cases::csv_export::{Chunks, CsvExporter, EXPORT_BATCH_ROWS};
pub use use_cases::pagination::{paginate, Page, RequestParams, PER_PAGE};
