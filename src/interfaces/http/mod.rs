// ============================================================
// HTTP INTERFACE
// ============================================================
// actix-web response assembly for CSV downloads

use actix_web::http::header;
use actix_web::web::Bytes;
use actix_web::HttpResponse;
use futures_util::stream;
use tracing::debug;

use crate::application::use_cases::csv_export::CsvExporter;
use crate::domain::error::Result;
use crate::domain::Record;

pub use crate::application::use_cases::pagination::RequestParams;

/// Wrap an exporter's chunk sequence in a streamed `text/csv` attachment
/// response. The attachment filename is stamped here, when the download
/// starts.
pub fn csv_attachment_response<R>(exporter: CsvExporter<R>) -> Result<HttpResponse>
where
    R: Record + 'static,
{
    let filename = exporter.filename();
    let chunks = exporter.into_chunks()?;
    debug!(filename = %filename, "streaming CSV attachment");

    let body = stream::iter(chunks.map(|chunk| chunk.map(Bytes::from)));

    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", filename),
        ))
        .streaming(body))
}
