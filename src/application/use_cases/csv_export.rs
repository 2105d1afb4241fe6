// ============================================================
// CSV EXPORT USE CASE
// ============================================================
// Turn a record sequence into a lazily produced stream of CSV
// chunks ready to download

use chrono::Local;
use tracing::debug;

use crate::domain::error::Result;
use crate::domain::Record;
use crate::infrastructure::config::ExporterSettings;
use crate::infrastructure::csv::RowEncoder;

/// Rows accumulated per emitted chunk, header row included
pub const EXPORT_BATCH_ROWS: usize = 100;

/// CSV export generator.
///
/// Built from a record sequence and an ordered tag list; the tags define
/// both the column order and the header row. Chunks are produced lazily
/// by [`CsvExporter::into_chunks`].
pub struct CsvExporter<R: Record> {
    records: Vec<R>,
    tags: Vec<String>,
    basename: Option<String>,
    settings: ExporterSettings,
}

impl<R: Record> CsvExporter<R> {
    /// Create an exporter with default settings
    pub fn new<T: Into<String>>(records: Vec<R>, tags: impl IntoIterator<Item = T>) -> Self {
        Self {
            records,
            tags: tags.into_iter().map(Into::into).collect(),
            basename: None,
            settings: ExporterSettings::default(),
        }
    }

    /// Override the exporter settings (encoding, delimiter, fallback name)
    pub fn with_settings(mut self, settings: ExporterSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set an explicit base filename instead of deriving one from the
    /// first record's type name
    pub fn with_filename(mut self, basename: impl Into<String>) -> Self {
        self.basename = Some(basename.into());
        self
    }

    fn basename(&self) -> &str {
        if let Some(name) = &self.basename {
            return name;
        }
        self.records
            .first()
            .map(|r| r.type_name())
            .unwrap_or(&self.settings.fallback_basename)
    }

    /// Download filename: base name, a `_YYYYMMDDHHMMSS` timestamp, and
    /// the `.csv` suffix
    pub fn filename(&self) -> String {
        format!(
            "{}{}.csv",
            self.basename(),
            Local::now().format("_%Y%m%d%H%M%S")
        )
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Consume the exporter and return the lazy chunk iterator. A fresh
    /// row encoder is constructed here, so concurrent exports never share
    /// encoder state.
    pub fn into_chunks(self) -> Result<Chunks<R>> {
        let encoder = self.settings.row_encoder()?;
        debug!(
            records = self.records.len(),
            tags = self.tags.len(),
            encoding = encoder.encoding_name(),
            "starting CSV export"
        );
        Ok(Chunks {
            records: self.records.into_iter(),
            tags: self.tags,
            encoder,
            pending_header: true,
            failed: false,
        })
    }
}

/// Lazy, finite, non-restartable chunk sequence.
///
/// Each chunk holds up to [`EXPORT_BATCH_ROWS`] encoded rows, the header
/// counted in the first chunk; the final partial batch is emitted if it
/// contains any rows. An encode failure ends the stream after yielding
/// the error.
pub struct Chunks<R: Record> {
    records: std::vec::IntoIter<R>,
    tags: Vec<String>,
    encoder: RowEncoder,
    pending_header: bool,
    failed: bool,
}

impl<R: Record> Iterator for Chunks<R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let mut chunk = Vec::new();
        let mut rows = 0usize;

        if self.pending_header {
            match self.encoder.encode_row(&self.tags) {
                Ok(row) => {
                    chunk.extend_from_slice(&row);
                    rows += 1;
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
            self.pending_header = false;
        }

        while rows < EXPORT_BATCH_ROWS {
            let Some(record) = self.records.next() else {
                break;
            };
            let fields: Vec<String> = self
                .tags
                .iter()
                .map(|tag| record.value(tag).resolve().into_text())
                .collect();
            match self.encoder.encode_row(&fields) {
                Ok(row) => {
                    chunk.extend_from_slice(&row);
                    rows += 1;
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }

        if rows == 0 {
            None
        } else {
            Some(Ok(chunk))
        }
    }
}
