// ============================================================
// CSV ROW ENCODER
// ============================================================
// Stage one CSV record in a reusable buffer and re-encode it
// into the target output encoding

use encoding_rs::{CoderResult, Encoder, Encoding, UTF_8};

use crate::domain::error::{AppError, Result};

/// Encodes single CSV records into a target output encoding.
///
/// Holds its own incremental encoder state; construct one per export and
/// never share it across concurrent exports.
pub struct RowEncoder {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Target output encoding (default: UTF-8)
    encoding: &'static Encoding,

    encoder: Encoder,
    buf: Vec<u8>,
}

impl Default for RowEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl RowEncoder {
    /// Create a new encoder targeting UTF-8 with a comma delimiter
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            encoding: UTF_8,
            encoder: UTF_8.new_encoder(),
            buf: Vec::new(),
        }
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the target output encoding
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self.encoder = encoding.new_encoder();
        self
    }

    /// Resolve a target encoding from a WHATWG label, e.g. "utf-8" or
    /// "windows-1252"
    pub fn for_label(label: &str) -> Result<Self> {
        let encoding = Encoding::for_label(label.as_bytes())
            .ok_or_else(|| AppError::ConfigError(format!("unknown encoding label: {}", label)))?;
        Ok(Self::new().with_encoding(encoding))
    }

    pub fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Encode one record. The row is staged as UTF-8 CSV text in the
    /// internal buffer, re-encoded into the target encoding, and the
    /// buffer is cleared before returning so it never grows unboundedly.
    pub fn encode_row<I, T>(&mut self, fields: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.buf.clear();
        {
            let mut writer = csv::WriterBuilder::new()
                .delimiter(self.delimiter)
                .from_writer(&mut self.buf);
            writer.write_record(fields)?;
            writer.flush()?;
        }

        let row = std::str::from_utf8(&self.buf)
            .map_err(|e| AppError::EncodingError(format!("staged row is not valid UTF-8: {}", e)))?;
        let encoded = reencode(&mut self.encoder, row);
        self.buf.clear();

        Ok(encoded)
    }
}

/// Push one row of UTF-8 text through the incremental encoder. Unmappable
/// characters are replaced with numeric character references, so this
/// never fails; output-full results grow the destination and continue.
fn reencode(encoder: &mut Encoder, row: &str) -> Vec<u8> {
    let worst = encoder
        .max_buffer_length_from_utf8_if_no_unmappables(row.len())
        .unwrap_or(row.len() * 4 + 16);
    let mut out = vec![0u8; worst.max(16)];

    let mut read_total = 0;
    let mut written_total = 0;
    loop {
        let (result, read, written, _) =
            encoder.encode_from_utf8(&row[read_total..], &mut out[written_total..], false);
        read_total += read;
        written_total += written;
        match result {
            CoderResult::InputEmpty => break,
            CoderResult::OutputFull => {
                let grow = out.len().max(16);
                out.resize(out.len() + grow, 0);
            }
        }
    }

    out.truncate(written_total);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::WINDOWS_1252;

    #[test]
    fn test_encode_simple_row() {
        let mut encoder = RowEncoder::new();
        let row = encoder.encode_row(["name", "age", "city"]).unwrap();
        assert_eq!(row, b"name,age,city\n");
    }

    #[test]
    fn test_encode_quotes_embedded_delimiters() {
        let mut encoder = RowEncoder::new();
        let row = encoder.encode_row(["a,b", "c\"d"]).unwrap();
        assert_eq!(row, b"\"a,b\",\"c\"\"d\"\n");
    }

    #[test]
    fn test_encode_custom_delimiter() {
        let mut encoder = RowEncoder::new().with_delimiter(b';');
        let row = encoder.encode_row(["a", "b"]).unwrap();
        assert_eq!(row, b"a;b\n");
    }

    #[test]
    fn test_encode_into_windows_1252() {
        let mut encoder = RowEncoder::new().with_encoding(WINDOWS_1252);
        let row = encoder.encode_row(["caf\u{e9}"]).unwrap();
        assert_eq!(row, b"caf\xe9\n");
    }

    #[test]
    fn test_buffer_cleared_between_rows() {
        let mut encoder = RowEncoder::new();
        encoder.encode_row(["first", "row"]).unwrap();
        let row = encoder.encode_row(["second"]).unwrap();
        assert_eq!(row, b"second\n");
    }

    #[test]
    fn test_unknown_label_is_config_error() {
        assert!(matches!(
            RowEncoder::for_label("no-such-encoding"),
            Err(AppError::ConfigError(_))
        ));
    }
}
