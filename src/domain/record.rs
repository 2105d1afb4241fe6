// ============================================================
// RECORD MODEL
// ============================================================
// Abstractions over the record sequences the surrounding
// application exports and paginates. No I/O, no async.

/// A value read out of a record for one tag.
///
/// Text is already decoded; bytes go through a two-tier conversion when
/// rendered into a CSV cell: try to normalize already-decoded text, on
/// failure coerce via direct string conversion.
#[derive(Debug, Clone)]
pub enum RawValue {
    Text(String),
    Bytes(Vec<u8>),
}

impl RawValue {
    /// Convert to cell text. Bytes are validated as UTF-8 first and fall
    /// back to a lossy conversion when validation fails.
    pub fn into_text(self) -> String {
        match self {
            RawValue::Text(s) => s,
            RawValue::Bytes(b) => match String::from_utf8(b) {
                Ok(s) => s,
                Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
            },
        }
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

/// A tag lookup result: either a direct value or a deferred producer
/// invoked at encode time. Explicit polymorphism instead of checking at
/// runtime whether an attribute happens to be callable.
pub enum TagValue {
    Value(RawValue),
    Producer(Box<dyn Fn() -> RawValue>),
}

impl TagValue {
    pub fn text(s: impl Into<String>) -> Self {
        TagValue::Value(RawValue::Text(s.into()))
    }

    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        TagValue::Value(RawValue::Bytes(b.into()))
    }

    pub fn producer<F>(f: F) -> Self
    where
        F: Fn() -> RawValue + 'static,
    {
        TagValue::Producer(Box::new(f))
    }

    /// Collapse either arm to a concrete value, invoking the producer
    /// if there is one.
    pub fn resolve(self) -> RawValue {
        match self {
            TagValue::Value(v) => v,
            TagValue::Producer(f) => f(),
        }
    }
}

/// A row object exposing named attributes.
pub trait Record {
    /// Look up the value for a tag. Unknown tags yield empty text.
    fn value(&self, tag: &str) -> TagValue;

    /// Type name of the record, used to derive a default export filename.
    fn type_name(&self) -> &str {
        "record"
    }
}

/// An ordered, countable, sliceable record sequence.
///
/// Backed by an in-memory collection here; applications with lazy stores
/// implement this over their own count/limit/offset queries.
pub trait RecordSet<R> {
    fn count(&self) -> usize;

    /// Return the records in `[start, end)`. Out-of-range bounds clamp
    /// to the sequence, never panic.
    fn slice(&self, start: usize, end: usize) -> Vec<R>;
}

impl<R: Clone> RecordSet<R> for [R] {
    fn count(&self) -> usize {
        self.len()
    }

    fn slice(&self, start: usize, end: usize) -> Vec<R> {
        let start = start.min(self.len());
        let end = end.min(self.len()).max(start);
        self[start..end].to_vec()
    }
}

impl<R: Clone> RecordSet<R> for Vec<R> {
    fn count(&self) -> usize {
        self.len()
    }

    fn slice(&self, start: usize, end: usize) -> Vec<R> {
        self.as_slice().slice(start, end)
    }
}
