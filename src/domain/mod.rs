// ============================================================
// DOMAIN LAYER
// ============================================================
// Core types and value objects for exports, forms, and pagination
// No I/O, no async

pub mod error;
mod form;
mod record;

pub use error::{AppError, Result};
pub use form::{FieldMap, FormDef, FormDefBuilder, FormField};
pub use record::{RawValue, Record, RecordSet, TagValue};
