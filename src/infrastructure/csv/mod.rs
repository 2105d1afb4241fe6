// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Row encoding into the target output encoding

mod row_encoder;

pub use row_encoder::RowEncoder;
