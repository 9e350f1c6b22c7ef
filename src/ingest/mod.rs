pub mod batch;
pub mod csv;
pub mod row;

pub use batch::{import_rows, CommitPolicy, ImportSummary, RowRejection};
pub use row::{parse_row, ParsedRow, RawRow};
