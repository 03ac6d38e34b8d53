//! User-supplied (port, protocol) -> tag lookup table.
//!
//! The table is loaded once from a header + 3-column CSV source and is
//! read-only during aggregation. Invalid rows are skipped; a missing source
//! yields an empty table, so every record falls back to `Untagged`.

pub mod error;
pub mod loader;
pub mod table;

pub use error::{LookupError, RowRejection};
pub use loader::{LookupLoad, load_lookup_file, load_lookup_reader};
pub use table::{LookupKey, LookupTable};
