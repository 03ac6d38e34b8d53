use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use tracing::{debug, info, trace};

use crate::UNTAGGED;

use super::error::LookupError;
use super::table::LookupTable;

/// Outcome of a lookup load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupLoad {
    /// No source was given, or it does not exist.
    Missing,
    /// Source was read to the end.
    Loaded { rows: usize, skipped: usize },
}

/// Load a lookup table from a file into `table`.
///
/// A `None` path or a path that does not exist is not an error: the table is
/// left untouched and `LookupLoad::Missing` is returned.
///
/// # Errors
/// Returns `LookupError` when the file cannot be opened or read. Rows
/// accepted before the failure stay in `table`.
pub fn load_lookup_file(
    path: Option<&Path>,
    table: &mut LookupTable,
) -> Result<LookupLoad, LookupError> {
    let path = match path {
        Some(path) if path.exists() => path,
        _ => {
            info!("no lookup table provided; all records will be tagged '{UNTAGGED}'");
            return Ok(LookupLoad::Missing);
        }
    };
    let file = File::open(path)?;
    let load = load_lookup_reader(file, table)?;
    debug!(path = %path.display(), ?load, "lookup table loaded");
    Ok(load)
}

/// Load lookup rows from any CSV reader into `table`.
///
/// The first physical line is a header and is always skipped, even when it
/// is blank. Each following record goes through `LookupTable::insert_row`;
/// rejected rows are counted and otherwise ignored.
///
/// # Examples
/// ```
/// use flowtag_core::{LookupLoad, LookupTable, load_lookup_reader};
///
/// let csv = "dstport,protocol,tag\n443,tcp,sv_P2\nhttp,tcp,web\n";
/// let mut table = LookupTable::new();
/// let load = load_lookup_reader(csv.as_bytes(), &mut table)?;
/// assert_eq!(load, LookupLoad::Loaded { rows: 1, skipped: 1 });
/// assert_eq!(table.tag_for("443", "tcp"), "sv_P2");
/// # Ok::<(), flowtag_core::LookupError>(())
/// ```
///
/// # Errors
/// Returns `LookupError::Io` when the header line cannot be read and
/// `LookupError::Csv` on later read or decoding failures.
pub fn load_lookup_reader<R: Read>(
    reader: R,
    table: &mut LookupTable,
) -> Result<LookupLoad, LookupError> {
    let mut reader = BufReader::new(reader);
    skip_header_line(&mut reader)?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = 0;
    let mut skipped = 0;
    for result in csv_reader.records() {
        let record = result?;
        let fields: Vec<&str> = record.iter().collect();
        match table.insert_row(&fields) {
            Ok(()) => rows += 1,
            Err(rejection) => {
                trace!(
                    line = record.position().map(|pos| pos.line() + 1),
                    %rejection,
                    "skipping lookup row"
                );
                skipped += 1;
            }
        }
    }

    Ok(LookupLoad::Loaded { rows, skipped })
}

// Consume everything up to and including the first `\n`, `\r\n` or `\r`.
fn skip_header_line<R: BufRead>(reader: &mut R) -> io::Result<()> {
    loop {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        if available.is_empty() {
            return Ok(());
        }
        match available.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(end) => {
                let crlf = available[end] == b'\r' && available.get(end + 1) == Some(&b'\n');
                let split_crlf = available[end] == b'\r' && end + 1 == available.len();
                reader.consume(end + if crlf { 2 } else { 1 });
                if split_crlf {
                    let next = reader.fill_buf()?;
                    if next.first() == Some(&b'\n') {
                        reader.consume(1);
                    }
                }
                return Ok(());
            }
            None => {
                let len = available.len();
                reader.consume(len);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Read};

    use super::{LookupLoad, load_lookup_file, load_lookup_reader};
    use crate::lookup::error::LookupError;
    use crate::lookup::table::LookupTable;

    #[test]
    fn header_row_is_always_skipped() {
        let csv = "443,tcp,not_a_header_but_skipped\n25,tcp,sv_P1\n";
        let mut table = LookupTable::new();
        let load = load_lookup_reader(csv.as_bytes(), &mut table).unwrap();
        assert_eq!(load, LookupLoad::Loaded { rows: 1, skipped: 0 });
        assert_eq!(table.get("443", "tcp"), None);
        assert_eq!(table.get("25", "tcp"), Some("sv_P1"));
    }

    #[test]
    fn blank_first_line_counts_as_the_header() {
        let csv = "\n443,tcp,sv_P2\n25,tcp,sv_P1\n";
        let mut table = LookupTable::new();
        let load = load_lookup_reader(csv.as_bytes(), &mut table).unwrap();
        assert_eq!(load, LookupLoad::Loaded { rows: 2, skipped: 0 });
        assert_eq!(table.get("443", "tcp"), Some("sv_P2"));
        assert_eq!(table.get("25", "tcp"), Some("sv_P1"));
    }

    #[test]
    fn carriage_return_line_endings_are_supported() {
        let csv = "dstport,protocol,tag\r443,tcp,sv_P2\r25,tcp,sv_P1\r";
        let mut table = LookupTable::new();
        let load = load_lookup_reader(csv.as_bytes(), &mut table).unwrap();
        assert_eq!(load, LookupLoad::Loaded { rows: 2, skipped: 0 });
        assert_eq!(table.get("443", "tcp"), Some("sv_P2"));
    }

    #[test]
    fn header_only_source_yields_empty_table() {
        let mut table = LookupTable::new();
        let load = load_lookup_reader("dstport,protocol,tag".as_bytes(), &mut table).unwrap();
        assert_eq!(load, LookupLoad::Loaded { rows: 0, skipped: 0 });
        assert!(table.is_empty());
    }

    #[test]
    fn invalid_rows_are_counted_and_skipped() {
        let csv = "dstport,protocol,tag\n\
                   25,tcp,sv_P1\n\
                   31,udp\n\
                   abc,tcp,web\n\
                   ,tcp,empty\n\
                   22,tcp,sv_P4,extra\n\
                   0,icmp,sv_P5\n";
        let mut table = LookupTable::new();
        let load = load_lookup_reader(csv.as_bytes(), &mut table).unwrap();
        assert_eq!(load, LookupLoad::Loaded { rows: 2, skipped: 4 });
        assert_eq!(table.len(), 2);
        assert_eq!(table.tag_for("0", "icmp"), "sv_P5");
    }

    #[test]
    fn quoted_fields_are_unquoted() {
        let csv = "dstport,protocol,tag\n\"443\",\"tcp\",\"web, secure\"\n";
        let mut table = LookupTable::new();
        load_lookup_reader(csv.as_bytes(), &mut table).unwrap();
        assert_eq!(table.tag_for("443", "tcp"), "web, secure");
    }

    #[test]
    fn empty_source_yields_empty_table() {
        let mut table = LookupTable::new();
        let load = load_lookup_reader(io::empty(), &mut table).unwrap();
        assert_eq!(load, LookupLoad::Loaded { rows: 0, skipped: 0 });
        assert!(table.is_empty());
    }

    #[test]
    fn missing_path_is_not_an_error() {
        let mut table = LookupTable::new();
        assert_eq!(
            load_lookup_file(None, &mut table).unwrap(),
            LookupLoad::Missing
        );

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        assert_eq!(
            load_lookup_file(Some(&missing), &mut table).unwrap(),
            LookupLoad::Missing
        );
        assert!(table.is_empty());
    }

    struct FailAfter<'a> {
        data: &'a [u8],
    }

    impl Read for FailAfter<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::other("disk unplugged"));
            }
            let n = self.data.read(buf)?;
            Ok(n)
        }
    }

    #[test]
    fn read_failure_keeps_rows_loaded_so_far() {
        let mut table = LookupTable::new();
        let reader = FailAfter {
            data: b"dstport,protocol,tag\n25,tcp,sv_P1\n23,tcp,sv_P1\n",
        };
        let err = load_lookup_reader(reader, &mut table).unwrap_err();
        assert!(matches!(err, LookupError::Csv(_)));
        assert_eq!(table.tag_for("25", "tcp"), "sv_P1");
    }
}
