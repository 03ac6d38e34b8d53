use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind};
use std::path::Path;

use super::{LineSource, SourceError};

/// `LineSource` over any buffered reader.
///
/// `\n`, `\r\n` and a bare `\r` all end a line.
pub struct FlowLogReaderSource<R> {
    reader: R,
    // Last line ended in `\r`; a `\n` right after it belongs to that ending.
    skip_lf: bool,
    line: u64,
}

impl<R: BufRead> FlowLogReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            skip_lf: false,
            line: 0,
        }
    }

    /// Number of lines returned so far.
    pub fn lines_read(&self) -> u64 {
        self.line
    }

    /// Append the bytes of the next line to `out`, without its terminator.
    /// Returns `false` when the input ended before any terminator was seen.
    fn read_raw_line(&mut self, out: &mut Vec<u8>) -> io::Result<bool> {
        loop {
            let available = match self.reader.fill_buf() {
                Ok(available) => available,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            if available.is_empty() {
                return Ok(false);
            }
            if self.skip_lf {
                self.skip_lf = false;
                if available[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }
            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(end) => {
                    out.extend_from_slice(&available[..end]);
                    self.skip_lf = available[end] == b'\r';
                    self.reader.consume(end + 1);
                    return Ok(true);
                }
                None => {
                    let len = available.len();
                    out.extend_from_slice(available);
                    self.reader.consume(len);
                }
            }
        }
    }
}

impl<R: BufRead> LineSource for FlowLogReaderSource<R> {
    fn next_line(&mut self) -> Result<Option<String>, SourceError> {
        let number = self.line + 1;
        let mut bytes = Vec::new();
        let terminated = self
            .read_raw_line(&mut bytes)
            .map_err(|source| SourceError::Read {
                line: number,
                source,
            })?;
        if !terminated && bytes.is_empty() {
            return Ok(None);
        }
        self.line = number;
        String::from_utf8(bytes).map(Some).map_err(|err| SourceError::Read {
            line: number,
            source: io::Error::new(ErrorKind::InvalidData, err),
        })
    }
}

/// `LineSource` backed by a flow-log file.
pub struct FlowLogFileSource {
    inner: FlowLogReaderSource<BufReader<File>>,
}

impl FlowLogFileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Ok(Self {
            inner: FlowLogReaderSource::new(BufReader::new(file)),
        })
    }
}

impl LineSource for FlowLogFileSource {
    fn next_line(&mut self) -> Result<Option<String>, SourceError> {
        self.inner.next_line()
    }
}
