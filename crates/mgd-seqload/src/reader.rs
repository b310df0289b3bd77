//! Record splitting
//!
//! Input files are cut into records by a delimiter: a terminator line
//! (`//` for EMBL and GenBank), a header character (`>` for FASTA), or one
//! record per line. Files ending in `.gz` are decompressed on the fly.

use flate2::read::GzDecoder;
use mgd_common::Result;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

/// How a stream is cut into records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordDelimiter {
    /// A record ends with a line starting with this text; the line is kept
    Terminator(&'static str),
    /// A record starts with a line starting with this character
    Header(char),
    /// Every line is a record
    Line,
}

/// Iterator over the raw records of one input stream
pub struct RecordReader {
    lines: io::Lines<Box<dyn BufRead>>,
    delimiter: RecordDelimiter,
    pending: Vec<String>,
    done: bool,
}

impl RecordReader {
    pub fn open(path: impl AsRef<Path>, delimiter: RecordDelimiter) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let gzipped = path.extension().is_some_and(|ext| ext == "gz");
        debug!(path = %path.display(), gzipped, ?delimiter, "Opening input");

        if gzipped {
            Ok(Self::new(GzDecoder::new(file), delimiter))
        } else {
            Ok(Self::new(file, delimiter))
        }
    }

    pub fn new<R: Read + 'static>(reader: R, delimiter: RecordDelimiter) -> Self {
        let reader: Box<dyn BufRead> = Box::new(BufReader::new(reader));
        Self {
            lines: reader.lines(),
            delimiter,
            pending: Vec::new(),
            done: false,
        }
    }

    /// Whatever is buffered, unless it is only blank lines
    fn flush(&mut self) -> Option<String> {
        let lines = std::mem::take(&mut self.pending);
        if lines.iter().all(|line| line.trim().is_empty()) {
            return None;
        }
        Some(lines.join("\n"))
    }
}

impl Iterator for RecordReader {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => return Some(Err(e)),
                None => {
                    self.done = true;
                    return self.flush().map(Ok);
                },
            };

            match self.delimiter {
                RecordDelimiter::Line => return Some(Ok(line)),
                RecordDelimiter::Terminator(terminator) => {
                    let ends_record = line.starts_with(terminator);
                    self.pending.push(line);
                    if ends_record {
                        if let Some(record) = self.flush() {
                            return Some(Ok(record));
                        }
                    }
                },
                RecordDelimiter::Header(header) => {
                    if line.starts_with(header) && !self.pending.is_empty() {
                        let record = self.flush();
                        self.pending.push(line);
                        if let Some(record) = record {
                            return Some(Ok(record));
                        }
                    } else {
                        self.pending.push(line);
                    }
                },
            }
        }
    }
}
