// Line sources feeding the route parser

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::AppResult;

/// Something that yields text lines one at a time.
///
/// `Ok(None)` marks the end of the stream.
pub trait LineSource {
    fn next_line(&mut self) -> AppResult<Option<String>>;
}

/// Reads lines from any buffered reader: a child's stdout, a capture file, or a byte slice.
///
/// Invalid UTF-8 is replaced rather than rejected, since netsh writes in the
/// console code page.
pub struct ReaderLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> ReaderLines<R> {
    pub fn new(reader: R) -> Self {
        ReaderLines {
            reader,
            buf: Vec::new(),
        }
    }
}

impl ReaderLines<BufReader<File>> {
    pub fn open(path: &Path) -> AppResult<Self> {
        let file = File::open(path)?;
        Ok(ReaderLines::new(BufReader::new(file)))
    }
}

impl<R: BufRead> LineSource for ReaderLines<R> {
    fn next_line(&mut self) -> AppResult<Option<String>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }

        let mut line = self.buf.as_slice();
        if let Some(rest) = line.strip_suffix(b"\n") {
            line = rest;
        }
        if let Some(rest) = line.strip_suffix(b"\r") {
            line = rest;
        }

        Ok(Some(String::from_utf8_lossy(line).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(mut source: impl LineSource) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = source.next_line().unwrap() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn test_reader_lines_strips_line_endings() {
        let input: &[u8] = b"first\r\nsecond\n\r\nlast";
        assert_eq!(collect(ReaderLines::new(input)), ["first", "second", "", "last"]);
    }

    #[test]
    fn test_reader_lines_empty_input() {
        let input: &[u8] = b"";
        assert!(collect(ReaderLines::new(input)).is_empty());
    }

    #[test]
    fn test_reader_lines_replaces_invalid_utf8() {
        // 0x81 is a valid OEM code page byte but never valid UTF-8 on its own
        let input: &[u8] = b"Gateway/Interface Name: Ethernet \x81\n";
        let lines = collect(ReaderLines::new(input));
        assert_eq!(lines, ["Gateway/Interface Name: Ethernet \u{FFFD}"]);
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let result = ReaderLines::open(Path::new("/nonexistent/route-capture.txt"));
        assert!(matches!(result, Err(crate::error::AppError::Io(_))));
    }
}
