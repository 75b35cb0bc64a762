use crate::error::{FlowTagError, Result};
use std::io::{self, BufRead};


/// Line reader that ends a line at `\n`, `\r\n` or a lone `\r`.
struct LineReader<R> {
    reader: R,
    skip_lf: bool,
}

impl<R: BufRead> LineReader<R> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = Vec::new();
        let mut saw_data = false;
        loop {
            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                break;
            }
            if self.skip_lf {
                self.skip_lf = false;
                if available[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }
            saw_data = true;
            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(pos) => {
                    line.extend_from_slice(&available[..pos]);
                    self.skip_lf = available[pos] == b'\r';
                    self.reader.consume(pos + 1);
                    break;
                }
                None => {
                    let len = available.len();
                    line.extend_from_slice(available);
                    self.reader.consume(len);
                }
            }
        }

        if !saw_data {
            return Ok(None);
        }
        String::from_utf8(line)
            .map(Some)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Iterator over the rows after the header. Stops after the first error.
pub struct DataLines<'a, R> {
    lines: LineReader<R>,
    source_name: &'a str,
    line_no: usize,
    done: bool,
}

impl<R: BufRead> DataLines<'_, R> {
    fn next_line(&mut self) -> Option<Result<(usize, String)>> {
        if self.done {
            return None;
        }
        self.line_no += 1;
        match self.lines.read_line() {
            Ok(Some(text)) => Some(Ok((self.line_no, text))),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(source) => {
                self.done = true;
                Some(Err(FlowTagError::Read {
                    source_name: self.source_name.to_string(),
                    line: self.line_no,
                    source,
                }))
            }
        }
    }
}

impl<R: BufRead> Iterator for DataLines<'_, R> {
    type Item = Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.line_no == 0 {
            // Header: discarded, but a failure reading it is still fatal.
            if let Some(Err(e)) = self.next_line() {
                return Some(Err(e));
            }
        }
        self.next_line()
    }
}

/// Yields `(line_number, line)` for every line after the header. Line numbers are 1-based.
pub fn data_lines<R: BufRead>(reader: R, source_name: &str) -> DataLines<'_, R> {
    DataLines {
        lines: LineReader {
            reader,
            skip_lf: false,
        },
        source_name,
        line_no: 0,
        done: false,
    }
}

/// Splits a row on commas. Trailing empty fields are dropped so that `a,b,c,` has three fields.
pub fn split_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(',').collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

pub fn parse_port(field: &str, source_name: &str, line: usize) -> Result<i32> {
    let value = field.trim();
    value.parse::<i32>().map_err(|source| FlowTagError::InvalidPort {
        source_name: source_name.to_string(),
        line,
        value: value.to_string(),
        source,
    })
}
