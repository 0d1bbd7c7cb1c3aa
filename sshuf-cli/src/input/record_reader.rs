//! Delimited record reading

use std::io::{self, BufRead};

/// Splits a byte stream into records on a delimiter byte
///
/// The delimiter is stripped. A final record without a trailing delimiter is
/// still returned; an empty stream yields no records.
pub struct RecordReader<R> {
    reader: R,
    delimiter: u8,
}

impl<R: BufRead> RecordReader<R> {
    /// Create a reader splitting on `delimiter`
    pub fn new(reader: R, delimiter: u8) -> Self {
        Self { reader, delimiter }
    }

    /// Read the next record, or `None` at end of input
    pub fn next_record(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut record = Vec::new();
        let read = self.reader.read_until(self.delimiter, &mut record)?;
        if read == 0 {
            return Ok(None);
        }
        if record.last() == Some(&self.delimiter) {
            record.pop();
        }
        Ok(Some(record))
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn records(input: &[u8], delimiter: u8) -> Vec<Vec<u8>> {
        RecordReader::new(Cursor::new(input), delimiter)
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_newline_records() {
        assert_eq!(
            records(b"a\nbb\nccc\n", b'\n'),
            vec![b"a".to_vec(), b"bb".to_vec(), b"ccc".to_vec()]
        );
    }

    #[test]
    fn test_nul_records_keep_newlines() {
        assert_eq!(
            records(b"x\ny\0z\0", b'\0'),
            vec![b"x\ny".to_vec(), b"z".to_vec()]
        );
    }

    #[test]
    fn test_missing_trailing_delimiter() {
        assert_eq!(
            records(b"line1\nline2", b'\n'),
            vec![b"line1".to_vec(), b"line2".to_vec()]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(records(b"", b'\n').is_empty());
    }

    #[test]
    fn test_empty_records_preserved() {
        assert_eq!(records(b"\n\n\n", b'\n'), vec![Vec::<u8>::new(); 3]);
    }

    #[test]
    fn test_records_span_small_buffer() {
        let input = b"first record\nsecond record\n";
        let reader = io::BufReader::with_capacity(4, Cursor::new(&input[..]));
        let got: Vec<_> = RecordReader::new(reader, b'\n')
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(got, vec![b"first record".to_vec(), b"second record".to_vec()]);
    }
}
