//! Run-length accounting for rows that produce no tokens.

use crate::tokens::SKIP_MAX;

/// A gap too long for one skip byte. The byte written is clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkipOverflow {
    pub rows: usize,
}

/// Builds a token stream, folding silent rows into skip bytes.
///
/// A note ends its row. Any other row that writes tokens leaves a pending
/// skip of one, so the next flush also closes that row.
#[derive(Debug, Default)]
pub struct SkipWriter {
    bytes: Vec<u8>,
    skip: usize,
}

impl SkipWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for a row that produced nothing.
    pub fn silent_row(&mut self) {
        self.skip += 1;
    }

    /// Write one row's tokens, flushing any pending skip first.
    pub fn write_row(&mut self, tokens: &[u8], note_onset: bool) -> Result<(), SkipOverflow> {
        let mut result = Ok(());
        if self.skip > 0 {
            result = self.flush(self.skip - 1);
            self.skip = 0;
        }
        self.bytes.extend_from_slice(tokens);
        if !note_onset {
            self.skip = 1;
        }
        result
    }

    /// Flush a trailing skip as-is and return the stream.
    pub fn finish(mut self) -> (Vec<u8>, Result<(), SkipOverflow>) {
        let mut result = Ok(());
        if self.skip > 0 {
            result = self.flush(self.skip);
        }
        (self.bytes, result)
    }

    /// Return the stream, dropping any pending skip.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    fn flush(&mut self, count: usize) -> Result<(), SkipOverflow> {
        // The overflow check is on the row count, not the written byte.
        let rows = self.skip;
        self.bytes.push(count.min(SKIP_MAX as usize) as u8);
        if rows > SKIP_MAX as usize {
            Err(SkipOverflow { rows })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_is_written_minus_one() {
        let mut w = SkipWriter::new();
        w.write_row(&[0x81], true).unwrap();
        w.silent_row();
        w.silent_row();
        w.silent_row();
        w.write_row(&[0x82], true).unwrap();
        assert_eq!(w.into_bytes(), vec![0x81, 2, 0x82]);
    }

    #[test]
    fn non_note_row_leaves_pending_skip() {
        let mut w = SkipWriter::new();
        w.write_row(&[0xE5], false).unwrap();
        w.write_row(&[0x81], true).unwrap();
        assert_eq!(w.into_bytes(), vec![0xE5, 0, 0x81]);
    }

    #[test]
    fn trailing_skip_is_written_as_is() {
        let mut w = SkipWriter::new();
        w.write_row(&[0x81], true).unwrap();
        w.silent_row();
        w.silent_row();
        let (bytes, result) = w.finish();
        assert_eq!(bytes, vec![0x81, 2]);
        assert!(result.is_ok());
    }

    #[test]
    fn long_gap_overflows() {
        let mut w = SkipWriter::new();
        for _ in 0..200 {
            w.silent_row();
        }
        assert_eq!(w.write_row(&[0x81], true), Err(SkipOverflow { rows: 200 }));
        assert_eq!(w.into_bytes(), vec![SKIP_MAX, 0x81]);
    }

    #[test]
    fn gap_of_128_overflows() {
        let mut w = SkipWriter::new();
        for _ in 0..128 {
            w.silent_row();
        }
        let (bytes, result) = w.finish();
        assert_eq!(result, Err(SkipOverflow { rows: 128 }));
        assert_eq!(bytes, vec![SKIP_MAX]);
    }
}
