//! Intel Hex to binary image conversion.

use std::io::{self, BufRead, Read, Write};
use std::vec::Vec;

use tracing::debug;

use crate::error::ConvertError;
use crate::parser::START_CODE;
use crate::record::Record;
use crate::types::RecordType;

/// What a [`hex_to_bin`] pass produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HexToBinSummary {
    pub data_records: usize,
    /// Length of the image written.
    pub image_len: u64,
    /// Zero bytes written to fill address gaps.
    pub zeros_filled: u64,
    /// The record that ended the data section, if the stream had one.
    pub terminator: Option<RecordType>,
}

/// Reads Intel Hex lines from `reader` and writes the binary image to `writer`.
///
/// Data records are expected in ascending address order. Reading stops at
/// the first record that is not a data record.
///
/// The image is written front to back, so a data record that starts before
/// the end of what is already written fails with
/// [`ConvertError::AddressOverlap`] instead of being appended out of place.
pub fn hex_to_bin<R, W>(mut reader: R, writer: W) -> Result<HexToBinSummary, ConvertError>
where
    R: BufRead,
    W: Write,
{
    if reader.fill_buf()?.first() != Some(&START_CODE) {
        return Err(ConvertError::NotAnIntelHexFile);
    }

    let mut image = ImageWriter::new(writer);

    for (index, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        let record = Record::parse(&line).map_err(|source| ConvertError::Decode {
            line: index + 1,
            source,
        })?;

        if !record.record_type().is_data() {
            debug!(line = index + 1, record_type = ?record.record_type(), "end of data");
            image.summary.terminator = Some(record.record_type());
            break;
        }

        image.write_record(&record)?;
    }

    image.finish()
}

/// Converts Intel Hex text to an in-memory image.
pub fn hex_to_vec<T: AsRef<[u8]>>(text: T) -> Result<Vec<u8>, ConvertError> {
    let mut image = Vec::new();
    hex_to_bin(text.as_ref(), &mut image)?;

    Ok(image)
}

struct ImageWriter<W> {
    writer: W,
    /// Bytes written so far, i.e. the next address in the image.
    position: u64,
    summary: HexToBinSummary,
}

impl<W: Write> ImageWriter<W> {
    fn new(writer: W) -> Self {
        Self {
            writer,
            position: 0,
            summary: HexToBinSummary::default(),
        }
    }

    fn write_record(&mut self, record: &Record) -> Result<(), ConvertError> {
        let address = u64::from(record.address());

        if address < self.position {
            return Err(ConvertError::AddressOverlap {
                address: record.address(),
                position: self.position,
            });
        }

        let gap = address - self.position;
        if gap > 0 {
            io::copy(&mut io::repeat(0).take(gap), &mut self.writer)?;
            debug!(from = self.position, length = gap, "zero fill");
            self.summary.zeros_filled += gap;
        }

        self.writer.write_all(record.data())?;
        self.position = u64::from(record.end_address());
        self.summary.data_records += 1;

        Ok(())
    }

    fn finish(mut self) -> Result<HexToBinSummary, ConvertError> {
        self.writer.flush()?;
        self.summary.image_len = self.position;

        debug!(
            data_records = self.summary.data_records,
            image_len = self.summary.image_len,
            "hex image converted"
        );

        Ok(self.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use std::vec;

    #[test]
    fn single_record() {
        let image = hex_to_vec(":0B0010006164647265737320676170A7\n:00000001FF\n").unwrap();

        let mut expected = vec![0; 0x10];
        expected.extend_from_slice(b"address gap");
        assert_eq!(image, expected);
    }

    #[test]
    fn fills_gaps() {
        let text = ":020000000102FB\r\n:020006000304F1\r\n:00000001FF\r\n";

        assert_eq!(hex_to_vec(text).unwrap(), vec![1, 2, 0, 0, 0, 0, 3, 4]);
    }

    #[test]
    fn stops_at_first_non_data_record() {
        let text = ":0100000001FE\n:02000004ABCD82\n:0100010002FC\n:00000001FF\n";
        let mut image = Vec::new();

        let summary = hex_to_bin(text.as_bytes(), &mut image).unwrap();

        assert_eq!(image, vec![1]);
        assert_eq!(summary.terminator, Some(RecordType::ExtendedLinearAddress));
    }

    #[test]
    fn ignores_lines_after_eof() {
        let text = ":0100000001FE\n:00000001FF\n\ngarbage\n";

        assert_eq!(hex_to_vec(text).unwrap(), vec![1]);
    }

    #[test]
    fn missing_eof_record() {
        let mut image = Vec::new();
        let summary = hex_to_bin(&b":0100000001FE\n"[..], &mut image).unwrap();

        assert_eq!(image, vec![1]);
        assert_eq!(summary.terminator, None);
        assert_eq!(summary.image_len, 1);
    }

    #[test]
    fn rejects_non_hex_source() {
        assert!(matches!(
            hex_to_vec("00000001FF\n"),
            Err(ConvertError::NotAnIntelHexFile)
        ));
        assert!(matches!(hex_to_vec(""), Err(ConvertError::NotAnIntelHexFile)));
    }

    #[test]
    fn reports_line_of_bad_record() {
        let text = ":0100000001FE\n:03000000FFAABB00\n:00000001FF\n";

        match hex_to_vec(text) {
            Err(ConvertError::Decode { line, source }) => {
                assert_eq!(line, 2);
                assert_eq!(
                    source,
                    DecodeError::ChecksumMismatch {
                        expected: 0x00,
                        computed: 0x99
                    }
                );
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn blank_line_in_data_section() {
        let text = ":0100000001FE\n\n:00000001FF\n";

        assert!(matches!(
            hex_to_vec(text),
            Err(ConvertError::Decode {
                line: 2,
                source: DecodeError::EmptyLine
            })
        ));
    }

    #[test]
    fn rejects_overlap() {
        let text = ":020000000102FB\n:0100010002FC\n:00000001FF\n";

        assert!(matches!(
            hex_to_vec(text),
            Err(ConvertError::AddressOverlap {
                address: 0x0001,
                position: 2
            })
        ));
    }

    #[test]
    fn summary_counts() {
        let text = ":020000000102FB\n:020006000304F1\n:00000001FF\n";
        let mut image = Vec::new();

        let summary = hex_to_bin(text.as_bytes(), &mut image).unwrap();

        assert_eq!(
            summary,
            HexToBinSummary {
                data_records: 2,
                image_len: 8,
                zeros_filled: 4,
                terminator: Some(RecordType::EndOfFile),
            }
        );
    }
}
