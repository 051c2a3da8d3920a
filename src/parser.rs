use crate::error::DecodeError;
use crate::record::{Record, MAX_DATA_LEN};
use crate::types::RecordType;
use core::str::FromStr;
use hex::FromHexError;

pub(crate) const START_CODE: u8 = b':';

/// `:` + length (2) + address (4) + type (2).
const HEADER_LEN: usize = 9;
const CHECKSUM_LEN: usize = 2;

type ParseResult = Result<Record, DecodeError>;

impl Record {
    /// Decodes one line. Trailing whitespace, including the line terminator,
    /// is ignored.
    pub fn parse<T: AsRef<[u8]>>(line: T) -> ParseResult {
        let line = line.as_ref().trim_ascii_end();

        if line.is_empty() {
            return Err(DecodeError::EmptyLine);
        }

        if line.len() < HEADER_LEN {
            return Err(DecodeError::TooShort {
                expected: HEADER_LEN,
                actual: line.len(),
            });
        }

        if line[0] != START_CODE {
            return Err(DecodeError::MissingStartCode);
        }

        let mut header = [0; 4];
        decode_field(line, 1, &mut header)?;
        let [length, high, low, record_type] = header;

        let checksum_offset = HEADER_LEN + 2 * length as usize;
        let line_len = checksum_offset + CHECKSUM_LEN;

        if line.len() < line_len {
            return Err(DecodeError::TooShort {
                expected: line_len,
                actual: line.len(),
            });
        }

        if line.len() > line_len {
            return Err(DecodeError::TrailingCharacters);
        }

        let mut bytes = [0; MAX_DATA_LEN];
        decode_field(line, HEADER_LEN, &mut bytes[..length as usize])?;

        let mut expected = [0; 1];
        decode_field(line, checksum_offset, &mut expected)?;
        let [expected] = expected;

        let record = Record::stamp(
            RecordType::from(record_type),
            u16::from_be_bytes([high, low]),
            length,
            bytes,
        );

        if record.checksum() != expected {
            return Err(DecodeError::ChecksumMismatch {
                expected,
                computed: record.checksum(),
            });
        }

        Ok(record)
    }
}

/// Decodes `out.len()` bytes starting at column `offset`.
fn decode_field(line: &[u8], offset: usize, out: &mut [u8]) -> Result<(), DecodeError> {
    let end = offset + 2 * out.len();

    hex::decode_to_slice(&line[offset..end], out).map_err(|err| match err {
        FromHexError::InvalidHexCharacter { c, index } => DecodeError::InvalidHexDigit {
            character: c,
            index: offset + index,
        },
        _ => DecodeError::TooShort {
            expected: end,
            actual: line.len(),
        },
    })
}

impl FromStr for Record {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Record::parse(s)
    }
}
