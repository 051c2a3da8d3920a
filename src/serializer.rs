use crate::error::EncodeError;
use crate::parser::START_CODE;
use crate::record::{Record, MAX_DATA_LEN};
use core::fmt;

#[cfg(feature = "alloc")]
use alloc::string::String;

/// Length (1) + address (2) + type (1) + data + checksum (1).
const MAX_RAW_LEN: usize = 4 + MAX_DATA_LEN + 1;

/// Longest line [`Record::encode_to_slice`] can produce.
pub const MAX_LINE_LEN: usize = 1 + 2 * MAX_RAW_LEN;

impl Record {
    /// Number of characters in the encoded line, without terminator.
    pub fn encoded_len(&self) -> usize {
        1 + 2 * (4 + self.len() + 1)
    }

    /// Writes the uppercase line, without terminator, into `buffer` and
    /// returns how many bytes were used.
    pub fn encode_to_slice<T>(&self, buffer: &mut T) -> Result<usize, EncodeError>
    where
        T: AsMut<[u8]> + ?Sized,
    {
        let data = self.data();
        if data.len() > MAX_DATA_LEN {
            return Err(EncodeError::DataTooLong(data.len()));
        }

        let buffer = buffer.as_mut();
        let raw_length = 4 + data.len() + 1;
        let line_length = self.encoded_len();

        if buffer.len() < line_length {
            return Err(EncodeError::BufferTooSmall {
                needed: line_length,
                available: buffer.len(),
            });
        }

        let mut raw = [0; MAX_RAW_LEN];
        raw[0] = data.len() as u8;
        raw[1..3].copy_from_slice(&self.address().to_be_bytes());
        raw[3] = self.record_type().code();
        raw[4..raw_length - 1].copy_from_slice(data);
        raw[raw_length - 1] = self.calculate_checksum();

        buffer[0] = START_CODE;

        let digits = &mut buffer[1..line_length];
        hex::encode_to_slice(&raw[..raw_length], digits).map_err(|_| {
            EncodeError::BufferTooSmall {
                needed: line_length,
                available: line_length,
            }
        })?;
        digits.make_ascii_uppercase();

        Ok(line_length)
    }

    /// Encodes the record as one line of text, terminated by `\n`.
    #[cfg(feature = "alloc")]
    pub fn serialize(&self) -> Result<String, EncodeError> {
        let mut buffer = [0; MAX_LINE_LEN];
        let length = self.encode_to_slice(&mut buffer[..])?;

        let mut line = String::with_capacity(length + 1);
        line.extend(buffer[..length].iter().copied().map(char::from));
        line.push('\n');

        Ok(line)
    }
}

impl Record {
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record_type = self.record_type();

        writeln!(f, "type:     {:?} ({:#04X})", record_type, record_type.code())?;
        writeln!(f, "address:  {:#06X}", self.address())?;

        f.write_str("data:     [")?;
        for (i, byte) in self.data().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:#04X}", byte)?;
        }
        f.write_str("]\n")?;

        write!(f, "checksum: {:#04X}", self.checksum())
    }
}

/// `{}` gives the encoded line without terminator, `{:#}` a field by field
/// listing of the record.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return self.describe(f);
        }

        let mut buffer = [0; MAX_LINE_LEN];
        let length = self.encode_to_slice(&mut buffer[..]).map_err(|_| fmt::Error)?;

        let line = core::str::from_utf8(&buffer[..length]).map_err(|_| fmt::Error)?;
        f.write_str(line)
    }
}
