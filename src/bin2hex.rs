//! Binary image to Intel Hex conversion.
//!
//! Runs of zero bytes longer than [`BinToHexOptions::zero_threshold`] are not
//! written out. The next data record simply starts at a higher address, and
//! [`hex_to_bin`](crate::hex2bin::hex_to_bin) zero-fills the gap again.

use std::io::{BufReader, Read, Write};
use std::string::String;
use std::vec::Vec;

use tracing::{debug, trace};

use crate::error::ConvertError;
use crate::record::Record;

pub const DEFAULT_MAX_DATA_SIZE: u8 = 16;
pub const DEFAULT_ZERO_THRESHOLD: u8 = 2;

/// End of the 16-bit addressing window.
const WINDOW_END: u64 = 0x1_0000;

/// Settings for [`bin_to_hex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BinToHexOptions {
    /// Data bytes per record. Must not be zero.
    pub max_data_size: u8,
    /// Longest zero run still written verbatim.
    pub zero_threshold: u8,
}

impl Default for BinToHexOptions {
    fn default() -> Self {
        Self {
            max_data_size: DEFAULT_MAX_DATA_SIZE,
            zero_threshold: DEFAULT_ZERO_THRESHOLD,
        }
    }
}

impl BinToHexOptions {
    pub fn with_max_data_size(mut self, max_data_size: u8) -> Self {
        self.max_data_size = max_data_size;
        self
    }

    pub fn with_zero_threshold(mut self, zero_threshold: u8) -> Self {
        self.zero_threshold = zero_threshold;
        self
    }

    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.max_data_size == 0 {
            return Err(ConvertError::InvalidOptions("max_data_size must not be zero"));
        }

        Ok(())
    }
}

/// What a [`bin_to_hex`] pass produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BinToHexSummary {
    pub bytes_read: u64,
    pub data_records: usize,
    pub data_bytes: u64,
    /// Zero bytes represented by address gaps instead of record data.
    pub zeros_elided: u64,
}

/// Reads a binary image from `reader` and writes it to `writer` as Intel Hex
/// data records followed by an end-of-file record.
pub fn bin_to_hex<R, W>(
    reader: R,
    writer: W,
    options: &BinToHexOptions,
) -> Result<BinToHexSummary, ConvertError>
where
    R: Read,
    W: Write,
{
    options.validate()?;

    let mut compactor = Compactor::new(writer, options);

    for byte in BufReader::new(reader).bytes() {
        compactor.push(byte?)?;
    }

    compactor.finish()
}

/// Converts an in-memory image to Intel Hex text.
pub fn bin_to_hex_string(image: &[u8], options: &BinToHexOptions) -> Result<String, ConvertError> {
    let mut output = Vec::new();
    bin_to_hex(image, &mut output, options)?;

    // Serialized records are plain ASCII.
    Ok(output.into_iter().map(char::from).collect())
}

struct Compactor<W> {
    writer: W,
    max_data_size: usize,
    zero_threshold: usize,
    buffer: Vec<u8>,
    /// Image address of `buffer[0]`.
    address: u64,
    /// Length of the current zero run, including zeros already written out.
    zero_run: usize,
    skipping: bool,
    summary: BinToHexSummary,
}

impl<W: Write> Compactor<W> {
    fn new(writer: W, options: &BinToHexOptions) -> Self {
        let max_data_size = usize::from(options.max_data_size);

        Self {
            writer,
            max_data_size,
            zero_threshold: usize::from(options.zero_threshold),
            buffer: Vec::with_capacity(max_data_size),
            address: 0,
            zero_run: 0,
            skipping: false,
            summary: BinToHexSummary::default(),
        }
    }

    fn push(&mut self, byte: u8) -> Result<(), ConvertError> {
        self.summary.bytes_read += 1;

        if self.skipping {
            if byte == 0 {
                self.address += 1;
                self.summary.zeros_elided += 1;
                return Ok(());
            }

            trace!(address = self.address, "zero run ends");
            self.skipping = false;
        }

        self.buffer.push(byte);
        if byte == 0 {
            self.zero_run += 1;
        } else {
            self.zero_run = 0;
        }

        if self.zero_run > self.zero_threshold {
            // The run may have started in a record that is already written.
            let pending = self.zero_run.min(self.buffer.len());
            self.emit(self.buffer.len() - pending)?;

            trace!(address = self.address, "zero run starts");
            self.address += pending as u64;
            self.summary.zeros_elided += pending as u64;
            self.buffer.clear();
            self.zero_run = 0;
            self.skipping = true;
        } else if self.buffer.len() == self.max_data_size {
            // Pending zeros move on to the next record unless that would
            // leave nothing to emit. The run keeps counting either way.
            let length = match self.buffer.len().saturating_sub(self.zero_run) {
                0 => self.buffer.len(),
                length => length,
            };

            self.emit(length)?;
        }

        Ok(())
    }

    /// Writes the first `length` buffered bytes as a data record.
    fn emit(&mut self, length: usize) -> Result<(), ConvertError> {
        if length == 0 {
            return Ok(());
        }

        let end = self.address + length as u64;
        let address = match u16::try_from(self.address) {
            Ok(address) if end <= WINDOW_END => address,
            _ => {
                return Err(ConvertError::AddressOutOfRange {
                    address: self.address,
                })
            }
        };

        let record = Record::data_record(address, &self.buffer[..length])?;
        self.write(&record)?;
        debug!(address, length, "data record");

        self.buffer.drain(..length);
        self.address = end;
        self.summary.data_records += 1;
        self.summary.data_bytes += length as u64;

        Ok(())
    }

    fn write(&mut self, record: &Record) -> Result<(), ConvertError> {
        let line = record.serialize()?;
        self.writer.write_all(line.as_bytes())?;

        Ok(())
    }

    fn finish(mut self) -> Result<BinToHexSummary, ConvertError> {
        // A trailing elided zero run leaves nothing behind.
        if !self.skipping {
            self.emit(self.buffer.len())?;
        }

        self.write(&Record::end_of_file())?;
        self.writer.flush()?;

        debug!(
            bytes_read = self.summary.bytes_read,
            data_records = self.summary.data_records,
            zeros_elided = self.summary.zeros_elided,
            "binary image converted"
        );

        Ok(self.summary)
    }
}
