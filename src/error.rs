use thiserror::Error;

/// Errors from decoding a single line into a [`Record`](crate::Record).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
	/// The line holds no record at all.
	#[error("empty line")]
	EmptyLine,

	#[error("line too short ({actual} characters, need {expected})")]
	TooShort { expected: usize, actual: usize },

	#[error("missing ':' start code")]
	MissingStartCode,

	#[error("invalid hex digit {character:?} at column {index}")]
	InvalidHexDigit { character: char, index: usize },

	/// The line continues past the checksum field.
	#[error("unexpected characters after checksum")]
	TrailingCharacters,

	#[error("checksum mismatch (line says {expected:#04X}, computed {computed:#04X})")]
	ChecksumMismatch { expected: u8, computed: u8 },
}

/// Errors from building or encoding a [`Record`](crate::Record).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
	#[error("record data too long ({0} bytes, max 255)")]
	DataTooLong(usize),

	#[error("output buffer too small ({available} bytes, need {needed})")]
	BufferTooSmall { needed: usize, available: usize },
}

/// Errors from converting a whole image in either direction.
#[cfg(feature = "std")]
#[derive(Debug, Error)]
pub enum ConvertError {
	/// The source does not start with a ':' start code.
	#[error("not an Intel Hex file")]
	NotAnIntelHexFile,

	#[error("line {line}: {source}")]
	Decode { line: usize, source: DecodeError },

	#[error(transparent)]
	Encode(#[from] EncodeError),

	/// The data does not fit the 16-bit addressing window.
	#[error("address {address:#X} is outside the 16-bit addressing window")]
	AddressOutOfRange { address: u64 },

	/// A data record points before the end of the image already written.
	#[error("record at {address:#06X} overlaps image written up to {position:#X}")]
	AddressOverlap { address: u16, position: u64 },

	#[error("invalid options: {0}")]
	InvalidOptions(&'static str),

	#[error("i/o error: {0}")]
	Io(#[from] std::io::Error),
}
