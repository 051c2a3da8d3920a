//! Intel Hex records and binary image conversion.
//!
//! The record codec ([`Record`]) works without `std` or an allocator. With the
//! `std` feature (on by default) the [`bin2hex`] and [`hex2bin`] converters turn
//! a raw firmware image into Intel Hex text and back.
//!
//! ```
//! # #[cfg(feature = "std")]
//! # {
//! use ihex_image::{bin_to_hex_string, hex_to_vec, BinToHexOptions};
//!
//! let image = [0x12, 0x34, 0, 0, 0, 0, 0, 0x56];
//! let hex = bin_to_hex_string(&image, &BinToHexOptions::default()).unwrap();
//!
//! assert_eq!(hex, ":020000001234B8\n:0100070056A2\n:00000001FF\n");
//! assert_eq!(hex_to_vec(&hex).unwrap(), image);
//! # }
//! ```

#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod checksum;
mod error;
mod parser;
mod record;
mod serializer;
pub mod types;

#[cfg(feature = "std")]
pub mod bin2hex;
#[cfg(feature = "std")]
pub mod hex2bin;

pub use checksum::checksum;
pub use error::{DecodeError, EncodeError};
pub use record::{Record, MAX_DATA_LEN};
pub use serializer::MAX_LINE_LEN;
pub use types::RecordType;

#[cfg(feature = "std")]
pub use bin2hex::{bin_to_hex, bin_to_hex_string, BinToHexOptions, BinToHexSummary};
#[cfg(feature = "std")]
pub use error::ConvertError;
#[cfg(feature = "std")]
pub use hex2bin::{hex_to_bin, hex_to_vec, HexToBinSummary};
