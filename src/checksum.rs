pub fn checksum(bytes: &[u8]) -> u8 {
	0u8.wrapping_sub(sum(bytes))
}

pub(crate) fn record_checksum(length: u8, address: u16, record_type: u8, data: &[u8]) -> u8 {
	let [high, low] = address.to_be_bytes();
	let header = sum(&[length, high, low, record_type]);

	0u8.wrapping_sub(header.wrapping_add(sum(data)))
}

fn sum(bytes: &[u8]) -> u8 {
	bytes.iter().fold(0u8, |acc, &byte| acc.wrapping_add(byte))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn checksum_of_eof() {
		assert_eq!(checksum(&[0x00, 0x00, 0x00, 0x01]), 0xFF);
	}

	#[test]
	fn checksum_wraps() {
		assert_eq!(checksum(&[0x03, 0x00, 0x00, 0x00, 0xFF, 0xAA, 0xBB]), 0x99);
		assert_eq!(checksum(&[0xFF; 0x100]), 0x00);
	}

	#[test]
	fn record_checksum_matches_flat_checksum() {
		let data = b"address gap";

		assert_eq!(record_checksum(0x0B, 0x0010, 0x00, data), 0xA7);
		assert_eq!(record_checksum(0x00, 0x0000, 0x01, &[]), 0xFF);
	}
}
