use crate::checksum::record_checksum;
use crate::error::EncodeError;
use crate::types::RecordType;

/// Largest data payload a single record can carry.
pub const MAX_DATA_LEN: usize = 0xFF;

/// One Intel Hex record.
///
/// The checksum is stamped when the record is built or parsed and the fields
/// cannot change afterwards, so a `Record` is always well formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    address: u16,
    record_type: RecordType,
    length: u8,
    bytes: [u8; MAX_DATA_LEN],
    checksum: u8,
}

impl Record {
    /// Copies `data` into a new record and computes its checksum.
    pub fn build(record_type: RecordType, address: u16, data: &[u8]) -> Result<Self, EncodeError> {
        let length = u8::try_from(data.len()).map_err(|_| EncodeError::DataTooLong(data.len()))?;

        let mut bytes = [0; MAX_DATA_LEN];
        bytes[..data.len()].copy_from_slice(data);

        Ok(Self::stamp(record_type, address, length, bytes))
    }

    pub fn data_record(address: u16, data: &[u8]) -> Result<Self, EncodeError> {
        Self::build(RecordType::Data, address, data)
    }

    pub fn end_of_file() -> Self {
        Self::stamp(RecordType::EndOfFile, 0, 0, [0; MAX_DATA_LEN])
    }

    pub(crate) fn stamp(
        record_type: RecordType,
        address: u16,
        length: u8,
        bytes: [u8; MAX_DATA_LEN],
    ) -> Self {
        // Unknown(0x00) and Data must compare equal after a round trip.
        let record_type = RecordType::from(record_type.code());

        let mut record = Record {
            address,
            record_type,
            length,
            bytes,
            checksum: 0,
        };
        record.checksum = record.calculate_checksum();

        record
    }

    pub fn address(&self) -> u16 {
        self.address
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    pub fn data(&self) -> &[u8] {
        &self.bytes[..self.length as usize]
    }

    pub fn len(&self) -> usize {
        self.length as usize
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Address one past the last data byte.
    pub fn end_address(&self) -> u32 {
        u32::from(self.address) + u32::from(self.length)
    }

    /// The checksum stamped on this record.
    pub fn checksum(&self) -> u8 {
        self.checksum
    }

    /// Recomputes the checksum from the record fields.
    pub fn calculate_checksum(&self) -> u8 {
        record_checksum(
            self.length,
            self.address,
            self.record_type.code(),
            self.data(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_data() {
        let record = Record::build(RecordType::Data, 0x0010, b"address gap").unwrap();

        assert_eq!(record.address(), 0x0010);
        assert_eq!(record.record_type(), RecordType::Data);
        assert_eq!(record.data(), b"address gap");
        assert_eq!(record.len(), 11);
        assert_eq!(record.end_address(), 0x001B);
        assert_eq!(record.checksum(), 0xA7);
    }

    #[test]
    fn build_eof() {
        let record = Record::build(RecordType::EndOfFile, 0, &[]).unwrap();

        assert_eq!(record, Record::end_of_file());
        assert!(record.is_empty());
        assert_eq!(record.checksum(), 0xFF);
    }

    #[test]
    fn build_max_length() {
        let data = [0xA5; MAX_DATA_LEN];
        let record = Record::data_record(0, &data).unwrap();

        assert_eq!(record.len(), 255);
        assert_eq!(record.checksum(), record.calculate_checksum());
    }

    #[test]
    fn build_too_long() {
        let data = [0xA5; MAX_DATA_LEN + 1];

        assert_eq!(
            Record::data_record(0, &data),
            Err(EncodeError::DataTooLong(256))
        );
    }

    #[test]
    fn unknown_type_normalized() {
        let record = Record::build(RecordType::Unknown(0x00), 0, &[1]).unwrap();

        assert_eq!(record.record_type(), RecordType::Data);
    }

    #[test]
    fn end_address_past_window() {
        let record = Record::data_record(0xFFFF, &[1, 2]).unwrap();

        assert_eq!(record.end_address(), 0x1_0001);
    }
}
