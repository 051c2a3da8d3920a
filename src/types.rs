//! Record type codes.

pub const DATA: u8 = 0x00;
pub const END_OF_FILE: u8 = 0x01;
pub const EXTENDED_SEGMENT_ADDRESS: u8 = 0x02;
pub const START_SEGMENT_ADDRESS: u8 = 0x03;
pub const EXTENDED_LINEAR_ADDRESS: u8 = 0x04;
pub const START_LINEAR_ADDRESS: u8 = 0x05;

/// The type field of a record.
///
/// Codes outside `0x00..=0x05` are kept as [`RecordType::Unknown`] so they
/// survive a parse/serialize pass, but their payload is never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecordType {
    Data,
    EndOfFile,
    ExtendedSegmentAddress,
    StartSegmentAddress,
    ExtendedLinearAddress,
    StartLinearAddress,
    Unknown(u8),
}

impl RecordType {
    pub fn code(self) -> u8 {
        match self {
            Self::Data => DATA,
            Self::EndOfFile => END_OF_FILE,
            Self::ExtendedSegmentAddress => EXTENDED_SEGMENT_ADDRESS,
            Self::StartSegmentAddress => START_SEGMENT_ADDRESS,
            Self::ExtendedLinearAddress => EXTENDED_LINEAR_ADDRESS,
            Self::StartLinearAddress => START_LINEAR_ADDRESS,
            Self::Unknown(code) => code,
        }
    }

    pub fn is_data(self) -> bool {
        matches!(self, Self::Data)
    }
}

impl From<u8> for RecordType {
    fn from(code: u8) -> Self {
        match code {
            DATA => Self::Data,
            END_OF_FILE => Self::EndOfFile,
            EXTENDED_SEGMENT_ADDRESS => Self::ExtendedSegmentAddress,
            START_SEGMENT_ADDRESS => Self::StartSegmentAddress,
            EXTENDED_LINEAR_ADDRESS => Self::ExtendedLinearAddress,
            START_LINEAR_ADDRESS => Self::StartLinearAddress,
            code => Self::Unknown(code),
        }
    }
}

impl From<RecordType> for u8 {
    fn from(record_type: RecordType) -> Self {
        record_type.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert_eq!(RecordType::from(0x00), RecordType::Data);
        assert_eq!(RecordType::from(0x01), RecordType::EndOfFile);
        assert_eq!(RecordType::from(0x02), RecordType::ExtendedSegmentAddress);
        assert_eq!(RecordType::from(0x03), RecordType::StartSegmentAddress);
        assert_eq!(RecordType::from(0x04), RecordType::ExtendedLinearAddress);
        assert_eq!(RecordType::from(0x05), RecordType::StartLinearAddress);
    }

    #[test]
    fn unknown_code_is_preserved() {
        let record_type = RecordType::from(0x42);

        assert_eq!(record_type, RecordType::Unknown(0x42));
        assert_eq!(u8::from(record_type), 0x42);
        assert!(!record_type.is_data());
    }

    #[test]
    fn unknown_alias_of_known_code() {
        assert_eq!(RecordType::from(RecordType::Unknown(0x01).code()), RecordType::EndOfFile);
    }
}
