use crate::stun::error::StunError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    MappedAddress = 0x0001,
    Username = 0x0006,
    MessageIntegrity = 0x0008,
    ErrorCode = 0x0009,
    UnknownAttributes = 0x000A,
    Realm = 0x0014,
    Nonce = 0x0015,
    XorMappedAddress = 0x0020,
    Software = 0x8022,
    AlternateServer = 0x8023,
    Fingerprint = 0x8028,
}

impl AttributeType {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0001 => Some(AttributeType::MappedAddress),
            0x0006 => Some(AttributeType::Username),
            0x0008 => Some(AttributeType::MessageIntegrity),
            0x0009 => Some(AttributeType::ErrorCode),
            0x000A => Some(AttributeType::UnknownAttributes),
            0x0014 => Some(AttributeType::Realm),
            0x0015 => Some(AttributeType::Nonce),
            0x0020 => Some(AttributeType::XorMappedAddress),
            0x8022 => Some(AttributeType::Software),
            0x8023 => Some(AttributeType::AlternateServer),
            0x8028 => Some(AttributeType::Fingerprint),
            _ => None,
        }
    }
}

/// One TLV as it sits on the wire, value unpadded.
#[derive(Debug, Clone)]
pub struct RawAttribute {
    pub attribute_type: u16,
    pub value: Vec<u8>,
}

impl RawAttribute {
    pub fn new(attribute_type: u16, value: Vec<u8>) -> Self {
        RawAttribute {
            attribute_type,
            value,
        }
    }

    /// Returns the attribute and the number of bytes it occupied, padding included.
    pub fn parse(data: &[u8]) -> Result<(Self, usize), StunError> {
        if data.len() < 4 {
            return Err(StunError::InvalidAttribute);
        }

        // Type and length
        let attribute_type = u16::from_be_bytes([data[0], data[1]]);
        let length = u16::from_be_bytes([data[2], data[3]]) as usize;

        // Value must be fully present
        if data.len() < 4 + length {
            return Err(StunError::InvalidAttribute);
        }

        let value = data[4..4 + length].to_vec();

        // Trailing padding may be missing on the last attribute.
        let padded_length = (length + 3) & !3;
        let total_length = (4 + padded_length).min(data.len());

        Ok((RawAttribute::new(attribute_type, value), total_length))
    }

    pub fn serialize(&self) -> Result<Vec<u8>, StunError> {
        let length = u16::try_from(self.value.len())
            .map_err(|_| StunError::AttributeTooLarge(self.value.len()))?;
        let padding = (4 - (self.value.len() % 4)) % 4;
        let mut result = Vec::with_capacity(4 + self.value.len() + padding);

        // Type
        result.extend_from_slice(&self.attribute_type.to_be_bytes());

        // Length
        result.extend_from_slice(&length.to_be_bytes());

        // Value
        result.extend_from_slice(&self.value);

        // Padding to 4-byte boundary
        result.resize(result.len() + padding, 0);

        Ok(result)
    }
}
