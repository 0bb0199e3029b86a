use bytes::{BufMut, BytesMut};
use tracing::trace;

use crate::stun::attributes::{AttributeType, RawAttribute};
use crate::stun::codec::{AttributeValue, codec_for};
use crate::stun::error::StunError;
use crate::stun::error_code::ErrorCodeAttribute;

pub const MAGIC_COOKIE: u32 = 0x2112A442;
pub const STUN_HEADER_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageMethod {
    Binding = 0x0001,
    /// RFC 3489 only.
    SharedSecret = 0x0002,
}

impl MessageMethod {
    fn from_u16(value: u16) -> Result<Self, StunError> {
        match value {
            0x0001 => Ok(MessageMethod::Binding),
            0x0002 => Ok(MessageMethod::SharedSecret),
            _ => Err(StunError::InvalidMessageType),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageClass {
    Request,
    Indication,
    SuccessResponse,
    ErrorResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageType {
    method: MessageMethod,
    class: MessageClass,
}

impl MessageType {
    pub fn new(method: MessageMethod, class: MessageClass) -> Self {
        MessageType { method, class }
    }

    pub fn method(&self) -> MessageMethod {
        self.method
    }

    pub fn class(&self) -> MessageClass {
        self.class
    }

    pub fn as_u16(&self) -> u16 {
        let method = self.method as u16;
        let class_bits = match self.class {
            MessageClass::Request => 0b00,
            MessageClass::Indication => 0b01,
            MessageClass::SuccessResponse => 0b10,
            MessageClass::ErrorResponse => 0b11,
        };

        // M11 M10 M9 M8 M7 C1 M6 M5 M4 C0 M3 M2 M1 M0
        let m = method & 0x0F;
        let m1 = (method >> 4) & 0x07;
        let m2 = (method >> 7) & 0x1F;

        let c0 = class_bits & 0x01;
        let c1 = (class_bits >> 1) & 0x01;

        (m2 << 9) | (c1 << 8) | (m1 << 5) | (c0 << 4) | m
    }

    pub fn from_u16(value: u16) -> Result<Self, StunError> {
        // The two most significant bits are always zero.
        if value & 0xC000 != 0 {
            return Err(StunError::InvalidMessageType);
        }

        let m = value & 0x000F;
        let m1 = (value >> 5) & 0x0007;
        let m2 = (value >> 9) & 0x001F;

        let method = MessageMethod::from_u16((m2 << 7) | (m1 << 4) | m)?;

        let c0 = (value >> 4) & 0x01;
        let c1 = (value >> 8) & 0x01;

        let class = match (c1 << 1) | c0 {
            0b00 => MessageClass::Request,
            0b01 => MessageClass::Indication,
            0b10 => MessageClass::SuccessResponse,
            _ => MessageClass::ErrorResponse,
        };

        Ok(MessageType { method, class })
    }
}

#[derive(Debug, Clone)]
pub struct Message {
    pub message_type: MessageType,
    pub length: u16,
    pub transaction_id: [u8; 12],
    /// Encoded attributes, padded, in wire order.
    pub attributes: Vec<u8>,
}

impl Message {
    pub fn new(message_type: MessageType) -> Self {
        let mut transaction_id = [0u8; 12];
        use rand::Rng;
        rand::thread_rng().fill(&mut transaction_id);

        Message {
            message_type,
            length: 0,
            transaction_id,
            attributes: Vec::new(),
        }
    }

    /// Error response to `method` carrying ERROR-CODE with the registered reason for `code`.
    pub fn error_response(
        method: MessageMethod,
        transaction_id: [u8; 12],
        code: u16,
    ) -> Result<Self, StunError> {
        let mut message = Message::new(MessageType::new(method, MessageClass::ErrorResponse));
        message.transaction_id = transaction_id;
        message.add_attribute(
            AttributeType::ErrorCode,
            &ErrorCodeAttribute::from_code(code).into(),
        )?;
        Ok(message)
    }

    pub fn parse(data: &[u8]) -> Result<Self, StunError> {
        if data.len() < STUN_HEADER_SIZE {
            return Err(StunError::MessageTooShort);
        }

        // Parse message type
        let message_type = MessageType::from_u16(u16::from_be_bytes([data[0], data[1]]))?;

        // Parse length
        let length = u16::from_be_bytes([data[2], data[3]]);

        // Check magic cookie
        let magic_cookie = u32::from_be_bytes([data[4], data[5], data[6], data[7]]);
        if magic_cookie != MAGIC_COOKIE {
            return Err(StunError::InvalidMagicCookie);
        }

        // Parse transaction ID
        let mut transaction_id = [0u8; 12];
        transaction_id.copy_from_slice(&data[8..20]);

        // Attributes are padded, so the length is a multiple of 4
        if length % 4 != 0 || data.len() < STUN_HEADER_SIZE + length as usize {
            return Err(StunError::InvalidMessageLength);
        }

        let attributes = data[STUN_HEADER_SIZE..STUN_HEADER_SIZE + length as usize].to_vec();

        Ok(Message {
            message_type,
            length,
            transaction_id,
            attributes,
        })
    }

    pub fn serialize(&self) -> Result<BytesMut, StunError> {
        let length = u16::try_from(self.attributes.len())
            .map_err(|_| StunError::MessageTooLarge(self.attributes.len()))?;
        let mut buf = BytesMut::with_capacity(STUN_HEADER_SIZE + self.attributes.len());

        // Message type
        buf.put_u16(self.message_type.as_u16());

        // Length
        buf.put_u16(length);

        // Magic cookie
        buf.put_u32(MAGIC_COOKIE);

        // Transaction ID
        buf.put_slice(&self.transaction_id);

        // Attributes
        buf.put_slice(&self.attributes);

        Ok(buf)
    }

    /// Encodes `value` with the codec registered for `attribute_type` and appends it.
    ///
    /// The message is left unchanged if the attribute does not fit the 16-bit
    /// attribute or message length fields.
    pub fn add_attribute(
        &mut self,
        attribute_type: AttributeType,
        value: &AttributeValue,
    ) -> Result<(), StunError> {
        let mut buf = vec![0u8; value.encoded_len()];
        let n = codec_for(attribute_type).encode(self, value, &mut buf)?;
        buf.truncate(n);

        let tlv = RawAttribute::new(attribute_type as u16, buf).serialize()?;
        let total = self.attributes.len() + tlv.len();
        let length = u16::try_from(total).map_err(|_| StunError::MessageTooLarge(total))?;

        self.attributes.extend(tlv);
        self.length = length;

        trace!("added {:?} attribute ({} bytes)", attribute_type, n);
        Ok(())
    }

    /// Decodes the first attribute of `attribute_type`, if present.
    pub fn get_attribute(
        &self,
        attribute_type: AttributeType,
    ) -> Result<Option<AttributeValue>, StunError> {
        // Walk the TLVs in wire order
        let mut offset = 0;
        while offset < self.attributes.len() {
            let (attr, consumed) = RawAttribute::parse(&self.attributes[offset..])?;
            offset += consumed;

            if attr.attribute_type == attribute_type as u16 {
                let value = codec_for(attribute_type).decode(self, &attr.value)?;
                trace!("decoded {:?} attribute ({} bytes)", attribute_type, attr.value.len());
                return Ok(Some(value));
            }
        }

        Ok(None)
    }

    pub fn error_code(&self) -> Result<Option<ErrorCodeAttribute>, StunError> {
        match self.get_attribute(AttributeType::ErrorCode)? {
            Some(AttributeValue::ErrorCode(attr)) => Ok(Some(attr)),
            Some(_) => Err(StunError::InvalidAttribute),
            None => Ok(None),
        }
    }
}
