use bytes::Bytes;

use crate::stun::attributes::AttributeType;
use crate::stun::error::StunError;
use crate::stun::error_code::{ErrorCodeAttribute, ErrorCodec};
use crate::stun::message::Message;

/// Attribute value handed to a codec, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    ErrorCode(ErrorCodeAttribute),
    Text(String),
    Raw(Bytes),
}

impl AttributeValue {
    /// Number of value bytes this attribute needs on the wire, without padding.
    pub fn encoded_len(&self) -> usize {
        match self {
            AttributeValue::ErrorCode(attr) => attr.encoded_len(),
            AttributeValue::Text(text) => text.len(),
            AttributeValue::Raw(raw) => raw.len(),
        }
    }
}

impl From<ErrorCodeAttribute> for AttributeValue {
    fn from(attr: ErrorCodeAttribute) -> Self {
        AttributeValue::ErrorCode(attr)
    }
}

/// Converts between an attribute value and the bytes of its TLV value field.
///
/// `encode` writes into the caller's buffer and returns the number of bytes
/// written. Nothing is written when it fails.
pub trait AttrCodec: Send + Sync {
    fn encode(&self, message: &Message, value: &AttributeValue, buf: &mut [u8]) -> Result<usize, StunError>;

    fn decode(&self, message: &Message, data: &[u8]) -> Result<AttributeValue, StunError>;
}

/// Byte-copy codec used for every attribute without a dedicated one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCodec;

impl AttrCodec for DefaultCodec {
    fn encode(&self, _message: &Message, value: &AttributeValue, buf: &mut [u8]) -> Result<usize, StunError> {
        let data: &[u8] = match value {
            AttributeValue::Text(text) => text.as_bytes(),
            AttributeValue::Raw(raw) => &raw[..],
            AttributeValue::ErrorCode(_) => return Err(StunError::UnsupportedAttributeValue),
        };

        if buf.len() < data.len() {
            return Err(StunError::BufferTooSmall {
                needed: data.len(),
                available: buf.len(),
            });
        }
        buf[..data.len()].copy_from_slice(data);
        Ok(data.len())
    }

    fn decode(&self, _message: &Message, data: &[u8]) -> Result<AttributeValue, StunError> {
        Ok(AttributeValue::Raw(Bytes::copy_from_slice(data)))
    }
}

/// Picks the codec for an attribute type.
pub fn codec_for(attribute_type: AttributeType) -> &'static dyn AttrCodec {
    match attribute_type {
        AttributeType::ErrorCode => &ErrorCodec,
        _ => &DefaultCodec,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stun::message::{MessageClass, MessageMethod, MessageType};

    fn binding_request() -> Message {
        Message::new(MessageType::new(MessageMethod::Binding, MessageClass::Request))
    }

    #[test]
    fn test_default_codec_encodes_text_and_raw() {
        let message = binding_request();
        let mut buf = [0u8; 8];

        let n = DefaultCodec
            .encode(&message, &AttributeValue::Text("alice".to_string()), &mut buf)
            .unwrap();
        assert_eq!(&buf[..n], b"alice");

        let n = DefaultCodec
            .encode(&message, &AttributeValue::Raw(Bytes::from_static(&[1, 2, 3])), &mut buf)
            .unwrap();
        assert_eq!(&buf[..n], &[1, 2, 3]);
    }

    #[test]
    fn test_default_codec_buffer_too_small() {
        let message = binding_request();
        let mut buf = [0xAAu8; 3];

        let result = DefaultCodec.encode(&message, &AttributeValue::Text("alice".to_string()), &mut buf);
        assert_eq!(result, Err(StunError::BufferTooSmall { needed: 5, available: 3 }));
        assert_eq!(buf, [0xAA; 3]);
    }

    #[test]
    fn test_default_codec_rejects_error_code_value() {
        let message = binding_request();
        let value = AttributeValue::from(ErrorCodeAttribute::from_code(400));
        let mut buf = [0u8; 64];

        assert_eq!(
            DefaultCodec.encode(&message, &value, &mut buf),
            Err(StunError::UnsupportedAttributeValue)
        );
    }

    #[test]
    fn test_default_codec_decode_copies_bytes() {
        let message = binding_request();
        let decoded = DefaultCodec.decode(&message, b"realm").unwrap();
        assert_eq!(decoded, AttributeValue::Raw(Bytes::from_static(b"realm")));
    }

    #[test]
    fn test_codec_for_routes_error_code() {
        let message = binding_request();
        let value = AttributeValue::from(ErrorCodeAttribute::from_code(401));
        let mut buf = [0u8; 64];

        // Only the ERROR-CODE codec accepts this value.
        assert!(codec_for(AttributeType::ErrorCode).encode(&message, &value, &mut buf).is_ok());
        assert!(codec_for(AttributeType::Username).encode(&message, &value, &mut buf).is_err());
    }

    #[test]
    fn test_encoded_len() {
        assert_eq!(AttributeValue::Text("abc".to_string()).encoded_len(), 3);
        assert_eq!(AttributeValue::from(ErrorCodeAttribute::from_code(420)).encoded_len(), 21);
    }
}
