use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StunError {
    #[error("Invalid magic cookie")]
    InvalidMagicCookie,

    #[error("Invalid message length")]
    InvalidMessageLength,

    #[error("Message too short")]
    MessageTooShort,

    #[error("Invalid message type")]
    InvalidMessageType,

    #[error("Invalid attribute")]
    InvalidAttribute,

    #[error("Attribute value of {0} bytes exceeds the 16-bit length field")]
    AttributeTooLarge(usize),

    #[error("Message body of {0} bytes exceeds the 16-bit length field")]
    MessageTooLarge(usize),

    #[error("Buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("Unexpected end of data")]
    UnexpectedEof,

    #[error("Error code {0} does not fit the ERROR-CODE attribute")]
    ErrorCodeOutOfRange(u16),

    #[error("Unsupported attribute value")]
    UnsupportedAttributeValue,
}
