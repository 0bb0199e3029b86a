//! ERROR-CODE attribute (RFC 5389 section 15.6, RFC 3489 section 11.2.9).
//!
//! ```text
//!  0                   1                   2                   3
//! |           Reserved, should be 0         |Class|     Number    |
//! |      Reason Phrase (variable)                                ..
//! ```

use std::fmt;

use bytes::Bytes;

use crate::stun::codec::{AttrCodec, AttributeValue, DefaultCodec};
use crate::stun::error::StunError;
use crate::stun::message::Message;

// RFC 5389
pub const CODE_TRY_ALTERNATE: u16 = 300;
pub const CODE_BAD_REQUEST: u16 = 400;
pub const CODE_UNAUTHORIZED: u16 = 401;
pub const CODE_UNKNOWN_ATTRIBUTE: u16 = 420;
pub const CODE_STALE_NONCE: u16 = 438;
pub const CODE_SERVER_ERROR: u16 = 500;

// RFC 3489, minus the codes RFC 5389 redefined
pub const CODE_STALE_CREDENTIALS: u16 = 430;
pub const CODE_INTEGRITY_CHECK_FAILURE: u16 = 431;
pub const CODE_MISSING_USERNAME: u16 = 432;
pub const CODE_USE_TLS: u16 = 433;
pub const CODE_GLOBAL_FAILURE: u16 = 600;

static REASON_PHRASES: &[(u16, &str)] = &[
    (CODE_TRY_ALTERNATE, "Try Alternate"),
    (CODE_BAD_REQUEST, "Bad Request"),
    (CODE_UNAUTHORIZED, "Unauthorized"),
    (CODE_UNKNOWN_ATTRIBUTE, "Unknown Attribute"),
    (CODE_STALE_CREDENTIALS, "Stale Credentials"),
    (CODE_INTEGRITY_CHECK_FAILURE, "Integrity Check Failure"),
    (CODE_MISSING_USERNAME, "Missing Username"),
    (CODE_USE_TLS, "Use TLS"),
    (CODE_STALE_NONCE, "Stale Nonce"),
    (CODE_SERVER_ERROR, "Server Error"),
    (CODE_GLOBAL_FAILURE, "Global Failure"),
];

/// Standard reason phrase for `code`, or `""` if the code is not registered.
pub fn reason_for(code: u16) -> &'static str {
    REASON_PHRASES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, reason)| *reason)
        .unwrap_or("")
}

/// Reserved bytes plus class and number.
const HEADER_SIZE: usize = 4;

/// Largest code whose hundreds digit fits in the class byte.
pub const MAX_CODE: u16 = 255 * 100 + 99;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCodeAttribute {
    pub code: u16,
    pub reason: Bytes,
}

impl ErrorCodeAttribute {
    pub fn new(code: u16, reason: impl Into<Bytes>) -> Self {
        ErrorCodeAttribute {
            code,
            reason: reason.into(),
        }
    }

    /// Attribute with the registered reason phrase for `code` (empty if unknown).
    pub fn from_code(code: u16) -> Self {
        ErrorCodeAttribute::new(code, reason_for(code))
    }

    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.reason.len()
    }
}

impl fmt::Display for ErrorCodeAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&String::from_utf8_lossy(&self.reason))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorCodec;

impl AttrCodec for ErrorCodec {
    fn encode(&self, message: &Message, value: &AttributeValue, buf: &mut [u8]) -> Result<usize, StunError> {
        let attr = match value {
            AttributeValue::ErrorCode(attr) => attr,
            _ => return DefaultCodec.encode(message, value, buf),
        };

        if attr.code > MAX_CODE {
            return Err(StunError::ErrorCodeOutOfRange(attr.code));
        }

        let needed = attr.encoded_len();
        if buf.len() < needed {
            return Err(StunError::BufferTooSmall {
                needed,
                available: buf.len(),
            });
        }

        buf[0] = 0;
        buf[1] = 0;
        buf[2] = (attr.code / 100) as u8;
        buf[3] = (attr.code % 100) as u8;
        buf[HEADER_SIZE..needed].copy_from_slice(&attr.reason);
        Ok(needed)
    }

    fn decode(&self, _message: &Message, data: &[u8]) -> Result<AttributeValue, StunError> {
        if data.len() < HEADER_SIZE {
            return Err(StunError::UnexpectedEof);
        }

        // Reserved bytes are not checked.
        let code = u16::from(data[2]) * 100 + u16::from(data[3]);
        let reason = Bytes::copy_from_slice(&data[HEADER_SIZE..]);
        Ok(AttributeValue::ErrorCode(ErrorCodeAttribute { code, reason }))
    }
}
