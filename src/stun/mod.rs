pub mod attributes;
pub mod codec;
pub mod error;
pub mod error_code;
pub mod message;

pub use codec::{AttrCodec, AttributeValue, DefaultCodec, codec_for};
pub use error::StunError;
pub use error_code::{ErrorCodeAttribute, ErrorCodec, reason_for};
