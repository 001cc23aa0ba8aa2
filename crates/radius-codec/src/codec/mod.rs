//! Attribute codec contract
//!
//! Every attribute type is handled by an [`AttributeCodec`]. The packet codec
//! calls `decode` for each TLV it reads and `encode` for each attribute it
//! writes, and knows nothing else about attribute values.
//!
//! Two capabilities are optional and probed at the call site:
//!
//! - [`AttributeTransformer`], through [`AttributeCodec::transformer`], which
//!   normalizes a caller-supplied value before it becomes an attribute.
//! - [`AttributeRenderer`], through [`AttributeCodec::renderer`], which gives
//!   a value its display string.
//!
//! A codec advertises a capability by returning `Some(self)` from the
//! corresponding accessor.

mod standard;

pub use standard::{
    AddressCodec, BytesCodec, IntegerCodec, TextCodec, UnknownCodec, UserPasswordCodec,
    VendorSpecific, VendorSpecificCodec,
};

use crate::attributes::Value;
use crate::packet::Code;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Invalid value length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("Value is not valid UTF-8")]
    InvalidUtf8,
    #[error("Type mismatch: expected {expected}, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("Invalid value: {0}")]
    Invalid(String),
}

impl CodecError {
    pub(crate) fn mismatch(expected: &'static str, value: &Value) -> Self {
        CodecError::TypeMismatch {
            expected,
            found: value.kind(),
        }
    }
}

/// Packet fields visible to a codec while it decodes or encodes a value
///
/// Some attributes (User-Password, Tunnel-Password) are obfuscated with the
/// shared secret and the packet authenticator.
#[derive(Debug, Clone, Copy)]
pub struct PacketContext<'a> {
    pub code: Code,
    pub identifier: u8,
    pub authenticator: &'a [u8; 16],
    pub secret: &'a [u8],
}

/// Encoding and decoding of one attribute type
pub trait AttributeCodec: Send + Sync {
    /// Convert the value portion of a TLV (0-253 bytes) into a value
    fn decode(&self, ctx: &PacketContext<'_>, wire: &[u8]) -> Result<Value, CodecError>;

    /// Convert a value into the value portion of a TLV
    fn encode(&self, ctx: &PacketContext<'_>, value: &Value) -> Result<Vec<u8>, CodecError>;

    fn transformer(&self) -> Option<&dyn AttributeTransformer> {
        None
    }

    fn renderer(&self) -> Option<&dyn AttributeRenderer> {
        None
    }
}

/// Normalizes and validates a caller-supplied value
pub trait AttributeTransformer {
    fn transform(&self, value: Value) -> Result<Value, CodecError>;
}

/// Canonical display string for a value
pub trait AttributeRenderer {
    fn render(&self, value: &Value) -> String;
}
