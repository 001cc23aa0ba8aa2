//! Codecs for the RFC 2865 data types: text, string, integer, address, plus
//! User-Password and Vendor-Specific.

use super::{
    AttributeCodec, AttributeRenderer, AttributeTransformer, CodecError, PacketContext,
};
use crate::attributes::{CustomValue, Value};
use crate::auth::{decrypt_user_password, encrypt_user_password};
use std::any::Any;
use std::fmt::Write as _;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// Fallback for attribute types missing from the dictionary.
///
/// Identity over raw bytes, so unknown attributes survive a parse/encode
/// cycle untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownCodec;

impl AttributeCodec for UnknownCodec {
    fn decode(&self, _ctx: &PacketContext<'_>, wire: &[u8]) -> Result<Value, CodecError> {
        Ok(Value::Bytes(wire.to_vec()))
    }

    fn encode(&self, _ctx: &PacketContext<'_>, value: &Value) -> Result<Vec<u8>, CodecError> {
        match value {
            Value::Bytes(bytes) => Ok(bytes.clone()),
            other => Err(CodecError::mismatch("bytes", other)),
        }
    }
}

/// UTF-8 text (RFC 2865 "text")
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec;

impl AttributeCodec for TextCodec {
    fn decode(&self, _ctx: &PacketContext<'_>, wire: &[u8]) -> Result<Value, CodecError> {
        String::from_utf8(wire.to_vec())
            .map(Value::Text)
            .map_err(|_| CodecError::InvalidUtf8)
    }

    fn encode(&self, _ctx: &PacketContext<'_>, value: &Value) -> Result<Vec<u8>, CodecError> {
        match value {
            Value::Text(text) => Ok(text.as_bytes().to_vec()),
            other => Err(CodecError::mismatch("text", other)),
        }
    }

    fn transformer(&self) -> Option<&dyn AttributeTransformer> {
        Some(self)
    }
}

impl AttributeTransformer for TextCodec {
    fn transform(&self, value: Value) -> Result<Value, CodecError> {
        match value {
            Value::Text(_) => Ok(value),
            Value::Bytes(bytes) => String::from_utf8(bytes)
                .map(Value::Text)
                .map_err(|_| CodecError::InvalidUtf8),
            other => Err(CodecError::mismatch("text", &other)),
        }
    }
}

/// Opaque octets (RFC 2865 "string")
#[derive(Debug, Clone, Copy, Default)]
pub struct BytesCodec;

impl AttributeCodec for BytesCodec {
    fn decode(&self, _ctx: &PacketContext<'_>, wire: &[u8]) -> Result<Value, CodecError> {
        Ok(Value::Bytes(wire.to_vec()))
    }

    fn encode(&self, _ctx: &PacketContext<'_>, value: &Value) -> Result<Vec<u8>, CodecError> {
        match value {
            Value::Bytes(bytes) => Ok(bytes.clone()),
            other => Err(CodecError::mismatch("bytes", other)),
        }
    }

    fn transformer(&self) -> Option<&dyn AttributeTransformer> {
        Some(self)
    }
}

impl AttributeTransformer for BytesCodec {
    fn transform(&self, value: Value) -> Result<Value, CodecError> {
        match value {
            Value::Bytes(_) => Ok(value),
            Value::Text(text) => Ok(Value::Bytes(text.into_bytes())),
            other => Err(CodecError::mismatch("bytes", &other)),
        }
    }
}

/// 32-bit unsigned integer, big-endian (RFC 2865 "integer")
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerCodec;

impl AttributeCodec for IntegerCodec {
    fn decode(&self, _ctx: &PacketContext<'_>, wire: &[u8]) -> Result<Value, CodecError> {
        let bytes: [u8; 4] = wire.try_into().map_err(|_| CodecError::InvalidLength {
            expected: 4,
            actual: wire.len(),
        })?;
        Ok(Value::Integer(u32::from_be_bytes(bytes)))
    }

    fn encode(&self, _ctx: &PacketContext<'_>, value: &Value) -> Result<Vec<u8>, CodecError> {
        match value {
            Value::Integer(n) => Ok(n.to_be_bytes().to_vec()),
            other => Err(CodecError::mismatch("integer", other)),
        }
    }

    fn transformer(&self) -> Option<&dyn AttributeTransformer> {
        Some(self)
    }

    fn renderer(&self) -> Option<&dyn AttributeRenderer> {
        Some(self)
    }
}

impl AttributeTransformer for IntegerCodec {
    fn transform(&self, value: Value) -> Result<Value, CodecError> {
        match value {
            Value::Integer(_) => Ok(value),
            Value::Text(text) => text
                .trim()
                .parse::<u32>()
                .map(Value::Integer)
                .map_err(|e| CodecError::Invalid(format!("'{}' is not an integer: {}", text, e))),
            other => Err(CodecError::mismatch("integer", &other)),
        }
    }
}

impl AttributeRenderer for IntegerCodec {
    fn render(&self, value: &Value) -> String {
        value.as_integer().map(|n| n.to_string()).unwrap_or_default()
    }
}

/// IPv4 address (RFC 2865 "address")
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressCodec;

impl AttributeCodec for AddressCodec {
    fn decode(&self, _ctx: &PacketContext<'_>, wire: &[u8]) -> Result<Value, CodecError> {
        let octets: [u8; 4] = wire.try_into().map_err(|_| CodecError::InvalidLength {
            expected: 4,
            actual: wire.len(),
        })?;
        Ok(Value::Address(Ipv4Addr::from(octets)))
    }

    fn encode(&self, _ctx: &PacketContext<'_>, value: &Value) -> Result<Vec<u8>, CodecError> {
        match value {
            Value::Address(addr) => Ok(addr.octets().to_vec()),
            other => Err(CodecError::mismatch("address", other)),
        }
    }

    fn transformer(&self) -> Option<&dyn AttributeTransformer> {
        Some(self)
    }
}

impl AttributeTransformer for AddressCodec {
    fn transform(&self, value: Value) -> Result<Value, CodecError> {
        match value {
            Value::Address(_) => Ok(value),
            Value::Text(text) => text
                .trim()
                .parse::<Ipv4Addr>()
                .map(Value::Address)
                .map_err(|e| CodecError::Invalid(format!("'{}' is not an IPv4 address: {}", text, e))),
            other => Err(CodecError::mismatch("address", &other)),
        }
    }
}

/// User-Password, obfuscated with the shared secret and the packet
/// authenticator (RFC 2865 Section 5.2)
#[derive(Debug, Clone, Copy, Default)]
pub struct UserPasswordCodec;

impl AttributeCodec for UserPasswordCodec {
    fn decode(&self, ctx: &PacketContext<'_>, wire: &[u8]) -> Result<Value, CodecError> {
        decrypt_user_password(wire, ctx.secret, ctx.authenticator).map(Value::Text)
    }

    fn encode(&self, ctx: &PacketContext<'_>, value: &Value) -> Result<Vec<u8>, CodecError> {
        match value {
            Value::Text(password) => {
                encrypt_user_password(password.as_bytes(), ctx.secret, ctx.authenticator)
            }
            other => Err(CodecError::mismatch("text", other)),
        }
    }

    fn transformer(&self) -> Option<&dyn AttributeTransformer> {
        Some(self)
    }
}

impl AttributeTransformer for UserPasswordCodec {
    fn transform(&self, value: Value) -> Result<Value, CodecError> {
        TextCodec.transform(value)
    }
}

/// Vendor-Specific payload (RFC 2865 Section 5.26)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorSpecific {
    pub vendor_id: u32,
    pub data: Vec<u8>,
}

impl CustomValue for VendorSpecific {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_value(&self, other: &dyn CustomValue) -> bool {
        other
            .as_any()
            .downcast_ref::<VendorSpecific>()
            .is_some_and(|other| other == self)
    }
}

impl From<VendorSpecific> for Value {
    fn from(value: VendorSpecific) -> Self {
        Value::Custom(Arc::new(value))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VendorSpecificCodec;

impl VendorSpecificCodec {
    /// Vendor-Id plus at least one byte of vendor data
    const MIN_LENGTH: usize = 5;

    fn parse(wire: &[u8]) -> Result<VendorSpecific, CodecError> {
        if wire.len() < Self::MIN_LENGTH {
            return Err(CodecError::Invalid(format!(
                "Vendor-Specific needs at least {} bytes, got {}",
                Self::MIN_LENGTH,
                wire.len()
            )));
        }
        let vendor_id = u32::from_be_bytes([wire[0], wire[1], wire[2], wire[3]]);
        Ok(VendorSpecific {
            vendor_id,
            data: wire[4..].to_vec(),
        })
    }
}

impl AttributeCodec for VendorSpecificCodec {
    fn decode(&self, _ctx: &PacketContext<'_>, wire: &[u8]) -> Result<Value, CodecError> {
        Self::parse(wire).map(Value::from)
    }

    fn encode(&self, _ctx: &PacketContext<'_>, value: &Value) -> Result<Vec<u8>, CodecError> {
        let vsa = value
            .downcast_ref::<VendorSpecific>()
            .ok_or_else(|| CodecError::mismatch("vendor-specific", value))?;
        let mut wire = Vec::with_capacity(4 + vsa.data.len());
        wire.extend_from_slice(&vsa.vendor_id.to_be_bytes());
        wire.extend_from_slice(&vsa.data);
        Ok(wire)
    }

    fn transformer(&self) -> Option<&dyn AttributeTransformer> {
        Some(self)
    }

    fn renderer(&self) -> Option<&dyn AttributeRenderer> {
        Some(self)
    }
}

impl AttributeTransformer for VendorSpecificCodec {
    fn transform(&self, value: Value) -> Result<Value, CodecError> {
        match value {
            Value::Custom(_) if value.downcast_ref::<VendorSpecific>().is_some() => Ok(value),
            Value::Bytes(bytes) => Self::parse(&bytes).map(Value::from),
            other => Err(CodecError::mismatch("vendor-specific", &other)),
        }
    }
}

impl AttributeRenderer for VendorSpecificCodec {
    /// `<vendor-id>:<hex data>`
    fn render(&self, value: &Value) -> String {
        let Some(vsa) = value.downcast_ref::<VendorSpecific>() else {
            return String::new();
        };
        let mut out = format!("{}:", vsa.vendor_id);
        for byte in &vsa.data {
            let _ = write!(out, "{:02x}", byte);
        }
        out
    }
}
