use std::any::Any;
use std::fmt;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// Decoded attribute value
///
/// The shape of a value is decided by the codec registered for the attribute
/// type. The packet codec never looks inside a value; it only moves it between
/// the wire and the attribute list.
#[derive(Debug, Clone)]
pub enum Value {
    /// UTF-8 text (User-Name, Reply-Message, NAS-Port-Id, ...)
    Text(String),
    /// Opaque octets (State, Class, unknown attributes, ...)
    Bytes(Vec<u8>),
    /// 32-bit unsigned integer, big-endian on the wire
    Integer(u32),
    /// IPv4 address
    Address(Ipv4Addr),
    /// Codec-defined value that does not fit the shapes above
    Custom(Arc<dyn CustomValue>),
}

/// Value type produced by a codec outside the built-in shapes
pub trait CustomValue: fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    /// String conversion, if the value has a canonical textual form
    fn to_text(&self) -> Option<String> {
        None
    }

    fn eq_value(&self, other: &dyn CustomValue) -> bool;
}

impl Value {
    /// Short name of the value shape, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Integer(_) => "integer",
            Value::Address(_) => "address",
            Value::Custom(_) => "custom",
        }
    }

    /// String conversion offered by the value itself.
    ///
    /// Only shapes that carry their own canonical text form answer here;
    /// plain text, raw octets and integers return `None`.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Address(addr) => Some(addr.to_string()),
            Value::Custom(custom) => custom.to_text(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<u32> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Ipv4Addr> {
        match self {
            Value::Address(addr) => Some(*addr),
            _ => None,
        }
    }

    /// Downcast a custom value to its concrete type
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        match self {
            Value::Custom(custom) => custom.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Address(a), Value::Address(b)) => a == b,
            (Value::Custom(a), Value::Custom(b)) => a.eq_value(b.as_ref()),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(value)
    }
}

impl From<Ipv4Addr> for Value {
    fn from(value: Ipv4Addr) -> Self {
        Value::Address(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_addresses_convert_themselves() {
        assert_eq!(
            Value::Address(Ipv4Addr::new(10, 0, 0, 1)).to_text().as_deref(),
            Some("10.0.0.1")
        );
        assert_eq!(Value::Text("x".into()).to_text(), None);
        assert_eq!(Value::Integer(5).to_text(), None);
        assert_eq!(Value::Bytes(vec![0x41]).to_text(), None);
    }

    #[test]
    fn test_shapes_never_compare_equal_across_kinds() {
        assert_ne!(Value::from("1"), Value::from(1u32));
        assert_ne!(Value::from(b"a".as_slice()), Value::from("a"));
        assert_eq!(Value::from(7u32), Value::Integer(7));
    }
}
