use super::Value;

/// RADIUS Attribute as defined in RFC 2865 Section 5
///
/// ```text
///  0                   1                   2
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     Type      |    Length     |  Value ...
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// Only the type and the decoded value are kept. The wire form is produced by
/// the codec registered for `attr_type` when the packet is encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Attribute type (1 byte)
    pub attr_type: u8,
    /// Decoded value
    pub value: Value,
}

impl Attribute {
    /// Type and length fields
    pub const HEADER_LENGTH: usize = 2;
    /// Maximum TLV length (255 bytes including type and length)
    pub const MAX_LENGTH: usize = 255;
    /// Maximum encoded value length
    pub const MAX_VALUE_LENGTH: usize = Self::MAX_LENGTH - Self::HEADER_LENGTH;

    pub fn new(attr_type: u8, value: impl Into<Value>) -> Self {
        Attribute {
            attr_type,
            value: value.into(),
        }
    }
}
