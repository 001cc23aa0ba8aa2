use super::code::AuthenticatorRule;
use super::Code;
use crate::attributes::Attribute;
use crate::auth::{
    calculate_authenticator, generate_request_authenticator, verify_request_authenticator,
    verify_response_authenticator, ATTRIBUTES_OFFSET,
};
use crate::codec::{CodecError, PacketContext};
use crate::dictionary::Dictionary;
use crate::message_auth;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Error, Debug)]
pub enum PacketError {
    #[error("Packet too short: {0} bytes (minimum 20)")]
    TooShort(usize),
    #[error("Invalid packet length: {0}")]
    InvalidLength(usize),
    #[error("Truncated attribute header at offset {offset}")]
    TruncatedAttribute { offset: usize },
    #[error("Invalid length {length} for attribute {attr_type} at offset {offset}")]
    InvalidAttributeLength {
        attr_type: u8,
        length: usize,
        offset: usize,
    },
    #[error("Failed to decode attribute {attr_type}: {source}")]
    AttributeDecodeFailed {
        attr_type: u8,
        #[source]
        source: CodecError,
    },
    #[error("Failed to encode attribute {attr_type}: {source}")]
    AttributeEncodeFailed {
        attr_type: u8,
        #[source]
        source: CodecError,
    },
    #[error("Encoded attribute {attr_type} too long: {length} bytes (max 253)")]
    AttributeTooLong { attr_type: u8, length: usize },
    #[error("Packet too long: {0} bytes (max 4095)")]
    PacketTooLong(usize),
    #[error("No authenticator rule for packet code {0}")]
    UnsupportedCode(u8),
}

/// RADIUS Packet structure as defined in RFC 2865 Section 3
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     Code      |  Identifier   |            Length             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// |                         Authenticator                         |
/// |                                                               |
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |  Attributes ...
/// +-+-+-+-+-+-+-+-+-+-+-+-+-
/// ```
///
/// Attribute values are interpreted through `dictionary`. The shared secret is
/// only mixed into authenticators and obfuscated attributes; it is never
/// written to the wire.
#[derive(Clone)]
pub struct Packet {
    /// Packet type (1 byte)
    pub code: Code,
    /// Packet identifier for matching requests/responses (1 byte)
    pub identifier: u8,
    /// Request or Response Authenticator (16 bytes)
    pub authenticator: [u8; 16],
    /// Shared secret
    pub secret: Vec<u8>,
    /// Wire bytes this packet was parsed from
    pub raw: Option<Vec<u8>>,
    pub dictionary: Arc<Dictionary>,
    /// Attributes in wire order
    pub attributes: Vec<Attribute>,
}

impl Packet {
    /// Minimum RADIUS packet size (20 bytes: 1 code + 1 id + 2 length + 16 authenticator)
    pub const MIN_PACKET_SIZE: usize = 20;
    /// Maximum RADIUS packet size
    pub const MAX_PACKET_SIZE: usize = 4095;

    /// New packet using the built-in dictionary, with a random identifier and
    /// a random Request Authenticator
    pub fn new(code: Code, secret: impl Into<Vec<u8>>) -> Self {
        Self::with_dictionary(code, secret, Dictionary::builtin())
    }

    pub fn with_dictionary(
        code: Code,
        secret: impl Into<Vec<u8>>,
        dictionary: Arc<Dictionary>,
    ) -> Self {
        Packet {
            code,
            identifier: rand::random::<u8>(),
            authenticator: generate_request_authenticator(),
            secret: secret.into(),
            raw: None,
            dictionary,
            attributes: Vec::new(),
        }
    }

    /// Empty reply to this packet.
    ///
    /// The reply keeps the identifier, secret and dictionary, and carries this
    /// packet's authenticator so that encoding it yields a valid Response
    /// Authenticator.
    pub fn response(&self, code: Code) -> Packet {
        Packet {
            code,
            identifier: self.identifier,
            authenticator: self.authenticator,
            secret: self.secret.clone(),
            raw: None,
            dictionary: Arc::clone(&self.dictionary),
            attributes: Vec::new(),
        }
    }

    /// Fields handed to attribute codecs
    pub fn context(&self) -> PacketContext<'_> {
        PacketContext {
            code: self.code,
            identifier: self.identifier,
            authenticator: &self.authenticator,
            secret: &self.secret,
        }
    }

    /// Parse a packet from wire data.
    ///
    /// Every TLV is decoded by the codec `dictionary` has for its type; types
    /// missing from the dictionary are kept as raw bytes. The authenticator is
    /// not checked here, see [`Packet::is_authentic_request`] and
    /// [`Packet::is_authentic_response`].
    pub fn parse(
        data: &[u8],
        secret: &[u8],
        dictionary: Arc<Dictionary>,
    ) -> Result<Self, PacketError> {
        if data.len() < Self::MIN_PACKET_SIZE {
            return Err(PacketError::TooShort(data.len()));
        }

        let code = Code::from_u8(data[0]);
        let identifier = data[1];
        let length = usize::from(u16::from_be_bytes([data[2], data[3]]));

        if !(Self::MIN_PACKET_SIZE..=Self::MAX_PACKET_SIZE).contains(&length) {
            return Err(PacketError::InvalidLength(length));
        }

        let mut authenticator = [0u8; 16];
        authenticator.copy_from_slice(&data[4..ATTRIBUTES_OFFSET]);

        let ctx = PacketContext {
            code,
            identifier,
            authenticator: &authenticator,
            secret,
        };

        let mut attributes = Vec::new();
        let mut offset = ATTRIBUTES_OFFSET;

        while offset < data.len() {
            let remaining = &data[offset..];
            if remaining.len() < Attribute::HEADER_LENGTH {
                return Err(PacketError::TruncatedAttribute { offset });
            }

            let attr_type = remaining[0];
            let attr_len = usize::from(remaining[1]);
            if attr_len < Attribute::HEADER_LENGTH || attr_len > remaining.len() {
                return Err(PacketError::InvalidAttributeLength {
                    attr_type,
                    length: attr_len,
                    offset,
                });
            }

            let value = dictionary
                .codec(attr_type)
                .decode(&ctx, &remaining[Attribute::HEADER_LENGTH..attr_len])
                .map_err(|source| {
                    debug!(attr_type, offset, error = %source, "Attribute decode failed");
                    PacketError::AttributeDecodeFailed { attr_type, source }
                })?;

            attributes.push(Attribute { attr_type, value });
            offset += attr_len;
        }

        trace!(
            code = ?code,
            identifier,
            length,
            attributes = attributes.len(),
            "Parsed RADIUS packet"
        );

        Ok(Packet {
            code,
            identifier,
            authenticator,
            secret: secret.to_vec(),
            raw: Some(data.to_vec()),
            dictionary,
            attributes,
        })
    }

    /// Encode the packet to wire format.
    ///
    /// Accounting-Request, CoA-Request, Disconnect-Request and every response
    /// code get a computed authenticator; Access-Request and Status-Server
    /// send `self.authenticator` as-is. After encoding a CoA-Request or
    /// Disconnect-Request, `self.authenticator` holds the computed value so
    /// that the reply can be checked with [`Packet::is_authentic_response`].
    pub fn encode(&mut self) -> Result<Vec<u8>, PacketError> {
        let ctx = self.context();
        let mut attributes = Vec::new();

        for attr in &self.attributes {
            let wire = self
                .dictionary
                .codec(attr.attr_type)
                .encode(&ctx, &attr.value)
                .map_err(|source| PacketError::AttributeEncodeFailed {
                    attr_type: attr.attr_type,
                    source,
                })?;

            if wire.len() > Attribute::MAX_VALUE_LENGTH {
                return Err(PacketError::AttributeTooLong {
                    attr_type: attr.attr_type,
                    length: wire.len(),
                });
            }

            attributes.push(attr.attr_type);
            attributes.push((wire.len() + Attribute::HEADER_LENGTH) as u8);
            attributes.extend_from_slice(&wire);
        }

        let length = Self::MIN_PACKET_SIZE + attributes.len();
        if length > Self::MAX_PACKET_SIZE {
            return Err(PacketError::PacketTooLong(length));
        }

        let mut buffer = Vec::with_capacity(length);
        buffer.push(self.code.as_u8());
        buffer.push(self.identifier);
        buffer.extend_from_slice(&(length as u16).to_be_bytes());

        let authenticator = match self.code.authenticator_rule() {
            Some(AuthenticatorRule::Verbatim) => self.authenticator,
            Some(AuthenticatorRule::Request) => {
                calculate_authenticator(&buffer, &[0u8; 16], &attributes, &self.secret)
            }
            Some(AuthenticatorRule::Response) => {
                calculate_authenticator(&buffer, &self.authenticator, &attributes, &self.secret)
            }
            None => return Err(PacketError::UnsupportedCode(self.code.as_u8())),
        };

        if matches!(self.code, Code::CoaRequest | Code::DisconnectRequest) {
            self.authenticator = authenticator;
        }

        buffer.extend_from_slice(&authenticator);
        buffer.extend_from_slice(&attributes);

        Ok(buffer)
    }

    /// Check the authenticator of a received request.
    ///
    /// Accounting-Request, CoA-Request and Disconnect-Request are verified
    /// against the shared secret. Access-Request and Status-Server carry a
    /// random nonce and are always accepted. Anything else, and packets that
    /// were not parsed from wire data, are rejected.
    pub fn is_authentic_request(&self) -> bool {
        let Some(raw) = self.raw.as_deref() else {
            return false;
        };
        match self.code.authenticator_rule() {
            Some(AuthenticatorRule::Verbatim) => true,
            Some(AuthenticatorRule::Request) => verify_request_authenticator(raw, &self.secret),
            _ => false,
        }
    }

    /// Check the authenticator of a received response against the request it
    /// answers
    pub fn is_authentic_response(&self, request: &Packet) -> bool {
        self.is_authentic_response_to(&request.authenticator)
    }

    pub fn is_authentic_response_to(&self, request_authenticator: &[u8; 16]) -> bool {
        let Some(raw) = self.raw.as_deref() else {
            return false;
        };
        if self.code.authenticator_rule() != Some(AuthenticatorRule::Response) {
            return false;
        }
        verify_response_authenticator(raw, request_authenticator, &self.secret)
    }

    /// Check the Message-Authenticator attribute of a received packet.
    ///
    /// Returns `None` when the packet was not parsed from wire data or has no
    /// Message-Authenticator. Pass the request authenticator when checking a
    /// response. Accounting-Request, CoA-Request and Disconnect-Request are
    /// signed with a zeroed authenticator field, since their Request
    /// Authenticator covers the Message-Authenticator; the argument is
    /// ignored for those codes.
    pub fn verify_message_authenticator(
        &self,
        request_authenticator: Option<&[u8; 16]>,
    ) -> Option<bool> {
        let raw = self.raw.as_deref()?;
        let offset = message_auth::find_message_authenticator(raw)?;
        let basis = match self.code.authenticator_rule() {
            Some(AuthenticatorRule::Request) => Some(&[0u8; 16]),
            _ => request_authenticator,
        };
        Some(message_auth::verify_message_authenticator(
            raw,
            &self.secret,
            offset,
            basis,
        ))
    }

    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }
}

impl fmt::Debug for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Packet")
            .field("code", &self.code)
            .field("identifier", &self.identifier)
            .field("authenticator", &self.authenticator)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}
