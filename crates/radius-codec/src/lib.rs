//! RADIUS Wire Codec
//!
//! Parses and encodes RADIUS packets as defined in RFC 2865, 2866 and 2869,
//! with attribute handling driven by an extensible dictionary.
//!
//! # Features
//!
//! - Packet parsing and encoding with size and TLV framing checks
//! - Attribute dictionary mapping type <-> name <-> codec
//! - Pluggable attribute codecs with optional transform/render capabilities
//! - Request/Response Authenticator calculation and verification
//! - User-Password obfuscation and Message-Authenticator (HMAC-MD5)
//!
//! # Example
//!
//! ```rust
//! use radius_codec::{Code, Dictionary, Packet};
//!
//! let mut request = Packet::new(Code::AccountingRequest, "test");
//! request.add("NAS-Port-Id", "0").unwrap();
//! request.add("Acct-Interim-Interval", 300u32).unwrap();
//!
//! let bytes = request.encode().unwrap();
//!
//! let parsed = Packet::parse(&bytes, b"test", Dictionary::builtin()).unwrap();
//! assert!(parsed.is_authentic_request());
//! assert_eq!(parsed.render("NAS-Port-Id"), "0");
//! assert_eq!(parsed.render("Acct-Interim-Interval"), "300");
//! ```

pub mod attributes;
pub mod auth;
pub mod codec;
pub mod dictionary;
pub mod message_auth;
pub mod packet;

pub use attributes::{Attribute, AttributeType, CustomValue, Value};
pub use auth::{
    calculate_authenticator, decrypt_user_password, encrypt_user_password,
    generate_request_authenticator, verify_request_authenticator, verify_response_authenticator,
};
pub use codec::{
    AttributeCodec, AttributeRenderer, AttributeTransformer, CodecError, PacketContext,
};
pub use dictionary::{DictEntry, Dictionary, DictionaryError};
pub use message_auth::{calculate_message_authenticator, verify_message_authenticator};
pub use packet::{Code, Packet, PacketError};
