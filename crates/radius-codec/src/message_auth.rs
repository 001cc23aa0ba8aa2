//! Message-Authenticator Support (RFC 2869)
//!
//! Per RFC 2869 Section 5.14:
//! - Computed as HMAC-MD5(shared_secret, packet)
//! - Always 16 bytes (128 bits)
//! - Required for Access-Request with EAP-Message
//!
//! The Message-Authenticator is computed over the entire RADIUS packet with:
//! - Request Authenticator (for requests) or the Request Authenticator of the
//!   original request (for responses) in the authenticator field
//! - Message-Authenticator value set to all zeros during calculation

use crate::attributes::AttributeType;
use crate::auth::{ATTRIBUTES_OFFSET, HEADER_LENGTH};
use hmac::{Hmac, Mac};
use md5_digest::Md5;

type HmacMd5 = Hmac<Md5>;

/// Length of the Message-Authenticator value
pub const MESSAGE_AUTHENTICATOR_LENGTH: usize = 16;

/// Calculate Message-Authenticator for a RADIUS packet
///
/// # Arguments
/// * `packet_bytes` - The complete RADIUS packet bytes with Message-Authenticator set to zeros
/// * `secret` - The shared secret
pub fn calculate_message_authenticator(packet_bytes: &[u8], secret: &[u8]) -> [u8; 16] {
    let mut mac = HmacMd5::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(packet_bytes);
    let bytes = mac.finalize().into_bytes();

    let mut output = [0u8; 16];
    output.copy_from_slice(&bytes);
    output
}

/// Offset of the Message-Authenticator value (after type and length) in a
/// packet, if the packet carries one
pub fn find_message_authenticator(packet_bytes: &[u8]) -> Option<usize> {
    let mut offset = ATTRIBUTES_OFFSET;
    while offset + 2 <= packet_bytes.len() {
        let attr_type = packet_bytes[offset];
        let attr_len = usize::from(packet_bytes[offset + 1]);
        if attr_len < 2 || offset + attr_len > packet_bytes.len() {
            return None;
        }
        if attr_type == AttributeType::MessageAuthenticator.as_u8()
            && attr_len == MESSAGE_AUTHENTICATOR_LENGTH + 2
        {
            return Some(offset + 2);
        }
        offset += attr_len;
    }
    None
}

/// Verify Message-Authenticator in a RADIUS packet
///
/// # Arguments
/// * `packet_bytes` - The complete RADIUS packet bytes
/// * `secret` - The shared secret
/// * `message_auth_offset` - Byte offset where Message-Authenticator value starts (after type+length)
/// * `request_authenticator` - For responses, the authenticator of the request being answered
pub fn verify_message_authenticator(
    packet_bytes: &[u8],
    secret: &[u8],
    message_auth_offset: usize,
    request_authenticator: Option<&[u8; 16]>,
) -> bool {
    if message_auth_offset < ATTRIBUTES_OFFSET
        || message_auth_offset + MESSAGE_AUTHENTICATOR_LENGTH > packet_bytes.len()
    {
        return false;
    }

    let received = &packet_bytes[message_auth_offset..message_auth_offset + MESSAGE_AUTHENTICATOR_LENGTH];

    let mut packet_copy = packet_bytes.to_vec();
    packet_copy[message_auth_offset..message_auth_offset + MESSAGE_AUTHENTICATOR_LENGTH].fill(0);
    if let Some(request_authenticator) = request_authenticator {
        packet_copy[HEADER_LENGTH..ATTRIBUTES_OFFSET].copy_from_slice(request_authenticator);
    }

    received == calculate_message_authenticator(&packet_copy, secret)
}
