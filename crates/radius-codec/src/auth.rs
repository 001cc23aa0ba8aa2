//! Authenticator and User-Password primitives (RFC 2865 Section 3 and 5.2,
//! RFC 2866 Section 3, RFC 5176 Section 3.5)

use crate::codec::CodecError;
use rand::Rng;

/// Length of the code, identifier and length fields
pub const HEADER_LENGTH: usize = 4;
/// Offset of the first attribute
pub const ATTRIBUTES_OFFSET: usize = 20;
/// Longest User-Password value allowed by RFC 2865 Section 5.2
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Generate a random Request Authenticator (16 bytes) per RFC 2865 Section 3
pub fn generate_request_authenticator() -> [u8; 16] {
    let mut rng = rand::rng();
    let mut authenticator = [0u8; 16];
    rng.fill(&mut authenticator);
    authenticator
}

/// MD5(Code + ID + Length + basis + Attributes + Secret)
///
/// `basis` is 16 zero bytes for Accounting-Request, CoA-Request and
/// Disconnect-Request, and the request authenticator for every response.
pub fn calculate_authenticator(
    header: &[u8],
    basis: &[u8; 16],
    attributes: &[u8],
    secret: &[u8],
) -> [u8; 16] {
    let mut context = md5::Context::new();
    context.consume(header);
    context.consume(basis);
    context.consume(attributes);
    context.consume(secret);
    context.compute().0
}

/// Verify the authenticator of a received Accounting-Request, CoA-Request or
/// Disconnect-Request
pub fn verify_request_authenticator(raw: &[u8], secret: &[u8]) -> bool {
    verify_with_basis(raw, &[0u8; 16], secret)
}

/// Verify the authenticator of a received response against the authenticator
/// of the request it answers
pub fn verify_response_authenticator(
    raw: &[u8],
    request_authenticator: &[u8; 16],
    secret: &[u8],
) -> bool {
    verify_with_basis(raw, request_authenticator, secret)
}

fn verify_with_basis(raw: &[u8], basis: &[u8; 16], secret: &[u8]) -> bool {
    if raw.len() < ATTRIBUTES_OFFSET {
        return false;
    }
    let expected = calculate_authenticator(
        &raw[..HEADER_LENGTH],
        basis,
        &raw[ATTRIBUTES_OFFSET..],
        secret,
    );
    raw[HEADER_LENGTH..ATTRIBUTES_OFFSET] == expected
}

/// Obfuscate a User-Password per RFC 2865 Section 5.2
///
/// The password is padded with zeros to a multiple of 16 bytes, then XORed
/// with MD5(secret + authenticator) for the first block and
/// MD5(secret + previous ciphertext block) for the following ones.
pub fn encrypt_user_password(
    password: &[u8],
    secret: &[u8],
    authenticator: &[u8; 16],
) -> Result<Vec<u8>, CodecError> {
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(CodecError::Invalid(format!(
            "password too long: {} bytes (max {})",
            password.len(),
            MAX_PASSWORD_LENGTH
        )));
    }

    let padded_len = password.len().div_ceil(16).max(1) * 16;
    let mut padded = password.to_vec();
    padded.resize(padded_len, 0);

    let mut result = Vec::with_capacity(padded_len);
    let mut previous: [u8; 16] = *authenticator;

    for chunk in padded.chunks(16) {
        let hash = keystream(secret, &previous);
        let mut block = [0u8; 16];
        for (i, byte) in block.iter_mut().enumerate() {
            *byte = chunk[i] ^ hash[i];
        }
        previous = block;
        result.extend_from_slice(&block);
    }

    Ok(result)
}

/// Recover a User-Password obfuscated per RFC 2865 Section 5.2
pub fn decrypt_user_password(
    encrypted: &[u8],
    secret: &[u8],
    authenticator: &[u8; 16],
) -> Result<String, CodecError> {
    if encrypted.is_empty() || encrypted.len() % 16 != 0 {
        return Err(CodecError::Invalid(format!(
            "encrypted password length {} is not a positive multiple of 16",
            encrypted.len()
        )));
    }

    let mut result = Vec::with_capacity(encrypted.len());
    let mut previous: [u8; 16] = *authenticator;

    for chunk in encrypted.chunks(16) {
        let hash = keystream(secret, &previous);
        for (i, byte) in chunk.iter().enumerate() {
            result.push(byte ^ hash[i]);
        }
        previous.copy_from_slice(chunk);
    }

    while result.last() == Some(&0) {
        result.pop();
    }

    String::from_utf8(result).map_err(|_| CodecError::InvalidUtf8)
}

fn keystream(secret: &[u8], previous: &[u8; 16]) -> [u8; 16] {
    let mut context = md5::Context::new();
    context.consume(secret);
    context.consume(previous);
    context.compute().0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_authenticator() {
        let auth1 = generate_request_authenticator();
        let auth2 = generate_request_authenticator();
        // Should be random
        assert_ne!(auth1, auth2);
    }

    #[test]
    fn test_password_encryption_decryption() {
        let password = "mysecretpassword-that-spans-two-blocks";
        let secret = b"sharedsecret";
        let authenticator = [1u8; 16];

        let encrypted = encrypt_user_password(password.as_bytes(), secret, &authenticator).unwrap();
        assert_eq!(encrypted.len(), 48);
        let decrypted = decrypt_user_password(&encrypted, secret, &authenticator).unwrap();

        assert_eq!(password, decrypted);
    }

    #[test]
    fn test_password_encryption_empty() {
        let encrypted = encrypt_user_password(b"", b"sharedsecret", &[1u8; 16]).unwrap();
        assert_eq!(encrypted.len(), 16); // Should be padded to 16 bytes
    }

    #[test]
    fn test_password_too_long() {
        let password = vec![b'a'; MAX_PASSWORD_LENGTH + 1];
        assert!(encrypt_user_password(&password, b"s", &[0u8; 16]).is_err());
    }

    #[test]
    fn test_decrypt_rejects_partial_block() {
        assert!(decrypt_user_password(&[0u8; 15], b"s", &[0u8; 16]).is_err());
        assert!(decrypt_user_password(&[], b"s", &[0u8; 16]).is_err());
    }

    #[test]
    fn test_authenticator_matches_manual_digest() {
        let header = [4u8, 1, 0, 23];
        let attributes = [87u8, 3, b'0'];
        let secret = b"test";

        let mut data = Vec::new();
        data.extend_from_slice(&header);
        data.extend_from_slice(&[0u8; 16]);
        data.extend_from_slice(&attributes);
        data.extend_from_slice(secret);

        assert_eq!(
            calculate_authenticator(&header, &[0u8; 16], &attributes, secret),
            md5::compute(&data).0
        );
    }

    #[test]
    fn test_verify_rejects_short_input() {
        assert!(!verify_request_authenticator(&[0u8; 19], b"s"));
    }
}
