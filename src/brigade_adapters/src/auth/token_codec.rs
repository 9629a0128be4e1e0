use base64::{Engine as _, engine::general_purpose};
use brigade_core::{SessionClaims, Subject, TokenClass, TokenCodec, TokenCodecError};
use chacha20poly1305::{
    ChaCha20Poly1305, Key, Nonce,
    aead::{Aead, KeyInit},
};
use chrono::Duration;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::RngCore;
use secrecy::{ExposeSecret, Secret};

/// Sign-then-encrypt session token codec.
///
/// The inner layer is an HS256-signed JWT; the outer layer encrypts the
/// whole compact form with ChaCha20-Poly1305 so neither header nor claims
/// are ever visible to clients. The result is an opaque, URL-safe base64
/// blob.
pub struct EncryptedJwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    cipher: ChaCha20Poly1305,
    validation: Validation,
}

impl EncryptedJwtCodec {
    pub fn new(
        signing_key: &Secret<String>,
        encryption_key: &Secret<String>,
    ) -> Result<Self, TokenCodecError> {
        let key = parse_key_material(encryption_key.expose_secret())
            .ok_or(TokenCodecError::InvalidKeyMaterial)?;

        let secret = signing_key.expose_secret().as_bytes();

        // Expiry is exact: a token is valid only while exp is in the future
        let mut validation = Validation::default();
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            cipher: ChaCha20Poly1305::new(Key::from_slice(&key)),
            validation,
        })
    }
}

impl TokenCodec for EncryptedJwtCodec {
    fn issue(
        &self,
        subject: &Subject,
        ttl: Duration,
        class: TokenClass,
    ) -> Result<String, TokenCodecError> {
        let claims = SessionClaims::new(subject.clone(), ttl, class);

        let signed = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenCodecError::Issue(e.to_string()))?;

        let mut nonce_bytes = [0u8; 12];
        rand::rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, signed.as_bytes())
            .map_err(|_| TokenCodecError::Issue("encryption failed".to_owned()))?;

        let mut payload = Vec::with_capacity(12 + ciphertext.len());
        payload.extend_from_slice(&nonce_bytes);
        payload.extend_from_slice(&ciphertext);

        Ok(general_purpose::URL_SAFE_NO_PAD.encode(payload))
    }

    fn decode(&self, token: &str) -> Option<SessionClaims> {
        let payload = general_purpose::URL_SAFE_NO_PAD.decode(token).ok()?;
        if payload.len() < 13 {
            return None;
        }

        let (nonce_bytes, ciphertext) = payload.split_at(12);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .ok()?;
        let signed = String::from_utf8(plaintext).ok()?;

        decode::<SessionClaims>(&signed, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .ok()
    }
}

/// Accepts a 32-byte key as hex, base64 (either alphabet) or raw bytes.
pub fn parse_key_material(raw: &str) -> Option<[u8; 32]> {
    let trimmed = raw.trim();

    if trimmed.len() == 64 && trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        let bytes = decode_hex(trimmed)?;
        return bytes.as_slice().try_into().ok();
    }

    if let Ok(bytes) = general_purpose::URL_SAFE_NO_PAD.decode(trimmed) {
        if bytes.len() == 32 {
            return bytes.as_slice().try_into().ok();
        }
    }

    if let Ok(bytes) = general_purpose::STANDARD.decode(trimmed) {
        if bytes.len() == 32 {
            return bytes.as_slice().try_into().ok();
        }
    }

    let raw_bytes = trimmed.as_bytes();
    if raw_bytes.len() == 32 {
        return raw_bytes.try_into().ok();
    }

    None
}

fn decode_hex(input: &str) -> Option<Vec<u8>> {
    if input.len() % 2 != 0 {
        return None;
    }

    let mut bytes = Vec::with_capacity(input.len() / 2);
    let mut chars = input.chars();
    while let (Some(h), Some(l)) = (chars.next(), chars.next()) {
        let hi = h.to_digit(16)?;
        let lo = l.to_digit(16)?;
        bytes.push(((hi << 4) | lo) as u8);
    }
    Some(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn codec() -> EncryptedJwtCodec {
        EncryptedJwtCodec::new(
            &Secret::from("signing-secret".to_owned()),
            &Secret::from("0123456789abcdef0123456789abcdef".to_owned()),
        )
        .unwrap()
    }

    fn subject() -> Subject {
        Subject::new(Uuid::new_v4(), "a@x.com".to_owned())
    }

    #[test]
    fn access_tokens_round_trip() {
        let codec = codec();
        let subject = subject();
        let token = codec
            .issue(&subject, Duration::minutes(60), TokenClass::Access)
            .unwrap();

        let claims = codec.decode(&token).unwrap();
        assert_eq!(claims.user, subject);
        assert!(!claims.refresh);
    }

    #[test]
    fn refresh_tokens_round_trip() {
        let codec = codec();
        let token = codec
            .issue(&subject(), Duration::days(7), TokenClass::Refresh)
            .unwrap();

        let claims = codec.decode(&token).unwrap();
        assert!(claims.refresh);
    }

    #[test]
    fn expired_at_issue_decodes_to_none() {
        let codec = codec();
        let token = codec
            .issue(&subject(), Duration::seconds(-1), TokenClass::Access)
            .unwrap();
        assert!(codec.decode(&token).is_none());
    }

    #[test]
    fn tampered_tokens_decode_to_none() {
        let codec = codec();
        let token = codec
            .issue(&subject(), Duration::minutes(60), TokenClass::Access)
            .unwrap();

        // Flip one bit anywhere in the blob
        let mut payload = general_purpose::URL_SAFE_NO_PAD.decode(&token).unwrap();
        let middle = payload.len() / 2;
        payload[middle] ^= 0x01;
        let tampered = general_purpose::URL_SAFE_NO_PAD.encode(payload);

        assert!(codec.decode(&tampered).is_none());
    }

    #[test]
    fn garbage_decodes_to_none() {
        let codec = codec();
        assert!(codec.decode("").is_none());
        assert!(codec.decode("not base64 !!!").is_none());
        assert!(codec.decode("c2hvcnQ").is_none());
    }

    #[test]
    fn tokens_issued_under_a_different_encryption_key_are_rejected() {
        let codec_a = codec();
        let codec_b = EncryptedJwtCodec::new(
            &Secret::from("signing-secret".to_owned()),
            &Secret::from("ffffffffffffffffffffffffffffffff".to_owned()),
        )
        .unwrap();

        let token = codec_a
            .issue(&subject(), Duration::minutes(60), TokenClass::Access)
            .unwrap();
        assert!(codec_b.decode(&token).is_none());
    }

    #[test]
    fn the_signed_structure_is_never_exposed() {
        let codec = codec();
        let token = codec
            .issue(&subject(), Duration::minutes(60), TokenClass::Access)
            .unwrap();

        // A compact JWS would contain two dots; the encrypted blob must not
        assert!(!token.contains('.'));
        assert!(general_purpose::URL_SAFE_NO_PAD.decode(&token).is_ok());
    }

    #[test]
    fn every_issue_gets_a_fresh_token_id() {
        let codec = codec();
        let subject = subject();
        let a = codec
            .issue(&subject, Duration::minutes(60), TokenClass::Access)
            .unwrap();
        let b = codec
            .issue(&subject, Duration::minutes(60), TokenClass::Access)
            .unwrap();
        assert_ne!(codec.decode(&a).unwrap().jti, codec.decode(&b).unwrap().jti);
    }

    #[test]
    fn key_material_accepts_hex_base64_and_raw() {
        assert!(parse_key_material(&"ab".repeat(32)).is_some());
        assert!(parse_key_material("0123456789abcdef0123456789abcdef").is_some());
        assert!(
            parse_key_material(&general_purpose::STANDARD.encode([7u8; 32])).is_some()
        );
        assert!(parse_key_material("too-short").is_none());
    }
}
