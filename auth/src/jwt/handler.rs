use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// JWT token handler for encoding and decoding session tokens.
///
/// Uses HS256 (HMAC with SHA-256). The secret is held only as signing and
/// verification keys and is never written into a token.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode claims into a signed token.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    /// Decode and validate a token.
    ///
    /// Checks structure, signature, and that `exp` has not passed. No
    /// leeway is applied to the expiry.
    ///
    /// # Errors
    /// * `Malformed` - Token is not a well-formed token for these claims
    /// * `BadSignature` - Signature does not match the secret
    /// * `Expired` - Current time is past the embedded expiry
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                ErrorKind::InvalidSignature => JwtError::BadSignature,
                _ => JwtError::Malformed(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");
        let claims = Claims::for_user(123, Duration::hours(72));

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());
        assert_eq!(token.split('.').count(), 3);

        let decoded = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_invalid_token() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");

        let result = handler.decode("invalid.token.here");
        assert!(matches!(result, Err(JwtError::Malformed(_))));

        let result = handler.decode("");
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let claims = Claims::for_user(123, Duration::hours(1));
        let token = handler1.encode(&claims).expect("Failed to encode token");

        assert_eq!(handler2.decode(&token), Err(JwtError::BadSignature));
    }

    #[test]
    fn test_decode_expired_token() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");

        let claims = Claims::issued_at(123, Utc::now() - Duration::hours(2), Duration::hours(1));
        let token = handler.encode(&claims).expect("Failed to encode token");

        assert_eq!(handler.decode(&token), Err(JwtError::Expired));
    }

    #[test]
    fn test_decode_tampered_payload() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");

        let token = handler
            .encode(&Claims::for_user(1, Duration::hours(1)))
            .expect("Failed to encode token");
        let forged = handler
            .encode(&Claims::for_user(2, Duration::hours(1)))
            .expect("Failed to encode token");

        // Splice the payload of one token onto the signature of another
        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert_eq!(handler.decode(&spliced), Err(JwtError::BadSignature));
    }
}
