//! JSON Web Token (JWT) utilities for encoding and decoding tokens.
use jsonwebtoken::{
    decode, encode, errors::Error as JwtError, Algorithm, DecodingKey, EncodingKey, Header,
    TokenData, Validation,
};
use serde::{de::DeserializeOwned, Serialize};

#[inline]
pub fn encode_jwt<T: Serialize>(
    claims: &T,
    secret: &[u8],
    algorithm: Option<Algorithm>,
) -> Result<String, JwtError> {
    let header = Header::new(algorithm.unwrap_or(Algorithm::HS256));
    encode(&header, claims, &EncodingKey::from_secret(secret))
}

#[inline]
pub fn decode_jwt<T: DeserializeOwned>(
    token: &str,
    secret: &[u8],
    validation: Option<Validation>,
) -> Result<TokenData<T>, JwtError> {
    let validation = validation.unwrap_or_default();
    decode::<T>(token, &DecodingKey::from_secret(secret), &validation)
}

/// HS256 validation pinned to one issuer
#[inline]
pub fn issuer_validation(issuer: &str) -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;
    validation.set_issuer(&[issuer]);
    validation
}

#[cfg(test)]
mod tests {
    use super::*;
    use wallman_models::domain::prelude::Claims;

    #[test]
    fn claims_survive_signing() {
        let claims = Claims::new("wallman".into(), 7, "alice".into(), 60);
        let token = encode_jwt(&claims, b"secret", None).unwrap();

        let decoded =
            decode_jwt::<Claims>(&token, b"secret", Some(issuer_validation("wallman"))).unwrap();
        assert_eq!(decoded.claims.user_id, 7);
        assert_eq!(decoded.claims.username, "alice");
    }

    #[test]
    fn wrong_secret_or_issuer_is_rejected() {
        let claims = Claims::new("wallman".into(), 7, "alice".into(), 60);
        let token = encode_jwt(&claims, b"secret", None).unwrap();

        assert!(decode_jwt::<Claims>(&token, b"other", Some(issuer_validation("wallman"))).is_err());
        assert!(decode_jwt::<Claims>(&token, b"secret", Some(issuer_validation("nope"))).is_err());
    }
}
