use crate::application_port::{AccessToken, AuthError, AuthToken, TokenClaims, TokenCodec};
use crate::domain_port::Clock;
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub issuer: String,
    pub audience: String,
    pub token_ttl: Duration,
    pub signing_key: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
    sub: String, // username
    exp: i64,
    iat: i64,
    iss: String,
    aud: String,
    jti: String,
}

pub struct JwtHs256Codec {
    cfg: JwtConfig,
    ttl_secs: i64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    clock: Arc<dyn Clock>,
}

impl JwtHs256Codec {
    pub fn new(cfg: JwtConfig, clock: Arc<dyn Clock>) -> Result<Self, AuthError> {
        if cfg.signing_key.is_empty() {
            return Err(AuthError::InternalError(
                "token signing key is empty".to_string(),
            ));
        }
        let ttl_secs = i64::try_from(cfg.token_ttl.as_secs())
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| {
                AuthError::InternalError(format!(
                    "token lifetime out of range: {:?}",
                    cfg.token_ttl
                ))
            })?;

        Ok(JwtHs256Codec {
            encoding_key: EncodingKey::from_secret(&cfg.signing_key),
            decoding_key: DecodingKey::from_secret(&cfg.signing_key),
            ttl_secs,
            cfg,
            clock,
        })
    }

    #[inline]
    fn gen_jti() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    fn validation(&self) -> Validation {
        let mut v = Validation::new(Algorithm::HS256);
        // exp is compared against the injected clock in `verify`
        v.validate_exp = false;
        v.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
        v.set_audience(&[self.cfg.audience.as_str()]);
        v.set_issuer(&[self.cfg.issuer.as_str()]);
        v
    }

    fn timestamp(secs: i64) -> Result<DateTime<Utc>, AuthError> {
        DateTime::from_timestamp(secs, 0).ok_or(AuthError::MalformedToken)
    }
}

impl TokenCodec for JwtHs256Codec {
    fn issue(&self, subject: &str) -> Result<AuthToken, AuthError> {
        let iat = self.clock.now().timestamp();
        let exp = iat
            .checked_add(self.ttl_secs)
            .ok_or_else(|| AuthError::InternalError("token expiry overflow".to_string()))?;
        let claims = AccessClaims {
            sub: subject.to_string(),
            exp,
            iat,
            iss: self.cfg.issuer.clone(),
            aud: self.cfg.audience.clone(),
            jti: Self::gen_jti(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InternalError(e.to_string()))?;
        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| AuthError::InternalError("token expiry out of range".to_string()))?;

        Ok(AuthToken {
            access_token: AccessToken(token),
            expires_at,
        })
    }

    fn verify(&self, token: &AccessToken) -> Result<TokenClaims, AuthError> {
        let data = decode::<AccessClaims>(&token.0, &self.decoding_key, &self.validation())
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            })?;
        let claims = data.claims;

        if self.clock.now().timestamp() >= claims.exp {
            return Err(AuthError::Expired);
        }

        Ok(TokenClaims {
            issued_at: Self::timestamp(claims.iat)?,
            expires_at: Self::timestamp(claims.exp)?,
            subject: claims.sub,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_port::ManualClock;
    use chrono::TimeZone;

    const TTL_SECS: u64 = 3600;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
    }

    fn config(key: &str) -> JwtConfig {
        JwtConfig {
            issuer: "talait.auth".to_string(),
            audience: "talait-client".to_string(),
            token_ttl: Duration::from_secs(TTL_SECS),
            signing_key: key.as_bytes().to_vec(),
        }
    }

    fn codec_with_clock(key: &str) -> (JwtHs256Codec, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start()));
        let codec = JwtHs256Codec::new(config(key), clock.clone()).unwrap();
        (codec, clock)
    }

    #[test]
    fn issued_token_verifies_to_its_subject() {
        let (codec, _) = codec_with_clock("test-secret");

        let token = codec.issue("alice").unwrap();
        let claims = codec.verify(&token.access_token).unwrap();

        assert_eq!(claims.subject, "alice");
        assert_eq!(claims.issued_at, start());
        assert_eq!(claims.expires_at, token.expires_at);
        assert_eq!(
            token.expires_at,
            start() + chrono::Duration::seconds(TTL_SECS as i64)
        );
    }

    #[test]
    fn tokens_for_same_subject_are_distinct() {
        let (codec, _) = codec_with_clock("test-secret");

        let a = codec.issue("alice").unwrap();
        let b = codec.issue("alice").unwrap();

        assert_ne!(a.access_token, b.access_token);
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let (codec, clock) = codec_with_clock("test-secret");
        let token = codec.issue("alice").unwrap();

        clock.advance(chrono::Duration::seconds(TTL_SECS as i64 - 1));
        assert!(codec.verify(&token.access_token).is_ok());

        clock.advance(chrono::Duration::milliseconds(999));
        assert!(codec.verify(&token.access_token).is_ok());

        clock.set(token.expires_at);
        assert!(matches!(
            codec.verify(&token.access_token),
            Err(AuthError::Expired)
        ));

        clock.advance(chrono::Duration::days(30));
        assert!(matches!(
            codec.verify(&token.access_token),
            Err(AuthError::Expired)
        ));
    }

    #[test]
    fn flipping_any_signature_byte_is_rejected() {
        let (codec, _) = codec_with_clock("test-secret");
        let token = codec.issue("alice").unwrap().access_token.0;
        let (signed_part, signature) = token.rsplit_once('.').unwrap();

        for i in 0..signature.len() {
            let mut tampered: Vec<u8> = signature.as_bytes().to_vec();
            tampered[i] = if tampered[i] == b'A' { b'B' } else { b'A' };
            let tampered = format!("{}.{}", signed_part, String::from_utf8(tampered).unwrap());

            let result = codec.verify(&AccessToken(tampered));
            assert!(
                matches!(result, Err(AuthError::InvalidSignature)),
                "byte {i} gave {result:?}"
            );
        }
    }

    #[test]
    fn token_from_another_secret_has_invalid_signature() {
        let (ours, _) = codec_with_clock("test-secret");
        let (theirs, _) = codec_with_clock("some-other-secret");

        let token = theirs.issue("alice").unwrap();

        assert!(matches!(
            ours.verify(&token.access_token),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn signature_is_checked_before_expiry() {
        let (ours, clock) = codec_with_clock("test-secret");
        let (theirs, _) = codec_with_clock("some-other-secret");
        let token = theirs.issue("alice").unwrap();

        clock.advance(chrono::Duration::days(365));

        assert!(matches!(
            ours.verify(&token.access_token),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn garbage_is_malformed() {
        let (codec, _) = codec_with_clock("test-secret");

        for garbage in ["", "wrongtoken123", "a.b", "a.b.c", "!!!.???.***"] {
            let result = codec.verify(&AccessToken(garbage.to_string()));
            assert!(
                matches!(result, Err(AuthError::MalformedToken)),
                "{garbage:?} gave {result:?}"
            );
        }
    }

    #[test]
    fn foreign_issuer_is_malformed() {
        let clock = Arc::new(ManualClock::new(start()));
        let mut foreign = config("test-secret");
        foreign.issuer = "someone.else".to_string();
        let foreign = JwtHs256Codec::new(foreign, clock.clone()).unwrap();
        let ours = JwtHs256Codec::new(config("test-secret"), clock).unwrap();

        let token = foreign.issue("alice").unwrap();

        assert!(matches!(
            ours.verify(&token.access_token),
            Err(AuthError::MalformedToken)
        ));
    }

    #[test]
    fn empty_key_or_zero_lifetime_is_refused() {
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(start()));

        assert!(JwtHs256Codec::new(config(""), clock.clone()).is_err());

        let mut zero = config("test-secret");
        zero.token_ttl = Duration::from_secs(0);
        assert!(JwtHs256Codec::new(zero, clock).is_err());
    }
}
