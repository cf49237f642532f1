use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fmt;

use crate::services::auth::signing_key::SigningKey;

/// The only algorithm access tokens may be signed with.
pub const ACCESS_TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;
const ACCESS_TOKEN_ALGORITHM_NAME: &str = "HS256";

/// Why a token was refused.
///
/// The reason is for logs only. Every variant maps to the same 401 at the
/// HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Missing,
    Malformed,
    BadSignature,
    Expired,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Malformed => "malformed",
            Self::BadSignature => "bad_signature",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access token (JWT) claims.
///
/// Only `exp` is interpreted here. Everything else is passed through to
/// handlers untouched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccessTokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Verification {
    Valid(AccessTokenClaims),
    Rejected(Rejection),
}

#[cfg(test)]
impl Verification {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

// Just enough of the JOSE header to run the algorithm check ourselves.
#[derive(Deserialize)]
struct JoseHeader {
    alg: String,
}

/// Verify `token` against `key` at instant `now` with no clock-skew grace.
pub fn verify(token: &str, key: &[u8], now: DateTime<Utc>) -> Verification {
    verify_with_leeway(token, key, now, 0)
}

/// Verify `token` against `key` at instant `now`.
///
/// Checks run in a fixed order so the reason is deterministic:
/// structure, algorithm, signature, expiry. Never panics and never touches
/// process state.
pub fn verify_with_leeway(
    token: &str,
    key: &[u8],
    now: DateTime<Utc>,
    leeway_seconds: u64,
) -> Verification {
    match check(token, key, now, leeway_seconds) {
        Ok(claims) => Verification::Valid(claims),
        Err(reason) => Verification::Rejected(reason),
    }
}

fn check(
    token: &str,
    key: &[u8],
    now: DateTime<Utc>,
    leeway_seconds: u64,
) -> Result<AccessTokenClaims, Rejection> {
    if token.is_empty() {
        return Err(Rejection::Missing);
    }
    // An unusable key must never let a request through.
    if key.is_empty() {
        return Err(Rejection::Malformed);
    }

    let header = check_structure(token)?;

    if header.alg != ACCESS_TOKEN_ALGORITHM_NAME {
        return Err(Rejection::BadSignature);
    }

    let data = jsonwebtoken::decode::<AccessTokenClaims>(
        token,
        &DecodingKey::from_secret(key),
        &signature_only_validation(),
    )
    .map_err(|e| classify(e.kind()))?;
    let claims = data.claims;

    if let Some(exp) = claims.exp {
        let deadline = exp.saturating_add(i64::try_from(leeway_seconds).unwrap_or(i64::MAX));
        if now.timestamp() >= deadline {
            return Err(Rejection::Expired);
        }
    }

    Ok(claims)
}

// Split into exactly three segments and decode each one. A token without a
// signature is never accepted, whatever its header says.
fn check_structure(token: &str) -> Result<JoseHeader, Rejection> {
    let mut segments = token.split('.');
    let (Some(header), Some(payload), Some(signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(Rejection::Malformed);
    };

    if signature.is_empty() {
        return Err(Rejection::Malformed);
    }

    let header: JoseHeader = decode_json_segment(header)?;
    let _: serde_json::Map<String, serde_json::Value> = decode_json_segment(payload)?;
    URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| Rejection::Malformed)?;

    Ok(header)
}

fn decode_json_segment<T: DeserializeOwned>(segment: &str) -> Result<T, Rejection> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| Rejection::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| Rejection::Malformed)
}

// `exp` is checked against the caller's clock, not jsonwebtoken's, and no
// registered claim is mandatory.
fn signature_only_validation() -> Validation {
    let mut validation = Validation::new(ACCESS_TOKEN_ALGORITHM);
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();
    validation
}

fn classify(kind: &ErrorKind) -> Rejection {
    match kind {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => Rejection::BadSignature,
        ErrorKind::ExpiredSignature => Rejection::Expired,
        _ => Rejection::Malformed,
    }
}

/// HS256 access-token verifier bound to the process-wide key.
///
/// Read-only after construction; share it behind an `Arc`.
#[derive(Clone, Debug)]
pub struct AuthService {
    signing_key: SigningKey,
    leeway_seconds: u64,
}

impl AuthService {
    pub fn new(signing_key: SigningKey, leeway_seconds: u64) -> Self {
        Self {
            signing_key,
            leeway_seconds,
        }
    }

    /// Verify against the current wall clock.
    pub fn verify(&self, token: &str) -> Verification {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Verification {
        verify_with_leeway(
            token,
            self.signing_key.as_bytes(),
            now,
            self.leeway_seconds,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    const SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";

    fn sign(claims: &serde_json::Value, alg: Algorithm, secret: &[u8]) -> String {
        encode(&Header::new(alg), claims, &EncodingKey::from_secret(secret)).unwrap()
    }

    fn token_expiring_at(exp: DateTime<Utc>) -> String {
        sign(
            &json!({ "sub": "1", "exp": exp.timestamp() }),
            Algorithm::HS256,
            SECRET,
        )
    }

    fn raw_token(header: &serde_json::Value, payload: &serde_json::Value, signature: &str) -> String {
        format!(
            "{}.{}.{}",
            URL_SAFE_NO_PAD.encode(header.to_string()),
            URL_SAFE_NO_PAD.encode(payload.to_string()),
            signature
        )
    }

    #[test]
    fn valid_token_returns_claims() {
        let now = Utc::now();
        let token = sign(
            &json!({ "sub": "42", "exp": (now + Duration::hours(1)).timestamp(), "name": "Ada" }),
            Algorithm::HS256,
            SECRET,
        );

        let Verification::Valid(claims) = verify(&token, SECRET, now) else {
            panic!("expected a valid token");
        };
        assert_eq!(claims.sub.as_deref(), Some("42"));
        assert_eq!(claims.extra.get("name"), Some(&json!("Ada")));
    }

    #[test]
    fn token_without_exp_is_valid() {
        let token = sign(&json!({ "sub": "1" }), Algorithm::HS256, SECRET);

        assert!(verify(&token, SECRET, Utc::now()).is_valid());
    }

    #[test]
    fn expired_an_hour_ago_is_rejected_even_with_good_signature() {
        let now = Utc::now();
        let token = token_expiring_at(now - Duration::hours(1));

        assert_eq!(
            verify(&token, SECRET, now),
            Verification::Rejected(Rejection::Expired)
        );
    }

    #[test]
    fn expiry_boundary_has_zero_tolerance() {
        let now = Utc::now();
        let token = token_expiring_at(now);

        assert_eq!(
            verify(&token, SECRET, now),
            Verification::Rejected(Rejection::Expired)
        );
        assert!(verify(&token, SECRET, now - Duration::seconds(1)).is_valid());
    }

    #[test]
    fn leeway_extends_the_deadline() {
        let now = Utc::now();
        let token = token_expiring_at(now - Duration::seconds(10));

        assert!(verify_with_leeway(&token, SECRET, now, 30).is_valid());
        assert_eq!(
            verify_with_leeway(&token, SECRET, now, 5),
            Verification::Rejected(Rejection::Expired)
        );
    }

    #[test]
    fn single_byte_change_in_signature_is_bad_signature() {
        let now = Utc::now();
        let token = token_expiring_at(now + Duration::hours(1));
        let (signing_input, signature) = token.rsplit_once('.').unwrap();

        let mut bytes = URL_SAFE_NO_PAD.decode(signature).unwrap();
        bytes[0] ^= 0x01;
        let tampered = format!("{}.{}", signing_input, URL_SAFE_NO_PAD.encode(bytes));

        assert_eq!(
            verify(&tampered, SECRET, now),
            Verification::Rejected(Rejection::BadSignature)
        );
    }

    #[test]
    fn wrong_key_is_bad_signature() {
        let now = Utc::now();
        let token = token_expiring_at(now + Duration::hours(1));

        assert_eq!(
            verify(&token, b"wrong-secret-key-at-least-32-by", now),
            Verification::Rejected(Rejection::BadSignature)
        );
    }

    #[test]
    fn other_hmac_algorithm_is_bad_signature() {
        let now = Utc::now();
        let token = sign(
            &json!({ "sub": "1", "exp": (now + Duration::hours(1)).timestamp() }),
            Algorithm::HS512,
            SECRET,
        );

        assert_eq!(
            verify(&token, SECRET, now),
            Verification::Rejected(Rejection::BadSignature)
        );
    }

    #[test]
    fn alg_none_with_signature_is_bad_signature() {
        let token = raw_token(
            &json!({ "alg": "none", "typ": "JWT" }),
            &json!({ "sub": "1" }),
            &URL_SAFE_NO_PAD.encode("forged"),
        );

        assert_eq!(
            verify(&token, SECRET, Utc::now()),
            Verification::Rejected(Rejection::BadSignature)
        );
    }

    #[test]
    fn alg_none_without_signature_is_malformed() {
        let token = raw_token(&json!({ "alg": "none" }), &json!({ "sub": "1" }), "");

        assert_eq!(
            verify(&token, SECRET, Utc::now()),
            Verification::Rejected(Rejection::Malformed)
        );
    }

    #[test]
    fn structural_defects_are_malformed() {
        let now = Utc::now();
        let good = token_expiring_at(now + Duration::hours(1));
        let (header, rest) = good.split_once('.').unwrap();
        let (_, signature) = rest.split_once('.').unwrap();

        let cases = [
            "not-a-jwt".to_string(),
            "a.b".to_string(),
            format!("{good}.extra"),
            format!("{header}.!!!.{signature}"),
            format!("{header}.{}.{signature}", URL_SAFE_NO_PAD.encode("[1,2]")),
            format!("{header}.{}.{signature}", URL_SAFE_NO_PAD.encode("not json")),
            format!("{}.{rest}", URL_SAFE_NO_PAD.encode(r#"{"typ":"JWT"}"#)),
            format!("{header}.{}", rest.replace(signature, "%%%")),
        ];

        for token in cases {
            assert_eq!(
                verify(&token, SECRET, now),
                Verification::Rejected(Rejection::Malformed),
                "token {token:?}"
            );
        }
    }

    #[test]
    fn empty_inputs_fail_closed() {
        let now = Utc::now();
        let token = token_expiring_at(now + Duration::hours(1));

        assert_eq!(
            verify("", SECRET, now),
            Verification::Rejected(Rejection::Missing)
        );
        assert_eq!(
            verify(&token, b"", now),
            Verification::Rejected(Rejection::Malformed)
        );
    }

    #[test]
    fn service_applies_its_key_and_leeway() {
        let now = Utc::now();
        let token = token_expiring_at(now - Duration::seconds(10));
        let strict = AuthService::new(SigningKey::new(SECRET).unwrap(), 0);
        let lenient = AuthService::new(SigningKey::new(SECRET).unwrap(), 60);
        let other_key = AuthService::new(SigningKey::new("another-key").unwrap(), 60);

        assert_eq!(
            strict.verify_at(&token, now),
            Verification::Rejected(Rejection::Expired)
        );
        assert!(lenient.verify_at(&token, now).is_valid());
        assert_eq!(
            other_key.verify_at(&token, now),
            Verification::Rejected(Rejection::BadSignature)
        );
    }

    #[test]
    fn verification_is_repeatable() {
        let now = Utc::now();
        let good = token_expiring_at(now + Duration::hours(1));
        let expired = token_expiring_at(now - Duration::hours(1));

        assert_eq!(verify(&good, SECRET, now), verify(&good, SECRET, now));
        assert_eq!(verify(&expired, SECRET, now), verify(&expired, SECRET, now));
    }
}
