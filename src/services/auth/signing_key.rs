/*
 * Responsibility
 * - HS256 の共有鍵を保持する (process 起動時に一度だけ読み込む)
 * - Debug / ログに鍵の中身を出さない
 */
use std::{fmt, sync::Arc};

#[derive(Debug, PartialEq, Eq)]
pub struct EmptySigningKey;

impl fmt::Display for EmptySigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("signing key must not be empty")
    }
}

impl std::error::Error for EmptySigningKey {}

/// Symmetric key used to verify access-token signatures.
///
/// Key material is intentionally not printable via Debug.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(Arc<[u8]>);

impl SigningKey {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, EmptySigningKey> {
        let bytes: Vec<u8> = bytes.into();
        if bytes.is_empty() {
            return Err(EmptySigningKey);
        }
        Ok(Self(bytes.into()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningKey").field(&"[REDACTED]").finish()
    }
}
