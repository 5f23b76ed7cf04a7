use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use crate::error::ConfigError;

/// The shared secret callers present in the `X-API-Key` header.
///
/// `Debug` prints `ApiKey([REDACTED])`. There is no `Display` or `Serialize`
/// impl, and the backing memory is zeroed on drop. The only way to use the
/// raw value is [`ApiKey::verify`].
///
/// The key must be sendable as an `X-API-Key` header value: printable ASCII
/// with no surrounding whitespace.
pub struct ApiKey(SecretString);

impl ApiKey {
    /// Wraps a raw key.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingApiKey`] for an empty key and
    /// [`ConfigError::InvalidApiKey`] for a key no client could send.
    pub fn new(raw: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if !raw.bytes().all(|b| (b' '..=b'~').contains(&b)) {
            return Err(ConfigError::InvalidApiKey {
                reason: "only printable ASCII characters can be sent in a header".to_owned(),
            });
        }
        if raw.starts_with(' ') || raw.ends_with(' ') {
            return Err(ConfigError::InvalidApiKey {
                reason: "leading or trailing spaces are stripped from header values".to_owned(),
            });
        }
        Ok(Self(SecretString::from(raw)))
    }

    /// Returns `true` if `provided` equals the key byte-for-byte.
    ///
    /// Runs in time independent of where the inputs first differ. The length
    /// of the key is still observable.
    #[must_use]
    pub fn verify(&self, provided: &str) -> bool {
        self.0
            .expose_secret()
            .as_bytes()
            .ct_eq(provided.as_bytes())
            .into()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}
