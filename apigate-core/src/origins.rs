//! Parsing and validation of the CORS allow-list.
//!
//! The list arrives either as one comma-separated string or as an already
//! structured sequence. Both forms resolve once into `Vec<AllowedOrigin>`.

use std::fmt;

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

/// Raw, unvalidated form of the origins setting.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OriginsInput {
    /// An explicit sequence. Entries are validated but not trimmed or split.
    List(Vec<String>),
    /// A comma-separated string such as `"https://a.example, https://b.example"`.
    Csv(String),
}

impl OriginsInput {
    /// Interprets an environment value.
    ///
    /// A value starting with `[` must be a JSON array of strings and becomes
    /// [`OriginsInput::List`]. Anything else is kept as [`OriginsInput::Csv`].
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidOriginsFormat`] if a bracketed value is
    /// not a JSON array of strings.
    pub fn from_env_value(raw: String) -> Result<Self, ConfigError> {
        if !raw.starts_with('[') {
            return Ok(Self::Csv(raw));
        }
        serde_json::from_str::<Vec<String>>(&raw)
            .map(Self::List)
            .map_err(|e| ConfigError::InvalidOriginsFormat {
                reason: format!("expected a JSON array of strings: {e}"),
            })
    }

    /// Resolves the input into a validated, ordered list.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidOriginsFormat`] for a CSV string that
    /// starts with `[`, and [`ConfigError::InvalidOrigin`] for the first entry
    /// that is not an absolute HTTP/HTTPS URL.
    pub fn resolve(self) -> Result<Vec<AllowedOrigin>, ConfigError> {
        let entries = match self {
            Self::List(entries) => entries,
            Self::Csv(raw) => {
                if raw.starts_with('[') {
                    return Err(ConfigError::InvalidOriginsFormat {
                        reason: "bracketed value given where a comma-separated list was expected"
                            .to_owned(),
                    });
                }
                raw.split(',').map(|s| s.trim().to_owned()).collect()
            }
        };
        entries.into_iter().map(AllowedOrigin::parse).collect()
    }
}

impl Default for OriginsInput {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

/// A validated absolute HTTP/HTTPS URL permitted as a cross-origin caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedOrigin {
    raw: String,
    url: Url,
}

impl AllowedOrigin {
    /// Validates a single entry.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidOrigin`] if `value` does not parse as an
    /// absolute URL, uses a scheme other than `http`/`https`, or has no host.
    pub fn parse(value: String) -> Result<Self, ConfigError> {
        let url = match Url::parse(&value) {
            Ok(url) => url,
            Err(e) => {
                return Err(ConfigError::InvalidOrigin {
                    value,
                    reason: e.to_string(),
                });
            }
        };
        if !matches!(url.scheme(), "http" | "https") {
            let reason = format!("scheme '{}' is not http or https", url.scheme());
            return Err(ConfigError::InvalidOrigin { value, reason });
        }
        if url.host().is_none() {
            return Err(ConfigError::InvalidOrigin {
                value,
                reason: "missing host".to_owned(),
            });
        }
        Ok(Self { raw: value, url })
    }

    /// The entry exactly as configured.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The `scheme://host[:port]` form browsers send in the `Origin` header.
    #[must_use]
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }
}

impl fmt::Display for AllowedOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
