//! Per-request API key check.

use crate::{error::AuthenticationError, settings::Settings};

/// Header carrying the caller's API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Admits the request if `header` equals the configured key exactly.
///
/// On success the header value is returned as the caller's identity token.
/// The check is pure: no I/O and no state shared between calls.
///
/// # Errors
/// Returns [`AuthenticationError`] if the header is absent or differs from
/// the configured key in any way.
pub fn check_api_key<'a>(
    settings: &Settings,
    header: Option<&'a str>,
) -> Result<&'a str, AuthenticationError> {
    match header {
        Some(provided) if settings.api_key().verify(provided) => Ok(provided),
        _ => Err(AuthenticationError::new()),
    }
}
