//! Core configuration and authentication for apigate services.
//!
//! Holds the typed [`Settings`] loaded once at startup and the API key
//! guard that every protected request passes through. HTTP wiring lives in
//! `apigate-server`.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod guard;
pub mod origins;
pub mod secret;
pub mod settings;

pub use error::{AuthenticationError, ConfigError};
pub use guard::{check_api_key, API_KEY_HEADER};
pub use origins::{AllowedOrigin, OriginsInput};
pub use secret::ApiKey;
pub use settings::{Settings, SettingsInput};
