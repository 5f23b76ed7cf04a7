//! Typed service configuration.
//!
//! Loaded once at startup from the process environment and an optional
//! `.env` file, then shared read-only. Variable names are matched
//! case-sensitively.

use std::{collections::HashMap, path::Path};

use crate::{
    error::ConfigError,
    origins::{AllowedOrigin, OriginsInput},
    secret::ApiKey,
};

/// Environment variable holding the display name.
pub const PROJECT_NAME_VAR: &str = "PROJECT_NAME";
/// Environment variable holding the version label.
pub const PROJECT_VERSION_VAR: &str = "PROJECT_VERSION";
/// Environment variable holding the API path prefix.
pub const API_PREFIX_VAR: &str = "API_V1_STR";
/// Environment variable holding the shared secret.
pub const API_KEY_VAR: &str = "API_KEY";
/// Environment variable holding the CORS allow-list.
pub const CORS_ORIGINS_VAR: &str = "BACKEND_CORS_ORIGINS";

/// Env file consulted by [`Settings::from_env`].
pub const DEFAULT_ENV_FILE: &str = ".env";

const DEFAULT_PROJECT_NAME: &str = "apigate";
const DEFAULT_PROJECT_VERSION: &str = "0.1.1";
const DEFAULT_API_PREFIX: &str = "/api/v1";

/// Public route the API prefix must not shadow.
const HEALTH_PATH: &str = "/health";

/// Validated service configuration.
///
/// Fields are private; nothing can change a `Settings` after it is built.
#[derive(Debug)]
pub struct Settings {
    project_name: String,
    project_version: String,
    api_prefix: String,
    api_key: ApiKey,
    allowed_origins: Vec<AllowedOrigin>,
}

impl Settings {
    /// Loads from the process environment and `./.env`.
    ///
    /// # Errors
    /// See [`Settings::from_env_file`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_file(Some(Path::new(DEFAULT_ENV_FILE)))
    }

    /// Loads from the process environment and an optional env file.
    ///
    /// Process variables take precedence over file entries. A missing file is
    /// skipped. The process environment itself is never modified.
    ///
    /// # Errors
    /// Returns [`ConfigError::EnvFile`] if the file exists but cannot be read
    /// or parsed, and any error from [`Settings::from_vars`].
    pub fn from_env_file(path: Option<&Path>) -> Result<Self, ConfigError> {
        // Non-UTF-8 entries are skipped.
        let env = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
        Self::from_sources(path, env)
    }

    /// Merges env file entries with `env`, letting `env` win.
    fn from_sources<I>(path: Option<&Path>, env: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut vars: HashMap<String, String> = HashMap::new();
        if let Some(path) = path {
            match dotenvy::from_path_iter(path) {
                Ok(iter) => {
                    for item in iter {
                        let (key, value) = item?;
                        vars.insert(key, value);
                    }
                }
                Err(e) if e.not_found() => {}
                Err(e) => return Err(e.into()),
            }
        }
        vars.extend(env);
        Self::from_vars(vars)
    }

    /// Builds from an explicit set of key/value pairs.
    ///
    /// Later pairs override earlier ones with the same key. Unknown keys are
    /// ignored, and keys differing only in case are not bound.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingApiKey`] if `API_KEY` is absent or
    /// empty, and any other error from [`SettingsInput::build`].
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut input = SettingsInput::default();
        for (key, value) in vars {
            let key = key.into();
            let value = value.into();
            match key.as_str() {
                PROJECT_NAME_VAR => input.project_name = Some(value),
                PROJECT_VERSION_VAR => input.project_version = Some(value),
                API_PREFIX_VAR => input.api_prefix = Some(value),
                API_KEY_VAR => input.api_key = Some(value),
                CORS_ORIGINS_VAR => {
                    input.allowed_origins = Some(OriginsInput::from_env_value(value)?);
                }
                _ => {}
            }
        }
        input.build()
    }

    /// Display label of the service.
    #[must_use]
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Version label of the service.
    #[must_use]
    pub fn project_version(&self) -> &str {
        &self.project_version
    }

    /// Path prefix under which the guarded API is mounted.
    #[must_use]
    pub fn api_prefix(&self) -> &str {
        &self.api_prefix
    }

    /// The protected shared secret.
    #[must_use]
    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Origins permitted to make cross-origin requests, in configured order.
    #[must_use]
    pub fn allowed_origins(&self) -> &[AllowedOrigin] {
        &self.allowed_origins
    }
}

/// Unvalidated settings, for callers that construct configuration in code.
///
/// Unset fields fall back to defaults, except `api_key`, which is required.
#[derive(Debug, Clone, Default)]
pub struct SettingsInput {
    pub project_name: Option<String>,
    pub project_version: Option<String>,
    pub api_prefix: Option<String>,
    pub api_key: Option<String>,
    pub allowed_origins: Option<OriginsInput>,
}

impl SettingsInput {
    /// Validates the input into [`Settings`].
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingApiKey`] if the key is absent or empty,
    /// [`ConfigError::InvalidApiKey`] if it cannot be sent as a header,
    /// [`ConfigError::InvalidApiPrefix`] if the prefix cannot be mounted, and
    /// origins errors as described in [`OriginsInput::resolve`].
    pub fn build(self) -> Result<Settings, ConfigError> {
        let api_key = ApiKey::new(self.api_key.ok_or(ConfigError::MissingApiKey)?)?;
        let api_prefix = self
            .api_prefix
            .unwrap_or_else(|| DEFAULT_API_PREFIX.to_owned());
        validate_api_prefix(&api_prefix)?;
        let allowed_origins = self.allowed_origins.unwrap_or_default().resolve()?;

        Ok(Settings {
            project_name: self
                .project_name
                .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_owned()),
            project_version: self
                .project_version
                .unwrap_or_else(|| DEFAULT_PROJECT_VERSION.to_owned()),
            api_prefix,
            api_key,
            allowed_origins,
        })
    }
}

/// Rejects prefixes that would be read as route captures or would shadow
/// the public health route.
fn validate_api_prefix(value: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidApiPrefix {
        value: value.to_owned(),
        reason: reason.to_owned(),
    };
    if value.contains(['{', '}', '*']) {
        return Err(invalid("path parameters and wildcards are not allowed"));
    }
    if value.split('/').any(|segment| segment.starts_with(':')) {
        return Err(invalid("segments must not start with ':'"));
    }
    if format!("/{}", value.trim_matches('/')) == HEALTH_PATH {
        return Err(invalid("collides with the /health route"));
    }
    Ok(())
}
