//! Redactor configuration.
//!
//! [`RedactorOptions`] is an immutable value assembled with consuming `with_*`
//! calls; [`RedactorOptions::validate`] turns it into the [`RedactorConfig`]
//! a `Redactor` holds for its lifetime.

use crate::credentials::{ApiCredentials, SecretString};
use crate::error::ConfigError;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Options for building a `Redactor`.
///
/// ```rust,ignore
/// let options = RedactorOptions::new()
///     .with_api_keys(api_key, organization)
///     .with_model("gpt-4o")
///     .with_verbose(true);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RedactorOptions {
    api_key: Option<SecretString>,
    organization: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    verbose: bool,
}

impl RedactorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from the environment (and `.env`, if present).
    ///
    /// Reads `OPENAI_API_KEY`, `OPENAI_ORGANIZATION`, `OPENAI_MODEL`,
    /// `OPENAI_BASE_URL` and `VERBOSE`. Missing credentials are reported by
    /// [`validate`](Self::validate), not here.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load options through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let verbose = match lookup("VERBOSE") {
            Some(value) => parse_flag("VERBOSE", &value)?,
            None => false,
        };

        Ok(Self {
            api_key: lookup("OPENAI_API_KEY").map(SecretString::from),
            organization: lookup("OPENAI_ORGANIZATION"),
            model: lookup("OPENAI_MODEL").filter(|m| !m.is_empty()),
            base_url: lookup("OPENAI_BASE_URL").filter(|u| !u.is_empty()),
            verbose,
        })
    }

    /// Set API key and organization.
    pub fn with_api_keys(self, api_key: impl Into<String>, organization: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::new(api_key)),
            organization: Some(organization.into()),
            ..self
        }
    }

    pub fn with_model(self, model: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
            ..self
        }
    }

    /// Set a custom API base URL (for proxies or compatible services).
    pub fn with_base_url(self, url: impl Into<String>) -> Self {
        Self {
            base_url: Some(url.into()),
            ..self
        }
    }

    /// Have the completion client log request and response bodies.
    pub fn with_verbose(self, verbose: bool) -> Self {
        Self { verbose, ..self }
    }

    /// Check credentials and resolve the model.
    pub fn validate(self) -> Result<RedactorConfig, ConfigError> {
        let (Some(api_key), Some(organization)) = (self.api_key, self.organization) else {
            return Err(ConfigError::MissingCredentials);
        };

        let credentials = ApiCredentials {
            api_key,
            organization,
        };
        if !credentials.is_complete() {
            return Err(ConfigError::MissingCredentials);
        }

        let model = self
            .model
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(RedactorConfig {
            credentials,
            model,
            base_url: self.base_url,
            verbose: self.verbose,
        })
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        other => Err(ConfigError::Environment(format!(
            "{} must be true or false, got `{}`",
            name, other
        ))),
    }
}

/// Validated, read-only configuration owned by a `Redactor`.
#[derive(Debug, Clone)]
pub struct RedactorConfig {
    credentials: ApiCredentials,
    model: String,
    base_url: Option<String>,
    verbose: bool,
}

impl RedactorConfig {
    pub fn credentials(&self) -> &ApiCredentials {
        &self.credentials
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}
