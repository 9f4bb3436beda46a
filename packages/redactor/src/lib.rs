//! Redacts private or sensitive information from text.
//!
//! A chat model is asked to list the sensitive substrings of a text (names,
//! emails, phone numbers, locations) through a function call; each listed
//! string is then replaced literally.
//!
//! # Usage
//!
//! ```rust,ignore
//! use redactor::{Redactor, RedactorOptions, ReplacementTable};
//!
//! let redactor = Redactor::new(
//!     RedactorOptions::new()
//!         .with_api_keys(api_key, organization)
//!         .with_model("gpt-4o"),
//! )
//! .await?;
//!
//! // Fixed token
//! let redacted = redactor.redact(text, "<<<REDACTED>>>").await?;
//!
//! // Per-string replacement
//! let table = ReplacementTable::new("<<<REDACTED>>>").with("John Doe", "<<<NAME>>>");
//! let redacted = redactor.redact_func(text, |d| table.replacement(d)).await?;
//! ```
//!
//! # Modules
//!
//! - [`config`] - Options, environment loading and validation
//! - [`detect`] - Detection request and response handling
//! - [`redact`] - Literal substitution of detected strings
//! - [`service`] - Completion service trait
//! - [`testing`] - Mock completion service

pub mod config;
pub mod credentials;
pub mod detect;
pub mod error;
pub mod redact;
pub mod redactor;
pub mod service;
pub mod testing;

pub use config::{RedactorConfig, RedactorOptions, DEFAULT_MODEL};
pub use credentials::{ApiCredentials, SecretString};
pub use detect::{DetectedInfo, TOOL_NAME};
pub use error::{ConfigError, DetectionError, RedactionError};
pub use redact::{apply_redactions, ReplacementTable};
pub use redactor::Redactor;
pub use service::CompletionService;
