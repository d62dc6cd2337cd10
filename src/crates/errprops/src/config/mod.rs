//! Configuration
//!
//! The only tunable is how [`crate::Traced`] captures stack traces. The
//! process-wide configuration is read from the environment on first use:
//!
//! | Variable | Values | Default |
//! |---|---|---|
//! | `ERRPROPS_CAPTURE` | `always`, `env`, `never` | `env` |
//!
//! `env` defers to the standard `RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`
//! variables. An invalid value is logged and the default is used.
//!
//! A program that wants a fixed policy installs it before the first error is
//! created:
//!
//! ```rust,ignore
//! use errprops::config::{self, CaptureMode, ErrPropsConfig};
//!
//! config::set_global(ErrPropsConfig::new().with_capture(CaptureMode::Always))?;
//! ```

mod builder;
mod env;

pub use builder::ConfigBuilder;
pub use env::{build_env_key, get_env, get_env_parse};

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{ErrPropsError, Result};

/// Prefix of the environment variables read by [`global`].
pub const ENV_PREFIX: &str = "ERRPROPS_";

/// When to capture a stack trace for a new [`crate::Traced`] error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    /// Always capture.
    Always,
    /// Capture when `RUST_BACKTRACE` / `RUST_LIB_BACKTRACE` ask for it.
    #[default]
    Env,
    /// Never capture.
    Never,
}

impl FromStr for CaptureMode {
    type Err = ErrPropsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "always" | "1" | "true" | "on" => Ok(Self::Always),
            "env" | "auto" => Ok(Self::Env),
            "never" | "0" | "false" | "off" => Ok(Self::Never),
            other => Err(ErrPropsError::Config(format!(
                "unknown capture mode '{}', expected always, env or never",
                other
            ))),
        }
    }
}

impl fmt::Display for CaptureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Always => "always",
            Self::Env => "env",
            Self::Never => "never",
        };
        f.write_str(name)
    }
}

/// Library configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrPropsConfig {
    /// Stack trace capture policy; `None` means [`CaptureMode::Env`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture: Option<CaptureMode>,
}

impl ErrPropsConfig {
    /// Create a configuration with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the capture mode.
    pub fn with_capture(mut self, mode: CaptureMode) -> Self {
        self.capture = Some(mode);
        self
    }

    /// The effective capture mode.
    pub fn capture_mode(&self) -> CaptureMode {
        self.capture.unwrap_or_default()
    }
}

impl ConfigBuilder for ErrPropsConfig {
    fn from_env(prefix: &str) -> Result<Self> {
        Ok(Self {
            capture: get_env_parse(&build_env_key(prefix, "capture"))?,
        })
    }

    fn merge(&mut self, other: Self) -> &mut Self {
        if self.capture.is_none() {
            self.capture = other.capture;
        }
        self
    }
}

static GLOBAL: OnceLock<ErrPropsConfig> = OnceLock::new();

/// The process-wide configuration.
///
/// Loaded from the environment on first call.
pub fn global() -> &'static ErrPropsConfig {
    GLOBAL.get_or_init(|| match ErrPropsConfig::from_env_with_defaults(ENV_PREFIX) {
        Ok(config) => {
            debug!(capture = %config.capture_mode(), "loaded errprops configuration");
            config
        }
        Err(e) => {
            warn!(error = %e, "invalid errprops configuration in environment, using defaults");
            ErrPropsConfig::default()
        }
    })
}

/// Install the process-wide configuration.
///
/// Fails if the configuration is invalid or if [`global`] was already
/// initialized, either by an earlier call or by a first use.
pub fn set_global(config: ErrPropsConfig) -> Result<()> {
    config.validate()?;
    let capture = config.capture_mode();
    GLOBAL
        .set(config)
        .map_err(|_| ErrPropsError::Config("global configuration already initialized".into()))?;
    debug!(capture = %capture, "installed errprops configuration");
    Ok(())
}
