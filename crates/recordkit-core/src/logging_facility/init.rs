//! Subscriber installation for hosts embedding the engines
//!
//! The engines only emit events; nothing is printed until the host installs
//! a subscriber, either its own or one from [`init`]. Verbosity comes from
//! the `RECORDKIT_LOG` environment variable (an `EnvFilter` directive) and
//! falls back to the profile's default.

use std::sync::OnceLock;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive.
pub const LOG_ENV_VAR: &str = "RECORDKIT_LOG";

/// Output format of the installed subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines; engine internals (correlation, resolver
    /// decisions) at debug level
    Development,
    /// One JSON object per event; operation boundaries only
    Production,
}

impl Profile {
    /// Filter directive used when `RECORDKIT_LOG` is unset or invalid.
    pub fn default_directive(self) -> &'static str {
        match self {
            Profile::Development => "recordkit_core=debug",
            Profile::Production => "recordkit_core=info",
        }
    }

    fn filter(self) -> EnvFilter {
        EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Install the global subscriber for `profile`
///
/// Only the first call has an effect. Returns whether that call installed
/// the subscriber; `false` means the host already owned the global
/// subscriber and it was left in place.
///
/// # Example
///
/// ```
/// use recordkit_core::logging_facility::{init, Profile};
///
/// let installed = init(Profile::Development);
/// assert_eq!(init(Profile::Production), installed);
/// ```
pub fn init(profile: Profile) -> bool {
    *INSTALLED.get_or_init(|| match profile {
        Profile::Development => tracing_subscriber::fmt()
            .with_env_filter(profile.filter())
            .with_target(false)
            .finish()
            .try_init()
            .is_ok(),
        Profile::Production => tracing_subscriber::fmt()
            .json()
            .with_env_filter(profile.filter())
            .finish()
            .try_init()
            .is_ok(),
    })
}
