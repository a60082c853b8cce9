//! Environment-driven server configuration.
//!
//! Listener and session toggles arrive through the environment and are
//! resolved in one place, away from the Actix wiring. Debug builds paper
//! over gaps with warnings and development defaults; release builds treat
//! every gap as fatal.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
const BIND_ADDR_ENV: &str = "BIND_ADDR";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";
const BIND_ADDR_EXPECTED: &str = "a host:port socket address";

/// Build mode steering how lenient configuration parsing is.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Tolerates absent toggles and substitutes development defaults.
    Debug,
    /// Demands an explicit, valid value for every toggle.
    Release,
}

impl BuildMode {
    /// Derive the mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        self == Self::Debug
    }
}

/// Cookie-session material and policy resolved from the environment.
pub struct SessionSettings {
    /// Key the session cookies are signed and encrypted with.
    pub key: Key,
    /// Marks session cookies `Secure` when set.
    pub cookie_secure: bool,
    /// `SameSite` policy applied to session cookies.
    pub same_site: SameSite,
}

/// Everything the server needs to bind a listener and sign sessions.
pub struct ServerSettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Cookie session settings.
    pub session: SessionSettings,
}

/// Rejected configuration states.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A toggle the current build mode insists on was absent.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A toggle was present but failed to parse.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The session key file could not be read.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file holds fewer bytes than release builds accept.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// `SameSite=None` cookies must also be `Secure`.
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    /// Throwaway session keys are confined to debug builds.
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Resolve the full server configuration.
///
/// # Examples
///
/// ```rust
/// use booking_backend::config::{server_settings_from_env, BuildMode};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("booking-session-key-example");
/// std::fs::write(&key_path, vec![b'a'; 64])?;
///
/// let key_path = key_path.to_str().expect("valid path").to_string();
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "BIND_ADDR" => Some("0.0.0.0:9090".to_string()),
///     "SESSION_KEY_FILE" => Some(key_path.clone()),
///     "SESSION_COOKIE_SECURE" => Some("1".to_string()),
///     "SESSION_SAMESITE" => Some("Strict".to_string()),
///     "SESSION_ALLOW_EPHEMERAL" => Some("0".to_string()),
///     _ => None,
/// });
///
/// let settings = server_settings_from_env(&env, BuildMode::Release)?;
/// assert_eq!(settings.bind_addr.port(), 9090);
/// assert!(settings.session.cookie_secure);
/// # Ok(())
/// # }
/// ```
pub fn server_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<ServerSettings, ConfigError> {
    Ok(ServerSettings {
        bind_addr: bind_addr_from_env(env, mode)?,
        session: session_settings_from_env(env, mode)?,
    })
}

/// Resolve only the session portion of the configuration.
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, ConfigError> {
    let cookie_secure = cookie_secure_from_env(env, mode)?;
    let same_site = same_site_from_env(env, mode, cookie_secure)?;
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;
    Ok(SessionSettings {
        key: session_key_from_env(env, mode, allow_ephemeral)?,
        cookie_secure,
        same_site,
    })
}

/// Debug builds log `note` and continue with `default`; release builds fail
/// with `strict`.
fn or_debug_default<T>(
    mode: BuildMode,
    default: T,
    note: impl std::fmt::Display,
    strict: ConfigError,
) -> Result<T, ConfigError> {
    if mode.is_debug() {
        warn!(%note, "substituting a debug default");
        Ok(default)
    } else {
        Err(strict)
    }
}

fn bind_addr_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<SocketAddr, ConfigError> {
    let loopback = SocketAddr::from(([127, 0, 0, 1], 8080));
    let Some(raw) = env.string(BIND_ADDR_ENV) else {
        return or_debug_default(
            mode,
            loopback,
            format!("{BIND_ADDR_ENV} not set"),
            ConfigError::MissingEnv {
                name: BIND_ADDR_ENV,
            },
        );
    };
    match raw.parse() {
        Ok(addr) => Ok(addr),
        Err(_) => or_debug_default(
            mode,
            loopback,
            format!("unparseable {BIND_ADDR_ENV}={raw}"),
            ConfigError::InvalidEnv {
                name: BIND_ADDR_ENV,
                value: raw,
                expected: BIND_ADDR_EXPECTED,
            },
        ),
    }
}

fn cookie_secure_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, ConfigError> {
    let Some(raw) = env.string(COOKIE_SECURE_ENV) else {
        return or_debug_default(
            mode,
            true,
            format!("{COOKIE_SECURE_ENV} not set"),
            ConfigError::MissingEnv {
                name: COOKIE_SECURE_ENV,
            },
        );
    };
    match parse_bool(&raw) {
        Some(flag) => Ok(flag),
        None => or_debug_default(
            mode,
            true,
            format!("unparseable {COOKIE_SECURE_ENV}={raw}"),
            ConfigError::InvalidEnv {
                name: COOKIE_SECURE_ENV,
                value: raw,
                expected: BOOL_EXPECTED,
            },
        ),
    }
}

fn same_site_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, ConfigError> {
    let lenient_default = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    let Some(raw) = env.string(SAMESITE_ENV) else {
        return or_debug_default(
            mode,
            lenient_default,
            format!("{SAMESITE_ENV} not set"),
            ConfigError::MissingEnv { name: SAMESITE_ENV },
        );
    };
    let Some(policy) = parse_same_site(&raw) else {
        return or_debug_default(
            mode,
            lenient_default,
            format!("unparseable {SAMESITE_ENV}={raw}"),
            ConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value: raw,
                expected: SAMESITE_EXPECTED,
            },
        );
    };
    if matches!(policy, SameSite::None) && !cookie_secure {
        if !mode.is_debug() {
            return Err(ConfigError::InsecureSameSiteNone);
        }
        warn!("SameSite=None over an insecure cookie; browsers may drop it");
    }
    Ok(policy)
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, ConfigError> {
    let Some(raw) = env.string(ALLOW_EPHEMERAL_ENV) else {
        return or_debug_default(
            mode,
            false,
            format!("{ALLOW_EPHEMERAL_ENV} not set"),
            ConfigError::MissingEnv {
                name: ALLOW_EPHEMERAL_ENV,
            },
        );
    };
    match parse_bool(&raw) {
        Some(true) if !mode.is_debug() => Err(ConfigError::EphemeralNotAllowed),
        Some(enabled) => Ok(enabled),
        None => or_debug_default(
            mode,
            false,
            format!("unparseable {ALLOW_EPHEMERAL_ENV}={raw}"),
            ConfigError::InvalidEnv {
                name: ALLOW_EPHEMERAL_ENV,
                value: raw,
                expected: BOOL_EXPECTED,
            },
        ),
    }
}

fn session_key_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, ConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_string()),
    );

    let mut bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(source) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %source,
                "session key unreadable; generating a throwaway key"
            );
            return Ok(Key::generate());
        }
        Err(source) => return Err(ConfigError::KeyRead { path, source }),
    };

    if mode == BuildMode::Release && bytes.len() < SESSION_KEY_MIN_LEN {
        let length = bytes.len();
        bytes.zeroize();
        return Err(ConfigError::KeyTooShort {
            path,
            length,
            min_len: SESSION_KEY_MIN_LEN,
        });
    }
    let key = Key::derive_from(&bytes);
    bytes.zeroize();
    Ok(key)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_same_site(value: &str) -> Option<SameSite> {
    match value.to_ascii_lowercase().as_str() {
        "lax" => Some(SameSite::Lax),
        "strict" => Some(SameSite::Strict),
        "none" => Some(SameSite::None),
        _ => None,
    }
}
