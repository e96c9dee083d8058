//! Token signing secret configuration.
//!
//! Centralises the environment-driven signing-secret settings so they are
//! validated consistently and can be tested in isolation. The secret feeds
//! [`crate::domain::TokenAuthority`]; only a fingerprint of it ever reaches
//! the logs.

use std::fmt;
use std::path::PathBuf;

use mockable::Env;
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::Zeroizing;

const SECRET_FILE_ENV: &str = "TOKEN_SECRET_FILE";
const ALLOW_EPHEMERAL_ENV: &str = "TOKEN_ALLOW_EPHEMERAL";
const SECRET_DEFAULT_PATH: &str = "/var/run/secrets/token_secret";
const SECRET_MIN_LEN: usize = 32;
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const FINGERPRINT_BYTES: usize = 8;

/// Build mode for signing-secret validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds may fall back to a generated in-memory secret.
    Debug,
    /// Release builds require real key material on disk.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use instruplay_backend::inbound::http::token_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// HS256 signing secret, wiped from memory when dropped.
pub struct TokenSecret {
    bytes: Zeroizing<Vec<u8>>,
}

impl TokenSecret {
    fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Zeroizing::new(bytes),
        }
    }

    fn ephemeral() -> Self {
        let mut bytes = vec![0u8; SECRET_MIN_LEN * 2];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self::from_bytes(bytes)
    }

    /// Raw secret bytes for key derivation.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Truncated SHA-256 fingerprint of the secret.
    ///
    /// The first 8 bytes of the hash as a 16-character hex string, enough to
    /// tell keys apart in startup logs and rotation runbooks without
    /// exposing the key material itself.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.as_bytes());
        hex::encode(&digest[..FINGERPRINT_BYTES])
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSecret")
            .field("fingerprint", &self.fingerprint())
            .finish_non_exhaustive()
    }
}

/// Errors raised while validating signing-secret configuration.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the secret file failed.
    #[error("failed to read token secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The secret file exists but is too short to sign with.
    #[error("token secret at {path} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// Release builds must not run on a generated secret.
    #[error("TOKEN_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Load the signing secret from environment configuration.
///
/// Reads the file named by `TOKEN_SECRET_FILE` (default
/// `/var/run/secrets/token_secret`). A missing file is only tolerated in
/// debug builds with `TOKEN_ALLOW_EPHEMERAL=1`, in which case a throwaway
/// secret is generated and every previously issued token stops verifying on
/// restart.
///
/// # Examples
///
/// ```rust
/// use instruplay_backend::inbound::http::token_config::{
///     BuildMode, token_secret_from_env,
/// };
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let secret_path = std::env::temp_dir().join("token_secret_example");
/// std::fs::write(&secret_path, vec![b'a'; 32])?;
///
/// let secret_path = secret_path.to_str().expect("valid path").to_string();
/// let cleanup = secret_path.clone();
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "TOKEN_SECRET_FILE" => Some(secret_path.clone()),
///     _ => None,
/// });
///
/// let secret = token_secret_from_env(&env, BuildMode::Release)?;
/// assert_eq!(secret.fingerprint().len(), 16);
///
/// std::fs::remove_file(&cleanup)?;
/// # Ok(())
/// # }
/// ```
pub fn token_secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSecret, TokenConfigError> {
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;
    secret_from_file(env, allow_ephemeral)
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, TokenConfigError> {
    let Some(value) = env.string(ALLOW_EPHEMERAL_ENV) else {
        return Ok(false);
    };
    match parse_bool(&value) {
        Some(true) => {
            if mode.is_debug() {
                Ok(true)
            } else {
                Err(TokenConfigError::EphemeralNotAllowed)
            }
        }
        Some(false) => Ok(false),
        None => {
            if mode.is_debug() {
                warn!(
                    value = %value,
                    "invalid TOKEN_ALLOW_EPHEMERAL; defaulting to disabled"
                );
                Ok(false)
            } else {
                Err(TokenConfigError::InvalidEnv {
                    name: ALLOW_EPHEMERAL_ENV,
                    value,
                    expected: BOOL_EXPECTED,
                })
            }
        }
    }
}

fn secret_from_file<E: Env>(
    env: &E,
    allow_ephemeral: bool,
) -> Result<TokenSecret, TokenConfigError> {
    let path = env
        .string(SECRET_FILE_ENV)
        .unwrap_or_else(|| SECRET_DEFAULT_PATH.to_string());
    let path = PathBuf::from(path);

    match std::fs::read(&path) {
        Ok(bytes) => {
            let bytes = Zeroizing::new(bytes);
            let length = bytes.len();
            if length < SECRET_MIN_LEN {
                return Err(TokenConfigError::SecretTooShort {
                    path,
                    length,
                    min_len: SECRET_MIN_LEN,
                });
            }
            Ok(TokenSecret { bytes })
        }
        Err(error) => {
            if allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using an ephemeral token secret; issued tokens die with the process"
                );
                Ok(TokenSecret::ephemeral())
            } else {
                Err(TokenConfigError::SecretRead {
                    path,
                    source: error,
                })
            }
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "token_config_tests.rs"]
mod tests;
