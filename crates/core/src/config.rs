//! Core runtime configuration.
//!
//! Resolved once at process startup and passed into services, so request
//! handlers never read process-wide environment variables. That keeps
//! behaviour consistent across multi-threaded runtimes and test harnesses.

use std::path::{Path, PathBuf};

use crate::{CoreError, CoreResult};

/// Configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    reply_data_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if the reply data directory path is
    /// empty.
    pub fn new(reply_data_dir: PathBuf) -> CoreResult<Self> {
        if reply_data_dir.as_os_str().is_empty() {
            return Err(CoreError::InvalidInput(
                "reply_data_dir cannot be empty".into(),
            ));
        }

        Ok(Self { reply_data_dir })
    }

    /// Directory under which accepted replies are persisted.
    pub fn reply_data_dir(&self) -> &Path {
        &self.reply_data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_accepts_non_empty_dir() {
        let cfg = CoreConfig::new(PathBuf::from("reply_data")).expect("valid config");
        assert_eq!(cfg.reply_data_dir(), Path::new("reply_data"));
    }

    #[test]
    fn test_config_rejects_empty_dir() {
        let err = CoreConfig::new(PathBuf::new()).expect_err("should reject empty path");
        assert!(matches!(err, CoreError::InvalidInput(msg) if msg.contains("cannot be empty")));
    }
}
