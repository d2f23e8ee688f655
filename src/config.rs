use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::gains::{ControllerGains, GainsProvider, StaticGains};

/// Conventional tuning-file location, relative to the working directory of
/// the deployed control process.
pub const DEFAULT_PATH: &str = "gains.toml";

/// Failure to obtain gains from a configuration source.
///
/// There is no default-gain fallback: a broken tuning file surfaces here
/// and the caller decides whether to retry, abort the loop, or substitute
/// its own safe values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read gains file `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse gains file `{path}`")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("gain `{name}` must be finite and non-negative, got {value}")]
    InvalidGain { name: &'static str, value: f32 },
}

/// Gains provider backed by a TOML tuning file.
///
/// The file holds exactly the three gains:
///
/// ```toml
/// kp = 6.0
/// ki = 0.2
/// kd = 2.5
/// ```
///
/// Every [`gains`](GainsProvider::gains) call re-reads the file, so edits
/// take effect on the next control tick. Callers that do not want IO per
/// tick take a [`snapshot`](FileGains::snapshot) once instead.
#[derive(Clone, Debug)]
pub struct FileGains {
    path: PathBuf,
}

impl FileGains {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file once and freeze the result into a [`StaticGains`].
    pub fn snapshot(&self) -> Result<StaticGains, ConfigError> {
        self.load().map(StaticGains::from)
    }

    fn load(&self) -> Result<ControllerGains, ConfigError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;
        let gains: ControllerGains =
            toml::from_str(&text).map_err(|source| ConfigError::Parse {
                path: self.path.clone(),
                source,
            })?;
        let gains = gains.validated()?;

        debug!(
            "loaded gains from `{}`: kp={} ki={} kd={}",
            self.path.display(),
            gains.kp,
            gains.ki,
            gains.kd
        );

        Ok(gains)
    }
}

impl Default for FileGains {
    fn default() -> Self {
        Self::new(DEFAULT_PATH)
    }
}

impl GainsProvider for FileGains {
    fn gains(&self) -> Result<ControllerGains, ConfigError> {
        self.load()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use approx::assert_relative_eq;

    use super::{ConfigError, FileGains};
    use crate::gains::GainsProvider;

    fn write_gains(name: &str, text: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "lane-control-{}-{name}.toml",
            std::process::id()
        ));
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn loads_a_valid_file() {
        let path = write_gains("valid", "kp = 6.0\nki = 0.2\nkd = 2.5\n");
        let gains = FileGains::new(&path).gains().unwrap();

        assert_relative_eq!(gains.kp, 6.0);
        assert_relative_eq!(gains.ki, 0.2);
        assert_relative_eq!(gains.kd, 2.5);
    }

    #[test]
    fn snapshot_matches_a_direct_read() {
        let path = write_gains("snapshot", "kp = 4.0\nki = 0.1\nkd = 2.0\n");
        let file = FileGains::new(&path);

        assert_eq!(
            file.snapshot().unwrap().gains().unwrap(),
            file.gains().unwrap()
        );
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = FileGains::new("/nonexistent/gains.toml").gains().unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn missing_key_is_a_parse_error() {
        let path = write_gains("missing-key", "kp = 6.0\nki = 0.2\n");
        let err = FileGains::new(&path).gains().unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn non_numeric_value_is_a_parse_error() {
        let path = write_gains("non-numeric", "kp = \"fast\"\nki = 0.2\nkd = 2.5\n");
        let err = FileGains::new(&path).gains().unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn negative_gain_is_rejected() {
        let path = write_gains("negative", "kp = -6.0\nki = 0.2\nkd = 2.5\n");
        let err = FileGains::new(&path).gains().unwrap_err();

        assert!(matches!(err, ConfigError::InvalidGain { name: "kp", .. }));
    }
}
