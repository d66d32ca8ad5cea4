use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use thiserror::Error;

use crate::Args;

pub const DEFAULT_INTERVAL: i64 = 30;
pub const DEFAULT_DISTANCE: i64 = 1;
/// One year, well inside what a timer deadline can hold.
pub const MAX_INTERVAL: i64 = 365 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Interval must be at least 1 second (got {0})")]
    IntervalTooSmall(i64),
    #[error("Interval must be at most 31536000 seconds (got {0})")]
    IntervalTooLarge(i64),
    #[error("Distance must be at least 1 pixel (got {0})")]
    DistanceTooSmall(i64),
    #[error("Distance must be at most 2147483647 pixels (got {0})")]
    DistanceTooLarge(i64),
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings as they appear in a json config file, every key is optional.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub interval: Option<i64>,
    pub distance: Option<i64>,
    pub verbose: Option<bool>,
}

impl FileConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Validated settings, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    interval: u64,
    distance: i32,
    verbose: bool,
}

impl Config {
    pub fn new(interval: i64, distance: i64, verbose: bool) -> Result<Self, ConfigError> {
        if interval < 1 {
            return Err(ConfigError::IntervalTooSmall(interval));
        }
        if interval > MAX_INTERVAL {
            return Err(ConfigError::IntervalTooLarge(interval));
        }
        if distance < 1 {
            return Err(ConfigError::DistanceTooSmall(distance));
        }
        let distance =
            i32::try_from(distance).map_err(|_| ConfigError::DistanceTooLarge(distance))?;

        Ok(Self {
            interval: interval as u64,
            distance,
            verbose,
        })
    }

    /// Merges command line flags over an optional config file over the defaults.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => FileConfig::load_from_file(path)?,
            None => FileConfig::default(),
        };

        Self::new(
            args.interval.or(file.interval).unwrap_or(DEFAULT_INTERVAL),
            args.distance.or(file.distance).unwrap_or(DEFAULT_DISTANCE),
            args.verbose || file.verbose.unwrap_or(false),
        )
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval
    }

    pub fn distance(&self) -> i32 {
        self.distance
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL as u64,
            distance: DEFAULT_DISTANCE as i32,
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_flags() {
        let config = Config::from_args(&Args::default()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.interval(), Duration::from_secs(30));
        assert_eq!(config.distance(), 1);
        assert!(!config.verbose());
    }

    #[test]
    fn zero_interval_is_fatal() {
        let err = Config::new(0, 1, false).unwrap_err();
        assert!(matches!(err, ConfigError::IntervalTooSmall(0)));
        assert!(err.to_string().starts_with("Interval must be at least 1 second"));
    }

    #[test]
    fn zero_distance_is_fatal() {
        let err = Config::new(30, 0, false).unwrap_err();
        assert!(matches!(err, ConfigError::DistanceTooSmall(0)));
        assert!(err.to_string().starts_with("Distance must be at least 1 pixel"));
    }

    #[test]
    fn negative_values_are_fatal() {
        assert!(matches!(
            Config::new(-5, 1, false),
            Err(ConfigError::IntervalTooSmall(-5))
        ));
        assert!(matches!(
            Config::new(1, -1, false),
            Err(ConfigError::DistanceTooSmall(-1))
        ));
    }

    #[test]
    fn distance_must_fit_a_coordinate() {
        let too_far = i32::MAX as i64 + 1;
        assert!(matches!(
            Config::new(1, too_far, false),
            Err(ConfigError::DistanceTooLarge(_))
        ));
        assert_eq!(Config::new(1, i32::MAX as i64, false).unwrap().distance(), i32::MAX);
    }

    #[test]
    fn interval_must_fit_a_timer() {
        assert!(matches!(
            Config::new(i64::MAX, 1, false),
            Err(ConfigError::IntervalTooLarge(i64::MAX))
        ));
        assert!(matches!(
            Config::new(MAX_INTERVAL + 1, 1, false),
            Err(ConfigError::IntervalTooLarge(_))
        ));
        assert_eq!(
            Config::new(MAX_INTERVAL, 1, false).unwrap().interval(),
            Duration::from_secs(31_536_000)
        );
    }

    #[test]
    fn file_values_apply() {
        let file = config_file(r#"{ "interval": 60, "distance": 5, "verbose": true }"#);
        let args = Args {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };

        let config = Config::from_args(&args).unwrap();
        assert_eq!(config.interval_secs(), 60);
        assert_eq!(config.distance(), 5);
        assert!(config.verbose());
    }

    #[test]
    fn flags_override_file() {
        let file = config_file(r#"{ "interval": 60, "distance": 5 }"#);
        let args = Args {
            interval: Some(10),
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };

        let config = Config::from_args(&args).unwrap();
        assert_eq!(config.interval_secs(), 10);
        assert_eq!(config.distance(), 5);
        assert!(!config.verbose());
    }

    #[test]
    fn file_values_are_validated() {
        let file = config_file(r#"{ "distance": 0 }"#);
        let args = Args {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };

        assert!(matches!(
            Config::from_args(&args),
            Err(ConfigError::DistanceTooSmall(0))
        ));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let file = config_file(r#"{ "interval": "soon" }"#);
        assert!(matches!(
            FileConfig::load_from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));

        let file = config_file(r#"{ "speed": 3 }"#);
        assert!(matches!(
            FileConfig::load_from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            FileConfig::load_from_file(dir.path().join("nope.json")),
            Err(ConfigError::Read { .. })
        ));
    }
}
