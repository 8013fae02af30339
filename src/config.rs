use std::path::PathBuf;
use thiserror::Error;

use crate::storage::DEFAULT_REGION;

pub const REGION_VAR: &str = "S3_LAB_REGION";
pub const AWS_REGION_VAR: &str = "AWS_REGION";
pub const VERBOSE_VAR: &str = "S3_LAB_VERBOSE";
pub const WORK_DIR_VAR: &str = "S3_LAB_WORK_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: '{value}' is not a verbosity level (0-255)")]
    InvalidVerbosity { var: &'static str, value: String },
}

/// Runtime settings for the lab, resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabConfig {
    pub region: String,
    /// 0 = normal, 1 = info, 2+ = debug
    pub verbosity: u8,
    /// Where the demo writes its sample files
    pub work_dir: PathBuf,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            verbosity: 1,
            work_dir: PathBuf::from("."),
        }
    }
}

impl LabConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let region = get(REGION_VAR)
            .or_else(|| get(AWS_REGION_VAR))
            .map(|r| r.trim().to_string())
            .unwrap_or(defaults.region);

        let verbosity = match get(VERBOSE_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u8>()
                .map_err(|_| ConfigError::InvalidVerbosity {
                    var: VERBOSE_VAR,
                    value: raw.clone(),
                })?,
            None => defaults.verbosity,
        };

        let work_dir = get(WORK_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or(defaults.work_dir);

        Ok(Self {
            region,
            verbosity,
            work_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let cfg = LabConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, LabConfig::default());
        assert_eq!(cfg.region, "us-east-1");
    }

    #[test]
    fn lab_region_wins_over_aws_region() {
        let cfg = LabConfig::from_lookup(lookup(&[
            (REGION_VAR, "eu-west-1"),
            (AWS_REGION_VAR, "us-west-2"),
        ]))
        .unwrap();
        assert_eq!(cfg.region, "eu-west-1");

        let cfg = LabConfig::from_lookup(lookup(&[
            (REGION_VAR, " "),
            (AWS_REGION_VAR, "us-west-2"),
        ]))
        .unwrap();
        assert_eq!(cfg.region, "us-west-2");
    }

    #[test]
    fn verbosity_and_work_dir() {
        let cfg = LabConfig::from_lookup(lookup(&[
            (VERBOSE_VAR, "2"),
            (WORK_DIR_VAR, "/tmp/lab"),
        ]))
        .unwrap();
        assert_eq!(cfg.verbosity, 2);
        assert_eq!(cfg.work_dir, PathBuf::from("/tmp/lab"));
    }

    #[test]
    fn bad_verbosity_is_rejected() {
        let err = LabConfig::from_lookup(lookup(&[(VERBOSE_VAR, "loud")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVerbosity { ref value, .. } if value == "loud"));
    }
}
