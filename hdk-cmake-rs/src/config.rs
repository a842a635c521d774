//! Tool configuration.
//!
//! Defaults target Houdini 18.5 with the Visual Studio 2017 generator. Each
//! value can be overridden at startup through an `HDK_CMAKE_*` environment
//! variable. Nothing is persisted between runs.

use std::time::Duration;
use thiserror::Error;

/// Houdini version the tool builds against.
pub const DEFAULT_HOUDINI_VERSION: &str = "18.5.696";

/// Environment variable carrying the host install root into CMake.
pub const HOST_ROOT_VAR: &str = "HFS";

/// Runtime configuration for path lookup and the CMake invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    /// Houdini version string (e.g. "18.5.696")
    pub houdini_version: String,

    /// CMake executable, resolved through PATH when not absolute
    pub cmake_program: String,

    /// Value passed to `-G`
    pub generator: String,

    /// Value passed to `-A`
    pub architecture: String,

    /// Pause between moving the user environment aside and starting CMake
    pub settle_delay: Duration,

    /// Name of the variable injected into the child environment
    pub host_root_var: String,
}

/// Configuration error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must not be empty")]
    Empty { var: &'static str },

    #[error("{var} must be a whole number of milliseconds, got {value:?}")]
    InvalidDelay { var: &'static str, value: String },
}

impl ToolConfig {
    pub const VERSION_VAR: &'static str = "HDK_CMAKE_HOUDINI_VERSION";
    pub const PROGRAM_VAR: &'static str = "HDK_CMAKE_PROGRAM";
    pub const GENERATOR_VAR: &'static str = "HDK_CMAKE_GENERATOR";
    pub const ARCH_VAR: &'static str = "HDK_CMAKE_ARCH";
    pub const SETTLE_VAR: &'static str = "HDK_CMAKE_SETTLE_MS";

    /// Load the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration using `lookup` to read overrides.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(version) = lookup(Self::VERSION_VAR) {
            config.houdini_version = non_empty(Self::VERSION_VAR, version)?;
        }
        if let Some(program) = lookup(Self::PROGRAM_VAR) {
            config.cmake_program = non_empty(Self::PROGRAM_VAR, program)?;
        }
        if let Some(generator) = lookup(Self::GENERATOR_VAR) {
            config.generator = non_empty(Self::GENERATOR_VAR, generator)?;
        }
        if let Some(arch) = lookup(Self::ARCH_VAR) {
            config.architecture = non_empty(Self::ARCH_VAR, arch)?;
        }
        if let Some(raw) = lookup(Self::SETTLE_VAR) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidDelay {
                    var: Self::SETTLE_VAR,
                    value: raw.clone(),
                })?;
            config.settle_delay = Duration::from_millis(millis);
        }

        Ok(config)
    }

    /// Arguments passed to CMake, ending with the source directory.
    pub fn cmake_args(&self) -> Vec<String> {
        vec![
            "-G".to_string(),
            self.generator.clone(),
            "-A".to_string(),
            self.architecture.clone(),
            "..".to_string(),
        ]
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            houdini_version: DEFAULT_HOUDINI_VERSION.to_string(),
            cmake_program: "cmake".to_string(),
            generator: "Visual Studio 15 2017".to_string(),
            architecture: "x64".to_string(),
            settle_delay: Duration::from_secs(2),
            host_root_var: HOST_ROOT_VAR.to_string(),
        }
    }
}

fn non_empty(var: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ConfigError::Empty { var })
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_overrides() {
        let config = ToolConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ToolConfig::default());
        assert_eq!(config.houdini_version, "18.5.696");
        assert_eq!(config.settle_delay, Duration::from_secs(2));
        assert_eq!(config.host_root_var, "HFS");
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = ToolConfig::from_lookup(lookup_from(&[
            (ToolConfig::VERSION_VAR, "19.0.383"),
            (ToolConfig::GENERATOR_VAR, "Ninja"),
            (ToolConfig::SETTLE_VAR, " 250 "),
        ]))
        .unwrap();

        assert_eq!(config.houdini_version, "19.0.383");
        assert_eq!(config.generator, "Ninja");
        assert_eq!(config.settle_delay, Duration::from_millis(250));
        assert_eq!(config.cmake_program, "cmake");
    }

    #[test]
    fn test_invalid_delay_is_rejected() {
        let err = ToolConfig::from_lookup(lookup_from(&[(ToolConfig::SETTLE_VAR, "soon")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidDelay {
                var: ToolConfig::SETTLE_VAR,
                value: "soon".to_string()
            }
        );
    }

    #[test]
    fn test_blank_override_is_rejected() {
        let err =
            ToolConfig::from_lookup(lookup_from(&[(ToolConfig::PROGRAM_VAR, "  ")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Empty {
                var: ToolConfig::PROGRAM_VAR
            }
        );
    }

    #[test]
    fn test_cmake_args_end_with_parent_source_dir() {
        let args = ToolConfig::default().cmake_args();
        assert_eq!(args, ["-G", "Visual Studio 15 2017", "-A", "x64", ".."]);
    }
}
