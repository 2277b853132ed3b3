/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Process configuration.
//!
//! Values are read from the environment (see [`Config::from_env`]),
//! or from YAML (see [`Config::from_yaml`]). Keys missing from either
//! source keep their defaults. [`global`] is the process-wide
//! snapshot taken from the environment on first use.
//!
//! | Variable               | Field                 | Default                 |
//! |------------------------|-----------------------|-------------------------|
//! | `NDFACTOR_TIMERS`      | `timers_enabled`      | `false`                 |
//! | `NDFACTOR_PARALLELISM` | `default_parallelism` | available parallelism   |
//! | `NDFACTOR_LOG`         | `log_level`           | `"info"`                |

use std::env;
use std::str::FromStr;
use std::sync::LazyLock;
use std::thread;

use serde::Deserialize;
use serde::Serialize;

/// Environment variable enabling scoped logging timers.
pub const TIMERS_ENV: &str = "NDFACTOR_TIMERS";
/// Environment variable setting the default thread pool size.
pub const PARALLELISM_ENV: &str = "NDFACTOR_PARALLELISM";
/// Environment variable setting the default log filter.
pub const LOG_ENV: &str = "NDFACTOR_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Whether [`scoped_logging_timer!`](crate::scoped_logging_timer)
    /// timers are enabled.
    pub timers_enabled: bool,
    /// Number of threads used when no parallelism is requested.
    pub default_parallelism: usize,
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timers_enabled: false,
            default_parallelism: thread::available_parallelism().map_or(1, |n| n.get()),
            log_level: "info".to_string(),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_parallelism(value: &str) -> Option<usize> {
    usize::from_str(value.trim()).ok().filter(|&n| n >= 1)
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration from `lookup`, which maps variable names
    /// to values. Unparsable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(value) = lookup(TIMERS_ENV) {
            match parse_bool(&value) {
                Some(enabled) => config.timers_enabled = enabled,
                None => tracing::error!(
                    "failed to parse ${} from value \"{}\": expected a boolean",
                    TIMERS_ENV,
                    value
                ),
            }
        }
        if let Some(value) = lookup(PARALLELISM_ENV) {
            match parse_parallelism(&value) {
                Some(parallelism) => config.default_parallelism = parallelism,
                None => tracing::error!(
                    "failed to parse ${} from value \"{}\": expected a positive integer",
                    PARALLELISM_ENV,
                    value
                ),
            }
        }
        if let Some(value) = lookup(LOG_ENV) {
            config.log_level = value;
        }

        config
    }

    /// Parses configuration from a YAML document.
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        if config.default_parallelism == 0 {
            anyhow::bail!("default_parallelism must be at least 1");
        }
        Ok(config)
    }

    /// Serializes this configuration to YAML.
    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

static GLOBAL: LazyLock<Config> = LazyLock::new(Config::from_env);

/// The process-wide configuration, read from the environment on
/// first use.
pub fn global() -> &'static Config {
    &GLOBAL
}
