// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/
//
// Copyright 2025 Oxide Computer Company

//! Configuration for `pmadm`.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use common::logging::LogFormat;
use platform_mapping::Platform;

/// The run-time settings of the tool. These start out at their defaults, are
/// updated from a config file if one is named, and are finally overridden by
/// any options given on the command line.
#[derive(Debug, PartialEq)]
pub struct Config {
    /// If set, where the log should be written. If not set, the log goes to
    /// stderr.
    pub log_file: Option<String>,

    /// Output log info in unstructured text or json?
    pub log_format: LogFormat,

    /// Which platform's mapping to operate on.
    pub platform: Platform,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_file: None,
            log_format: LogFormat::Human,
            platform: Platform::default(),
        }
    }
}

// The contents of a config file. Every setting is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    log_file: Option<String>,
    log_format: Option<LogFormat>,
    platform: Option<Platform>,
}

impl Config {
    /// Apply the settings found in a TOML document.
    pub fn update_from_toml(&mut self, txt: &str) -> anyhow::Result<()> {
        let file: ConfigFile =
            toml::from_str(txt).context("failed to parse TOML")?;

        if let Some(log_file) = file.log_file {
            self.log_file = Some(log_file);
        }
        if let Some(log_format) = file.log_format {
            self.log_format = log_format;
        }
        if let Some(platform) = file.platform {
            self.platform = platform;
        }
        Ok(())
    }

    /// Apply the settings found in the config file at `path`.
    pub fn update_from_file(&mut self, path: &Path) -> anyhow::Result<()> {
        let txt = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        self.update_from_toml(&txt)
            .with_context(|| format!("loading config {}", path.display()))
    }

    // Use the command-line arguments to update the run-time config.
    pub fn update_from_cli(&mut self, opts: &crate::GlobalOpts) {
        if let Some(log_file) = &opts.log_file {
            self.log_file = Some(log_file.to_string());
        }

        if let Some(log_format) = opts.log_format {
            self.log_format = log_format;
        }

        if let Some(platform) = opts.platform {
            self.platform = platform;
        }
    }
}

/// Build the config from the defaults, the config file if one was given, and
/// then the command line.
pub fn build_config(opts: &crate::GlobalOpts) -> anyhow::Result<Config> {
    let mut config = Config::default();
    if let Some(path) = &opts.config {
        config.update_from_file(path)?;
    }
    config.update_from_cli(opts);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::build_config;
    use super::Config;
    use crate::GlobalOpts;
    use common::logging::LogFormat;
    use platform_mapping::Platform;
    use pretty_assertions::assert_eq;
    use structopt::StructOpt;

    #[test]
    fn defaults() {
        let opts = GlobalOpts::from_iter(["pmadm", "chips"]);
        assert_eq!(build_config(&opts).unwrap(), Config::default());
    }

    #[test]
    fn toml_settings_apply() {
        let mut config = Config::default();
        config
            .update_from_toml(
                r#"
                log_file = "/var/tmp/pmadm.log"
                log_format = "json"
                platform = "lassen"
                "#,
            )
            .unwrap();
        assert_eq!(
            config,
            Config {
                log_file: Some(String::from("/var/tmp/pmadm.log")),
                log_format: LogFormat::Json,
                platform: Platform::Lassen,
            }
        );
    }

    #[test]
    fn empty_toml_changes_nothing() {
        let mut config = Config::default();
        config.update_from_toml("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn bad_toml_is_refused() {
        let mut config = Config::default();
        assert!(config.update_from_toml("log_format = \"xml\"").is_err());
        assert!(config.update_from_toml("colour = true").is_err());
        assert!(config.update_from_toml("platform = \"sidecar\"").is_err());
    }

    #[test]
    fn command_line_wins() {
        let mut config = Config::default();
        config.update_from_toml("log_format = \"json\"").unwrap();
        let opts = GlobalOpts::from_iter([
            "pmadm",
            "--log-format",
            "human",
            "--log-file",
            "/tmp/x.log",
            "chips",
        ]);
        config.update_from_cli(&opts);
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.log_file.as_deref(), Some("/tmp/x.log"));
    }

    #[test]
    fn missing_file_is_reported() {
        let opts = GlobalOpts::from_iter([
            "pmadm",
            "--config",
            "/nonexistent/pmadm.toml",
            "chips",
        ]);
        let err = build_config(&opts).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/pmadm.toml"));
    }
}
