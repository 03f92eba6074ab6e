// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/
//
// Copyright 2025 Oxide Computer Company

//! Logger construction shared by every binary in the workspace.

use std::fmt;
use std::fs::OpenOptions;
use std::str::FromStr;

use anyhow::Context;
use serde::Deserialize;
use serde::Serialize;
use slog::Drain;

/// How log records are rendered.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Unstructured, colorless text meant for a terminal.
    Human,
    /// Bunyan-style JSON records, one per line.
    Json,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid log format '{0}', expected 'human' or 'json'")]
pub struct LogFormatError(String);

impl FromStr for LogFormat {
    type Err = LogFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "h" | "human" => Ok(LogFormat::Human),
            "j" | "json" => Ok(LogFormat::Json),
            _ => Err(LogFormatError(s.to_string())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LogFormat::Human => write!(f, "human"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

fn async_root<D>(drain: D, name: &'static str) -> slog::Logger
where
    D: Drain<Ok = (), Err = slog::Never> + Send + 'static,
{
    let drain = slog_async::Async::new(drain)
        .chan_size(0x2000)
        .build()
        .fuse();
    slog::Logger::root(drain, slog::o!("name" => name))
}

/// Build the root logger for a program.
///
/// Records go to `log_file` when one is given, and to stderr otherwise, so
/// that anything a tool prints on stdout stays machine-readable.
pub fn init(
    name: &'static str,
    log_file: &Option<String>,
    log_format: LogFormat,
) -> anyhow::Result<slog::Logger> {
    let log = match (log_file, log_format) {
        (Some(path), LogFormat::Human) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {path}"))?;
            let decorator = slog_term::PlainDecorator::new(file);
            let drain = slog_term::FullFormat::new(decorator).build().fuse();
            async_root(drain, name)
        }
        (Some(path), LogFormat::Json) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {path}"))?;
            let drain = slog_bunyan::with_name(name, file).build().fuse();
            async_root(drain, name)
        }
        (None, LogFormat::Human) => {
            let decorator = slog_term::TermDecorator::new().stderr().build();
            let drain = slog_term::FullFormat::new(decorator).build().fuse();
            async_root(drain, name)
        }
        (None, LogFormat::Json) => {
            let drain =
                slog_bunyan::with_name(name, std::io::stderr()).build().fuse();
            async_root(drain, name)
        }
    };
    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::LogFormat;

    #[test]
    fn parse_log_format() {
        assert_eq!("human".parse::<LogFormat>().unwrap(), LogFormat::Human);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("j".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for fmt in [LogFormat::Human, LogFormat::Json] {
            assert_eq!(fmt.to_string().parse::<LogFormat>().unwrap(), fmt);
        }
    }

    #[test]
    fn log_to_file() {
        let dir = std::env::temp_dir();
        let path =
            dir.join(format!("common-logging-{}.log", std::process::id()));
        let path_str = path.to_string_lossy().to_string();
        let log = super::init("test", &Some(path_str), LogFormat::Json)
            .expect("failed to build logger");
        slog::info!(log, "hello");
        drop(log);
        assert!(path.exists());
        let _ = std::fs::remove_file(path);
    }
}
