// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/
//
// Copyright 2025 Oxide Computer Company

use std::io::stdout;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use slog::debug;
use slog::o;
use structopt::*;

use common::logging::LogFormat;
use platform_mapping::Platform;
use platform_mapping::PlatformMapping;
use platform_mapping::PortProfileId;

mod config;
mod inventory;
mod ports;
mod tuning;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "pmadm",
    about = "inspect the port mappings and lane tuning of a switch platform"
)]
pub(crate) struct GlobalOpts {
    #[structopt(
        long,
        help = "platform whose mapping to use (default: lassen)"
    )]
    platform: Option<Platform>,

    #[structopt(long, help = "TOML file providing default settings")]
    config: Option<PathBuf>,

    #[structopt(
        long,
        help = "send log data to the named file rather than stderr"
    )]
    log_file: Option<String>,

    #[structopt(
        long,
        short = "l",
        help = "format logs for 'human' or 'json' consumption"
    )]
    log_format: Option<LogFormat>,

    #[structopt(subcommand)]
    cmd: Commands,
}

#[derive(Debug, StructOpt)]
enum Commands {
    /// Print the mapping document as JSON.
    Dump {
        /// Indent the document.
        #[structopt(long)]
        pretty: bool,
    },
    /// Print the JSON schema of the mapping document.
    Schema,
    /// List the ports of the platform.
    Ports {
        /// Print the output in a parseable format.
        #[structopt(long, short)]
        parseable: bool,
    },
    /// Show the lane map of one port.
    Port { id: i32 },
    /// List the chips lanes are attached to.
    Chips,
    /// List the profiles the platform supports.
    Profiles,
    /// Show the lane tuning of a port at one profile.
    #[structopt(visible_alias = "tuning")]
    Si {
        port: i32,
        /// Profile name, e.g. PROFILE_100G_4_NRZ_RS528_OPTICAL, or its id.
        profile: PortProfileId,
    },
}

fn dump(
    w: &mut impl Write,
    mapping: &PlatformMapping,
    pretty: bool,
) -> anyhow::Result<()> {
    let doc = if pretty {
        mapping.to_json_pretty()
    } else {
        mapping.to_json()
    }
    .context("failed to render mapping")?;
    writeln!(w, "{doc}")?;
    Ok(())
}

fn schema(w: &mut impl Write) -> anyhow::Result<()> {
    let schema = schemars::schema_for!(PlatformMapping);
    let doc = serde_json::to_string_pretty(&schema)
        .context("failed to render schema")?;
    writeln!(w, "{doc}")?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let opts = GlobalOpts::from_args();
    let config = config::build_config(&opts)?;
    let log =
        common::logging::init("pmadm", &config.log_file, config.log_format)?;
    let log = log.new(o!("platform" => config.platform.to_string()));

    // Build a private copy rather than using the shared one from
    // `Platform::mapping`, so that generation logs through our logger.
    let mapping = config
        .platform
        .build(&log)
        .with_context(|| format!("building {} mapping", config.platform))?;
    debug!(log, "running command"; "command" => ?opts.cmd);

    let mut out = stdout().lock();
    match opts.cmd {
        Commands::Dump { pretty } => dump(&mut out, &mapping, pretty),
        Commands::Schema => schema(&mut out),
        Commands::Ports { parseable } => {
            ports::list(&mut out, &mapping, parseable)
        }
        Commands::Port { id } => ports::show(&mut out, &mapping, id),
        Commands::Chips => inventory::chips(&mut out, &mapping),
        Commands::Profiles => inventory::profiles(&mut out, &mapping),
        Commands::Si { port, profile } => {
            tuning::show(&mut out, &mapping, port, profile)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::dump;
    use super::schema;
    use platform_mapping::lassen::lassen;

    #[test]
    fn dump_is_one_line_unless_pretty() {
        let mut out = Vec::new();
        dump(&mut out, lassen(), false).unwrap();
        let compact = String::from_utf8(out).unwrap();
        assert_eq!(compact.lines().count(), 1);

        let mut out = Vec::new();
        dump(&mut out, lassen(), true).unwrap();
        let pretty = String::from_utf8(out).unwrap();
        assert!(pretty.lines().count() > 1);

        let a: serde_json::Value = serde_json::from_str(&compact).unwrap();
        let b: serde_json::Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(a, b);
        assert_eq!(a["ports"].as_object().unwrap().len(), 48);
    }

    #[test]
    fn schema_describes_the_document() {
        let mut out = Vec::new();
        schema(&mut out).unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(doc["title"], "PlatformMapping");
        let props = doc["properties"].as_object().unwrap();
        assert!(props.contains_key("ports"));
        assert!(props.contains_key("chips"));
        assert!(props.contains_key("platformSupportedProfiles"));
    }
}
