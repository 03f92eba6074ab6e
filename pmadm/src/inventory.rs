// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/
//
// Copyright 2025 Oxide Computer Company

use std::fmt::Display;
use std::io::Write;

use colored::*;
use tabwriter::TabWriter;

use platform_mapping::PlatformMapping;

fn or_dash<T: Display>(x: Option<T>) -> String {
    x.map(|x| x.to_string()).unwrap_or_else(|| String::from("-"))
}

pub fn chips(
    w: &mut impl Write,
    mapping: &PlatformMapping,
) -> anyhow::Result<()> {
    let mut tw = TabWriter::new(w);
    writeln!(
        tw,
        "{}\t{}\t{}",
        "Chip".underline(),
        "Type".underline(),
        "Physical ID".underline(),
    )?;
    for chip in mapping.chips() {
        writeln!(
            tw,
            "{}\t{}\t{}",
            chip.name, chip.chip_type, chip.physical_id
        )?;
    }
    tw.flush()?;
    Ok(())
}

/// Print the platform's profile table. Speeds are shown in Gb/s.
pub fn profiles(
    w: &mut impl Write,
    mapping: &PlatformMapping,
) -> anyhow::Result<()> {
    let mut tw = TabWriter::new(w);
    writeln!(
        tw,
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        "ID".underline(),
        "Profile".underline(),
        "Speed".underline(),
        "Lanes".underline(),
        "Modulation".underline(),
        "FEC".underline(),
        "Medium".underline(),
        "Interface".underline(),
    )?;
    for entry in mapping.supported_profiles() {
        let id = entry.profile_id();
        let iphy = &entry.profile.iphy;
        writeln!(
            tw,
            "{}\t{}\t{}G\t{}\t{}\t{}\t{}\t{}",
            i32::from(id),
            id,
            entry.profile.speed / 1000,
            iphy.num_lanes,
            iphy.modulation,
            iphy.fec,
            or_dash(iphy.medium),
            or_dash(iphy.interface_type),
        )?;
    }
    tw.flush()?;
    Ok(())
}
