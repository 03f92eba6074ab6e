// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/
//
// Copyright 2025 Oxide Computer Company

use std::io::Write;

use anyhow::bail;
use colored::*;
use tabwriter::TabWriter;

use platform_mapping::phy::PinId;
use platform_mapping::port::PlatformPortEntry;
use platform_mapping::PlatformMapping;

// Render a run of lanes as `CHIP:l0<sep>l1<sep>...`, starting a new group
// whenever the chip changes.
fn lane_groups<'a>(
    pins: impl Iterator<Item = &'a PinId>,
    sep: &str,
) -> String {
    let mut groups: Vec<(&str, Vec<String>)> = Vec::new();
    for pin in pins {
        match groups.last_mut() {
            Some((chip, lanes)) if *chip == pin.chip => {
                lanes.push(pin.lane.to_string())
            }
            _ => {
                groups.push((pin.chip.as_str(), vec![pin.lane.to_string()]))
            }
        }
    }
    groups
        .into_iter()
        .map(|(chip, lanes)| format!("{chip}:{}", lanes.join(sep)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn profile_list(port: &PlatformPortEntry, parseable: bool) -> String {
    let profiles: Vec<String> = if parseable {
        port.profiles().map(|p| i32::from(p).to_string()).collect()
    } else {
        port.profiles().map(|p| p.to_string()).collect()
    };
    if profiles.is_empty() && !parseable {
        String::from("-")
    } else {
        profiles.join(" ")
    }
}

/// List every port: one row each, in port id order.
///
/// The parseable form has no header, separates fields with `,`, and lists
/// lanes and profiles separated by spaces.
pub fn list(
    w: &mut impl Write,
    mapping: &PlatformMapping,
    parseable: bool,
) -> anyhow::Result<()> {
    if parseable {
        for port in mapping.ports() {
            writeln!(
                w,
                "{},{},{},{},{},{}",
                port.id(),
                port.name(),
                port.mapping.controlling_port,
                lane_groups(port.mapping.asic_pins(), " "),
                port.mapping.connector().unwrap_or(""),
                profile_list(port, true),
            )?;
        }
        return Ok(());
    }

    let mut tw = TabWriter::new(w);
    writeln!(
        tw,
        "{}\t{}\t{}\t{}\t{}\t{}",
        "Port".underline(),
        "Name".underline(),
        "Controller".underline(),
        "Lanes".underline(),
        "Connector".underline(),
        "Profiles".underline(),
    )?;
    for port in mapping.ports() {
        writeln!(
            tw,
            "{}\t{}\t{}\t{}\t{}\t{}",
            port.id(),
            port.name(),
            port.mapping.controlling_port,
            lane_groups(port.mapping.asic_pins(), ","),
            port.mapping.connector().unwrap_or("-"),
            profile_list(port, false),
        )?;
    }
    tw.flush()?;
    Ok(())
}

/// Show where each of a port's lanes leads.
pub fn show(
    w: &mut impl Write,
    mapping: &PlatformMapping,
    id: i32,
) -> anyhow::Result<()> {
    let Some(port) = mapping.port(id) else {
        bail!("no such port: {id}");
    };
    writeln!(
        w,
        "Port {} ({}), controlled by port {}",
        port.id(),
        port.name(),
        port.mapping.controlling_port
    )?;

    let mut tw = TabWriter::new(w);
    writeln!(tw, "{}\t{}", "ASIC lane".underline(), "Far end".underline())?;
    for pin in &port.mapping.pins {
        let end = pin
            .end()
            .map(|z| z.to_string())
            .unwrap_or_else(|| String::from("-"));
        writeln!(tw, "{}\t{}", pin.a, end)?;
    }
    tw.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::lane_groups;
    use super::list;
    use super::show;
    use platform_mapping::lassen::lassen;
    use platform_mapping::phy::PinId;
    use pretty_assertions::assert_eq;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn lanes_are_grouped_by_chip() {
        let pins = [
            PinId::new("IFG0", 4),
            PinId::new("IFG0", 5),
            PinId::new("IFG1", 0),
        ];
        assert_eq!(lane_groups(pins.iter(), ","), "IFG0:4,5 IFG1:0");
        assert_eq!(lane_groups(std::iter::empty(), ","), "");
    }

    #[test]
    fn parseable_port_list() {
        let out = render(|w| list(w, lassen(), true));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 48);
        assert_eq!(
            lines[0],
            "1,eth1/1/1,1,IFG10:8 9 10 11 12 13 14 15,eth1/1,25"
        );
        assert_eq!(lines[47], "253,eth1/48/1,253,IFG1:8 9 10 11,eth1/48,23");
    }

    #[test]
    fn table_port_list() {
        let out = render(|w| list(w, lassen(), false));
        // Header plus one row per port.
        assert_eq!(out.lines().count(), 49);
        assert!(out.contains("PROFILE_200G_4_PAM4_RS544X2N_OPTICAL"));
        assert!(out.contains("IFG10:8,9,10,11,12,13,14,15"));
    }

    #[test]
    fn show_port() {
        let out = render(|w| show(w, lassen(), 129));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Port 129 (eth1/17/1), controlled by port 129");
        assert_eq!(lines.len(), 6);
        let first: Vec<&str> = lines[2].split_whitespace().collect();
        assert_eq!(first, vec!["IFG10:4", "eth1/17:0"]);
        let last: Vec<&str> = lines[5].split_whitespace().collect();
        assert_eq!(last, vec!["IFG10:7", "eth1/17:2"]);
    }

    #[test]
    fn show_missing_port() {
        let mut out = Vec::new();
        let err = show(&mut out, lassen(), 2).unwrap_err();
        assert_eq!(err.to_string(), "no such port: 2");
    }
}
