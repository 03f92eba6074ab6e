// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/
//
// Copyright 2025 Oxide Computer Company

//! Display the SerDes tuning stored for a port.

use std::io::Write;

use anyhow::bail;
use colored::*;
use tabwriter::TabWriter;

use platform_mapping::phy::PinConfig;
use platform_mapping::PlatformMapping;
use platform_mapping::PortProfileId;

const HEADERS: [&str; 12] = [
    "Lane",
    "Pre",
    "Pre2",
    "Main",
    "Post",
    "Post2",
    "Post3",
    "CTL code",
    "DSP mode",
    "AFE trim",
    "AC bypass",
    "Transceiver",
];

fn row(pin: &PinConfig, xcvr: Option<&PinConfig>) -> Vec<String> {
    let tx = pin.tx.unwrap_or_default();
    let rx = pin.rx.unwrap_or_default();
    let mut row = vec![pin.id.to_string()];
    row.extend(
        [tx.pre, tx.pre2, tx.main, tx.post, tx.post2, tx.post3]
            .iter()
            .map(|v| v.to_string()),
    );
    row.extend(
        [rx.ctl_code, rx.dsp_mode, rx.afe_trim, rx.ac_coupling_bypass]
            .iter()
            .map(|v| v.to_string()),
    );
    row.push(
        xcvr.map(|x| x.id.to_string())
            .unwrap_or_else(|| String::from("-")),
    );
    row
}

/// Print the per-lane settings `port` carries for `profile`, with the
/// transceiver lane each ASIC lane drives.
pub fn show(
    w: &mut impl Write,
    mapping: &PlatformMapping,
    port: i32,
    profile: PortProfileId,
) -> anyhow::Result<()> {
    let Some(entry) = mapping.port(port) else {
        bail!("no such port: {port}");
    };
    let Some(pins) = mapping.port_profile_config(port, profile) else {
        let known = entry
            .profiles()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        bail!("port {port} has no settings for {profile} (has: {known})");
    };

    let xcvr = pins.transceiver.as_deref().unwrap_or_default();
    let mut tw = TabWriter::new(w);
    let header = HEADERS
        .iter()
        .map(|h| h.underline().to_string())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(tw, "{header}")?;
    for (i, pin) in pins.iphy.iter().enumerate() {
        writeln!(tw, "{}", row(pin, xcvr.get(i)).join("\t"))?;
    }
    tw.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::row;
    use super::show;
    use platform_mapping::lassen::lassen;
    use platform_mapping::phy::PinConfig;
    use platform_mapping::phy::PinId;
    use platform_mapping::PortProfileId;
    use pretty_assertions::assert_eq;

    const P100G: PortProfileId = PortProfileId::Profile100G4NrzRs528Optical;
    const P200G: PortProfileId = PortProfileId::Profile200G4Pam4Rs544x2nOptical;

    #[test]
    fn tuning_table() {
        let mut out = Vec::new();
        show(&mut out, lassen(), 65, P100G).unwrap();
        let out = String::from_utf8(out).unwrap();
        let rows: Vec<Vec<&str>> = out
            .lines()
            .skip(1)
            .map(|l| l.split_whitespace().collect())
            .collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(
            rows[0],
            vec![
                "IFG5:20", "-50", "0", "880", "-140", "0", "0", "4", "2", "4",
                "1", "eth1/9:2",
            ]
        );
        assert_eq!(rows[3][0], "IFG5:23");
        assert_eq!(rows[3][11], "eth1/9:1");
    }

    #[test]
    fn wrong_profile_names_the_ones_present() {
        let mut out = Vec::new();
        let err = show(&mut out, lassen(), 65, P200G).unwrap_err();
        assert_eq!(
            err.to_string(),
            "port 65 has no settings for \
             PROFILE_200G_4_PAM4_RS544X2N_OPTICAL \
             (has: PROFILE_100G_4_NRZ_RS528_OPTICAL)"
        );
    }

    #[test]
    fn missing_port() {
        let mut out = Vec::new();
        let err = show(&mut out, lassen(), 300, P100G).unwrap_err();
        assert_eq!(err.to_string(), "no such port: 300");
    }

    #[test]
    fn untuned_lane_without_transceiver() {
        let pin = PinConfig::bare(PinId::new("IFG0", 3));
        assert_eq!(
            row(&pin, None),
            vec![
                "IFG0:3", "0", "0", "0", "0", "0", "0", "0", "0", "0", "0",
                "-",
            ]
        );
    }
}
