// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/
//
// Copyright 2025 Oxide Computer Company

//! The Lassen platform: a single Gibraltar-class ASIC behind 48 QSFP-DD and
//! QSFP28 cages.
//!
//! The ASIC's lanes are grouped into twelve IFGs of 24 lanes each. Cages 1
//! through 16 take eight lanes each and cages 17 through 48 take four. Port
//! ids step by 8 across the first group and by 4 across the second.
//!
//! Every port carries tuning for exactly one four-lane profile: 200G PAM4 on
//! cages 1 through 8 and 17 through 32, and 100G NRZ on the rest. On the
//! eight-lane cages only four of the port's lanes are tuned.

use lazy_static::lazy_static;

use crate::mapping::PlatformAttribute;
use crate::mapping::PlatformMapping;
use crate::phy::InterfaceMode;
use crate::phy::RxSettings;
use crate::phy::TxSettings;
use crate::port::PortType;
use crate::profile::PortProfileId;
use crate::static_mapping::LaneSi;
use crate::static_mapping::SiSetting;
use crate::static_mapping::SpeedSetting;
use crate::static_mapping::StaticMapping;
use crate::static_mapping::StaticPort;
use crate::Error;

const FABRIC: PortType = PortType::FabricPort;
const INTERFACE: PortType = PortType::InterfacePort;

const P100G: PortProfileId = PortProfileId::Profile100G4NrzRs528Optical;
const P200G: PortProfileId = PortProfileId::Profile200G4Pam4Rs544x2nOptical;

// Transmit taps, as (pre, pre2, main, post, post2, post3).
const TX_0: TxSettings = TxSettings::new(-50, 0, 825, -125, 0, 0);
const TX_1: TxSettings = TxSettings::new(-70, 0, 855, -75, 0, 0);
const TX_2: TxSettings = TxSettings::new(-50, 0, 900, -50, 0, 0);
const TX_3: TxSettings = TxSettings::new(-50, 0, 880, -140, 0, 0);
const TX_4: TxSettings = TxSettings::new(-40, 0, 800, -240, 0, 0);
const TX_5: TxSettings = TxSettings::new(-60, 0, 800, -200, 0, 0);
const TX_6: TxSettings = TxSettings::new(-50, 0, 800, -150, 0, 0);
const TX_7: TxSettings = TxSettings::new(-60, 0, 700, -200, 0, 0);
const TX_8: TxSettings = TxSettings::new(-84, 0, 840, -76, 0, 0);
const TX_9: TxSettings = TxSettings::new(-75, 0, 825, -100, 0, 0);
const TX_10: TxSettings = TxSettings::new(-76, 0, 856, -68, 0, 0);
const TX_11: TxSettings = TxSettings::new(-64, 0, 868, -68, 0, 0);
const TX_12: TxSettings = TxSettings::new(-56, 0, 888, -56, 0, 0);
const TX_13: TxSettings = TxSettings::new(-47, 0, 906, -47, 0, 0);
const TX_14: TxSettings = TxSettings::new(-80, 0, 800, -130, 0, 0);
const TX_15: TxSettings = TxSettings::new(-60, 0, 860, -80, 0, 0);
const TX_16: TxSettings = TxSettings::new(-60, 0, 820, -120, 0, 0);
const TX_17: TxSettings = TxSettings::new(-50, 0, 860, -150, 0, 0);
const TX_18: TxSettings = TxSettings::new(-50, 0, 730, -220, 0, 0);
const TX_19: TxSettings = TxSettings::new(-50, 0, 850, -170, 0, 0);
const TX_20: TxSettings = TxSettings::new(-70, 0, 780, -200, 0, 0);
const TX_21: TxSettings = TxSettings::new(-50, 0, 750, -250, 0, 0);
const TX_22: TxSettings = TxSettings::new(-50, 0, 730, -230, 0, 0);

// Receive settings, as (ctl_code, dsp_mode, afe_trim, ac_coupling_bypass).
const RX_0: RxSettings = RxSettings::new(63, 7, 4, 1);
const RX_1: RxSettings = RxSettings::new(4, 2, 4, 1);
const RX_2: RxSettings = RxSettings::new(4, 7, 16, 1);

macro_rules! port {
    (
        $id:literal,
        $connector:literal,
        $port_type:expr,
        $ifg:literal,
        $first:literal,
        [$($pin:expr),+ $(,)?]
    ) => {
        StaticPort {
            id: $id,
            connector: $connector,
            port_type: $port_type,
            core: $ifg,
            core_port: $first,
            pins: &[$($pin),+],
        }
    };
}

macro_rules! si {
    (
        $port:literal,
        $profile:expr,
        [$(($lane:literal, $tx:expr, $rx:expr)),+ $(,)?]
    ) => {
        SiSetting {
            port: $port,
            profile: $profile,
            lanes: &[$(LaneSi {
                lane: $lane,
                tx: $tx,
                rx: $rx,
            }),+],
        }
    };
}

// Each port's type, IFG, first tuned IFG lane, and (IFG lane, cage lane)
// pairs in lane-map order.
#[rustfmt::skip]
const PORTS: &[StaticPort] = &[
    port!(1, 1, FABRIC, 10, 8, [
        (8, 1), (9, 0), (10, 3), (11, 2), (12, 6), (13, 7), (14, 4), (15, 5),
    ]),
    port!(9, 2, FABRIC, 10, 16, [
        (16, 0), (17, 1), (18, 2), (19, 3), (20, 5), (21, 4), (22, 6), (23, 7),
    ]),
    port!(17, 3, FABRIC, 9, 8, [
        (8, 0), (9, 1), (10, 2), (11, 3), (12, 4), (13, 5), (14, 6), (15, 7),
    ]),
    port!(25, 4, FABRIC, 8, 12, [
        (8, 4), (9, 5), (10, 6), (11, 7), (12, 2), (13, 3), (14, 0), (15, 1),
    ]),
    port!(33, 5, FABRIC, 11, 0, [
        (0, 0), (1, 1), (2, 2), (3, 3), (4, 5), (5, 4), (6, 6), (7, 7),
    ]),
    port!(41, 6, FABRIC, 11, 20, [
        (16, 4), (17, 5), (18, 7), (19, 6), (20, 0), (21, 1), (22, 2), (23, 3),
    ]),
    port!(49, 7, FABRIC, 7, 8, [
        (8, 0), (9, 1), (10, 2), (11, 3), (12, 5), (13, 4), (14, 6), (15, 7),
    ]),
    port!(57, 8, FABRIC, 6, 8, [
        (8, 0), (9, 1), (10, 2), (11, 3), (12, 4), (13, 5), (14, 6), (15, 7),
    ]),
    port!(65, 9, INTERFACE, 5, 20, [
        (16, 6), (17, 7), (18, 5), (19, 4), (20, 2), (21, 3), (22, 0), (23, 1),
    ]),
    port!(73, 10, INTERFACE, 5, 4, [
        (0, 7), (1, 6), (2, 4), (3, 5), (4, 2), (5, 3), (6, 0), (7, 1),
    ]),
    port!(81, 11, INTERFACE, 0, 20, [
        (16, 6), (17, 7), (18, 5), (19, 4), (20, 3), (21, 2), (22, 0), (23, 1),
    ]),
    port!(89, 12, INTERFACE, 0, 12, [
        (8, 6), (9, 7), (10, 4), (11, 5), (12, 2), (13, 3), (14, 0), (15, 1),
    ]),
    port!(97, 13, INTERFACE, 3, 0, [
        (0, 0), (1, 1), (2, 2), (3, 3), (4, 5), (5, 4), (6, 6), (7, 7),
    ]),
    port!(105, 14, INTERFACE, 2, 20, [
        (16, 7), (17, 6), (18, 4), (19, 5), (20, 2), (21, 3), (22, 1), (23, 0),
    ]),
    port!(113, 15, INTERFACE, 1, 20, [
        (16, 7), (17, 6), (18, 5), (19, 4), (20, 1), (21, 0), (22, 2), (23, 3),
    ]),
    port!(121, 16, INTERFACE, 1, 0, [
        (0, 1), (1, 0), (2, 3), (3, 2), (4, 6), (5, 7), (6, 4), (7, 5),
    ]),
    port!(129, 17, FABRIC, 10, 4, [(4, 0), (5, 1), (6, 3), (7, 2)]),
    port!(133, 18, FABRIC, 10, 0, [(0, 3), (1, 2), (2, 1), (3, 0)]),
    port!(137, 19, FABRIC, 9, 4, [(4, 2), (5, 3), (6, 0), (7, 1)]),
    port!(141, 20, FABRIC, 9, 0, [(0, 2), (1, 3), (2, 0), (3, 1)]),
    port!(145, 21, FABRIC, 9, 20, [(20, 2), (21, 3), (22, 0), (23, 1)]),
    port!(149, 22, FABRIC, 9, 16, [(16, 2), (17, 3), (18, 0), (19, 1)]),
    port!(153, 23, FABRIC, 8, 0, [(0, 0), (1, 1), (2, 2), (3, 3)]),
    port!(157, 24, FABRIC, 8, 4, [(4, 0), (5, 1), (6, 2), (7, 3)]),
    port!(161, 25, FABRIC, 11, 12, [(12, 2), (13, 3), (14, 0), (15, 1)]),
    port!(165, 26, FABRIC, 11, 8, [(8, 3), (9, 2), (10, 0), (11, 1)]),
    port!(169, 27, FABRIC, 7, 4, [(4, 3), (5, 2), (6, 1), (7, 0)]),
    port!(173, 28, FABRIC, 7, 0, [(0, 2), (1, 3), (2, 0), (3, 1)]),
    port!(177, 29, FABRIC, 6, 4, [(4, 2), (5, 3), (6, 0), (7, 1)]),
    port!(181, 30, FABRIC, 6, 0, [(0, 2), (1, 3), (2, 0), (3, 1)]),
    port!(185, 31, FABRIC, 6, 20, [(20, 2), (21, 3), (22, 0), (23, 1)]),
    port!(189, 32, FABRIC, 6, 16, [(16, 0), (17, 1), (18, 2), (19, 3)]),
    port!(193, 33, INTERFACE, 5, 8, [(8, 0), (9, 1), (10, 2), (11, 3)]),
    port!(197, 34, INTERFACE, 5, 12, [(12, 0), (13, 1), (14, 2), (15, 3)]),
    port!(201, 35, INTERFACE, 4, 8, [(8, 0), (9, 1), (10, 2), (11, 3)]),
    port!(205, 36, INTERFACE, 4, 12, [(12, 0), (13, 1), (14, 2), (15, 3)]),
    port!(209, 37, INTERFACE, 4, 4, [(4, 0), (5, 1), (6, 3), (7, 2)]),
    port!(213, 38, INTERFACE, 4, 0, [(0, 1), (1, 0), (2, 3), (3, 2)]),
    port!(217, 39, INTERFACE, 0, 0, [(0, 0), (1, 1), (2, 2), (3, 3)]),
    port!(221, 40, INTERFACE, 0, 4, [(4, 0), (5, 1), (6, 2), (7, 3)]),
    port!(225, 41, INTERFACE, 3, 12, [(12, 1), (13, 0), (14, 2), (15, 3)]),
    port!(229, 42, INTERFACE, 3, 8, [(8, 0), (9, 1), (10, 3), (11, 2)]),
    port!(233, 43, INTERFACE, 2, 8, [(8, 2), (9, 3), (10, 1), (11, 0)]),
    port!(237, 44, INTERFACE, 2, 12, [(12, 1), (13, 0), (14, 2), (15, 3)]),
    port!(241, 45, INTERFACE, 2, 4, [(4, 1), (5, 0), (6, 2), (7, 3)]),
    port!(245, 46, INTERFACE, 2, 0, [(0, 1), (1, 0), (2, 2), (3, 3)]),
    port!(249, 47, INTERFACE, 1, 12, [(12, 2), (13, 3), (14, 0), (15, 1)]),
    port!(253, 48, INTERFACE, 1, 8, [(8, 2), (9, 3), (10, 1), (11, 0)]),
];

#[rustfmt::skip]
const SI: &[SiSetting] = &[
    si!(1, P200G, [
        (8, TX_0, RX_0), (9, TX_0, RX_0), (10, TX_0, RX_0), (11, TX_0, RX_0),
    ]),
    si!(9, P200G, [
        (16, TX_0, RX_0), (17, TX_0, RX_0), (18, TX_0, RX_0), (19, TX_0, RX_0),
    ]),
    si!(17, P200G, [
        (8, TX_0, RX_0), (9, TX_0, RX_0), (10, TX_0, RX_0), (11, TX_0, RX_0),
    ]),
    si!(25, P200G, [
        (12, TX_1, RX_0), (13, TX_1, RX_0), (14, TX_1, RX_0), (15, TX_1, RX_0),
    ]),
    si!(33, P200G, [
        (0, TX_0, RX_0), (1, TX_0, RX_0), (2, TX_0, RX_0), (3, TX_0, RX_0),
    ]),
    si!(41, P200G, [
        (20, TX_1, RX_0), (21, TX_1, RX_0), (22, TX_1, RX_0), (23, TX_1, RX_0),
    ]),
    si!(49, P200G, [
        (8, TX_2, RX_0), (9, TX_2, RX_0), (10, TX_2, RX_0), (11, TX_2, RX_0),
    ]),
    si!(57, P200G, [
        (8, TX_2, RX_0), (9, TX_2, RX_0), (10, TX_2, RX_0), (11, TX_2, RX_0),
    ]),
    si!(65, P100G, [
        (20, TX_3, RX_1), (21, TX_3, RX_1), (22, TX_3, RX_1), (23, TX_3, RX_1),
    ]),
    si!(73, P100G, [
        (4, TX_3, RX_1), (5, TX_3, RX_1), (6, TX_3, RX_1), (7, TX_3, RX_1),
    ]),
    si!(81, P100G, [
        (20, TX_4, RX_1), (21, TX_4, RX_1), (22, TX_4, RX_1), (23, TX_4, RX_1),
    ]),
    si!(89, P100G, [
        (12, TX_5, RX_1), (13, TX_5, RX_1), (14, TX_5, RX_1), (15, TX_5, RX_1),
    ]),
    si!(97, P100G, [
        (0, TX_6, RX_1), (1, TX_6, RX_1), (2, TX_6, RX_1), (3, TX_6, RX_1),
    ]),
    si!(105, P100G, [
        (20, TX_6, RX_1), (21, TX_6, RX_1), (22, TX_6, RX_1), (23, TX_6, RX_1),
    ]),
    si!(113, P100G, [
        (20, TX_7, RX_1), (21, TX_7, RX_1), (22, TX_7, RX_1), (23, TX_7, RX_1),
    ]),
    si!(121, P100G, [
        (0, TX_7, RX_1), (1, TX_7, RX_1), (2, TX_7, RX_1), (3, TX_7, RX_1),
    ]),
    si!(129, P200G, [
        (4, TX_8, RX_2), (5, TX_8, RX_2), (6, TX_9, RX_2), (7, TX_10, RX_2),
    ]),
    si!(133, P200G, [
        (0, TX_10, RX_2), (1, TX_10, RX_2), (2, TX_10, RX_2), (3, TX_10, RX_2),
    ]),
    si!(137, P200G, [
        (4, TX_10, RX_2), (5, TX_10, RX_2), (6, TX_10, RX_2), (7, TX_10, RX_2),
    ]),
    si!(141, P200G, [
        (0, TX_11, RX_2), (1, TX_10, RX_2), (2, TX_11, RX_2), (3, TX_11, RX_2),
    ]),
    si!(145, P200G, [
        (20, TX_11, RX_2), (21, TX_11, RX_2), (22, TX_11, RX_2),
        (23, TX_11, RX_2),
    ]),
    si!(149, P200G, [
        (16, TX_11, RX_2), (17, TX_11, RX_2), (18, TX_11, RX_2),
        (19, TX_11, RX_2),
    ]),
    si!(153, P200G, [
        (0, TX_12, RX_2), (1, TX_12, RX_2), (2, TX_12, RX_2), (3, TX_12, RX_2),
    ]),
    si!(157, P200G, [
        (4, TX_12, RX_2), (5, TX_12, RX_2), (6, TX_12, RX_2), (7, TX_12, RX_2),
    ]),
    si!(161, P200G, [
        (12, TX_11, RX_2), (13, TX_11, RX_2), (14, TX_11, RX_2),
        (15, TX_11, RX_2),
    ]),
    si!(165, P200G, [
        (8, TX_11, RX_2), (9, TX_11, RX_2), (10, TX_11, RX_2),
        (11, TX_11, RX_2),
    ]),
    si!(169, P200G, [
        (4, TX_12, RX_2), (5, TX_12, RX_2), (6, TX_12, RX_2), (7, TX_12, RX_2),
    ]),
    si!(173, P200G, [
        (0, TX_13, RX_2), (1, TX_12, RX_2), (2, TX_13, RX_2), (3, TX_13, RX_2),
    ]),
    si!(177, P200G, [
        (4, TX_13, RX_2), (5, TX_13, RX_2), (6, TX_13, RX_2), (7, TX_13, RX_2),
    ]),
    si!(181, P200G, [
        (0, TX_13, RX_2), (1, TX_13, RX_2), (2, TX_13, RX_2), (3, TX_13, RX_2),
    ]),
    si!(185, P200G, [
        (20, TX_13, RX_2), (21, TX_13, RX_2), (22, TX_13, RX_2),
        (23, TX_13, RX_2),
    ]),
    si!(189, P200G, [
        (16, TX_13, RX_2), (17, TX_13, RX_2), (18, TX_13, RX_2),
        (19, TX_13, RX_2),
    ]),
    si!(193, P100G, [
        (8, TX_14, RX_1), (9, TX_14, RX_1), (10, TX_14, RX_1),
        (11, TX_14, RX_1),
    ]),
    si!(197, P100G, [
        (12, TX_15, RX_1), (13, TX_15, RX_1), (14, TX_15, RX_1),
        (15, TX_15, RX_1),
    ]),
    si!(201, P100G, [
        (8, TX_16, RX_1), (9, TX_16, RX_1), (10, TX_16, RX_1),
        (11, TX_16, RX_1),
    ]),
    si!(205, P100G, [
        (12, TX_14, RX_1), (13, TX_14, RX_1), (14, TX_14, RX_1),
        (15, TX_14, RX_1),
    ]),
    si!(209, P100G, [
        (4, TX_17, RX_1), (5, TX_17, RX_1), (6, TX_17, RX_1), (7, TX_17, RX_1),
    ]),
    si!(213, P100G, [
        (0, TX_17, RX_1), (1, TX_17, RX_1), (2, TX_17, RX_1), (3, TX_17, RX_1),
    ]),
    si!(217, P100G, [
        (0, TX_18, RX_1), (1, TX_18, RX_1), (2, TX_18, RX_1), (3, TX_18, RX_1),
    ]),
    si!(221, P100G, [
        (4, TX_18, RX_1), (5, TX_18, RX_1), (6, TX_18, RX_1), (7, TX_18, RX_1),
    ]),
    si!(225, P100G, [
        (12, TX_19, RX_1), (13, TX_19, RX_1), (14, TX_19, RX_1),
        (15, TX_19, RX_1),
    ]),
    si!(229, P100G, [
        (8, TX_19, RX_1), (9, TX_19, RX_1), (10, TX_19, RX_1),
        (11, TX_19, RX_1),
    ]),
    si!(233, P100G, [
        (8, TX_20, RX_1), (9, TX_20, RX_1), (10, TX_20, RX_1),
        (11, TX_20, RX_1),
    ]),
    si!(237, P100G, [
        (12, TX_19, RX_1), (13, TX_19, RX_1), (14, TX_19, RX_1),
        (15, TX_19, RX_1),
    ]),
    si!(241, P100G, [
        (4, TX_18, RX_1), (5, TX_18, RX_1), (6, TX_18, RX_1), (7, TX_18, RX_1),
    ]),
    si!(245, P100G, [
        (0, TX_5, RX_1), (1, TX_5, RX_1), (2, TX_5, RX_1), (3, TX_5, RX_1),
    ]),
    si!(249, P100G, [
        (12, TX_21, RX_1), (13, TX_21, RX_1), (14, TX_21, RX_1),
        (15, TX_21, RX_1),
    ]),
    si!(253, P100G, [
        (8, TX_22, RX_1), (9, TX_22, RX_1), (10, TX_22, RX_1),
        (11, TX_22, RX_1),
    ]),
];

const SPEEDS: &[SpeedSetting] = &[
    SpeedSetting {
        profile: P100G,
        interface_mode: InterfaceMode::Kr4,
    },
    SpeedSetting {
        profile: P200G,
        interface_mode: InterfaceMode::Kr4,
    },
];

const LASSEN: StaticMapping = StaticMapping {
    core_prefix: "IFG",
    connector_prefix: "eth1/",
    cores: 12,
    connectors: 48,
    ports: PORTS,
    si: SI,
    speeds: SPEEDS,
    settings: &[(PlatformAttribute::ConnectionHandle, "/dev/uio0")],
};

lazy_static! {
    static ref LASSEN_MAPPING: PlatformMapping = {
        let log = slog::Logger::root(slog::Discard, slog::o!());
        LASSEN.generate(&log).expect("Lassen tables are consistent")
    };
}

/// Build a fresh copy of the Lassen mapping.
pub fn generate(log: &slog::Logger) -> Result<PlatformMapping, Error> {
    LASSEN.generate(log)
}

/// The Lassen mapping, built on first use.
pub fn lassen() -> &'static PlatformMapping {
    &LASSEN_MAPPING
}

#[cfg(test)]
mod tests {
    use super::generate;
    use super::lassen;
    use super::P100G;
    use super::P200G;
    use super::RX_0;
    use super::RX_2;
    use super::TX_0;
    use super::TX_10;
    use super::TX_11;
    use crate::mapping::PlatformAttribute;
    use crate::phy::DataPlanePhyChipType;
    use crate::phy::FecMode;
    use crate::phy::InterfaceType;
    use crate::phy::IpModulation;
    use crate::phy::PinId;
    use crate::phy::TransmitterTechnology;
    use crate::port::PortType;
    use pretty_assertions::assert_eq;

    #[test]
    fn inventory() {
        let m = lassen();
        assert_eq!(m.ports().count(), 48);
        assert_eq!(m.chips().len(), 60);
        assert_eq!(m.supported_profiles().len(), 2);

        let iphys = m
            .chips()
            .iter()
            .filter(|c| c.chip_type == DataPlanePhyChipType::Iphy)
            .count();
        assert_eq!(iphys, 12);
        assert_eq!(m.chip("IFG11").unwrap().physical_id, 11);
        let cage = m.chip("eth1/48").unwrap();
        assert_eq!(cage.chip_type, DataPlanePhyChipType::Transceiver);
        assert_eq!(cage.physical_id, 47);
    }

    #[test]
    fn port_ids_and_widths() {
        let m = lassen();
        let ids: Vec<i32> = m.ports().map(|p| p.id()).collect();
        let expected: Vec<i32> =
            (1..=121).step_by(8).chain((129..=253).step_by(4)).collect();
        assert_eq!(ids, expected);
        for port in m.ports() {
            let width = if port.id() < 129 { 8 } else { 4 };
            assert_eq!(port.mapping.pins.len(), width, "port {}", port.id());
            assert_eq!(port.mapping.controlling_port, port.id());
            assert_eq!(port.profiles().count(), 1, "port {}", port.id());
        }
    }

    #[test]
    fn every_lane_lands_on_its_own_cage() {
        for port in lassen().ports() {
            let cage = port.mapping.connector().unwrap();
            assert_eq!(port.name(), format!("{cage}/1"));
            assert!(port
                .mapping
                .pins
                .iter()
                .all(|p| p.end().map(|z| z.chip.as_str()) == Some(cage)));
        }
    }

    #[test]
    fn first_port() {
        let m = lassen();
        let port = m.port(1).unwrap();
        assert_eq!(port.name(), "eth1/1/1");
        assert_eq!(port.mapping.pins[0].a, PinId::new("IFG10", 8));
        assert_eq!(
            port.mapping.pins[0].end(),
            Some(&PinId::new("eth1/1", 1))
        );
        assert_eq!(port.profiles().collect::<Vec<_>>(), vec![P200G]);

        let pins = m.port_profile_config(1, P200G).unwrap();
        let lanes: Vec<i32> = pins.iphy.iter().map(|p| p.id.lane).collect();
        assert_eq!(lanes, vec![8, 9, 10, 11]);
        assert!(pins.iphy.iter().all(|p| p.tx == Some(TX_0)));
        assert!(pins.iphy.iter().all(|p| p.rx == Some(RX_0)));
        let xcvr: Vec<i32> = pins
            .transceiver
            .as_ref()
            .unwrap()
            .iter()
            .map(|p| p.id.lane)
            .collect();
        assert_eq!(xcvr, vec![1, 0, 3, 2]);
        assert!(m.port_profile_config(1, P100G).is_none());
    }

    #[test]
    fn lanes_within_a_port_may_differ() {
        let pins = lassen().port_profile_config(141, P200G).unwrap();
        let tx: Vec<_> = pins.iphy.iter().map(|p| p.tx.unwrap()).collect();
        assert_eq!(tx, vec![TX_11, TX_10, TX_11, TX_11]);
        assert_eq!(pins.iphy[1].rx, Some(RX_2));
    }

    #[test]
    fn last_port() {
        let m = lassen();
        let port = m.port(253).unwrap();
        assert_eq!(port.name(), "eth1/48/1");
        let pins = m.port_profile_config(253, P100G).unwrap();
        assert_eq!(pins.iphy[0].id, PinId::new("IFG1", 8));
        assert_eq!(pins.iphy[0].tx.unwrap().main, 730);
        assert_eq!(pins.iphy[0].rx.unwrap().dsp_mode, 2);
        assert_eq!(
            pins.transceiver.as_ref().unwrap()[0].id,
            PinId::new("eth1/48", 2)
        );
    }

    #[test]
    fn profile_table() {
        let m = lassen();
        let nrz = m.supported_profile(P100G).unwrap();
        assert_eq!(nrz.speed, 100_000);
        assert_eq!(nrz.iphy.num_lanes, 4);
        assert_eq!(nrz.iphy.modulation, IpModulation::Nrz);
        assert_eq!(nrz.iphy.fec, FecMode::Rs528);
        assert_eq!(nrz.iphy.medium, Some(TransmitterTechnology::Optical));

        let pam4 = m.supported_profile(P200G).unwrap();
        assert_eq!(pam4.speed, 200_000);
        assert_eq!(pam4.iphy.modulation, IpModulation::Pam4);
        assert_eq!(pam4.iphy.fec, FecMode::Rs544x2n);
        assert_eq!(pam4.iphy.interface_type, Some(InterfaceType::Kr4));
    }

    #[test]
    fn generated_copy_matches_shared_copy() {
        let log = slog::Logger::root(slog::Discard, slog::o!());
        assert_eq!(&generate(&log).unwrap(), lassen());
    }

    #[test]
    fn core_attachment() {
        for port in lassen().ports() {
            let (&profile, config) =
                port.supported_profiles.iter().next().unwrap();
            let first = &config.pins.iphy[0].id;
            let core = first.chip.trim_start_matches("IFG").parse().unwrap();
            assert_eq!(port.mapping.attached_core_id, Some(core));
            assert_eq!(
                port.mapping.attached_core_port_index,
                Some(first.lane),
                "port {}",
                port.id()
            );
            let port_type = if profile == P200G {
                PortType::FabricPort
            } else {
                PortType::InterfacePort
            };
            assert_eq!(port.mapping.port_type, Some(port_type));
        }
        // Tuning starts part way into the port's lanes.
        let port = &lassen().port(41).unwrap().mapping;
        assert_eq!(port.pins[0].a.lane, 16);
        assert_eq!(port.attached_core_port_index, Some(20));
        assert_eq!(
            lassen().platform_setting(PlatformAttribute::ConnectionHandle),
            Some("/dev/uio0")
        );
    }

    #[test]
    fn whole_document() {
        let expected: serde_json::Value =
            serde_json::from_str(include_str!("../tests/data/lassen.json"))
                .unwrap();
        let actual: serde_json::Value =
            serde_json::from_str(&lassen().to_json_pretty().unwrap()).unwrap();
        assert_eq!(actual, expected);
    }
}
