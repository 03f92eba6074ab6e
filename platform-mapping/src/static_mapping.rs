// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/
//
// Copyright 2025 Oxide Computer Company

//! Compact tables from which platform mappings are generated.
//!
//! The full mapping document is highly repetitive: every tuned lane repeats
//! its chip name, and every transceiver lane listed under a profile is just
//! the far end of an ASIC lane already listed in the port's mapping. Platform
//! data is therefore written as a handful of small constant tables:
//!
//! - one [`StaticPort`] per front-panel port, giving its type, the ASIC core
//!   it hangs off, its first lane on that core and the
//!   `(core lane, connector lane)` pairs in mapping order;
//! - one [`SiSetting`] per port and profile, giving the tx/rx settings of
//!   each core lane the profile uses;
//! - one [`SpeedSetting`] per profile the platform supports.
//!
//! [`StaticMapping::generate`] expands these into a [`PlatformMapping`].

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use slog::debug;
use slog::o;

use crate::mapping::PlatformAttribute;
use crate::mapping::PlatformMapping;
use crate::phy::DataPlanePhyChip;
use crate::phy::DataPlanePhyChipType;
use crate::phy::InterfaceMode;
use crate::phy::PinConfig;
use crate::phy::PinConnection;
use crate::phy::PinId;
use crate::phy::PortPinConfig;
use crate::phy::ProfileSideConfig;
use crate::phy::RxSettings;
use crate::phy::TxSettings;
use crate::port::PlatformPortConfig;
use crate::port::PlatformPortEntry;
use crate::port::PlatformPortMapping;
use crate::port::PortType;
use crate::profile::PlatformPortProfileConfigEntry;
use crate::profile::PortProfileConfig;
use crate::profile::PortProfileId;
use crate::Error;

/// One front-panel port.
#[derive(Clone, Copy, Debug)]
pub struct StaticPort {
    /// Logical port id.
    pub id: i32,
    /// Front-panel connector number, starting at 1.
    pub connector: u8,
    pub port_type: PortType,
    /// Index of the ASIC core (IFG) the port's lanes belong to.
    pub core: u8,
    /// The port's first lane on its core. This is the first lane the port is
    /// tuned on, which need not be the first lane it is wired to.
    pub core_port: u8,
    /// `(core lane, connector lane)` pairs, in mapping order.
    pub pins: &'static [(u8, u8)],
}

/// Tuning for one core lane.
#[derive(Clone, Copy, Debug)]
pub struct LaneSi {
    pub lane: u8,
    pub tx: TxSettings,
    pub rx: RxSettings,
}

/// Tuning for every lane a port uses at one profile.
#[derive(Clone, Copy, Debug)]
pub struct SiSetting {
    pub port: i32,
    pub profile: PortProfileId,
    pub lanes: &'static [LaneSi],
}

/// One row of the platform-wide profile table.
#[derive(Clone, Copy, Debug)]
pub struct SpeedSetting {
    pub profile: PortProfileId,
    pub interface_mode: InterfaceMode,
}

/// The complete set of tables describing one platform.
#[derive(Clone, Copy, Debug)]
pub struct StaticMapping {
    /// Name prefix of the ASIC cores, e.g. `IFG`.
    pub core_prefix: &'static str,
    /// Name prefix of the front-panel connectors, e.g. `eth1/`.
    pub connector_prefix: &'static str,
    /// Number of ASIC cores.
    pub cores: u8,
    /// Number of front-panel connectors.
    pub connectors: u8,
    pub ports: &'static [StaticPort],
    pub si: &'static [SiSetting],
    pub speeds: &'static [SpeedSetting],
    pub settings: &'static [(PlatformAttribute, &'static str)],
}

impl StaticMapping {
    fn core_name(&self, core: u8) -> String {
        format!("{}{}", self.core_prefix, core)
    }

    fn connector_name(&self, connector: u8) -> String {
        format!("{}{}", self.connector_prefix, connector)
    }

    fn port_mapping(&self, port: &StaticPort) -> PlatformPortMapping {
        let core = self.core_name(port.core);
        let connector = self.connector_name(port.connector);
        let pins = port
            .pins
            .iter()
            .map(|(a, z)| {
                PinConnection::direct(
                    PinId::new(core.as_str(), i32::from(*a)),
                    PinId::new(connector.as_str(), i32::from(*z)),
                )
            })
            .collect();
        PlatformPortMapping {
            port_type: Some(port.port_type),
            attached_core_id: Some(i32::from(port.core)),
            attached_core_port_index: Some(i32::from(port.core_port)),
            ..PlatformPortMapping::new(
                port.id,
                format!("{connector}/1"),
                port.id,
                pins,
            )
        }
    }

    // Build the pin config for one tuning row. Transceiver lanes are the
    // connector lanes the tuned core lanes are wired to, in the same order.
    fn port_config(
        &self,
        port: &StaticPort,
        si: &SiSetting,
    ) -> Result<PlatformPortConfig, Error> {
        let core = self.core_name(port.core);
        let connector = self.connector_name(port.connector);
        let mut iphy = Vec::with_capacity(si.lanes.len());
        let mut transceiver = Vec::with_capacity(si.lanes.len());
        for lane in si.lanes {
            let Some((_, z)) = port.pins.iter().find(|(a, _)| *a == lane.lane)
            else {
                return Err(Error::UnwiredLane {
                    port: port.id,
                    chip: core,
                    lane: i32::from(lane.lane),
                });
            };
            iphy.push(PinConfig::tuned(
                PinId::new(core.as_str(), i32::from(lane.lane)),
                lane.tx,
                lane.rx,
            ));
            transceiver.push(PinConfig::bare(PinId::new(
                connector.as_str(),
                i32::from(*z),
            )));
        }
        Ok(PlatformPortConfig {
            pins: PortPinConfig {
                iphy,
                transceiver: Some(transceiver),
            },
        })
    }

    fn chips(&self) -> Vec<DataPlanePhyChip> {
        let cores = (0..self.cores).map(|i| {
            DataPlanePhyChip::new(
                self.core_name(i),
                DataPlanePhyChipType::Iphy,
                i32::from(i),
            )
        });
        let connectors = (1..=self.connectors).map(|i| {
            DataPlanePhyChip::new(
                self.connector_name(i),
                DataPlanePhyChipType::Transceiver,
                i32::from(i) - 1,
            )
        });
        cores.chain(connectors).collect()
    }

    fn profiles(&self) -> Vec<PlatformPortProfileConfigEntry> {
        self.speeds
            .iter()
            .map(|s| {
                let p = s.profile;
                PlatformPortProfileConfigEntry::new(
                    p,
                    PortProfileConfig {
                        speed: p.speed(),
                        iphy: ProfileSideConfig {
                            num_lanes: p.num_lanes(),
                            modulation: p.modulation(),
                            fec: p.fec(),
                            medium: Some(p.medium()),
                            interface_mode: Some(s.interface_mode),
                            interface_type: Some(s.interface_mode.into()),
                        },
                        xphy_line: None,
                        xphy_system: None,
                    },
                )
            })
            .collect()
    }

    /// Expand the tables into a full mapping document.
    pub fn generate(
        &self,
        log: &slog::Logger,
    ) -> Result<PlatformMapping, Error> {
        let log = log.new(o!("unit" => "static_mapping"));

        let mut entries = BTreeMap::new();
        for port in self.ports {
            let entry = PlatformPortEntry::new(self.port_mapping(port));
            if entries.insert(port.id, (port, entry)).is_some() {
                return Err(Error::DuplicatePort(port.id));
            }
        }

        for si in self.si {
            let (port, entry) = entries
                .get_mut(&si.port)
                .ok_or(Error::NoSuchPort(si.port))?;
            let config = self.port_config(port, si)?;
            match entry.supported_profiles.entry(si.profile) {
                Entry::Vacant(e) => {
                    e.insert(config);
                }
                Entry::Occupied(_) => {
                    return Err(Error::DuplicateTuning {
                        port: si.port,
                        profile: si.profile,
                    });
                }
            }
        }

        let chips = self.chips();
        let profiles = self.profiles();
        debug!(
            log,
            "generated platform mapping";
            "ports" => entries.len(),
            "tuning_rows" => self.si.len(),
            "chips" => chips.len(),
            "profiles" => profiles.len(),
        );
        let settings = self
            .settings
            .iter()
            .map(|(attr, value)| (*attr, value.to_string()));
        PlatformMapping::new(
            entries.into_values().map(|(_, entry)| entry),
            chips,
            profiles,
        )
        .map(|m| m.with_settings(settings))
    }
}
