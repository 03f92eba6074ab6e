// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/
//
// Copyright 2025 Oxide Computer Company

//! The platform mapping document.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::Serialize;

use crate::phy::DataPlanePhyChip;
use crate::phy::PortPinConfig;
use crate::port::PlatformPortEntry;
use crate::profile::PlatformPortProfileConfigEntry;
use crate::profile::PortProfileConfig;
use crate::profile::PortProfileId;
use crate::Error;

wire_enum! {
    /// Keys of the platform-wide settings.
    pub enum PlatformAttribute {
        /// The device through which the switch ASIC is reached.
        ConnectionHandle = 1 => "CONNECTION_HANDLE",
    }
}

/// Everything a platform says about its ports: lane maps, per-profile lane
/// tuning, the chips those refer to, and the profiles the platform supports.
///
/// A mapping is built once, with [`PlatformMapping::new`] or from a
/// [`crate::static_mapping::StaticMapping`], and is read-only thereafter.
/// Mappings are only ever built through `new`, which checks them; there is
/// no parsing one back from JSON.
#[derive(Clone, Debug, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformMapping {
    ports: BTreeMap<i32, PlatformPortEntry>,
    chips: Vec<DataPlanePhyChip>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    platform_settings: BTreeMap<PlatformAttribute, String>,
    platform_supported_profiles: Vec<PlatformPortProfileConfigEntry>,
}

impl PlatformMapping {
    /// Assemble a mapping.
    ///
    /// Ports are keyed by id, chips are referenced by name and profiles are
    /// looked up by id, so a repeat of any of them would lose data and is
    /// refused.
    pub fn new(
        ports: impl IntoIterator<Item = PlatformPortEntry>,
        chips: Vec<DataPlanePhyChip>,
        platform_supported_profiles: Vec<PlatformPortProfileConfigEntry>,
    ) -> Result<Self, Error> {
        let mut by_id = BTreeMap::new();
        for port in ports {
            match by_id.entry(port.id()) {
                Entry::Vacant(e) => {
                    e.insert(port);
                }
                Entry::Occupied(e) => {
                    return Err(Error::DuplicatePort(*e.key()));
                }
            }
        }

        let mut names = BTreeSet::new();
        for chip in &chips {
            if !names.insert(chip.name.as_str()) {
                return Err(Error::DuplicateChip(chip.name.clone()));
            }
        }

        let mut ids = BTreeSet::new();
        for entry in &platform_supported_profiles {
            if !ids.insert(entry.profile_id()) {
                return Err(Error::DuplicateProfile(entry.profile_id()));
            }
        }

        Ok(Self {
            ports: by_id,
            chips,
            platform_settings: BTreeMap::new(),
            platform_supported_profiles,
        })
    }

    /// Attach platform-wide settings to the mapping.
    pub fn with_settings(
        mut self,
        settings: impl IntoIterator<Item = (PlatformAttribute, String)>,
    ) -> Self {
        self.platform_settings.extend(settings);
        self
    }

    /// Return an iterator over all ports, in port id order.
    pub fn ports(&self) -> impl Iterator<Item = &PlatformPortEntry> {
        self.ports.values()
    }

    pub fn port(&self, id: i32) -> Option<&PlatformPortEntry> {
        self.ports.get(&id)
    }

    pub fn chips(&self) -> &[DataPlanePhyChip] {
        &self.chips
    }

    pub fn chip(&self, name: &str) -> Option<&DataPlanePhyChip> {
        self.chips.iter().find(|c| c.name == name)
    }

    pub fn platform_settings(&self) -> &BTreeMap<PlatformAttribute, String> {
        &self.platform_settings
    }

    pub fn platform_setting(&self, attr: PlatformAttribute) -> Option<&str> {
        self.platform_settings.get(&attr).map(String::as_str)
    }

    /// The platform-wide profile table, in the order the platform lists it.
    pub fn supported_profiles(&self) -> &[PlatformPortProfileConfigEntry] {
        &self.platform_supported_profiles
    }

    /// Speed, lane and FEC metadata for one profile, if the platform
    /// supports it.
    pub fn supported_profile(
        &self,
        profile: PortProfileId,
    ) -> Option<&PortProfileConfig> {
        self.platform_supported_profiles
            .iter()
            .find(|e| e.profile_id() == profile)
            .map(|e| &e.profile)
    }

    /// The lane settings stored for `port` at `profile`.
    pub fn port_profile_config(
        &self,
        port: i32,
        profile: PortProfileId,
    ) -> Option<&PortPinConfig> {
        self.ports
            .get(&port)?
            .supported_profiles
            .get(&profile)
            .map(|c| &c.pins)
    }

    /// Render the mapping as a compact JSON document.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(Error::from)
    }

    /// Render the mapping as an indented JSON document.
    pub fn to_json_pretty(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(Error::from)
    }
}
