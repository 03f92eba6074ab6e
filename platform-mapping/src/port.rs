// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/
//
// Copyright 2025 Oxide Computer Company

//! Per-port entries of a platform mapping.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

use crate::phy::PinConnection;
use crate::phy::PinId;
use crate::phy::PortPinConfig;
use crate::profile::PortProfileId;

wire_enum! {
    /// The role a port plays in the switch.
    pub enum PortType {
        /// A port facing hosts or other switches.
        InterfacePort = 0 => "INTERFACE_PORT",
        /// A port into the switch fabric.
        FabricPort = 1 => "FABRIC_PORT",
        RecyclePort = 2 => "RECYCLE_PORT",
    }
}

/// How a logical port is wired: the ASIC lanes it owns, in order, and where
/// each of them leads.
#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformPortMapping {
    pub id: i32,
    pub name: String,
    /// The port whose settings govern this one's lanes. For ports that are
    /// not subsumed by a breakout, this is the port itself.
    pub controlling_port: i32,
    pub pins: Vec<PinConnection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_type: Option<PortType>,
    /// On VOQ platforms, the index of the ASIC core the port is attached to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attached_core_id: Option<i32>,
    /// The port's first lane within its attached core.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attached_core_port_index: Option<i32>,
}

impl PlatformPortMapping {
    /// A mapping with no VOQ attachment details.
    pub fn new(
        id: i32,
        name: impl Into<String>,
        controlling_port: i32,
        pins: Vec<PinConnection>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            controlling_port,
            pins,
            port_type: None,
            attached_core_id: None,
            attached_core_port_index: None,
        }
    }

    /// The ASIC-side lanes of this port, in mapping order.
    pub fn asic_pins(&self) -> impl Iterator<Item = &PinId> {
        self.pins.iter().map(|p| &p.a)
    }

    /// The chip on the far end of this port's first lane, typically the
    /// transceiver cage.
    pub fn connector(&self) -> Option<&str> {
        self.pins
            .first()
            .and_then(PinConnection::end)
            .map(|id| id.chip.as_str())
    }
}

/// The pin settings a port uses at one profile.
#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct PlatformPortConfig {
    pub pins: PortPinConfig,
}

/// Everything the platform knows about one port.
#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformPortEntry {
    pub mapping: PlatformPortMapping,
    pub supported_profiles: BTreeMap<PortProfileId, PlatformPortConfig>,
}

impl PlatformPortEntry {
    pub fn new(mapping: PlatformPortMapping) -> Self {
        Self {
            mapping,
            supported_profiles: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> i32 {
        self.mapping.id
    }

    pub fn name(&self) -> &str {
        &self.mapping.name
    }

    /// The profiles this port has settings for, in id order.
    pub fn profiles(&self) -> impl Iterator<Item = PortProfileId> + '_ {
        self.supported_profiles.keys().copied()
    }
}
