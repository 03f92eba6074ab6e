// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/
//
// Copyright 2025 Oxide Computer Company

//! Lane-level types: pins, the wiring between them, and SerDes settings.

use std::fmt;

use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

/// A single physical SerDes lane, named by its chip and lane index.
#[derive(
    Clone,
    Debug,
    Deserialize,
    Eq,
    Hash,
    JsonSchema,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct PinId {
    pub chip: String,
    pub lane: i32,
}

impl PinId {
    pub fn new(chip: impl Into<String>, lane: i32) -> Self {
        Self {
            chip: chip.into(),
            lane,
        }
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.chip, self.lane)
    }
}

/// The far side of a pin connection.
#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Pin {
    /// The lane terminates here, usually on a transceiver.
    End(PinId),
    /// The lane passes through an external PHY before reaching its end.
    Junction(PinJunction),
}

/// An external PHY sitting between the ASIC and the connector.
#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct PinJunction {
    /// The system-side lane of the PHY, facing the ASIC.
    pub system: PinId,
    /// Line-side connections out of the PHY.
    pub line: Vec<PinConnection>,
}

/// One ASIC lane and where it leads.
#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct PinConnection {
    pub a: PinId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<Pin>,
}

impl PinConnection {
    /// Connect an ASIC lane directly to its terminating lane.
    pub fn direct(a: PinId, z: PinId) -> Self {
        Self {
            a,
            z: Some(Pin::End(z)),
        }
    }

    /// Follow the connection to its terminating lane, through a junction if
    /// there is one.
    pub fn end(&self) -> Option<&PinId> {
        match self.z.as_ref()? {
            Pin::End(id) => Some(id),
            Pin::Junction(j) => j.line.first().and_then(PinConnection::end),
        }
    }
}

/// Transmit equalization for one lane.
///
/// These are the FIR tap weights applied by the transmitter: two pre-cursor
/// taps, the main cursor, and three post-cursor taps.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Eq,
    JsonSchema,
    PartialEq,
    Serialize,
)]
pub struct TxSettings {
    pub pre: i32,
    pub pre2: i32,
    pub main: i32,
    pub post: i32,
    pub post2: i32,
    pub post3: i32,
}

impl TxSettings {
    pub const fn new(
        pre: i32,
        pre2: i32,
        main: i32,
        post: i32,
        post2: i32,
        post3: i32,
    ) -> Self {
        Self {
            pre,
            pre2,
            main,
            post,
            post2,
            post3,
        }
    }
}

/// Receive equalizer and analog front-end settings for one lane.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Eq,
    JsonSchema,
    PartialEq,
    Serialize,
)]
#[serde(rename_all = "camelCase")]
pub struct RxSettings {
    /// CTLE peaking code.
    pub ctl_code: i32,
    /// DSP equalization mode.
    pub dsp_mode: i32,
    /// Analog front-end trim.
    pub afe_trim: i32,
    /// Bypass the AC coupling capacitors when non-zero.
    pub ac_coupling_bypass: i32,
}

impl RxSettings {
    pub const fn new(
        ctl_code: i32,
        dsp_mode: i32,
        afe_trim: i32,
        ac_coupling_bypass: i32,
    ) -> Self {
        Self {
            ctl_code,
            dsp_mode,
            afe_trim,
            ac_coupling_bypass,
        }
    }
}

/// The settings for one pin at one profile.
///
/// ASIC-side pins carry both transmit and receive settings; transceiver pins
/// are listed by identity only.
#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct PinConfig {
    pub id: PinId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx: Option<TxSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rx: Option<RxSettings>,
}

impl PinConfig {
    pub fn tuned(id: PinId, tx: TxSettings, rx: RxSettings) -> Self {
        Self {
            id,
            tx: Some(tx),
            rx: Some(rx),
        }
    }

    pub fn bare(id: PinId) -> Self {
        Self {
            id,
            tx: None,
            rx: None,
        }
    }
}

/// All the pins of one port at one profile.
#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct PortPinConfig {
    pub iphy: Vec<PinConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transceiver: Option<Vec<PinConfig>>,
}

wire_enum! {
    /// The role a chip plays in the data path.
    pub enum DataPlanePhyChipType {
        /// SerDes blocks internal to the switch ASIC.
        Iphy = 1 => "IPHY",
        /// A gearbox or retimer between the ASIC and the connector.
        Xphy = 2 => "XPHY",
        /// A front-panel transceiver cage.
        Transceiver = 3 => "TRANSCEIVER",
        /// A backplane connector.
        Backplane = 4 => "BACKPLANE",
    }
}

/// A named chip referenced by the pin mappings.
#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct DataPlanePhyChip {
    pub name: String,
    #[serde(rename = "type")]
    pub chip_type: DataPlanePhyChipType,
    #[serde(rename = "physicalID")]
    pub physical_id: i32,
}

impl DataPlanePhyChip {
    pub fn new(
        name: impl Into<String>,
        chip_type: DataPlanePhyChipType,
        physical_id: i32,
    ) -> Self {
        Self {
            name: name.into(),
            chip_type,
            physical_id,
        }
    }
}

wire_enum! {
    /// Signal modulation on a lane.
    pub enum IpModulation {
        Nrz = 1 => "NRZ",
        Pam4 = 2 => "PAM4",
    }
}

wire_enum! {
    /// Forward error correction scheme.
    pub enum FecMode {
        None = 1 => "NONE",
        Cl74 = 74 => "CL74",
        Cl91 = 91 => "CL91",
        Rs528 = 528 => "RS528",
        Rs544 = 544 => "RS544",
        Rs544x2n = 11 => "RS544_2N",
        Rs545 = 545 => "RS545",
    }
}

wire_enum! {
    /// The physical medium a profile is meant for.
    pub enum TransmitterTechnology {
        Unknown = 0 => "UNKNOWN",
        Copper = 1 => "COPPER",
        Optical = 2 => "OPTICAL",
        Backplane = 3 => "BACKPLANE",
    }
}

wire_enum! {
    /// Electrical interface mode programmed on the SerDes.
    pub enum InterfaceMode {
        Kr = 1 => "KR",
        Kr2 = 2 => "KR2",
        Kr4 = 3 => "KR4",
        Kr8 = 4 => "KR8",
        Caui4 = 5 => "CAUI4",
        Cr = 10 => "CR",
        Cr2 = 11 => "CR2",
        Cr4 = 12 => "CR4",
        Xlaui = 40 => "XLAUI",
    }
}

wire_enum! {
    /// Interface type reported to the MAC.
    pub enum InterfaceType {
        Kr = 1 => "KR",
        Kr2 = 2 => "KR2",
        Kr4 = 3 => "KR4",
        Kr8 = 4 => "KR8",
        Caui4 = 5 => "CAUI4",
        Cr = 10 => "CR",
        Cr2 = 11 => "CR2",
        Cr4 = 12 => "CR4",
        Xlaui = 40 => "XLAUI",
    }
}

impl From<InterfaceMode> for InterfaceType {
    fn from(mode: InterfaceMode) -> Self {
        match mode {
            InterfaceMode::Kr => InterfaceType::Kr,
            InterfaceMode::Kr2 => InterfaceType::Kr2,
            InterfaceMode::Kr4 => InterfaceType::Kr4,
            InterfaceMode::Kr8 => InterfaceType::Kr8,
            InterfaceMode::Caui4 => InterfaceType::Caui4,
            InterfaceMode::Cr => InterfaceType::Cr,
            InterfaceMode::Cr2 => InterfaceType::Cr2,
            InterfaceMode::Cr4 => InterfaceType::Cr4,
            InterfaceMode::Xlaui => InterfaceType::Xlaui,
        }
    }
}

/// The settings for one side of a profile: the lanes, their modulation and
/// the FEC running over them.
#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSideConfig {
    pub num_lanes: i32,
    pub modulation: IpModulation,
    pub fec: FecMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<TransmitterTechnology>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_mode: Option<InterfaceMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_type: Option<InterfaceType>,
}
