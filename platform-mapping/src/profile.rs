// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/
//
// Copyright 2025 Oxide Computer Company

//! Port profiles and the platform-wide profile table.
//!
//! A profile names a combination of speed, lane count, modulation, FEC and
//! medium. The name alone fixes all of those; the platform table adds the
//! interface mode the platform programs for it.

use std::str::FromStr;

use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

use crate::phy::FecMode;
use crate::phy::IpModulation;
use crate::phy::ProfileSideConfig;
use crate::phy::TransmitterTechnology;
use crate::Error;

wire_enum! {
    /// The port profiles used by this platform family.
    #[derive(strum::EnumIter)]
    pub enum PortProfileId {
        Profile10G1NrzNofecCopper = 11 => "PROFILE_10G_1_NRZ_NOFEC_COPPER",
        Profile10G1NrzNofecOptical = 12 => "PROFILE_10G_1_NRZ_NOFEC_OPTICAL",
        Profile20G2NrzNofecCopper = 13 => "PROFILE_20G_2_NRZ_NOFEC_COPPER",
        Profile25G1NrzNofecCopper = 14 => "PROFILE_25G_1_NRZ_NOFEC_COPPER",
        Profile25G1NrzCl74Copper = 15 => "PROFILE_25G_1_NRZ_CL74_COPPER",
        Profile25G1NrzRs528Copper = 16 => "PROFILE_25G_1_NRZ_RS528_COPPER",
        Profile40G4NrzNofecCopper = 17 => "PROFILE_40G_4_NRZ_NOFEC_COPPER",
        Profile40G4NrzNofecOptical = 18 => "PROFILE_40G_4_NRZ_NOFEC_OPTICAL",
        Profile50G2NrzNofecCopper = 19 => "PROFILE_50G_2_NRZ_NOFEC_COPPER",
        Profile50G2NrzCl74Copper = 20 => "PROFILE_50G_2_NRZ_CL74_COPPER",
        Profile50G2NrzRs528Copper = 21 => "PROFILE_50G_2_NRZ_RS528_COPPER",
        Profile100G4NrzRs528Copper = 22 => "PROFILE_100G_4_NRZ_RS528_COPPER",
        Profile100G4NrzRs528Optical = 23 => "PROFILE_100G_4_NRZ_RS528_OPTICAL",
        Profile200G4Pam4Rs544x2nCopper =
            24 => "PROFILE_200G_4_PAM4_RS544X2N_COPPER",
        Profile200G4Pam4Rs544x2nOptical =
            25 => "PROFILE_200G_4_PAM4_RS544X2N_OPTICAL",
        Profile400G8Pam4Rs544x2nOptical =
            26 => "PROFILE_400G_8_PAM4_RS544X2N_OPTICAL",
    }
}

impl PortProfileId {
    /// Port speed in Mb/s.
    pub const fn speed(&self) -> i32 {
        use PortProfileId::*;
        match self {
            Profile10G1NrzNofecCopper | Profile10G1NrzNofecOptical => 10_000,
            Profile20G2NrzNofecCopper => 20_000,
            Profile25G1NrzNofecCopper
            | Profile25G1NrzCl74Copper
            | Profile25G1NrzRs528Copper => 25_000,
            Profile40G4NrzNofecCopper | Profile40G4NrzNofecOptical => 40_000,
            Profile50G2NrzNofecCopper
            | Profile50G2NrzCl74Copper
            | Profile50G2NrzRs528Copper => 50_000,
            Profile100G4NrzRs528Copper | Profile100G4NrzRs528Optical => {
                100_000
            }
            Profile200G4Pam4Rs544x2nCopper
            | Profile200G4Pam4Rs544x2nOptical => 200_000,
            Profile400G8Pam4Rs544x2nOptical => 400_000,
        }
    }

    /// Number of SerDes lanes the profile occupies.
    pub const fn num_lanes(&self) -> i32 {
        use PortProfileId::*;
        match self {
            Profile10G1NrzNofecCopper
            | Profile10G1NrzNofecOptical
            | Profile25G1NrzNofecCopper
            | Profile25G1NrzCl74Copper
            | Profile25G1NrzRs528Copper => 1,
            Profile20G2NrzNofecCopper
            | Profile50G2NrzNofecCopper
            | Profile50G2NrzCl74Copper
            | Profile50G2NrzRs528Copper => 2,
            Profile40G4NrzNofecCopper
            | Profile40G4NrzNofecOptical
            | Profile100G4NrzRs528Copper
            | Profile100G4NrzRs528Optical
            | Profile200G4Pam4Rs544x2nCopper
            | Profile200G4Pam4Rs544x2nOptical => 4,
            Profile400G8Pam4Rs544x2nOptical => 8,
        }
    }

    pub const fn modulation(&self) -> IpModulation {
        use PortProfileId::*;
        match self {
            Profile200G4Pam4Rs544x2nCopper
            | Profile200G4Pam4Rs544x2nOptical
            | Profile400G8Pam4Rs544x2nOptical => IpModulation::Pam4,
            _ => IpModulation::Nrz,
        }
    }

    pub const fn fec(&self) -> FecMode {
        use PortProfileId::*;
        match self {
            Profile25G1NrzCl74Copper | Profile50G2NrzCl74Copper => {
                FecMode::Cl74
            }
            Profile25G1NrzRs528Copper
            | Profile50G2NrzRs528Copper
            | Profile100G4NrzRs528Copper
            | Profile100G4NrzRs528Optical => FecMode::Rs528,
            Profile200G4Pam4Rs544x2nCopper
            | Profile200G4Pam4Rs544x2nOptical
            | Profile400G8Pam4Rs544x2nOptical => FecMode::Rs544x2n,
            _ => FecMode::None,
        }
    }

    pub const fn medium(&self) -> TransmitterTechnology {
        use PortProfileId::*;
        match self {
            Profile10G1NrzNofecOptical
            | Profile40G4NrzNofecOptical
            | Profile100G4NrzRs528Optical
            | Profile200G4Pam4Rs544x2nOptical
            | Profile400G8Pam4Rs544x2nOptical => TransmitterTechnology::Optical,
            _ => TransmitterTechnology::Copper,
        }
    }
}

impl FromStr for PortProfileId {
    type Err = Error;

    /// Accept either the conventional name, in any case, or the numeric id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use strum::IntoEnumIterator;

        if let Ok(id) = s.parse::<i32>() {
            return PortProfileId::try_from(id)
                .map_err(|_| Error::InvalidProfile(s.to_string()));
        }
        PortProfileId::iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidProfile(s.to_string()))
    }
}

/// The full description of a profile: its speed and the settings on each
/// side of any external PHY.
#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortProfileConfig {
    /// Speed in Mb/s.
    pub speed: i32,
    pub iphy: ProfileSideConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xphy_line: Option<ProfileSideConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xphy_system: Option<ProfileSideConfig>,
}

/// What a profile table entry is keyed on.
#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct PlatformPortConfigFactor {
    #[serde(rename = "profileID")]
    pub profile_id: PortProfileId,
}

/// One row of the platform-wide profile table.
#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct PlatformPortProfileConfigEntry {
    pub factor: PlatformPortConfigFactor,
    pub profile: PortProfileConfig,
}

impl PlatformPortProfileConfigEntry {
    pub fn new(profile_id: PortProfileId, profile: PortProfileConfig) -> Self {
        Self {
            factor: PlatformPortConfigFactor { profile_id },
            profile,
        }
    }

    pub fn profile_id(&self) -> PortProfileId {
        self.factor.profile_id
    }
}
