// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/
//
// Copyright 2025 Oxide Computer Company

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::lassen;
use crate::mapping::PlatformMapping;
use crate::Error;

/// The platforms this crate carries mapping data for.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Eq,
    PartialEq,
    Serialize,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Lassen,
}

impl Platform {
    /// The shared, immutable mapping for this platform.
    pub fn mapping(&self) -> &'static PlatformMapping {
        match self {
            Platform::Lassen => lassen::lassen(),
        }
    }

    /// Generate a private copy of the mapping, logging as it goes.
    pub fn build(&self, log: &slog::Logger) -> Result<PlatformMapping, Error> {
        match self {
            Platform::Lassen => lassen::generate(log),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Platform::Lassen => write!(f, "lassen"),
        }
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lassen" => Ok(Platform::Lassen),
            _ => Err(Error::InvalidPlatform(s.to_string())),
        }
    }
}
