// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/
//
// Copyright 2025 Oxide Computer Company

//! Platform mappings for switch hardware.
//!
//! A switch ASIC exposes its SerDes lanes through a number of internal
//! blocks; on the Gibraltar-class parts these are the IFGs. It is up to the
//! platform, the board housing the ASIC, to route those lanes to the
//! front-panel connectors, and up to the platform's bring-up data to say how
//! each lane must be tuned at each supported speed. This crate carries that
//! data for each platform we support, as a strongly-typed document:
//!
//! - the _port mappings_, which tie each logical port to the ordered list of
//!   ASIC lanes and the connector lanes they are wired to;
//! - the per-port _supported profiles_, which give the transmit taps and
//!   receive equalizer settings for every lane at a given profile;
//! - the _chip inventory_ and the platform-wide _profile table_.
//!
//! The document is authored as compact constant tables (see
//! [`static_mapping`]) and expanded once, on first use, into a
//! [`PlatformMapping`]. It is never modified afterwards. Consumers that want
//! the canonical JSON rendering of the document can ask for it with
//! [`PlatformMapping::to_json`].

// Declare a C-like enum that travels over the wire as its integer value.
//
// Every enum in the mapping document is encoded this way, so this generates
// the integer conversions, the serde plumbing, a schema that describes the
// integer encoding, and a `Display` impl using the conventional upper-case
// name of each variant.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal => $display:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            Debug,
            serde::Deserialize,
            Eq,
            Hash,
            Ord,
            PartialEq,
            PartialOrd,
            serde::Serialize,
        )]
        #[serde(try_from = "i32", into = "i32")]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant = $value,
            )+
        }

        impl $name {
            /// The conventional name of this value.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $display, )+
                }
            }
        }

        impl From<$name> for i32 {
            fn from(x: $name) -> i32 {
                x as i32
            }
        }

        impl TryFrom<i32> for $name {
            type Error = crate::Error;

            fn try_from(x: i32) -> Result<Self, Self::Error> {
                match x {
                    $( $value => Ok($name::$variant), )+
                    _ => Err(crate::Error::InvalidEnumValue {
                        kind: stringify!($name),
                        value: x,
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl schemars::JsonSchema for $name {
            fn schema_name() -> String {
                stringify!($name).to_string()
            }

            fn json_schema(
                gen: &mut schemars::gen::SchemaGenerator,
            ) -> schemars::schema::Schema {
                <i32 as schemars::JsonSchema>::json_schema(gen)
            }
        }
    };
}

pub mod lassen;
pub mod mapping;
pub mod phy;
pub mod platform;
pub mod port;
pub mod profile;
pub mod static_mapping;

pub use mapping::PlatformMapping;
pub use platform::Platform;
pub use profile::PortProfileId;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Invalid {kind} value {value}")]
    InvalidEnumValue { kind: &'static str, value: i32 },

    #[error("Invalid port profile '{0}'")]
    InvalidProfile(String),

    #[error("Invalid platform '{0}'")]
    InvalidPlatform(String),

    #[error("Port {0} appears more than once")]
    DuplicatePort(i32),

    #[error("Chip '{0}' appears more than once")]
    DuplicateChip(String),

    #[error("Profile {0} appears more than once in the profile table")]
    DuplicateProfile(PortProfileId),

    #[error("Port {port} is tuned more than once for {profile}")]
    DuplicateTuning { port: i32, profile: PortProfileId },

    #[error("Tuning given for port {0}, which has no lane map")]
    NoSuchPort(i32),

    #[error("Port {port} is not wired to lane {lane} of {chip}")]
    UnwiredLane { port: i32, chip: String, lane: i32 },

    #[error("Failed to render mapping: {0}")]
    Render(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Render(e.to_string())
    }
}
