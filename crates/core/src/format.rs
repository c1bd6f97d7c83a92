//! Format tags and section identifiers
//!
//! The first four bytes of a cache stream, read big-endian, identify which
//! historical layout follows. The set is closed: there is no best-effort
//! fallback for unknown tags.

use serde::Serialize;
use std::fmt;

/// Known appinfo layouts, keyed by their leading big-endian magic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FormatTag {
    /// `"VDF\x02"`, the oldest layout
    Vdf2,
    /// `0x24445606`
    V24,
    /// `0x25445607`, same shape as 24
    V25,
    /// `0x26445607`, adds token and content digest
    V26,
    /// `0x27445607`, drops section framing
    V27,
    /// `0x28445607`, adds a verified payload digest
    V28,
    /// `0x29445607`, adds the out-of-line string table
    V29,
}

impl FormatTag {
    /// Every known tag, oldest first
    pub const ALL: [FormatTag; 7] = [
        FormatTag::Vdf2,
        FormatTag::V24,
        FormatTag::V25,
        FormatTag::V26,
        FormatTag::V27,
        FormatTag::V28,
        FormatTag::V29,
    ];

    /// Big-endian magic value for this layout
    pub const fn magic(self) -> u32 {
        match self {
            FormatTag::Vdf2 => u32::from_be_bytes(*b"VDF\x02"),
            FormatTag::V24 => 0x2444_5606,
            FormatTag::V25 => 0x2544_5607,
            FormatTag::V26 => 0x2644_5607,
            FormatTag::V27 => 0x2744_5607,
            FormatTag::V28 => 0x2844_5607,
            FormatTag::V29 => 0x2944_5607,
        }
    }

    /// Resolve a magic value, `None` if it is not a known layout
    pub fn from_magic(magic: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.magic() == magic)
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormatTag::Vdf2 => "VDF2",
            FormatTag::V24 => "v24",
            FormatTag::V25 => "v25",
            FormatTag::V26 => "v26",
            FormatTag::V27 => "v27",
            FormatTag::V28 => "v28",
            FormatTag::V29 => "v29",
        };
        f.write_str(name)
    }
}

/// Section identifiers used by the section-framed layouts (VDF2 through 26)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Section {
    /// Whole-entry section
    All = 1,
    /// Common info (also the first section)
    Common = 2,
    /// Extended info
    Extended = 3,
    /// Launch configuration
    Config = 4,
    /// Stats
    Stats = 5,
    /// Install scripts
    Install = 6,
    /// Depots
    Depots = 7,
    /// Steam cloud (UFS)
    Ufs = 10,
    /// OGG
    Ogg = 11,
    /// Policies
    Policies = 13,
    /// System requirements
    SysReqs = 14,
    /// Community
    Community = 15,
    /// Store
    Store = 16,
    /// Localization
    Localization = 17,
    /// Broadcast game data
    BroadcastGameData = 18,
    /// Computed
    Computed = 19,
    /// Album metadata
    AlbumMetadata = 20,
}

impl Section {
    /// Resolve a section id byte; `0` is the end-of-entry marker and is not
    /// a section.
    pub fn from_id(id: u8) -> Option<Self> {
        Some(match id {
            1 => Section::All,
            2 => Section::Common,
            3 => Section::Extended,
            4 => Section::Config,
            5 => Section::Stats,
            6 => Section::Install,
            7 => Section::Depots,
            10 => Section::Ufs,
            11 => Section::Ogg,
            13 => Section::Policies,
            14 => Section::SysReqs,
            15 => Section::Community,
            16 => Section::Store,
            17 => Section::Localization,
            18 => Section::BroadcastGameData,
            19 => Section::Computed,
            20 => Section::AlbumMetadata,
            _ => return None,
        })
    }

    /// The id byte as stored in the stream
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Key under which the section's map is stored in an entry's root
    pub fn name(self) -> &'static str {
        match self {
            Section::All => "all",
            Section::Common => "common",
            Section::Extended => "extended",
            Section::Config => "config",
            Section::Stats => "stats",
            Section::Install => "install",
            Section::Depots => "depots",
            Section::Ufs => "ufs",
            Section::Ogg => "ogg",
            Section::Policies => "policies",
            Section::SysReqs => "sysreqs",
            Section::Community => "community",
            Section::Store => "store",
            Section::Localization => "localization",
            Section::BroadcastGameData => "broadcastgamedata",
            Section::Computed => "computed",
            Section::AlbumMetadata => "albummetadata",
        }
    }
}
