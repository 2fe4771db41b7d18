use crate::model::faction::Faction;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Index into [`TERRITORIES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TerritoryId(pub u8);

impl TerritoryId {
    pub const fn def(self) -> &'static TerritoryDef {
        &TERRITORIES[self.0 as usize]
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub fn adjacent(self) -> impl Iterator<Item = TerritoryId> {
        self.def().adjacent.iter().map(|&id| TerritoryId(id))
    }

    pub const fn is_stronghold(self) -> bool {
        self.def().stronghold
    }

    pub const fn is_cache(self) -> bool {
        self.def().cache
    }

    pub const fn sector(self) -> u8 {
        self.def().sector
    }

    /// Sheltered territories are never swept by the storm.
    pub const fn is_sheltered(self) -> bool {
        self.def().sheltered
    }
}

impl fmt::Display for TerritoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.def().name)
    }
}

/// Static attributes of one board territory.
#[derive(Debug)]
pub struct TerritoryDef {
    pub name: &'static str,
    /// Storm track sector, 0..SECTOR_COUNT.
    pub sector: u8,
    pub sheltered: bool,
    pub stronghold: bool,
    /// Resource caches appear here during collection rounds.
    pub cache: bool,
    /// Home ground: the owning faction places forces here without shipping.
    pub home: Option<Faction>,
    pub adjacent: &'static [u8],
}

pub const SECTOR_COUNT: u8 = 12;
pub const TERRITORY_COUNT: usize = 16;

pub const TERRITORIES: [TerritoryDef; TERRITORY_COUNT] = [
    TerritoryDef {
        name: "Dawn Citadel",
        sector: 1,
        sheltered: true,
        stronghold: true,
        cache: false,
        home: None,
        adjacent: &[5, 6, 14],
    },
    TerritoryDef {
        name: "Basalt Keep",
        sector: 4,
        sheltered: true,
        stronghold: true,
        cache: false,
        home: None,
        adjacent: &[6, 7, 8],
    },
    TerritoryDef {
        name: "Harbor Bastion",
        sector: 7,
        sheltered: true,
        stronghold: true,
        cache: false,
        home: None,
        adjacent: &[8, 9, 15],
    },
    TerritoryDef {
        name: "Saltglass Tower",
        sector: 10,
        sheltered: true,
        stronghold: true,
        cache: false,
        home: None,
        adjacent: &[9, 10, 11],
    },
    TerritoryDef {
        name: "Old Granary",
        sector: 2,
        sheltered: true,
        stronghold: true,
        cache: false,
        home: None,
        adjacent: &[5, 11, 14],
    },
    TerritoryDef {
        name: "Ember Flats",
        sector: 0,
        sheltered: false,
        stronghold: false,
        cache: true,
        home: None,
        adjacent: &[0, 4, 6, 11],
    },
    TerritoryDef {
        name: "Mirror Dunes",
        sector: 3,
        sheltered: false,
        stronghold: false,
        cache: true,
        home: None,
        adjacent: &[0, 1, 5, 7],
    },
    TerritoryDef {
        name: "Glass Basin",
        sector: 5,
        sheltered: false,
        stronghold: false,
        cache: true,
        home: None,
        adjacent: &[1, 6, 8],
    },
    TerritoryDef {
        name: "Cinder Reach",
        sector: 6,
        sheltered: false,
        stronghold: false,
        cache: true,
        home: None,
        adjacent: &[1, 2, 7, 9],
    },
    TerritoryDef {
        name: "Broken Causeway",
        sector: 8,
        sheltered: false,
        stronghold: false,
        cache: false,
        home: None,
        adjacent: &[2, 3, 8, 10],
    },
    TerritoryDef {
        name: "The Scour",
        sector: 9,
        sheltered: false,
        stronghold: false,
        cache: true,
        home: None,
        adjacent: &[3, 9, 11, 12],
    },
    TerritoryDef {
        name: "Windgap",
        sector: 11,
        sheltered: false,
        stronghold: false,
        cache: false,
        home: None,
        adjacent: &[3, 4, 5, 10, 12],
    },
    TerritoryDef {
        name: "Hidden Oasis",
        sector: 9,
        sheltered: true,
        stronghold: false,
        cache: false,
        home: Some(Faction::Nomad),
        adjacent: &[10, 11, 13],
    },
    TerritoryDef {
        name: "Shifting Shelf",
        sector: 10,
        sheltered: false,
        stronghold: false,
        cache: false,
        home: None,
        adjacent: &[12, 14, 15],
    },
    TerritoryDef {
        name: "Pilgrim Road",
        sector: 0,
        sheltered: false,
        stronghold: false,
        cache: false,
        home: None,
        adjacent: &[0, 4, 13, 15],
    },
    TerritoryDef {
        name: "The Anvil",
        sector: 6,
        sheltered: false,
        stronghold: false,
        cache: false,
        home: None,
        adjacent: &[2, 13, 14],
    },
];

pub fn all_territories() -> impl Iterator<Item = TerritoryId> {
    (0..TERRITORY_COUNT as u8).map(TerritoryId)
}

pub fn strongholds() -> impl Iterator<Item = TerritoryId> {
    all_territories().filter(|t| t.is_stronghold())
}

/// Distance in sectors from `sector` to the storm front at `storm`,
/// measured along the storm's direction of travel.
pub const fn sectors_until_storm(sector: u8, storm: u8) -> u8 {
    (sector + SECTOR_COUNT - storm) % SECTOR_COUNT
}
