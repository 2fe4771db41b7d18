use crate::model::faction::Faction;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Index into [`LEADERS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LeaderId(pub u8);

impl LeaderId {
    pub const fn def(self) -> &'static LeaderDef {
        &LEADERS[self.0 as usize]
    }

    pub const fn faction(self) -> Faction {
        self.def().faction
    }

    pub const fn strength(self) -> u8 {
        self.def().strength
    }
}

impl fmt::Display for LeaderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.def().name)
    }
}

#[derive(Debug)]
pub struct LeaderDef {
    pub name: &'static str,
    pub faction: Faction,
    pub strength: u8,
}

pub const LEADER_COUNT: usize = 30;

/// Five leaders per faction, grouped by faction in LOOP order.
pub const LEADERS: [LeaderDef; LEADER_COUNT] = [
    LeaderDef { name: "Maera Voss", faction: Faction::Seer, strength: 10 },
    LeaderDef { name: "Tallis Dray", faction: Faction::Seer, strength: 7 },
    LeaderDef { name: "Orin Veil", faction: Faction::Seer, strength: 5 },
    LeaderDef { name: "Sable Quist", faction: Faction::Seer, strength: 3 },
    LeaderDef { name: "Pell Harrow", faction: Faction::Seer, strength: 2 },
    LeaderDef { name: "Lyrelle", faction: Faction::Siren, strength: 9 },
    LeaderDef { name: "Cantrix Mour", faction: Faction::Siren, strength: 7 },
    LeaderDef { name: "Esha Reln", faction: Faction::Siren, strength: 5 },
    LeaderDef { name: "Vara Sill", faction: Faction::Siren, strength: 4 },
    LeaderDef { name: "Nim Solace", faction: Faction::Siren, strength: 2 },
    LeaderDef { name: "Karsk of the Dunes", faction: Faction::Nomad, strength: 10 },
    LeaderDef { name: "Immra", faction: Faction::Nomad, strength: 8 },
    LeaderDef { name: "Dustwalker Ode", faction: Faction::Nomad, strength: 6 },
    LeaderDef { name: "Senna Vae", faction: Faction::Nomad, strength: 4 },
    LeaderDef { name: "Half-Hand Rook", faction: Faction::Nomad, strength: 2 },
    LeaderDef { name: "Count Maldo", faction: Faction::Betrayer, strength: 9 },
    LeaderDef { name: "Iria Blacktongue", faction: Faction::Betrayer, strength: 8 },
    LeaderDef { name: "Fenn Gristle", faction: Faction::Betrayer, strength: 6 },
    LeaderDef { name: "Whisper", faction: Faction::Betrayer, strength: 3 },
    LeaderDef { name: "Old Creet", faction: Faction::Betrayer, strength: 1 },
    LeaderDef { name: "Praxa Goldvein", faction: Faction::Magnate, strength: 9 },
    LeaderDef { name: "Bursar Welt", faction: Faction::Magnate, strength: 7 },
    LeaderDef { name: "Tessily Marr", faction: Faction::Magnate, strength: 5 },
    LeaderDef { name: "Coin-Counter Brey", faction: Faction::Magnate, strength: 3 },
    LeaderDef { name: "Ledgerman Sorl", faction: Faction::Magnate, strength: 2 },
    LeaderDef { name: "Pilot Ashkern", faction: Faction::Navigator, strength: 10 },
    LeaderDef { name: "Mirelle Fathom", faction: Faction::Navigator, strength: 7 },
    LeaderDef { name: "Chartmaster Hulm", faction: Faction::Navigator, strength: 6 },
    LeaderDef { name: "Stevedore Black", faction: Faction::Navigator, strength: 4 },
    LeaderDef { name: "Tidewatcher Rell", faction: Faction::Navigator, strength: 1 },
];

pub fn all_leaders() -> impl Iterator<Item = LeaderId> {
    (0..LEADER_COUNT as u8).map(LeaderId)
}

pub fn leaders_of(faction: Faction) -> impl Iterator<Item = LeaderId> {
    all_leaders().filter(move |l| l.faction() == faction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_leaders_per_faction() {
        for faction in Faction::LOOP {
            assert_eq!(leaders_of(faction).count(), 5);
        }
    }

    #[test]
    fn strengths_positive() {
        for leader in all_leaders() {
            assert!(leader.strength() >= 1);
            assert!(leader.strength() <= 10);
        }
    }
}
