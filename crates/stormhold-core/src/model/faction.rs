use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Faction {
    Seer = 0,
    Siren = 1,
    Nomad = 2,
    Betrayer = 3,
    Magnate = 4,
    Navigator = 5,
}

impl Faction {
    pub const COUNT: usize = 6;

    pub const LOOP: [Faction; 6] = [
        Faction::Seer,
        Faction::Siren,
        Faction::Nomad,
        Faction::Betrayer,
        Faction::Magnate,
        Faction::Navigator,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Faction::Seer),
            1 => Some(Faction::Siren),
            2 => Some(Faction::Nomad),
            3 => Some(Faction::Betrayer),
            4 => Some(Faction::Magnate),
            5 => Some(Faction::Navigator),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Capability record for this faction, resolved once at construction.
    pub const fn permissions(self) -> FactionPermissions {
        match self {
            Faction::Seer => FactionPermissions {
                may_prescience: true,
                may_voice: false,
                auction_foresight: true,
                traitor_network: false,
                elite_specials: false,
                forces_fight_unpaid: false,
                half_rate_shipping: false,
                off_board_transfer: false,
                local_placement: false,
                storm_lore: false,
                treasury_income: false,
                free_revivals: 1,
            },
            Faction::Siren => FactionPermissions {
                may_prescience: false,
                may_voice: true,
                auction_foresight: false,
                traitor_network: false,
                elite_specials: false,
                forces_fight_unpaid: false,
                half_rate_shipping: false,
                off_board_transfer: false,
                local_placement: false,
                storm_lore: false,
                treasury_income: false,
                free_revivals: 1,
            },
            Faction::Nomad => FactionPermissions {
                may_prescience: false,
                may_voice: false,
                auction_foresight: false,
                traitor_network: false,
                elite_specials: true,
                forces_fight_unpaid: true,
                half_rate_shipping: false,
                off_board_transfer: false,
                local_placement: true,
                storm_lore: true,
                treasury_income: false,
                free_revivals: 3,
            },
            Faction::Betrayer => FactionPermissions {
                may_prescience: false,
                may_voice: false,
                auction_foresight: false,
                traitor_network: true,
                elite_specials: false,
                forces_fight_unpaid: false,
                half_rate_shipping: false,
                off_board_transfer: false,
                local_placement: false,
                storm_lore: false,
                treasury_income: false,
                free_revivals: 2,
            },
            Faction::Magnate => FactionPermissions {
                may_prescience: false,
                may_voice: false,
                auction_foresight: false,
                traitor_network: false,
                elite_specials: true,
                forces_fight_unpaid: false,
                half_rate_shipping: false,
                off_board_transfer: false,
                local_placement: false,
                storm_lore: false,
                treasury_income: true,
                free_revivals: 1,
            },
            Faction::Navigator => FactionPermissions {
                may_prescience: false,
                may_voice: false,
                auction_foresight: false,
                traitor_network: false,
                elite_specials: false,
                forces_fight_unpaid: false,
                half_rate_shipping: true,
                off_board_transfer: true,
                local_placement: false,
                storm_lore: false,
                treasury_income: false,
                free_revivals: 1,
            },
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Faction::Seer => "Seer",
            Faction::Siren => "Siren",
            Faction::Nomad => "Nomad",
            Faction::Betrayer => "Betrayer",
            Faction::Magnate => "Magnate",
            Faction::Navigator => "Navigator",
        };
        f.write_str(label)
    }
}

/// Named per-faction rule exceptions.
///
/// Every field is an explicit flag; nothing here is toggled by name at
/// runtime. `free_revivals` is the per-round count of forces revived
/// without payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactionPermissions {
    pub may_prescience: bool,
    pub may_voice: bool,
    pub auction_foresight: bool,
    pub traitor_network: bool,
    pub elite_specials: bool,
    pub forces_fight_unpaid: bool,
    pub half_rate_shipping: bool,
    pub off_board_transfer: bool,
    pub local_placement: bool,
    pub storm_lore: bool,
    pub treasury_income: bool,
    pub free_revivals: u8,
}
