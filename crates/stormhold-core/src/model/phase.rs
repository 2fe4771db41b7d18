use core::fmt;
use serde::{Deserialize, Serialize};

/// Round phases in play order. The rule engine advances phases; the bot
/// only ever observes the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Phase {
    Storm = 0,
    Bidding = 1,
    Revival = 2,
    Shipment = 3,
    Battle = 4,
    Collection = 5,
    Bargain = 6,
}

impl Phase {
    pub const LOOP: [Phase; 7] = [
        Phase::Storm,
        Phase::Bidding,
        Phase::Revival,
        Phase::Shipment,
        Phase::Battle,
        Phase::Collection,
        Phase::Bargain,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Storm => "Storm",
            Phase::Bidding => "Bidding",
            Phase::Revival => "Revival",
            Phase::Shipment => "Shipment",
            Phase::Battle => "Battle",
            Phase::Collection => "Collection",
            Phase::Bargain => "Bargain",
        };
        f.write_str(label)
    }
}
