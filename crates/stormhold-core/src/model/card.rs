use core::fmt;
use serde::{Deserialize, Serialize};

/// Index into [`TREACHERY_DECK`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    pub const fn def(self) -> &'static CardDef {
        &TREACHERY_DECK[self.0 as usize]
    }

    pub const fn kind(self) -> CardKind {
        self.def().kind
    }

    pub const fn is_weapon(self) -> bool {
        matches!(self.kind(), CardKind::Weapon(_) | CardKind::Lasgun)
    }

    pub const fn is_defense(self) -> bool {
        matches!(self.kind(), CardKind::Defense(_))
    }

    pub const fn is_karma(self) -> bool {
        matches!(self.kind(), CardKind::Karma)
    }

    pub const fn is_worthless(self) -> bool {
        matches!(self.kind(), CardKind::Worthless)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.def().name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Blade,
    Venom,
    Lance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefenseKind {
    Shield,
    Antidote,
}

impl DefenseKind {
    /// Whether this defense stops the given weapon. The lasgun is stopped
    /// by nothing; pairing it with a shield detonates instead (see
    /// [`detonates`]).
    pub const fn stops(self, weapon: WeaponKind) -> bool {
        match (self, weapon) {
            (DefenseKind::Shield, WeaponKind::Blade | WeaponKind::Lance) => true,
            (DefenseKind::Antidote, WeaponKind::Venom) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Weapon(WeaponKind),
    Defense(DefenseKind),
    Lasgun,
    Karma,
    /// Stands in for a leader on the battle wheel.
    Surrogate,
    /// Reveals the storm's next move when played.
    StormLore,
    Worthless,
}

impl CardKind {
    /// Broad category used when scoring hand composition.
    pub const fn category(self) -> CardCategory {
        match self {
            CardKind::Weapon(_) | CardKind::Lasgun => CardCategory::Weapon,
            CardKind::Defense(_) => CardCategory::Defense,
            CardKind::Karma => CardCategory::Karma,
            CardKind::Surrogate | CardKind::StormLore => CardCategory::Special,
            CardKind::Worthless => CardCategory::Worthless,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardCategory {
    Weapon,
    Defense,
    Karma,
    Special,
    Worthless,
}

/// A lasgun meeting a shield on either side of the wheel destroys both
/// leaders and every force in the territory.
pub fn detonates(weapon: Option<CardId>, enemy_defense: Option<CardId>) -> bool {
    let lasgun = matches!(weapon.map(CardId::kind), Some(CardKind::Lasgun));
    let shield = matches!(
        enemy_defense.map(CardId::kind),
        Some(CardKind::Defense(DefenseKind::Shield))
    );
    lasgun && shield
}

#[derive(Debug)]
pub struct CardDef {
    pub name: &'static str,
    pub kind: CardKind,
}

pub const DECK_SIZE: usize = 28;

pub const TREACHERY_DECK: [CardDef; DECK_SIZE] = [
    CardDef { name: "Long Blade", kind: CardKind::Weapon(WeaponKind::Blade) },
    CardDef { name: "Short Blade", kind: CardKind::Weapon(WeaponKind::Blade) },
    CardDef { name: "Hooked Blade", kind: CardKind::Weapon(WeaponKind::Blade) },
    CardDef { name: "Twin Blade", kind: CardKind::Weapon(WeaponKind::Blade) },
    CardDef { name: "Ash Venom", kind: CardKind::Weapon(WeaponKind::Venom) },
    CardDef { name: "Pale Venom", kind: CardKind::Weapon(WeaponKind::Venom) },
    CardDef { name: "Night Venom", kind: CardKind::Weapon(WeaponKind::Venom) },
    CardDef { name: "Grey Venom", kind: CardKind::Weapon(WeaponKind::Venom) },
    CardDef { name: "Storm Lance", kind: CardKind::Weapon(WeaponKind::Lance) },
    CardDef { name: "Siege Lance", kind: CardKind::Weapon(WeaponKind::Lance) },
    CardDef { name: "Lasgun", kind: CardKind::Lasgun },
    CardDef { name: "Round Shield", kind: CardKind::Defense(DefenseKind::Shield) },
    CardDef { name: "Tower Shield", kind: CardKind::Defense(DefenseKind::Shield) },
    CardDef { name: "Mirror Shield", kind: CardKind::Defense(DefenseKind::Shield) },
    CardDef { name: "Kite Shield", kind: CardKind::Defense(DefenseKind::Shield) },
    CardDef { name: "Bitter Antidote", kind: CardKind::Defense(DefenseKind::Antidote) },
    CardDef { name: "Sweet Antidote", kind: CardKind::Defense(DefenseKind::Antidote) },
    CardDef { name: "Clear Antidote", kind: CardKind::Defense(DefenseKind::Antidote) },
    CardDef { name: "Dusk Antidote", kind: CardKind::Defense(DefenseKind::Antidote) },
    CardDef { name: "Karma", kind: CardKind::Karma },
    CardDef { name: "Karma", kind: CardKind::Karma },
    CardDef { name: "Hired Champion", kind: CardKind::Surrogate },
    CardDef { name: "Storm Charts", kind: CardKind::StormLore },
    CardDef { name: "Bent Compass", kind: CardKind::Worthless },
    CardDef { name: "Cracked Lens", kind: CardKind::Worthless },
    CardDef { name: "Empty Flask", kind: CardKind::Worthless },
    CardDef { name: "Frayed Rope", kind: CardKind::Worthless },
    CardDef { name: "Dry Inkwell", kind: CardKind::Worthless },
];

pub fn all_cards() -> impl Iterator<Item = CardId> {
    (0..DECK_SIZE as u8).map(CardId)
}

/// Number of deck cards in the given category.
pub fn category_count(category: CardCategory) -> usize {
    all_cards()
        .filter(|c| c.kind().category() == category)
        .count()
}
