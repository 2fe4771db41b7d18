//! The bot's belief state, derived on demand from the authoritative view.
//!
//! Everything here is a pure function of [`GameStateView`] plus the bot's
//! knowledge grants. Nothing is cached across decisions; two calls with
//! no intervening state change return identical results.

use stormhold_core::model::card::{CardCategory, CardKind, DefenseKind, WeaponKind, all_cards};
use stormhold_core::model::leader::LeaderId;
use stormhold_core::{CardId, Faction, GameStateView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderSafety {
    Safe,
    PossiblyTraitor,
    KnownTraitor,
}

#[derive(Debug, Clone, Copy)]
pub struct Knowledge<'a> {
    view: &'a GameStateView,
}

impl<'a> Knowledge<'a> {
    pub fn new(view: &'a GameStateView) -> Self {
        Self { view }
    }

    /// Deck cards whose location the bot cannot pin down: not in hand,
    /// not revealed, not granted as known in a specific opponent's hand.
    pub fn cards_unknown_to_me(&self) -> Vec<CardId> {
        all_cards()
            .filter(|card| !self.view.my_hand().contains(card))
            .filter(|card| !self.view.revealed_cards().contains(card))
            .filter(|card| {
                !self
                    .view
                    .grants()
                    .known_cards
                    .iter()
                    .any(|(_, known)| known == card)
            })
            .collect()
    }

    /// Cards granted as known in `opponent`'s hand.
    pub fn known_held_by(&self, opponent: Faction) -> Vec<CardId> {
        self.view
            .grants()
            .known_cards
            .iter()
            .filter(|(holder, _)| *holder == opponent)
            .map(|(_, card)| *card)
            .collect()
    }

    /// How many of `opponent`'s hand cards the bot has no identity for.
    pub fn opponent_unknown_count(&self, opponent: Faction) -> u8 {
        let known = self.known_held_by(opponent).len() as u8;
        self.view.hand_size(opponent).saturating_sub(known)
    }

    /// Everything `opponent` might be holding: cards known to sit in
    /// their hand plus the globally unknown pool.
    pub fn cards_opponent_might_have(&self, opponent: Faction) -> Vec<CardId> {
        let mut cards = self.known_held_by(opponent);
        cards.extend(self.cards_unknown_to_me());
        cards.sort();
        cards.dedup();
        cards
    }

    /// Whether `opponent` has seen the named card in the bot's hand.
    pub fn is_known_to_opponent(&self, opponent: Faction, card: CardId) -> bool {
        self.view
            .grants()
            .my_cards_seen_by
            .iter()
            .any(|(observer, seen)| *observer == opponent && *seen == card)
    }

    /// 0-5 heuristic score: kind rarity/utility, bumped for a category
    /// the bot lacks entirely and docked for a duplicate category.
    pub fn card_quality(&self, card: CardId) -> u8 {
        let base: i8 = match card.kind() {
            CardKind::Lasgun => 5,
            CardKind::Karma => 4,
            CardKind::Weapon(_) => 3,
            CardKind::Defense(_) => 3,
            CardKind::Surrogate => 2,
            CardKind::StormLore => 2,
            CardKind::Worthless => 0,
        };

        let category = card.kind().category();
        let held_in_category = self
            .view
            .my_hand()
            .iter()
            .filter(|held| **held != card && held.kind().category() == category)
            .count();

        let adjusted = if category == CardCategory::Worthless {
            base
        } else if held_in_category == 0 {
            base + 1
        } else if held_in_category >= 2 {
            base - 1
        } else {
            base
        };

        adjusted.clamp(0, 5) as u8
    }

    /// Classification of an enemy leader the bot may face.
    pub fn enemy_leader_safety(&self, leader: LeaderId) -> LeaderSafety {
        if self.view.grants().my_traitors.contains(&leader) {
            LeaderSafety::KnownTraitor
        } else if self.traitor_network_active() {
            LeaderSafety::PossiblyTraitor
        } else {
            LeaderSafety::Safe
        }
    }

    /// Classification of the bot's own leader: is it sworn against us?
    pub fn own_leader_safety(&self, leader: LeaderId) -> LeaderSafety {
        if self.view.grants().compromised_leaders.contains(&leader) {
            LeaderSafety::KnownTraitor
        } else if self.any_traitor_holder_in_game() {
            LeaderSafety::PossiblyTraitor
        } else {
            LeaderSafety::Safe
        }
    }

    fn traitor_network_active(&self) -> bool {
        !self.view.grants().my_traitors.is_empty()
    }

    fn any_traitor_holder_in_game(&self) -> bool {
        Faction::LOOP
            .iter()
            .any(|f| *f != self.view.my_faction() && f.permissions().traitor_network)
    }

    /// Count of unknown-pool cards that would stop the given weapon.
    pub fn counters_unknown(&self, opponent: Faction, weapon: WeaponKind) -> usize {
        self.cards_opponent_might_have(opponent)
            .iter()
            .filter(|card| !self.known_held_by(opponent).contains(card))
            .filter(|card| match card.kind() {
                CardKind::Defense(kind) => kind.stops(weapon),
                _ => false,
            })
            .count()
    }

    /// Probability that a hand of `hand_size` drawn without replacement
    /// from `unknown_pool` cards contains none of the `dangerous` ones.
    pub fn chance_hand_avoids(hand_size: u8, unknown_pool: usize, dangerous: usize) -> f64 {
        if dangerous == 0 || unknown_pool == 0 {
            return 1.0;
        }
        if dangerous >= unknown_pool {
            return 0.0;
        }

        let mut chance = 1.0;
        for i in 0..hand_size as usize {
            if i >= unknown_pool {
                break;
            }
            let safe_left = unknown_pool.saturating_sub(dangerous + i);
            if safe_left == 0 {
                return 0.0;
            }
            chance *= safe_left as f64 / (unknown_pool - i) as f64;
        }
        chance
    }
}

/// Whether a card kind kills through the given defense.
pub fn weapon_beats(kind: CardKind, defense: Option<DefenseKind>) -> bool {
    match kind {
        CardKind::Lasgun => true,
        CardKind::Weapon(weapon) => match defense {
            Some(defense) => !defense.stops(weapon),
            None => true,
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stormhold_core::model::card::all_cards;
    use stormhold_core::{GameStateViewBuilder, Phase};

    fn card_of(kind: CardKind) -> CardId {
        all_cards().find(|c| c.kind() == kind).expect("card in deck")
    }

    #[test]
    fn unknown_pool_excludes_hand_revealed_and_grants() {
        let shield = card_of(CardKind::Defense(DefenseKind::Shield));
        let lasgun = card_of(CardKind::Lasgun);
        let karma = card_of(CardKind::Karma);
        let view = GameStateViewBuilder::new(Faction::Seer, Phase::Bidding)
            .hand(vec![shield])
            .revealed(lasgun)
            .known_card(Faction::Betrayer, karma)
            .build();
        let knowledge = Knowledge::new(&view);
        let unknown = knowledge.cards_unknown_to_me();
        assert!(!unknown.contains(&shield));
        assert!(!unknown.contains(&lasgun));
        assert!(!unknown.contains(&karma));
        assert_eq!(unknown.len(), stormhold_core::model::card::DECK_SIZE - 3);
    }

    #[test]
    fn unknown_queries_are_deterministic() {
        let view = GameStateViewBuilder::new(Faction::Siren, Phase::Bidding)
            .hand(vec![CardId(0)])
            .build();
        let knowledge = Knowledge::new(&view);
        assert_eq!(
            knowledge.cards_unknown_to_me(),
            knowledge.cards_unknown_to_me()
        );
        assert_eq!(
            knowledge.card_quality(CardId(11)),
            knowledge.card_quality(CardId(11))
        );
    }

    #[test]
    fn might_have_unions_known_and_unknown() {
        let karma = card_of(CardKind::Karma);
        let view = GameStateViewBuilder::new(Faction::Seer, Phase::Bidding)
            .known_card(Faction::Betrayer, karma)
            .hand_size(Faction::Betrayer, 3)
            .build();
        let knowledge = Knowledge::new(&view);
        let might = knowledge.cards_opponent_might_have(Faction::Betrayer);
        assert!(might.contains(&karma));
        assert_eq!(knowledge.opponent_unknown_count(Faction::Betrayer), 2);
    }

    #[test]
    fn quality_rewards_missing_category() {
        let blade = card_of(CardKind::Weapon(WeaponKind::Blade));
        let empty_hand = GameStateViewBuilder::new(Faction::Seer, Phase::Bidding).build();
        // No weapon in hand: a weapon is upgraded.
        assert_eq!(Knowledge::new(&empty_hand).card_quality(blade), 4);

        let venom = card_of(CardKind::Weapon(WeaponKind::Venom));
        let lance = card_of(CardKind::Weapon(WeaponKind::Lance));
        let stacked = GameStateViewBuilder::new(Faction::Seer, Phase::Bidding)
            .hand(vec![venom, lance])
            .build();
        // Two weapons already held: a third is docked.
        assert_eq!(Knowledge::new(&stacked).card_quality(blade), 2);
    }

    #[test]
    fn worthless_never_upgraded() {
        let worthless = card_of(CardKind::Worthless);
        let view = GameStateViewBuilder::new(Faction::Seer, Phase::Bidding).build();
        assert_eq!(Knowledge::new(&view).card_quality(worthless), 0);
    }

    #[test]
    fn hypergeometric_endpoints() {
        assert_eq!(Knowledge::chance_hand_avoids(4, 20, 0), 1.0);
        assert_eq!(Knowledge::chance_hand_avoids(4, 0, 0), 1.0);
        assert_eq!(Knowledge::chance_hand_avoids(1, 3, 3), 0.0);
    }

    #[test]
    fn hypergeometric_matches_product_formula() {
        // k=2, u=10, w=3: (7/10)*(6/9)
        let expected = 7.0 / 10.0 * (6.0 / 9.0);
        let got = Knowledge::chance_hand_avoids(2, 10, 3);
        assert!((got - expected).abs() < 1e-12);
    }

    #[test]
    fn hypergeometric_monotone_in_dangerous_count() {
        let mut last = 1.0;
        for dangerous in 0..8 {
            let chance = Knowledge::chance_hand_avoids(3, 12, dangerous);
            assert!(chance <= last + 1e-12);
            last = chance;
        }
    }

    #[test]
    fn seen_cards_tracked_per_observer() {
        let blade = card_of(CardKind::Weapon(WeaponKind::Blade));
        let view = GameStateViewBuilder::new(Faction::Seer, Phase::Battle)
            .hand(vec![blade])
            .card_seen_by(Faction::Siren, blade)
            .build();
        let knowledge = Knowledge::new(&view);
        assert!(knowledge.is_known_to_opponent(Faction::Siren, blade));
        assert!(!knowledge.is_known_to_opponent(Faction::Betrayer, blade));
    }

    #[test]
    fn compromised_leader_flagged() {
        let leader = stormhold_core::model::leader::leaders_of(Faction::Seer)
            .next()
            .expect("roster");
        let view = GameStateViewBuilder::new(Faction::Seer, Phase::Battle)
            .compromised_leader(leader)
            .build();
        let knowledge = Knowledge::new(&view);
        assert_eq!(
            knowledge.own_leader_safety(leader),
            LeaderSafety::KnownTraitor
        );
    }

    #[test]
    fn weapon_beats_respects_counters() {
        assert!(weapon_beats(CardKind::Lasgun, Some(DefenseKind::Shield)));
        assert!(!weapon_beats(
            CardKind::Weapon(WeaponKind::Blade),
            Some(DefenseKind::Shield)
        ));
        assert!(weapon_beats(
            CardKind::Weapon(WeaponKind::Venom),
            Some(DefenseKind::Shield)
        ));
        assert!(!weapon_beats(CardKind::Karma, None));
    }
}
