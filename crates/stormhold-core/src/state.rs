//! Read-only view of the authoritative game state.
//!
//! The rule engine owns the real state; bots receive a [`GameStateView`]
//! snapshot per decision point and never mutate it. Tests and the bench
//! harness assemble views with [`GameStateViewBuilder`].

use crate::model::action::{DealTerms, PrescienceReveal, VoiceConstraint};
use crate::model::card::CardId;
use crate::model::faction::Faction;
use crate::model::forces::Battalion;
use crate::model::leader::LeaderId;
use crate::model::phase::Phase;
use crate::model::territory::{TerritoryId, strongholds};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuctionKind {
    Ascending,
    Silent,
    OnceAround,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionState {
    pub card_index: u8,
    pub cards_total: u8,
    pub high_bid: u16,
    pub high_bidder: Option<Faction>,
    pub kind: AuctionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleState {
    pub territory: TerritoryId,
    pub aggressor: Faction,
    pub defender: Faction,
    /// Voice constraint currently binding the viewing faction, if any.
    pub voice_on_me: Option<VoiceConstraint>,
}

impl BattleState {
    pub fn opponent(&self, me: Faction) -> Option<Faction> {
        if me == self.aggressor {
            Some(self.defender)
        } else if me == self.defender {
            Some(self.aggressor)
        } else {
            None
        }
    }

    pub fn is_aggressor(&self, me: Faction) -> bool {
        self.aggressor == me
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDeal {
    pub id: u8,
    pub from: Faction,
    pub terms: DealTerms,
}

/// Cards and traitors the bot has legitimately learned. Everything here
/// was granted by the rules (own traitor draws, ally disclosure,
/// foresight); the bot never peeks beyond it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeGrants {
    /// Cards known to sit in a specific opponent's hand.
    pub known_cards: Vec<(Faction, CardId)>,
    /// Cards in the bot's own hand that an opponent has seen.
    pub my_cards_seen_by: Vec<(Faction, CardId)>,
    /// Enemy leaders secretly sworn to the bot.
    pub my_traitors: Vec<LeaderId>,
    /// The bot's own leaders known to be sworn against it.
    pub compromised_leaders: Vec<LeaderId>,
    /// The card currently under auction, when foresight applies.
    pub foresight_card: Option<CardId>,
    /// Answer to a prescience question asked in the current battle.
    pub prescience: Option<PrescienceReveal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStateView {
    phase: Phase,
    my_faction: Faction,
    my_hand: Vec<CardId>,
    occupancy: Vec<(TerritoryId, Faction, Battalion)>,
    reserves: [Battalion; Faction::COUNT],
    fallen_forces: [Battalion; Faction::COUNT],
    fallen_leaders: Vec<LeaderId>,
    resources: [u16; Faction::COUNT],
    hand_sizes: [u8; Faction::COUNT],
    storm_sector: u8,
    /// Next storm move when revealed (storm lore); sector count swept.
    storm_projection: Option<u8>,
    caches: Vec<(TerritoryId, u16)>,
    revealed_cards: Vec<CardId>,
    auction: Option<AuctionState>,
    battle: Option<BattleState>,
    pending_deals: Vec<PendingDeal>,
    ally: Option<Faction>,
    ally_bid_support: u16,
    ally_battle_support: u16,
    stronghold_win_threshold: u8,
    grants: KnowledgeGrants,
}

impl GameStateView {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn my_faction(&self) -> Faction {
        self.my_faction
    }

    pub fn my_hand(&self) -> &[CardId] {
        &self.my_hand
    }

    pub fn resources(&self, faction: Faction) -> u16 {
        self.resources[faction.index()]
    }

    pub fn hand_size(&self, faction: Faction) -> u8 {
        if faction == self.my_faction {
            self.my_hand.len() as u8
        } else {
            self.hand_sizes[faction.index()]
        }
    }

    pub fn reserves(&self, faction: Faction) -> Battalion {
        self.reserves[faction.index()]
    }

    pub fn fallen_forces(&self, faction: Faction) -> Battalion {
        self.fallen_forces[faction.index()]
    }

    pub fn fallen_leaders(&self) -> &[LeaderId] {
        &self.fallen_leaders
    }

    pub fn storm_sector(&self) -> u8 {
        self.storm_sector
    }

    pub fn storm_projection(&self) -> Option<u8> {
        self.storm_projection
    }

    pub fn revealed_cards(&self) -> &[CardId] {
        &self.revealed_cards
    }

    pub fn auction(&self) -> Option<&AuctionState> {
        self.auction.as_ref()
    }

    pub fn battle(&self) -> Option<&BattleState> {
        self.battle.as_ref()
    }

    pub fn pending_deals(&self) -> &[PendingDeal] {
        &self.pending_deals
    }

    pub fn ally(&self) -> Option<Faction> {
        self.ally
    }

    pub fn ally_battle_support(&self) -> u16 {
        self.ally_battle_support
    }

    pub fn grants(&self) -> &KnowledgeGrants {
        &self.grants
    }

    pub fn stronghold_win_threshold(&self) -> u8 {
        self.stronghold_win_threshold
    }

    /// Resources the bot may put behind a bid, ally contribution included.
    pub fn bid_budget(&self) -> u16 {
        self.resources(self.my_faction) + self.ally_bid_support
    }

    pub fn battalion_at(&self, faction: Faction, territory: TerritoryId) -> Battalion {
        self.occupancy
            .iter()
            .find(|(t, f, _)| *t == territory && *f == faction)
            .map(|(_, _, b)| *b)
            .unwrap_or(Battalion::EMPTY)
    }

    pub fn occupants(&self, territory: TerritoryId) -> impl Iterator<Item = (Faction, Battalion)> {
        self.occupancy
            .iter()
            .filter(move |(t, _, _)| *t == territory)
            .map(|(_, f, b)| (*f, *b))
    }

    pub fn battalions_of(
        &self,
        faction: Faction,
    ) -> impl Iterator<Item = (TerritoryId, Battalion)> {
        self.occupancy
            .iter()
            .filter(move |(_, f, _)| *f == faction)
            .map(|(t, _, b)| (*t, *b))
    }

    pub fn cache_at(&self, territory: TerritoryId) -> u16 {
        self.caches
            .iter()
            .find(|(t, _)| *t == territory)
            .map(|(_, amount)| *amount)
            .unwrap_or(0)
    }

    pub fn caches(&self) -> &[(TerritoryId, u16)] {
        &self.caches
    }

    /// Strongholds a faction holds alone.
    pub fn strongholds_held(&self, faction: Faction) -> u8 {
        strongholds()
            .filter(|&t| {
                let mut occupants = self.occupants(t);
                occupants.next().map(|(f, _)| f) == Some(faction)
                    && self.occupants(t).nth(1).is_none()
            })
            .count() as u8
    }

    /// Total forces a faction has on the board.
    pub fn board_forces(&self, faction: Faction) -> u16 {
        self.battalions_of(faction).map(|(_, b)| b.total()).sum()
    }
}

/// Assembles [`GameStateView`] values for tests and the bench harness.
#[derive(Debug, Clone)]
pub struct GameStateViewBuilder {
    view: GameStateView,
}

impl GameStateViewBuilder {
    pub fn new(my_faction: Faction, phase: Phase) -> Self {
        Self {
            view: GameStateView {
                phase,
                my_faction,
                my_hand: Vec::new(),
                occupancy: Vec::new(),
                reserves: [Battalion::EMPTY; Faction::COUNT],
                fallen_forces: [Battalion::EMPTY; Faction::COUNT],
                fallen_leaders: Vec::new(),
                resources: [0; Faction::COUNT],
                hand_sizes: [0; Faction::COUNT],
                storm_sector: 0,
                storm_projection: None,
                caches: Vec::new(),
                revealed_cards: Vec::new(),
                auction: None,
                battle: None,
                pending_deals: Vec::new(),
                ally: None,
                ally_bid_support: 0,
                ally_battle_support: 0,
                stronghold_win_threshold: 3,
                grants: KnowledgeGrants::default(),
            },
        }
    }

    pub fn resources(mut self, faction: Faction, amount: u16) -> Self {
        self.view.resources[faction.index()] = amount;
        self
    }

    pub fn hand(mut self, cards: Vec<CardId>) -> Self {
        self.view.my_hand = cards;
        self
    }

    pub fn hand_size(mut self, faction: Faction, size: u8) -> Self {
        self.view.hand_sizes[faction.index()] = size;
        self
    }

    pub fn forces(mut self, territory: TerritoryId, faction: Faction, battalion: Battalion) -> Self {
        self.view.occupancy.push((territory, faction, battalion));
        self
    }

    pub fn reserves(mut self, faction: Faction, battalion: Battalion) -> Self {
        self.view.reserves[faction.index()] = battalion;
        self
    }

    pub fn fallen(mut self, faction: Faction, battalion: Battalion) -> Self {
        self.view.fallen_forces[faction.index()] = battalion;
        self
    }

    pub fn fallen_leader(mut self, leader: LeaderId) -> Self {
        self.view.fallen_leaders.push(leader);
        self
    }

    pub fn storm(mut self, sector: u8) -> Self {
        self.view.storm_sector = sector;
        self
    }

    pub fn storm_projection(mut self, sweep: u8) -> Self {
        self.view.storm_projection = Some(sweep);
        self
    }

    pub fn cache(mut self, territory: TerritoryId, amount: u16) -> Self {
        self.view.caches.push((territory, amount));
        self
    }

    pub fn revealed(mut self, card: CardId) -> Self {
        self.view.revealed_cards.push(card);
        self
    }

    pub fn auction(mut self, auction: AuctionState) -> Self {
        self.view.auction = Some(auction);
        self
    }

    pub fn battle(mut self, battle: BattleState) -> Self {
        self.view.battle = Some(battle);
        self
    }

    pub fn deal(mut self, deal: PendingDeal) -> Self {
        self.view.pending_deals.push(deal);
        self
    }

    pub fn ally(mut self, faction: Faction, bid_support: u16, battle_support: u16) -> Self {
        self.view.ally = Some(faction);
        self.view.ally_bid_support = bid_support;
        self.view.ally_battle_support = battle_support;
        self
    }

    pub fn known_card(mut self, holder: Faction, card: CardId) -> Self {
        self.view.grants.known_cards.push((holder, card));
        self
    }

    pub fn card_seen_by(mut self, observer: Faction, card: CardId) -> Self {
        self.view.grants.my_cards_seen_by.push((observer, card));
        self
    }

    pub fn my_traitor(mut self, leader: LeaderId) -> Self {
        self.view.grants.my_traitors.push(leader);
        self
    }

    pub fn compromised_leader(mut self, leader: LeaderId) -> Self {
        self.view.grants.compromised_leaders.push(leader);
        self
    }

    pub fn foresight(mut self, card: CardId) -> Self {
        self.view.grants.foresight_card = Some(card);
        self
    }

    pub fn prescience_reveal(mut self, reveal: PrescienceReveal) -> Self {
        self.view.grants.prescience = Some(reveal);
        self
    }

    pub fn win_threshold(mut self, strongholds: u8) -> Self {
        self.view.stronghold_win_threshold = strongholds;
        self
    }

    pub fn build(self) -> GameStateView {
        self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::territory::TerritoryId;

    fn dawn() -> TerritoryId {
        TerritoryId(0)
    }

    #[test]
    fn battalion_lookup_defaults_to_empty() {
        let view = GameStateViewBuilder::new(Faction::Seer, Phase::Shipment).build();
        assert_eq!(view.battalion_at(Faction::Seer, dawn()), Battalion::EMPTY);
    }

    #[test]
    fn strongholds_held_requires_sole_occupancy() {
        let view = GameStateViewBuilder::new(Faction::Seer, Phase::Shipment)
            .forces(dawn(), Faction::Seer, Battalion::new(3, 0))
            .forces(TerritoryId(1), Faction::Seer, Battalion::new(2, 0))
            .forces(TerritoryId(1), Faction::Betrayer, Battalion::new(4, 0))
            .build();
        // Dawn Citadel is held alone; Basalt Keep is contested.
        assert_eq!(view.strongholds_held(Faction::Seer), 1);
        assert_eq!(view.strongholds_held(Faction::Betrayer), 0);
    }

    #[test]
    fn bid_budget_includes_ally_support() {
        let view = GameStateViewBuilder::new(Faction::Siren, Phase::Bidding)
            .resources(Faction::Siren, 5)
            .ally(Faction::Magnate, 3, 0)
            .build();
        assert_eq!(view.bid_budget(), 8);
    }

    #[test]
    fn battle_opponent_resolution() {
        let battle = BattleState {
            territory: dawn(),
            aggressor: Faction::Nomad,
            defender: Faction::Navigator,
            voice_on_me: None,
        };
        assert_eq!(battle.opponent(Faction::Nomad), Some(Faction::Navigator));
        assert_eq!(battle.opponent(Faction::Navigator), Some(Faction::Nomad));
        assert_eq!(battle.opponent(Faction::Seer), None);
        assert!(battle.is_aggressor(Faction::Nomad));
    }

    #[test]
    fn hand_size_prefers_actual_hand_for_self() {
        let view = GameStateViewBuilder::new(Faction::Seer, Phase::Bidding)
            .hand(vec![CardId(0), CardId(11)])
            .hand_size(Faction::Seer, 7)
            .build();
        assert_eq!(view.hand_size(Faction::Seer), 2);
    }

    #[test]
    fn view_serializes_roundtrip() {
        let view = GameStateViewBuilder::new(Faction::Magnate, Phase::Battle)
            .resources(Faction::Magnate, 12)
            .forces(dawn(), Faction::Magnate, Battalion::new(4, 1))
            .build();
        let json = serde_json::to_string(&view).expect("serialize");
        let back: GameStateView = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.resources(Faction::Magnate), 12);
        assert_eq!(
            back.battalion_at(Faction::Magnate, dawn()),
            Battalion::new(4, 1)
        );
    }
}
