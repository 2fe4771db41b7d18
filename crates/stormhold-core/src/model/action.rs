use crate::model::card::{CardId, DefenseKind, WeaponKind};
use crate::model::faction::Faction;
use crate::model::forces::{Battalion, ForceCommit};
use crate::model::leader::LeaderId;
use crate::model::territory::TerritoryId;
use crate::rules;
use crate::state::GameStateView;
use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Compile-time discriminator for decision points. The rule engine hands
/// the bot a set of these; catalogs are matched against it by tag, never
/// by inspecting a decision value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Bid,
    Battle,
    Voice,
    Prescience,
    Shipment,
    Move,
    Caravan,
    Revival,
    DealOffer,
    DealResponse,
    Karma,
}

impl ActionKind {
    /// Whether an explicit Pass is a legal terminal for this decision
    /// point. A battle always requires a plan, however minimal.
    pub const fn supports_pass(self) -> bool {
        !matches!(self, ActionKind::Battle)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Complete battle commitment for one side of the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattlePlan {
    pub leader: Option<LeaderId>,
    /// Surrogate card standing in for a leader; permits weapon/defense
    /// when no leader is available.
    pub surrogate: Option<CardId>,
    pub weapon: Option<CardId>,
    pub defense: Option<CardId>,
    pub forces: ForceCommit,
    /// Resources the bot itself pays for full-strength forces.
    pub support_spent: u16,
    /// Resources promised by the bot's ally toward the same support.
    pub ally_support: u16,
}

impl BattlePlan {
    pub const fn empty() -> Self {
        Self {
            leader: None,
            surrogate: None,
            weapon: None,
            defense: None,
            forces: ForceCommit::none(),
            support_spent: 0,
            ally_support: 0,
        }
    }

    pub const fn has_champion(&self) -> bool {
        self.leader.is_some() || self.surrogate.is_some()
    }
}

/// Battle-wheel command forced on the opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceCommand {
    pub opponent: Faction,
    /// true: the opponent must play a card in scope if able.
    /// false: the opponent may not play any card in scope.
    pub compel: bool,
    pub scope: VoiceScope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceScope {
    Weapon(WeaponKind),
    Defense(DefenseKind),
}

/// A voice command as it lands on its target: compel or forbid one card
/// scope for the current battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceConstraint {
    pub compel: bool,
    pub scope: VoiceScope,
}

/// One element of the opponent's plan revealed ahead of the battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrescienceQuestion {
    Leader,
    Weapon,
    Defense,
    Dial,
}

/// The rule engine's answer to a prescience question. Exactly one of the
/// payload fields is populated, matching the question asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescienceReveal {
    pub question: PrescienceQuestion,
    pub leader: Option<LeaderId>,
    pub card: Option<CardId>,
    pub dial_halves: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealAsk {
    Truce,
    SafePassage(TerritoryId),
    ShareForesight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealTerms {
    pub give_resources: u16,
    pub ask: DealAsk,
}

/// A typed decision value. Produced by exactly one generator, validated
/// by [`Action::validate`], committed or discarded whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Bid { amount: u16 },
    Battle(BattlePlan),
    Voice(VoiceCommand),
    Prescience { question: PrescienceQuestion },
    Shipment { to: TerritoryId, forces: Battalion },
    Move { from: TerritoryId, to: TerritoryId, forces: Battalion },
    Caravan { from: TerritoryId, to: TerritoryId, forces: Battalion },
    Revival { forces: Battalion, leader: Option<LeaderId> },
    DealOffer { to: Faction, terms: DealTerms },
    DealResponse { offer: u8, accept: bool },
    Karma { card: CardId },
    Pass(ActionKind),
}

impl Action {
    pub const fn kind(&self) -> ActionKind {
        match self {
            Action::Bid { .. } => ActionKind::Bid,
            Action::Battle(_) => ActionKind::Battle,
            Action::Voice(_) => ActionKind::Voice,
            Action::Prescience { .. } => ActionKind::Prescience,
            Action::Shipment { .. } => ActionKind::Shipment,
            Action::Move { .. } => ActionKind::Move,
            Action::Caravan { .. } => ActionKind::Caravan,
            Action::Revival { .. } => ActionKind::Revival,
            Action::DealOffer { .. } => ActionKind::DealOffer,
            Action::DealResponse { .. } => ActionKind::DealResponse,
            Action::Karma { .. } => ActionKind::Karma,
            Action::Pass(kind) => *kind,
        }
    }

    pub const fn is_pass(&self) -> bool {
        matches!(self, Action::Pass(_))
    }

    /// Validates this action against the current state. The orchestrator
    /// commits only actions whose validator returns `Ok`.
    pub fn validate(&self, view: &GameStateView) -> Result<(), ActionError> {
        match self {
            Action::Bid { amount } => validate_bid(view, *amount),
            Action::Battle(plan) => rules::battle_wheel_legal(view, plan),
            Action::Voice(command) => validate_voice(view, command),
            Action::Prescience { .. } => validate_prescience(view),
            Action::Shipment { to, forces } => validate_shipment(view, *to, *forces),
            Action::Move { from, to, forces } => validate_move(view, *from, *to, *forces, 1),
            Action::Caravan { from, to, forces } => validate_caravan(view, *from, *to, *forces),
            Action::Revival { forces, leader } => validate_revival(view, *forces, *leader),
            Action::DealOffer { to, terms } => validate_deal_offer(view, *to, terms),
            Action::DealResponse { offer, .. } => validate_deal_response(view, *offer),
            Action::Karma { card } => validate_karma(view, *card),
            Action::Pass(kind) => {
                if kind.supports_pass() {
                    Ok(())
                } else {
                    Err(ActionError::PassUnsupported { kind: *kind })
                }
            }
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("{kind:?} does not support passing")]
    PassUnsupported { kind: ActionKind },
    #[error("bid of {amount} does not beat current high bid {high}")]
    BidTooLow { amount: u16, high: u16 },
    #[error("bid of {amount} exceeds available resources {available}")]
    BidOverBudget { amount: u16, available: u16 },
    #[error("no auction is underway")]
    NoAuction,
    #[error("no battle is underway")]
    NoBattle,
    #[error("faction lacks the ability for this action")]
    AbilityMissing,
    #[error("card {card:?} is not in hand")]
    CardNotHeld { card: CardId },
    #[error("card {card:?} cannot fill this wheel slot")]
    CardSlotMismatch { card: CardId },
    #[error("weapon and defense reference the same card")]
    DuplicateWheelCard,
    #[error("weapon or defense fielded without a leader or surrogate")]
    ChampionRequired,
    #[error("leader {leader:?} is not available to this faction")]
    LeaderUnavailable { leader: LeaderId },
    #[error("committed forces {committed} exceed the battalion present ({present})")]
    ForcesExceedPresent { committed: Battalion, present: Battalion },
    #[error("support of {needed} exceeds resources available ({available})")]
    SupportOverBudget { needed: u16, available: u16 },
    #[error("shipment of {forces} to {to} is not permitted")]
    ShipmentIllegal { to: TerritoryId, forces: Battalion },
    #[error("insufficient reserves for {forces}")]
    ReservesExhausted { forces: Battalion },
    #[error("cost {cost} exceeds resources available ({available})")]
    CostOverBudget { cost: u16, available: u16 },
    #[error("no battalion at {territory} to move")]
    NothingToMove { territory: TerritoryId },
    #[error("{to} is not reachable from {from}")]
    NotReachable { from: TerritoryId, to: TerritoryId },
    #[error("territory {territory} lies under the storm")]
    StormBlocked { territory: TerritoryId },
    #[error("revival of {forces} exceeds the fallen pool")]
    RevivalPoolExhausted { forces: Battalion },
    #[error("leader {leader:?} is not in the fallen pool")]
    LeaderNotFallen { leader: LeaderId },
    #[error("deal offer targets self")]
    DealWithSelf,
    #[error("no pending deal offer with id {offer}")]
    UnknownOffer { offer: u8 },
}

fn validate_bid(view: &GameStateView, amount: u16) -> Result<(), ActionError> {
    let auction = view.auction().ok_or(ActionError::NoAuction)?;
    if amount <= auction.high_bid {
        return Err(ActionError::BidTooLow {
            amount,
            high: auction.high_bid,
        });
    }
    let available = view.bid_budget();
    if amount > available {
        return Err(ActionError::BidOverBudget { amount, available });
    }
    Ok(())
}

fn validate_voice(view: &GameStateView, command: &VoiceCommand) -> Result<(), ActionError> {
    if !view.my_faction().permissions().may_voice {
        return Err(ActionError::AbilityMissing);
    }
    let battle = view.battle().ok_or(ActionError::NoBattle)?;
    if battle.opponent(view.my_faction()) != Some(command.opponent) {
        return Err(ActionError::NoBattle);
    }
    Ok(())
}

fn validate_prescience(view: &GameStateView) -> Result<(), ActionError> {
    if !view.my_faction().permissions().may_prescience {
        return Err(ActionError::AbilityMissing);
    }
    view.battle().map(|_| ()).ok_or(ActionError::NoBattle)
}

fn validate_shipment(
    view: &GameStateView,
    to: TerritoryId,
    forces: Battalion,
) -> Result<(), ActionError> {
    if forces.is_empty() {
        return Err(ActionError::ShipmentIllegal { to, forces });
    }
    if !view.reserves(view.my_faction()).contains(forces) {
        return Err(ActionError::ReservesExhausted { forces });
    }
    if !rules::valid_shipment_targets(view).contains(&to) {
        return Err(ActionError::ShipmentIllegal { to, forces });
    }
    let cost = rules::shipment_cost(view, to, forces.total());
    let available = view.resources(view.my_faction());
    if cost > available {
        return Err(ActionError::CostOverBudget { cost, available });
    }
    Ok(())
}

fn validate_move(
    view: &GameStateView,
    from: TerritoryId,
    to: TerritoryId,
    forces: Battalion,
    range: u8,
) -> Result<(), ActionError> {
    let present = view.battalion_at(view.my_faction(), from);
    if present.is_empty() {
        return Err(ActionError::NothingToMove { territory: from });
    }
    if !present.contains(forces) || forces.is_empty() {
        return Err(ActionError::ForcesExceedPresent {
            committed: forces,
            present,
        });
    }
    if rules::storm_covers(view, to) {
        return Err(ActionError::StormBlocked { territory: to });
    }
    if !rules::reachable_territories(view, from, range).contains(&to) {
        return Err(ActionError::NotReachable { from, to });
    }
    Ok(())
}

fn validate_caravan(
    view: &GameStateView,
    from: TerritoryId,
    to: TerritoryId,
    forces: Battalion,
) -> Result<(), ActionError> {
    if !view.my_faction().permissions().local_placement {
        return Err(ActionError::AbilityMissing);
    }
    validate_move(view, from, to, forces, 2)
}

fn validate_revival(
    view: &GameStateView,
    forces: Battalion,
    leader: Option<LeaderId>,
) -> Result<(), ActionError> {
    let fallen = view.fallen_forces(view.my_faction());
    if !fallen.contains(forces) {
        return Err(ActionError::RevivalPoolExhausted { forces });
    }
    if let Some(leader) = leader {
        if !view.fallen_leaders().contains(&leader) {
            return Err(ActionError::LeaderNotFallen { leader });
        }
        if leader.faction() != view.my_faction() {
            return Err(ActionError::LeaderUnavailable { leader });
        }
    }
    let cost = rules::revival_cost(view, forces, leader);
    let available = view.resources(view.my_faction());
    if cost > available {
        return Err(ActionError::CostOverBudget { cost, available });
    }
    Ok(())
}

fn validate_deal_offer(
    view: &GameStateView,
    to: Faction,
    terms: &DealTerms,
) -> Result<(), ActionError> {
    if to == view.my_faction() {
        return Err(ActionError::DealWithSelf);
    }
    let available = view.resources(view.my_faction());
    if terms.give_resources > available {
        return Err(ActionError::CostOverBudget {
            cost: terms.give_resources,
            available,
        });
    }
    Ok(())
}

fn validate_deal_response(view: &GameStateView, offer: u8) -> Result<(), ActionError> {
    if view.pending_deals().iter().any(|deal| deal.id == offer) {
        Ok(())
    } else {
        Err(ActionError::UnknownOffer { offer })
    }
}

fn validate_karma(view: &GameStateView, card: CardId) -> Result<(), ActionError> {
    if !view.my_hand().contains(&card) {
        return Err(ActionError::CardNotHeld { card });
    }
    if !card.is_karma() {
        return Err(ActionError::CardSlotMismatch { card });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_kind_passthrough() {
        let pass = Action::Pass(ActionKind::Shipment);
        assert_eq!(pass.kind(), ActionKind::Shipment);
        assert!(pass.is_pass());
    }

    #[test]
    fn battle_never_supports_pass() {
        assert!(!ActionKind::Battle.supports_pass());
        for kind in [
            ActionKind::Bid,
            ActionKind::Shipment,
            ActionKind::Move,
            ActionKind::Voice,
            ActionKind::Revival,
        ] {
            assert!(kind.supports_pass(), "{kind} should support passing");
        }
    }

    #[test]
    fn empty_plan_has_no_champion() {
        let plan = BattlePlan::empty();
        assert!(!plan.has_champion());
        assert_eq!(plan.forces.committed(), Battalion::EMPTY);
    }
}
