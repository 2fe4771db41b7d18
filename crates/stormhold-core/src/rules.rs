//! Rule-engine query oracles.
//!
//! These functions answer "what is legal and what does it cost" questions
//! the bot consults but does not own. They are deterministic over a
//! [`GameStateView`] and carry no state of their own.

use crate::model::action::{ActionError, BattlePlan};
use crate::model::card::CardKind;
use crate::model::faction::Faction;
use crate::model::forces::Battalion;
use crate::model::leader::LeaderId;
use crate::model::territory::{SECTOR_COUNT, TerritoryId, all_territories};
use crate::state::GameStateView;

/// Cost per force shipped into a stronghold.
const STRONGHOLD_RATE: u16 = 1;
/// Cost per force shipped anywhere else.
const OPEN_RATE: u16 = 2;
/// Cost per revived force beyond the free allotment.
const REVIVAL_RATE: u16 = 2;
/// Nomad local placement reaches this far from home ground.
const LOCAL_PLACEMENT_RANGE: u8 = 2;

/// Whether the storm currently sweeps this territory.
pub fn storm_covers(view: &GameStateView, territory: TerritoryId) -> bool {
    !territory.is_sheltered() && territory.sector() == view.storm_sector()
}

/// Sectors the storm will sweep if it advances `sweep` sectors.
pub fn storm_next_sectors(view: &GameStateView, sweep: u8) -> Vec<u8> {
    (1..=sweep)
        .map(|step| (view.storm_sector() + step) % SECTOR_COUNT)
        .collect()
}

/// Territories reachable from `from` in at most `range` steps, storm
/// territories excluded and never traversed. `from` itself is excluded.
pub fn reachable_territories(
    view: &GameStateView,
    from: TerritoryId,
    range: u8,
) -> Vec<TerritoryId> {
    let mut seen = vec![false; crate::model::territory::TERRITORY_COUNT];
    seen[from.index()] = true;
    let mut frontier = vec![from];
    let mut reached = Vec::new();

    for _ in 0..range {
        let mut next = Vec::new();
        for territory in frontier {
            for neighbor in territory.adjacent() {
                if seen[neighbor.index()] || storm_covers(view, neighbor) {
                    continue;
                }
                seen[neighbor.index()] = true;
                reached.push(neighbor);
                next.push(neighbor);
            }
        }
        frontier = next;
    }

    reached
}

/// Adjacency distance between two territories, storm ignored.
pub fn distance(from: TerritoryId, to: TerritoryId) -> Option<u8> {
    if from == to {
        return Some(0);
    }
    let mut seen = vec![false; crate::model::territory::TERRITORY_COUNT];
    seen[from.index()] = true;
    let mut frontier = vec![from];
    let mut steps = 0u8;

    while !frontier.is_empty() {
        steps += 1;
        let mut next = Vec::new();
        for territory in frontier {
            for neighbor in territory.adjacent() {
                if seen[neighbor.index()] {
                    continue;
                }
                if neighbor == to {
                    return Some(steps);
                }
                seen[neighbor.index()] = true;
                next.push(neighbor);
            }
        }
        frontier = next;
    }

    None
}

/// Territories open to shipment for the viewing faction. The storm closes
/// a territory outright; a stronghold already contested by two other
/// factions is closed as well.
pub fn valid_shipment_targets(view: &GameStateView) -> Vec<TerritoryId> {
    let me = view.my_faction();
    all_territories()
        .filter(|&t| !storm_covers(view, t))
        .filter(|&t| {
            if !t.is_stronghold() {
                return true;
            }
            let others = view.occupants(t).filter(|(f, _)| *f != me).count();
            others < 2
        })
        .collect()
}

/// Shipment price for `count` forces landing at `to`.
pub fn shipment_cost(view: &GameStateView, to: TerritoryId, count: u16) -> u16 {
    let permissions = view.my_faction().permissions();

    if permissions.local_placement {
        let home = all_territories().find(|t| t.def().home == Some(view.my_faction()));
        if let Some(home) = home {
            if distance(home, to).is_some_and(|d| d <= LOCAL_PLACEMENT_RANGE) {
                return 0;
            }
        }
    }

    let rate = if to.is_stronghold() {
        STRONGHOLD_RATE
    } else {
        OPEN_RATE
    };
    let full = count * rate;

    if permissions.half_rate_shipping {
        full.div_ceil(2)
    } else {
        full
    }
}

/// Revival price for `forces` plus an optional leader.
pub fn revival_cost(view: &GameStateView, forces: Battalion, leader: Option<LeaderId>) -> u16 {
    let free = view.my_faction().permissions().free_revivals as u16;
    let paid_forces = forces.total().saturating_sub(free);
    let leader_cost = leader.map(|l| l.strength() as u16).unwrap_or(0);
    paid_forces * REVIVAL_RATE + leader_cost
}

/// Full legality check for a battle plan: slot typing, card possession,
/// champion requirement, force presence, and support funding.
pub fn battle_wheel_legal(view: &GameStateView, plan: &BattlePlan) -> Result<(), ActionError> {
    let battle = view.battle().ok_or(ActionError::NoBattle)?;
    let me = view.my_faction();

    if let Some(leader) = plan.leader {
        if leader.faction() != me {
            return Err(ActionError::LeaderUnavailable { leader });
        }
        if view.fallen_leaders().contains(&leader) {
            return Err(ActionError::LeaderUnavailable { leader });
        }
    }

    if let Some(surrogate) = plan.surrogate {
        if !view.my_hand().contains(&surrogate) {
            return Err(ActionError::CardNotHeld { card: surrogate });
        }
        if !matches!(surrogate.kind(), CardKind::Surrogate) {
            return Err(ActionError::CardSlotMismatch { card: surrogate });
        }
    }

    if (plan.weapon.is_some() || plan.defense.is_some()) && !plan.has_champion() {
        return Err(ActionError::ChampionRequired);
    }

    if let (Some(weapon), Some(defense)) = (plan.weapon, plan.defense) {
        if weapon == defense {
            return Err(ActionError::DuplicateWheelCard);
        }
    }

    if let Some(weapon) = plan.weapon {
        if !view.my_hand().contains(&weapon) {
            return Err(ActionError::CardNotHeld { card: weapon });
        }
        if !weapon.is_weapon() {
            return Err(ActionError::CardSlotMismatch { card: weapon });
        }
    }

    if let Some(defense) = plan.defense {
        if !view.my_hand().contains(&defense) {
            return Err(ActionError::CardNotHeld { card: defense });
        }
        if !defense.is_defense() {
            return Err(ActionError::CardSlotMismatch { card: defense });
        }
    }

    let present = view.battalion_at(me, battle.territory);
    let committed = plan.forces.committed();
    if !present.contains(committed) {
        return Err(ActionError::ForcesExceedPresent { committed, present });
    }

    let needed = if me.permissions().forces_fight_unpaid {
        0
    } else {
        plan.forces.paid_forces()
    };
    let ally_cap = view.ally_battle_support();
    if plan.ally_support > ally_cap {
        return Err(ActionError::SupportOverBudget {
            needed,
            available: ally_cap,
        });
    }
    let own_share = needed.saturating_sub(plan.ally_support);
    if plan.support_spent < own_share {
        return Err(ActionError::SupportOverBudget {
            needed,
            available: plan.support_spent,
        });
    }
    if plan.support_spent > view.resources(me) {
        return Err(ActionError::SupportOverBudget {
            needed,
            available: view.resources(me),
        });
    }

    Ok(())
}
