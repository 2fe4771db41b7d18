//! Shipment and movement planning.
//!
//! A fixed, priority-ordered catalog of situational heuristics. Each
//! heuristic picks a target, costs out a force allocation under the
//! resource budget, and reports its dial shortage; the first candidate
//! whose shortage fits the faction's tolerance is committed. At most one
//! shipment and one move are produced per phase.

use crate::battle::required_dial;
use crate::bot::GenCtx;
use crate::orchestrator::GenerationError;
use stormhold_core::model::forces::FULL;
use stormhold_core::model::leader::leaders_of;
use stormhold_core::model::territory::{TerritoryId, strongholds};
use stormhold_core::rules;
use stormhold_core::{Action, Battalion, Faction, GameStateView};
use tracing::{Level, event};

/// Garrison placed on an unopposed target.
const GARRISON: u8 = 2;
/// Default storm sweep assumed when no projection is known.
const DEFAULT_SWEEP: u8 = 3;
/// A battalion this small, alone in the open, is stranded.
const STRANDED_MAX: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    BlockEnemyWin,
    StormRescue,
    ReinforceWeakestStronghold,
    OccupyVacantStronghold,
    CollectResources,
    AttackWeakStronghold,
    RetreatStranded,
}

impl Heuristic {
    /// Priority order. First acceptable candidate wins.
    pub const CATALOG: [Heuristic; 7] = [
        Heuristic::BlockEnemyWin,
        Heuristic::StormRescue,
        Heuristic::ReinforceWeakestStronghold,
        Heuristic::OccupyVacantStronghold,
        Heuristic::CollectResources,
        Heuristic::AttackWeakStronghold,
        Heuristic::RetreatStranded,
    ];
}

/// A costed shipment or move proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub heuristic: Heuristic,
    pub action: Action,
    pub opponent: Option<Faction>,
    pub required_halves: u32,
    pub shortage: u32,
    pub cost: u16,
}

/// Walks the catalog for a shipment. Commits the first candidate whose
/// shortage fits, records any paired follow-up move, and passes when the
/// catalog runs dry.
pub fn shipment_generator(ctx: &mut GenCtx<'_>) -> Result<Option<Action>, GenerationError> {
    run_shipment_catalog(ctx, &Heuristic::CATALOG)
}

/// The shipment loop over an explicit heuristic order; faction variants
/// reorder the catalog without rewriting the machinery.
pub(crate) fn run_shipment_catalog(
    ctx: &mut GenCtx<'_>,
    order: &[Heuristic],
) -> Result<Option<Action>, GenerationError> {
    for heuristic in order.iter().copied() {
        let Some(candidate) = propose_shipment(ctx, heuristic) else {
            continue;
        };
        let threshold = ctx.params.shortage_threshold(heuristic);
        if candidate.shortage > threshold {
            log_candidate(ctx, &candidate, "rejected");
            continue;
        }
        log_candidate(ctx, &candidate, "committed");
        if let Some(follow_up) = consolidation_move(ctx, &candidate) {
            ctx.turn.pending_move = Some(follow_up);
        }
        return Ok(Some(candidate.action));
    }
    Ok(None)
}

/// Costed proposal for one explicit target; used by faction overrides.
pub(crate) fn ship_to(
    ctx: &GenCtx<'_>,
    heuristic: Heuristic,
    target: TerritoryId,
) -> Option<Candidate> {
    let (required, opponent) = required_at(ctx, target);
    build_shipment(ctx, heuristic, target, required, opponent)
}

/// Walks the catalog for a move. A move planned alongside an earlier
/// shipment takes precedence over fresh proposals.
pub fn move_generator(ctx: &mut GenCtx<'_>) -> Result<Option<Action>, GenerationError> {
    if let Some(pending) = ctx.turn.pending_move.take() {
        return Ok(Some(pending));
    }
    plan_move(ctx, 1, false)
}

/// Nomad group move: the same heuristics at caravan range.
pub fn caravan_generator(ctx: &mut GenCtx<'_>) -> Result<Option<Action>, GenerationError> {
    if !ctx.view.my_faction().permissions().local_placement {
        return Ok(None);
    }
    plan_move(ctx, 2, true)
}

fn plan_move(
    ctx: &mut GenCtx<'_>,
    range: u8,
    caravan: bool,
) -> Result<Option<Action>, GenerationError> {
    for heuristic in Heuristic::CATALOG {
        let Some(candidate) = propose_move(ctx, heuristic, range, caravan) else {
            continue;
        };
        let threshold = ctx.params.shortage_threshold(heuristic);
        if candidate.shortage > threshold {
            log_candidate(ctx, &candidate, "rejected");
            continue;
        }
        log_candidate(ctx, &candidate, "committed");
        return Ok(Some(candidate.action));
    }
    Ok(None)
}

fn propose_shipment(ctx: &GenCtx<'_>, heuristic: Heuristic) -> Option<Candidate> {
    match heuristic {
        Heuristic::BlockEnemyWin => block_enemy_win(ctx),
        Heuristic::ReinforceWeakestStronghold => reinforce_weakest(ctx),
        Heuristic::OccupyVacantStronghold => occupy_vacant(ctx),
        Heuristic::AttackWeakStronghold => attack_weak(ctx),
        Heuristic::CollectResources => collect_by_shipment(ctx),
        // Rescue and retreat are movement concerns.
        Heuristic::StormRescue | Heuristic::RetreatStranded => None,
    }
}

fn propose_move(
    ctx: &GenCtx<'_>,
    heuristic: Heuristic,
    range: u8,
    caravan: bool,
) -> Option<Candidate> {
    match heuristic {
        Heuristic::StormRescue => storm_rescue(ctx, range, caravan),
        Heuristic::CollectResources => collect_by_move(ctx, range, caravan),
        Heuristic::RetreatStranded => retreat_stranded(ctx, range, caravan),
        _ => None,
    }
}

// === Target ranking sub-queries ===

/// My best leader bonus in half-point units.
fn my_leader_bonus(view: &GameStateView) -> u32 {
    leaders_of(view.my_faction())
        .filter(|l| !view.fallen_leaders().contains(l))
        .map(|l| l.strength() as u32 * FULL)
        .max()
        .unwrap_or(0)
}

/// Dial an occupying enemy can muster at `territory`, my leader bonus
/// already deducted. Zero when unopposed.
fn required_at(ctx: &GenCtx<'_>, territory: TerritoryId) -> (u32, Option<Faction>) {
    let me = ctx.view.my_faction();
    let holder = ctx
        .view
        .occupants(territory)
        .map(|(f, _)| f)
        .find(|f| *f != me);
    match holder {
        Some(opponent) => {
            let needed = required_dial(
                ctx.view,
                opponent,
                territory,
                my_leader_bonus(ctx.view),
                ctx.params.reinforcement_margin,
                true,
            );
            (needed, Some(opponent))
        }
        None => (0, None),
    }
}

/// The opponent one stronghold short of winning, if any.
fn winning_threat(view: &GameStateView) -> Option<Faction> {
    let threshold = view.stronghold_win_threshold();
    Faction::LOOP
        .iter()
        .copied()
        .filter(|f| *f != view.my_faction())
        .find(|f| view.strongholds_held(*f) + 1 >= threshold)
}

/// Weakest-dial stronghold held by `holder` and open to shipment.
fn weakest_stronghold_of(ctx: &GenCtx<'_>, holder: Faction) -> Option<TerritoryId> {
    let open = rules::valid_shipment_targets(ctx.view);
    strongholds()
        .filter(|t| open.contains(t))
        .filter(|t| {
            ctx.view
                .occupants(*t)
                .any(|(f, _)| f == holder)
        })
        .min_by_key(|t| {
            ctx.view
                .battalion_at(holder, *t)
                .max_dial_halves(holder.permissions().elite_specials)
        })
}

// === Shipment heuristics ===

fn block_enemy_win(ctx: &GenCtx<'_>) -> Option<Candidate> {
    let threat = winning_threat(ctx.view)?;
    let target = weakest_stronghold_of(ctx, threat)?;
    let (required, opponent) = required_at(ctx, target);
    build_shipment(ctx, Heuristic::BlockEnemyWin, target, required, opponent)
}

fn reinforce_weakest(ctx: &GenCtx<'_>) -> Option<Candidate> {
    let me = ctx.view.my_faction();
    let open = rules::valid_shipment_targets(ctx.view);
    let elite = me.permissions().elite_specials;

    // Weakest stronghold I hold alone, with an enemy within one step.
    let target = strongholds()
        .filter(|t| open.contains(t))
        .filter(|t| {
            let mut occupants = ctx.view.occupants(*t);
            occupants.next().map(|(f, _)| f) == Some(me) && ctx.view.occupants(*t).nth(1).is_none()
        })
        .filter(|t| {
            t.adjacent().any(|n| {
                ctx.view.occupants(n).any(|(f, _)| f != me)
            })
        })
        .min_by_key(|t| ctx.view.battalion_at(me, *t).max_dial_halves(elite))?;

    // Required: the strongest neighboring enemy presence, less what is
    // already garrisoned.
    let neighbor_threat = target
        .adjacent()
        .flat_map(|n| {
            ctx.view
                .occupants(n)
                .filter(|(f, _)| *f != me)
                .map(move |(f, b)| b.max_dial_halves(f.permissions().elite_specials))
        })
        .max()
        .unwrap_or(0);
    let garrison = ctx.view.battalion_at(me, target).max_dial_halves(elite);
    let required = neighbor_threat.saturating_sub(garrison);
    if required == 0 {
        return None;
    }
    build_shipment(ctx, Heuristic::ReinforceWeakestStronghold, target, required, None)
}

fn occupy_vacant(ctx: &GenCtx<'_>) -> Option<Candidate> {
    let open = rules::valid_shipment_targets(ctx.view);
    let target = strongholds()
        .filter(|t| open.contains(t))
        .find(|t| ctx.view.occupants(*t).next().is_none())?;
    build_shipment(ctx, Heuristic::OccupyVacantStronghold, target, 0, None)
}

fn collect_by_shipment(ctx: &GenCtx<'_>) -> Option<Candidate> {
    // Ship toward the richest unclaimed cache only when nothing of ours
    // can walk there.
    if collect_by_move(ctx, 1, false).is_some() {
        return None;
    }
    let open = rules::valid_shipment_targets(ctx.view);
    let target = richest_cache(ctx.view, |t| open.contains(&t))?;
    let (required, opponent) = required_at(ctx, target);
    if opponent.is_some() {
        return None;
    }
    build_shipment(ctx, Heuristic::CollectResources, target, required, opponent)
}

fn attack_weak(ctx: &GenCtx<'_>) -> Option<Candidate> {
    let me = ctx.view.my_faction();
    let open = rules::valid_shipment_targets(ctx.view);
    let target = strongholds()
        .filter(|t| open.contains(t))
        .filter(|t| ctx.view.occupants(*t).any(|(f, _)| f != me))
        .filter(|t| ctx.view.battalion_at(me, *t).is_empty())
        .min_by_key(|t| {
            ctx.view
                .occupants(*t)
                .filter(|(f, _)| *f != me)
                .map(|(f, b)| b.max_dial_halves(f.permissions().elite_specials))
                .max()
                .unwrap_or(0)
        })?;
    let (required, opponent) = required_at(ctx, target);
    build_shipment(ctx, Heuristic::AttackWeakStronghold, target, required, opponent)
}

/// Allocation loop shared by every shipment heuristic: add forces while
/// the dial is unmet, the marginal cost is affordable, and the
/// unsupported-forces cap is not breached.
fn build_shipment(
    ctx: &GenCtx<'_>,
    heuristic: Heuristic,
    target: TerritoryId,
    required: u32,
    opponent: Option<Faction>,
) -> Option<Candidate> {
    let me = ctx.view.my_faction();
    let pool = ctx.view.reserves(me);
    if pool.is_empty() {
        return None;
    }
    let elite = me.permissions().elite_specials;
    let budget = ctx
        .view
        .resources(me)
        .saturating_sub(ctx.params.resource_reserve);

    let mut shipped = Battalion::EMPTY;
    let mut remaining = required;
    let mut cost = 0u16;
    let garrison = (GARRISON as u16).min(pool.total());

    loop {
        if remaining == 0 && shipped.total() >= garrison {
            break;
        }

        let take_special = if ctx.params.special_first {
            shipped.special < pool.special
        } else {
            shipped.normal >= pool.normal && shipped.special < pool.special
        };
        let next = if take_special {
            Battalion::new(0, 1)
        } else if shipped.normal < pool.normal {
            Battalion::new(1, 0)
        } else if shipped.special < pool.special {
            Battalion::new(0, 1)
        } else {
            break;
        };

        let proposed = shipped + next;
        let new_cost = rules::shipment_cost(ctx.view, target, proposed.total());
        if new_cost > budget {
            break;
        }

        // Forces we could not also support in the ensuing battle count
        // against the unsupported cap. Factions whose forces fight
        // unpaid never accrue unsupported cost.
        if !me.permissions().forces_fight_unpaid {
            let left_after = budget - new_cost;
            let unsupported = proposed.total().saturating_sub(left_after);
            if unsupported > ctx.params.unsupported_cap {
                break;
            }
        }

        shipped = proposed;
        cost = new_cost;
        let step = if next.special > 0 && elite { 2 * FULL } else { FULL };
        remaining = remaining.saturating_sub(step);
    }

    if shipped.is_empty() {
        return None;
    }

    Some(Candidate {
        heuristic,
        action: Action::Shipment {
            to: target,
            forces: shipped,
        },
        opponent,
        required_halves: required,
        shortage: remaining,
        cost,
    })
}

// === Movement heuristics ===

fn storm_threatened(view: &GameStateView) -> Vec<(TerritoryId, Battalion)> {
    let sweep = view.storm_projection().unwrap_or(DEFAULT_SWEEP);
    let swept = rules::storm_next_sectors(view, sweep);
    view.battalions_of(view.my_faction())
        .filter(|(t, _)| !t.is_sheltered() && swept.contains(&t.sector()))
        .collect()
}

fn storm_rescue(ctx: &GenCtx<'_>, range: u8, caravan: bool) -> Option<Candidate> {
    let view = ctx.view;
    let sweep = view.storm_projection().unwrap_or(DEFAULT_SWEEP);
    let swept = rules::storm_next_sectors(view, sweep);
    let (from, battalion) = storm_threatened(view)
        .into_iter()
        .max_by_key(|(_, b)| b.total())?;

    // Safest reachable ground: out of the projected sweep, unoccupied by
    // enemies if possible.
    let reachable = rules::reachable_territories(view, from, range);
    let target = reachable
        .iter()
        .copied()
        .filter(|t| t.is_sheltered() || !swept.contains(&t.sector()))
        .min_by_key(|t| {
            let enemies = view
                .occupants(*t)
                .filter(|(f, _)| *f != view.my_faction())
                .count();
            (enemies, required_at(ctx, *t).0)
        })?;

    let (required, opponent) = required_at(ctx, target);
    let own = battalion.max_dial_halves(view.my_faction().permissions().elite_specials);
    let shortage = required.saturating_sub(own);
    Some(Candidate {
        heuristic: Heuristic::StormRescue,
        action: move_action(from, target, battalion, caravan),
        opponent,
        required_halves: required,
        shortage,
        cost: 0,
    })
}

fn richest_cache(view: &GameStateView, mut open: impl FnMut(TerritoryId) -> bool) -> Option<TerritoryId> {
    view.caches()
        .iter()
        .filter(|(t, amount)| *amount > 0 && open(*t))
        .filter(|(t, _)| !rules::storm_covers(view, *t))
        .max_by_key(|(_, amount)| *amount)
        .map(|(t, _)| *t)
}

fn collect_by_move(ctx: &GenCtx<'_>, range: u8, caravan: bool) -> Option<Candidate> {
    let view = ctx.view;
    let me = view.my_faction();
    let target = richest_cache(view, |t| {
        view.occupants(t).all(|(f, _)| f == me)
    })?;

    // The nearest battalion that can reach the cache and is not already
    // sitting on one.
    let (from, battalion) = view
        .battalions_of(me)
        .filter(|(t, _)| *t != target && view.cache_at(*t) == 0)
        .filter(|(t, _)| rules::reachable_territories(view, *t, range).contains(&target))
        .max_by_key(|(_, b)| b.total())?;

    let (required, opponent) = required_at(ctx, target);
    Some(Candidate {
        heuristic: Heuristic::CollectResources,
        action: move_action(from, target, battalion, caravan),
        opponent,
        required_halves: required,
        shortage: required,
        cost: 0,
    })
}

fn retreat_stranded(ctx: &GenCtx<'_>, range: u8, caravan: bool) -> Option<Candidate> {
    let view = ctx.view;
    let me = view.my_faction();
    let (from, battalion) = view
        .battalions_of(me)
        .filter(|(t, _)| !t.is_stronghold() && view.cache_at(*t) == 0)
        .filter(|(_, b)| b.total() <= STRANDED_MAX)
        .min_by_key(|(_, b)| b.total())?;

    // Fold the battalion into the nearest friendly holding.
    let target = rules::reachable_territories(view, from, range)
        .into_iter()
        .filter(|t| {
            view.occupants(*t)
                .all(|(f, _)| f == me)
        })
        .max_by_key(|t| (t.is_stronghold(), view.battalion_at(me, *t).total()))?;

    Some(Candidate {
        heuristic: Heuristic::RetreatStranded,
        action: move_action(from, target, battalion, caravan),
        opponent: None,
        required_halves: 0,
        shortage: 0,
        cost: 0,
    })
}

fn move_action(from: TerritoryId, to: TerritoryId, forces: Battalion, caravan: bool) -> Action {
    if caravan {
        Action::Caravan { from, to, forces }
    } else {
        Action::Move { from, to, forces }
    }
}

/// After shipping an attack, fold an adjacent friendly battalion into
/// the same target when the move decision point comes around.
fn consolidation_move(ctx: &GenCtx<'_>, candidate: &Candidate) -> Option<Action> {
    if candidate.heuristic != Heuristic::AttackWeakStronghold {
        return None;
    }
    let Action::Shipment { to, .. } = candidate.action else {
        return None;
    };
    let me = ctx.view.my_faction();
    let (from, battalion) = ctx
        .view
        .battalions_of(me)
        .filter(|(t, _)| *t != to)
        .filter(|(t, _)| rules::reachable_territories(ctx.view, *t, 1).contains(&to))
        .max_by_key(|(_, b)| b.total())?;
    Some(Action::Move {
        from,
        to,
        forces: battalion,
    })
}

fn log_candidate(ctx: &GenCtx<'_>, candidate: &Candidate, outcome: &str) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }
    event!(
        target: "stormhold_bot::shipment",
        Level::INFO,
        faction = %ctx.view.my_faction(),
        heuristic = ?candidate.heuristic,
        outcome,
        required_halves = candidate.required_halves,
        shortage = candidate.shortage,
        cost = candidate.cost,
        opponent = ?candidate.opponent,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::test_support::ctx_harness;
    use stormhold_core::{GameStateViewBuilder, Phase};

    const DAWN_CITADEL: TerritoryId = TerritoryId(0);
    const BASALT_KEEP: TerritoryId = TerritoryId(1);
    const EMBER_FLATS: TerritoryId = TerritoryId(5);
    const MIRROR_DUNES: TerritoryId = TerritoryId(6);
    const PILGRIM_ROAD: TerritoryId = TerritoryId(14);

    fn base(me: Faction) -> GameStateViewBuilder {
        GameStateViewBuilder::new(me, Phase::Shipment)
            .reserves(me, Battalion::new(10, 0))
            .resources(me, 12)
            .storm(8)
    }

    #[test]
    fn occupies_vacant_stronghold_when_nothing_urgent() {
        let view = base(Faction::Navigator).build();
        let mut harness = ctx_harness(&view);
        let action = shipment_generator(&mut harness.ctx())
            .expect("generator runs")
            .expect("shipment produced");
        let Action::Shipment { to, forces } = action else {
            panic!("expected shipment");
        };
        assert!(to.is_stronghold());
        assert_eq!(forces.total(), GARRISON as u16);
        assert_eq!(action.validate(&view), Ok(()));
    }

    #[test]
    fn blocks_imminent_enemy_win_first() {
        // Betrayer holds two strongholds; threshold 3. Blocking beats
        // the vacant-stronghold grab in priority.
        let view = base(Faction::Navigator)
            .forces(DAWN_CITADEL, Faction::Betrayer, Battalion::new(1, 0))
            .forces(BASALT_KEEP, Faction::Betrayer, Battalion::new(6, 0))
            .build();
        let mut harness = ctx_harness(&view);
        let action = shipment_generator(&mut harness.ctx())
            .expect("generator runs")
            .expect("shipment produced");
        let Action::Shipment { to, .. } = action else {
            panic!("expected shipment");
        };
        // The weakest-held of the threat's strongholds is the target.
        assert_eq!(to, DAWN_CITADEL);
    }

    #[test]
    fn shipment_never_overspends() {
        let view = base(Faction::Seer)
            .resources(Faction::Seer, 5)
            .forces(DAWN_CITADEL, Faction::Betrayer, Battalion::new(8, 0))
            .forces(BASALT_KEEP, Faction::Betrayer, Battalion::new(8, 0))
            .build();
        let mut harness = ctx_harness(&view);
        if let Some(action) = shipment_generator(&mut harness.ctx()).expect("generator runs") {
            let Action::Shipment { to, forces } = action else {
                panic!("expected shipment");
            };
            let cost = rules::shipment_cost(&view, to, forces.total());
            assert!(cost <= 5);
            assert!(view.reserves(Faction::Seer).contains(forces));
        }
    }

    #[test]
    fn exact_budget_reaches_exact_dial() {
        // An attack needing dial 10 (20 halves) with exactly the
        // reserves and resources to get there: 10 Betrayer forces
        // (20 halves) + best leader 9 (18) + margin 2 = 40, minus our
        // best leader 10 (20) leaves 20 halves. Ten shipped normals at
        // stronghold rate 1 cost exactly the 10 spendable resources.
        let me = Faction::Nomad;
        let reserve = crate::bot::BotParams::nomad().resource_reserve;
        let view = GameStateViewBuilder::new(me, Phase::Shipment)
            .reserves(me, Battalion::new(10, 0))
            .resources(me, 10 + reserve)
            .storm(8)
            .forces(DAWN_CITADEL, Faction::Betrayer, Battalion::new(10, 0))
            .build();
        let mut harness = ctx_harness(&view);
        let ctx = harness.ctx();
        let candidate = attack_weak(&ctx).expect("attack candidate");
        assert_eq!(candidate.required_halves, 20);
        assert_eq!(candidate.shortage, 0);
        assert_eq!(candidate.cost, 10);
        let Action::Shipment { forces, .. } = candidate.action else {
            panic!("expected shipment");
        };
        // The whole reserve went out and the dial is met exactly.
        assert_eq!(forces, Battalion::new(10, 0));
    }

    #[test]
    fn storm_rescue_moves_exposed_battalion() {
        // Mirror Dunes sits in sector 3; storm at 2 with sweep 2 covers
        // sectors 3 and 4.
        let me = Faction::Nomad;
        let view = GameStateViewBuilder::new(me, Phase::Shipment)
            .forces(MIRROR_DUNES, me, Battalion::new(3, 1))
            .storm(2)
            .storm_projection(2)
            .build();
        let mut harness = ctx_harness(&view);
        let ctx = harness.ctx();
        let candidate = storm_rescue(&ctx, 1, false).expect("rescue candidate");
        let Action::Move { from, to, forces } = candidate.action else {
            panic!("expected move");
        };
        assert_eq!(from, MIRROR_DUNES);
        assert_eq!(forces, Battalion::new(3, 1));
        assert!(to.is_sheltered() || !rules::storm_next_sectors(&view, 2).contains(&to.sector()));
    }

    #[test]
    fn retreat_folds_stranded_battalion_home() {
        let me = Faction::Magnate;
        let view = GameStateViewBuilder::new(me, Phase::Shipment)
            .forces(PILGRIM_ROAD, me, Battalion::new(1, 0))
            .forces(DAWN_CITADEL, me, Battalion::new(5, 0))
            .storm(8)
            .build();
        let mut harness = ctx_harness(&view);
        let ctx = harness.ctx();
        let candidate = retreat_stranded(&ctx, 1, false).expect("retreat candidate");
        let Action::Move { from, to, .. } = candidate.action else {
            panic!("expected move");
        };
        assert_eq!(from, PILGRIM_ROAD);
        assert_eq!(to, DAWN_CITADEL);
    }

    #[test]
    fn collect_prefers_richest_reachable_cache() {
        let me = Faction::Nomad;
        let view = GameStateViewBuilder::new(me, Phase::Shipment)
            .forces(DAWN_CITADEL, me, Battalion::new(4, 0))
            .cache(EMBER_FLATS, 8)
            .cache(MIRROR_DUNES, 12)
            .storm(8)
            .build();
        let mut harness = ctx_harness(&view);
        let ctx = harness.ctx();
        let candidate = collect_by_move(&ctx, 1, false).expect("collect candidate");
        let Action::Move { to, .. } = candidate.action else {
            panic!("expected move");
        };
        assert_eq!(to, MIRROR_DUNES);
    }

    #[test]
    fn generator_passes_on_empty_catalog() {
        // No reserves, nothing on the board: every heuristic abstains.
        let view = GameStateViewBuilder::new(Faction::Siren, Phase::Shipment)
            .storm(8)
            .build();
        let mut harness = ctx_harness(&view);
        assert_eq!(shipment_generator(&mut harness.ctx()).expect("runs"), None);
        assert_eq!(move_generator(&mut harness.ctx()).expect("runs"), None);
    }

    #[test]
    fn pending_move_takes_precedence() {
        let view = base(Faction::Seer).build();
        let mut harness = ctx_harness(&view);
        let planned = Action::Move {
            from: DAWN_CITADEL,
            to: EMBER_FLATS,
            forces: Battalion::new(1, 0),
        };
        harness.turn.pending_move = Some(planned);
        let action = move_generator(&mut harness.ctx()).expect("runs");
        assert_eq!(action, Some(planned));
        assert!(harness.turn.pending_move.is_none());
    }
}
