//! Nomad overrides: free placement around home ground comes first; the
//! open desert is theirs before it is anyone else's.

use crate::bot::GenCtx;
use crate::orchestrator::GenerationError;
use crate::shipment::{Heuristic, ship_to, shipment_generator};
use stormhold_core::model::territory::all_territories;
use stormhold_core::rules;
use stormhold_core::{Action, Faction};

pub fn desert_shipment(ctx: &mut GenCtx<'_>) -> Result<Option<Action>, GenerationError> {
    // Free-reach ground: anything local placement lands on for nothing.
    let free_reach: Vec<_> = all_territories()
        .filter(|t| !rules::storm_covers(ctx.view, *t))
        .filter(|t| rules::shipment_cost(ctx.view, *t, 4) == 0)
        .collect();

    // A cache in free reach is money on the ground.
    let cache_target = free_reach
        .iter()
        .copied()
        .filter(|t| ctx.view.cache_at(*t) > 0)
        .filter(|t| {
            ctx.view
                .occupants(*t)
                .all(|(f, _)| f == Faction::Nomad)
        })
        .max_by_key(|t| ctx.view.cache_at(*t));
    if let Some(target) = cache_target {
        if let Some(candidate) = ship_to(ctx, Heuristic::CollectResources, target) {
            if candidate.shortage <= ctx.params.shortage_collect {
                return Ok(Some(candidate.action));
            }
        }
    }

    // An intruder in free reach gets contested while it is cheap.
    let intruder_target = free_reach
        .iter()
        .copied()
        .filter(|t| ctx.view.occupants(*t).any(|(f, _)| f != Faction::Nomad))
        .min_by_key(|t| {
            ctx.view
                .occupants(*t)
                .filter(|(f, _)| *f != Faction::Nomad)
                .map(|(f, b)| b.max_dial_halves(f.permissions().elite_specials))
                .max()
                .unwrap_or(0)
        });
    if let Some(target) = intruder_target {
        if let Some(candidate) = ship_to(ctx, Heuristic::AttackWeakStronghold, target) {
            if candidate.shortage <= ctx.params.shortage_attack {
                return Ok(Some(candidate.action));
            }
        }
    }

    shipment_generator(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::test_support::ctx_harness;
    use stormhold_core::{Battalion, GameStateViewBuilder, Phase, TerritoryId};

    const THE_SCOUR: TerritoryId = TerritoryId(10);

    #[test]
    fn free_reach_cache_claimed_first() {
        // The Scour is within local-placement reach of Hidden Oasis and
        // holds a cache; a vacant stronghold elsewhere would otherwise
        // win the generic catalog.
        let view = GameStateViewBuilder::new(Faction::Nomad, Phase::Shipment)
            .reserves(Faction::Nomad, Battalion::new(8, 2))
            .resources(Faction::Nomad, 6)
            .cache(THE_SCOUR, 10)
            .storm(1)
            .build();
        let mut harness = ctx_harness(&view);
        let action = desert_shipment(&mut harness.ctx())
            .expect("runs")
            .expect("shipment produced");
        let Action::Shipment { to, forces } = action else {
            panic!("expected shipment");
        };
        assert_eq!(to, THE_SCOUR);
        assert!(forces.total() >= 1);
        assert_eq!(rules::shipment_cost(&view, to, forces.total()), 0);
        assert_eq!(action.validate(&view), Ok(()));
    }

    #[test]
    fn falls_back_to_generic_catalog() {
        // Nothing in free reach worth taking: the generic catalog's
        // vacant-stronghold grab applies instead.
        let view = GameStateViewBuilder::new(Faction::Nomad, Phase::Shipment)
            .reserves(Faction::Nomad, Battalion::new(8, 0))
            .resources(Faction::Nomad, 8)
            .storm(1)
            .build();
        let mut harness = ctx_harness(&view);
        let action = desert_shipment(&mut harness.ctx())
            .expect("runs")
            .expect("shipment produced");
        let Action::Shipment { to, .. } = action else {
            panic!("expected shipment");
        };
        assert!(to.is_stronghold());
    }
}
