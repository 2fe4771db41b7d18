//! Navigator overrides: half-rate shipping turns tempo into the weapon.
//! Strongholds are grabbed and contested before anything is garrisoned.

use crate::bot::GenCtx;
use crate::orchestrator::GenerationError;
use crate::shipment::{Heuristic, run_shipment_catalog};
use stormhold_core::Action;

/// The generic catalog with the aggressive entries promoted: take and
/// contest strongholds before reinforcing or collecting.
const TEMPO_ORDER: [Heuristic; 7] = [
    Heuristic::BlockEnemyWin,
    Heuristic::OccupyVacantStronghold,
    Heuristic::AttackWeakStronghold,
    Heuristic::StormRescue,
    Heuristic::ReinforceWeakestStronghold,
    Heuristic::CollectResources,
    Heuristic::RetreatStranded,
];

pub fn tempo_shipment(ctx: &mut GenCtx<'_>) -> Result<Option<Action>, GenerationError> {
    run_shipment_catalog(ctx, &TEMPO_ORDER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::test_support::ctx_harness;
    use stormhold_core::{Battalion, Faction, GameStateViewBuilder, Phase, TerritoryId};

    #[test]
    fn vacant_stronghold_beats_reinforcement() {
        // The generic order would reinforce the threatened Dawn Citadel
        // garrison first; the Navigator grabs the empty keep instead.
        let me = Faction::Navigator;
        let view = GameStateViewBuilder::new(me, Phase::Shipment)
            .reserves(me, Battalion::new(8, 0))
            .resources(me, 10)
            .storm(8)
            .forces(TerritoryId(0), me, Battalion::new(1, 0))
            .forces(TerritoryId(5), Faction::Betrayer, Battalion::new(6, 0))
            .build();
        let mut harness = ctx_harness(&view);
        let action = tempo_shipment(&mut harness.ctx())
            .expect("runs")
            .expect("shipment produced");
        let Action::Shipment { to, .. } = action else {
            panic!("expected shipment");
        };
        assert!(to.is_stronghold());
        assert!(view.occupants(to).next().is_none());
    }
}
