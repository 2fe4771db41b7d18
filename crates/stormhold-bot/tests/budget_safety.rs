//! Committed shipments and battle plans never spend forces or resources
//! the bot does not have.

use stormhold_bot::Bot;
use stormhold_core::rules;
use stormhold_core::{
    Action, ActionKind, Battalion, BattleState, Faction, GameStateViewBuilder, Phase, TerritoryId,
};

#[test]
fn shipments_fit_reserves_and_purse_across_factions() {
    for faction in Faction::LOOP {
        for (resources, reserves) in [(0u16, 0u8), (3, 4), (9, 12), (30, 20)] {
            let mut view = GameStateViewBuilder::new(faction, Phase::Shipment)
                .resources(faction, resources)
                .reserves(faction, Battalion::new(reserves, reserves / 4))
                .storm(7);
            // A couple of occupied strongholds so attack heuristics fire.
            view = view
                .forces(TerritoryId(0), Faction::Betrayer, Battalion::new(3, 0))
                .forces(TerritoryId(2), Faction::Siren, Battalion::new(1, 0));
            let view = view.build();

            let mut bot = Bot::with_seed(faction, 42);
            let action = bot.decide(&view, &[ActionKind::Shipment]);
            match action {
                Action::Shipment { to, forces } => {
                    assert!(
                        view.reserves(faction).contains(forces),
                        "{faction}: shipped {forces} from reserve {}",
                        view.reserves(faction)
                    );
                    let cost = rules::shipment_cost(&view, to, forces.total());
                    assert!(
                        cost <= resources,
                        "{faction}: cost {cost} over purse {resources}"
                    );
                    assert_eq!(action.validate(&view), Ok(()));
                }
                Action::Pass(kind) => assert_eq!(kind, ActionKind::Shipment),
                other => panic!("{faction}: unexpected action {other:?}"),
            }
        }
    }
}

#[test]
fn battle_plans_fit_forces_and_purse_across_factions() {
    for faction in Faction::LOOP {
        let opponent = if faction == Faction::Magnate {
            Faction::Nomad
        } else {
            Faction::Magnate
        };
        let keep = TerritoryId(3);
        let view = GameStateViewBuilder::new(faction, Phase::Battle)
            .resources(faction, 3)
            .forces(keep, faction, Battalion::new(4, 1))
            .forces(keep, opponent, Battalion::new(6, 0))
            .forces(TerritoryId(4), faction, Battalion::new(5, 0))
            .battle(BattleState {
                territory: keep,
                aggressor: faction,
                defender: opponent,
                voice_on_me: None,
            })
            .build();

        let mut bot = Bot::with_seed(faction, 99);
        let action = bot.decide(&view, &[ActionKind::Battle]);
        let Action::Battle(plan) = action else {
            panic!("{faction}: expected a battle plan, got {action:?}");
        };
        assert!(
            view.battalion_at(faction, keep)
                .contains(plan.forces.committed()),
            "{faction}: committed beyond the battalion present"
        );
        assert!(
            plan.support_spent <= view.resources(faction),
            "{faction}: support {} over purse", plan.support_spent
        );
        assert_eq!(action.validate(&view), Ok(()));
    }
}
