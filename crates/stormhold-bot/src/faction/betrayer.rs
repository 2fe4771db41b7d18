//! Betrayer overrides: a battle against a sworn leader is already won,
//! so spend nothing winning it twice.

use crate::battle::battle_generator;
use crate::bot::GenCtx;
use crate::knowledge::LeaderSafety;
use crate::orchestrator::GenerationError;
use stormhold_core::model::forces::ForceCommit;
use stormhold_core::model::leader::leaders_of;
use stormhold_core::{Action, BattlePlan};
use tracing::{Level, event};

pub fn traitor_battle(ctx: &mut GenCtx<'_>) -> Result<Option<Action>, GenerationError> {
    let Some(battle) = ctx.view.battle().copied() else {
        return Ok(None);
    };
    let me = ctx.view.my_faction();
    let Some(opponent) = battle.opponent(me) else {
        return Ok(None);
    };

    // The opponent fields their strongest leader unless they know
    // better; if that leader answers to us, the reveal wins outright.
    let their_champion = leaders_of(opponent)
        .filter(|l| !ctx.view.fallen_leaders().contains(l))
        .max_by_key(|l| l.strength());
    let sworn = their_champion
        .is_some_and(|l| ctx.knowledge.enemy_leader_safety(l) == LeaderSafety::KnownTraitor);

    if !sworn {
        return battle_generator(ctx);
    }

    event!(
        target: "stormhold_bot::battle",
        Level::INFO,
        faction = %me,
        opponent = %opponent,
        champion = ?their_champion,
        "lure plan: opposing champion is sworn to us"
    );

    // Bait the trap: our weakest leader, no cards, nothing committed.
    let lure = leaders_of(me)
        .filter(|l| !ctx.view.fallen_leaders().contains(l))
        .min_by_key(|l| l.strength());
    Ok(Some(Action::Battle(BattlePlan {
        leader: lure,
        surrogate: None,
        weapon: None,
        defense: None,
        forces: ForceCommit::none(),
        support_spent: 0,
        ally_support: 0,
    })))
}
