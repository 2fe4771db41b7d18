//! Revival phase: buy back fallen forces, and a leader when the bench
//! is running out.

use crate::bot::GenCtx;
use crate::orchestrator::GenerationError;
use stormhold_core::model::leader::leaders_of;
use stormhold_core::rules;
use stormhold_core::{Action, Battalion, LeaderId};

/// Keep fielding leaders; below this many alive, revival of one is
/// worth paying for.
const LEADER_BENCH_FLOOR: usize = 2;

pub fn revival_generator(ctx: &mut GenCtx<'_>) -> Result<Option<Action>, GenerationError> {
    let me = ctx.view.my_faction();
    let fallen = ctx.view.fallen_forces(me);
    let leader = leader_to_revive(ctx);

    if fallen.is_empty() && leader.is_none() {
        return Ok(None);
    }

    let resources = ctx.view.resources(me);
    let budget = resources.min(ctx.params.revival_max_spend);

    // Take the largest affordable battalion, specials first - they are
    // the harder forces to replace.
    let mut forces = Battalion::EMPTY;
    let mut best: Option<Battalion> = None;
    loop {
        let next = if forces.special < fallen.special {
            Battalion::new(forces.normal, forces.special + 1)
        } else if forces.normal < fallen.normal {
            Battalion::new(forces.normal + 1, forces.special)
        } else {
            break;
        };
        if rules::revival_cost(ctx.view, next, leader) > budget {
            break;
        }
        forces = next;
        best = Some(next);
    }

    let forces = best.unwrap_or(Battalion::EMPTY);
    if forces.is_empty() && leader.is_none() {
        return Ok(None);
    }
    if rules::revival_cost(ctx.view, forces, leader) > resources {
        return Ok(None);
    }

    Ok(Some(Action::Revival { forces, leader }))
}

fn leader_to_revive(ctx: &GenCtx<'_>) -> Option<LeaderId> {
    let me = ctx.view.my_faction();
    let alive = leaders_of(me)
        .filter(|l| !ctx.view.fallen_leaders().contains(l))
        .count();
    if alive >= LEADER_BENCH_FLOOR {
        return None;
    }

    // The cheapest of our fallen leaders we can actually afford.
    leaders_of(me)
        .filter(|l| ctx.view.fallen_leaders().contains(l))
        .filter(|l| (l.strength() as u16) <= ctx.view.resources(me))
        .min_by_key(|l| l.strength())
}
