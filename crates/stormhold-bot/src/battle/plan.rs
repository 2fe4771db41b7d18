use crate::battle::survival::{estimate_survival, opponent_might_shield};
use crate::bot::GenCtx;
use crate::knowledge::LeaderSafety;
use crate::orchestrator::GenerationError;
use stormhold_core::model::card::{CardKind, DefenseKind, WeaponKind};
use stormhold_core::model::forces::{FULL, ForceCommit};
use stormhold_core::model::leader::leaders_of;
use stormhold_core::rules;
use stormhold_core::{
    Action, Battalion, BattlePlan, CardId, Faction, GameStateView, LeaderId, PrescienceQuestion,
    TerritoryId, VoiceCommand, VoiceConstraint, VoiceScope,
};
use tracing::{Level, event};

/// Dial required to contest `opponent` at `territory`, in half-point
/// units: their maximum achievable strength plus an expected
/// reinforcement margin, less the bot's own champion bonus. The
/// non-aggressor loses ties and needs strictly more.
pub fn required_dial(
    view: &GameStateView,
    opponent: Faction,
    territory: TerritoryId,
    my_bonus_halves: u32,
    reinforcement_margin: u32,
    aggressor: bool,
) -> u32 {
    let enemy_forces = view
        .battalion_at(opponent, territory)
        .max_dial_halves(opponent.permissions().elite_specials);
    let enemy_leader = best_leader_strength(view, opponent).unwrap_or(0) as u32 * FULL;
    let gross = enemy_forces + enemy_leader + reinforcement_margin;
    let tie_break = if aggressor { 0 } else { 1 };
    (gross + tie_break).saturating_sub(my_bonus_halves)
}

fn best_leader_strength(view: &GameStateView, faction: Faction) -> Option<u8> {
    leaders_of(faction)
        .filter(|l| !view.fallen_leaders().contains(l))
        .map(|l| l.strength())
        .max()
}

/// Produces the bot's battle plan for the current battle.
pub fn battle_generator(ctx: &mut GenCtx<'_>) -> Result<Option<Action>, GenerationError> {
    let Some(battle) = ctx.view.battle().copied() else {
        return Ok(None);
    };
    let me = ctx.view.my_faction();
    let Some(opponent) = battle.opponent(me) else {
        return Ok(None);
    };
    let present = ctx.view.battalion_at(me, battle.territory);
    if present.is_empty() {
        return Err(GenerationError::invariant(
            "battle decision point without forces on the ground",
        ));
    }

    let mut weapon = choose_weapon(ctx, opponent, battle.voice_on_me);
    let mut defense = choose_defense(ctx, opponent, battle.voice_on_me);
    let (leader, surrogate) = choose_champion(ctx, opponent, defense);

    // No champion means the wheel holds no cards at all.
    if leader.is_none() && surrogate.is_none() {
        weapon = None;
        defense = None;
    }

    let estimate = estimate_survival(ctx, opponent, weapon, defense);
    let my_bonus = leader.map(|l| l.strength() as u32 * FULL).unwrap_or(0);

    // Lasgun resolution: against a possible shield everything in the
    // territory dies and the dial is moot; with no shield in their
    // reach the kill is unanswerable and no dial is needed.
    let lasgun_chosen = matches!(weapon.map(CardId::kind), Some(CardKind::Lasgun));
    if lasgun_chosen {
        // Detonation takes the whole territory with it; a clean lasgun
        // kill needs no dial either. Both cases commit nothing.
        let mode = if opponent_might_shield(&ctx.knowledge, opponent) {
            "lasgun_detonation"
        } else {
            "lasgun_clean"
        };
        let plan = BattlePlan {
            leader,
            surrogate,
            weapon,
            defense,
            forces: ForceCommit::none(),
            support_spent: 0,
            ally_support: 0,
        };
        log_plan(ctx, mode, &plan, 0, &estimate);
        return Ok(Some(Action::Battle(correct_plan(ctx, plan, battle.voice_on_me))));
    }

    let needed = required_dial(
        ctx.view,
        opponent,
        battle.territory,
        my_bonus,
        ctx.params.reinforcement_margin,
        battle.is_aggressor(me),
    );

    let permissions = me.permissions();
    let budget = ctx.view.resources(me) + ctx.view.ally_battle_support();
    let (forces, shortage, paid) = allocate_forces(
        present,
        permissions.elite_specials,
        permissions.forces_fight_unpaid,
        budget,
        needed,
    );

    if should_throw(ctx, &estimate, leader, shortage) {
        let plan = throw_plan(ctx, opponent);
        log_plan(ctx, "throw", &plan, needed, &estimate);
        return Ok(Some(Action::Battle(correct_plan(ctx, plan, battle.voice_on_me))));
    }

    let ally_support = paid.min(ctx.view.ally_battle_support());
    let plan = BattlePlan {
        leader,
        surrogate,
        weapon,
        defense,
        forces,
        support_spent: paid.saturating_sub(ally_support),
        ally_support,
    };
    log_plan(ctx, "contest", &plan, needed, &estimate);
    Ok(Some(Action::Battle(correct_plan(ctx, plan, battle.voice_on_me))))
}

/// Weapon choice: the hand weapon with the best kill estimate, voice
/// constraints honored. A weapon whose counter is known-held scores
/// near zero and loses to any live alternative.
fn choose_weapon(
    ctx: &GenCtx<'_>,
    opponent: Faction,
    voice_on_me: Option<VoiceConstraint>,
) -> Option<CardId> {
    let candidates: Vec<CardId> = ctx
        .view
        .my_hand()
        .iter()
        .copied()
        .filter(|card| card.is_weapon())
        .filter(|card| weapon_allowed(*card, voice_on_me))
        .collect();

    if let Some(compelled) = compelled_pick(&candidates, voice_on_me, true) {
        return Some(compelled);
    }

    candidates
        .into_iter()
        .map(|card| {
            let kill = estimate_survival(ctx, opponent, Some(card), None).enemy_leader_dies;
            (card, kill)
        })
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(card, _)| card)
}

fn choose_defense(
    ctx: &GenCtx<'_>,
    opponent: Faction,
    voice_on_me: Option<VoiceConstraint>,
) -> Option<CardId> {
    let candidates: Vec<CardId> = ctx
        .view
        .my_hand()
        .iter()
        .copied()
        .filter(|card| card.is_defense())
        .filter(|card| defense_allowed(*card, voice_on_me))
        .collect();

    if let Some(compelled) = compelled_pick(&candidates, voice_on_me, false) {
        return Some(compelled);
    }

    candidates
        .into_iter()
        .map(|card| {
            let survive = estimate_survival(ctx, opponent, None, Some(card)).my_leader_survives;
            (card, survive)
        })
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(card, _)| card)
}

fn weapon_allowed(card: CardId, voice: Option<VoiceConstraint>) -> bool {
    match (card.kind(), voice) {
        (CardKind::Weapon(kind), Some(constraint)) if !constraint.compel => {
            constraint.scope != VoiceScope::Weapon(kind)
        }
        _ => true,
    }
}

fn defense_allowed(card: CardId, voice: Option<VoiceConstraint>) -> bool {
    match (card.kind(), voice) {
        (CardKind::Defense(kind), Some(constraint)) if !constraint.compel => {
            constraint.scope != VoiceScope::Defense(kind)
        }
        _ => true,
    }
}

/// When voiced to play a scope we can satisfy, the matching card is
/// forced.
fn compelled_pick(
    candidates: &[CardId],
    voice: Option<VoiceConstraint>,
    weapon_slot: bool,
) -> Option<CardId> {
    let constraint = voice.filter(|v| v.compel)?;
    candidates
        .iter()
        .copied()
        .find(|card| match (card.kind(), constraint.scope) {
            (CardKind::Weapon(kind), VoiceScope::Weapon(scope)) if weapon_slot => kind == scope,
            (CardKind::Defense(kind), VoiceScope::Defense(scope)) if !weapon_slot => kind == scope,
            _ => false,
        })
}

/// Champion choice: strongest safe leader, falling back to a surrogate
/// card when survival looks too poor to risk a real one.
fn choose_champion(
    ctx: &GenCtx<'_>,
    opponent: Faction,
    defense: Option<CardId>,
) -> (Option<LeaderId>, Option<CardId>) {
    let me = ctx.view.my_faction();
    let mut alive: Vec<LeaderId> = leaders_of(me)
        .filter(|l| !ctx.view.fallen_leaders().contains(l))
        .collect();
    alive.sort_by(|a, b| b.strength().cmp(&a.strength()));

    let safe: Vec<LeaderId> = alive
        .iter()
        .copied()
        .filter(|l| ctx.knowledge.own_leader_safety(*l) != LeaderSafety::KnownTraitor)
        .collect();

    let surrogate = ctx
        .view
        .my_hand()
        .iter()
        .copied()
        .find(|card| matches!(card.kind(), CardKind::Surrogate));

    let pick_from = if safe.is_empty() { &alive } else { &safe };
    let Some(best) = pick_from.first().copied() else {
        return (None, surrogate);
    };

    let survive = estimate_survival(ctx, opponent, None, defense).my_leader_survives;
    if survive < ctx.params.survival_cutoff {
        if surrogate.is_some() {
            return (None, surrogate);
        }
        // Risk the weakest champion instead of the best.
        return (pick_from.last().copied(), None);
    }

    (Some(best), None)
}

/// Greedy allocation: specials at full strength while the remaining dial
/// is at least one normal-force increment and the budget holds, then
/// normals at full, then halves for free until the dial is met or the
/// battalion is spent.
fn allocate_forces(
    present: Battalion,
    elite: bool,
    unpaid: bool,
    budget: u16,
    needed: u32,
) -> (ForceCommit, u32, u16) {
    let special_full = if elite { 2 * FULL } else { FULL };
    let special_half = special_full / 2;
    let mut commit = ForceCommit::none();
    let mut remaining = needed;
    let mut specials = present.special;
    let mut normals = present.normal;
    let mut paid: u16 = 0;

    let mut can_pay = |paid: &mut u16| {
        if unpaid {
            return true;
        }
        if *paid < budget {
            *paid += 1;
            true
        } else {
            false
        }
    };

    while remaining >= FULL && specials > 0 && can_pay(&mut paid) {
        commit.special_full += 1;
        specials -= 1;
        remaining = remaining.saturating_sub(special_full);
    }

    while remaining > 0 && normals > 0 && can_pay(&mut paid) {
        commit.normal_full += 1;
        normals -= 1;
        remaining = remaining.saturating_sub(FULL);
    }

    while remaining > 0 && specials > 0 {
        commit.special_half += 1;
        specials -= 1;
        remaining = remaining.saturating_sub(special_half);
    }

    while remaining > 0 && normals > 0 {
        commit.normal_half += 1;
        normals -= 1;
        remaining = remaining.saturating_sub(1);
    }

    if unpaid {
        paid = 0;
    }

    (commit, remaining, paid)
}

/// Throw the fight when the position is lost: a compromised champion
/// with no safe substitute, or a shortfall past the faction's tolerance
/// on a board presence too thin to spend on.
fn should_throw(
    ctx: &GenCtx<'_>,
    estimate: &crate::battle::SurvivalEstimate,
    leader: Option<LeaderId>,
    shortage: u32,
) -> bool {
    if let Some(leader) = leader {
        let compromised = ctx.knowledge.own_leader_safety(leader) == LeaderSafety::KnownTraitor;
        let rescue_cost = leader.strength() as u16;
        if compromised && ctx.view.resources(ctx.view.my_faction()) < rescue_cost {
            return true;
        }
    }

    if shortage > ctx.params.throw_shortfall {
        return true;
    }

    let board = ctx.view.board_forces(ctx.view.my_faction());
    if board <= ctx.params.throw_board_strength
        && shortage > 0
        && estimate.enemy_leader_dies < ctx.params.kill_confidence
    {
        return true;
    }

    false
}

/// Cheapest legal wheel: weakest leader, no cards, no committed forces.
fn throw_plan(ctx: &GenCtx<'_>, _opponent: Faction) -> BattlePlan {
    let me = ctx.view.my_faction();
    let weakest = leaders_of(me)
        .filter(|l| !ctx.view.fallen_leaders().contains(l))
        .min_by_key(|l| l.strength());
    BattlePlan {
        leader: weakest,
        surrogate: None,
        weapon: None,
        defense: None,
        forces: ForceCommit::none(),
        support_spent: 0,
        ally_support: 0,
    }
}

/// Bounded correction loop: while the plan is illegal, strip or
/// substitute the offending slot and try again. After the configured
/// number of passes the plan is accepted as-is; the validator has the
/// final word.
fn correct_plan(
    ctx: &GenCtx<'_>,
    mut plan: BattlePlan,
    voice_on_me: Option<VoiceConstraint>,
) -> BattlePlan {
    for _ in 0..ctx.params.correction_passes {
        match rules::battle_wheel_legal(ctx.view, &plan) {
            Ok(()) => return plan,
            Err(err) => {
                event!(
                    target: "stormhold_bot::battle",
                    Level::DEBUG,
                    error = %err,
                    "correcting battle plan"
                );
                if plan.weapon.is_some() && !plan.has_champion() {
                    plan.weapon = None;
                    plan.defense = None;
                    continue;
                }
                if let Some(weapon) = plan.weapon {
                    if !ctx.view.my_hand().contains(&weapon) || !weapon_allowed(weapon, voice_on_me)
                    {
                        plan.weapon = next_card(ctx, weapon, CardId::is_weapon, |c| {
                            weapon_allowed(c, voice_on_me)
                        });
                        continue;
                    }
                }
                if let Some(defense) = plan.defense {
                    if !ctx.view.my_hand().contains(&defense)
                        || !defense_allowed(defense, voice_on_me)
                    {
                        plan.defense = next_card(ctx, defense, CardId::is_defense, |c| {
                            defense_allowed(c, voice_on_me)
                        });
                        continue;
                    }
                }
                // Funding or force mismatch: shed the paid commitment.
                plan.forces = ForceCommit {
                    normal_full: 0,
                    special_full: 0,
                    ..plan.forces
                };
                plan.support_spent = 0;
                plan.ally_support = 0;
            }
        }
    }
    plan
}

fn next_card(
    ctx: &GenCtx<'_>,
    not: CardId,
    slot: impl Fn(CardId) -> bool,
    allowed: impl Fn(CardId) -> bool,
) -> Option<CardId> {
    ctx.view
        .my_hand()
        .iter()
        .copied()
        .filter(|c| *c != not)
        .find(|c| slot(*c) && allowed(*c))
}

fn log_plan(
    ctx: &GenCtx<'_>,
    mode: &str,
    plan: &BattlePlan,
    needed: u32,
    estimate: &crate::battle::SurvivalEstimate,
) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }
    event!(
        target: "stormhold_bot::battle",
        Level::INFO,
        faction = %ctx.view.my_faction(),
        mode,
        leader = ?plan.leader,
        weapon = ?plan.weapon,
        defense = ?plan.defense,
        dial_needed_halves = needed,
        enemy_dies = estimate.enemy_leader_dies,
        survives = estimate.my_leader_survives,
        committed = %plan.forces.committed(),
    );
}

/// Siren: issue the voice command that hurts the opponent most. With a
/// weapon in hand, forbid its counter; otherwise forbid the weapon kind
/// with the most copies still unaccounted for.
pub fn voice_generator(ctx: &mut GenCtx<'_>) -> Result<Option<Action>, GenerationError> {
    let Some(battle) = ctx.view.battle().copied() else {
        return Ok(None);
    };
    let me = ctx.view.my_faction();
    if !me.permissions().may_voice {
        return Ok(None);
    }
    let Some(opponent) = battle.opponent(me) else {
        return Ok(None);
    };

    let my_weapon_kind = ctx.view.my_hand().iter().find_map(|card| match card.kind() {
        CardKind::Weapon(kind) => Some(kind),
        _ => None,
    });

    let scope = if let Some(weapon) = my_weapon_kind {
        let counter = match weapon {
            WeaponKind::Blade | WeaponKind::Lance => DefenseKind::Shield,
            WeaponKind::Venom => DefenseKind::Antidote,
        };
        VoiceScope::Defense(counter)
    } else {
        VoiceScope::Weapon(most_threatening_weapon(ctx, opponent))
    };

    let command = VoiceCommand {
        opponent,
        compel: false,
        scope,
    };
    ctx.turn.voice_plan = Some(command);
    Ok(Some(Action::Voice(command)))
}

fn most_threatening_weapon(ctx: &GenCtx<'_>, opponent: Faction) -> WeaponKind {
    let mut counts = [(WeaponKind::Blade, 0usize), (WeaponKind::Venom, 0), (WeaponKind::Lance, 0)];
    for card in ctx.knowledge.cards_opponent_might_have(opponent) {
        if let CardKind::Weapon(kind) = card.kind() {
            for entry in counts.iter_mut() {
                if entry.0 == kind {
                    entry.1 += 1;
                }
            }
        }
    }
    counts
        .into_iter()
        .max_by_key(|(_, n)| *n)
        .map(|(kind, _)| kind)
        .unwrap_or(WeaponKind::Blade)
}

/// Seer: ask the question whose answer moves the plan most. Weapon
/// when our champion is at risk, defense when we hold a weapon worth
/// landing, leader otherwise.
pub fn prescience_generator(ctx: &mut GenCtx<'_>) -> Result<Option<Action>, GenerationError> {
    let Some(battle) = ctx.view.battle().copied() else {
        return Ok(None);
    };
    let me = ctx.view.my_faction();
    if !me.permissions().may_prescience {
        return Ok(None);
    }
    let Some(opponent) = battle.opponent(me) else {
        return Ok(None);
    };

    let holds_weapon = ctx.view.my_hand().iter().any(|c| c.is_weapon());
    let bare = estimate_survival(ctx, opponent, None, None);

    let question = if bare.my_leader_survives < ctx.params.survival_cutoff {
        PrescienceQuestion::Weapon
    } else if holds_weapon {
        PrescienceQuestion::Defense
    } else {
        PrescienceQuestion::Leader
    };

    ctx.turn.prescience_plan = Some(question);
    Ok(Some(Action::Prescience { question }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::test_support::ctx_harness;
    use stormhold_core::model::card::all_cards;
    use stormhold_core::{BattleState, GameStateViewBuilder, Phase};

    const KEEP: TerritoryId = TerritoryId(1);

    fn card_of(kind: CardKind) -> CardId {
        all_cards().find(|c| c.kind() == kind).expect("card in deck")
    }

    fn battle_view_builder(me: Faction, opponent: Faction) -> GameStateViewBuilder {
        GameStateViewBuilder::new(me, Phase::Battle)
            .forces(KEEP, me, Battalion::new(6, 0))
            .forces(KEEP, opponent, Battalion::new(4, 0))
            .battle(BattleState {
                territory: KEEP,
                aggressor: me,
                defender: opponent,
                voice_on_me: None,
            })
    }

    #[test]
    fn dial_monotone_in_enemy_strength() {
        let weak = battle_view_builder(Faction::Magnate, Faction::Nomad).build();
        let strong = GameStateViewBuilder::new(Faction::Magnate, Phase::Battle)
            .forces(KEEP, Faction::Magnate, Battalion::new(6, 0))
            .forces(KEEP, Faction::Nomad, Battalion::new(9, 0))
            .battle(BattleState {
                territory: KEEP,
                aggressor: Faction::Magnate,
                defender: Faction::Nomad,
                voice_on_me: None,
            })
            .build();
        let low = required_dial(&weak, Faction::Nomad, KEEP, 10, 2, true);
        let high = required_dial(&strong, Faction::Nomad, KEEP, 10, 2, true);
        assert!(high >= low);
    }

    #[test]
    fn dial_non_increasing_in_own_bonus() {
        let view = battle_view_builder(Faction::Magnate, Faction::Nomad).build();
        let with_weak_leader = required_dial(&view, Faction::Nomad, KEEP, 4, 2, true);
        let with_strong_leader = required_dial(&view, Faction::Nomad, KEEP, 20, 2, true);
        assert!(with_strong_leader <= with_weak_leader);
    }

    #[test]
    fn defender_needs_strictly_more() {
        let view = battle_view_builder(Faction::Magnate, Faction::Nomad).build();
        let as_aggressor = required_dial(&view, Faction::Nomad, KEEP, 6, 2, true);
        let as_defender = required_dial(&view, Faction::Nomad, KEEP, 6, 2, false);
        assert_eq!(as_defender, as_aggressor + 1);
    }

    #[test]
    fn allocation_meets_exact_dial_with_exact_budget() {
        // Scenario C: dial 10 (20 halves) from 10 normals with exactly
        // 10 resources; every force at full strength, zero shortage.
        let (commit, shortage, paid) =
            allocate_forces(Battalion::new(10, 0), false, false, 10, 20);
        assert_eq!(shortage, 0);
        assert_eq!(paid, 10);
        assert_eq!(commit.normal_full, 10);
        assert_eq!(commit.normal_half, 0);
        assert_eq!(commit.dial_halves(false), 20);
    }

    #[test]
    fn allocation_prefers_specials_then_halves() {
        let (commit, shortage, paid) = allocate_forces(Battalion::new(2, 2), true, false, 2, 12);
        // 2 elite specials at full (8 halves, 2 paid), budget gone, then
        // halves: 2 normal halves close 2 more.
        assert_eq!(commit.special_full, 2);
        assert_eq!(commit.normal_full, 0);
        assert_eq!(commit.normal_half, 2);
        assert_eq!(paid, 2);
        assert_eq!(shortage, 2);
    }

    #[test]
    fn unpaid_forces_ignore_budget() {
        let (commit, shortage, paid) = allocate_forces(Battalion::new(5, 0), false, true, 0, 10);
        assert_eq!(commit.normal_full, 5);
        assert_eq!(paid, 0);
        assert_eq!(shortage, 0);
    }

    #[test]
    fn generator_produces_affordable_plan() {
        let view = battle_view_builder(Faction::Magnate, Faction::Nomad)
            .resources(Faction::Magnate, 4)
            .forces(TerritoryId(5), Faction::Magnate, Battalion::new(4, 0))
            .build();
        let mut harness = ctx_harness(&view);
        let action = battle_generator(&mut harness.ctx())
            .expect("generator runs")
            .expect("plan produced");
        let Action::Battle(plan) = action else {
            panic!("expected battle action");
        };
        assert!(plan.support_spent <= 4);
        assert!(
            view.battalion_at(Faction::Magnate, KEEP)
                .contains(plan.forces.committed())
        );
        assert_eq!(action.validate(&view), Ok(()));
    }

    #[test]
    fn countered_weapon_passed_over() {
        // Scenario B: blade countered by a known shield; the venom in
        // hand wins the slot instead.
        let blade = card_of(CardKind::Weapon(WeaponKind::Blade));
        let venom = card_of(CardKind::Weapon(WeaponKind::Venom));
        let shield = card_of(CardKind::Defense(DefenseKind::Shield));
        let view = battle_view_builder(Faction::Betrayer, Faction::Magnate)
            .hand(vec![blade, venom])
            .known_card(Faction::Magnate, shield)
            .hand_size(Faction::Magnate, 1)
            .build();
        let mut harness = ctx_harness(&view);
        let ctx = harness.ctx();
        let chosen = choose_weapon(&ctx, Faction::Magnate, None);
        assert_eq!(chosen, Some(venom));
    }

    #[test]
    fn compromised_champion_without_rescue_throws() {
        let me = Faction::Seer;
        let mut builder = battle_view_builder(me, Faction::Betrayer).resources(me, 0);
        for leader in leaders_of(me) {
            builder = builder.compromised_leader(leader);
        }
        let view = builder.build();
        let mut harness = ctx_harness(&view);
        let action = battle_generator(&mut harness.ctx())
            .expect("generator runs")
            .expect("plan produced");
        let Action::Battle(plan) = action else {
            panic!("expected battle action");
        };
        // Thrown: no cards, nothing committed, weakest leader fielded.
        assert!(plan.weapon.is_none());
        assert_eq!(plan.forces.committed(), Battalion::EMPTY);
        let weakest = leaders_of(me).min_by_key(|l| l.strength());
        assert_eq!(plan.leader, weakest);
    }

    #[test]
    fn voice_targets_weapon_counter() {
        let blade = card_of(CardKind::Weapon(WeaponKind::Blade));
        let view = battle_view_builder(Faction::Siren, Faction::Nomad)
            .hand(vec![blade])
            .build();
        let mut harness = ctx_harness(&view);
        let action = voice_generator(&mut harness.ctx())
            .expect("generator runs")
            .expect("voice issued");
        let Action::Voice(command) = action else {
            panic!("expected voice");
        };
        assert_eq!(command.scope, VoiceScope::Defense(DefenseKind::Shield));
        assert!(!command.compel);
        assert_eq!(harness.turn.voice_plan, Some(command));
    }

    #[test]
    fn prescience_asks_weapon_when_exposed() {
        let view = battle_view_builder(Faction::Seer, Faction::Betrayer)
            .hand_size(Faction::Betrayer, 6)
            .build();
        let mut harness = ctx_harness(&view);
        let action = prescience_generator(&mut harness.ctx())
            .expect("generator runs")
            .expect("question asked");
        assert_eq!(
            action,
            Action::Prescience {
                question: PrescienceQuestion::Weapon
            }
        );
    }
}
