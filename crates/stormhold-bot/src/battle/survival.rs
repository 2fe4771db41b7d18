use crate::bot::GenCtx;
use crate::knowledge::{Knowledge, weapon_beats};
use stormhold_core::model::card::{CardKind, DefenseKind, WeaponKind};
use stormhold_core::{CardId, Faction, PrescienceQuestion, VoiceScope};

/// Kill probability granted by a live, uncountered weapon. The rest is
/// dial bluffing and the occasional worthless-card feint.
const BASE_KILL: f64 = 0.9;
/// Survival granted when the opponent is known to have no usable weapon.
const BASE_SURVIVE: f64 = 0.95;
/// Floor when the opponent is known to hold an unanswered weapon.
const DOOMED: f64 = 0.1;

/// The two probabilities the battle planner steers by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurvivalEstimate {
    pub enemy_leader_dies: f64,
    pub my_leader_survives: f64,
}

/// Estimates both wheel outcomes for a candidate weapon/defense pairing
/// against `opponent`.
///
/// Forced knowledge wins over everything: a prescience reveal or an
/// issued voice command short-circuits the combinatorial estimate.
pub fn estimate_survival(
    ctx: &GenCtx<'_>,
    opponent: Faction,
    my_weapon: Option<CardId>,
    my_defense: Option<CardId>,
) -> SurvivalEstimate {
    SurvivalEstimate {
        enemy_leader_dies: enemy_leader_dies(ctx, opponent, my_weapon),
        my_leader_survives: my_leader_survives(ctx, opponent, my_defense),
    }
}

fn enemy_leader_dies(ctx: &GenCtx<'_>, opponent: Faction, my_weapon: Option<CardId>) -> f64 {
    let Some(weapon) = my_weapon else {
        return 0.0;
    };

    let weapon_kind = match weapon.kind() {
        CardKind::Lasgun => return BASE_KILL,
        CardKind::Weapon(kind) => kind,
        _ => return 0.0,
    };

    // Forced knowledge: their defense card is revealed.
    if let Some(reveal) = ctx.view.grants().prescience {
        if reveal.question == PrescienceQuestion::Defense {
            return match reveal.card {
                Some(defense) => match defense.kind() {
                    CardKind::Defense(kind) if kind.stops(weapon_kind) => 1.0 - BASE_KILL,
                    _ => BASE_KILL,
                },
                None => BASE_KILL,
            };
        }
    }

    // A voice forbidding the countering defense leaves them open.
    if let Some(voice) = &ctx.turn.voice_plan {
        if !voice.compel {
            if let VoiceScope::Defense(forbidden) = voice.scope {
                if forbidden.stops(weapon_kind) {
                    return BASE_KILL;
                }
            }
        }
    }

    // A known counter in their hand makes the weapon near-worthless.
    let knowledge = ctx.knowledge;
    let known_counter = knowledge.known_held_by(opponent).iter().any(|card| {
        matches!(card.kind(), CardKind::Defense(kind) if kind.stops(weapon_kind))
    });
    if known_counter {
        return 1.0 - BASE_KILL;
    }

    // Hypergeometric estimate over the unknown pool.
    let pool = knowledge.cards_unknown_to_me().len();
    let counters = knowledge.counters_unknown(opponent, weapon_kind);
    let unknown_hand = knowledge.opponent_unknown_count(opponent);
    BASE_KILL * Knowledge::chance_hand_avoids(unknown_hand, pool, counters)
}

fn my_leader_survives(ctx: &GenCtx<'_>, opponent: Faction, my_defense: Option<CardId>) -> f64 {
    let defense_kind = my_defense.and_then(|card| match card.kind() {
        CardKind::Defense(kind) => Some(kind),
        _ => None,
    });

    // Forced knowledge: their weapon slot is revealed.
    if let Some(reveal) = ctx.view.grants().prescience {
        if reveal.question == PrescienceQuestion::Weapon {
            return match reveal.card {
                Some(weapon) if weapon_beats(weapon.kind(), defense_kind) => DOOMED,
                _ => BASE_SURVIVE,
            };
        }
    }

    let knowledge = ctx.knowledge;
    let voiced_off = voiced_off_weapon(ctx);

    // Known weapons in their hand my defense cannot answer.
    let known_threat = knowledge.known_held_by(opponent).iter().any(|card| {
        if kind_is_voiced_off(card.kind(), voiced_off) {
            return false;
        }
        weapon_beats(card.kind(), defense_kind)
    });
    if known_threat {
        return DOOMED;
    }

    // Hypergeometric over unknown weapons that would get through.
    let pool = knowledge.cards_unknown_to_me().len();
    let dangerous = knowledge
        .cards_opponent_might_have(opponent)
        .iter()
        .filter(|card| !knowledge.known_held_by(opponent).contains(card))
        .filter(|card| !kind_is_voiced_off(card.kind(), voiced_off))
        .filter(|card| weapon_beats(card.kind(), defense_kind))
        .count();
    let unknown_hand = knowledge.opponent_unknown_count(opponent);
    BASE_SURVIVE * Knowledge::chance_hand_avoids(unknown_hand, pool, dangerous)
}

/// The weapon kind the bot has voiced the opponent off of, if any.
fn voiced_off_weapon(ctx: &GenCtx<'_>) -> Option<WeaponKind> {
    match &ctx.turn.voice_plan {
        Some(voice) if !voice.compel => match voice.scope {
            VoiceScope::Weapon(kind) => Some(kind),
            VoiceScope::Defense(_) => None,
        },
        _ => None,
    }
}

fn kind_is_voiced_off(kind: CardKind, voiced_off: Option<WeaponKind>) -> bool {
    match (kind, voiced_off) {
        (CardKind::Weapon(weapon), Some(off)) => weapon == off,
        _ => false,
    }
}

/// Convenience used by planners: does the opponent possibly hold a
/// shield? Governs lasgun detonation risk.
pub fn opponent_might_shield(knowledge: &Knowledge<'_>, opponent: Faction) -> bool {
    knowledge
        .cards_opponent_might_have(opponent)
        .iter()
        .any(|card| matches!(card.kind(), CardKind::Defense(DefenseKind::Shield)))
        && knowledge.opponent_unknown_count(opponent) > 0
        || knowledge
            .known_held_by(opponent)
            .iter()
            .any(|card| matches!(card.kind(), CardKind::Defense(DefenseKind::Shield)))
}
