mod params;

pub use params::BotParams;

use crate::knowledge::Knowledge;
use crate::orchestrator::{Catalogs, decide};
use crate::turn::TurnContext;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use stormhold_core::{Action, ActionKind, Faction, GameStateView};
use tracing::{Level, event};

/// Everything a candidate generator sees: the authoritative view, the
/// derived belief state, the faction's parameters, the bot's private
/// randomness, and the turn-scoped decision context.
pub struct GenCtx<'a> {
    pub view: &'a GameStateView,
    pub knowledge: Knowledge<'a>,
    pub params: &'a BotParams,
    pub rng: &'a mut SmallRng,
    pub turn: &'a mut TurnContext,
}

/// An autonomous player for one faction.
///
/// Construction resolves the faction's parameter preset and generator
/// catalogs once; [`Bot::decide`] is then a pure walk over them. The
/// rule engine owns all state; the bot owns only its randomness and the
/// turn context.
pub struct Bot {
    faction: Faction,
    params: BotParams,
    catalogs: Catalogs,
    rng: SmallRng,
    turn: TurnContext,
}

impl Bot {
    pub fn new(faction: Faction) -> Self {
        Self::with_seed(faction, rand::random())
    }

    /// Seeded construction for harnesses that want repeatable sampling.
    pub fn with_seed(faction: Faction, seed: u64) -> Self {
        Self {
            faction,
            params: BotParams::for_faction(faction),
            catalogs: crate::faction::build_catalogs(faction),
            rng: SmallRng::seed_from_u64(seed),
            turn: TurnContext::new(),
        }
    }

    pub fn faction(&self) -> Faction {
        self.faction
    }

    pub fn params(&self) -> &BotParams {
        &self.params
    }

    /// One decision point: walk the phase catalog against the legal
    /// kinds and return the first valid action, or an explicit Pass.
    /// Always returns; never stalls the game.
    pub fn decide(&mut self, view: &GameStateView, legal: &[ActionKind]) -> Action {
        debug_assert_eq!(view.my_faction(), self.faction);
        self.turn.sync(view);

        let mut ctx = GenCtx {
            view,
            knowledge: Knowledge::new(view),
            params: &self.params,
            rng: &mut self.rng,
            turn: &mut self.turn,
        };
        let action = decide(&self.catalogs, &mut ctx, legal);

        event!(
            target: "stormhold_bot::decision",
            Level::DEBUG,
            faction = %self.faction,
            phase = %view.phase(),
            legal = ?legal,
            chosen = ?action.kind(),
            pass = action.is_pass(),
        );
        action
    }
}
