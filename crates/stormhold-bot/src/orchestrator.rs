//! The priority-ordered action-selection pipeline.
//!
//! Per phase, an ordered list of `(ActionKind, generator)` entries. The
//! first generator whose output validates wins; a generator that errors
//! or declines never blocks the ones after it. The orchestrator always
//! returns an action - an explicit Pass when the catalog runs dry.

use crate::bot::GenCtx;
use stormhold_core::{Action, ActionKind, Phase};
use thiserror::Error;
use tracing::{Level, event};

/// Failure inside a candidate generator. Absorbed by the orchestrator:
/// logged, treated as "no decision", iteration continues.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generator invariant violated: {0}")]
    Invariant(&'static str),
}

impl GenerationError {
    pub fn invariant(message: &'static str) -> Self {
        Self::Invariant(message)
    }
}

/// A candidate-action generator. Returns `Ok(None)` when the situation
/// it handles does not apply.
pub type Generator = fn(&mut GenCtx<'_>) -> Result<Option<Action>, GenerationError>;

#[derive(Clone, Copy)]
pub struct CatalogEntry {
    pub kind: ActionKind,
    pub label: &'static str,
    pub generator: Generator,
}

impl CatalogEntry {
    pub const fn new(kind: ActionKind, label: &'static str, generator: Generator) -> Self {
        Self {
            kind,
            label,
            generator,
        }
    }
}

/// Per-phase generator catalogs, assembled once at bot construction.
#[derive(Default)]
pub struct Catalogs {
    per_phase: [Vec<CatalogEntry>; Phase::LOOP.len()],
}

impl Catalogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, phase: Phase, entry: CatalogEntry) {
        self.per_phase[phase.index()].push(entry);
    }

    pub fn entries(&self, phase: Phase) -> &[CatalogEntry] {
        &self.per_phase[phase.index()]
    }
}

/// Walks the catalog for the current phase and returns the first valid
/// decision, or an explicit Pass.
///
/// Liveness: this function always returns an action. A decision point
/// whose legal set has no pass-capable kind and whose catalog yields
/// nothing is a catalog completeness bug; it is logged at ERROR and
/// answered with a Pass regardless, because stalling the game is the one
/// thing the bot may never do.
pub fn decide(catalogs: &Catalogs, ctx: &mut GenCtx<'_>, legal: &[ActionKind]) -> Action {
    let phase = ctx.view.phase();

    for entry in catalogs.entries(phase) {
        if !legal.contains(&entry.kind) {
            continue;
        }

        let produced = match (entry.generator)(ctx) {
            Ok(Some(action)) => action,
            Ok(None) => continue,
            Err(error) => {
                event!(
                    target: "stormhold_bot::orchestrator",
                    Level::WARN,
                    phase = %phase,
                    generator = entry.label,
                    error = %error,
                    "generator failed; skipping"
                );
                continue;
            }
        };

        match produced.validate(ctx.view) {
            Ok(()) => {
                event!(
                    target: "stormhold_bot::orchestrator",
                    Level::INFO,
                    phase = %phase,
                    generator = entry.label,
                    kind = %produced.kind(),
                    "decision committed"
                );
                return produced;
            }
            Err(error) => {
                event!(
                    target: "stormhold_bot::orchestrator",
                    Level::WARN,
                    phase = %phase,
                    generator = entry.label,
                    error = %error,
                    "decision rejected by validator; skipping"
                );
                continue;
            }
        }
    }

    terminal_pass(phase, legal)
}

fn terminal_pass(phase: Phase, legal: &[ActionKind]) -> Action {
    if let Some(kind) = legal.iter().copied().find(|k| k.supports_pass()) {
        return Action::Pass(kind);
    }

    let fallback = legal.first().copied().unwrap_or(ActionKind::Bid);
    event!(
        target: "stormhold_bot::orchestrator",
        Level::ERROR,
        phase = %phase,
        legal = ?legal,
        "no applicable action and no pass-capable kind; catalog incomplete"
    );
    Action::Pass(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::test_support::ctx_harness;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use stormhold_core::{Faction, GameStateViewBuilder};

    static CALLS_AFTER_SUCCESS: AtomicUsize = AtomicUsize::new(0);

    fn failing(_ctx: &mut GenCtx<'_>) -> Result<Option<Action>, GenerationError> {
        Err(GenerationError::invariant("deliberate test failure"))
    }

    fn declining(_ctx: &mut GenCtx<'_>) -> Result<Option<Action>, GenerationError> {
        Ok(None)
    }

    fn invalid_bid(_ctx: &mut GenCtx<'_>) -> Result<Option<Action>, GenerationError> {
        // No auction is underway in the test views, so this never
        // validates.
        Ok(Some(Action::Bid { amount: 1 }))
    }

    fn passes(_ctx: &mut GenCtx<'_>) -> Result<Option<Action>, GenerationError> {
        Ok(Some(Action::Pass(ActionKind::Shipment)))
    }

    fn counting(_ctx: &mut GenCtx<'_>) -> Result<Option<Action>, GenerationError> {
        CALLS_AFTER_SUCCESS.fetch_add(1, Ordering::SeqCst);
        Ok(Some(Action::Pass(ActionKind::Shipment)))
    }

    fn shipment_catalog(generators: &[(&'static str, Generator)]) -> Catalogs {
        let mut catalogs = Catalogs::new();
        for (label, generator) in generators {
            catalogs.push(
                Phase::Shipment,
                CatalogEntry::new(ActionKind::Shipment, label, *generator),
            );
        }
        catalogs
    }

    fn shipment_view() -> stormhold_core::GameStateView {
        GameStateViewBuilder::new(Faction::Seer, Phase::Shipment).build()
    }

    #[test]
    fn failing_generator_does_not_block_progress() {
        // Scenario D: the high-priority generator errors; the decision
        // still completes from a lower-priority entry.
        let catalogs = shipment_catalog(&[("boom", failing), ("pass", passes)]);
        let view = shipment_view();
        let mut harness = ctx_harness(&view);
        let action = decide(&catalogs, &mut harness.ctx(), &[ActionKind::Shipment]);
        assert_eq!(action, Action::Pass(ActionKind::Shipment));
    }

    #[test]
    fn invalid_decision_skipped_not_retried() {
        let catalogs = shipment_catalog(&[("invalid", invalid_bid), ("pass", passes)]);
        let view = shipment_view();
        let mut harness = ctx_harness(&view);
        let action = decide(&catalogs, &mut harness.ctx(), &[ActionKind::Shipment]);
        assert_eq!(action, Action::Pass(ActionKind::Shipment));
    }

    #[test]
    fn first_valid_decision_short_circuits() {
        CALLS_AFTER_SUCCESS.store(0, Ordering::SeqCst);
        let catalogs = shipment_catalog(&[("pass", passes), ("counting", counting)]);
        let view = shipment_view();
        let mut harness = ctx_harness(&view);
        let action = decide(&catalogs, &mut harness.ctx(), &[ActionKind::Shipment]);
        assert_eq!(action, Action::Pass(ActionKind::Shipment));
        assert_eq!(CALLS_AFTER_SUCCESS.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn illegal_kinds_are_skipped() {
        CALLS_AFTER_SUCCESS.store(0, Ordering::SeqCst);
        let catalogs = shipment_catalog(&[("counting", counting)]);
        let view = shipment_view();
        let mut harness = ctx_harness(&view);
        // Shipment is not legal here; the entry must not even run.
        let action = decide(&catalogs, &mut harness.ctx(), &[ActionKind::Move]);
        assert_eq!(CALLS_AFTER_SUCCESS.load(Ordering::SeqCst), 0);
        assert_eq!(action, Action::Pass(ActionKind::Move));
    }

    #[test]
    fn dry_catalog_yields_explicit_pass() {
        let catalogs = shipment_catalog(&[("decline", declining)]);
        let view = shipment_view();
        let mut harness = ctx_harness(&view);
        let action = decide(&catalogs, &mut harness.ctx(), &[ActionKind::Shipment]);
        assert_eq!(action, Action::Pass(ActionKind::Shipment));
    }
}
