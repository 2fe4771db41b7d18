use stormhold_core::{Action, GameStateView, Phase, PrescienceQuestion, TerritoryId, VoiceCommand};

/// Choices that must stay consistent across several generator calls
/// within one battle or one shipment phase.
///
/// The orchestrator resynchronizes this against the view at every
/// decision point; a concluded battle or a phase change clears the
/// associated entries. Nothing in here survives past the cycle it was
/// made for.
#[derive(Debug, Clone, Default)]
pub struct TurnContext {
    battle_key: Option<TerritoryId>,
    phase_key: Option<Phase>,
    /// Voice command issued (or about to be issued) this battle.
    pub voice_plan: Option<VoiceCommand>,
    /// Prescience question chosen this battle.
    pub prescience_plan: Option<PrescienceQuestion>,
    /// Move decided alongside a committed shipment, to be emitted when
    /// the move decision point arrives.
    pub pending_move: Option<Action>,
}

impl TurnContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aligns the context with the current view. Battle-scoped entries
    /// are dropped when the battle they were made for is gone; the
    /// pending move is dropped when the shipment phase ends.
    pub fn sync(&mut self, view: &GameStateView) {
        let current_battle = view.battle().map(|b| b.territory);
        if current_battle != self.battle_key {
            self.battle_key = current_battle;
            self.voice_plan = None;
            self.prescience_plan = None;
        }

        let phase = view.phase();
        if self.phase_key != Some(phase) {
            self.phase_key = Some(phase);
            if phase != Phase::Shipment {
                self.pending_move = None;
            }
        }
    }

    pub fn battle_key(&self) -> Option<TerritoryId> {
        self.battle_key
    }
}
