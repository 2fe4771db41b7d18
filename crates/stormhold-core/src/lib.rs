pub mod model;
pub mod rules;
pub mod state;

pub use model::action::{
    Action, ActionError, ActionKind, BattlePlan, DealAsk, DealTerms, PrescienceQuestion,
    PrescienceReveal, VoiceCommand, VoiceConstraint, VoiceScope,
};
pub use model::card::{CardCategory, CardId, CardKind, DefenseKind, WeaponKind};
pub use model::faction::{Faction, FactionPermissions};
pub use model::forces::{Battalion, ForceCommit};
pub use model::leader::LeaderId;
pub use model::phase::Phase;
pub use model::territory::TerritoryId;
pub use state::{
    AuctionKind, AuctionState, BattleState, GameStateView, GameStateViewBuilder, KnowledgeGrants,
    PendingDeal,
};
