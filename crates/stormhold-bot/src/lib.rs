pub mod battle;
pub mod bidding;
pub mod bot;
pub mod deals;
pub mod faction;
pub mod knowledge;
pub mod orchestrator;
pub mod revival;
pub mod shipment;
pub mod turn;

pub use bot::{Bot, BotParams, GenCtx};
pub use knowledge::{Knowledge, LeaderSafety};
pub use orchestrator::{CatalogEntry, Catalogs, GenerationError, Generator};
pub use shipment::{Candidate, Heuristic};
pub use turn::TurnContext;
