//! Battle planning: survival estimation under hidden information, wheel
//! card selection, dial computation, and force allocation.

mod plan;
mod survival;

pub use plan::{battle_generator, prescience_generator, required_dial, voice_generator};
pub use survival::{SurvivalEstimate, estimate_survival};
