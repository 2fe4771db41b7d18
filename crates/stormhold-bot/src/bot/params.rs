use stormhold_core::Faction;

/// Tunable bot parameters.
///
/// One immutable copy per bot, selected by faction at construction. The
/// values are empirical tuning defaults; nothing downstream assumes any
/// particular relationship between them.
#[derive(Debug, Clone, Copy)]
pub struct BotParams {
    // === Bidding ===
    /// Resources bid per point of estimated card quality.
    pub bid_quality_mult: u16,

    /// Estimated quality (0-5) below which the bot passes outright.
    pub bid_pass_quality: u8,

    /// Resources held back from any bid.
    pub bid_reserve: u16,

    /// Hand size at or above which bidding stops regardless of quality.
    pub bid_hand_cap: u8,

    // === Battle ===
    /// Own-leader survival probability under which the planner prefers a
    /// surrogate or its weakest leader.
    pub survival_cutoff: f64,

    /// Enemy-leader kill probability treated as good as certain when
    /// ranking weapon choices.
    pub kill_confidence: f64,

    /// Dial shortfall (half-point units) beyond which the planner throws
    /// the fight instead of reinforcing a lost position.
    pub throw_shortfall: u32,

    /// Total board forces at or under which throwing is considered at all.
    pub throw_board_strength: u16,

    /// Expected enemy reinforcement added to the required dial
    /// (half-point units).
    pub reinforcement_margin: u32,

    /// Bounded correction passes when a chosen wheel card turns illegal.
    pub correction_passes: u8,

    // === Shipment ===
    /// Allocate special forces before normal forces when true.
    pub special_first: bool,

    /// Cap on forces committed beyond what remaining resources could
    /// support in the ensuing battle.
    pub unsupported_cap: u16,

    /// Resources kept in reserve after any shipment.
    pub resource_reserve: u16,

    /// Acceptable dial shortage per heuristic (half-point units).
    pub shortage_block_win: u32,
    pub shortage_storm_rescue: u32,
    pub shortage_reinforce: u32,
    pub shortage_occupy: u32,
    pub shortage_collect: u32,
    pub shortage_attack: u32,
    pub shortage_retreat: u32,

    // === Revival ===
    /// Most resources spent on revival in one phase.
    pub revival_max_spend: u16,

    // === Deals ===
    /// Minimum resource gain before a deal offer is accepted.
    pub deal_accept_min_gain: u16,
}

impl BotParams {
    pub fn for_faction(faction: Faction) -> Self {
        match faction {
            Faction::Seer => Self::seer(),
            Faction::Siren => Self::siren(),
            Faction::Nomad => Self::nomad(),
            Faction::Betrayer => Self::betrayer(),
            Faction::Magnate => Self::magnate(),
            Faction::Navigator => Self::navigator(),
        }
    }

    /// Baseline the faction presets adjust from.
    const fn baseline() -> Self {
        Self {
            bid_quality_mult: 2,
            bid_pass_quality: 2,
            bid_reserve: 2,
            bid_hand_cap: 4,
            survival_cutoff: 0.45,
            kill_confidence: 0.75,
            throw_shortfall: 8,
            throw_board_strength: 6,
            reinforcement_margin: 2,
            correction_passes: 3,
            special_first: false,
            unsupported_cap: 4,
            resource_reserve: 3,
            shortage_block_win: 4,
            shortage_storm_rescue: 6,
            shortage_reinforce: 2,
            shortage_occupy: 0,
            shortage_collect: 0,
            shortage_attack: 1,
            shortage_retreat: 4,
            revival_max_spend: 6,
            deal_accept_min_gain: 3,
        }
    }

    /// Seer: patient, information-rich; bids hard on cards it has seen.
    pub const fn seer() -> Self {
        Self {
            bid_quality_mult: 3,
            bid_pass_quality: 1,
            survival_cutoff: 0.55,
            shortage_attack: 0,
            ..Self::baseline()
        }
    }

    /// Siren: wins battles with the voice, not with mass.
    pub const fn siren() -> Self {
        Self {
            kill_confidence: 0.65,
            throw_shortfall: 6,
            resource_reserve: 4,
            ..Self::baseline()
        }
    }

    /// Nomad: forces are cheap to field and revive; fights looser.
    pub const fn nomad() -> Self {
        Self {
            special_first: true,
            bid_reserve: 1,
            throw_shortfall: 12,
            throw_board_strength: 4,
            unsupported_cap: 8,
            resource_reserve: 1,
            shortage_attack: 3,
            shortage_storm_rescue: 8,
            ..Self::baseline()
        }
    }

    /// Betrayer: spends little on battles it may win by treachery.
    pub const fn betrayer() -> Self {
        Self {
            bid_quality_mult: 2,
            bid_hand_cap: 5,
            throw_shortfall: 5,
            shortage_attack: 2,
            deal_accept_min_gain: 2,
            ..Self::baseline()
        }
    }

    /// Magnate: deep treasury, expensive elite forces.
    pub const fn magnate() -> Self {
        Self {
            bid_quality_mult: 4,
            bid_reserve: 4,
            special_first: true,
            resource_reserve: 5,
            revival_max_spend: 8,
            ..Self::baseline()
        }
    }

    /// Navigator: ships cheap, strikes where shipping wins tempo.
    pub const fn navigator() -> Self {
        Self {
            bid_pass_quality: 3,
            unsupported_cap: 6,
            shortage_occupy: 2,
            shortage_collect: 2,
            ..Self::baseline()
        }
    }

    pub fn shortage_threshold(&self, heuristic: crate::shipment::Heuristic) -> u32 {
        use crate::shipment::Heuristic;
        match heuristic {
            Heuristic::BlockEnemyWin => self.shortage_block_win,
            Heuristic::StormRescue => self.shortage_storm_rescue,
            Heuristic::ReinforceWeakestStronghold => self.shortage_reinforce,
            Heuristic::OccupyVacantStronghold => self.shortage_occupy,
            Heuristic::CollectResources => self.shortage_collect,
            Heuristic::AttackWeakStronghold => self.shortage_attack,
            Heuristic::RetreatStranded => self.shortage_retreat,
        }
    }
}
