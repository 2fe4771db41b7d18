//! Drives bots through scripted decision points and records the chosen
//! actions as JSONL rows.

use crate::config::{BenchConfig, ScenarioConfig};
use anyhow::{Context, Result};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use stormhold_bot::Bot;
use stormhold_core::{
    Action, AuctionState, Battalion, BattleState, GameStateView, GameStateViewBuilder, TerritoryId,
};

#[derive(Debug, Serialize)]
pub struct DecisionRow {
    pub scenario: String,
    pub faction: String,
    pub phase: String,
    pub action: Action,
    pub passed: bool,
}

pub struct ScenarioRunner {
    config: BenchConfig,
}

impl ScenarioRunner {
    pub fn new(config: BenchConfig) -> Self {
        Self { config }
    }

    /// Runs every scenario once and writes the decision log.
    pub fn run(&self) -> Result<Vec<DecisionRow>> {
        let mut seed_rng = StdRng::seed_from_u64(self.config.seed);
        let mut rows = Vec::with_capacity(self.config.scenarios.len());

        for scenario in &self.config.scenarios {
            let view = build_view(scenario);
            let mut bot = Bot::with_seed(scenario.faction, seed_rng.r#gen());
            let action = bot.decide(&view, &scenario.legal);
            rows.push(DecisionRow {
                scenario: scenario.name.clone(),
                faction: scenario.faction.to_string(),
                phase: scenario.phase.to_string(),
                passed: action.is_pass(),
                action,
            });
        }

        self.write_rows(&rows)?;
        Ok(rows)
    }

    fn write_rows(&self, rows: &[DecisionRow]) -> Result<()> {
        let output = self.config.resolved_output();
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {}", parent.display()))?;
        }
        let file = File::create(&output)
            .with_context(|| format!("creating output file {}", output.display()))?;
        let mut writer = BufWriter::new(file);
        for row in rows {
            serde_json::to_writer(&mut writer, row).context("serializing decision row")?;
            writer.write_all(b"\n").context("writing decision row")?;
        }
        Ok(())
    }
}

fn build_view(scenario: &ScenarioConfig) -> GameStateView {
    let mut builder = GameStateViewBuilder::new(scenario.faction, scenario.phase)
        .resources(scenario.faction, scenario.resources)
        .reserves(
            scenario.faction,
            Battalion::new(scenario.reserves.normal, scenario.reserves.special),
        )
        .storm(scenario.storm_sector);

    for placement in &scenario.forces {
        builder = builder.forces(
            TerritoryId(placement.territory),
            placement.faction,
            Battalion::new(placement.normal, placement.special),
        );
    }
    for cache in &scenario.caches {
        builder = builder.cache(TerritoryId(cache.territory), cache.amount);
    }
    if let Some(auction) = &scenario.auction {
        builder = builder.auction(AuctionState {
            card_index: 0,
            cards_total: 6,
            high_bid: auction.high_bid,
            high_bidder: None,
            kind: auction.kind,
        });
    }
    if let Some(battle) = &scenario.battle {
        let territory = TerritoryId(battle.territory);
        let (aggressor, defender) = if battle.defending {
            (battle.opponent, scenario.faction)
        } else {
            (scenario.faction, battle.opponent)
        };
        builder = builder.battle(BattleState {
            territory,
            aggressor,
            defender,
            voice_on_me: None,
        });
    }

    builder.build()
}
