use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use stormhold_core::{ActionKind, Faction, Phase};
use thiserror::Error;
use tracing::Level;

const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";
const DEFAULT_SEED: u64 = 0x5eed;

/// Root harness configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BenchConfig {
    pub run_id: String,
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// JSONL output path; `{run_id}` is substituted.
    pub output: String,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub scenarios: Vec<ScenarioConfig>,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl BenchConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let cfg: BenchConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate without performing I/O.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.run_id.is_empty() || !self.run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
            return Err(ValidationError::InvalidField {
                field: "run_id".to_string(),
                message: "must be non-empty and use [A-Za-z0-9._-]".to_string(),
            });
        }
        if self.scenarios.is_empty() {
            return Err(ValidationError::InvalidField {
                field: "scenarios".to_string(),
                message: "at least one scenario is required".to_string(),
            });
        }
        for scenario in &self.scenarios {
            scenario.validate()?;
        }
        Ok(())
    }

    pub fn resolved_output(&self) -> PathBuf {
        PathBuf::from(self.output.replace("{run_id}", &self.run_id))
    }
}

/// One scripted decision point.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScenarioConfig {
    pub name: String,
    pub faction: Faction,
    pub phase: Phase,
    pub legal: Vec<ActionKind>,
    #[serde(default)]
    pub resources: u16,
    #[serde(default)]
    pub reserves: ForcesSpec,
    #[serde(default)]
    pub storm_sector: u8,
    #[serde(default)]
    pub forces: Vec<PlacementSpec>,
    #[serde(default)]
    pub caches: Vec<CacheSpec>,
    #[serde(default)]
    pub auction: Option<AuctionSpec>,
    #[serde(default)]
    pub battle: Option<BattleSpec>,
}

impl ScenarioConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::InvalidField {
                field: "scenarios.name".to_string(),
                message: "scenario names must be non-empty".to_string(),
            });
        }
        if self.legal.is_empty() {
            return Err(ValidationError::InvalidField {
                field: format!("scenarios.{}.legal", self.name),
                message: "at least one legal action kind is required".to_string(),
            });
        }
        for placement in &self.forces {
            if placement.territory as usize >= stormhold_core::model::territory::TERRITORY_COUNT {
                return Err(ValidationError::InvalidField {
                    field: format!("scenarios.{}.forces", self.name),
                    message: format!("territory {} is off the board", placement.territory),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq)]
pub struct ForcesSpec {
    #[serde(default)]
    pub normal: u8,
    #[serde(default)]
    pub special: u8,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct PlacementSpec {
    pub territory: u8,
    pub faction: Faction,
    #[serde(default)]
    pub normal: u8,
    #[serde(default)]
    pub special: u8,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct CacheSpec {
    pub territory: u8,
    pub amount: u16,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct AuctionSpec {
    #[serde(default)]
    pub high_bid: u16,
    #[serde(default = "default_auction_kind")]
    pub kind: stormhold_core::AuctionKind,
}

fn default_auction_kind() -> stormhold_core::AuctionKind {
    stormhold_core::AuctionKind::Ascending
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct BattleSpec {
    pub territory: u8,
    pub opponent: Faction,
    #[serde(default)]
    pub defending: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            level: default_level(),
        }
    }
}

impl LoggingConfig {
    pub fn level(&self) -> Option<Level> {
        match self.level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config at {path}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("parsing config at {path}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid config at {path}")]
    Invalid {
        #[source]
        source: ValidationError,
        path: PathBuf,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_yaml() -> &'static str {
        r#"
run_id: smoke-1
output: out/{run_id}.jsonl
logging:
  enable_structured: false
scenarios:
  - name: zero-budget-bid
    faction: Nomad
    phase: Bidding
    legal: [Bid]
    auction:
      high_bid: 0
  - name: open-shipment
    faction: Navigator
    phase: Shipment
    legal: [Shipment, Move]
    resources: 10
    reserves:
      normal: 8
    forces:
      - territory: 0
        faction: Betrayer
        normal: 3
"#
    }

    #[test]
    fn sample_config_parses_and_validates() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(sample_yaml().as_bytes()).expect("write");
        let config = BenchConfig::from_path(file.path()).expect("load");
        assert_eq!(config.run_id, "smoke-1");
        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.scenarios.len(), 2);
        assert_eq!(config.scenarios[0].faction, Faction::Nomad);
        assert_eq!(
            config.resolved_output(),
            PathBuf::from("out/smoke-1.jsonl")
        );
    }

    #[test]
    fn bad_run_id_rejected() {
        let config = BenchConfig {
            run_id: "bad id!".to_string(),
            seed: 1,
            output: "out.jsonl".to_string(),
            logging: LoggingConfig::default(),
            scenarios: vec![],
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidField { field, .. }) if field == "run_id"
        ));
    }

    #[test]
    fn off_board_territory_rejected() {
        let config = BenchConfig {
            run_id: "ok".to_string(),
            seed: 1,
            output: "out.jsonl".to_string(),
            logging: LoggingConfig::default(),
            scenarios: vec![ScenarioConfig {
                name: "broken".to_string(),
                faction: Faction::Seer,
                phase: Phase::Shipment,
                legal: vec![ActionKind::Shipment],
                resources: 0,
                reserves: ForcesSpec::default(),
                storm_sector: 0,
                forces: vec![PlacementSpec {
                    territory: 99,
                    faction: Faction::Seer,
                    normal: 1,
                    special: 0,
                }],
                caches: vec![],
                auction: None,
                battle: None,
            }],
        };
        assert!(config.validate().is_err());
    }
}
