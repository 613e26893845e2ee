//! The scenario synthesizer — one Monte Carlo batch per call.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Weapon effectiveness snapshot   (once per batch)
//!   2. National capability snapshot    (once per batch)
//!   3. Per-record draws, `count` times, in column order:
//!        conflict probabilities, aggressor, duration,
//!        side A effectiveness, side B effectiveness,
//!        casualties A, casualties B, civilian casualties, economic damage
//!
//! RULES:
//!   - All randomness flows through the synthesizer's own SimRng.
//!   - Records are appended in draw order and never touched again.
//!   - Reordering any draw changes every table for a given seed.

use crate::{
    capabilities::{generate_national_capabilities, NationalCapabilityProfile},
    config::{EffectivenessMode, GeneratorConfig, Interval},
    error::{SimError, SimResult},
    rng::{RngBank, SimRng},
    scenario::{Nation, ScenarioRecord, ScenarioTable},
    weapons::{generate_weapon_effectiveness, WeaponEffectivenessProfile},
};
use serde::{Deserialize, Serialize};

/// (category, metric) each effectiveness column is read from.
pub const TANK_SOURCE: (&str, &str) = ("tanks", "kill_probability");
pub const ARTILLERY_SOURCE: (&str, &str) = ("artillery", "kill_probability");
pub const JET_SOURCE: (&str, &str) = ("fighter_jets", "kill_probability");
pub const CYBER_SOURCE: (&str, &str) = ("cyber_attacks", "infrastructure_disruption_probability");

/// Everything one batch produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioBatch {
    /// Starting seed of the stream that produced this batch. Not a per-batch
    /// seed: `(seed, batch_index)` together locate the batch on its stream.
    pub seed: u64,
    /// Batches this synthesizer produced before this one. A fresh synthesizer
    /// seeded with `seed` reproduces the batch after discarding that many
    /// batches of the same count.
    pub batch_index: u64,
    pub effectiveness_mode: EffectivenessMode,
    pub weapon_effectiveness: WeaponEffectivenessProfile,
    pub national_capabilities: NationalCapabilityProfile,
    pub scenarios: ScenarioTable,
}

#[derive(Debug, Clone, Copy)]
struct SideEffectiveness {
    tank: f64,
    artillery: f64,
    jet: f64,
    cyber: f64,
}

enum EffectivenessDraw {
    /// Both sides of every record copy the batch snapshot.
    Shared(SideEffectiveness),
    /// Each side of each record draws from the metric's interval.
    PerSide {
        tank: Interval,
        artillery: Interval,
        jet: Interval,
        cyber: Interval,
    },
}

impl EffectivenessDraw {
    fn side(&self, rng: &mut SimRng) -> SimResult<SideEffectiveness> {
        match self {
            Self::Shared(snapshot) => Ok(*snapshot),
            Self::PerSide { tank, artillery, jet, cyber } => Ok(SideEffectiveness {
                tank:      tank.sample(rng)?,
                artillery: artillery.sample(rng)?,
                jet:       jet.sample(rng)?,
                cyber:     cyber.sample(rng)?,
            }),
        }
    }
}

pub struct ScenarioSynthesizer {
    config:  GeneratorConfig,
    rng:     SimRng,
    batches: u64,
}

impl ScenarioSynthesizer {
    /// Validate `config` and seed a fresh stream.
    pub fn new(seed: u64, config: GeneratorConfig) -> SimResult<Self> {
        Self::from_rng(SimRng::new(seed), config)
    }

    /// Built-in tables, shared-snapshot mode.
    pub fn build(seed: u64) -> Self {
        Self {
            config:  GeneratorConfig::default(),
            rng:     SimRng::new(seed),
            batches: 0,
        }
    }

    pub fn from_rng(rng: SimRng, config: GeneratorConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config, rng, batches: 0 })
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate `count` records. Negative counts, and counts too large to
    /// hold in memory, are rejected before any draw is consumed; zero yields
    /// an empty table.
    pub fn generate_conflict_scenarios(&mut self, count: i64) -> SimResult<ScenarioTable> {
        Ok(self.generate_batch(count)?.scenarios)
    }

    /// Like `generate_conflict_scenarios`, but also returns both snapshots.
    pub fn generate_batch(&mut self, count: i64) -> SimResult<ScenarioBatch> {
        let count = usize::try_from(count).map_err(|_| {
            SimError::InvalidArgument(format!("scenario count must be >= 0, got {count}"))
        })?;
        let mut scenarios = ScenarioTable::try_with_capacity(count)?;

        let weapon_effectiveness = generate_weapon_effectiveness(&mut self.rng, &self.config.weapons)?;
        let national_capabilities = generate_national_capabilities(&mut self.rng, &self.config.nations)?;
        let effectiveness = self.effectiveness_draw(&weapon_effectiveness)?;

        for _ in 0..count {
            let record = self.draw_record(&effectiveness)?;
            scenarios.push(record);
        }

        let batch_index = self.batches;
        self.batches += 1;
        log::info!(
            "Generated {} scenarios (seed={}, batch={}, mode={:?})",
            scenarios.len(),
            self.rng.seed(),
            batch_index,
            self.config.effectiveness_mode
        );

        Ok(ScenarioBatch {
            seed: self.rng.seed(),
            batch_index,
            effectiveness_mode: self.config.effectiveness_mode,
            weapon_effectiveness,
            national_capabilities,
            scenarios,
        })
    }

    fn effectiveness_draw(&self, snapshot: &WeaponEffectivenessProfile) -> SimResult<EffectivenessDraw> {
        match self.config.effectiveness_mode {
            EffectivenessMode::SharedSnapshot => Ok(EffectivenessDraw::Shared(SideEffectiveness {
                tank:      snapshot.require(TANK_SOURCE.0, TANK_SOURCE.1)?,
                artillery: snapshot.require(ARTILLERY_SOURCE.0, ARTILLERY_SOURCE.1)?,
                jet:       snapshot.require(JET_SOURCE.0, JET_SOURCE.1)?,
                cyber:     snapshot.require(CYBER_SOURCE.0, CYBER_SOURCE.1)?,
            })),
            EffectivenessMode::IndependentPerSide => Ok(EffectivenessDraw::PerSide {
                tank:      self.config.weapon_interval(TANK_SOURCE.0, TANK_SOURCE.1)?,
                artillery: self.config.weapon_interval(ARTILLERY_SOURCE.0, ARTILLERY_SOURCE.1)?,
                jet:       self.config.weapon_interval(JET_SOURCE.0, JET_SOURCE.1)?,
                cyber:     self.config.weapon_interval(CYBER_SOURCE.0, CYBER_SOURCE.1)?,
            }),
        }
    }

    fn draw_record(&mut self, effectiveness: &EffectivenessDraw) -> SimResult<ScenarioRecord> {
        let ranges = &self.config.scenario;
        let rng = &mut self.rng;

        let cyber_conflict_probability = ranges.cyber_conflict_probability.sample(rng)?;
        let conventional_war_probability = ranges.conventional_war_probability.sample(rng)?;
        let limited_engagement_probability = ranges.limited_engagement_probability.sample(rng)?;
        let initial_aggressor = *rng.choice(&Nation::ALL)?;
        let conflict_duration_days = ranges.conflict_duration_days.sample(rng)?;

        let side_a = effectiveness.side(rng)?;
        let side_b = effectiveness.side(rng)?;

        let estimated_military_casualties_a = ranges.estimated_military_casualties.sample(rng)?;
        let estimated_military_casualties_b = ranges.estimated_military_casualties.sample(rng)?;
        let estimated_civilian_casualties = ranges.estimated_civilian_casualties.sample(rng)?;
        let economic_damage_billion_usd = ranges.economic_damage_billion_usd.sample(rng)?;

        Ok(ScenarioRecord {
            cyber_conflict_probability,
            conventional_war_probability,
            limited_engagement_probability,
            initial_aggressor,
            conflict_duration_days,
            tank_effectiveness_a: side_a.tank,
            artillery_effectiveness_a: side_a.artillery,
            jet_effectiveness_a: side_a.jet,
            tank_effectiveness_b: side_b.tank,
            artillery_effectiveness_b: side_b.artillery,
            jet_effectiveness_b: side_b.jet,
            cyber_disruption_potential_a: side_a.cyber,
            cyber_disruption_potential_b: side_b.cyber,
            estimated_military_casualties_a,
            estimated_military_casualties_b,
            estimated_civilian_casualties,
            economic_damage_billion_usd,
        })
    }
}

/// Run `replicates` independent batches from one master seed.
/// Replicate `i` draws from `RngBank::for_replicate(i)`.
pub fn generate_replicates(
    master_seed: u64,
    config: &GeneratorConfig,
    count: i64,
    replicates: u64,
) -> SimResult<Vec<ScenarioBatch>> {
    if count < 0 {
        return Err(SimError::InvalidArgument(format!(
            "scenario count must be >= 0, got {count}"
        )));
    }
    let bank = RngBank::new(master_seed);
    (0..replicates)
        .map(|i| {
            let mut synthesizer = ScenarioSynthesizer::from_rng(bank.for_replicate(i), config.clone())?;
            synthesizer.generate_batch(count)
        })
        .collect()
}
