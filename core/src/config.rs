use crate::error::{SimError, SimResult};
use crate::rng::SimRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// A closed real interval [lo, hi].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Interval {
    pub lo: f64,
    pub hi: f64,
}

impl Interval {
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    pub fn sample(&self, rng: &mut SimRng) -> SimResult<f64> {
        rng.uniform_real(self.lo, self.hi)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }

    pub fn validate(&self) -> SimResult<()> {
        let width = self.hi - self.lo;
        if !self.lo.is_finite() || !self.hi.is_finite() || self.lo > self.hi || !width.is_finite() {
            return Err(SimError::InvalidRange { lo: self.lo, hi: self.hi });
        }
        Ok(())
    }
}

/// A half-open integer range [lo, hi).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntInterval {
    pub lo: i64,
    pub hi: i64,
}

impl IntInterval {
    pub const fn new(lo: i64, hi: i64) -> Self {
        Self { lo, hi }
    }

    pub fn sample(&self, rng: &mut SimRng) -> SimResult<i64> {
        rng.uniform_int(self.lo, self.hi)
    }

    pub fn contains(&self, value: i64) -> bool {
        self.lo <= value && value < self.hi
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.lo >= self.hi {
            return Err(SimError::InvalidRange {
                lo: self.lo as f64,
                hi: self.hi as f64,
            });
        }
        Ok(())
    }
}

// ── Weapon effectiveness table ─────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricRange {
    pub metric: String,
    pub range: Interval,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeaponCategoryConfig {
    pub category: String,
    pub metrics: Vec<MetricRange>,
}

#[derive(Debug, Clone, Deserialize)]
struct WeaponEffectivenessFile {
    categories: Vec<WeaponCategoryConfig>,
}

// ── National capability table ──────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NationConfig {
    pub nation_id: String,
    pub military_personnel: IntInterval,
    pub military_budget_billion_usd: Interval,
    pub technological_readiness: Interval,
    pub cyber_defense_capability: Interval,
    pub supply_chain_resilience: Interval,
}

#[derive(Debug, Clone, Deserialize)]
struct NationalCapabilitiesFile {
    nations: Vec<NationConfig>,
}

// ── Per-scenario field ranges ──────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioRanges {
    pub cyber_conflict_probability: Interval,
    pub conventional_war_probability: Interval,
    pub limited_engagement_probability: Interval,
    pub conflict_duration_days: Interval,
    /// Applied to both sides' military casualty columns.
    pub estimated_military_casualties: Interval,
    pub estimated_civilian_casualties: Interval,
    pub economic_damage_billion_usd: Interval,
}

impl ScenarioRanges {
    fn all(&self) -> [(&'static str, Interval); 7] {
        [
            ("cyber_conflict_probability", self.cyber_conflict_probability),
            ("conventional_war_probability", self.conventional_war_probability),
            ("limited_engagement_probability", self.limited_engagement_probability),
            ("conflict_duration_days", self.conflict_duration_days),
            ("estimated_military_casualties", self.estimated_military_casualties),
            ("estimated_civilian_casualties", self.estimated_civilian_casualties),
            ("economic_damage_billion_usd", self.economic_damage_billion_usd),
        ]
    }
}

// ── Effectiveness sampling mode ────────────────────────────────────

/// How the `_A` / `_B` effectiveness columns are filled.
///
/// `SharedSnapshot` copies the single per-run weapon snapshot into both
/// sides of every record, so the two sides never differ. That is the
/// long-standing output shape and stays the default. `IndependentPerSide`
/// redraws each side's value per record from the same metric interval.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EffectivenessMode {
    #[default]
    SharedSnapshot,
    IndependentPerSide,
}

impl FromStr for EffectivenessMode {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shared_snapshot" => Ok(Self::SharedSnapshot),
            "independent_per_side" => Ok(Self::IndependentPerSide),
            other => Err(SimError::InvalidArgument(format!(
                "unknown effectiveness mode '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub weapons: Vec<WeaponCategoryConfig>,
    pub nations: Vec<NationConfig>,
    pub scenario: ScenarioRanges,
    pub effectiveness_mode: EffectivenessMode,
}

impl GeneratorConfig {
    /// Load the three tables from `{data_dir}/wargame/`.
    /// Without a data directory, use `GeneratorConfig::default()`.
    ///
    /// An unreadable file is `SimError::Other` carrying the path; malformed
    /// JSON is `SimError::Serialization`.
    pub fn load(data_dir: &str) -> SimResult<Self> {
        let weapon_path = format!("{data_dir}/wargame/weapon_effectiveness.json");
        let weapon_content = std::fs::read_to_string(&weapon_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {weapon_path}: {e}"))?;
        let weapon_file: WeaponEffectivenessFile = serde_json::from_str(&weapon_content)?;

        let nation_path = format!("{data_dir}/wargame/national_capabilities.json");
        let nation_content = std::fs::read_to_string(&nation_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {nation_path}: {e}"))?;
        let nation_file: NationalCapabilitiesFile = serde_json::from_str(&nation_content)?;

        let scenario_path = format!("{data_dir}/wargame/scenario_ranges.json");
        let scenario_content = std::fs::read_to_string(&scenario_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {scenario_path}: {e}"))?;
        let scenario: ScenarioRanges = serde_json::from_str(&scenario_content)?;

        let config = Self {
            weapons: weapon_file.categories,
            nations: nation_file.nations,
            scenario,
            effectiveness_mode: EffectivenessMode::default(),
        };
        config.validate()?;
        log::debug!(
            "Loaded generator config from {data_dir}: {} weapon categories, {} nations",
            config.weapons.len(),
            config.nations.len()
        );
        Ok(config)
    }

    pub fn with_mode(mut self, mode: EffectivenessMode) -> Self {
        self.effectiveness_mode = mode;
        self
    }

    /// Check every bound and reject duplicate keys.
    pub fn validate(&self) -> SimResult<()> {
        let mut categories = HashSet::new();
        for weapon in &self.weapons {
            if !categories.insert(weapon.category.as_str()) {
                return Err(SimError::InvalidArgument(format!(
                    "duplicate weapon category '{}'",
                    weapon.category
                )));
            }
            let mut metrics = HashSet::new();
            for m in &weapon.metrics {
                if !metrics.insert(m.metric.as_str()) {
                    return Err(SimError::InvalidArgument(format!(
                        "duplicate metric '{}' in category '{}'",
                        m.metric, weapon.category
                    )));
                }
                m.range.validate()?;
            }
        }

        let mut nation_ids = HashSet::new();
        for nation in &self.nations {
            if !nation_ids.insert(nation.nation_id.as_str()) {
                return Err(SimError::InvalidArgument(format!(
                    "duplicate nation '{}'",
                    nation.nation_id
                )));
            }
            nation.military_personnel.validate()?;
            nation.military_budget_billion_usd.validate()?;
            nation.technological_readiness.validate()?;
            nation.cyber_defense_capability.validate()?;
            nation.supply_chain_resilience.validate()?;
        }

        for (_, interval) in self.scenario.all() {
            interval.validate()?;
        }
        Ok(())
    }

    /// Declared interval for one weapon metric.
    pub fn weapon_interval(&self, category: &str, metric: &str) -> SimResult<Interval> {
        self.weapons
            .iter()
            .find(|w| w.category == category)
            .and_then(|w| w.metrics.iter().find(|m| m.metric == metric))
            .map(|m| m.range)
            .ok_or_else(|| SimError::MissingMetric {
                category: category.into(),
                metric: metric.into(),
            })
    }
}

fn category(name: &str, metrics: &[(&str, f64, f64)]) -> WeaponCategoryConfig {
    WeaponCategoryConfig {
        category: name.into(),
        metrics: metrics
            .iter()
            .map(|(metric, lo, hi)| MetricRange {
                metric: (*metric).into(),
                range: Interval::new(*lo, *hi),
            })
            .collect(),
    }
}

impl Default for GeneratorConfig {
    /// The built-in tables. `data/wargame/*.json` mirrors these values.
    fn default() -> Self {
        let weapons = vec![
            // Conventional
            category(
                "tanks",
                &[
                    ("accuracy", 0.6, 0.85),
                    ("kill_probability", 0.4, 0.7),
                    ("operational_range_km", 30.0, 60.0),
                ],
            ),
            category(
                "artillery",
                &[
                    ("accuracy", 0.5, 0.75),
                    ("kill_probability", 0.3, 0.6),
                    ("operational_range_km", 20.0, 50.0),
                ],
            ),
            category(
                "fighter_jets",
                &[
                    ("accuracy", 0.7, 0.9),
                    ("kill_probability", 0.5, 0.8),
                    ("operational_range_km", 1500.0, 3000.0),
                ],
            ),
            // Cyber
            category(
                "cyber_attacks",
                &[
                    ("infrastructure_disruption_probability", 0.4, 0.7),
                    ("communication_system_compromise", 0.3, 0.6),
                    ("military_network_penetration", 0.2, 0.5),
                ],
            ),
            // Unconventional
            category(
                "special_forces",
                &[
                    ("mission_success_probability", 0.4, 0.7),
                    ("strategic_target_elimination", 0.3, 0.6),
                ],
            ),
        ];

        let nations = vec![
            NationConfig {
                nation_id: "Nation_A".into(),
                military_personnel: IntInterval::new(500_000, 1_200_000),
                military_budget_billion_usd: Interval::new(50.0, 250.0),
                technological_readiness: Interval::new(0.6, 0.9),
                cyber_defense_capability: Interval::new(0.4, 0.8),
                supply_chain_resilience: Interval::new(0.5, 0.9),
            },
            NationConfig {
                nation_id: "Nation_B".into(),
                military_personnel: IntInterval::new(400_000, 1_000_000),
                military_budget_billion_usd: Interval::new(40.0, 200.0),
                technological_readiness: Interval::new(0.5, 0.85),
                cyber_defense_capability: Interval::new(0.3, 0.7),
                supply_chain_resilience: Interval::new(0.4, 0.8),
            },
        ];

        let scenario = ScenarioRanges {
            cyber_conflict_probability: Interval::new(0.2, 0.5),
            conventional_war_probability: Interval::new(0.3, 0.6),
            limited_engagement_probability: Interval::new(0.1, 0.4),
            conflict_duration_days: Interval::new(30.0, 180.0),
            estimated_military_casualties: Interval::new(5_000.0, 100_000.0),
            estimated_civilian_casualties: Interval::new(10_000.0, 250_000.0),
            economic_damage_billion_usd: Interval::new(50.0, 500.0),
        };

        Self {
            weapons,
            nations,
            scenario,
            effectiveness_mode: EffectivenessMode::SharedSnapshot,
        }
    }
}
