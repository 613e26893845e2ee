//! National capability snapshot generation.
//!
//! Drawn once per run alongside the weapon snapshot. Records do not read
//! it; it is carried on the batch for downstream consumers.

use crate::{config::NationConfig, error::SimResult, rng::SimRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NationalCapabilities {
    pub military_personnel: i64,
    pub military_budget_billion_usd: f64,
    pub technological_readiness: f64,
    pub cyber_defense_capability: f64,
    pub supply_chain_resilience: f64,
}

/// nation id → capabilities.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct NationalCapabilityProfile {
    nations: BTreeMap<String, NationalCapabilities>,
}

impl NationalCapabilityProfile {
    pub fn nation(&self, nation_id: &str) -> Option<&NationalCapabilities> {
        self.nations.get(nation_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NationalCapabilities)> {
        self.nations.iter().map(|(id, caps)| (id.as_str(), caps))
    }

    pub fn len(&self) -> usize {
        self.nations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nations.is_empty()
    }
}

pub fn generate_national_capabilities(
    rng: &mut SimRng,
    table: &[NationConfig],
) -> SimResult<NationalCapabilityProfile> {
    let mut nations = BTreeMap::new();
    for nation in table {
        // Draw order: personnel, budget, readiness, cyber defense, supply chain.
        let caps = NationalCapabilities {
            military_personnel:          nation.military_personnel.sample(rng)?,
            military_budget_billion_usd: nation.military_budget_billion_usd.sample(rng)?,
            technological_readiness:     nation.technological_readiness.sample(rng)?,
            cyber_defense_capability:    nation.cyber_defense_capability.sample(rng)?,
            supply_chain_resilience:     nation.supply_chain_resilience.sample(rng)?,
        };
        log::debug!(
            "capabilities {}: personnel={} budget={:.1}bn",
            nation.nation_id,
            caps.military_personnel,
            caps.military_budget_billion_usd
        );
        nations.insert(nation.nation_id.clone(), caps);
    }
    Ok(NationalCapabilityProfile { nations })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;

    #[test]
    fn both_nations_are_generated() {
        let config = GeneratorConfig::default();
        let mut rng = SimRng::new(42);
        let profile = generate_national_capabilities(&mut rng, &config.nations).unwrap();

        assert_eq!(profile.len(), 2);
        assert!(profile.nation("Nation_A").is_some());
        assert!(profile.nation("Nation_B").is_some());
        assert!(profile.nation("Nation_C").is_none());
    }

    #[test]
    fn profile_serializes_as_nested_mapping() {
        let config = GeneratorConfig::default();
        let mut rng = SimRng::new(5);
        let profile = generate_national_capabilities(&mut rng, &config.nations).unwrap();

        let json = serde_json::to_value(&profile).unwrap();
        assert!(json["Nation_A"]["military_personnel"].is_i64());
        assert!(json["Nation_B"]["supply_chain_resilience"].is_f64());
    }
}
