//! Weapon effectiveness snapshot generation.
//!
//! The generator is a plain interpreter over the configured table:
//! one uniform draw per (category, metric), in configuration order.
//! Adding a category or metric is a data change, not a code change.

use crate::{
    config::WeaponCategoryConfig,
    error::{SimError, SimResult},
    rng::SimRng,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// category → metric → drawn value. Drawn once per run, never mutated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct WeaponEffectivenessProfile {
    categories: BTreeMap<String, BTreeMap<String, f64>>,
}

impl WeaponEffectivenessProfile {
    pub fn metric(&self, category: &str, metric: &str) -> Option<f64> {
        self.categories.get(category)?.get(metric).copied()
    }

    /// Like `metric`, but a missing entry is an error.
    pub fn require(&self, category: &str, metric: &str) -> SimResult<f64> {
        self.metric(category, metric)
            .ok_or_else(|| SimError::MissingMetric {
                category: category.into(),
                metric: metric.into(),
            })
    }

    pub fn category(&self, category: &str) -> Option<&BTreeMap<String, f64>> {
        self.categories.get(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

pub fn generate_weapon_effectiveness(
    rng: &mut SimRng,
    table: &[WeaponCategoryConfig],
) -> SimResult<WeaponEffectivenessProfile> {
    let mut categories = BTreeMap::new();
    for weapon in table {
        let mut metrics = BTreeMap::new();
        for m in &weapon.metrics {
            metrics.insert(m.metric.clone(), m.range.sample(rng)?);
        }
        categories.insert(weapon.category.clone(), metrics);
    }

    log::debug!(
        "weapon snapshot: {} categories, tanks.kill_probability={:?}",
        categories.len(),
        categories.get("tanks").and_then(|t| t.get("kill_probability"))
    );

    Ok(WeaponEffectivenessProfile { categories })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeneratorConfig, Interval, MetricRange};

    #[test]
    fn every_configured_metric_is_drawn() {
        let config = GeneratorConfig::default();
        let mut rng = SimRng::new(42);
        let profile = generate_weapon_effectiveness(&mut rng, &config.weapons).unwrap();

        for weapon in &config.weapons {
            let drawn = profile.category(&weapon.category).expect("category present");
            assert_eq!(drawn.len(), weapon.metrics.len(), "{}", weapon.category);
        }
        assert_eq!(profile.categories().count(), 5);
    }

    #[test]
    fn custom_category_is_interpreted_from_data() {
        let table = vec![WeaponCategoryConfig {
            category: "drones".into(),
            metrics: vec![MetricRange {
                metric: "loiter_hours".into(),
                range: Interval::new(2.0, 2.0),
            }],
        }];
        let mut rng = SimRng::new(1);
        let profile = generate_weapon_effectiveness(&mut rng, &table).unwrap();
        assert_eq!(profile.metric("drones", "loiter_hours"), Some(2.0));
        assert!(profile.metric("tanks", "accuracy").is_none());
    }

    #[test]
    fn bad_interval_surfaces_invalid_range() {
        let table = vec![WeaponCategoryConfig {
            category: "tanks".into(),
            metrics: vec![MetricRange {
                metric: "accuracy".into(),
                range: Interval::new(0.9, 0.1),
            }],
        }];
        let mut rng = SimRng::new(1);
        let err = generate_weapon_effectiveness(&mut rng, &table).unwrap_err();
        assert!(matches!(err, SimError::InvalidRange { .. }), "got {err:?}");
    }

    #[test]
    fn require_reports_missing_metric() {
        let profile = WeaponEffectivenessProfile::default();
        assert!(profile.is_empty());
        assert!(matches!(
            profile.require("tanks", "kill_probability"),
            Err(SimError::MissingMetric { .. })
        ));
    }
}
