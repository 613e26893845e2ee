//! Scenario records and the table that holds them.
//!
//! A record is a flat set of named scalar columns. The table keeps records
//! in generation order and offers a column-oriented view for consumers
//! that chart or summarize one column at a time.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two belligerents. Serialized as `Nation_A` / `Nation_B`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Nation {
    #[serde(rename = "Nation_A")]
    A,
    #[serde(rename = "Nation_B")]
    B,
}

impl Nation {
    pub const ALL: [Nation; 2] = [Nation::A, Nation::B];

    pub fn id(&self) -> &'static str {
        match self {
            Self::A => "Nation_A",
            Self::B => "Nation_B",
        }
    }
}

impl fmt::Display for Nation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioRecord {
    // Conflict initiation
    pub cyber_conflict_probability: f64,
    pub conventional_war_probability: f64,
    pub limited_engagement_probability: f64,

    // Outcome
    pub initial_aggressor: Nation,
    pub conflict_duration_days: f64,

    // Weapon system performance
    #[serde(rename = "tank_effectiveness_A")]
    pub tank_effectiveness_a: f64,
    #[serde(rename = "artillery_effectiveness_A")]
    pub artillery_effectiveness_a: f64,
    #[serde(rename = "jet_effectiveness_A")]
    pub jet_effectiveness_a: f64,
    #[serde(rename = "tank_effectiveness_B")]
    pub tank_effectiveness_b: f64,
    #[serde(rename = "artillery_effectiveness_B")]
    pub artillery_effectiveness_b: f64,
    #[serde(rename = "jet_effectiveness_B")]
    pub jet_effectiveness_b: f64,

    // Cyber
    #[serde(rename = "cyber_disruption_potential_A")]
    pub cyber_disruption_potential_a: f64,
    #[serde(rename = "cyber_disruption_potential_B")]
    pub cyber_disruption_potential_b: f64,

    // Losses
    #[serde(rename = "estimated_military_casualties_A")]
    pub estimated_military_casualties_a: f64,
    #[serde(rename = "estimated_military_casualties_B")]
    pub estimated_military_casualties_b: f64,
    pub estimated_civilian_casualties: f64,

    // Economic impact
    pub economic_damage_billion_usd: f64,
}

/// Column names in record order. Matches the serialized field names.
pub const COLUMNS: [&str; 17] = [
    "cyber_conflict_probability",
    "conventional_war_probability",
    "limited_engagement_probability",
    "initial_aggressor",
    "conflict_duration_days",
    "tank_effectiveness_A",
    "artillery_effectiveness_A",
    "jet_effectiveness_A",
    "tank_effectiveness_B",
    "artillery_effectiveness_B",
    "jet_effectiveness_B",
    "cyber_disruption_potential_A",
    "cyber_disruption_potential_B",
    "estimated_military_casualties_A",
    "estimated_military_casualties_B",
    "estimated_civilian_casualties",
    "economic_damage_billion_usd",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Real(f64),
    Text(&'static str),
}

impl ScenarioRecord {
    pub fn field(&self, column: &str) -> Option<FieldValue> {
        use FieldValue::Real;
        let value = match column {
            "cyber_conflict_probability" => Real(self.cyber_conflict_probability),
            "conventional_war_probability" => Real(self.conventional_war_probability),
            "limited_engagement_probability" => Real(self.limited_engagement_probability),
            "initial_aggressor" => FieldValue::Text(self.initial_aggressor.id()),
            "conflict_duration_days" => Real(self.conflict_duration_days),
            "tank_effectiveness_A" => Real(self.tank_effectiveness_a),
            "artillery_effectiveness_A" => Real(self.artillery_effectiveness_a),
            "jet_effectiveness_A" => Real(self.jet_effectiveness_a),
            "tank_effectiveness_B" => Real(self.tank_effectiveness_b),
            "artillery_effectiveness_B" => Real(self.artillery_effectiveness_b),
            "jet_effectiveness_B" => Real(self.jet_effectiveness_b),
            "cyber_disruption_potential_A" => Real(self.cyber_disruption_potential_a),
            "cyber_disruption_potential_B" => Real(self.cyber_disruption_potential_b),
            "estimated_military_casualties_A" => Real(self.estimated_military_casualties_a),
            "estimated_military_casualties_B" => Real(self.estimated_military_casualties_b),
            "estimated_civilian_casualties" => Real(self.estimated_civilian_casualties),
            "economic_damage_billion_usd" => Real(self.economic_damage_billion_usd),
            _ => return None,
        };
        Some(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Real(Vec<f64>),
    Text(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Self::Real(v) => v.len(),
            Self::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_real(&self) -> Option<&[f64]> {
        match self {
            Self::Real(v) => Some(v),
            Self::Text(_) => None,
        }
    }
}

/// Records in generation order. Append-only while the synthesizer owns it;
/// consumers only get shared access.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ScenarioTable {
    records: Vec<ScenarioRecord>,
}

impl ScenarioTable {
    /// Reserve room for `capacity` records, or fail without allocating.
    pub(crate) fn try_with_capacity(capacity: usize) -> SimResult<Self> {
        let mut records = Vec::new();
        records.try_reserve_exact(capacity).map_err(|e| {
            SimError::InvalidArgument(format!("cannot hold {capacity} scenarios: {e}"))
        })?;
        Ok(Self { records })
    }

    pub(crate) fn push(&mut self, record: ScenarioRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ScenarioRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScenarioRecord> {
        self.records.iter()
    }

    pub fn column_names(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    /// One column across all records, or `None` for an unknown name.
    pub fn column(&self, name: &str) -> Option<Column> {
        if name == "initial_aggressor" {
            return Some(Column::Text(
                self.records
                    .iter()
                    .map(|r| r.initial_aggressor.id().to_string())
                    .collect(),
            ));
        }
        if !COLUMNS.contains(&name) {
            return None;
        }
        Some(Column::Real(
            self.records
                .iter()
                .filter_map(|r| match r.field(name) {
                    Some(FieldValue::Real(v)) => Some(v),
                    _ => None,
                })
                .collect(),
        ))
    }

    /// Every column in record order.
    pub fn columns(&self) -> Vec<(&'static str, Column)> {
        COLUMNS
            .iter()
            .filter_map(|name| self.column(name).map(|c| (*name, c)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a ScenarioTable {
    type Item = &'a ScenarioRecord;
    type IntoIter = std::slice::Iter<'a, ScenarioRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(aggressor: Nation, duration: f64) -> ScenarioRecord {
        ScenarioRecord {
            cyber_conflict_probability: 0.3,
            conventional_war_probability: 0.4,
            limited_engagement_probability: 0.2,
            initial_aggressor: aggressor,
            conflict_duration_days: duration,
            tank_effectiveness_a: 0.5,
            artillery_effectiveness_a: 0.4,
            jet_effectiveness_a: 0.6,
            tank_effectiveness_b: 0.5,
            artillery_effectiveness_b: 0.4,
            jet_effectiveness_b: 0.6,
            cyber_disruption_potential_a: 0.55,
            cyber_disruption_potential_b: 0.55,
            estimated_military_casualties_a: 20_000.0,
            estimated_military_casualties_b: 30_000.0,
            estimated_civilian_casualties: 80_000.0,
            economic_damage_billion_usd: 120.0,
        }
    }

    #[test]
    fn serialized_keys_match_column_names() {
        let json = serde_json::to_value(record(Nation::A, 45.0)).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), COLUMNS.len());
        for name in COLUMNS {
            assert!(object.contains_key(name), "missing serialized key {name}");
        }
        assert_eq!(json["initial_aggressor"], "Nation_A");
    }

    #[test]
    fn every_column_name_resolves_to_a_field() {
        let r = record(Nation::B, 90.0);
        for name in COLUMNS {
            assert!(r.field(name).is_some(), "{name} has no field");
        }
        assert_eq!(r.field("initial_aggressor"), Some(FieldValue::Text("Nation_B")));
        assert!(r.field("morale").is_none());
    }

    #[test]
    fn column_view_follows_insertion_order() {
        let mut table = ScenarioTable::default();
        table.push(record(Nation::A, 31.0));
        table.push(record(Nation::B, 150.0));

        assert_eq!(
            table.column("conflict_duration_days"),
            Some(Column::Real(vec![31.0, 150.0]))
        );
        assert_eq!(
            table.column("initial_aggressor"),
            Some(Column::Text(vec!["Nation_A".into(), "Nation_B".into()]))
        );
        assert!(table.column("morale").is_none());
    }

    #[test]
    fn oversized_reservation_is_an_error() {
        let err = ScenarioTable::try_with_capacity(usize::MAX).unwrap_err();
        assert!(matches!(err, SimError::InvalidArgument(_)), "got {err:?}");
        assert!(ScenarioTable::try_with_capacity(8).unwrap().is_empty());
    }

    #[test]
    fn empty_table_still_exposes_columns() {
        let table = ScenarioTable::default();
        let columns = table.columns();
        assert_eq!(columns.len(), COLUMNS.len());
        assert!(columns.iter().all(|(_, c)| c.is_empty()));
    }
}
