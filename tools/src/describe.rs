//! Descriptive statistics over scenario table columns.
//!
//! Quantiles use linear interpolation between closest ranks and the
//! standard deviation is the sample (n - 1) estimate.

use wargame_core::scenario::{Column, ScenarioTable};

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name:  &'static str,
    pub count: usize,
    pub mean:  f64,
    pub std:   f64,
    pub min:   f64,
    pub p25:   f64,
    pub p50:   f64,
    pub p75:   f64,
    pub max:   f64,
}

pub fn summarize(name: &'static str, values: &[f64]) -> ColumnSummary {
    let count = values.len();
    if count == 0 {
        return ColumnSummary {
            name,
            count,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            p25: f64::NAN,
            p50: f64::NAN,
            p75: f64::NAN,
            max: f64::NAN,
        };
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mean = values.iter().sum::<f64>() / count as f64;
    let std = if count > 1 {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    } else {
        f64::NAN
    };

    ColumnSummary {
        name,
        count,
        mean,
        std,
        min: sorted[0],
        p25: quantile(&sorted, 0.25),
        p50: quantile(&sorted, 0.50),
        p75: quantile(&sorted, 0.75),
        max: sorted[count - 1],
    }
}

/// `sorted` must be non-empty and ascending.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

/// Summaries for every numeric column, in table order.
pub fn describe(table: &ScenarioTable) -> Vec<ColumnSummary> {
    table
        .columns()
        .into_iter()
        .filter_map(|(name, column)| match column {
            Column::Real(values) => Some(summarize(name, &values)),
            Column::Text(_) => None,
        })
        .collect()
}

/// Mean of each conflict-type probability, normalized to shares of 1.0.
pub fn conflict_type_shares(table: &ScenarioTable) -> Vec<(&'static str, f64)> {
    let labels = [
        ("Cyber Conflict", "cyber_conflict_probability"),
        ("Conventional War", "conventional_war_probability"),
        ("Limited Engagement", "limited_engagement_probability"),
    ];
    let means: Vec<(&'static str, f64)> = labels
        .iter()
        .map(|&(label, column)| {
            let mean = table
                .column(column)
                .and_then(|c| c.as_real().map(|v| summarize(column, v).mean))
                .unwrap_or(f64::NAN);
            (label, mean)
        })
        .collect();

    let total: f64 = means.iter().map(|(_, m)| m).sum();
    means
        .into_iter()
        .map(|(label, mean)| (label, mean / total))
        .collect()
}

/// Equal-width bins over [min, max]. The last bin is closed on the right.
pub fn histogram(values: &[f64], bins: usize) -> Vec<(f64, f64, usize)> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bins as f64;

    let mut counts = vec![0usize; bins];
    for v in values {
        let idx = if width > 0.0 {
            (((v - min) / width) as usize).min(bins - 1)
        } else {
            0
        };
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, n)| (min + width * i as f64, min + width * (i + 1) as f64, n))
        .collect()
}

/// Pearson correlation; NaN when either side has no variance.
pub fn correlation(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return f64::NAN;
    }
    let mean_x = xs[..n].iter().sum::<f64>() / n as f64;
    let mean_y = ys[..n].iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs[..n].iter().zip(&ys[..n]) {
        cov += (x - mean_x) * (y - mean_y);
        var_x += (x - mean_x).powi(2);
        var_y += (y - mean_y).powi(2);
    }
    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wargame_core::synthesizer::ScenarioSynthesizer;

    #[test]
    fn summary_matches_hand_computed_values() {
        let s = summarize("x", &[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(s.count, 4);
        assert_eq!(s.mean, 2.5);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 4.0);
        assert_eq!(s.p25, 1.75);
        assert_eq!(s.p50, 2.5);
        assert_eq!(s.p75, 3.25);
        assert!((s.std - 1.290_994_448_7).abs() < 1e-9, "std={}", s.std);
    }

    #[test]
    fn single_value_has_undefined_std() {
        let s = summarize("x", &[7.0]);
        assert_eq!(s.p50, 7.0);
        assert!(s.std.is_nan());
    }

    #[test]
    fn describe_skips_the_text_column() {
        let table = ScenarioSynthesizer::build(42).generate_conflict_scenarios(50).unwrap();
        let summaries = describe(&table);
        assert_eq!(summaries.len(), 16);
        assert!(summaries.iter().all(|s| s.name != "initial_aggressor"));
        assert!(summaries.iter().all(|s| s.count == 50));
    }

    #[test]
    fn shared_snapshot_columns_have_zero_spread() {
        let table = ScenarioSynthesizer::build(42).generate_conflict_scenarios(50).unwrap();
        let tank = describe(&table)
            .into_iter()
            .find(|s| s.name == "tank_effectiveness_A")
            .unwrap();
        assert_eq!(tank.min, tank.max);
        assert!(tank.std < 1e-12, "std={}", tank.std);
    }

    #[test]
    fn conflict_shares_sum_to_one() {
        let table = ScenarioSynthesizer::build(9).generate_conflict_scenarios(100).unwrap();
        let shares = conflict_type_shares(&table);
        let total: f64 = shares.iter().map(|(_, s)| s).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert_eq!(shares[1].0, "Conventional War");
    }

    #[test]
    fn histogram_counts_every_value() {
        let bins = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0, 10.0], 5);
        assert_eq!(bins.len(), 5);
        assert_eq!(bins.iter().map(|b| b.2).sum::<usize>(), 6);
        assert_eq!(bins[0].2, 2);
        assert_eq!(bins[4].2, 1, "max lands in the last bin");
        assert!(histogram(&[], 5).is_empty());
    }

    #[test]
    fn correlation_of_a_line_is_one() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [2.0, 4.0, 6.0, 8.0];
        assert!((correlation(&xs, &ys) - 1.0).abs() < 1e-12);
        assert!(correlation(&xs, &[5.0; 4]).is_nan());
    }
}
