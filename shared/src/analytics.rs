//! Derived statistics over the classification history.
//!
//! Everything here is a pure function of the record set handed in. The
//! client always re-fetches the full history, so the aggregates are
//! recomputed from scratch on every refresh rather than maintained
//! incrementally.

use std::collections::HashMap;

use crate::{CarbonImpact, ClassificationRecord};

/// Sentinel category shown while the history is empty.
pub const NO_RECORDS_LABEL: &str = "-";

/// Dashboard aggregates for one snapshot of the record history.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedMetrics {
    pub total_scans: usize,
    /// Share of records whose route mentions recycling, rounded to whole %.
    pub recyclable_percent: u32,
    /// Mean ordinal carbon weight (Low 1, Medium 2, High 3), rounded.
    pub average_carbon_score: u32,
    pub most_common_waste_type: String,
    /// Occurrence count per waste type, in first-encountered order.
    pub waste_type_distribution: Vec<(String, usize)>,
}

/// Recompute all aggregates from the given record snapshot.
pub fn derive_metrics(records: &[ClassificationRecord]) -> DerivedMetrics {
    let total_scans = records.len();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut seen_order: Vec<&str> = Vec::new();
    for record in records {
        let count = counts.entry(record.waste_type.as_str()).or_insert(0);
        if *count == 0 {
            seen_order.push(record.waste_type.as_str());
        }
        *count += 1;
    }

    let waste_type_distribution: Vec<(String, usize)> = seen_order
        .iter()
        .map(|waste_type| (waste_type.to_string(), counts[waste_type]))
        .collect();

    // Ties resolve to the earliest-seen label, so only a strictly greater
    // count may displace the current winner.
    let most_common_waste_type = waste_type_distribution
        .iter()
        .fold((NO_RECORDS_LABEL, 0), |best, (waste_type, count)| {
            if *count > best.1 {
                (waste_type.as_str(), *count)
            } else {
                best
            }
        })
        .0
        .to_string();

    let recyclable = records
        .iter()
        .filter(|record| record.route.to_lowercase().contains("recycling"))
        .count();

    let carbon_total: u32 = records
        .iter()
        .map(|record| carbon_weight(&record.carbon_impact))
        .sum();

    DerivedMetrics {
        total_scans,
        recyclable_percent: rounded_percent(recyclable, total_scans),
        average_carbon_score: rounded_mean(carbon_total, total_scans),
        most_common_waste_type,
        waste_type_distribution,
    }
}

fn carbon_weight(label: &str) -> u32 {
    label
        .parse::<CarbonImpact>()
        .map(CarbonImpact::score)
        .unwrap_or(1)
}

fn rounded_percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64) * 100.0 / (whole as f64)).round() as u32
}

fn rounded_mean(total: u32, count: usize) -> u32 {
    if count == 0 {
        return 0;
    }
    ((total as f64) / (count as f64)).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(waste_type: &str, carbon_impact: &str, route: &str) -> ClassificationRecord {
        ClassificationRecord {
            id: String::new(),
            waste_type: waste_type.to_string(),
            calorific_value: 0.0,
            carbon_impact: carbon_impact.to_string(),
            route: route.to_string(),
            timestamp: String::new(),
            image_name: None,
        }
    }

    #[test]
    fn empty_history_yields_zeroes() {
        let metrics = derive_metrics(&[]);
        assert_eq!(metrics.total_scans, 0);
        assert_eq!(metrics.recyclable_percent, 0);
        assert_eq!(metrics.average_carbon_score, 0);
        assert_eq!(metrics.most_common_waste_type, NO_RECORDS_LABEL);
        assert!(metrics.waste_type_distribution.is_empty());
    }

    #[test]
    fn distribution_counts_sum_to_total() {
        let records = vec![
            record("plastic", "High", "Recycling"),
            record("glass", "Low", "Recycling"),
            record("plastic", "High", "Recycling"),
            record("trash", "High", "Landfill"),
        ];
        let metrics = derive_metrics(&records);
        let summed: usize = metrics
            .waste_type_distribution
            .iter()
            .map(|(_, count)| count)
            .sum();
        assert_eq!(summed, metrics.total_scans);
        assert_eq!(
            metrics.waste_type_distribution,
            vec![
                ("plastic".to_string(), 2),
                ("glass".to_string(), 1),
                ("trash".to_string(), 1),
            ]
        );
    }

    #[test]
    fn most_common_tie_breaks_to_first_seen() {
        let records = vec![
            record("paper", "Medium", ""),
            record("metal", "Medium", ""),
            record("paper", "Medium", ""),
            record("metal", "Medium", ""),
        ];
        assert_eq!(derive_metrics(&records).most_common_waste_type, "paper");
    }

    #[test]
    fn recyclable_match_is_case_insensitive_substring() {
        let records = vec![
            record("cardboard", "Medium", "Recycling Center"),
            record("trash", "High", "Landfill"),
            record("metal", "Medium", "RECYCLING - east"),
        ];
        assert_eq!(derive_metrics(&records).recyclable_percent, 67);
    }

    #[test]
    fn carbon_average_rounds_to_nearest() {
        let records = vec![
            record("plastic", "High", ""),
            record("paper", "Medium", ""),
            record("glass", "Low", ""),
        ];
        assert_eq!(derive_metrics(&records).average_carbon_score, 2);
    }

    #[test]
    fn unrecognized_carbon_label_weighs_one() {
        let records = vec![
            record("plastic", "High", ""),
            record("mystery", "Unranked", ""),
        ];
        // (3 + 1) / 2
        assert_eq!(derive_metrics(&records).average_carbon_score, 2);
    }
}
