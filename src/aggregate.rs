// Derived views over the long fact table.
//
// Every function takes the facts by shared reference and returns freshly owned
// rows; no view aliases another or the input.
use crate::types::{DestinationAggregate, FactRecord, YearAggregate};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Parameters of the steady-growth screen.
#[derive(Debug, Clone)]
pub struct GrowthFilter {
    /// Destination excluded from the screen (the exporting country itself).
    pub origin: String,
    /// Minimum quantity summed over every retained year, inclusive.
    pub min_total_quantity: f64,
    /// First year of the presented slice.
    pub from_year: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateViews {
    pub by_destination: Vec<DestinationAggregate>,
    pub by_year: Vec<YearAggregate>,
    pub growth: Vec<FactRecord>,
}

pub fn aggregate_all(facts: &[FactRecord], growth: &GrowthFilter) -> AggregateViews {
    let views = AggregateViews {
        by_destination: by_destination(facts),
        by_year: by_year(facts),
        growth: growth_candidates(facts, growth),
    };
    log::info!(
        "Aggregated {} facts: {} destinations, {} years, {} growth rows",
        facts.len(),
        views.by_destination.len(),
        views.by_year.len(),
        views.growth.len()
    );
    views
}

/// Totals per (origin, destination), largest value first, then largest quantity.
///
/// Groups are formed in key order and the sort is stable, so exact ties keep
/// that order.
pub fn by_destination(facts: &[FactRecord]) -> Vec<DestinationAggregate> {
    let mut map: BTreeMap<(&str, &str), (f64, f64)> = BTreeMap::new();
    for f in facts {
        let e = map
            .entry((f.origin.as_str(), f.destination.as_str()))
            .or_insert((0.0, 0.0));
        e.0 += f.quantity;
        e.1 += f.value;
    }
    let mut rows: Vec<DestinationAggregate> = map
        .into_iter()
        .map(|((origin, destination), (quantity, value))| DestinationAggregate {
            origin: origin.to_string(),
            destination: destination.to_string(),
            quantity,
            value,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| b.quantity.total_cmp(&a.quantity))
    });
    rows
}

/// Totals per year across all destinations, ascending by year.
pub fn by_year(facts: &[FactRecord]) -> Vec<YearAggregate> {
    let mut map: BTreeMap<i32, (f64, f64)> = BTreeMap::new();
    for f in facts {
        let e = map.entry(f.year).or_insert((0.0, 0.0));
        e.0 += f.quantity;
        e.1 += f.value;
    }
    map.into_iter()
        .map(|(year, (quantity, value))| YearAggregate {
            year,
            quantity,
            value,
        })
        .collect()
}

/// `true` when every element is `>=` its predecessor. Ties are allowed;
/// empty and single-element sequences qualify trivially.
pub fn is_non_decreasing(quantities: &[f64]) -> bool {
    quantities.windows(2).all(|w| w[0] <= w[1])
}

/// Destinations whose quantity never dropped over the whole retained history,
/// excluding the origin and those below `min_total_quantity` in total, sliced
/// to `year >= from_year`.
///
/// Monotonicity and the total are judged on the full history before the slice.
/// Kept records come out in input order.
pub fn growth_candidates(facts: &[FactRecord], filter: &GrowthFilter) -> Vec<FactRecord> {
    let mut groups: HashMap<&str, Vec<&FactRecord>> = HashMap::new();
    for f in facts {
        groups.entry(f.destination.as_str()).or_default().push(f);
    }

    let mut kept: HashSet<&str> = HashSet::new();
    for (destination, mut records) in groups {
        records.sort_by_key(|r| r.year);
        let quantities: Vec<f64> = records.iter().map(|r| r.quantity).collect();
        if !is_non_decreasing(&quantities) || destination == filter.origin {
            continue;
        }
        let total: f64 = quantities.iter().sum();
        if total < filter.min_total_quantity {
            log::debug!("{} grows steadily but totals only {}", destination, total);
            continue;
        }
        kept.insert(destination);
    }

    facts
        .iter()
        .filter(|f| f.year >= filter.from_year && kept.contains(f.destination.as_str()))
        .cloned()
        .collect()
}

/// Distinct destinations of a record set, in first-seen order.
pub fn destinations(facts: &[FactRecord]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for f in facts {
        if !seen.iter().any(|d| *d == f.destination) {
            seen.push(f.destination.clone());
        }
    }
    seen
}

/// Yearly records of one destination, ascending by year.
pub fn destination_series(facts: &[FactRecord], destination: &str) -> Vec<FactRecord> {
    let mut series: Vec<FactRecord> = facts
        .iter()
        .filter(|f| f.destination == destination)
        .cloned()
        .collect();
    series.sort_by_key(|f| f.year);
    series
}
