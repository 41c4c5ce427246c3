use crate::aggregate::{destinations, AggregateViews};
use crate::types::{
    DestinationAggregate, DestinationRow, FactRecord, GrowthRow, SummaryStats, YearAggregate,
    YearRow,
};
use crate::util::{format_count, format_currency, format_integer, format_millions, format_number};
use chrono::Utc;

/// Formatted-string copy of the destination totals, ranked.
pub fn destination_rows(totals: &[DestinationAggregate]) -> Vec<DestinationRow> {
    totals
        .iter()
        .enumerate()
        .map(|(idx, t)| DestinationRow {
            rank: idx + 1,
            origin: t.origin.clone(),
            destination: t.destination.clone(),
            quantity: format_integer(t.quantity),
            value: format_currency(t.value),
        })
        .collect()
}

pub fn year_rows(years: &[YearAggregate]) -> Vec<YearRow> {
    years
        .iter()
        .map(|y| YearRow {
            year: y.year,
            quantity: format_integer(y.quantity),
            value: format_currency(y.value),
        })
        .collect()
}

pub fn growth_rows(growth: &[FactRecord]) -> Vec<GrowthRow> {
    growth
        .iter()
        .map(|f| GrowthRow {
            destination: f.destination.clone(),
            year: f.year,
            quantity: format_integer(f.quantity),
            value: format_currency(f.value),
        })
        .collect()
}

fn peak_year(years: &[YearAggregate], measure: impl Fn(&YearAggregate) -> f64) -> Option<&YearAggregate> {
    // First year wins on ties.
    years.iter().fold(None, |best: Option<&YearAggregate>, y| match best {
        Some(b) if measure(b) >= measure(y) => Some(b),
        _ => Some(y),
    })
}

fn is_active(t: &DestinationAggregate) -> bool {
    t.quantity > 0.0 || t.value > 0.0
}

pub fn generate_summary(origin: &str, views: &AggregateViews) -> SummaryStats {
    let first_year = views.by_year.first().map(|y| y.year).unwrap_or_default();
    let last_year = views.by_year.last().map(|y| y.year).unwrap_or_default();
    SummaryStats {
        generated_at: Utc::now().to_rfc3339(),
        origin: origin.to_string(),
        first_year,
        last_year,
        destinations: views.by_destination.iter().filter(|t| is_active(t)).count(),
        total_quantity: views.by_year.iter().map(|y| y.quantity).sum(),
        total_value: views.by_year.iter().map(|y| y.value).sum(),
        peak_quantity_year: peak_year(&views.by_year, |y| y.quantity).map(|y| y.year),
        peak_value_year: peak_year(&views.by_year, |y| y.value).map(|y| y.year),
        growth_destinations: destinations(&views.growth),
    }
}

/// Short data-driven commentary shown above the tables.
pub fn narrative(views: &AggregateViews, summary: &SummaryStats, min_growth_quantity: f64) -> Vec<String> {
    let mut lines = Vec::new();
    if views.by_year.is_empty() {
        lines.push("No export records in the analysed period.".to_string());
        return lines;
    }

    lines.push(format!(
        "Between {} and {}, {} exported {} litres of wine worth {} to {} destinations.",
        summary.first_year,
        summary.last_year,
        summary.origin,
        format_integer(summary.total_quantity),
        format_currency(summary.total_value),
        format_count(summary.destinations)
    ));

    if let Some(peak) = peak_year(&views.by_year, |y| y.quantity) {
        lines.push(format!(
            "Volume peaked in {} at {} million litres.",
            peak.year,
            format_millions(peak.quantity)
        ));
    }
    if let Some(peak) = peak_year(&views.by_year, |y| y.value) {
        lines.push(format!(
            "Value peaked in {} at US$ {} million.",
            peak.year,
            format_millions(peak.value)
        ));
    }

    if let Some(leader) = views.by_destination.first().filter(|t| is_active(t)) {
        let share = if summary.total_value > 0.0 {
            leader.value / summary.total_value * 100.0
        } else {
            0.0
        };
        lines.push(format!(
            "{} is the largest importer with {} ({}% of total value).",
            leader.destination,
            format_currency(leader.value),
            format_number(share, 2)
        ));
    }

    if summary.growth_destinations.is_empty() {
        lines.push(format!(
            "No destination grew in every year while reaching {} litres in total.",
            format_integer(min_growth_quantity)
        ));
    } else {
        lines.push(format!(
            "Destinations with imports that never fell and reached at least {} litres: {}.",
            format_integer(min_growth_quantity),
            summary.growth_destinations.join(", ")
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate_all, GrowthFilter};

    fn fact(destination: &str, year: i32, quantity: f64, value: f64) -> FactRecord {
        FactRecord {
            id: "1".to_string(),
            origin: "Brasil".to_string(),
            destination: destination.to_string(),
            year,
            quantity,
            value,
        }
    }

    fn views() -> AggregateViews {
        let facts = vec![
            fact("Paraguai", 2018, 1_000.0, 3_000.5),
            fact("Paraguai", 2019, 2_000.0, 1_000.0),
            fact("Libéria", 2018, 60.0, 100.0),
            fact("Libéria", 2019, 60.0, 120.0),
            fact("Tonga", 2018, 0.0, 0.0),
            fact("Tonga", 2019, 0.0, 0.0),
        ];
        aggregate_all(
            &facts,
            &GrowthFilter {
                origin: "Brasil".to_string(),
                min_total_quantity: 100.0,
                from_year: 2019,
            },
        )
    }

    #[test]
    fn destination_rows_are_ranked_and_formatted() {
        let rows = destination_rows(&views().by_destination);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].destination, "Paraguai");
        assert_eq!(rows[0].quantity, "3.000");
        assert_eq!(rows[0].value, "US$ 4.000,50");
        assert_eq!(rows[2].destination, "Tonga");
    }

    #[test]
    fn year_and_growth_rows() {
        let v = views();
        let years = year_rows(&v.by_year);
        assert_eq!(years.len(), 2);
        assert_eq!(years[1].value, "US$ 1.120,00");

        let growth = growth_rows(&v.growth);
        let names: Vec<&str> = growth.iter().map(|g| g.destination.as_str()).collect();
        assert_eq!(names, vec!["Paraguai", "Libéria"]);
        assert!(growth.iter().all(|g| g.year == 2019));
    }

    #[test]
    fn summary_counts_active_destinations_and_peaks() {
        let s = generate_summary("Brasil", &views());
        assert_eq!(s.destinations, 2);
        assert_eq!((s.first_year, s.last_year), (2018, 2019));
        assert_eq!(s.peak_quantity_year, Some(2019));
        assert_eq!(s.peak_value_year, Some(2018));
        assert_eq!(s.total_quantity, 3_120.0);
        assert_eq!(s.growth_destinations, vec!["Paraguai".to_string(), "Libéria".to_string()]);
    }

    #[test]
    fn narrative_names_the_leader() {
        let v = views();
        let s = generate_summary("Brasil", &v);
        let lines = narrative(&v, &s, 100.0);
        assert!(lines[0].starts_with("Between 2018 and 2019, Brasil exported 3.120 litres"));
        assert!(lines.iter().any(|l| l.starts_with("Paraguai is the largest importer")));
    }

    #[test]
    fn narrative_for_empty_views() {
        let v = aggregate_all(
            &[],
            &GrowthFilter {
                origin: "Brasil".to_string(),
                min_total_quantity: 100.0,
                from_year: 2018,
            },
        );
        let s = generate_summary("Brasil", &v);
        assert_eq!(narrative(&v, &s, 100.0).len(), 1);
    }
}
