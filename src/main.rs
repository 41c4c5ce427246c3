// Entry point and high-level report flow.
//
// One pass, top to bottom:
// - load the wide export table and reshape it into one record per
//   destination and year,
// - keep the analysed period and derive the destination, yearly and
//   steady-growth views,
// - print tables, charts and commentary, then export the views.
// Any failure aborts before anything is printed.
mod aggregate;
mod config;
mod error;
mod loader;
mod output;
mod reports;
mod reshape;
mod schema;
mod types;
mod util;

use aggregate::AggregateViews;
use clap::Parser;
use config::Config;
use error::Result;
use schema::EXPORT_SCHEMA;
use types::{FactRecord, SummaryStats};

struct Report {
    facts: Vec<FactRecord>,
    views: AggregateViews,
    summary: SummaryStats,
}

fn build_report(config: &Config) -> Result<Report> {
    let (rows, _) = loader::load_rows(&config.input, &EXPORT_SCHEMA)?;
    let all_facts = reshape::reshape(&rows, &EXPORT_SCHEMA, &config.origin)?;
    let facts = reshape::retain_from_year(&all_facts, config.from_year);
    log::info!(
        "Processing dataset... ({} records, {} from {} on)",
        util::format_count(all_facts.len()),
        util::format_count(facts.len()),
        config.from_year
    );
    let views = aggregate::aggregate_all(&facts, &config.growth_filter());
    let summary = reports::generate_summary(&config.origin, &views);
    Ok(Report {
        facts,
        views,
        summary,
    })
}

fn series_points(facts: &[FactRecord]) -> Vec<(i32, f64)> {
    facts.iter().map(|f| (f.year, f.value)).collect()
}

fn print_report(config: &Config, report: &Report) {
    let views = &report.views;
    let summary = &report.summary;

    println!("Wine Export Analysis: {} ({}–{})\n", summary.origin, summary.first_year, summary.last_year);
    for line in reports::narrative(views, summary, config.min_growth_quantity) {
        println!("{}", line);
    }
    println!();

    println!("Exports by destination (sorted by value)\n");
    output::preview_table_rows(&reports::destination_rows(&views.by_destination), config.preview_rows);

    println!("Exports by year\n");
    output::preview_table_rows(&reports::year_rows(&views.by_year), views.by_year.len());
    let quantity: Vec<(i32, f64)> = views.by_year.iter().map(|y| (y.year, y.quantity)).collect();
    println!("{}", output::render_line_chart("Total quantity exported", &quantity, "million L"));
    let value: Vec<(i32, f64)> = views.by_year.iter().map(|y| (y.year, y.value)).collect();
    println!("{}", output::render_line_chart("Total value exported", &value, "million US$"));

    let top: Vec<(String, f64)> = views
        .by_destination
        .iter()
        .take(config.top)
        .map(|t| (t.destination.clone(), t.value))
        .collect();
    println!(
        "{}",
        output::render_bar_chart(
            &format!("Top {} importers by value ({}–{})", top.len(), summary.first_year, summary.last_year),
            &top,
            "million US$"
        )
    );

    for leader in views.by_destination.iter().take(config.spotlight) {
        let series = aggregate::destination_series(&report.facts, &leader.destination);
        println!(
            "{}",
            output::render_line_chart(
                &format!("Imports by {} (US$)", leader.destination),
                &series_points(&series),
                "million US$"
            )
        );
    }

    println!(
        "Steady-growth destinations (from {}, at least {} L in total)\n",
        config.growth_from_year,
        util::format_integer(config.min_growth_quantity)
    );
    output::preview_table_rows(&reports::growth_rows(&views.growth), views.growth.len());
    for destination in &summary.growth_destinations {
        let series = aggregate::destination_series(&views.growth, destination);
        println!(
            "{}",
            output::render_line_chart(
                &format!("Imports by {} (US$)", destination),
                &series_points(&series),
                "million US$"
            )
        );
    }
}

fn export_report(config: &Config, report: &Report) -> Result<()> {
    let dir = &config.out_dir;
    std::fs::create_dir_all(dir)?;
    output::write_csv(&dir.join("facts_long.csv"), &report.facts)?;
    output::write_csv(&dir.join("destination_totals.csv"), &report.views.by_destination)?;
    output::write_csv(&dir.join("yearly_totals.csv"), &report.views.by_year)?;
    output::write_csv(&dir.join("growth_candidates.csv"), &report.views.growth)?;
    output::write_json(&dir.join("summary.json"), &report.summary)?;
    println!("Outputs saved to {}", dir.display());
    Ok(())
}

fn run(config: &Config) -> Result<()> {
    let report = build_report(config)?;
    print_report(config, &report);
    if config.no_export {
        log::info!("Export skipped (--no-export)");
        return Ok(());
    }
    export_report(config, &report)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = Config::parse();
    if let Err(e) = run(&config) {
        log::error!("Report aborted: {}", e);
        eprintln!("Failed to build report: {}", e);
        std::process::exit(1);
    }
}
