use crate::aggregate::GrowthFilter;
use clap::Parser;
use std::path::PathBuf;

/// Wine export report: reshapes the wide yearly export table and prints the
/// destination, yearly and steady-growth views.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Config {
    /// Semicolon-separated export file (Id; Country; quantity/value per year)
    #[arg(long, default_value = "ExpVinho.csv")]
    pub input: PathBuf,

    /// Directory for the CSV and JSON exports
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Print to the console only
    #[arg(long)]
    pub no_export: bool,

    /// Exporting country, injected into every record and excluded from the growth screen
    #[arg(long, default_value = "Brasil")]
    pub origin: String,

    /// First year of the analysed period
    #[arg(long, default_value_t = 2009)]
    pub from_year: i32,

    /// First year shown for steady-growth destinations
    #[arg(long, default_value_t = 2018)]
    pub growth_from_year: i32,

    /// Minimum total quantity for a steady-growth destination
    #[arg(long, default_value_t = 100.0)]
    pub min_growth_quantity: f64,

    /// Destinations in the top-by-value chart
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Leading destinations whose yearly series is charted
    #[arg(long, default_value_t = 6)]
    pub spotlight: usize,

    /// Rows shown in console tables
    #[arg(long, default_value_t = 15)]
    pub preview_rows: usize,
}

impl Config {
    pub fn growth_filter(&self) -> GrowthFilter {
        GrowthFilter {
            origin: self.origin.clone(),
            min_total_quantity: self.min_growth_quantity,
            from_year: self.growth_from_year,
        }
    }
}
