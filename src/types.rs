use serde::Serialize;
use tabled::Tabled;

/// One wide row of the export file, fields kept as read.
#[derive(Debug, Clone)]
pub struct RawRow {
    /// 1-based line number in the source file (header is line 1).
    pub line: u64,
    pub fields: Vec<String>,
}

/// One (destination, year) observation of the long table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactRecord {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Origin")]
    pub origin: String,
    #[serde(rename = "Destination")]
    pub destination: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Quantity")]
    pub quantity: f64,
    #[serde(rename = "Value")]
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DestinationAggregate {
    #[serde(rename = "Origin")]
    pub origin: String,
    #[serde(rename = "Destination")]
    pub destination: String,
    #[serde(rename = "Quantity")]
    pub quantity: f64,
    #[serde(rename = "Value")]
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearAggregate {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Quantity")]
    pub quantity: f64,
    #[serde(rename = "Value")]
    pub value: f64,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct DestinationRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Origin")]
    #[tabled(rename = "Origin")]
    pub origin: String,
    #[serde(rename = "Destination")]
    #[tabled(rename = "Destination")]
    pub destination: String,
    #[serde(rename = "Quantity")]
    #[tabled(rename = "Quantity (L)")]
    pub quantity: String,
    #[serde(rename = "Value")]
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct YearRow {
    #[serde(rename = "Year")]
    #[tabled(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Quantity")]
    #[tabled(rename = "Quantity (L)")]
    pub quantity: String,
    #[serde(rename = "Value")]
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct GrowthRow {
    #[serde(rename = "Destination")]
    #[tabled(rename = "Destination")]
    pub destination: String,
    #[serde(rename = "Year")]
    #[tabled(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Quantity")]
    #[tabled(rename = "Quantity (L)")]
    pub quantity: String,
    #[serde(rename = "Value")]
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryStats {
    pub generated_at: String,
    pub origin: String,
    pub first_year: i32,
    pub last_year: i32,
    pub destinations: usize,
    pub total_quantity: f64,
    pub total_value: f64,
    pub peak_quantity_year: Option<i32>,
    pub peak_value_year: Option<i32>,
    pub growth_destinations: Vec<String>,
}
