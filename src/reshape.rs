// Wide-to-long reshape of the export table.
//
// Every raw row expands to exactly one `FactRecord` per schema year. Years
// without trade still produce a record (quantity and value 0) so later
// monotonicity checks see "no trade" as zero rather than as a gap.
use crate::error::{ReportError, Result};
use crate::schema::YearSchema;
use crate::types::{FactRecord, RawRow};
use crate::util::parse_amount;

/// Expand one wide row into one record per year of `schema`.
pub fn reshape_row(row: &RawRow, schema: &YearSchema, origin: &str) -> Result<Vec<FactRecord>> {
    if row.fields.len() != schema.field_count() {
        return Err(ReportError::MalformedRow {
            line: row.line,
            expected: schema.field_count(),
            found: row.fields.len(),
        });
    }
    let id = row.fields[0].trim();
    let destination = row.fields[1].trim();

    schema
        .columns()
        .iter()
        .map(|col| -> Result<FactRecord> {
            Ok(FactRecord {
                id: id.to_string(),
                origin: origin.to_string(),
                destination: destination.to_string(),
                year: col.year,
                quantity: read_cell(row, col.quantity_index, "Quantity", col.year)?,
                value: read_cell(row, col.value_index, "Value", col.year)?,
            })
        })
        .collect()
}

fn read_cell(row: &RawRow, index: usize, measure: &str, year: i32) -> Result<f64> {
    let raw = &row.fields[index];
    parse_amount(raw).ok_or_else(|| ReportError::Parse {
        line: row.line,
        column: format!("{}_{}", measure, year),
        value: raw.clone(),
    })
}

/// Reshape every row; the first malformed row aborts the whole run.
pub fn reshape(rows: &[RawRow], schema: &YearSchema, origin: &str) -> Result<Vec<FactRecord>> {
    let mut facts = Vec::with_capacity(rows.len() * schema.len());
    for row in rows {
        facts.extend(reshape_row(row, schema, origin)?);
    }
    log::debug!("Reshaped {} rows into {} fact records", rows.len(), facts.len());
    Ok(facts)
}

/// Copy of the records with `year >= from_year`, order preserved.
pub fn retain_from_year(facts: &[FactRecord], from_year: i32) -> Vec<FactRecord> {
    facts
        .iter()
        .filter(|f| f.year >= from_year)
        .cloned()
        .collect()
}
