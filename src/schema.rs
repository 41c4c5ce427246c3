// Column layout of the wide export table.
//
// A wide row is `Id; Country; Q_1970; V_1970; Q_1971; V_1971; ...`. Instead of
// doing offset arithmetic wherever a year is read, the layout is described once
// as an ordered list of `YearColumn` descriptors.
use crate::error::{ReportError, Result};
use once_cell::sync::Lazy;

/// Leading identifying fields (`Id`, `Country`) before the numeric block.
pub const ID_FIELDS: usize = 2;

pub const FIRST_EXPORT_YEAR: i32 = 1970;
pub const LAST_EXPORT_YEAR: i32 = 2023;

/// The fixed 1970–2023 layout of the export file.
pub static EXPORT_SCHEMA: Lazy<YearSchema> =
    Lazy::new(|| YearSchema::contiguous(FIRST_EXPORT_YEAR, LAST_EXPORT_YEAR));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearColumn {
    pub year: i32,
    pub quantity_index: usize,
    pub value_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearSchema {
    columns: Vec<YearColumn>,
}

impl YearSchema {
    /// One descriptor per year in `first..=last`; the k-th year reads the
    /// fields at `ID_FIELDS + 2k` and `ID_FIELDS + 2k + 1`.
    pub fn contiguous(first: i32, last: i32) -> Self {
        Self::from_years((first..=last).collect())
    }

    fn from_years(years: Vec<i32>) -> Self {
        let columns = years
            .into_iter()
            .enumerate()
            .map(|(k, year)| YearColumn {
                year,
                quantity_index: ID_FIELDS + 2 * k,
                value_index: ID_FIELDS + 2 * k + 1,
            })
            .collect();
        Self { columns }
    }

    pub fn columns(&self) -> &[YearColumn] {
        &self.columns
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.columns.iter().map(|c| c.year)
    }

    pub(crate) fn len(&self) -> usize {
        self.columns.len()
    }

    /// Number of fields a well-formed row carries.
    pub fn field_count(&self) -> usize {
        ID_FIELDS + 2 * self.columns.len()
    }

    /// Decode the year layout named by a header row and check it against `self`.
    ///
    /// Numeric columns may be named `Quantity_1970`/`Value_1970` or, as in the
    /// raw export, just `1970` (a duplicated name may carry a `.1` suffix).
    pub fn validate_header(&self, header: &[String]) -> Result<()> {
        if header.len() != self.field_count() {
            return Err(ReportError::HeaderMismatch {
                expected: format!("{} columns", self.field_count()),
                found: format!("{} columns", header.len()),
            });
        }
        let decoded = decode_header(header)?;
        if decoded != *self {
            let span = |s: &YearSchema| match (s.years().next(), s.years().last()) {
                (Some(first), Some(last)) => format!("years {}..={}", first, last),
                _ => "no years".to_string(),
            };
            return Err(ReportError::HeaderMismatch {
                expected: span(self),
                found: span(&decoded),
            });
        }
        Ok(())
    }
}

fn decode_header(header: &[String]) -> Result<YearSchema> {
    let numeric = header.get(ID_FIELDS..).unwrap_or_default();
    let mut years = Vec::with_capacity(numeric.len() / 2);
    for pair in numeric.chunks(2) {
        let quantity_year = header_year(&pair[0])?;
        let value_year = match pair.get(1) {
            Some(token) => header_year(token)?,
            None => {
                return Err(ReportError::HeaderMismatch {
                    expected: format!("a value column after {}", pair[0]),
                    found: "end of header".to_string(),
                })
            }
        };
        if quantity_year != value_year {
            return Err(ReportError::HeaderMismatch {
                expected: format!("value column for {}", quantity_year),
                found: pair[1].clone(),
            });
        }
        years.push(quantity_year);
    }
    Ok(YearSchema::from_years(years))
}

/// Pull the four-digit year out of a column name.
pub fn header_year(token: &str) -> Result<i32> {
    let parse_error = || ReportError::Parse {
        line: 1,
        column: token.to_string(),
        value: token.to_string(),
    };
    token
        .trim()
        .split(|c: char| !c.is_ascii_digit())
        .find(|part| part.len() == 4)
        .ok_or_else(parse_error)?
        .parse::<i32>()
        .map_err(|_| parse_error())
}
