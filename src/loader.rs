use crate::error::Result;
use crate::schema::YearSchema;
use crate::types::RawRow;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub total_rows: usize,
    pub columns: usize,
}

/// Read the semicolon-separated wide export table.
///
/// The header must describe `schema`; data rows are returned as read; their
/// field counts are checked later by the reshaper.
pub fn load_rows(path: &Path, schema: &YearSchema) -> Result<(Vec<RawRow>, LoadReport)> {
    log::info!("Loading {}", path.display());
    let file = File::open(path)?;
    read_rows(file, schema)
}

pub fn read_rows<R: Read>(input: R, schema: &YearSchema) -> Result<(Vec<RawRow>, LoadReport)> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(input);

    let header: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    schema.validate_header(&header)?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        rows.push(RawRow {
            line,
            fields: record.iter().map(|f| f.to_string()).collect(),
        });
    }

    let report = LoadReport {
        total_rows: rows.len(),
        columns: header.len(),
    };
    log::info!(
        "Loaded {} rows x {} columns",
        report.total_rows,
        report.columns
    );
    Ok((rows, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use std::io::Write;

    #[test]
    fn reads_semicolon_file_with_line_numbers() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Id;País;2009;2009;2010;2010").unwrap();
        writeln!(file, "1;Paraguai;10;20;30;40").unwrap();
        writeln!(file, "2;Rússia;;;5;7").unwrap();
        file.flush().unwrap();

        let schema = YearSchema::contiguous(2009, 2010);
        let (rows, report) = load_rows(file.path(), &schema).unwrap();

        assert_eq!(report.total_rows, 2);
        assert_eq!(report.columns, 6);
        assert_eq!(rows[0].fields[1], "Paraguai");
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[1].fields[2], "");
        assert_eq!(rows[1].line, 3);
    }

    #[test]
    fn short_rows_are_kept_for_the_reshaper_to_reject() {
        let data = "Id;Country;Quantity_2009;Value_2009\n1;Chile;5\n";
        let schema = YearSchema::contiguous(2009, 2009);
        let (rows, _) = read_rows(data.as_bytes(), &schema).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].fields.len(), 3);
    }

    #[test]
    fn header_for_other_years_is_rejected() {
        let data = "Id;Country;Quantity_1999;Value_1999\n";
        let schema = YearSchema::contiguous(2009, 2009);
        assert!(matches!(
            read_rows(data.as_bytes(), &schema),
            Err(ReportError::HeaderMismatch { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let schema = YearSchema::contiguous(2009, 2009);
        let err = load_rows(Path::new("does/not/exist.csv"), &schema).unwrap_err();
        assert!(matches!(err, ReportError::Io(_)));
    }
}
