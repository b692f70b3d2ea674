use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::error::{Result, TrendscopeError};
use crate::core::types::Record;
use crate::data::csv::write_row;

/// Write `records` as delimited text: a header of `columns`, then one row per
/// record in order. Missing values become empty cells.
pub fn write_csv<W: Write + ?Sized>(
    writer: &mut W,
    columns: &[String],
    records: &[Record],
    delimiter: char,
) -> Result<()> {
    write_row(writer, columns, delimiter)?;
    for record in records {
        let cells: Vec<&str> = columns
            .iter()
            .map(|column| record.get(column).unwrap_or(""))
            .collect();
        write_row(writer, cells.as_slice(), delimiter)?;
    }
    Ok(())
}

/// Write the export file at `path`, replacing any existing file.
pub fn export_csv<P: AsRef<Path>>(
    path: P,
    columns: &[String],
    records: &[Record],
    delimiter: char,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        TrendscopeError::InvalidArgument(format!(
            "Cannot write export file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let mut writer = BufWriter::new(file);
    write_csv(&mut writer, columns, records, delimiter)?;
    writer.flush()?;

    info!("Exported {} record(s) to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dataset, DatasetVariant};

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_write_csv_keeps_column_order() -> Result<()> {
        let records = vec![
            Record::new(None)
                .with_field("country", "France")
                .with_field("created_at", "2024-02-10"),
            Record::new(None).with_field("created_at", "2024-02-11"),
        ];

        let mut out = Vec::new();
        write_csv(&mut out, &columns(&["created_at", "country"]), &records, ',')?;

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "created_at,country\n2024-02-10,France\n2024-02-11,\n"
        );
        Ok(())
    }

    #[test]
    fn test_write_csv_escapes_values() -> Result<()> {
        let records = vec![Record::new(None).with_field("text", "Said \"yes\", then left")];

        let mut out = Vec::new();
        write_csv(&mut out, &columns(&["text"]), &records, ',')?;

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "text\n\"Said \"\"yes\"\", then left\"\n"
        );
        Ok(())
    }

    #[test]
    fn test_write_csv_empty_records_writes_header() -> Result<()> {
        let mut out = Vec::new();
        write_csv(&mut out, &columns(&["date", "region"]), &[], ';')?;
        assert_eq!(String::from_utf8(out).unwrap(), "date;region\n");
        Ok(())
    }

    #[test]
    fn test_export_reloads_to_same_records() -> Result<()> {
        let text = "id,created_at,region,country,stage,topic\n\
                    1,2024-02-10,EU,\"Bosnia, Herzegovina\",Phase 3,Safety\n\
                    2,2024-02-11,,US,,Efficacy\n";
        let dataset = Dataset::from_delimited(text, DatasetVariant::Insights, ',')?;

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("export.csv");
        export_csv(&path, dataset.columns(), dataset.records(), ',')?;

        let reloaded =
            Dataset::from_delimited(&std::fs::read_to_string(&path)?, DatasetVariant::Insights, ',')?;
        assert_eq!(reloaded, dataset);
        Ok(())
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let result = export_csv(
            "/path/that/does/not/exist/export.csv",
            &columns(&["a"]),
            &[],
            ',',
        );
        assert!(matches!(result, Err(TrendscopeError::InvalidArgument(_))));
    }
}
