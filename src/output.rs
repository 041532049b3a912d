use crate::row::{Row, HEADER};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// Creates or truncates `path` and writes the header followed by every row.
pub fn write_rows(path: &Path, rows: &[Row]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(BufWriter::new(file));

    wtr.write_record(HEADER)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()
        .with_context(|| format!("Failed to flush output file {}", path.display()))?;

    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut rows = Vec::new();
    for (line, result) in csv_reader.deserialize::<Row>().enumerate() {
        let row = result
            .with_context(|| format!("Invalid row {} in {}", line + 1, path.display()))?;
        row.validate()?;
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use crate::generator::RowGenerator;
    use crate::output::{read_rows, write_rows};
    use crate::row::{Row, RowType};
    use std::fs;

    #[test]
    fn test_header_only_for_zero_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        write_rows(&path, &[]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "type,client,tx,amount\n");
        assert!(read_rows(&path).unwrap().is_empty());
    }

    #[test]
    fn test_written_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        let rows = vec![
            Row::new_movement(RowType::Deposit, 4, 1, 10_000).unwrap(),
            Row::new_reference(RowType::Dispute, 4, 3).unwrap(),
        ];

        write_rows(&path, &rows).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "type,client,tx,amount\ndeposit,4,1,1.0000\ndispute,4,3,\n"
        );
    }

    #[test]
    fn test_existing_file_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        fs::write(&path, "stale\ncontent\nthat is longer than the new file\n").unwrap();

        write_rows(&path, &[]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "type,client,tx,amount\n");
    }

    #[test]
    fn test_generated_rows_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        let (rows, _) = RowGenerator::from_seed(2024, None).generate(500).unwrap();

        write_rows(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 501);
        assert_eq!(read_rows(&path).unwrap(), rows);
    }

    #[test]
    fn test_missing_parent_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("rows.csv");

        let err = write_rows(&path, &[]).unwrap_err();
        assert!(err.to_string().starts_with("Failed to create output file"));
    }

    #[test]
    fn test_read_rejects_amount_on_dispute() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "type,client,tx,amount\ndispute,1,1,5.0000\n").unwrap();

        assert!(read_rows(&path).is_err());
    }
}
