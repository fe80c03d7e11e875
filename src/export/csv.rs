use super::model::PayrollExport;
use crate::errors::AppResult;
use std::path::Path;

/// Write payroll rows as CSV with a header line.
pub(crate) fn write_csv(path: &Path, rows: &[PayrollExport]) -> AppResult<()> {
    let mut wtr = ::csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
