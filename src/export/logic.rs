use super::csv::write_csv;
use super::fs_utils::ensure_writable;
use super::json::write_json;
use super::model::PayrollExport;
use super::{ExportFormat, notify_export_success};
use crate::core::access::{Capability, Session};
use crate::core::payroll::PayrollLogic;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use std::fs;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export payroll summaries, optionally for one employee.
    /// Returns how many rows were written.
    pub fn export(
        pool: &DbPool,
        session: &Session,
        format: ExportFormat,
        file: &str,
        employee: Option<i64>,
        force: bool,
    ) -> AppResult<usize> {
        session.require(Capability::Export)?;

        let path = Path::new(file);
        ensure_writable(path, force)?;

        let rows: Vec<PayrollExport> = PayrollLogic::list(pool, session, employee)?
            .iter()
            .map(PayrollExport::from)
            .collect();

        if rows.is_empty() {
            warning("No payrolls found. Nothing to export.");
            return Ok(0);
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        match format {
            ExportFormat::Csv => write_csv(path, &rows)?,
            ExportFormat::Json => write_json(path, &rows)?,
        }

        notify_export_success(&format.as_str().to_uppercase(), path, rows.len());
        audit(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("{} payrolls exported as {}", rows.len(), format.as_str()),
        );
        tracing::info!(rows = rows.len(), format = format.as_str(), "payrolls exported");
        Ok(rows.len())
    }
}
