use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;

/// Tables reported by `db --info`, in display order.
const TABLES: &[(&str, &str)] = &[
    ("employees", "Employees"),
    ("departments", "Departments"),
    ("positions", "Positions"),
    ("timesheets", "Timesheets"),
    ("gross_pay", "Gross pay rows"),
    ("payrolls", "Payrolls"),
    ("payroll_deductions", "Payroll deductions"),
    ("deductions", "Deduction templates"),
    ("users", "Users"),
];

/// Row count per known table.
pub fn row_counts(pool: &DbPool) -> rusqlite::Result<Vec<(&'static str, i64)>> {
    let mut out = Vec::with_capacity(TABLES.len());
    for (table, label) in TABLES {
        // table names come from the constant above, never from input
        let n: i64 = pool
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        out.push((*label, n));
    }
    Ok(out)
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    for (label, n) in row_counts(pool)? {
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, n, RESET);
    }

    let first: Option<String> = pool
        .conn
        .query_row("SELECT MIN(start_cut_off) FROM payrolls", [], |row| row.get(0))?;
    let last: Option<String> = pool
        .conn
        .query_row("SELECT MAX(end_cut_off) FROM payrolls", [], |row| row.get(0))?;

    let dash = || format!("{GREY}--{RESET}");
    println!("{}• Payroll cut-offs:{}", CYAN, RESET);
    println!("    from: {}", first.unwrap_or_else(dash));
    println!("    to:   {}", last.unwrap_or_else(dash));

    println!();
    Ok(())
}
