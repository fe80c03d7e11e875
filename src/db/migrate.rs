use rusqlite::{Connection, OptionalExtension, Result};

/// A schema step, applied once and recorded in the `log` table.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_initial_schema",
        description: "Created payroll tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS departments (
            id    INTEGER PRIMARY KEY AUTOINCREMENT,
            name  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS positions (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            name           TEXT NOT NULL,
            base_salary    TEXT NOT NULL DEFAULT '0.00',
            department_id  INTEGER REFERENCES departments(id)
        );

        CREATE TABLE IF NOT EXISTS employees (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            last_name       TEXT NOT NULL,
            first_name      TEXT NOT NULL,
            email           TEXT,
            gender          TEXT CHECK(gender IN ('Male','Female')),
            age             INTEGER,
            dob             TEXT,
            address         TEXT,
            phone           TEXT,
            date_of_hire    TEXT,
            department_id   INTEGER REFERENCES departments(id),
            position_id     INTEGER REFERENCES positions(id),
            monthly_salary  TEXT
        );

        CREATE TABLE IF NOT EXISTS timesheets (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id     INTEGER NOT NULL REFERENCES employees(id),
            work_date       TEXT NOT NULL,
            standard_hours  TEXT NOT NULL,
            rendered_hours  TEXT NOT NULL,
            overtime_hours  TEXT NOT NULL,
            UNIQUE (employee_id, work_date)
        );

        CREATE TABLE IF NOT EXISTS deductions (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            description     TEXT NOT NULL,
            default_amount  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS payrolls (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id    INTEGER NOT NULL REFERENCES employees(id),
            reference_no   TEXT NOT NULL,
            start_cut_off  TEXT NOT NULL,
            end_cut_off    TEXT NOT NULL,
            created_at     TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS payroll_deductions (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            payroll_id    INTEGER NOT NULL REFERENCES payrolls(id),
            deduction_id  INTEGER NOT NULL REFERENCES deductions(id),
            amount        TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS gross_pay (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            timesheet_id     INTEGER NOT NULL UNIQUE REFERENCES timesheets(id),
            std_hourly_rate  TEXT NOT NULL,
            ot_hourly_rate   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS users (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id    INTEGER REFERENCES employees(id),
            username       TEXT NOT NULL UNIQUE,
            password_hash  TEXT NOT NULL,
            role           TEXT NOT NULL CHECK(role IN ('Admin','Employee'))
        );
        "#,
    },
    Migration {
        version: "20250412_0002_payroll_indexes",
        description: "Unique payroll reference numbers and lookup indexes",
        sql: r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_payrolls_reference_no ON payrolls(reference_no);
        CREATE INDEX IF NOT EXISTS idx_payrolls_employee ON payrolls(employee_id);
        CREATE INDEX IF NOT EXISTS idx_payroll_deductions_payroll ON payroll_deductions(payroll_id);
        CREATE INDEX IF NOT EXISTS idx_timesheets_employee_date ON timesheets(employee_id, work_date);
        "#,
    },
    Migration {
        version: "20250520_0003_one_account_per_role",
        description: "One account per employee and role",
        sql: r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_users_employee_role
            ON users(employee_id, role) WHERE employee_id IS NOT NULL;
        "#,
    },
];

/// Ensure that the `log` table exists; it also records applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    conn.execute_batch("BEGIN;")?;

    let result = conn.execute_batch(m.sql).and_then(|_| {
        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
            [m.version, m.description],
        )
    });

    match result {
        Ok(_) => conn.execute_batch("COMMIT;"),
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK;");
            Err(e)
        }
    }
}

/// Versions already recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    ensure_log_table(conn)?;
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect()
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db() and `db --migrate`. Returns how many ran.
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
        tracing::info!(version = m.version, description = m.description, "migration applied");
        applied += 1;
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(run_pending_migrations(&conn).unwrap(), MIGRATIONS.len());
        assert_eq!(run_pending_migrations(&conn).unwrap(), 0);
        assert_eq!(applied_versions(&conn).unwrap().len(), MIGRATIONS.len());
    }
}
