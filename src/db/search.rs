//! The seven fixed queries behind the global search. Column lists are
//! an allow-list; only the search term is bound as a parameter.

use crate::db::{decimal_at, like_pattern};
use crate::errors::AppResult;
use crate::models::search::{EntityKind, SearchHit};
use rusqlite::{Connection, Row};

type Shape = fn(&Row) -> rusqlite::Result<Vec<(&'static str, String)>>;

struct EntityQuery {
    kind: EntityKind,
    sql: &'static str,
    shape: Shape,
}

fn text(row: &Row, idx: usize) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
}

fn number(row: &Row, idx: usize) -> rusqlite::Result<String> {
    Ok(row
        .get::<_, Option<i64>>(idx)?
        .map(|n| n.to_string())
        .unwrap_or_default())
}

const QUERIES: &[EntityQuery] = &[
    EntityQuery {
        kind: EntityKind::Employee,
        sql: "SELECT id, last_name, first_name, age, phone, address FROM employees
              WHERE id LIKE ?1 ESCAPE '\\' OR last_name LIKE ?1 ESCAPE '\\'
                 OR first_name LIKE ?1 ESCAPE '\\' OR phone LIKE ?1 ESCAPE '\\'
                 OR address LIKE ?1 ESCAPE '\\'
              ORDER BY id",
        shape: |row| {
            Ok(vec![
                ("last_name", text(row, 1)?),
                ("first_name", text(row, 2)?),
                ("age", number(row, 3)?),
                ("phone", text(row, 4)?),
                ("address", text(row, 5)?),
            ])
        },
    },
    EntityQuery {
        kind: EntityKind::Department,
        sql: "SELECT id, name FROM departments
              WHERE id LIKE ?1 ESCAPE '\\' OR name LIKE ?1 ESCAPE '\\'
              ORDER BY id",
        shape: |row| Ok(vec![("name", text(row, 1)?)]),
    },
    EntityQuery {
        kind: EntityKind::Position,
        sql: "SELECT id, name, department_id, base_salary FROM positions
              WHERE id LIKE ?1 ESCAPE '\\' OR name LIKE ?1 ESCAPE '\\'
              ORDER BY id",
        shape: |row| {
            Ok(vec![
                ("name", text(row, 1)?),
                ("department_id", number(row, 2)?),
                ("base_salary", decimal_at(row, 3)?.to_string()),
            ])
        },
    },
    EntityQuery {
        kind: EntityKind::Timesheet,
        sql: "SELECT id, employee_id, work_date, rendered_hours, overtime_hours FROM timesheets
              WHERE id LIKE ?1 ESCAPE '\\' OR employee_id LIKE ?1 ESCAPE '\\'
              ORDER BY id",
        shape: |row| {
            Ok(vec![
                ("employee_id", number(row, 1)?),
                ("work_date", text(row, 2)?),
                ("rendered_hours", decimal_at(row, 3)?.to_string()),
                ("overtime_hours", decimal_at(row, 4)?.to_string()),
            ])
        },
    },
    EntityQuery {
        kind: EntityKind::Payroll,
        sql: "SELECT id, employee_id, reference_no, start_cut_off, end_cut_off FROM payrolls
              WHERE id LIKE ?1 ESCAPE '\\' OR employee_id LIKE ?1 ESCAPE '\\'
                 OR reference_no LIKE ?1 ESCAPE '\\'
              ORDER BY id",
        shape: |row| {
            Ok(vec![
                ("employee_id", number(row, 1)?),
                ("reference_no", text(row, 2)?),
                ("start_cut_off", text(row, 3)?),
                ("end_cut_off", text(row, 4)?),
            ])
        },
    },
    EntityQuery {
        kind: EntityKind::Deduction,
        sql: "SELECT id, description, default_amount FROM deductions
              WHERE id LIKE ?1 ESCAPE '\\' OR description LIKE ?1 ESCAPE '\\'
              ORDER BY id",
        shape: |row| {
            Ok(vec![
                ("description", text(row, 1)?),
                ("default_amount", decimal_at(row, 2)?.to_string()),
            ])
        },
    },
    EntityQuery {
        kind: EntityKind::User,
        sql: "SELECT id, username, role FROM users
              WHERE id LIKE ?1 ESCAPE '\\' OR username LIKE ?1 ESCAPE '\\'
              ORDER BY id",
        shape: |row| Ok(vec![("username", text(row, 1)?), ("role", text(row, 2)?)]),
    },
];

/// Run every entity query with `term` and concatenate the hits in
/// the fixed entity order. The caller rejects blank terms.
pub fn search_all(conn: &Connection, term: &str) -> AppResult<Vec<SearchHit>> {
    let pattern = like_pattern(term);
    let mut hits = Vec::new();

    for q in QUERIES {
        let mut stmt = conn.prepare_cached(q.sql)?;
        let rows = stmt.query_map([&pattern], |row| {
            Ok(SearchHit {
                kind: q.kind,
                id: row.get(0)?,
                fields: (q.shape)(row)?,
            })
        })?;
        for r in rows {
            hits.push(r?);
        }
    }

    Ok(hits)
}
