use crate::db::{count, exists, like_pattern, opt_date_at, opt_decimal_at};
use crate::errors::AppResult;
use crate::models::employee::{Employee, EmployeeRow, Gender};
use crate::utils::date::to_db;
use rusqlite::{Connection, OptionalExtension, Row, params};

const COLUMNS: &str = "e.id, e.last_name, e.first_name, e.email, e.gender, e.age, e.dob,
    e.address, e.phone, e.date_of_hire, e.department_id, e.position_id, e.monthly_salary";

fn map_employee(row: &Row) -> rusqlite::Result<Employee> {
    let gender: Option<String> = row.get(4)?;
    Ok(Employee {
        id: row.get(0)?,
        last_name: row.get(1)?,
        first_name: row.get(2)?,
        email: row.get(3)?,
        gender: gender.as_deref().and_then(Gender::from_db_str),
        age: row.get(5)?,
        dob: opt_date_at(row, 6)?,
        address: row.get(7)?,
        phone: row.get(8)?,
        date_of_hire: opt_date_at(row, 9)?,
        department_id: row.get(10)?,
        position_id: row.get(11)?,
        monthly_salary: opt_decimal_at(row, 12)?,
    })
}

fn map_row(row: &Row) -> rusqlite::Result<EmployeeRow> {
    Ok(EmployeeRow {
        employee: map_employee(row)?,
        department_name: row.get(13)?,
        position_name: row.get(14)?,
    })
}

/// Employees joined with their department and position names.
pub fn list(conn: &Connection, filter: Option<&str>) -> AppResult<Vec<EmployeeRow>> {
    let sql = format!(
        "SELECT {COLUMNS}, d.name, p.name
         FROM employees e
         LEFT JOIN departments d ON e.department_id = d.id
         LEFT JOIN positions p ON e.position_id = p.id
         WHERE ?1 IS NULL
            OR e.id LIKE ?1 ESCAPE '\\'
            OR e.last_name LIKE ?1 ESCAPE '\\'
            OR e.first_name LIKE ?1 ESCAPE '\\'
         ORDER BY e.id"
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let pattern = filter.map(like_pattern);
    let rows = stmt.query_map([pattern], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find(conn: &Connection, id: i64) -> AppResult<Option<EmployeeRow>> {
    let sql = format!(
        "SELECT {COLUMNS}, d.name, p.name
         FROM employees e
         LEFT JOIN departments d ON e.department_id = d.id
         LEFT JOIN positions p ON e.position_id = p.id
         WHERE e.id = ?1"
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn exists_by_id(conn: &Connection, id: i64) -> AppResult<bool> {
    Ok(exists(conn, "SELECT 1 FROM employees WHERE id = ?1", [id])?)
}

pub fn insert(conn: &Connection, e: &Employee) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO employees
            (last_name, first_name, email, gender, age, dob, address, phone,
             date_of_hire, department_id, position_id, monthly_salary)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            e.last_name,
            e.first_name,
            e.email,
            e.gender.map(|g| g.to_db_str()),
            e.age,
            e.dob.as_ref().map(to_db),
            e.address,
            e.phone,
            e.date_of_hire.as_ref().map(to_db),
            e.department_id,
            e.position_id,
            e.monthly_salary.map(|s| s.to_string()),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, e: &Employee) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE employees SET
            last_name = ?1, first_name = ?2, email = ?3, gender = ?4, age = ?5,
            dob = ?6, address = ?7, phone = ?8, date_of_hire = ?9,
            department_id = ?10, position_id = ?11, monthly_salary = ?12
         WHERE id = ?13",
        params![
            e.last_name,
            e.first_name,
            e.email,
            e.gender.map(|g| g.to_db_str()),
            e.age,
            e.dob.as_ref().map(to_db),
            e.address,
            e.phone,
            e.date_of_hire.as_ref().map(to_db),
            e.department_id,
            e.position_id,
            e.monthly_salary.map(|s| s.to_string()),
            e.id,
        ],
    )?)
}

pub fn delete(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM employees WHERE id = ?1", [id])?)
}

/// Rows in other tables that reference the employee.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Dependents {
    pub timesheets: i64,
    pub payrolls: i64,
    pub users: i64,
}

impl Dependents {
    pub fn is_empty(&self) -> bool {
        self.timesheets == 0 && self.payrolls == 0 && self.users == 0
    }
}

pub fn dependents(conn: &Connection, id: i64) -> AppResult<Dependents> {
    Ok(Dependents {
        timesheets: count(
            conn,
            "SELECT COUNT(*) FROM timesheets WHERE employee_id = ?1",
            [id],
        )?,
        payrolls: count(
            conn,
            "SELECT COUNT(*) FROM payrolls WHERE employee_id = ?1",
            [id],
        )?,
        users: count(
            conn,
            "SELECT COUNT(*) FROM users WHERE employee_id = ?1",
            [id],
        )?,
    })
}
