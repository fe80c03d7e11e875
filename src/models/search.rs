use serde::Serialize;

/// The fixed set of tables searched by the global search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    Employee,
    Department,
    Position,
    Timesheet,
    Payroll,
    Deduction,
    User,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Employee => "Employee",
            EntityKind::Department => "Department",
            EntityKind::Position => "Position",
            EntityKind::Timesheet => "Timesheet",
            EntityKind::Payroll => "Payroll",
            EntityKind::Deduction => "Deduction",
            EntityKind::User => "User",
        }
    }
}

/// One row of the heterogeneous search result.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub kind: EntityKind,
    pub id: i64,
    pub fields: Vec<(&'static str, String)>,
}

impl SearchHit {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}
