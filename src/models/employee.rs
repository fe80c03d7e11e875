use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Employee {
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub age: Option<u32>,
    pub dob: Option<NaiveDate>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub date_of_hire: Option<NaiveDate>,
    pub department_id: Option<i64>,
    pub position_id: Option<i64>,
    pub monthly_salary: Option<Decimal>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Employee joined with department and position names.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeRow {
    #[serde(flatten)]
    pub employee: Employee,
    pub department_name: Option<String>,
    pub position_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "m" | "male" => Some(Gender::Male),
            "f" | "female" => Some(Gender::Female),
            _ => None,
        }
    }
}
