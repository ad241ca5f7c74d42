//! Staff Model

use serde::{Deserialize, Serialize};

/// Staff type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaffType {
    Staff,
    Cook,
    Manager,
    ScreenRole,
}

/// Employment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentStatus {
    FullTime,
    PartTime,
}

/// Staff member (员工)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: String,
    pub full_name: String,
    pub staff_type: StaffType,
    pub employment_status: EmploymentStatus,
}

impl Staff {
    pub fn new(id: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            staff_type: StaffType::Staff,
            employment_status: EmploymentStatus::FullTime,
        }
    }

    pub fn with_type(mut self, staff_type: StaffType) -> Self {
        self.staff_type = staff_type;
        self
    }

    pub fn with_status(mut self, status: EmploymentStatus) -> Self {
        self.employment_status = status;
        self
    }
}
