use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::UserId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role: {0:?}")]
pub struct ParseRoleError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Teacher,
    Student,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }

    /// Path of the dashboard this role lands on after sign-in.
    #[must_use]
    pub fn home_path(self) -> &'static str {
        match self {
            Role::Teacher => "/teacher/dashboard",
            Role::Student => "/student/dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

/// The backend's view of a signed-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    #[must_use]
    pub fn is_teacher(&self) -> bool {
        self.role == Role::Teacher
    }

    /// Name for greetings; falls back to the email's local part.
    #[must_use]
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if !name.is_empty() {
            return name;
        }
        self.email.split('@').next().unwrap_or(&self.email)
    }
}
