//! Role Model

use serde::{Deserialize, Serialize};

/// Account role carried in every token payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Owner,
    Employee,
    Guest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "Owner",
            Self::Employee => "Employee",
            Self::Guest => "Guest",
        }
    }

    /// Owner and Employee accounts (the back-office side)
    pub fn is_staff(&self) -> bool {
        !matches!(self, Self::Guest)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
