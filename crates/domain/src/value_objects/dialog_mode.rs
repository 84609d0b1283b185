//! Dialog mode - whether the rating prompt may be dismissed without a rating

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// How the rating dialog may be closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogMode {
    /// Cancel and outside-dismiss both close the dialog
    #[default]
    Dismissible,
    /// Only an accepted submission closes the dialog
    Enforced,
}

impl DialogMode {
    /// Whether an explicit cancel or outside-dismiss may close the dialog.
    pub fn allows_dismissal(&self) -> bool {
        matches!(self, Self::Dismissible)
    }

    pub fn is_enforced(&self) -> bool {
        matches!(self, Self::Enforced)
    }
}

impl std::fmt::Display for DialogMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DialogMode::Dismissible => write!(f, "dismissible"),
            DialogMode::Enforced => write!(f, "enforced"),
        }
    }
}

impl std::str::FromStr for DialogMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dismissible" | "optional" => Ok(DialogMode::Dismissible),
            "enforced" | "required" => Ok(DialogMode::Enforced),
            other => Err(DomainError::parse(format!("Unknown dialog mode: {other}"))),
        }
    }
}
