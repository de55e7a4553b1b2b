use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Review verdict reported by the status API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    pub fn code(self) -> &'static str {
        match self {
            Verdict::Approved => "approved",
            Verdict::Reviewing => "reviewing",
            Verdict::Rejected => "rejected",
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Verdict::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Verdict::Reviewing => "Работа взята на проверку ревьюером.",
            Verdict::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for Verdict {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(Verdict::Approved),
            "reviewing" => Ok(Verdict::Reviewing),
            "rejected" => Ok(Verdict::Rejected),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub name: String,
    pub status: Verdict,
}

impl HomeworkRecord {
    pub fn status_message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.name,
            self.status.text()
        )
    }
}

/// Unix timestamp passed to the API as `from_date`.
pub type PollCursor = i64;
