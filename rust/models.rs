use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::CycleError;

/// Review verdict reported by the API. Adding a status means adding a variant here;
/// validation and verdict text both come from this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = CycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(Self::Approved),
            "reviewing" => Ok(Self::Reviewing),
            "rejected" => Ok(Self::Rejected),
            other => Err(CycleError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated API answer.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub homeworks: Vec<Value>,
    pub current_date: Option<i64>,
}

impl ApiResponse {
    /// The API lists submissions newest first; only the head is inspected.
    pub fn latest(&self) -> Option<&Value> {
        self.homeworks.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub homework_name: String,
    pub status: HomeworkStatus,
}

impl StatusUpdate {
    pub fn message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.homework_name,
            self.status.verdict()
        )
    }
}

pub fn check_response(body: Value) -> Result<ApiResponse, CycleError> {
    let Value::Object(mut map) = body else {
        return Err(CycleError::NotAnObject);
    };

    let homeworks = match map.remove("homeworks") {
        Some(Value::Array(items)) => items,
        Some(_) => return Err(CycleError::HomeworksNotList),
        None => return Err(CycleError::MissingHomeworks),
    };

    let current_date = match map.get("current_date") {
        Some(value) => {
            let date = value.as_i64();
            if date.is_none() {
                tracing::warn!(current_date = %value, "Ignoring non-integer current_date");
            }
            date
        }
        None => None,
    };

    Ok(ApiResponse {
        homeworks,
        current_date,
    })
}

pub fn parse_status(record: &Value) -> Result<StatusUpdate, CycleError> {
    let status = record
        .get("status")
        .and_then(Value::as_str)
        .ok_or(CycleError::MissingField("status"))?;
    let homework_name = record
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or(CycleError::MissingField("homework_name"))?;

    Ok(StatusUpdate {
        homework_name: homework_name.to_string(),
        status: status.parse()?,
    })
}
