//! Response validation and status translation.
//!
//! Both are pure functions over the decoded API body; the poller owns all
//! state and decides what to do with their results.

use serde_json::Value;

use crate::errors::BotError;
use crate::models::homework::{status_message, Homework, HomeworkStatus};

/// Check the shape of an API response and return its submission list.
///
/// The root must be an object carrying both `homeworks` and `current_date`,
/// and `homeworks` must be an array.
pub fn check_response(response: &Value) -> Result<&[Value], BotError> {
    let obj = response
        .as_object()
        .ok_or_else(|| BotError::Shape("ответ API не является словарём".into()))?;

    for key in ["homeworks", "current_date"] {
        if !obj.contains_key(key) {
            return Err(BotError::Shape(format!("нет ключа \"{}\"", key)));
        }
    }

    obj.get("homeworks")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| BotError::Shape("\"homeworks\" не является списком".into()))
}

/// Most recent submission, or `None` when there are no new statuses.
///
/// The API lists submissions newest first, so this is the first element.
pub fn extract_latest(response: &Value) -> Result<Option<Homework>, BotError> {
    let homeworks = check_response(response)?;
    let Some(first) = homeworks.first() else {
        return Ok(None);
    };

    if !first.is_object() {
        return Err(BotError::Shape("запись о работе не является словарём".into()));
    }
    serde_json::from_value(first.clone())
        .map(Some)
        .map_err(|e| BotError::Shape(format!("запись о работе повреждена: {}", e)))
}

/// Server-side timestamp to use as the next polling window, if present.
pub fn current_date(response: &Value) -> Option<i64> {
    response.get("current_date").and_then(Value::as_i64)
}

/// Turn a submission into the chat message announcing its status.
pub fn parse_status(homework: &Homework) -> Result<String, BotError> {
    let name = homework
        .homework_name
        .as_deref()
        .ok_or(BotError::MissingField("homework_name"))?;
    let raw = homework
        .status
        .as_deref()
        .ok_or(BotError::MissingField("status"))?;

    let status: HomeworkStatus = raw
        .parse()
        .map_err(|status| BotError::UnknownStatus { status })?;

    Ok(status_message(name, status))
}
