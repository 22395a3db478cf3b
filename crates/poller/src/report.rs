//! Notification text for the operator's chat.
//!
//! Pure functions — the driver decides what to do with the rendered text.

use sentinel_common::error::PollError;
use sentinel_common::types::{HomeworkRecord, ReviewStatus};

/// Sent when a successful query returned no status changes.
pub const NO_UPDATES: &str = "Новых статусов домашних работ нет.";

/// Render one homework record into its notification text.
pub fn render_status(record: &HomeworkRecord) -> Result<String, PollError> {
    let name = record
        .homework_name
        .as_deref()
        .ok_or(PollError::MissingField("homework_name"))?;

    // An absent status reads as an empty (and therefore unknown) code
    let code = record.status.as_deref().unwrap_or_default();
    let status = ReviewStatus::parse(code)
        .ok_or_else(|| PollError::UnknownStatus(code.to_string()))?;

    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {}",
        status.verdict()
    ))
}

/// Render a failed iteration into its notification text.
pub fn render_failure(error: &PollError) -> String {
    format!("Сбой в работе программы: {error}")
}
