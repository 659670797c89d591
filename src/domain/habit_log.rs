use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::HabitId;

pub type LogId = Uuid;

/// One recorded occurrence of a habit at a point in time.
///
/// Timestamps are naive wall-clock values: a manually entered timestamp
/// is persisted exactly as supplied, with no timezone conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitLog {
    pub id: LogId,
    pub habit_id: HabitId,
    pub timestamp: NaiveDateTime,
    pub comment: Option<String>,
    /// Duration in minutes
    pub interval: i64,
}

impl HabitLog {
    /// Create a log stamped with the current local time.
    pub fn new(habit_id: HabitId, comment: Option<String>, interval: i64) -> Self {
        Self::with_timestamp(habit_id, Local::now().naive_local(), comment, interval)
    }

    /// Create a log with a caller-supplied timestamp (manual entry).
    pub fn with_timestamp(
        habit_id: HabitId,
        timestamp: NaiveDateTime,
        comment: Option<String>,
        interval: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            habit_id,
            timestamp,
            comment,
            interval,
        }
    }
}
