use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type HabitId = Uuid;

/// Icon assigned to habits created without one.
pub const DEFAULT_ICON: &str = "📝";

/// A trackable recurring activity definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub title: String,
    /// Short display glyph (usually an emoji)
    pub icon: String,
    /// Duration in minutes applied to logs that don't specify one
    pub default_interval: i64,
    pub created_at: DateTime<Utc>,
}

impl Habit {
    pub fn new(title: String, icon: String, default_interval: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            icon,
            default_interval,
            created_at: Utc::now(),
        }
    }
}
