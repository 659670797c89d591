use serde::{Deserialize, Serialize};

/// Aggregate statistics over all habits, computed fresh on each call.
///
/// The breakdown arrays are index-aligned: `labels[i]`, `counts[i]` and
/// `minutes[i]` all describe the same habit, in habit insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsReport {
    pub breakdown: HabitBreakdown,
    pub timeline: DailyTimeline,
}

/// Per-habit occurrence counts and summed minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitBreakdown {
    pub labels: Vec<String>,
    pub counts: Vec<i64>,
    pub minutes: Vec<i64>,
}

/// Occurrences per calendar day across all habits, ascending by day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyTimeline {
    pub labels: Vec<String>,
    pub data: Vec<i64>,
}
