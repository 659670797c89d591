use chrono::NaiveDateTime;

use crate::domain::{DEFAULT_ICON, Habit, HabitId, HabitLog, LogId};
use crate::storage::{LogWithHabit, Repository};

use super::AppError;
use super::reporting::{DailyTimeline, HabitBreakdown, StatsReport};

/// Maximum length of a log comment, in characters.
pub const MAX_COMMENT_LEN: usize = 200;

/// Format accepted for manually entered timestamps (minute precision).
pub const MANUAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Application service providing high-level operations for the habit
/// ledger. This is the primary interface for any client (HTTP, CLI, etc.).
pub struct HabitService {
    repo: Repository,
}

impl HabitService {
    /// Create a new habit service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo))
    }

    // ========================
    // Habit operations
    // ========================

    /// List all habits in insertion order.
    pub async fn list_habits(&self) -> Result<Vec<Habit>, AppError> {
        Ok(self.repo.list_habits().await?)
    }

    /// Create a new habit. The icon falls back to a placeholder glyph and
    /// the default interval to 0 when omitted.
    pub async fn create_habit(
        &self,
        title: String,
        icon: Option<String>,
        default_interval: Option<i64>,
    ) -> Result<Habit, AppError> {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::Validation("title must not be empty".to_string()));
        }

        let default_interval = default_interval.unwrap_or(0);
        if default_interval < 0 {
            return Err(AppError::Validation(
                "default_interval must not be negative".to_string(),
            ));
        }

        let icon = icon.unwrap_or_else(|| DEFAULT_ICON.to_string());

        let habit = Habit::new(title, icon, default_interval);
        self.repo.save_habit(&habit).await?;
        Ok(habit)
    }

    /// Delete a habit and every log referencing it, as one atomic unit.
    pub async fn delete_habit(&self, id: HabitId) -> Result<(), AppError> {
        let removed = self.repo.delete_habit_with_logs(id).await?;
        if removed == 0 {
            return Err(AppError::HabitNotFound(id.to_string()));
        }
        Ok(())
    }

    // ========================
    // Log operations
    // ========================

    /// Record an occurrence of a habit, stamped with the current time.
    /// An omitted interval inherits the habit's `default_interval`.
    pub async fn log_occurrence(
        &self,
        habit_id: HabitId,
        comment: Option<String>,
        interval: Option<i64>,
    ) -> Result<HabitLog, AppError> {
        let habit = self
            .repo
            .get_habit(habit_id)
            .await?
            .ok_or_else(|| AppError::HabitNotFound(habit_id.to_string()))?;

        let interval = interval.unwrap_or(habit.default_interval);
        validate_interval(interval)?;
        validate_comment(comment.as_deref())?;

        let log = HabitLog::new(habit.id, comment, interval);
        self.repo.save_log(&log).await?;
        Ok(log)
    }

    /// Record an occurrence with a caller-supplied timestamp in
    /// `YYYY-MM-DDTHH:MM` form. An omitted interval defaults to 0, not the
    /// habit's `default_interval` (intentional asymmetry with
    /// [`Self::log_occurrence`]).
    pub async fn log_manual(
        &self,
        habit_id: HabitId,
        timestamp: &str,
        comment: Option<String>,
        interval: Option<i64>,
    ) -> Result<HabitLog, AppError> {
        let timestamp = NaiveDateTime::parse_from_str(timestamp, MANUAL_TIMESTAMP_FORMAT)
            .map_err(|_| {
                AppError::Validation(format!(
                    "timestamp must match {}: {}",
                    MANUAL_TIMESTAMP_FORMAT, timestamp
                ))
            })?;

        let habit = self
            .repo
            .get_habit(habit_id)
            .await?
            .ok_or_else(|| AppError::HabitNotFound(habit_id.to_string()))?;

        let interval = interval.unwrap_or(0);
        validate_interval(interval)?;
        validate_comment(comment.as_deref())?;

        let log = HabitLog::with_timestamp(habit.id, timestamp, comment, interval);
        self.repo.save_log(&log).await?;
        Ok(log)
    }

    /// Delete a single log.
    pub async fn delete_log(&self, id: LogId) -> Result<(), AppError> {
        let removed = self.repo.delete_log(id).await?;
        if removed == 0 {
            return Err(AppError::LogNotFound(id.to_string()));
        }
        Ok(())
    }

    /// List logs newest-first with their habit's display fields,
    /// optionally capped at `limit` rows.
    pub async fn recent_logs(&self, limit: Option<i64>) -> Result<Vec<LogWithHabit>, AppError> {
        Ok(self.repo.list_logs(limit).await?)
    }

    // ========================
    // Stats
    // ========================

    /// Compute aggregate statistics across all habits.
    pub async fn stats(&self) -> Result<StatsReport, AppError> {
        let counts = self.repo.count_logs_per_habit().await?;
        let minutes = self.repo.sum_minutes_per_habit().await?;
        let daily = self.repo.count_logs_per_day().await?;

        // Both per-habit queries group and order identically, so the
        // arrays stay index-aligned by habit.
        let breakdown = HabitBreakdown {
            labels: counts.iter().map(|(title, _)| title.clone()).collect(),
            counts: counts.iter().map(|&(_, count)| count).collect(),
            minutes: minutes.into_iter().map(|(_, minutes)| minutes).collect(),
        };

        let (labels, data) = daily.into_iter().unzip();
        let timeline = DailyTimeline { labels, data };

        Ok(StatsReport {
            breakdown,
            timeline,
        })
    }
}

fn validate_interval(interval: i64) -> Result<(), AppError> {
    if interval < 0 {
        return Err(AppError::Validation(
            "interval must not be negative".to_string(),
        ));
    }
    Ok(())
}

fn validate_comment(comment: Option<&str>) -> Result<(), AppError> {
    if let Some(comment) = comment {
        if comment.chars().count() > MAX_COMMENT_LEN {
            return Err(AppError::Validation(format!(
                "comment must not exceed {} characters",
                MAX_COMMENT_LEN
            )));
        }
    }
    Ok(())
}
