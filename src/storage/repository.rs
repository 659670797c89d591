use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::domain::{Habit, HabitId, HabitLog, LogId};

use super::MIGRATION_001_INITIAL;

/// Storage format for log timestamps. Plain `YYYY-MM-DD HH:MM:SS` text so
/// SQLite's `date()` can group on the date component directly.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A log row joined with its parent habit's display fields.
#[derive(Debug, Clone)]
pub struct LogWithHabit {
    pub log: HabitLog,
    pub habit_title: String,
    pub habit_icon: String,
}

/// Repository for persisting and querying habits and their logs.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::raw_sql(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;

        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    // ========================
    // Habit operations
    // ========================

    /// Save a new habit to the database.
    pub async fn save_habit(&self, habit: &Habit) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO habits (id, title, icon, default_interval, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(habit.id.to_string())
        .bind(&habit.title)
        .bind(&habit.icon)
        .bind(habit.default_interval)
        .bind(habit.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save habit")?;
        Ok(())
    }

    /// Get a habit by ID.
    pub async fn get_habit(&self, id: HabitId) -> Result<Option<Habit>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, icon, default_interval, created_at
            FROM habits
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch habit")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_habit(&row)?)),
            None => Ok(None),
        }
    }

    /// List all habits in insertion order.
    pub async fn list_habits(&self) -> Result<Vec<Habit>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, icon, default_interval, created_at
            FROM habits
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list habits")?;

        rows.iter().map(Self::row_to_habit).collect()
    }

    /// Delete a habit and every log referencing it, as one transaction.
    /// Returns the number of habit rows removed (0 if the id was absent).
    pub async fn delete_habit_with_logs(&self, id: HabitId) -> Result<u64> {
        let id_str = id.to_string();

        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        sqlx::query("DELETE FROM habit_logs WHERE habit_id = ?")
            .bind(&id_str)
            .execute(&mut *tx)
            .await
            .context("Failed to delete habit logs")?;

        let result = sqlx::query("DELETE FROM habits WHERE id = ?")
            .bind(&id_str)
            .execute(&mut *tx)
            .await
            .context("Failed to delete habit")?;

        tx.commit().await.context("Failed to commit habit delete")?;

        Ok(result.rows_affected())
    }

    // ========================
    // Log operations
    // ========================

    /// Save a new habit log to the database.
    pub async fn save_log(&self, log: &HabitLog) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO habit_logs (id, habit_id, timestamp, comment, interval)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(log.id.to_string())
        .bind(log.habit_id.to_string())
        .bind(log.timestamp.format(TIMESTAMP_FORMAT).to_string())
        .bind(&log.comment)
        .bind(log.interval)
        .execute(&self.pool)
        .await
        .context("Failed to save log")?;
        Ok(())
    }

    /// Get a log by ID.
    pub async fn get_log(&self, id: LogId) -> Result<Option<HabitLog>> {
        let row = sqlx::query(
            r#"
            SELECT id, habit_id, timestamp, comment, interval
            FROM habit_logs
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch log")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_log(&row)?)),
            None => Ok(None),
        }
    }

    /// Delete a single log. Returns the number of rows removed.
    pub async fn delete_log(&self, id: LogId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM habit_logs WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete log")?;

        Ok(result.rows_affected())
    }

    /// List logs newest-first, joined with the parent habit's title and
    /// icon, optionally capped at `limit` rows.
    pub async fn list_logs(&self, limit: Option<i64>) -> Result<Vec<LogWithHabit>> {
        let mut query = String::from(
            r#"
            SELECT l.id, l.habit_id, l.timestamp, l.comment, l.interval, h.title, h.icon
            FROM habit_logs l
            JOIN habits h ON h.id = l.habit_id
            ORDER BY l.timestamp DESC, l.rowid DESC
            "#,
        );

        if let Some(lim) = limit {
            query.push_str(&format!(" LIMIT {}", lim));
        }

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list logs")?;

        rows.iter()
            .map(|row| {
                Ok(LogWithHabit {
                    log: Self::row_to_log(row)?,
                    habit_title: row.get("title"),
                    habit_icon: row.get("icon"),
                })
            })
            .collect()
    }

    // ========================
    // Stats aggregates
    // ========================

    /// Per-habit occurrence count, in habit insertion order.
    /// Habits with no logs appear with a count of 0.
    pub async fn count_logs_per_habit(&self) -> Result<Vec<(String, i64)>> {
        let rows = sqlx::query(
            r#"
            SELECT h.title, COUNT(l.id) AS count
            FROM habits h
            LEFT JOIN habit_logs l ON l.habit_id = h.id
            GROUP BY h.id
            ORDER BY h.rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to count logs per habit")?;

        Ok(rows
            .iter()
            .map(|row| (row.get("title"), row.get("count")))
            .collect())
    }

    /// Per-habit summed interval in minutes, in habit insertion order.
    /// Habits with no logs report 0, not NULL.
    pub async fn sum_minutes_per_habit(&self) -> Result<Vec<(String, i64)>> {
        let rows = sqlx::query(
            r#"
            SELECT h.title, COALESCE(SUM(l.interval), 0) AS minutes
            FROM habits h
            LEFT JOIN habit_logs l ON l.habit_id = h.id
            GROUP BY h.id
            ORDER BY h.rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to sum minutes per habit")?;

        Ok(rows
            .iter()
            .map(|row| (row.get("title"), row.get("minutes")))
            .collect())
    }

    /// Occurrence count per calendar day across all habits, ascending by
    /// day. Rows whose date component is NULL are dropped.
    pub async fn count_logs_per_day(&self) -> Result<Vec<(String, i64)>> {
        let rows = sqlx::query(
            r#"
            SELECT date(timestamp) AS day, COUNT(id) AS count
            FROM habit_logs
            GROUP BY day
            ORDER BY day
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to count logs per day")?;

        Ok(rows
            .iter()
            .filter_map(|row| {
                let day: Option<String> = row.get("day");
                day.map(|d| (d, row.get("count")))
            })
            .collect())
    }

    // ========================
    // Row mapping
    // ========================

    fn row_to_habit(row: &sqlx::sqlite::SqliteRow) -> Result<Habit> {
        let id_str: String = row.get("id");
        let created_at_str: String = row.get("created_at");

        Ok(Habit {
            id: Uuid::parse_str(&id_str).context("Invalid habit ID")?,
            title: row.get("title"),
            icon: row.get("icon"),
            default_interval: row.get("default_interval"),
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .context("Invalid created_at timestamp")?
                .with_timezone(&Utc),
        })
    }

    fn row_to_log(row: &sqlx::sqlite::SqliteRow) -> Result<HabitLog> {
        let id_str: String = row.get("id");
        let habit_id_str: String = row.get("habit_id");
        let timestamp_str: String = row.get("timestamp");

        Ok(HabitLog {
            id: Uuid::parse_str(&id_str).context("Invalid log ID")?,
            habit_id: Uuid::parse_str(&habit_id_str).context("Invalid habit ID")?,
            timestamp: NaiveDateTime::parse_from_str(&timestamp_str, TIMESTAMP_FORMAT)
                .context("Invalid timestamp")?,
            comment: row.get("comment"),
            interval: row.get("interval"),
        })
    }
}
