// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use habitledger::application::HabitService;
use habitledger::domain::HabitId;
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(HabitService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = HabitService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Create a habit with the given title and default interval, returning its id
pub async fn create_habit(
    service: &HabitService,
    title: &str,
    default_interval: i64,
) -> Result<HabitId> {
    let habit = service
        .create_habit(title.to_string(), None, Some(default_interval))
        .await?;
    Ok(habit.id)
}
