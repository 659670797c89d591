mod common;

use anyhow::Result;
use common::{create_habit, test_service};
use habitledger::application::AppError;
use uuid::Uuid;

#[tokio::test]
async fn test_log_against_missing_habit_persists_nothing() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let err = service
        .log_occurrence(Uuid::new_v4(), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::HabitNotFound(_)));

    assert!(service.recent_logs(None).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_log_inherits_default_interval() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let habit_id = create_habit(&service, "Meditation", 20).await?;

    let inherited = service.log_occurrence(habit_id, None, None).await?;
    assert_eq!(inherited.interval, 20);

    let explicit = service.log_occurrence(habit_id, None, Some(15)).await?;
    assert_eq!(explicit.interval, 15);

    Ok(())
}

#[tokio::test]
async fn test_log_stores_comment() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let habit_id = create_habit(&service, "Reading", 0).await?;
    service
        .log_occurrence(habit_id, Some("chapter 3".to_string()), None)
        .await?;

    let logs = service.recent_logs(None).await?;
    assert_eq!(logs[0].log.comment.as_deref(), Some("chapter 3"));

    Ok(())
}

#[tokio::test]
async fn test_log_rejects_overlong_comment() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let habit_id = create_habit(&service, "Reading", 0).await?;
    let err = service
        .log_occurrence(habit_id, Some("x".repeat(201)), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    Ok(())
}

#[tokio::test]
async fn test_manual_log_preserves_timestamp_verbatim() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let habit_id = create_habit(&service, "Meditation", 20).await?;
    let log = service
        .log_manual(habit_id, "2024-01-05T09:30", None, None)
        .await?;

    assert_eq!(log.timestamp.format("%Y-%m-%dT%H:%M").to_string(), "2024-01-05T09:30");
    // Manual entries default to 0, not the habit's default_interval
    assert_eq!(log.interval, 0);

    // The stored row round-trips with no timezone shift
    let logs = service.recent_logs(None).await?;
    assert_eq!(
        logs[0].log.timestamp.format("%Y-%m-%dT%H:%M").to_string(),
        "2024-01-05T09:30"
    );

    Ok(())
}

#[tokio::test]
async fn test_manual_log_explicit_interval() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let habit_id = create_habit(&service, "Running", 45).await?;
    let log = service
        .log_manual(habit_id, "2024-02-10T18:00", None, Some(25))
        .await?;
    assert_eq!(log.interval, 25);

    Ok(())
}

#[tokio::test]
async fn test_manual_log_rejects_bad_timestamp() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let habit_id = create_habit(&service, "Running", 0).await?;
    let err = service
        .log_manual(habit_id, "05/01/2024 09:30", None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    assert!(service.recent_logs(None).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_manual_log_against_missing_habit() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let err = service
        .log_manual(Uuid::new_v4(), "2024-01-05T09:30", None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::HabitNotFound(_)));

    Ok(())
}

#[tokio::test]
async fn test_delete_log() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let habit_id = create_habit(&service, "Walking", 0).await?;
    let log = service.log_occurrence(habit_id, None, None).await?;

    service.delete_log(log.id).await?;
    assert!(service.recent_logs(None).await?.is_empty());

    // Deleting again is a not-found failure
    let err = service.delete_log(log.id).await.unwrap_err();
    assert!(matches!(err, AppError::LogNotFound(_)));

    Ok(())
}

#[tokio::test]
async fn test_recent_logs_newest_first_with_limit() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let habit_id = create_habit(&service, "Walking", 0).await?;
    service
        .log_manual(habit_id, "2024-03-01T08:00", None, None)
        .await?;
    service
        .log_manual(habit_id, "2024-03-03T08:00", None, None)
        .await?;
    service
        .log_manual(habit_id, "2024-03-02T08:00", None, None)
        .await?;

    let all = service.recent_logs(None).await?;
    let days: Vec<String> = all
        .iter()
        .map(|entry| entry.log.timestamp.format("%Y-%m-%d").to_string())
        .collect();
    assert_eq!(days, vec!["2024-03-03", "2024-03-02", "2024-03-01"]);

    let capped = service.recent_logs(Some(2)).await?;
    assert_eq!(capped.len(), 2);
    assert_eq!(
        capped[0].log.timestamp.format("%Y-%m-%d").to_string(),
        "2024-03-03"
    );

    // Joined habit display fields come along for rendering
    assert_eq!(capped[0].habit_title, "Walking");

    Ok(())
}
