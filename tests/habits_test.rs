mod common;

use anyhow::Result;
use common::{create_habit, test_service};
use habitledger::application::AppError;
use habitledger::domain::DEFAULT_ICON;
use uuid::Uuid;

#[tokio::test]
async fn test_create_and_list_habit() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service
        .create_habit("Meditation".to_string(), Some("🧘".to_string()), Some(20))
        .await?;

    let habits = service.list_habits().await?;
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0].title, "Meditation");
    assert_eq!(habits[0].icon, "🧘");
    assert_eq!(habits[0].default_interval, 20);

    Ok(())
}

#[tokio::test]
async fn test_icon_defaults_to_placeholder() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let habit = service
        .create_habit("Reading".to_string(), None, None)
        .await?;
    assert_eq!(habit.icon, DEFAULT_ICON);
    assert_eq!(habit.default_interval, 0);

    let habits = service.list_habits().await?;
    assert_eq!(habits[0].icon, DEFAULT_ICON);

    Ok(())
}

#[tokio::test]
async fn test_create_habit_requires_title() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let err = service
        .create_habit("   ".to_string(), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    assert!(service.list_habits().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_create_habit_rejects_negative_default_interval() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let err = service
        .create_habit("Running".to_string(), None, Some(-5))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    Ok(())
}

#[tokio::test]
async fn test_habits_list_in_insertion_order() -> Result<()> {
    let (service, _temp) = test_service().await?;

    create_habit(&service, "First", 0).await?;
    create_habit(&service, "Second", 0).await?;
    create_habit(&service, "Third", 0).await?;

    let titles: Vec<String> = service
        .list_habits()
        .await?
        .into_iter()
        .map(|h| h.title)
        .collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);

    Ok(())
}

#[tokio::test]
async fn test_delete_habit_cascades_logs() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let habit_id = create_habit(&service, "Stretching", 10).await?;
    let kept_id = create_habit(&service, "Walking", 0).await?;

    service.log_occurrence(habit_id, None, None).await?;
    service.log_occurrence(habit_id, None, Some(5)).await?;
    service.log_occurrence(kept_id, None, Some(30)).await?;

    service.delete_habit(habit_id).await?;

    let habits = service.list_habits().await?;
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0].id, kept_id);

    // No orphaned logs survive the cascade
    let logs = service.recent_logs(None).await?;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].log.habit_id, kept_id);

    Ok(())
}

#[tokio::test]
async fn test_delete_missing_habit_is_not_found() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let err = service.delete_habit(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::HabitNotFound(_)));

    Ok(())
}
