use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    response::Html,
};

use crate::application::{AppError, HabitService};
use crate::storage::LogWithHabit;

/// Header carrying the reverse-proxy path prefix. The front proxy owns
/// this header; internal links on every page are built from it.
const INGRESS_HEADER: &str = "x-ingress-path";

/// Maintenance page shows at most this many recent logs.
const MAINTENANCE_LOG_LIMIT: i64 = 100;

/// Habit list.
pub async fn index(
    State(service): State<Arc<HabitService>>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let root = ingress_path(&headers);
    let habits = service.list_habits().await?;

    let mut body = format!(
        "<h1>Habits</h1>\n{}\n<ul class=\"habits\">\n",
        nav(&root)
    );
    for habit in &habits {
        body.push_str(&format!(
            "<li data-id=\"{}\">{} {}</li>\n",
            habit.id,
            escape(&habit.icon),
            escape(&habit.title)
        ));
    }
    body.push_str("</ul>\n");

    Ok(page("Habits", &body))
}

/// Full log history, newest first.
pub async fn report(
    State(service): State<Arc<HabitService>>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let root = ingress_path(&headers);
    let logs = service.recent_logs(None).await?;

    let mut body = format!("<h1>Report</h1>\n{}\n", nav(&root));
    body.push_str(&log_table(&logs));

    Ok(page("Report", &body))
}

/// Habits plus the most recent logs, for cleanup work.
pub async fn maintenance(
    State(service): State<Arc<HabitService>>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let root = ingress_path(&headers);
    let habits = service.list_habits().await?;
    let logs = service.recent_logs(Some(MAINTENANCE_LOG_LIMIT)).await?;

    let mut body = format!("<h1>Maintenance</h1>\n{}\n<h2>Habits</h2>\n<ul>\n", nav(&root));
    for habit in &habits {
        body.push_str(&format!(
            "<li data-id=\"{}\">{} {} (default {} min)</li>\n",
            habit.id,
            escape(&habit.icon),
            escape(&habit.title),
            habit.default_interval
        ));
    }
    body.push_str("</ul>\n<h2>Recent logs</h2>\n");
    body.push_str(&log_table(&logs));

    Ok(page("Maintenance", &body))
}

fn ingress_path(headers: &HeaderMap) -> String {
    headers
        .get(INGRESS_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string()
}

fn nav(root: &str) -> String {
    format!(
        "<nav><a href=\"{root}/\">Habits</a> <a href=\"{root}/report\">Report</a> \
         <a href=\"{root}/maintenance\">Maintenance</a></nav>"
    )
}

fn log_table(logs: &[LogWithHabit]) -> String {
    let mut table = String::from(
        "<table class=\"logs\">\n<tr><th>When</th><th>Habit</th><th>Minutes</th><th>Comment</th></tr>\n",
    );
    for entry in logs {
        table.push_str(&format!(
            "<tr data-id=\"{}\"><td>{}</td><td>{} {}</td><td>{}</td><td>{}</td></tr>\n",
            entry.log.id,
            entry.log.timestamp.format("%Y-%m-%d %H:%M"),
            escape(&entry.habit_icon),
            escape(&entry.habit_title),
            entry.log.interval,
            escape(entry.log.comment.as_deref().unwrap_or("")),
        ));
    }
    table.push_str("</table>\n");
    table
}

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body
    ))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
