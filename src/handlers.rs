use crate::calendar::{month_view, navigate_month, MonthView};
use crate::countdown::{countdown, Countdown};
use crate::errors::{AppError, StoreError};
use crate::ledger::Tier;
use crate::models::{
    AddTaskRequest, CalendarQuery, DateQuery, DayKey, DayView, ImportResponse,
    MotivationResponse, ProgressEntry,
};
use crate::motivation::prompt;
use crate::state::AppState;
use crate::storage::{persist_data, LocalStorage};
use crate::tracker::Tracker;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use chrono::{Datelike, Local};
use tracing::{error, info, warn};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = Local::now().date_naive();
    Html(render_index(today, state.config.countdown_target))
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<DayView>, AppError> {
    let day = resolve_day(query.date.as_deref())?;
    let tracker = state.tracker.lock().await;
    Ok(Json(day_view(&tracker, day)?))
}

pub async fn add_task(
    State(state): State<AppState>,
    Json(payload): Json<AddTaskRequest>,
) -> Result<Json<DayView>, AppError> {
    let day = resolve_day(payload.date.as_deref())?;
    let mut tracker = state.tracker.lock().await;
    let before = tracker.storage().clone();
    if tracker.add_task(&day, &payload.text)?.is_some() {
        commit(&state, &mut tracker, before).await?;
    }
    Ok(Json(day_view(&tracker, day)?))
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(query): Query<DateQuery>,
) -> Result<Json<DayView>, AppError> {
    let day = resolve_day(query.date.as_deref())?;
    let mut tracker = state.tracker.lock().await;
    let before = tracker.storage().clone();
    if tracker.toggle_task(&day, id)?.is_some() {
        commit(&state, &mut tracker, before).await?;
    }
    Ok(Json(day_view(&tracker, day)?))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(query): Query<DateQuery>,
) -> Result<Json<DayView>, AppError> {
    let day = resolve_day(query.date.as_deref())?;
    let mut tracker = state.tracker.lock().await;
    let before = tracker.storage().clone();
    if tracker.delete_task(&day, id)?.is_some() {
        commit(&state, &mut tracker, before).await?;
    }
    Ok(Json(day_view(&tracker, day)?))
}

pub async fn get_progress(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<ProgressEntry>, AppError> {
    let day = resolve_day(query.date.as_deref())?;
    let tracker = state.tracker.lock().await;
    tracker
        .progress(&day)?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("no progress recorded for {day}")))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<MonthView>, AppError> {
    let today = Local::now().date_naive();
    let month = query.month.unwrap_or(today.month());
    if !(1..=12).contains(&month) {
        return Err(AppError::bad_request("month must be between 1 and 12"));
    }
    let (year, month) = navigate_month(
        query.year.unwrap_or(today.year()),
        month,
        query.offset.unwrap_or(0),
    )
    .ok_or_else(|| AppError::bad_request("year is out of range"))?;

    let tracker = state.tracker.lock().await;
    month_view(&tracker, year, month)
        .map(Json)
        .ok_or_else(|| AppError::bad_request("year is out of range"))
}

pub async fn get_countdown(State(state): State<AppState>) -> Json<Countdown> {
    Json(countdown(state.config.countdown_target))
}

pub async fn get_motivation(
    State(state): State<AppState>,
) -> Result<Json<MotivationResponse>, AppError> {
    let tracker = state.tracker.lock().await;
    let progress = tracker.progress(&DayKey::today())?;
    let quote = prompt(progress.as_ref(), state.config.quote_hour).map(str::to_string);
    Ok(Json(MotivationResponse { quote }))
}

pub async fn export_data(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let tracker = state.tracker.lock().await;
    let snapshot = tracker.export()?;
    Ok(([(header::CONTENT_TYPE, "application/json")], snapshot))
}

pub async fn import_data(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    let before = tracker.storage().clone();
    let imported = tracker.import(&body)?;
    if imported {
        commit(&state, &mut tracker, before).await?;
        info!(entries = tracker.storage().len(), "import persisted");
    } else {
        warn!("rejected malformed import payload");
    }
    Ok(Json(ImportResponse { imported }))
}

/// Writes the snapshot file, reverting the in-memory change if that fails.
async fn commit(
    state: &AppState,
    tracker: &mut Tracker<LocalStorage>,
    before: LocalStorage,
) -> Result<(), AppError> {
    if let Err(err) = persist_data(&state.data_path, tracker.storage()).await {
        error!("failed to persist data, reverting change: {err}");
        tracker.restore_storage(before);
        return Err(err.into());
    }
    Ok(())
}

fn resolve_day(date: Option<&str>) -> Result<DayKey, AppError> {
    match date {
        None => Ok(DayKey::today()),
        Some(raw) => DayKey::parse(raw)
            .ok_or_else(|| AppError::bad_request(format!("invalid date '{raw}'"))),
    }
}

fn day_view(tracker: &Tracker<LocalStorage>, day: DayKey) -> Result<DayView, StoreError> {
    let tasks = tracker.list_tasks(&day)?;
    let progress = tracker.progress(&day)?;
    let percent = progress.as_ref().map(ProgressEntry::percent).unwrap_or(0);
    let tier = progress.as_ref().map(ProgressEntry::tier).unwrap_or(Tier::Empty);
    Ok(DayView {
        date: day,
        tasks,
        progress,
        percent,
        tier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::http::StatusCode;
    use chrono::NaiveDateTime;

    fn state_at(data_path: std::path::PathBuf) -> AppState {
        let config = Config {
            port: 0,
            data_path,
            countdown_target: NaiveDateTime::default(),
            quote_hour: 22,
            storage_quota: LocalStorage::DEFAULT_QUOTA,
        };
        AppState::new(config, LocalStorage::default())
    }

    fn calendar_query(
        year: Option<i32>,
        month: Option<u32>,
        offset: Option<i32>,
    ) -> CalendarQuery {
        CalendarQuery {
            year,
            month,
            offset,
        }
    }

    async fn calendar_status(state: &AppState, query: CalendarQuery) -> StatusCode {
        match get_calendar(State(state.clone()), Query(query)).await {
            Ok(_) => StatusCode::OK,
            Err(err) => err.status,
        }
    }

    #[tokio::test]
    async fn calendar_rejects_months_outside_the_year() {
        let state = state_at(std::env::temp_dir().join("daily_tracker_unused.json"));
        for month in [0, 13, 25] {
            let query = calendar_query(Some(2026), Some(month), None);
            let status = calendar_status(&state, query).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "month={month}");
        }

        let Json(view) = get_calendar(
            State(state.clone()),
            Query(calendar_query(Some(2026), Some(12), Some(1))),
        )
        .await
        .unwrap();
        assert_eq!(view.label, "January 2027");
    }

    #[tokio::test]
    async fn calendar_rejects_out_of_range_years() {
        let state = state_at(std::env::temp_dir().join("daily_tracker_unused.json"));
        for (year, offset) in [(i32::MAX, None), (i32::MAX, Some(12)), (i32::MIN, Some(-1))] {
            let query = calendar_query(Some(year), Some(1), offset);
            let status = calendar_status(&state, query).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "year={year}");
        }
    }

    #[tokio::test]
    async fn failed_save_reverts_the_change() {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let missing_dir = std::env::temp_dir().join(format!("daily_tracker_missing_{nanos}"));
        let state = state_at(missing_dir.join("state.json"));
        let date = Some("2026-10-19".to_string());

        let err = add_task(
            State(state.clone()),
            Json(AddTaskRequest {
                text: "lost".to_string(),
                date: date.clone(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);

        let Json(view) = list_tasks(State(state.clone()), Query(DateQuery { date }))
            .await
            .unwrap();
        assert!(view.tasks.is_empty());
        assert!(view.progress.is_none());

        let err = import_data(State(state.clone()), r#"{"tasks_x": "[]"}"#.to_string())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(state.tracker.lock().await.storage().is_empty());
    }
}
