use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/tasks", get(handlers::list_tasks).post(handlers::add_task))
        .route("/api/tasks/:id/toggle", post(handlers::toggle_task))
        .route("/api/tasks/:id", delete(handlers::delete_task))
        .route("/api/progress", get(handlers::get_progress))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/countdown", get(handlers::get_countdown))
        .route("/api/motivation", get(handlers::get_motivation))
        .route("/api/export", get(handlers::export_data))
        .route("/api/import", post(handlers::import_data))
        .with_state(state)
}
