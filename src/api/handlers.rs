use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::Html,
};

use crate::session::{SessionHandle, UiEvent};
use crate::view::HtmlView;

use super::models::EventResponse;
use super::page;

pub async fn index_handler(State(session): State<SessionHandle>) -> Html<String> {
    let view = session.view.borrow().clone();
    Html(page::render_page(&view))
}

pub async fn view_handler(State(session): State<SessionHandle>) -> Json<HtmlView> {
    Json(session.view.borrow().clone())
}

pub async fn event_handler(
    State(session): State<SessionHandle>,
    Json(event): Json<UiEvent>,
) -> Result<(StatusCode, Json<EventResponse>), (StatusCode, String)> {
    let view = session.apply(event).await.map_err(|e| {
        tracing::error!("event dropped: {e}");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "Search session is not running".to_string(),
        )
    })?;

    Ok((
        StatusCode::OK,
        Json(EventResponse {
            accepted: true,
            view,
        }),
    ))
}
