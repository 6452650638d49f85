//! User listing, lookup and the gated removal endpoint

use crate::{
    error::{AppError, Result},
    gates::DATA_REMOVED_MESSAGE,
    models::request::MessageBody,
    extractors::QueryParams,
    pagination::PaginationRequest,
    store::UserRecord,
    AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

pub async fn handle_list_users(
    State(state): State<AppState>,
    query: QueryParams,
) -> Json<Vec<UserRecord>> {
    let page = PaginationRequest::parse(query.get("limit"), query.get("offset"));

    info!(
        "GET /users - limit: {:?}, offset: {:?}",
        page.limit, page.offset
    );

    let records = state.users.records();
    Json(page.apply(&records).to_vec())
}

pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<String>> {
    info!("GET /users/{}", id);

    state
        .users
        .get(&id)
        .map(|user| Json(user.name.clone()))
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
}

/// Reached only after the delete-protection gates pass. Nothing is removed;
/// the store is read-only.
pub async fn handle_remove_user(Path(id): Path<String>) -> Json<MessageBody> {
    info!("DELETE /users/{} - gates passed", id);

    Json(MessageBody::new(DATA_REMOVED_MESSAGE))
}
