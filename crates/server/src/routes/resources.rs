use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use models::{RateRef, RateRefInput, Resource, ResourceInput};
use serde::Deserialize;

use crate::errors::JsonApiError;
use crate::state::AppState;

/// Total number of resources, sent alongside a listing page.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub position: Option<usize>,
    pub size: Option<usize>,
}

/// 列出资源（按 name、id 排序并分页）
pub async fn list_resources(State(state): State<AppState>, Query(q): Query<PageQuery>) -> Response {
    let window = state.window(q.position, q.size);
    let page = state.service.list_resources(window).await;
    let total = state.service.count_resources().await;
    let mut resp = Json(page).into_response();
    resp.headers_mut().insert(TOTAL_COUNT_HEADER, HeaderValue::from(total));
    resp
}

pub async fn create_resource(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<ResourceInput>,
) -> Result<(StatusCode, Json<Resource>), JsonApiError> {
    let principal = state.principal(&headers);
    let created = state.service.create_resource(&principal, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn read_resource(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Resource>, JsonApiError> {
    Ok(Json(state.service.read_resource(&id).await?))
}

pub async fn update_resource(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(input): Json<ResourceInput>,
) -> Result<Json<Resource>, JsonApiError> {
    let principal = state.principal(&headers);
    Ok(Json(state.service.update_resource(&principal, &id, input).await?))
}

pub async fn delete_resource(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, JsonApiError> {
    state.service.delete_resource(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_rate_refs(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(q): Query<PageQuery>,
) -> Result<Json<Vec<RateRef>>, JsonApiError> {
    let window = state.window(q.position, q.size);
    Ok(Json(state.service.list_rate_refs(&id, window).await?))
}

pub async fn create_rate_ref(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(input): Json<RateRefInput>,
) -> Result<(StatusCode, Json<RateRef>), JsonApiError> {
    let principal = state.principal(&headers);
    let created = state.service.create_rate_ref(&principal, &id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn read_rate_ref(
    State(state): State<AppState>,
    Path((id, rate_ref_id)): Path<(String, String)>,
) -> Result<Json<RateRef>, JsonApiError> {
    Ok(Json(state.service.read_rate_ref(&id, &rate_ref_id).await?))
}

pub async fn delete_rate_ref(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, rate_ref_id)): Path<(String, String)>,
) -> Result<StatusCode, JsonApiError> {
    let principal = state.principal(&headers);
    state.service.delete_rate_ref(&principal, &id, &rate_ref_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
