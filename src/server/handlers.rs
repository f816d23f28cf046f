use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use super::auth::bearer_token;
use super::response::ApiResult;
use super::{AppState, SharedState};
use crate::db::Table;
use crate::error::{Result, TaskboardError};
use crate::models::{ListParams, UserProfile};
use crate::session::Session;
use crate::stats::Dashboard;
use crate::store::Repository;

/// Run a blocking store call off the async workers.
async fn blocking<T, F>(state: &SharedState, f: F) -> ApiResult<T>
where
    F: FnOnce(&AppState) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    let out = tokio::task::spawn_blocking(move || f(&*state))
        .await
        .map_err(|e| TaskboardError::internal(format!("storage task failed: {e}")))?;
    Ok(out?)
}

fn parse_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .map_err(|_| TaskboardError::validation(format!("id must be an integer, got '{raw}'")))
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &Bytes) -> Result<T> {
    Ok(serde_json::from_slice(body)?)
}

pub async fn list<R: Table>(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<R>>> {
    let items = blocking(&state, move |s| Repository::<R>::query(&s.store, &params)).await?;
    Ok(Json(items))
}

pub async fn show<R: Table>(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<R>> {
    let id = parse_id(&id)?;
    let item = blocking(&state, move |s| Repository::<R>::get(&s.store, id)).await?;
    Ok(Json(item))
}

pub async fn create<R: Table>(
    State(state): State<SharedState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<R>)> {
    let draft: R::Draft = parse_body(&body)?;
    let item = blocking(&state, move |s| Repository::<R>::create(&s.store, draft)).await?;
    tracing::info!(collection = R::COLLECTION, id = item.id(), "created");
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update<R: Table>(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<R>> {
    let id = parse_id(&id)?;
    let patch: R::Patch = parse_body(&body)?;
    let item = blocking(&state, move |s| Repository::<R>::update(&s.store, id, patch)).await?;
    tracing::info!(collection = R::COLLECTION, id, "updated");
    Ok(Json(item))
}

pub async fn remove<R: Table>(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;
    blocking(&state, move |s| Repository::<R>::delete(&s.store, id)).await?;
    tracing::info!(collection = R::COLLECTION, id, "deleted");
    Ok(Json(json!({
        "message": format!("{} deleted", R::LABEL),
        "id": id,
    })))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

pub async fn login(State(state): State<SharedState>, body: Bytes) -> ApiResult<Json<Session>> {
    let req: LoginRequest = parse_body(&body)?;
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(TaskboardError::validation("email and password are required").into());
    }
    let session = state.sessions.login(&state.config, &req.email, &req.password)?;
    Ok(Json(session))
}

pub async fn logout(State(state): State<SharedState>, headers: HeaderMap) -> ApiResult<Json<Value>> {
    if let Some(token) = bearer_token(&headers) {
        state.sessions.logout(token)?;
    }
    Ok(Json(json!({ "message": "Logged out" })))
}

/// The session's user; without a token and with auth off, the first configured user.
pub async fn current_user(
    State(state): State<SharedState>,
    session: Option<Extension<Session>>,
    headers: HeaderMap,
) -> ApiResult<Json<UserProfile>> {
    if let Some(Extension(session)) = session {
        return Ok(Json(session.user));
    }
    let token = bearer_token(&headers);
    if token.is_some() || state.config.require_auth {
        return Ok(Json(state.sessions.require(token)?.user));
    }
    let profile = state
        .config
        .default_profile()
        .ok_or_else(|| TaskboardError::unauthorized("No users configured"))?;
    Ok(Json(profile))
}

pub async fn dashboard(State(state): State<SharedState>) -> ApiResult<Json<Dashboard>> {
    let today = chrono::Local::now().date_naive();
    let dashboard = blocking(&state, move |s| s.store.dashboard(today)).await?;
    Ok(Json(dashboard))
}

pub async fn index(State(state): State<SharedState>) -> Json<Value> {
    let base = state.config.base_path();
    let endpoints: Vec<String> = ["login", "logout", "user", "dashboard", "tasks", "projects", "calendar", "members"]
        .iter()
        .map(|e| format!("{base}/{e}"))
        .collect();
    Json(json!({
        "message": "taskboard API",
        "version": crate::VERSION,
        "mode": state.store.mode(),
        "endpoints": endpoints,
    }))
}

pub async fn not_found() -> ApiResult<()> {
    Err(TaskboardError::new(crate::error::ErrorCode::NotFound, "No such endpoint").into())
}
