//! Search session handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::api::common::ValidatedJson;
use crate::api::dto::{ApiResponse, EmptyData, SetQueryRequest};
use crate::domain::{GatewayError, GatewayResult, SearchSession};
use crate::infrastructure::QueryStore;

#[derive(Clone)]
pub struct SessionState {
    pub sessions: Arc<dyn QueryStore>,
}

/// Создание сессии поиска
///
/// Сессия хранит текст строки поиска отдельно для каждого клиента.
#[utoipa::path(
    post,
    path = "/api/v1/sessions",
    tag = "Sessions",
    responses(
        (status = 201, description = "Сессия создана", body = ApiResponse<SearchSession>)
    )
)]
pub async fn create_session(
    State(state): State<SessionState>,
) -> GatewayResult<(StatusCode, Json<ApiResponse<SearchSession>>)> {
    let session = state.sessions.create().await?;
    info!(session_id = %session.id, "Search session created");
    Ok((StatusCode::CREATED, Json(ApiResponse::success(session))))
}

/// Получение сессии
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{id}",
    tag = "Sessions",
    params(
        ("id" = Uuid, Path, description = "Идентификатор сессии")
    ),
    responses(
        (status = 200, description = "Сессия", body = ApiResponse<SearchSession>),
        (status = 404, description = "Сессия не найдена")
    )
)]
pub async fn get_session(
    State(state): State<SessionState>,
    Path(id): Path<Uuid>,
) -> GatewayResult<Json<ApiResponse<SearchSession>>> {
    let session = state
        .sessions
        .get(id)
        .await?
        .ok_or_else(|| GatewayError::session_not_found(id))?;
    Ok(Json(ApiResponse::success(session)))
}

/// Замена текста запроса в сессии
///
/// Пустая строка допустима: она очищает строку поиска.
#[utoipa::path(
    put,
    path = "/api/v1/sessions/{id}/query",
    tag = "Sessions",
    params(
        ("id" = Uuid, Path, description = "Идентификатор сессии")
    ),
    request_body = SetQueryRequest,
    responses(
        (status = 200, description = "Обновлённая сессия", body = ApiResponse<SearchSession>),
        (status = 404, description = "Сессия не найдена"),
        (status = 422, description = "Запрос длиннее 512 символов")
    )
)]
pub async fn set_session_query(
    State(state): State<SessionState>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<SetQueryRequest>,
) -> GatewayResult<Json<ApiResponse<SearchSession>>> {
    let session = state.sessions.set_query(id, request.query).await?;
    Ok(Json(ApiResponse::success(session)))
}

/// Удаление сессии
#[utoipa::path(
    delete,
    path = "/api/v1/sessions/{id}",
    tag = "Sessions",
    params(
        ("id" = Uuid, Path, description = "Идентификатор сессии")
    ),
    responses(
        (status = 200, description = "Сессия удалена", body = ApiResponse<EmptyData>),
        (status = 404, description = "Сессия не найдена")
    )
)]
pub async fn delete_session(
    State(state): State<SessionState>,
    Path(id): Path<Uuid>,
) -> GatewayResult<Json<ApiResponse<EmptyData>>> {
    state.sessions.remove(id).await?;
    info!(session_id = %id, "Search session removed");
    Ok(Json(ApiResponse::success(EmptyData {})))
}
