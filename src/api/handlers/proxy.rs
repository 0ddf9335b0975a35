//! Backend proxy handlers
//!
//! `/api/query` and `/api/suggest` keep the response shapes the browser
//! client already consumes, so they answer without the `ApiResponse` envelope.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use crate::api::dto::{ProxyError, QueryParams, SuggestParams};
use crate::application::{SearchService, SuggestOutcome, SuggestionService};
use crate::domain::{parse_page, BackendError, GatewayError, SearchPage};

#[derive(Clone)]
pub struct ProxyState {
    pub search: Arc<SearchService>,
    pub suggestions: Arc<SuggestionService>,
}

fn proxy_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ProxyError::new(status.as_u16(), message))).into_response()
}

/// Поиск через бэкенд
///
/// Страница в запросе начинается с 1; бэкенду передаётся страница с нуля
/// и размер страницы 10. Нечисловая страница считается первой.
#[utoipa::path(
    get,
    path = "/api/query",
    tag = "Proxy",
    params(QueryParams),
    responses(
        (status = 200, description = "Страница результатов", body = SearchPage),
        (status = 400, description = "Пустой запрос", body = ProxyError),
        (status = 500, description = "Внутренняя ошибка", body = ProxyError),
        (status = 502, description = "Бэкенд вернул ошибку (статус бэкенда сохраняется)", body = ProxyError)
    )
)]
pub async fn query(State(state): State<ProxyState>, Query(params): Query<QueryParams>) -> Response {
    let raw_query = params.q.unwrap_or_default();
    let page = parse_page(params.page.as_deref());

    match state.search.query(&raw_query, page).await {
        Ok(result) => Json(result).into_response(),
        Err(GatewayError::Validation(message)) => proxy_error(StatusCode::BAD_REQUEST, message),
        Err(GatewayError::Backend(BackendError::Status(code))) => {
            warn!(status = code, "Backend rejected search");
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_GATEWAY);
            proxy_error(status, "Backend error")
        }
        Err(err) => {
            warn!(error = %err, "Search proxy failed");
            proxy_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Something Went Wrong! {err}"),
            )
        }
    }
}

/// Подсказки для строки поиска
///
/// Возвращает не более 5 вариантов. Запросы с одинаковым `field` проходят
/// через задержку; более новый запрос отменяет ожидающий, и тот отвечает 204.
#[utoipa::path(
    get,
    path = "/api/suggest",
    tag = "Proxy",
    params(SuggestParams),
    responses(
        (status = 200, description = "Список подсказок", body = Vec<String>),
        (status = 204, description = "Запрос вытеснен более новым"),
        (status = 500, description = "Ошибка бэкенда, пустой список", body = Vec<String>)
    )
)]
pub async fn suggest(State(state): State<ProxyState>, Query(params): Query<SuggestParams>) -> Response {
    let term = params.q.unwrap_or_default();

    match state.suggestions.suggest(params.field.as_deref(), &term).await {
        Ok(SuggestOutcome::Ready(suggestions)) => Json(suggestions).into_response(),
        Ok(SuggestOutcome::Superseded) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            warn!(error = %err, "Suggestion proxy failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(Vec::<String>::new())).into_response()
        }
    }
}
