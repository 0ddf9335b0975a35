//! Results page handler

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::api::common::ValidatedQuery;
use crate::api::dto::{ApiResponse, SearchViewParams};
use crate::application::{SearchService, SearchView};
use crate::domain::{parse_page, GatewayError, GatewayResult};
use crate::infrastructure::QueryStore;

#[derive(Clone)]
pub struct SearchState {
    pub search: Arc<SearchService>,
    pub sessions: Arc<dyn QueryStore>,
}

/// Страница результатов поиска
///
/// Возвращает карточки результатов и готовую пагинацию со ссылками.
/// Если указан `session`, запрос сохраняется в эту сессию до обращения к бэкенду.
#[utoipa::path(
    get,
    path = "/api/v1/search",
    tag = "Search",
    params(SearchViewParams),
    responses(
        (status = 200, description = "Модель страницы результатов", body = ApiResponse<SearchView>),
        (status = 400, description = "Пустой запрос"),
        (status = 404, description = "Сессия не найдена"),
        (status = 422, description = "Запрос длиннее 512 символов"),
        (status = 502, description = "Ошибка бэкенда"),
        (status = 504, description = "Бэкенд не ответил вовремя")
    )
)]
pub async fn search_page(
    State(state): State<SearchState>,
    ValidatedQuery(params): ValidatedQuery<SearchViewParams>,
) -> GatewayResult<Json<ApiResponse<SearchView>>> {
    if params.is_blank() {
        return Err(GatewayError::Validation("Query must not be empty".into()));
    }

    if let Some(session_id) = params.session {
        state
            .sessions
            .set_query(session_id, params.q.trim().to_string())
            .await?;
    }

    let page = parse_page(params.page.as_deref());
    let view = state.search.search_view(&params.q, page).await?;
    Ok(Json(ApiResponse::success(view)))
}
