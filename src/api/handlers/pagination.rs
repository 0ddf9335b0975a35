//! Pager calculator endpoint

use axum::{extract::Query, Json};

use crate::api::dto::ApiResponse;
use crate::domain::{PageWindow, PaginationRequest};

/// Расчёт кнопок пагинации
///
/// Первая и последняя страницы видны всегда, пропуски заменяются многоточием.
/// Некорректные значения приводятся к допустимым, ошибка не возвращается:
/// нечисловая текущая страница считается первой, нечисловое число страниц
/// или кнопок даёт пустую пагинацию.
#[utoipa::path(
    get,
    path = "/api/v1/pagination",
    tag = "Pagination",
    params(PaginationRequest),
    responses(
        (status = 200, description = "Набор кнопок пагинации", body = ApiResponse<PageWindow>)
    )
)]
pub async fn calculate_pagination(
    Query(request): Query<PaginationRequest>,
) -> Json<ApiResponse<PageWindow>> {
    Json(ApiResponse::success(request.window()))
}
