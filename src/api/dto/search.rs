//! Search and suggestion DTOs

use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::domain::SearchQuery;

/// Параметры прокси-поиска `/api/query`
///
/// Значения читаются без строгой проверки: нечисловая страница считается первой.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct QueryParams {
    /// Поисковый запрос
    pub q: Option<String>,
    /// Номер страницы (начиная с 1). По умолчанию: 1
    pub page: Option<String>,
}

/// Параметры подсказок `/api/suggest`
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SuggestParams {
    /// Введённый текст
    pub q: Option<String>,
    /// Ключ поля ввода. Новый запрос с тем же ключом отменяет предыдущий
    pub field: Option<String>,
}

/// Параметры страницы результатов `/api/v1/search`
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct SearchViewParams {
    /// Поисковый запрос (1–512 символов)
    #[validate(length(min = 1, max = 512, message = "query must be 1-512 characters"))]
    pub q: String,
    /// Номер страницы (начиная с 1). По умолчанию: 1
    pub page: Option<String>,
    /// Сессия, в которую будет записан запрос
    pub session: Option<Uuid>,
}

impl SearchViewParams {
    /// Whether the query is blank once surrounding whitespace is removed.
    pub fn is_blank(&self) -> bool {
        SearchQuery::parse(&self.q).is_none()
    }
}
