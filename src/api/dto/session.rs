//! Search session DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Запрос на обновление строки поиска
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SetQueryRequest {
    /// Новый текст запроса (до 512 символов, может быть пустым)
    #[validate(length(max = 512, message = "query must be at most 512 characters"))]
    pub query: String,
}
