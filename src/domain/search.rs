//! Search result entities as returned by the backend

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One ranked document from the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    /// Адрес документа
    pub url: String,
    /// Заголовок документа
    #[serde(default, alias = "title")]
    pub doc_title: String,
    /// Краткое описание (бэкенд может не присылать)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Итоговая оценка ранжирования
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// One page of results plus the total page count
///
/// Missing fields in the backend payload default to an empty page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchPage {
    /// Результаты на текущей странице
    #[serde(default)]
    pub results: Vec<SearchHit>,
    /// Общее количество страниц
    #[serde(default)]
    pub pages: u32,
}

/// Backend suggestion payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestionList {
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Normalised user query
///
/// Holds the trimmed text; construction fails for blank input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub const MAX_LEN: usize = 512;

    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.chars().take(Self::MAX_LEN).collect()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
