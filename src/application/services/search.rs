//! Search service
//!
//! Bridges the 1-based pages of the UI and the 0-based pages of the backend,
//! and assembles the results page model.

use std::sync::Arc;

use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::domain::{page_window, GatewayError, GatewayResult, SearchPage, SearchQuery};
use crate::infrastructure::SearchBackend;
use crate::view::{PaginationView, ResultCard};

/// Everything the results page needs for one render
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchView {
    /// Запрос после нормализации
    pub query: String,
    /// Текущая страница (1-based, приведённая к диапазону)
    pub page: u32,
    /// Общее количество страниц
    pub pages: u32,
    pub results: Vec<ResultCard>,
    pub pagination: PaginationView,
    /// Оценка общего числа результатов: карточек на странице × число страниц
    pub estimated_results: u64,
    /// Время ответа поискового сервиса, мс
    pub elapsed_ms: f64,
}

pub struct SearchService {
    backend: Arc<dyn SearchBackend>,
    results_per_page: u32,
    max_visible_buttons: u32,
}

impl SearchService {
    pub fn new(backend: Arc<dyn SearchBackend>, results_per_page: u32, max_visible_buttons: u32) -> Self {
        Self {
            backend,
            results_per_page,
            max_visible_buttons,
        }
    }

    /// Zero-based backend page for a 1-based UI page; anything below 1 maps to 0.
    pub fn backend_page(page: i64) -> u32 {
        u32::try_from(page.saturating_sub(1).max(0)).unwrap_or(u32::MAX)
    }

    fn parse_query(raw_query: &str) -> GatewayResult<SearchQuery> {
        SearchQuery::parse(raw_query)
            .ok_or_else(|| GatewayError::Validation("Query must not be empty".into()))
    }

    /// Fetch one page of raw results.
    pub async fn query(&self, raw_query: &str, page: i64) -> GatewayResult<SearchPage> {
        let query = Self::parse_query(raw_query)?;
        self.fetch(&query, page).await
    }

    async fn fetch(&self, query: &SearchQuery, page: i64) -> GatewayResult<SearchPage> {
        let backend_page = Self::backend_page(page);
        debug!(%query, page, backend_page, "Forwarding search");

        let result = self
            .backend
            .search(query.as_str(), backend_page, self.results_per_page)
            .await?;

        info!(%query, page, hits = result.results.len(), pages = result.pages, "Search completed");
        Ok(result)
    }

    /// Fetch a page and build the render model around it.
    pub async fn search_view(&self, raw_query: &str, page: i64) -> GatewayResult<SearchView> {
        let parsed = Self::parse_query(raw_query)?;

        let started = Instant::now();
        let result = self.fetch(&parsed, page).await?;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        let query = parsed.to_string();
        let estimated_results = result.results.len() as u64 * u64::from(result.pages.max(1));

        let window = page_window(page, i64::from(result.pages), i64::from(self.max_visible_buttons));
        let pagination = PaginationView::new(&query, &window);

        Ok(SearchView {
            page: window.current_page,
            pages: result.pages,
            results: result.results.into_iter().map(ResultCard::from).collect(),
            pagination,
            query,
            estimated_results,
            elapsed_ms,
        })
    }
}
