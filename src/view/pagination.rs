//! Pager render model
//!
//! Turns a [`PageWindow`] into links of the form `/search?q=<query>&page=<n>`.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{PageWindow, PaginationToken};

/// Separator drawn in place of hidden pages
pub const ELLIPSIS_GLYPH: &str = "…";

/// Build the results-page link for `query` at `page`.
pub fn page_href(query: &str, page: u32) -> String {
    let params = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("q", query)
        .append_pair("page", &page.to_string())
        .finish();
    format!("/search?{params}")
}

/// Элемент пагинации
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaginationItem {
    /// Ссылка на страницу
    Page {
        number: u32,
        href: String,
        /// Текущая страница (не кликабельна)
        current: bool,
    },
    /// Разделитель
    Ellipsis { glyph: String },
}

/// Ссылка «назад» / «вперёд»
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageLink {
    pub number: u32,
    pub href: String,
}

impl PageLink {
    fn new(query: &str, number: u32) -> Self {
        Self {
            number,
            href: page_href(query, number),
        }
    }
}

/// Готовая к отрисовке пагинация
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaginationView {
    pub items: Vec<PaginationItem>,
    /// `null`, если кнопка «назад» недоступна
    pub previous: Option<PageLink>,
    /// `null`, если кнопка «вперёд» недоступна
    pub next: Option<PageLink>,
}

impl PaginationView {
    pub fn new(query: &str, window: &PageWindow) -> Self {
        let items = window
            .tokens
            .iter()
            .map(|token| match *token {
                PaginationToken::Page { number } => PaginationItem::Page {
                    number,
                    href: page_href(query, number),
                    current: number == window.current_page,
                },
                PaginationToken::Ellipsis => PaginationItem::Ellipsis {
                    glyph: ELLIPSIS_GLYPH.to_string(),
                },
            })
            .collect();

        Self {
            items,
            previous: window.previous_page().map(|n| PageLink::new(query, n)),
            next: window.next_page().map(|n| PageLink::new(query, n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::page_window;

    #[test]
    fn href_encodes_query() {
        assert_eq!(page_href("rust & tokio", 3), "/search?q=rust+%26+tokio&page=3");
    }

    #[test]
    fn view_marks_current_page_and_links_neighbours() {
        let view = PaginationView::new("rust", &page_window(10, 20, 7));

        assert_eq!(view.items.len(), 7);
        assert_eq!(
            view.items[3],
            PaginationItem::Page {
                number: 10,
                href: "/search?q=rust&page=10".into(),
                current: true,
            }
        );
        assert_eq!(
            view.items[1],
            PaginationItem::Ellipsis {
                glyph: ELLIPSIS_GLYPH.into()
            }
        );
        assert_eq!(view.previous.as_ref().map(|l| l.number), Some(9));
        assert_eq!(view.next.as_ref().map(|l| l.href.as_str()), Some("/search?q=rust&page=11"));
    }

    #[test]
    fn empty_window_has_no_controls() {
        let view = PaginationView::new("rust", &page_window(1, 0, 7));
        assert!(view.items.is_empty());
        assert!(view.previous.is_none());
        assert!(view.next.is_none());
    }
}
