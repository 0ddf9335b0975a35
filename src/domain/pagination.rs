//! Page-window computation for the results pager
//!
//! Maps `(current_page, total_pages, max_visible_buttons)` to the ordered list
//! of page buttons and ellipsis separators shown under the search results.
//! The first and last page are always anchored; the remaining slots form a
//! window around the current page that slides toward the side with more room
//! near either end.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Smallest usable button budget: first, ellipsis, current, ellipsis, last.
pub const MIN_VISIBLE_BUTTONS: u32 = 5;
/// Upper bound on the button budget.
pub const MAX_VISIBLE_BUTTONS: u32 = 99;
/// Budget used when the caller does not specify one.
pub const DEFAULT_VISIBLE_BUTTONS: u32 = 7;

/// A single renderable element of the pager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaginationToken {
    /// Clickable page button (1-based)
    Page { number: u32 },
    /// Non-interactive separator standing for two or more hidden pages
    Ellipsis,
}

impl PaginationToken {
    pub fn page(number: u32) -> Self {
        Self::Page { number }
    }

    pub fn page_number(&self) -> Option<u32> {
        match self {
            Self::Page { number } => Some(*number),
            Self::Ellipsis => None,
        }
    }
}

/// Raw pager input as read from the query string
///
/// Values stay textual so that malformed input degrades to a disabled pager
/// instead of being rejected: a non-numeric current page means page 1, a
/// non-numeric total or button budget yields an empty window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct PaginationRequest {
    /// Текущая страница (1-based). По умолчанию: 1
    pub current_page: Option<String>,
    /// Общее количество страниц. По умолчанию: 0
    pub total_pages: Option<String>,
    /// Максимальное количество кнопок (не меньше 5). По умолчанию: 7
    pub max_visible_buttons: Option<String>,
}

impl PaginationRequest {
    pub fn new(current_page: i64, total_pages: i64, max_visible_buttons: i64) -> Self {
        Self {
            current_page: Some(current_page.to_string()),
            total_pages: Some(total_pages.to_string()),
            max_visible_buttons: Some(max_visible_buttons.to_string()),
        }
    }

    pub fn window(&self) -> PageWindow {
        let current = parse_page(self.current_page.as_deref());
        let total = parse_count(self.total_pages.as_deref(), 0);
        let budget = parse_count(
            self.max_visible_buttons.as_deref(),
            i64::from(DEFAULT_VISIBLE_BUTTONS),
        );

        match (total, budget) {
            (Some(total), Some(budget)) => page_window(current, total, budget),
            _ => PageWindow::disabled(),
        }
    }
}

/// Absent means `default`; present but not an integer means unusable.
fn parse_count(raw: Option<&str>, default: i64) -> Option<i64> {
    match raw.map(str::trim) {
        None | Some("") => Some(default),
        Some(value) => value.parse().ok(),
    }
}

/// Computed pager state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageWindow {
    /// Кнопки в порядке отображения
    pub tokens: Vec<PaginationToken>,
    /// Текущая страница после приведения к диапазону `[1, total_pages]`
    pub current_page: u32,
    /// Общее количество страниц
    pub total_pages: u32,
    /// Доступна ли кнопка «назад»
    pub has_previous: bool,
    /// Доступна ли кнопка «вперёд»
    pub has_next: bool,
}

impl PageWindow {
    /// Empty pager with both controls off.
    pub fn disabled() -> Self {
        Self {
            tokens: Vec::new(),
            current_page: 1,
            total_pages: 0,
            has_previous: false,
            has_next: false,
        }
    }

    /// Target of the "previous" control, if enabled.
    pub fn previous_page(&self) -> Option<u32> {
        self.has_previous
            .then(|| self.current_page.saturating_sub(1).max(1))
    }

    /// Target of the "next" control, if enabled.
    pub fn next_page(&self) -> Option<u32> {
        self.has_next
            .then(|| (self.current_page + 1).min(self.total_pages.max(1)))
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Compute the pager for the given position.
///
/// Negative input yields an empty, fully disabled window. A current page
/// outside `[1, total_pages]` is clamped for centering only; the
/// previous/next flags follow the page as given. When every page fits in the
/// requested budget all of them are listed; otherwise the budget is clamped
/// to `[MIN_VISIBLE_BUTTONS, MAX_VISIBLE_BUTTONS]` for the windowed layout.
pub fn page_window(current_page: i64, total_pages: i64, max_visible_buttons: i64) -> PageWindow {
    if current_page < 0 || total_pages < 0 || max_visible_buttons < 0 {
        return PageWindow::disabled();
    }
    let Ok(total) = u32::try_from(total_pages) else {
        return PageWindow::disabled();
    };

    let current = current_page.clamp(1, i64::from(total.max(1))) as u32;
    let tokens = if total_pages <= max_visible_buttons.max(i64::from(MIN_VISIBLE_BUTTONS)) {
        (1..=total).map(PaginationToken::page).collect()
    } else {
        let budget = max_visible_buttons.clamp(
            i64::from(MIN_VISIBLE_BUTTONS),
            i64::from(MAX_VISIBLE_BUTTONS),
        ) as u32;
        window_tokens(current, total, budget)
    };

    PageWindow {
        tokens,
        current_page: current,
        total_pages: total,
        has_previous: current_page > 1,
        has_next: current_page < total_pages,
    }
}

/// Windowed layout for `total > budget`.
fn window_tokens(current: u32, total: u32, budget: u32) -> Vec<PaginationToken> {
    // Slots between the two anchors and their separators.
    let width = budget - 4;
    let left = (width - 1) / 2;
    let right = width - 1 - left;

    let start = current.saturating_sub(left);
    let end = current.saturating_add(right);

    let mut tokens = Vec::with_capacity(budget as usize);
    if start <= 3 {
        // Near the start: the window absorbs page 2 and grows rightward.
        tokens.extend((1..=budget - 2).map(PaginationToken::page));
        tokens.push(PaginationToken::Ellipsis);
        tokens.push(PaginationToken::page(total));
    } else if end.saturating_add(2) >= total {
        // Near the end: mirror image.
        tokens.push(PaginationToken::page(1));
        tokens.push(PaginationToken::Ellipsis);
        tokens.extend((total - (budget - 3)..=total).map(PaginationToken::page));
    } else {
        tokens.push(PaginationToken::page(1));
        tokens.push(PaginationToken::Ellipsis);
        tokens.extend((start..=end).map(PaginationToken::page));
        tokens.push(PaginationToken::Ellipsis);
        tokens.push(PaginationToken::page(total));
    }
    tokens
}

/// Parse the `page` query parameter; absent or non-numeric input means page 1.
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(1)
}
