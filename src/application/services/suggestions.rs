//! Debounced search-box suggestions
//!
//! Each keystroke in a search box becomes a call to [`SuggestionService::suggest`]
//! tagged with the box's field key. Only the newest call per field is allowed
//! to reach the backend: it waits out the debounce delay, and any newer call
//! for the same field cancels it, whether it is still waiting or already
//! fetching. A cancelled call resolves to [`SuggestOutcome::Superseded`] so a
//! slow response can never overwrite fresher suggestions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::domain::BackendError;
use crate::infrastructure::SearchBackend;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestOutcome {
    Ready(Vec<String>),
    /// A newer request for the same field replaced this one.
    Superseded,
}

struct Pending {
    ticket: u64,
    token: CancellationToken,
}

/// Deregisters a pending request when its caller finishes or goes away.
struct PendingGuard<'a> {
    pending: &'a DashMap<String, Pending>,
    field: String,
    ticket: u64,
    token: CancellationToken,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let ticket = self.ticket;
        self.pending
            .remove_if(&self.field, |_, pending| pending.ticket == ticket);
    }
}

pub struct SuggestionService {
    backend: Arc<dyn SearchBackend>,
    debounce: Duration,
    max_suggestions: usize,
    pending: DashMap<String, Pending>,
    next_ticket: AtomicU64,
}

impl SuggestionService {
    pub fn new(backend: Arc<dyn SearchBackend>, debounce: Duration, max_suggestions: usize) -> Self {
        Self {
            backend,
            debounce,
            max_suggestions,
            pending: DashMap::new(),
            next_ticket: AtomicU64::new(1),
        }
    }

    /// Number of fields with a request still waiting or fetching.
    pub fn pending_fields(&self) -> usize {
        self.pending.len()
    }

    pub async fn suggest(&self, field: Option<&str>, term: &str) -> Result<SuggestOutcome, BackendError> {
        let term = term.trim();

        let Some(field) = field else {
            if term.is_empty() {
                return Ok(SuggestOutcome::Ready(Vec::new()));
            }
            return self.fetch(term).await.map(SuggestOutcome::Ready);
        };

        // Registering first so that clearing the box also cancels a pending lookup.
        let guard = self.register(field);
        if term.is_empty() {
            return Ok(SuggestOutcome::Ready(Vec::new()));
        }

        tokio::select! {
            biased;
            _ = guard.token.cancelled() => return Ok(superseded(field)),
            _ = tokio::time::sleep(self.debounce) => {}
        }

        tokio::select! {
            biased;
            _ = guard.token.cancelled() => Ok(superseded(field)),
            result = self.fetch(term) => result.map(SuggestOutcome::Ready),
        }
    }

    fn register(&self, field: &str) -> PendingGuard<'_> {
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();

        let previous = self.pending.insert(
            field.to_string(),
            Pending {
                ticket,
                token: token.clone(),
            },
        );
        if let Some(previous) = previous {
            previous.token.cancel();
        }

        PendingGuard {
            pending: &self.pending,
            field: field.to_string(),
            ticket,
            token,
        }
    }

    async fn fetch(&self, term: &str) -> Result<Vec<String>, BackendError> {
        let mut suggestions = self.backend.suggestions(term).await?;
        suggestions.truncate(self.max_suggestions);
        Ok(suggestions)
    }
}

fn superseded(field: &str) -> SuggestOutcome {
    debug!(field, "Suggestion request superseded");
    metrics::counter!("suggestions_superseded_total").increment(1);
    SuggestOutcome::Superseded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SearchPage;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeBackend {
        terms: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SearchBackend for FakeBackend {
        async fn search(&self, _query: &str, _page: u32, _size: u32) -> Result<SearchPage, BackendError> {
            Ok(SearchPage::default())
        }

        async fn suggestions(&self, term: &str) -> Result<Vec<String>, BackendError> {
            self.terms.lock().unwrap().push(term.to_string());
            Ok((1..=7).map(|i| format!("{term} {i}")).collect())
        }
    }

    fn service(backend: Arc<FakeBackend>) -> Arc<SuggestionService> {
        Arc::new(SuggestionService::new(backend, Duration::from_millis(300), 5))
    }

    #[tokio::test(start_paused = true)]
    async fn results_are_capped() {
        let backend = Arc::new(FakeBackend::default());
        let outcome = service(backend).suggest(Some("home"), "ru").await.unwrap();

        match outcome {
            SuggestOutcome::Ready(list) => assert_eq!(list.len(), 5),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn newer_request_supersedes_pending_one() {
        let backend = Arc::new(FakeBackend::default());
        let service = service(backend.clone());

        let first = {
            let service = service.clone();
            tokio::spawn(async move { service.suggest(Some("home"), "ru").await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;

        let second = service.suggest(Some("home"), "rust").await.unwrap();
        let first = first.await.unwrap().unwrap();

        assert_eq!(first, SuggestOutcome::Superseded);
        assert!(matches!(second, SuggestOutcome::Ready(ref list) if list[0] == "rust 1"));
        assert_eq!(*backend.terms.lock().unwrap(), vec!["rust".to_string()]);
        assert_eq!(service.pending_fields(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn different_fields_do_not_interfere() {
        let backend = Arc::new(FakeBackend::default());
        let service = service(backend.clone());

        let (a, b) = tokio::join!(
            service.suggest(Some("home"), "ru"),
            service.suggest(Some("top-bar"), "py"),
        );

        assert!(matches!(a.unwrap(), SuggestOutcome::Ready(_)));
        assert!(matches!(b.unwrap(), SuggestOutcome::Ready(_)));
        assert_eq!(backend.terms.lock().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_the_box_cancels_pending_lookup() {
        let backend = Arc::new(FakeBackend::default());
        let service = service(backend.clone());

        let first = {
            let service = service.clone();
            tokio::spawn(async move { service.suggest(Some("home"), "ru").await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        let cleared = service.suggest(Some("home"), "   ").await.unwrap();
        assert_eq!(cleared, SuggestOutcome::Ready(Vec::new()));
        assert_eq!(first.await.unwrap().unwrap(), SuggestOutcome::Superseded);
        assert!(backend.terms.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn request_without_field_is_not_debounced() {
        let backend = Arc::new(FakeBackend::default());
        let service = SuggestionService::new(backend.clone(), Duration::from_secs(3600), 5);

        let outcome = service.suggest(None, "go").await.unwrap();
        assert!(matches!(outcome, SuggestOutcome::Ready(ref list) if list.len() == 5));
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_request_deregisters() {
        let backend = Arc::new(FakeBackend::default());
        let service = service(backend);

        let fut = service.suggest(Some("home"), "ru");
        let _ = tokio::time::timeout(Duration::from_millis(10), fut).await;
        assert_eq!(service.pending_fields(), 0);
    }
}
