//! The pagination driver.
//!
//! [`drive`] requests pages `1, 2, 3, ...` through a caller-supplied page
//! source, concatenates their items, and stops when a page reports no more
//! pages, when the requested page number reaches the reported page count,
//! when the server answers 204, or when the [`RetryPolicy`] gives up.
//!
//! One failure counter is kept per traversal and it is never reset. Each
//! failure other than [`ApiError::NoContent`] increments it. Once it exceeds
//! `max_retries` the traversal returns the items gathered so far together with
//! the last error. Below that, [`RetryMode::Abandon`] returns the items
//! without an error, and [`RetryMode::RetryPage`] requests the same page again.

use std::future::Future;

use crate::config::{RetryMode, RetryPolicy};
use crate::rest::{ApiError, Collection, Page};

/// Runs one traversal to completion.
///
/// `fetch_page` is called with page numbers starting at 1. The page number
/// only advances after a page reported `has_more`, and never past the
/// reported `total_pages`, so a server that ignores the requested page still
/// ends the traversal.
pub async fn drive<T, F, Fut>(mut fetch_page: F, policy: &RetryPolicy) -> Collection<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>, ApiError>>,
{
    let mut items = Vec::new();
    let mut page: u32 = 1;
    let mut pages: u32 = 0;
    let mut failures: u32 = 0;

    loop {
        match fetch_page(page).await {
            Ok(result) => {
                pages += 1;
                let has_more = result.has_more && page < result.pagination.total_pages;
                tracing::debug!(page, items = result.items.len(), has_more, "Page received");
                items.extend(result.items);

                if !has_more {
                    tracing::debug!(total = items.len(), pages, "Traversal complete");
                    return Collection::complete(items, pages);
                }
                page += 1;
            }
            Err(ApiError::NoContent) => {
                tracing::debug!(page, total = items.len(), "No content, stopping");
                return Collection::failed(items, pages, ApiError::NoContent);
            }
            Err(error) => {
                failures += 1;

                let fatal = matches!(error, ApiError::Remote { .. }) && !policy.retry_remote_errors();
                if fatal || failures > policy.max_retries() {
                    tracing::warn!(
                        page,
                        failures,
                        max_retries = policy.max_retries(),
                        error = %error,
                        "Max retries reached"
                    );
                    return Collection::failed(items, pages, error);
                }

                tracing::warn!(
                    page,
                    attempt = failures,
                    max_retries = policy.max_retries(),
                    error = %error,
                    "Page request failed"
                );

                match policy.mode() {
                    RetryMode::Abandon => return Collection::complete(items, pages),
                    RetryMode::RetryPage => {
                        let delay = policy.retry_delay();
                        if !delay.is_zero() {
                            tokio::time::sleep(delay).await;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;
    use crate::rest::Pagination;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// A page source that answers from a script and records requested pages.
    struct Script {
        responses: RefCell<VecDeque<Result<Page<u32>, ApiError>>>,
        requested: RefCell<Vec<u32>>,
    }

    impl Script {
        fn new(responses: Vec<Result<Page<u32>, ApiError>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                requested: RefCell::new(Vec::new()),
            }
        }

        async fn fetch(&self, page: u32) -> Result<Page<u32>, ApiError> {
            self.requested.borrow_mut().push(page);
            self.responses
                .borrow_mut()
                .pop_front()
                .expect("driver requested more pages than scripted")
        }

        fn requested(&self) -> Vec<u32> {
            self.requested.borrow().clone()
        }
    }

    fn page(items: Vec<u32>, current: u32, total: u32) -> Result<Page<u32>, ApiError> {
        Ok(Page::new(
            items,
            Pagination {
                current_page: current,
                total_pages: total,
                ..Pagination::default()
            },
        ))
    }

    fn server_error() -> Result<Page<u32>, ApiError> {
        Err(ApiError::Response(HttpResponseError {
            code: 500,
            message: "boom".to_string(),
            error_reference: None,
        }))
    }

    fn remote_error() -> Result<Page<u32>, ApiError> {
        Err(ApiError::Remote {
            status: 429,
            title: "slow down".to_string(),
        })
    }

    #[tokio::test]
    async fn test_concatenates_pages_in_order() {
        let script = Script::new(vec![
            page(vec![1, 2], 1, 3),
            page(vec![3, 4], 2, 3),
            page(vec![5], 3, 3),
        ]);

        let collection = drive(|p| script.fetch(p), &RetryPolicy::default()).await;

        assert!(collection.is_complete());
        assert_eq!(*collection, vec![1, 2, 3, 4, 5]);
        assert_eq!(collection.pages(), 3);
        assert_eq!(script.requested(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_single_page_issues_one_request() {
        let script = Script::new(vec![page(vec![9], 1, 1)]);
        let collection = drive(|p| script.fetch(p), &RetryPolicy::default()).await;

        assert_eq!(*collection, vec![9]);
        assert_eq!(script.requested(), vec![1]);
    }

    #[tokio::test]
    async fn test_empty_first_page_is_complete() {
        let script = Script::new(vec![page(Vec::new(), 0, 0)]);
        let collection = drive(|p| script.fetch(p), &RetryPolicy::default()).await;

        assert!(collection.is_complete());
        assert!(collection.is_empty());
    }

    #[tokio::test]
    async fn test_stuck_current_page_still_terminates() {
        let script = Script::new(vec![
            page(vec![1], 1, 3),
            page(vec![1], 1, 3),
            page(vec![1], 1, 3),
            page(vec![1], 1, 3),
        ]);
        let collection = drive(|p| script.fetch(p), &RetryPolicy::default()).await;

        assert!(collection.is_complete());
        assert_eq!(*collection, vec![1, 1, 1]);
        assert_eq!(script.requested(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_no_content_stops_with_sentinel() {
        let script = Script::new(vec![page(vec![1], 1, 2), Err(ApiError::NoContent)]);
        let collection = drive(|p| script.fetch(p), &RetryPolicy::new(0)).await;

        assert_eq!(*collection, vec![1]);
        assert!(collection.error().unwrap().is_no_content());
        assert_eq!(script.requested(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_abandon_within_budget_returns_partial_without_error() {
        let script = Script::new(vec![page(vec![1, 2], 1, 3), server_error()]);
        let collection = drive(|p| script.fetch(p), &RetryPolicy::new(3)).await;

        assert!(collection.is_complete());
        assert_eq!(*collection, vec![1, 2]);
        assert_eq!(script.requested(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_zero_budget_attaches_first_failure() {
        let script = Script::new(vec![page(vec![1], 1, 3), server_error()]);
        let collection = drive(|p| script.fetch(p), &RetryPolicy::new(0)).await;

        assert_eq!(*collection, vec![1]);
        assert!(matches!(collection.error(), Some(ApiError::Response(_))));
        assert_eq!(script.requested(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_retry_page_requests_same_page_again() {
        let script = Script::new(vec![
            page(vec![1], 1, 2),
            server_error(),
            server_error(),
            page(vec![2], 2, 2),
        ]);
        let policy = RetryPolicy::new(2).with_mode(RetryMode::RetryPage);
        let collection = drive(|p| script.fetch(p), &policy).await;

        assert!(collection.is_complete());
        assert_eq!(*collection, vec![1, 2]);
        assert_eq!(script.requested(), vec![1, 2, 2, 2]);
    }

    #[tokio::test]
    async fn test_retry_counter_accumulates_across_pages() {
        let script = Script::new(vec![
            server_error(),
            page(vec![1], 1, 3),
            server_error(),
            page(vec![2], 2, 3),
            server_error(),
        ]);
        let policy = RetryPolicy::new(2).with_mode(RetryMode::RetryPage);
        let collection = drive(|p| script.fetch(p), &policy).await;

        assert_eq!(*collection, vec![1, 2]);
        assert!(collection.error().is_some());
        assert_eq!(script.requested(), vec![1, 1, 2, 2, 3]);
    }

    #[tokio::test]
    async fn test_remote_errors_can_be_fatal() {
        let script = Script::new(vec![page(vec![1], 1, 2), remote_error()]);
        let policy = RetryPolicy::new(5)
            .with_mode(RetryMode::RetryPage)
            .with_retry_remote_errors(false);
        let collection = drive(|p| script.fetch(p), &policy).await;

        assert_eq!(*collection, vec![1]);
        assert!(matches!(
            collection.error(),
            Some(ApiError::Remote { status: 429, .. })
        ));
        assert_eq!(script.requested(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_delay_is_awaited() {
        let script = Script::new(vec![server_error(), page(vec![7], 1, 1)]);
        let policy = RetryPolicy::new(1)
            .with_mode(RetryMode::RetryPage)
            .with_retry_delay(std::time::Duration::from_secs(30));

        let started = tokio::time::Instant::now();
        let collection = drive(|p| script.fetch(p), &policy).await;

        assert_eq!(*collection, vec![7]);
        assert!(started.elapsed() >= std::time::Duration::from_secs(30));
    }
}
