//! Page-at-a-time fetching and whole-collection aggregation.
//!
//! Paginated reference endpoints are consumed as a lazy, finite stream of
//! [`Page`]s. The stream ends right after the first page that reports no
//! successor, or right after the first failed fetch, so termination and
//! abort behaviour can be observed independently of aggregation.

use crate::error::Result;
use crate::reference::ResourceKind;
use async_trait::async_trait;
use futures::stream::{self, Stream, StreamExt};
use serde::{Deserialize, Serialize};

/// Index of the first page; the remote API is 1-based.
pub const FIRST_PAGE: u32 = 1;

/// One page of a collection resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, has_next: bool) -> Self {
        Self { items, has_next }
    }

    /// A terminal page with no items.
    pub fn empty() -> Self {
        Self::new(Vec::new(), false)
    }
}

/// A fully aggregated collection.
///
/// Built once from every page in ascending order and never mutated in
/// place; a re-fetch produces a new value that replaces the old one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Collection<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Fetches a single page of a paginated resource.
///
/// One call is one network round-trip. An empty page with `has_next =
/// false` is a valid answer, not an error.
#[async_trait]
pub trait PageFetcher<T>: Send + Sync {
    async fn fetch(&self, kind: ResourceKind, page_index: u32) -> Result<Page<T>>;
}

/// Fetches a non-paginated resource in a single request.
#[async_trait]
pub trait SinglePageLoader<T>: Send + Sync {
    async fn load(&self, kind: ResourceKind) -> Result<Vec<T>>;
}

/// Drives a [`PageFetcher`] from the first page until exhaustion.
pub struct CollectionAggregator<'a, T> {
    fetcher: &'a dyn PageFetcher<T>,
}

impl<'a, T: Send + 'a> CollectionAggregator<'a, T> {
    pub fn new(fetcher: &'a dyn PageFetcher<T>) -> Self {
        Self { fetcher }
    }

    /// Lazily yields pages of `kind` in ascending order.
    ///
    /// Nothing is fetched until the stream is polled. After a page with
    /// `has_next = false` or an `Err` item, the stream is finished.
    pub fn pages(&self, kind: ResourceKind) -> impl Stream<Item = Result<Page<T>>> + use<'a, T> {
        let fetcher = self.fetcher;
        stream::unfold(Some(FIRST_PAGE), move |next| async move {
            let page_index = next?;
            tracing::debug!("[Aggregator] Fetching {} page {}", kind, page_index);
            match fetcher.fetch(kind, page_index).await {
                Ok(page) => {
                    let following = page.has_next.then(|| page_index + 1);
                    Some((Ok(page), following))
                }
                Err(e) => Some((Err(e), None)),
            }
        })
    }

    /// Collects every page of `kind` into one [`Collection`].
    ///
    /// All-or-nothing: the first failed page aborts the aggregation and
    /// items gathered so far are dropped.
    pub async fn aggregate(&self, kind: ResourceKind) -> Result<Collection<T>> {
        let mut pages = std::pin::pin!(self.pages(kind));
        let mut items = Vec::new();
        let mut page_count = 0u32;

        while let Some(page) = pages.next().await {
            let page = page?;
            page_count += 1;
            items.extend(page.items);
        }

        tracing::info!(
            "[Aggregator] Loaded {} {} across {} page(s)",
            items.len(),
            kind,
            page_count
        );
        Ok(Collection::from(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CampusError;
    use std::sync::Mutex;

    /// Serves scripted pages in order and records requested indices.
    struct ScriptedFetcher {
        responses: Mutex<Vec<Result<Page<u32>>>>,
        requested: Mutex<Vec<(ResourceKind, u32)>>,
    }

    impl ScriptedFetcher {
        fn new(mut responses: Vec<Result<Page<u32>>>) -> Self {
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn requested_indices(&self) -> Vec<u32> {
            self.requested.lock().unwrap().iter().map(|(_, i)| *i).collect()
        }
    }

    #[async_trait]
    impl PageFetcher<u32> for ScriptedFetcher {
        async fn fetch(&self, kind: ResourceKind, page_index: u32) -> Result<Page<u32>> {
            self.requested.lock().unwrap().push((kind, page_index));
            self.responses
                .lock()
                .unwrap()
                .pop()
                .expect("fetched past the scripted pages")
        }
    }

    #[tokio::test]
    async fn aggregates_pages_in_order() {
        let fetcher = ScriptedFetcher::new(vec![
            Ok(Page::new(vec![1, 2], true)),
            Ok(Page::new(vec![3, 4], true)),
            Ok(Page::new(vec![5], false)),
        ]);

        let collection = CollectionAggregator::new(&fetcher)
            .aggregate(ResourceKind::Bulletins)
            .await
            .unwrap();

        assert_eq!(collection.as_slice(), &[1, 2, 3, 4, 5]);
        assert_eq!(fetcher.requested_indices(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn single_terminal_page_means_single_fetch() {
        let fetcher = ScriptedFetcher::new(vec![Ok(Page::new(vec![7], false))]);

        let collection = CollectionAggregator::new(&fetcher)
            .aggregate(ResourceKind::Faculties)
            .await
            .unwrap();

        assert_eq!(collection.len(), 1);
        assert_eq!(fetcher.requested_indices(), vec![1]);
    }

    #[tokio::test]
    async fn empty_terminal_page_is_not_an_error() {
        let fetcher = ScriptedFetcher::new(vec![Ok(Page::empty())]);

        let collection = CollectionAggregator::new(&fetcher)
            .aggregate(ResourceKind::Semesters)
            .await
            .unwrap();

        assert!(collection.is_empty());
    }

    #[tokio::test]
    async fn failure_aborts_without_further_fetches() {
        let fetcher = ScriptedFetcher::new(vec![
            Ok(Page::new(vec![1, 2], true)),
            Err(CampusError::transport("connection reset")),
            Ok(Page::new(vec![3], false)),
        ]);

        let result = CollectionAggregator::new(&fetcher)
            .aggregate(ResourceKind::Semesters)
            .await;

        let err = result.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(fetcher.requested_indices(), vec![1, 2]);
    }

    #[tokio::test]
    async fn page_stream_is_lazy_and_finite() {
        let fetcher = ScriptedFetcher::new(vec![
            Ok(Page::new(vec![1], true)),
            Ok(Page::new(vec![2], false)),
        ]);
        let aggregator = CollectionAggregator::new(&fetcher);

        let pages = aggregator.pages(ResourceKind::Bulletins);
        assert!(fetcher.requested_indices().is_empty());

        let pages: Vec<_> = pages.collect().await;
        assert_eq!(pages.len(), 2);
        assert!(!pages[1].as_ref().unwrap().has_next);
        assert_eq!(fetcher.requested_indices(), vec![1, 2]);
    }

    #[tokio::test]
    async fn page_stream_ends_after_error() {
        let fetcher = ScriptedFetcher::new(vec![Err(CampusError::status(503, "faculties"))]);
        let aggregator = CollectionAggregator::new(&fetcher);

        let pages: Vec<_> = aggregator.pages(ResourceKind::Faculties).collect().await;

        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_err());
    }
}
