//! Per-run Fetch Deduplication
//!
//! Candidate workflows of one run share most of their tools. [`CachedSource`]
//! fetches each (registry, tool) pair once and hands out copies; concurrent
//! requests for the same tool wait on the same fetch.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use log::debug;
use tokio::sync::OnceCell;

use super::annotation::ToolAnnotation;
use super::source::MetadataSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Registry {
    Tool,
    Metrics,
}

type Slot = Arc<OnceCell<ToolAnnotation>>;

/// Deduplicating wrapper around another [`MetadataSource`].
pub struct CachedSource<S> {
    inner: S,
    slots: Mutex<HashMap<(Registry, String), Slot>>,
}

impl<S: MetadataSource> CachedSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Number of distinct (registry, tool) lookups started so far.
    pub fn len(&self) -> usize {
        self.slots.lock().map(|slots| slots.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // The map lock is released before the fetch is awaited.
    fn slot(&self, registry: Registry, tool_id: &str) -> Slot {
        let key = (registry, tool_id.to_lowercase());
        let mut slots = match self.slots.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Arc::clone(slots.entry(key).or_default())
    }

    async fn cached<F, Fut>(&self, registry: Registry, tool_id: &str, fetch: F) -> ToolAnnotation
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = ToolAnnotation>,
    {
        let slot = self.slot(registry, tool_id);
        if slot.initialized() {
            debug!("Reusing {:?} annotation for '{}'", registry, tool_id);
        }
        slot.get_or_init(fetch).await.relabeled(tool_id)
    }
}

#[async_trait]
impl<S: MetadataSource> MetadataSource for CachedSource<S> {
    async fn tool_annotation(&self, tool_id: &str) -> ToolAnnotation {
        self.cached(Registry::Tool, tool_id, || self.inner.tool_annotation(tool_id))
            .await
    }

    async fn metrics_annotation(&self, tool_id: &str) -> ToolAnnotation {
        self.cached(Registry::Metrics, tool_id, || {
            self.inner.metrics_annotation(tool_id)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MetadataSource for CountingSource {
        async fn tool_annotation(&self, tool_id: &str) -> ToolAnnotation {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            ToolAnnotation::new(tool_id, json!({"biotoolsID": tool_id.to_lowercase()}))
        }

        async fn metrics_annotation(&self, tool_id: &str) -> ToolAnnotation {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ToolAnnotation::empty(tool_id)
        }
    }

    #[tokio::test]
    async fn test_same_tool_fetched_once() {
        let cache = CachedSource::new(CountingSource::default());

        let first = cache.tool_annotation("Comet").await;
        let second = cache.tool_annotation("comet").await;

        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.tool_id(), "Comet");
        assert_eq!(second.tool_id(), "comet");
        assert_eq!(second.get("biotoolsID"), Some(&json!("comet")));
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_fetch() {
        let cache = CachedSource::new(CountingSource::default());

        let (a, b, c) = tokio::join!(
            cache.tool_annotation("xtandem"),
            cache.tool_annotation("XTandem"),
            cache.tool_annotation("xtandem"),
        );

        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 1);
        assert_eq!(a.get("biotoolsID"), b.get("biotoolsID"));
        assert_eq!(c.tool_id(), "xtandem");
    }

    #[tokio::test]
    async fn test_registries_cached_separately() {
        let cache = CachedSource::new(CountingSource::default());

        cache.tool_annotation("comet").await;
        cache.metrics_annotation("comet").await;
        cache.metrics_annotation("comet").await;

        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);
    }
}
