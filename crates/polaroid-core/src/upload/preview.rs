use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::consts::PREVIEW_URL_SCHEME;

/// Tracks which local preview URLs are still valid.
///
/// A URL is live from the moment its [`PreviewHandle`] is created until the
/// handle is dropped. Anything holding a bare URL string can ask
/// [`PreviewRegistry::is_live`] before trusting it.
#[derive(Debug, Default)]
pub struct PreviewRegistry {
    live: Mutex<HashSet<String>>,
    next_id: AtomicU64,
}

impl PreviewRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Create a preview URL for a staged file.
    pub fn create(self: &Arc<Self>) -> PreviewHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let url = format!("{PREVIEW_URL_SCHEME}/{id}");
        self.lock().insert(url.clone());
        PreviewHandle {
            url,
            registry: Arc::clone(self),
        }
    }

    pub fn is_live(&self, url: &str) -> bool {
        self.lock().contains(url)
    }

    pub fn live_count(&self) -> usize {
        self.lock().len()
    }

    /// Returns `false` if the URL was already revoked.
    fn revoke(&self, url: &str) -> bool {
        let removed = self.lock().remove(url);
        if removed {
            debug!(url, "Preview released");
        }
        removed
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.live.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Owned preview URL. Released exactly once, when dropped.
#[derive(Debug)]
pub struct PreviewHandle {
    url: String,
    registry: Arc<PreviewRegistry>,
}

impl PreviewHandle {
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.registry.revoke(&self.url);
    }
}
