//! Object access gateway: tenant key namespacing plus the bounded
//! download-URL cache.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use lru::LruCache;
use tracing::debug;

use reelroom_core::{Error, Result};

use crate::signer::{UrlSigner, URL_TTL_SECS};

/// Default capacity of the download-URL cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

#[derive(Clone)]
struct CachedUrl {
    url: String,
    /// Unix seconds after which the cached entry is stale. The URL itself
    /// remains valid until its signed lifetime, so an entry served near
    /// expiry carries a shorter remaining validity — an accepted staleness
    /// window in exchange for fewer signing calls.
    expiry: u64,
}

/// Issues time-boxed upload/download URLs with tenant-namespaced keys.
///
/// Download URLs are cached in a bounded LRU (capacity-evicted, safe for
/// concurrent use from parallel requests); upload URLs are never cached.
/// This is the only shared mutable state in the process.
pub struct ObjectGateway {
    signer: Arc<dyn UrlSigner>,
    cache: Mutex<LruCache<String, CachedUrl>>,
}

impl ObjectGateway {
    pub fn new(signer: Arc<dyn UrlSigner>) -> Self {
        Self::with_capacity(signer, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(signer: Arc<dyn UrlSigner>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity clamped to >= 1");
        Self {
            signer,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Namespace a logical key under its tenant so two tenants can never
    /// collide or reference each other's objects, even with equal
    /// filenames.
    pub fn scoped_key(tenant_id: &str, logical_key: &str) -> String {
        format!("{tenant_id}/{logical_key}")
    }

    /// Issue a signed upload URL (single-use intent, 1 hour). Not cached.
    pub async fn issue_upload_url(
        &self,
        tenant_id: &str,
        logical_key: &str,
        content_type: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<String> {
        let key = Self::scoped_key(tenant_id, logical_key);
        let expires_at = unix_now()? + URL_TTL_SECS;
        self.signer
            .sign_upload(&key, content_type, metadata, expires_at)
            .await
    }

    /// Issue a signed download URL (1 hour), served from the cache when a
    /// fresh entry exists.
    pub async fn issue_download_url(&self, tenant_id: &str, logical_key: &str) -> Result<String> {
        let now = unix_now()?;
        self.issue_download_url_at(tenant_id, logical_key, now).await
    }

    /// Cache-aware issuance with an explicit clock, so expiry behavior is
    /// testable without sleeping.
    pub async fn issue_download_url_at(
        &self,
        tenant_id: &str,
        logical_key: &str,
        now: u64,
    ) -> Result<String> {
        let key = Self::scoped_key(tenant_id, logical_key);

        if let Some(cached) = self
            .cache
            .lock()
            .expect("url cache lock poisoned")
            .get(&key)
            .cloned()
        {
            if now < cached.expiry {
                debug!(
                    subsystem = "blob",
                    component = "gateway",
                    op = "issue_download_url",
                    cache_hit = true,
                    "Serving cached download URL"
                );
                return Ok(cached.url);
            }
        }

        let expiry = now + URL_TTL_SECS;
        let url = self.signer.sign_download(&key, expiry).await?;
        self.cache
            .lock()
            .expect("url cache lock poisoned")
            .put(key, CachedUrl { url: url.clone(), expiry });
        Ok(url)
    }
}

fn unix_now() -> Result<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| Error::Signing(format!("system clock before epoch: {e}")))
}
