//! Time-boxed signed URL generation for the blob store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use reelroom_core::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// Signed-URL lifetime in seconds (upload and download alike).
pub const URL_TTL_SECS: u64 = 3600;

/// Issues time-boxed upload/download URLs for blob objects.
///
/// The seam behind which a cloud presigner would sit; the gateway only
/// depends on this trait.
#[async_trait]
pub trait UrlSigner: Send + Sync {
    /// Signed single-use-intent PUT URL, valid until `expires_at` (Unix
    /// seconds). `metadata` entries are bound into the signature so they
    /// cannot be stripped or altered by the uploader.
    async fn sign_upload(
        &self,
        object_key: &str,
        content_type: &str,
        metadata: &BTreeMap<String, String>,
        expires_at: u64,
    ) -> Result<String>;

    /// Signed GET URL, valid until `expires_at` (Unix seconds).
    async fn sign_download(&self, object_key: &str, expires_at: u64) -> Result<String>;
}

/// HMAC-SHA256 URL signer.
///
/// Produces URLs of the form
/// `{base}/{bucket}/{encoded-key}?expires={unix}&signature={hex}` with the
/// signature computed over method, bucket, key, expiry, and (for uploads)
/// content type and metadata. The serving side recomputes the MAC and
/// rejects expired or tampered requests.
pub struct HmacUrlSigner {
    base_url: String,
    bucket: String,
    secret: Vec<u8>,
}

impl HmacUrlSigner {
    pub fn new(
        base_url: impl Into<String>,
        bucket: impl Into<String>,
        secret: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bucket: bucket.into(),
            secret: secret.into(),
        }
    }

    fn mac(&self, canonical: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| Error::Signing(format!("invalid signing key: {e}")))?;
        mac.update(canonical.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    fn object_url(&self, object_key: &str) -> String {
        // Encode each path segment, keeping the '/' namespace separators.
        let encoded: Vec<String> = object_key
            .split('/')
            .map(|seg| urlencoding::encode(seg).into_owned())
            .collect();
        format!("{}/{}/{}", self.base_url, self.bucket, encoded.join("/"))
    }
}

#[async_trait]
impl UrlSigner for HmacUrlSigner {
    async fn sign_upload(
        &self,
        object_key: &str,
        content_type: &str,
        metadata: &BTreeMap<String, String>,
        expires_at: u64,
    ) -> Result<String> {
        let mut canonical = format!(
            "PUT\n{}\n{}\n{}\n{}",
            self.bucket, object_key, expires_at, content_type
        );
        for (k, v) in metadata {
            canonical.push_str(&format!("\n{k}:{v}"));
        }
        let signature = self.mac(&canonical)?;

        let mut url = format!(
            "{}?expires={}&content_type={}",
            self.object_url(object_key),
            expires_at,
            urlencoding::encode(content_type)
        );
        for (k, v) in metadata {
            url.push_str(&format!(
                "&meta-{}={}",
                urlencoding::encode(k),
                urlencoding::encode(v)
            ));
        }
        url.push_str(&format!("&signature={signature}"));
        Ok(url)
    }

    async fn sign_download(&self, object_key: &str, expires_at: u64) -> Result<String> {
        let canonical = format!("GET\n{}\n{}\n{}", self.bucket, object_key, expires_at);
        let signature = self.mac(&canonical)?;
        Ok(format!(
            "{}?expires={}&signature={}",
            self.object_url(object_key),
            expires_at,
            signature
        ))
    }
}
