use anyhow::{Context as _, anyhow};
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use crate::domain::repository::ObjectStorage;
use crate::error::MarketplaceError;

/// BaaS object storage, authenticated with the service-role key.
#[derive(Clone)]
pub struct BaasStorage {
    pub http: reqwest::Client,
    pub base_url: String,
    pub service_key: String,
    pub bucket: String,
}

impl BaasStorage {
    fn bucket_url(&self) -> String {
        format!("{}/storage/v1/object/{}", self.base_url, self.bucket)
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/storage/v1/object/{}/{key}", self.base_url, self.bucket)
    }

    /// URL under which a public bucket serves `key`.
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{key}",
            self.base_url, self.bucket
        )
    }
}

impl ObjectStorage for BaasStorage {
    async fn upload(
        &self,
        key: &str,
        content_type: &str,
        bytes: Bytes,
    ) -> Result<String, MarketplaceError> {
        let size = bytes.len();
        let resp = self
            .http
            .post(self.object_url(key))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .context("upload object")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("storage upload failed ({status}): {body}").into());
        }
        tracing::debug!(key, size, "object uploaded");
        Ok(self.public_url(key))
    }

    async fn remove(&self, keys: &[String]) -> Result<(), MarketplaceError> {
        if keys.is_empty() {
            return Ok(());
        }
        let resp = self
            .http
            .delete(self.bucket_url())
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .json(&RemoveObjects { prefixes: keys })
            .send()
            .await
            .context("remove objects")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("storage remove failed ({status}): {body}").into());
        }
        tracing::debug!(count = keys.len(), "objects removed");
        Ok(())
    }
}

#[derive(Serialize)]
struct RemoveObjects<'a> {
    prefixes: &'a [String],
}
