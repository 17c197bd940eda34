//! Bulk import of URLs from an external list endpoint

use reqwest::{Client, header::USER_AGENT};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::constants::BROWSER_USER_AGENT;
use crate::domain::urls::{StoreError, UrlStore};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("error fetching URL list: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("error decoding URL list: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("error storing imported URL: {0}")]
    Store(#[from] StoreError),
}

/// List items may be bare strings or `{"url": ...}` objects
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListEntry {
    Bare(String),
    Record { url: String },
}

impl ListEntry {
    fn into_url(self) -> Option<String> {
        let url = match self {
            ListEntry::Bare(url) | ListEntry::Record { url } => url,
        };
        let trimmed = url.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

#[derive(Clone)]
pub struct UrlImporter {
    source: String,
    http: Client,
}

impl UrlImporter {
    pub fn new(source: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            source: source.to_string(),
            http: Client::builder().timeout(timeout).build()?,
        })
    }

    /// Download the list, skipping blank entries
    pub async fn fetch_list(&self) -> Result<Vec<String>, ImportError> {
        let body = self
            .http
            .get(&self.source)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await?
            .bytes()
            .await?;

        let entries: Vec<ListEntry> = serde_json::from_slice(&body)?;
        Ok(entries.into_iter().filter_map(ListEntry::into_url).collect())
    }

    /// Download the list and add every entry to `store`. Rows added before a
    /// store failure are kept.
    pub async fn import_into(&self, store: &dyn UrlStore) -> Result<usize, ImportError> {
        let urls = self.fetch_list().await?;

        for url in &urls {
            store.add(url).await?;
        }

        tracing::info!(source = %self.source, imported = urls.len(), "imported URL list");
        Ok(urls.len())
    }
}
