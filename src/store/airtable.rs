//! Airtable-backed store: one record per entry, URL in a `URL` field.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::error::{StoreError, StoreResult};
use super::{PendingItem, PendingStore, normalize_entry};

/// Default Airtable REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.airtable.com/v0";
/// Field holding the submitted URL.
const URL_FIELD: &str = "URL";

/// One page of the records listing.
#[derive(Debug, Deserialize)]
struct RecordPage {
    records: Vec<Record>,
    offset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Record {
    id: String,
    #[serde(default)]
    fields: serde_json::Map<String, serde_json::Value>,
}

impl Record {
    fn into_item(self) -> Option<PendingItem> {
        let url = self.fields.get(URL_FIELD)?.as_str()?.trim().to_string();
        (!url.is_empty()).then_some(PendingItem { id: self.id, url })
    }
}

/// Airtable table store.
pub struct AirtableStore {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    base_id: String,
    table: String,
}

impl AirtableStore {
    /// Create a store for `table` in base `base_id`.
    ///
    /// # Errors
    /// Returns an error if a setting is blank or the HTTP client cannot be
    /// built.
    pub fn new(
        api_key: impl Into<String>,
        base_id: impl Into<String>,
        table: impl Into<String>,
    ) -> StoreResult<Self> {
        let api_key = api_key.into();
        let base_id = base_id.into();
        let table = table.into();
        for (name, value) in [("api key", &api_key), ("base id", &base_id), ("table", &table)] {
            if value.trim().is_empty() {
                return Err(StoreError::InvalidConfig(format!("airtable {name} is empty")));
            }
        }

        Ok(Self {
            client: reqwest::Client::builder().build()?,
            api_url: DEFAULT_API_URL.to_string(),
            api_key,
            base_id,
            table,
        })
    }

    /// Point the store at another API root (proxies, tests).
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    fn table_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.api_url,
            urlencoding::encode(&self.base_id),
            urlencoding::encode(&self.table)
        )
    }

    fn record_url(&self, record_id: &str) -> String {
        format!("{}/{}", self.table_url(), urlencoding::encode(record_id))
    }

    async fn check(response: reqwest::Response) -> StoreResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Remote {
            status: status.as_u16(),
            body,
        })
    }

    async fn fetch_records(&self) -> StoreResult<Vec<Record>> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut request = self.client.get(self.table_url()).bearer_auth(&self.api_key);
            if let Some(offset) = &offset {
                request = request.query(&[("offset", offset)]);
            }
            let response = Self::check(request.send().await?).await?;
            let page: RecordPage = serde_json::from_str(&response.text().await?)?;

            records.extend(page.records);
            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        Ok(records)
    }
}

#[async_trait]
impl PendingStore for AirtableStore {
    async fn add(&self, url: &str) -> StoreResult<PendingItem> {
        let entry = normalize_entry(url)?;
        let body = json!({ "fields": { URL_FIELD: entry } });

        let response = self
            .client
            .post(self.table_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let response = Self::check(response).await?;
        let record: Record = serde_json::from_str(&response.text().await?)?;

        debug!(record = %record.id, "airtable record created");
        Ok(PendingItem {
            id: record.id,
            url: entry,
        })
    }

    async fn list(&self) -> StoreResult<Vec<PendingItem>> {
        let records = self.fetch_records().await?;
        Ok(records.into_iter().filter_map(Record::into_item).collect())
    }

    async fn clear(&self) -> StoreResult<usize> {
        let records = self.fetch_records().await?;
        let total = records.len();

        for record in records {
            let response = self
                .client
                .delete(self.record_url(&record.id))
                .bearer_auth(&self.api_key)
                .send()
                .await?;
            Self::check(response).await?;
        }

        info!(removed = total, "airtable records cleared");
        Ok(total)
    }
}
