//! One worksheet exposed as a [`Table`].
//!
//! `append_row` maps to `values.append` (`USER_ENTERED`), `get_all_records`
//! to `values.get` with the first row treated as the header, matching how
//! the rest of the system expects spreadsheet rows to be keyed.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use quotevend_quotations::{Record, StoreError, StoreResult, Table};

use crate::auth::{ServiceAccountKey, TokenProvider};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Connection settings for the two quotation worksheets.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub credentials_path: PathBuf,
    pub spreadsheet_id: String,
    pub items_sheet: String,
    pub customers_sheet: String,
}

/// Load credentials and build the item/customer table pair.
///
/// Only the key file is touched here; the first network call happens on the
/// first request. A failure leaves the store unconnected, which the caller
/// surfaces per request instead of crashing the process.
pub fn connect(config: &SheetsConfig) -> StoreResult<(Arc<dyn Table>, Arc<dyn Table>)> {
    if config.spreadsheet_id.is_empty() {
        return Err(StoreError::Unavailable(
            "SPREADSHEET_ID is not configured".to_string(),
        ));
    }

    let key = ServiceAccountKey::from_file(&config.credentials_path)?;
    let http = reqwest::Client::new();
    let tokens = Arc::new(TokenProvider::new(key, http.clone())?);

    tracing::info!(
        spreadsheet_id = %config.spreadsheet_id,
        items_sheet = %config.items_sheet,
        customers_sheet = %config.customers_sheet,
        "google sheets store configured"
    );

    let items = SheetsTable::new(
        http.clone(),
        tokens.clone(),
        config.spreadsheet_id.clone(),
        config.items_sheet.clone(),
    );
    let customers = SheetsTable::new(
        http,
        tokens,
        config.spreadsheet_id.clone(),
        config.customers_sheet.clone(),
    );

    Ok((Arc::new(items), Arc::new(customers)))
}

/// A single worksheet of one spreadsheet.
pub struct SheetsTable {
    http: reqwest::Client,
    tokens: Arc<TokenProvider>,
    spreadsheet_id: String,
    sheet_title: String,
}

impl SheetsTable {
    pub fn new(
        http: reqwest::Client,
        tokens: Arc<TokenProvider>,
        spreadsheet_id: String,
        sheet_title: String,
    ) -> Self {
        Self {
            http,
            tokens,
            spreadsheet_id,
            sheet_title,
        }
    }

    fn values_url(&self, suffix: &str) -> String {
        values_url(&self.spreadsheet_id, &self.sheet_title, suffix)
    }
}

fn values_url(spreadsheet_id: &str, sheet_title: &str, suffix: &str) -> String {
    format!("{SHEETS_API_BASE}/{spreadsheet_id}/values/{sheet_title}{suffix}")
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

fn cell_to_string(cell: serde_json::Value) -> String {
    match cell {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

#[async_trait]
impl Table for SheetsTable {
    async fn append_row(&self, row: Vec<String>) -> StoreResult<()> {
        let token = self.tokens.access_token().await?;

        let response = self
            .http
            .post(self.values_url(":append"))
            .query(&[("valueInputOption", "USER_ENTERED")])
            .bearer_auth(token)
            .json(&serde_json::json!({ "values": [row] }))
            .send()
            .await
            .map_err(|e| StoreError::Backend(format!("append to {}: {e}", self.sheet_title)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Backend(format!(
                "append to {} returned {status}: {body}",
                self.sheet_title
            )));
        }

        tracing::debug!(sheet = %self.sheet_title, "row appended");
        Ok(())
    }

    async fn get_all_records(&self) -> StoreResult<Vec<Record>> {
        let token = self.tokens.access_token().await?;

        let response = self
            .http
            .get(self.values_url(""))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| StoreError::Backend(format!("read of {}: {e}", self.sheet_title)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Backend(format!(
                "read of {} returned {status}: {body}",
                self.sheet_title
            )));
        }

        let range: ValueRange = response
            .json()
            .await
            .map_err(|e| StoreError::Backend(format!("malformed values response: {e}")))?;

        let mut rows = range.values.into_iter();
        let header: Vec<String> = rows
            .next()
            .unwrap_or_default()
            .into_iter()
            .map(cell_to_string)
            .collect();

        Ok(rows
            .map(|row| {
                header
                    .iter()
                    .cloned()
                    .zip(row.into_iter().map(cell_to_string))
                    .collect()
            })
            .collect())
    }
}
