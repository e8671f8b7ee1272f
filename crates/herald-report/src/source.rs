//! Report data source — acquires a bearer token and pulls report rows
//! over HTTP as JSON.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use herald_core::config::SourceConfig;

use crate::error::SourceError;

/// Ordered tabular result of one report fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    /// Column names, in first-seen key order.
    pub columns: Vec<String>,
    /// Row-major cell values, one `Vec` per record.
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Upstream source of report rows.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch the current rows for `report_id`.
    async fn fetch(&self, report_id: &str) -> Result<ReportTable, SourceError>;
}

/// Report API client.
///
/// Logs in for a short-lived bearer token on every fetch; nothing is cached
/// between firings.
pub struct HttpDataSource {
    client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl HttpDataSource {
    pub fn new(cfg: &SourceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: cfg.base_url.clone(),
            username: cfg.username.clone(),
            password: cfg.password.clone(),
        }
    }

    /// Acquire a bearer token. Auth failures are terminal for the firing;
    /// they are never retried.
    async fn login(&self) -> Result<String, SourceError> {
        let url = format!("{}/auth/login", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "username": self.username,
                "password": self.password,
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(SourceError::Auth(format!(
                "login rejected with status {}",
                resp.status().as_u16()
            )));
        }

        #[derive(Deserialize)]
        struct LoginResponse {
            token: String,
        }
        let body: LoginResponse = resp
            .json()
            .await
            .map_err(|e| SourceError::Auth(e.to_string()))?;
        Ok(body.token)
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch(&self, report_id: &str) -> Result<ReportTable, SourceError> {
        let token = self.login().await?;
        let url = format!("{}/reports/{}/rows", self.base_url, report_id);
        debug!(report = %report_id, "fetching report rows");

        let resp = self.client.get(&url).bearer_auth(&token).send().await?;
        let status = resp.status().as_u16();
        if status == 401 || status == 403 {
            return Err(SourceError::Auth(format!("token rejected with status {status}")));
        }
        if !resp.status().is_success() {
            let message = resp.text().await.unwrap_or_default();
            warn!(status, report = %report_id, "report API error");
            return Err(SourceError::Api { status, message });
        }

        let records: Vec<Map<String, Value>> = resp
            .json()
            .await
            .map_err(|e| SourceError::Payload(e.to_string()))?;
        Ok(table_from_records(&records))
    }
}

/// Flatten JSON records into a [`ReportTable`].
///
/// Columns are the union of all record keys (sorted by `serde_json`'s map
/// ordering); a record missing a column contributes an empty cell.
pub fn table_from_records(records: &[Map<String, Value>]) -> ReportTable {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|col| record.get(col).map(cell_text).unwrap_or_default())
                .collect()
        })
        .collect();

    ReportTable { columns, rows }
}

/// Render one JSON value as cell text. Strings lose their quotes; `null`
/// becomes the empty string.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(raw: Value) -> Vec<Map<String, Value>> {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn flattens_records_into_rows() {
        let table = table_from_records(&records(json!([
            {"region": "north", "total": 1250},
            {"region": "south", "total": 980},
        ])));
        assert_eq!(table.columns, vec!["region", "total"]);
        assert_eq!(table.rows, vec![
            vec!["north".to_string(), "1250".to_string()],
            vec!["south".to_string(), "980".to_string()],
        ]);
    }

    #[test]
    fn missing_keys_become_empty_cells() {
        let table = table_from_records(&records(json!([
            {"region": "north", "total": 1250},
            {"region": "west"},
        ])));
        assert_eq!(table.rows[1], vec!["west".to_string(), String::new()]);
    }

    #[test]
    fn null_and_bool_cells_are_stringified() {
        let table = table_from_records(&records(json!([
            {"active": true, "note": null},
        ])));
        assert_eq!(table.rows[0], vec!["true".to_string(), String::new()]);
    }

    #[test]
    fn empty_input_is_an_empty_table() {
        let table = table_from_records(&[]);
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
    }
}
