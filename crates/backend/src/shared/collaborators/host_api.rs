use async_trait::async_trait;
use contracts::enums::dataset_kind::DatasetKind;
use contracts::shared::date_range::DateRange;
use contracts::shared::pivot::ReportData;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::shared::config::{HostApiConfig, ReportsConfig};

use super::{AccountError, AccountProvider, FetchError, ReportFetcher, StoreError, VariableStore};

/// Пауза между попытками опроса аккаунта
const ACCOUNT_RETRY_DELAY: Duration = Duration::from_millis(250);

/// HTTP-клиент хост-платформы.
///
/// Один клиент закрывает все три контракта: аккаунт, отчёты аналитики и
/// хранилище переменных (в исходном компоненте это были ambient-вызовы
/// `kf.*`; здесь — явная внедряемая зависимость).
pub struct HostApiClient {
    client: reqwest::Client,
    host: HostApiConfig,
    reports: ReportsConfig,
    account_id: OnceCell<String>,
}

impl HostApiClient {
    pub fn new(host: HostApiConfig, reports: ReportsConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            host,
            reports,
            account_id: OnceCell::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.host.base_url.trim_end_matches('/'), path)
    }

    /// Опрашивать endpoint аккаунта, пока не появится идентификатор.
    /// Внешний таймаут задаёт `account_id()`.
    async fn resolve_account(&self) -> Result<String, AccountError> {
        let url = self.url(&self.host.account_path);

        loop {
            match self.try_fetch_account(&url).await {
                Ok(Some(id)) => return Ok(id),
                Ok(None) => {
                    tracing::debug!("Account not ready yet, retrying");
                }
                Err(e) => {
                    tracing::debug!("Account request failed, retrying: {}", e);
                }
            }
            tokio::time::sleep(ACCOUNT_RETRY_DELAY).await;
        }
    }

    async fn try_fetch_account(&self, url: &str) -> Result<Option<String>, AccountError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| AccountError::Api(e.to_string()))?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let account: AccountResponse = response
            .json()
            .await
            .map_err(|e| AccountError::Api(e.to_string()))?;

        Ok(account.id.filter(|id| !id.is_empty()))
    }
}

#[async_trait]
impl AccountProvider for HostApiClient {
    async fn account_id(&self) -> Result<String, AccountError> {
        let timeout_secs = self.host.account_timeout_secs;

        let id = self
            .account_id
            .get_or_try_init(|| async {
                tokio::time::timeout(
                    Duration::from_secs(timeout_secs),
                    self.resolve_account(),
                )
                .await
                .map_err(|_| AccountError::Timeout(timeout_secs))?
            })
            .await?;

        Ok(id.clone())
    }
}

#[async_trait]
impl ReportFetcher for HostApiClient {
    async fn fetch(
        &self,
        account_id: &str,
        kind: DatasetKind,
        range: &DateRange,
    ) -> Result<ReportData, FetchError> {
        let path = self
            .reports
            .path_for(kind)
            .replace("{account}", account_id);
        let url = self.url(&path);

        let query = [
            ("apply_preference", "1".to_string()),
            ("$start_date", range.start_iso()),
            ("$end_date", range.end_iso()),
        ];

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(&query)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                "Report request for {} failed with status {}: {}",
                kind.code(),
                status,
                body
            );
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let preview: String = body.chars().take(500).collect();
        tracing::debug!("Report response preview for {}: {}", kind.code(), preview);

        serde_json::from_str::<ReportData>(&body).map_err(|e| {
            tracing::error!(
                "Failed to parse report payload for {}: {}",
                kind.code(),
                e
            );
            FetchError::Parse(e.to_string())
        })
    }
}

#[async_trait]
impl VariableStore for HostApiClient {
    async fn get(&self, name: &str) -> Result<Option<String>, StoreError> {
        let url = self.url(&format!("{}/{}", self.host.variables_path, name));

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let variable: VariablePayload = response
            .json()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Ok(Some(variable.value))
    }

    async fn set(&self, name: &str, value: &str) -> Result<(), StoreError> {
        let url = self.url(&format!("{}/{}", self.host.variables_path, name));

        let response = self
            .client
            .put(&url)
            .json(&VariablePayload {
                value: value.to_string(),
            })
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    #[serde(rename = "_id", default)]
    id: Option<String>,
}

/// Тело переменной в API хост-платформы
#[derive(Debug, Serialize, Deserialize)]
struct VariablePayload {
    value: String,
}
